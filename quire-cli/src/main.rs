use clap::Command;

mod cmd;
mod config;

fn cli() -> Command {
    Command::new("quire")
        .about("Build a markdown blog into static pages")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::plan::make_subcommand())
        .subcommand(cmd::theme::make_subcommand())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("plan", args)) => cmd::plan::execute(args),
        Some(("theme", args)) => cmd::theme::execute(args),
        _ => unreachable!("subcommand_required is set"),
    }
}

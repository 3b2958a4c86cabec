use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use quire_core::build_site;
use crate::config::QuireConfig;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('s')
                .long("content")
                .value_name("DIR")
                .help("Directory containing markdown posts")
                .default_value("./content")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site")
                .default_value("./public")
        )
        .arg(
            Arg::new("templates")
                .short('t')
                .long("templates")
                .value_name("DIR")
                .help("Directory of templates that override the built-in ones")
                .default_value("./templates")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./quire.toml")
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build"))
        .about("Build the blog into static pages")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let quire_config = QuireConfig::load(args)?;
    let build_config = quire_config.build_config();

    let output_dir = build_config.output_dir();
    let template_dir = build_config.template_dir()?;
    let report = build_site(
        quire_config.site_config(),
        &build_config.content_dir(),
        &output_dir,
        template_dir.as_deref(),
    )?;

    println!(
        "Site built successfully in {} ({} pages, {} assets)",
        output_dir.display(),
        report.pages.len(),
        report.assets.len()
    );

    Ok(())
}

use anyhow::Result;
use clap::{ArgMatches, Command};
use quire_core::SiteBuilder;
use serde_json::json;
use crate::cmd::build::add_build_args;
use crate::config::QuireConfig;

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("plan"))
        .about("Print the page directives for every post as JSON, without rendering")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let quire_config = QuireConfig::load(args)?;
    let build_config = quire_config.build_config();

    let site = SiteBuilder::new()
        .content_dir(build_config.content_dir())
        .config(quire_config.site_config().clone())
        .build()?;

    let plan = site.plan();
    let output = json!({
        "pages": plan.pages,
        "index": plan.index,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

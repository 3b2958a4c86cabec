use anyhow::{Result, anyhow};
use clap::{Arg, ArgMatches, Command};
use quire_core::ThemeGetter;
use crate::config::QuireConfig;

pub fn make_subcommand() -> Command {
    Command::new("theme")
        .about("Look up a value in the active theme, e.g. `quire theme colors primary`")
        .arg(
            Arg::new("keys")
                .value_name("KEY")
                .help("Keys to descend through, outermost first")
                .required(true)
                .num_args(1..)
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("THEME")
                .help("Theme to look in instead of the active one")
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

pub fn execute(args: &ArgMatches) -> Result<()> {
    let quire_config = QuireConfig::load(args)?;
    let site_config = quire_config.site_config();

    let themes = site_config.themes()?;
    let name = args
        .get_one::<String>("name")
        .unwrap_or(&site_config.theme.active);
    let theme = themes.require(name)?;

    let keys: Vec<String> = args
        .get_many::<String>("keys")
        .map(|keys| keys.cloned().collect())
        .unwrap_or_default();
    let getter = ThemeGetter::new(keys)?;

    let value = getter
        .get(Some(theme))
        .ok_or_else(|| anyhow!("No value at {} in theme {}", getter.keys().join("."), name))?;
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

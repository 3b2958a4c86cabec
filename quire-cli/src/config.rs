use anyhow::{Result, bail};
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct QuireConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Site configuration (from quire-core). Read straight from the config
    /// file so theme keys keep their case.
    #[serde(skip)]
    pub site: quire_core::config::Config,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Directory containing markdown posts
    pub content: String,
    /// Output directory for generated site
    pub output: String,
    /// Template override directory
    pub templates: String,
    /// Configuration file path
    pub config: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "./content".to_string(),
            output: "./public".to_string(),
            templates: "./templates".to_string(),
            config: "./quire.toml".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.content)
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output)
    }

    /// The template override directory. The default location is optional;
    /// a directory named explicitly must exist.
    pub fn template_dir(&self) -> Result<Option<PathBuf>> {
        let dir = PathBuf::from(&self.templates);
        if dir.is_dir() {
            return Ok(Some(dir));
        }
        if self.templates != Self::default().templates {
            bail!("Template directory {} does not exist", dir.display());
        }
        log::debug!("No template directory at {}, using built-in templates", dir.display());
        Ok(None)
    }
}

// Arg id → config key. Only args given on the command line override.
const CLI_KEYS: [(&str, &str); 4] = [
    ("content", "build.content"),
    ("output", "build.output"),
    ("templates", "build.templates"),
    ("config", "build.config"),
];

impl QuireConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (QUIRE_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .try_get_one::<String>("config")
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_else(|| BuildConfig::default().config);

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            log::debug!("Reading config file {}", config_file);
            builder = builder.add_source(File::from(PathBuf::from(&config_file)));
        }

        // 3. Add environment variables with QUIRE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("QUIRE")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        for (id, key) in CLI_KEYS {
            if args.try_get_one::<String>(id).is_err() {
                continue;
            }
            if args.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }
            if let Some(value) = args.get_one::<String>(id) {
                builder = builder.set_override(key, value.clone())?;
            }
        }

        let config = builder.build()?;
        let mut quire_config: QuireConfig = config.try_deserialize()?;

        if Path::new(&config_file).exists() {
            quire_config.site = quire_core::config::Config::read(&config_file)?;
        }

        Ok(quire_config)
    }

    /// Get just the site configuration for passing to quire-core
    pub fn site_config(&self) -> &quire_core::config::Config {
        &self.site
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

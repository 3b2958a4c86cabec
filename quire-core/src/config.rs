use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markdown::DEFAULT_SYNTAX_THEME;
use crate::theme::{DEFAULT_THEME, ThemeConfig, ThemeError, Themes};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub theme: ThemeSettings,
    /// Extra or overriding themes, keyed by name.
    pub themes: BTreeMap<String, ThemeConfig>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }

    /// Built-in themes with this config's `[themes.*]` tables layered on top.
    pub fn themes(&self) -> Result<Themes, ThemeError> {
        let mut themes = Themes::builtin()?;
        for (name, overlay) in &self.themes {
            themes.merge(name, overlay.clone());
        }
        Ok(themes)
    }

    /// The theme selected by `[theme] active`.
    pub fn active_theme(&self) -> Result<ThemeConfig, ThemeError> {
        let themes = self.themes()?;
        themes.require(&self.theme.active).cloned()
    }
}

/// Site metadata handed to every template as `site`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: Option<String>,
    pub site_url: Option<String>,
    pub author: Option<Author>,
    pub social: Option<Social>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quire".into(),
            description: None,
            site_url: None,
            author: None,
            social: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Social {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ThemeSettings {
    pub active: String,
    pub syntax: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            active: DEFAULT_THEME.to_string(),
            syntax: DEFAULT_SYNTAX_THEME.to_string(),
        }
    }
}

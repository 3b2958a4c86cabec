//! Nested lookups into a theme.
//!
//! A theme is any nested JSON-like value. Lookups descend one key per step
//! and come back `None` as soon as a step is missing, so callers can fall
//! back to their own default:
//!
//! ```
//! use quire_core::theme::theme_get;
//! use serde_json::json;
//!
//! let theme = json!({ "colors": { "primary": "red" } });
//! let primary = theme_get(["colors", "primary"]).unwrap();
//! assert_eq!(primary.get(Some(&theme)), Some(&json!("red")));
//!
//! let missing = theme_get(["layout", "padding", "lg"]).unwrap();
//! assert_eq!(missing.get(Some(&theme)), None);
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

pub type ThemeConfig = Value;

pub const DEFAULT_THEME: &str = "dark";

const DARK: &str = include_str!("../themes/dark.toml");
const LIGHT: &str = include_str!("../themes/light.toml");

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme lookup needs at least one key")]
    EmptyPath,
    #[error("Empty segment in theme path {0:?}")]
    EmptySegment(String),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("Theme parse error in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A reusable lookup path into a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeGetter {
    keys: Vec<String>,
}

impl ThemeGetter {
    pub fn new<I, S>(keys: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(ThemeError::EmptyPath);
        }
        Ok(Self { keys })
    }

    /// Build a getter from a dotted path such as `layout.padding.lg`.
    /// Segments may not be empty: `colors..primary` is an error.
    pub fn parse(path: &str) -> Result<Self, ThemeError> {
        if path.trim().is_empty() {
            return Err(ThemeError::EmptyPath);
        }
        let keys: Vec<&str> = path.split('.').map(str::trim).collect();
        if keys.iter().any(|k| k.is_empty()) {
            return Err(ThemeError::EmptySegment(path.to_string()));
        }
        Self::new(keys)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Look the path up in `theme`. Never fails; a missing theme or a missing
    /// step anywhere along the path yields `None`.
    pub fn get<'t>(&self, theme: Option<&'t ThemeConfig>) -> Option<&'t Value> {
        let mut current = theme?;
        for key in &self.keys {
            current = step(current, key)?;
        }
        Some(current)
    }
}

fn step<'t>(value: &'t Value, key: &str) -> Option<&'t Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

pub fn theme_get<I, S>(keys: I) -> Result<ThemeGetter, ThemeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ThemeGetter::new(keys)
}

/// One-shot lookup.
pub fn resolve<'t>(theme: Option<&'t ThemeConfig>, keys: &[&str]) -> Result<Option<&'t Value>, ThemeError> {
    Ok(ThemeGetter::new(keys.iter().copied())?.get(theme))
}

/// Named themes available to a build. Starts with the built-in `dark` and
/// `light` themes.
#[derive(Debug, Clone)]
pub struct Themes {
    themes: BTreeMap<String, ThemeConfig>,
}

impl Themes {
    pub fn builtin() -> Result<Self, ThemeError> {
        let mut themes = BTreeMap::new();
        themes.insert("dark".to_string(), parse_toml("dark", DARK)?);
        themes.insert("light".to_string(), parse_toml("light", LIGHT)?);
        Ok(Self { themes })
    }

    pub fn empty() -> Self {
        Self {
            themes: BTreeMap::new(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&ThemeConfig, ThemeError> {
        self.get(name)
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }

    /// Layer `overlay` over the theme called `name`, adding it if it does not
    /// exist. Tables merge key by key; anything else replaces.
    pub fn merge(&mut self, name: &str, overlay: ThemeConfig) {
        match self.themes.get_mut(name) {
            Some(base) => merge_values(base, overlay),
            None => {
                self.themes.insert(name.to_string(), overlay);
            }
        }
    }
}

fn parse_toml(name: &str, source: &str) -> Result<ThemeConfig, ThemeError> {
    toml::from_str(source).map_err(|source| ThemeError::Parse {
        name: name.to_string(),
        source,
    })
}

fn merge_values(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Object(overlay) if base.is_object() => {
            if let Value::Object(base) = base {
                for (key, value) in overlay {
                    match base.get_mut(&key) {
                        Some(existing) => merge_values(existing, value),
                        None => {
                            base.insert(key, value);
                        }
                    }
                }
            }
        }
        overlay => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_path_is_rejected() {
        let keys: [&str; 0] = [];
        assert!(matches!(theme_get(keys), Err(ThemeError::EmptyPath)));
        assert!(matches!(ThemeGetter::parse(""), Err(ThemeError::EmptyPath)));
    }

    #[test]
    fn dotted_path_rejects_empty_segments() {
        for path in ["colors..primary", ".colors", "colors.", "colors. .primary"] {
            assert!(
                matches!(ThemeGetter::parse(path), Err(ThemeError::EmptySegment(_))),
                "{path} should be rejected"
            );
        }
        let getter = ThemeGetter::parse(" colors . primary ").unwrap();
        assert_eq!(getter.keys(), ["colors", "primary"]);
    }

    #[test]
    fn single_key_returns_top_level_value() {
        let theme = json!({ "primaryColor": "teal", "colors": {} });
        let getter = theme_get(["primaryColor"]).unwrap();
        assert_eq!(getter.get(Some(&theme)), Some(&json!("teal")));
    }

    #[test]
    fn nested_lookup() {
        let theme = json!({ "colors": { "primary": "red" } });
        assert_eq!(
            resolve(Some(&theme), &["colors", "primary"]).unwrap(),
            Some(&json!("red"))
        );
    }

    #[test]
    fn missing_intermediate_is_none() {
        let theme = json!({ "colors": { "primary": "red" } });
        let getter = theme_get(["layout", "padding", "lg"]).unwrap();
        assert_eq!(getter.get(Some(&theme)), None);
    }

    #[test]
    fn descending_through_a_leaf_is_none() {
        let theme = json!({ "colors": { "primary": "red" } });
        let getter = theme_get(["colors", "primary", "shade"]).unwrap();
        assert_eq!(getter.get(Some(&theme)), None);
    }

    #[test]
    fn null_intermediate_is_none() {
        let theme = json!({ "colors": null });
        assert_eq!(resolve(Some(&theme), &["colors", "primary"]).unwrap(), None);
    }

    #[test]
    fn absent_theme_is_none() {
        let getter = theme_get(["colors"]).unwrap();
        assert_eq!(getter.get(None), None);
    }

    #[test]
    fn arrays_index_by_number() {
        let theme = json!({ "space": ["0", "4px", "8px"] });
        assert_eq!(resolve(Some(&theme), &["space", "2"]).unwrap(), Some(&json!("8px")));
        assert_eq!(resolve(Some(&theme), &["space", "x"]).unwrap(), None);
    }

    #[test]
    fn dotted_paths() {
        let getter = ThemeGetter::parse("layout.padding.lg").unwrap();
        assert_eq!(getter.keys(), ["layout", "padding", "lg"]);
    }

    #[test]
    fn builtin_themes_load() {
        let themes = Themes::builtin().unwrap();
        assert_eq!(themes.names().collect::<Vec<_>>(), ["dark", "light"]);

        let dark = themes.get("dark");
        let light = themes.get("light");
        let background = theme_get(["colors", "background"]).unwrap();
        assert_eq!(background.get(dark), Some(&json!("#222")));
        assert_eq!(background.get(light), Some(&json!("#f1f1f1")));

        let padding = theme_get(["layout", "padding", "lg"]).unwrap();
        assert_eq!(padding.get(dark), Some(&json!("3rem")));
    }

    #[test]
    fn merge_overrides_single_keys() {
        let mut themes = Themes::builtin().unwrap();
        themes.merge("dark", json!({ "colors": { "primary": "hotpink" } }));

        let dark = themes.get("dark");
        assert_eq!(
            theme_get(["colors", "primary"]).unwrap().get(dark),
            Some(&json!("hotpink"))
        );
        assert_eq!(
            theme_get(["colors", "text"]).unwrap().get(dark),
            Some(&json!("#f1f1f1"))
        );
    }

    #[test]
    fn merge_adds_new_themes() {
        let mut themes = Themes::empty();
        themes.merge("sepia", json!({ "colors": { "background": "#f4ecd8" } }));
        assert!(themes.require("sepia").is_ok());
        assert!(matches!(themes.require("neon"), Err(ThemeError::UnknownTheme(_))));
    }
}

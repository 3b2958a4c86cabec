use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::Serialize;
use tera::{Context, Tera, Value};
use thiserror::Error;
use walkdir::WalkDir;

use crate::theme::{ThemeConfig, ThemeGetter};

const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../templates/base.html")),
    ("blog-post.html", include_str!("../templates/blog-post.html")),
    ("blog-index.html", include_str!("../templates/blog-index.html")),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    TeraError(#[from] tera::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// `theme(path="colors.primary", default="red")` inside templates.
struct ThemeFunction {
    theme: ThemeConfig,
}

impl tera::Function for ThemeFunction {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let path = args
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("theme() needs a `path` argument"))?;
        let getter = ThemeGetter::parse(path).map_err(|e| tera::Error::msg(e.to_string()))?;

        let value = getter
            .get(Some(&self.theme))
            .cloned()
            .or_else(|| args.get("default").cloned())
            .unwrap_or_else(|| Value::String(String::new()));
        Ok(value)
    }

    // Theme values are CSS and come from the site's own config.
    fn is_safe(&self) -> bool {
        true
    }
}

pub struct TemplateRenderer {
    tera: Tera,
    context: Context,
}

impl TemplateRenderer {
    /// Built-in templates, with any `*.html` under `template_dir` loaded over
    /// them by name.
    pub fn new(template_dir: Option<&Path>, theme: ThemeConfig) -> Result<Self, TemplateError> {
        let mut templates: Vec<(String, String)> = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect();

        if let Some(dir) = template_dir.filter(|d| d.is_dir()) {
            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = entry?;
                let path = entry.path();
                if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "html") {
                    continue;
                }
                let name = path
                    .strip_prefix(dir)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");
                debug!("Loading template {}", name);
                templates.push((name, std::fs::read_to_string(path)?));
            }
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        tera.register_function("theme", ThemeFunction { theme });

        Ok(Self {
            tera,
            context: Context::new(),
        })
    }

    /// Add a value every render sees.
    pub fn add_to_context<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a template with the global context plus `context`.
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        let mut merged = self.context.clone();
        merged.extend(context.clone());
        Ok(self.tera.render(template, &merged)?)
    }
}

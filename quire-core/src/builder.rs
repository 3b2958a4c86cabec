use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::Config;
use crate::error::BuildError;
use crate::node::{ContentNode, NodeKind, annotate_all};
use crate::planner::{PagePlanner, SitePlan};
use crate::query::ContentQuery;
use crate::renderer::{RenderError, RenderedPage, Renderer};
use crate::scanner::ContentScanner;
use crate::template::TemplateRenderer;

/// What a finished build wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
}

pub struct SiteBuilder {
    content_dir: Option<PathBuf>,
    output_dir: PathBuf,
    template_dir: Option<PathBuf>,
    config: Config,
    planner: PagePlanner,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            content_dir: None,
            output_dir: PathBuf::from("./public"),
            template_dir: None,
            config: Config::default(),
            planner: PagePlanner::new(),
        }
    }

    // Required configuration
    pub fn content_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.content_dir = Some(path.as_ref().to_path_buf());
        self
    }

    // Optional paths
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn template_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn planner(mut self, planner: PagePlanner) -> Self {
        self.planner = planner;
        self
    }

    /// Ingest, annotate, query and plan. Nothing is written.
    pub fn build(self) -> Result<Site, BuildError> {
        let content_dir = self.content_dir.ok_or(BuildError::MissingContentDir)?;

        let mut nodes = ContentScanner::new(&content_dir).scan()?;
        annotate_all(&mut nodes)?;

        let query = ContentQuery::new(&nodes).syntax_theme(self.config.theme.syntax.clone());
        let plan = self.planner.plan(&query)?;
        info!("Planned {} pages", plan.pages.len() + 1);

        let assets = nodes.into_iter().filter(|n| n.kind == NodeKind::Asset).collect();

        Ok(Site {
            plan,
            assets,
            output_dir: self.output_dir,
            template_dir: self.template_dir,
            config: self.config,
        })
    }
}

pub struct Site {
    plan: SitePlan,
    assets: Vec<ContentNode>,
    output_dir: PathBuf,
    template_dir: Option<PathBuf>,
    config: Config,
}

impl Site {
    pub fn plan(&self) -> &SitePlan {
        &self.plan
    }

    pub fn assets(&self) -> &[ContentNode] {
        &self.assets
    }

    /// Render every page in memory first; only once all of them succeed is
    /// anything written to the output directory.
    pub fn render_all(&self) -> Result<BuildReport, BuildError> {
        let theme = self.config.active_theme()?;
        let templates = TemplateRenderer::new(self.template_dir.as_deref(), theme).map_err(RenderError::from)?;
        let renderer = Renderer::new(templates, &self.config.site);

        let pages = renderer.render_all(&self.plan)?;
        self.commit(&pages)
    }

    fn commit(&self, pages: &[RenderedPage]) -> Result<BuildReport, BuildError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let mut report = BuildReport::default();

        for page in pages {
            let output_path = self.output_dir.join(&page.out_path);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output_path, &page.html)?;
            report.pages.push(page.out_path.clone());
        }

        for asset in &self.assets {
            let output_path = self.output_dir.join(&asset.relative_path);
            if report.pages.contains(&asset.relative_path) {
                warn!("Skipping asset {}: a page renders to the same path", asset.relative_path.display());
                continue;
            }
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&asset.path, &output_path)?;
            report.assets.push(asset.relative_path.clone());
        }

        info!(
            "Wrote {} pages and {} assets to {}",
            report.pages.len(),
            report.assets.len(),
            self.output_dir.display()
        );
        Ok(report)
    }
}

/// Build the whole site in one go.
pub fn build_site(
    config: &Config,
    content_dir: &Path,
    output_dir: &Path,
    template_dir: Option<&Path>,
) -> Result<BuildReport, BuildError> {
    let mut builder = SiteBuilder::new()
        .content_dir(content_dir)
        .output_dir(output_dir)
        .config(config.clone());
    if let Some(dir) = template_dir {
        builder = builder.template_dir(dir);
    }

    builder.build()?.render_all()
}

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod markdown;
pub mod node;
pub mod planner;
pub mod query;
pub mod renderer;
pub mod scanner;
pub mod slug;
pub mod template;
pub mod theme;

// Re-export main types
pub use builder::{BuildReport, Site, SiteBuilder, build_site};
pub use document::{ContentDocument, DocumentRef, FrontMatter};
pub use error::{BuildError, IngestionError};
pub use node::{ContentNode, NodeKind, annotate, annotate_all};
pub use planner::{PageContext, PageDirective, PagePlanner, SitePlan, TemplateRef, plan_pages};
pub use query::ContentQuery;
pub use scanner::ContentScanner;
pub use slug::derive_slug;
pub use theme::{ThemeConfig, ThemeGetter, resolve, theme_get};

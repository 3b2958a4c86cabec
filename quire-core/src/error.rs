use std::path::PathBuf;

use thiserror::Error;

use crate::renderer::RenderError;
use crate::scanner::ScanError;
use crate::theme::ThemeError;

/// A content node could not be given an identity.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Missing file path for node {0}")]
    MissingPath(String),
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Duplicate slug {slug}: {} and {}", .first.display(), .second.display())]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Content directory not specified")]
    MissingContentDir,
    #[error("Content store error: {0}")]
    Store(#[from] ScanError),
    #[error("Ingestion error: {0}")]
    Ingestion(#[from] IngestionError),
    #[error("Malformed front matter in {}: {reason}", .path.display())]
    MalformedFrontMatter { path: PathBuf, reason: String },
    #[error("Node {0} has no slug; annotate before querying")]
    Unannotated(PathBuf),
    #[error("Two pages render to {0}")]
    PathConflict(String),
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

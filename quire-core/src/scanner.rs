use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;
use walkdir::WalkDir;

use crate::node::{ContentNode, NodeKind};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content directory does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Walks a content directory and turns every file into a [`ContentNode`].
pub struct ContentScanner {
    source_dir: PathBuf,
}

impl ContentScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the whole tree. Nodes come back ordered by relative path so
    /// repeated scans of the same tree produce the same sequence.
    pub fn scan(&self) -> Result<Vec<ContentNode>, ScanError> {
        info!("Scanning: {}", self.source_dir.display());

        if !self.source_dir.is_dir() {
            return Err(ScanError::MissingRoot(self.source_dir.clone()));
        }

        let mut nodes = Vec::new();
        for entry in WalkDir::new(&self.source_dir).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&self.source_dir)
                .unwrap_or(entry.path());
            if !entry.file_type().is_file() || is_hidden(relative) {
                continue;
            }
            nodes.push(self.scan_file(entry.path())?);
        }

        let markdown = nodes.iter().filter(|n| n.kind == NodeKind::Markdown).count();
        info!(
            "Discovered {} markdown documents and {} assets",
            markdown,
            nodes.len() - markdown
        );

        Ok(nodes)
    }

    fn scan_file(&self, path: &Path) -> Result<ContentNode, ScanError> {
        let relative_path = path
            .strip_prefix(&self.source_dir)
            .map_err(|_| ScanError::InvalidPath(path.to_path_buf()))?;

        let kind = if is_markdown(path) {
            NodeKind::Markdown
        } else {
            NodeKind::Asset
        };
        debug!("Found {:?}: {}", kind, relative_path.display());

        let source = match kind {
            NodeKind::Markdown => Some(std::fs::read_to_string(path)?),
            NodeKind::Asset => None,
        };

        Ok(ContentNode::new(
            kind,
            path.to_path_buf(),
            relative_path.to_path_buf(),
            source,
        ))
    }
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false)
}

// Dotfiles and anything under a dot directory (.git, .DS_Store) are not content.
fn is_hidden(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.') && s != "." && s != "..")
            .unwrap_or(false)
    })
}

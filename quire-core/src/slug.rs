//! Slug derivation from a document's location under the content root.
//!
//! A slug always starts and ends with `/`. The markdown extension is dropped
//! and a trailing `index` component collapses into its directory, so
//! `blog/hello/index.md` and `blog/hello.md` both map to `/blog/hello/`.
//! Each component is percent-encoded, so a slug is safe to emit as-is in a URL.

use std::path::{Component, Path};

use crate::error::IngestionError;

pub fn derive_slug(relative_path: &Path) -> Result<String, IngestionError> {
    if relative_path.as_os_str().is_empty() {
        return Err(IngestionError::InvalidPath(relative_path.to_path_buf()));
    }

    let stem = relative_path.with_extension("");
    let mut parts: Vec<&str> = Vec::new();
    for component in stem.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| IngestionError::InvalidPath(relative_path.to_path_buf()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return Err(IngestionError::InvalidPath(relative_path.to_path_buf())),
        }
    }

    if parts.last().is_some_and(|last| last.eq_ignore_ascii_case("index")) {
        parts.pop();
    }

    if parts.iter().any(|p| p.is_empty()) {
        return Err(IngestionError::InvalidPath(relative_path.to_path_buf()));
    }

    if parts.is_empty() {
        return Ok("/".to_string());
    }

    let encoded: Vec<_> = parts.iter().map(|p| urlencoding::encode(p)).collect();
    Ok(format!("/{}/", encoded.join("/")))
}

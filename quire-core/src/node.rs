use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::error::IngestionError;
use crate::slug::derive_slug;

pub const SLUG_FIELD: &str = "slug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Markdown,
    Asset,
}

/// One file discovered in the content store, plus the fields computed for it
/// during ingestion.
#[derive(Debug, Clone)]
pub struct ContentNode {
    pub id: String,
    pub kind: NodeKind,
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub source: Option<String>,
    pub fields: BTreeMap<String, Value>,
}

impl ContentNode {
    pub fn new(kind: NodeKind, path: PathBuf, relative_path: PathBuf, source: Option<String>) -> Self {
        let id = relative_path.to_string_lossy().replace('\\', "/");
        Self {
            id,
            kind,
            path,
            relative_path,
            source,
            fields: BTreeMap::new(),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.fields.get(SLUG_FIELD).and_then(Value::as_str)
    }

    /// Add a computed field. Only the named key is touched.
    pub fn set_field<V: Into<Value>>(&mut self, name: &str, value: V) {
        self.fields.insert(name.to_string(), value.into());
    }
}

/// Attach the derived slug to a markdown node. Nodes of any other kind are
/// left as they are.
pub fn annotate(node: &mut ContentNode) -> Result<(), IngestionError> {
    if node.kind != NodeKind::Markdown {
        return Ok(());
    }

    if node.relative_path.as_os_str().is_empty() {
        return Err(IngestionError::MissingPath(node.id.clone()));
    }

    let slug = derive_slug(&node.relative_path)?;
    debug!("Annotated {} with slug {}", node.relative_path.display(), slug);
    node.set_field(SLUG_FIELD, slug);

    Ok(())
}

/// Annotate every node, then check that no two documents share a slug.
pub fn annotate_all(nodes: &mut [ContentNode]) -> Result<(), IngestionError> {
    for node in nodes.iter_mut() {
        annotate(node)?;
    }

    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for node in nodes.iter() {
        let Some(slug) = node.slug() else {
            continue;
        };
        if let Some(first) = seen.insert(slug, &node.relative_path) {
            return Err(IngestionError::DuplicateSlug {
                slug: slug.to_string(),
                first: first.to_path_buf(),
                second: node.relative_path.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markdown(rel: &str) -> ContentNode {
        ContentNode::new(
            NodeKind::Markdown,
            PathBuf::from("/content").join(rel),
            PathBuf::from(rel),
            Some(String::new()),
        )
    }

    #[test]
    fn markdown_nodes_get_a_slug() {
        let mut node = markdown("hello-world/index.md");
        annotate(&mut node).unwrap();
        assert_eq!(node.slug(), Some("/hello-world/"));
    }

    #[test]
    fn assets_are_untouched() {
        let mut node = ContentNode::new(
            NodeKind::Asset,
            PathBuf::from("/content/pic.png"),
            PathBuf::from("pic.png"),
            None,
        );
        annotate(&mut node).unwrap();
        assert!(node.fields.is_empty());
    }

    #[test]
    fn annotation_keeps_other_fields() {
        let mut node = markdown("post.md");
        node.set_field("series", "rust");
        annotate(&mut node).unwrap();
        assert_eq!(node.fields.get("series"), Some(&Value::from("rust")));
        assert_eq!(node.fields.len(), 2);
    }

    #[test]
    fn annotation_is_idempotent() {
        let mut node = markdown("a/b.md");
        annotate(&mut node).unwrap();
        let first = node.slug().map(str::to_string);
        annotate(&mut node).unwrap();
        assert_eq!(node.slug().map(str::to_string), first);
        assert_eq!(node.fields.len(), 1);
    }

    #[test]
    fn missing_path_fails() {
        let mut node = markdown("");
        assert!(matches!(
            annotate(&mut node),
            Err(IngestionError::MissingPath(_))
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let mut nodes = vec![markdown("hello.md"), markdown("hello/index.md")];
        let err = annotate_all(&mut nodes).unwrap_err();
        match err {
            IngestionError::DuplicateSlug { slug, .. } => assert_eq!(slug, "/hello/"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_markdown_node_gets_a_unique_slug() {
        let mut nodes = vec![markdown("a.md"), markdown("b/index.md"), markdown("c/d.md")];
        annotate_all(&mut nodes).unwrap();
        let slugs: std::collections::HashSet<_> =
            nodes.iter().map(|n| n.slug().unwrap().to_string()).collect();
        assert_eq!(slugs.len(), 3);
        assert!(slugs.iter().all(|s| !s.is_empty()));
    }
}

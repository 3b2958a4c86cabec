use log::{debug, info};

use crate::document::{ContentDocument, FrontMatter, RawFrontMatter, WordCount};
use crate::error::BuildError;
use crate::markdown::{self, DEFAULT_SYNTAX_THEME, EXCERPT_LENGTH};
use crate::node::{ContentNode, NodeKind};

/// Reads every annotated markdown node into a [`ContentDocument`], newest first.
pub struct ContentQuery<'a> {
    nodes: &'a [ContentNode],
    syntax_theme: String,
}

impl<'a> ContentQuery<'a> {
    pub fn new(nodes: &'a [ContentNode]) -> Self {
        Self {
            nodes,
            syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
        }
    }

    pub fn syntax_theme<S: Into<String>>(mut self, theme: S) -> Self {
        self.syntax_theme = theme.into();
        self
    }

    /// All markdown documents sorted by date, newest first. Documents with
    /// the same date are ordered by slug.
    pub fn run(&self) -> Result<Vec<ContentDocument>, BuildError> {
        let mut documents = self
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Markdown)
            .map(|n| self.document(n))
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut documents);
        info!("Queried {} documents", documents.len());

        Ok(documents)
    }

    fn document(&self, node: &ContentNode) -> Result<ContentDocument, BuildError> {
        let slug = node
            .slug()
            .ok_or_else(|| BuildError::Unannotated(node.relative_path.clone()))?
            .to_string();

        let malformed = |reason: String| BuildError::MalformedFrontMatter {
            path: node.relative_path.clone(),
            reason,
        };

        let source = node.source.as_deref().unwrap_or_default();
        let (front, body) = markdown::split_front_matter(source);
        let front = front.ok_or_else(|| malformed("no front matter block".to_string()))?;
        let raw: RawFrontMatter = serde_yaml_ng::from_str(front).map_err(|e| malformed(e.to_string()))?;
        let date = raw.date.ok_or_else(|| malformed("missing date".to_string()))?;

        let frontmatter = FrontMatter {
            title: raw
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| slug.clone()),
            date,
            description: raw.description.filter(|d| !d.trim().is_empty()),
        };

        let text = markdown::plain_text(body);
        let words = markdown::word_count(&text);
        debug!("Parsed {} ({} words)", node.relative_path.display(), words);

        Ok(ContentDocument {
            id: node.id.clone(),
            file_path: node.relative_path.clone(),
            frontmatter,
            body_html: markdown::render_markdown(body, &self.syntax_theme),
            excerpt: markdown::excerpt(&text, EXCERPT_LENGTH),
            time_to_read: markdown::time_to_read(words),
            word_count: WordCount {
                words,
                sentences: markdown::sentence_count(&text),
            },
            fields: node.fields.clone(),
            slug,
        })
    }
}

pub fn sort_newest_first(documents: &mut [ContentDocument]) {
    documents.sort_by(|a, b| {
        b.frontmatter
            .date
            .cmp(&a.frontmatter.date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;
use serde::Serialize;
use tera::Context;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::document::{ContentDocument, DocumentRef, FrontMatter, WordCount};
use crate::planner::{ListingDirective, PageDirective, SitePlan};
use crate::template::{TemplateError, TemplateRenderer};

pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Template(#[from] TemplateError),
    #[error("Directive for {0} has no matching document")]
    UnknownDocument(String),
}

/// One rendered page, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output file relative to the output directory.
    pub out_path: PathBuf,
    pub html: String,
}

/// What templates see as `post`.
#[derive(Debug, Serialize)]
struct PostView<'a> {
    slug: &'a str,
    frontmatter: &'a FrontMatter,
    date: String,
    body_html: &'a str,
    excerpt: &'a str,
    time_to_read: usize,
    word_count: WordCount,
}

impl<'a> PostView<'a> {
    fn new(doc: &'a ContentDocument) -> Self {
        Self {
            slug: doc.slug(),
            frontmatter: &doc.frontmatter,
            date: doc.frontmatter.date.format(DISPLAY_DATE_FORMAT).to_string(),
            body_html: &doc.body_html,
            excerpt: &doc.excerpt,
            time_to_read: doc.time_to_read,
            word_count: doc.word_count,
        }
    }
}

pub struct Renderer {
    templates: TemplateRenderer,
}

impl Renderer {
    pub fn new(mut templates: TemplateRenderer, site: &SiteConfig) -> Self {
        templates.add_to_context("site", site);
        Self { templates }
    }

    pub fn render_all(&self, plan: &SitePlan) -> Result<Vec<RenderedPage>, RenderError> {
        let by_slug: HashMap<&str, &ContentDocument> =
            plan.documents.iter().map(|d| (d.slug(), d)).collect();

        let mut pages = Vec::with_capacity(plan.pages.len() + 1);
        for directive in &plan.pages {
            let doc = by_slug
                .get(directive.path.as_str())
                .ok_or_else(|| RenderError::UnknownDocument(directive.path.clone()))?;
            pages.push(self.render_post(directive, doc)?);
        }
        pages.push(self.render_index(&plan.index, &by_slug)?);

        Ok(pages)
    }

    fn render_post(&self, directive: &PageDirective, doc: &ContentDocument) -> Result<RenderedPage, RenderError> {
        let mut context = Context::new();
        context.insert("slug", &directive.context.slug);
        context.insert("post", &PostView::new(doc));
        context.insert("previous", &directive.context.previous);
        context.insert("next", &directive.context.next);

        let html = self
            .templates
            .render_with_context(directive.template.name(), &context)?;
        debug!("Rendered {}", directive.path);

        Ok(RenderedPage {
            out_path: out_path(&directive.path),
            html,
        })
    }

    fn render_index(
        &self,
        listing: &ListingDirective,
        by_slug: &HashMap<&str, &ContentDocument>,
    ) -> Result<RenderedPage, RenderError> {
        let posts = listing
            .posts
            .iter()
            .map(|post: &DocumentRef| {
                by_slug
                    .get(post.slug.as_str())
                    .map(|doc| PostView::new(doc))
                    .ok_or_else(|| RenderError::UnknownDocument(post.slug.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut context = Context::new();
        context.insert("posts", &posts);

        let html = self
            .templates
            .render_with_context(listing.template.name(), &context)?;

        Ok(RenderedPage {
            out_path: out_path(&listing.path),
            html,
        })
    }
}

/// `/a/b/` renders to `a/b/index.html`; `/` to `index.html`.
///
/// Slug components are percent-decoded, since servers decode the request
/// path before looking it up on disk.
pub fn out_path(slug: &str) -> PathBuf {
    let mut path = PathBuf::new();
    for part in slug.split('/').filter(|p| !p.is_empty()) {
        match urlencoding::decode(part) {
            Ok(decoded) => path.push(decoded.as_ref()),
            Err(_) => path.push(part),
        }
    }
    path.join("index.html")
}

//! Page planning: one directive per post, with links to its chronological
//! neighbors, plus a directive for the blog index.
//!
//! Input is expected newest first. For the document at position `i`:
//!
//! * `previous` is the document at `i + 1` (the next older post)
//! * `next` is the document at `i - 1` (the next newer post)

use log::info;
use serde::Serialize;

use crate::document::{ContentDocument, DocumentRef};
use crate::error::BuildError;
use crate::query::ContentQuery;

pub const POST_TEMPLATE: &str = "blog-post.html";
pub const INDEX_TEMPLATE: &str = "blog-index.html";
pub const INDEX_PATH: &str = "/";

/// Name of the template a directive is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateRef(String);

impl TemplateRef {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub slug: String,
    pub previous: Option<DocumentRef>,
    pub next: Option<DocumentRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDirective {
    pub path: String,
    pub template: TemplateRef,
    pub context: PageContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDirective {
    pub path: String,
    pub template: TemplateRef,
    pub posts: Vec<DocumentRef>,
}

/// Everything one build renders, in global order.
#[derive(Debug, Clone, Serialize)]
pub struct SitePlan {
    pub documents: Vec<ContentDocument>,
    pub pages: Vec<PageDirective>,
    pub index: ListingDirective,
}

pub fn plan_pages(documents: &[ContentDocument], template: &TemplateRef) -> Vec<PageDirective> {
    let last = documents.len().saturating_sub(1);

    documents
        .iter()
        .enumerate()
        .map(|(index, post)| {
            let previous = (index < last).then(|| documents[index + 1].to_ref());
            let next = (index > 0).then(|| documents[index - 1].to_ref());

            info!("Creating page: {}", post.slug());
            PageDirective {
                path: post.slug().to_string(),
                template: template.clone(),
                context: PageContext {
                    slug: post.slug().to_string(),
                    previous,
                    next,
                },
            }
        })
        .collect()
}

pub fn plan_index(documents: &[ContentDocument], template: &TemplateRef) -> ListingDirective {
    ListingDirective {
        path: INDEX_PATH.to_string(),
        template: template.clone(),
        posts: documents.iter().map(ContentDocument::to_ref).collect(),
    }
}

pub struct PagePlanner {
    post_template: TemplateRef,
    index_template: TemplateRef,
}

impl Default for PagePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePlanner {
    pub fn new() -> Self {
        Self {
            post_template: TemplateRef::new(POST_TEMPLATE),
            index_template: TemplateRef::new(INDEX_TEMPLATE),
        }
    }

    pub fn post_template<S: Into<String>>(mut self, name: S) -> Self {
        self.post_template = TemplateRef::new(name);
        self
    }

    pub fn index_template<S: Into<String>>(mut self, name: S) -> Self {
        self.index_template = TemplateRef::new(name);
        self
    }

    /// Run the query and plan every page. Nothing is planned if the query fails.
    pub fn plan(&self, query: &ContentQuery<'_>) -> Result<SitePlan, BuildError> {
        let documents = query.run()?;
        if let Some(doc) = documents.iter().find(|d| d.slug() == INDEX_PATH) {
            return Err(BuildError::PathConflict(format!(
                "{} ({} and the post index)",
                INDEX_PATH,
                doc.file_path.display()
            )));
        }

        let pages = plan_pages(&documents, &self.post_template);
        let index = plan_index(&documents, &self.index_template);

        Ok(SitePlan {
            documents,
            pages,
            index,
        })
    }
}

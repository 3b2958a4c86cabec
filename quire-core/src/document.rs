use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Metadata block at the top of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Front matter as it appears on disk, before defaults are applied.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub words: usize,
    pub sentences: usize,
}

/// A markdown post after ingestion and querying.
#[derive(Debug, Clone, Serialize)]
pub struct ContentDocument {
    pub id: String,
    pub file_path: PathBuf,
    pub frontmatter: FrontMatter,
    pub body_html: String,
    pub excerpt: String,
    pub time_to_read: usize,
    pub word_count: WordCount,
    pub fields: BTreeMap<String, Value>,
    /// Copied out of `fields` at query time; every queried document has one.
    pub slug: String,
}

impl ContentDocument {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef {
            id: self.id.clone(),
            slug: self.slug.clone(),
            frontmatter: self.frontmatter.clone(),
        }
    }
}

/// The part of a document a neighbor link or listing needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRef {
    pub id: String,
    pub slug: String,
    pub frontmatter: FrontMatter,
}

/// Accepts `2024-03-01`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|d| d.date())
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{s}'"))),
    }
}

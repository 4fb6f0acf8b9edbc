//! sections::traits
//!
//! Table-of-contents source trait and the TOC model.
//!
//! # Design
//!
//! TOC retrieval is async because sources perform network or file I/O.
//! Sources do not retry or back off; a failed fetch is reported once and
//! the section resolver propagates it unchanged.
//!
//! Entries carry optional structural hints (`book`, `chapter`, `part`) used
//! by numeric matching. Sources that cannot supply them get hints derived
//! from the title via [`Toc::from_entries`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::matching::StructuralHints;

/// Errors from TOC sources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TocError {
    /// The source has no TOC for this work.
    #[error("no table of contents for {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// The source answered with an error status.
    #[error("TOC API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the source
        message: String,
    },

    /// Transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The source document could not be parsed.
    #[error("invalid table of contents: {0}")]
    Parse(String),

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

/// One addressable section of a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Source-specific section identifier
    #[serde(alias = "sectionId")]
    pub section_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<u16>,
    /// Subject tags, matched by keyword queries alongside the title
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
}

impl TocEntry {
    /// Entry with hints derived from `title`.
    ///
    /// ```
    /// use scriptref::sections::TocEntry;
    ///
    /// let entry = TocEntry::new("ii.iv", "Book II. Chapter IV. Of Faith");
    /// assert_eq!(entry.book, Some(2));
    /// assert_eq!(entry.chapter, Some(4));
    /// assert_eq!(entry.part, None);
    /// ```
    pub fn new(section_id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut entry = Self {
            section_id: section_id.into(),
            title: title.into(),
            book: None,
            chapter: None,
            part: None,
            topics: Vec::new(),
        };
        entry.fill_hints();
        entry
    }

    /// Attach subject tags.
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Fill missing hints from the title. Hints already present are kept.
    pub fn fill_hints(&mut self) {
        let hints = StructuralHints::from_text(&self.title);
        self.book = self.book.or(hints.book);
        self.chapter = self.chapter.or(hints.chapter);
        self.part = self.part.or(hints.part);
    }

    /// The structural hints of this entry.
    pub fn hints(&self) -> StructuralHints {
        StructuralHints {
            book: self.book,
            chapter: self.chapter,
            part: self.part,
        }
    }
}

/// A parsed table of contents, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toc {
    pub entries: Vec<TocEntry>,
}

impl Toc {
    /// Build a TOC, deriving missing hints from titles.
    pub fn from_entries(entries: Vec<TocEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.fill_hints();
                entry
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every topic in the document, sorted and deduplicated.
    pub fn topics(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.topics.iter().map(String::as_str))
            .collect()
    }
}

/// A source of tables of contents.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the resolver may fetch TOCs for
/// different works concurrently.
#[async_trait]
pub trait TocSource: Send + Sync {
    /// Short name for diagnostics ("http", "file", "mock").
    fn name(&self) -> &'static str;

    /// Fetch and parse the TOC for `work`.
    async fn fetch_toc(&self, work: &str) -> Result<Toc, TocError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_hints_survive() {
        let mut entry = TocEntry {
            section_id: "x".into(),
            title: "Book 3".into(),
            book: Some(1),
            chapter: None,
            part: None,
            topics: Vec::new(),
        };
        entry.fill_hints();
        assert_eq!(entry.book, Some(1));
    }

    #[test]
    fn camel_case_section_id_accepted() {
        let entry: TocEntry =
            serde_json::from_str(r#"{"sectionId": "i.ii", "title": "Chapter 2"}"#).unwrap();
        assert_eq!(entry.section_id, "i.ii");
        assert_eq!(entry.chapter, None);

        let toc = Toc::from_entries(vec![entry]);
        assert_eq!(toc.entries[0].chapter, Some(2));
    }

    #[test]
    fn document_topics_are_sorted_and_unique() {
        let toc = Toc::from_entries(vec![
            TocEntry::new("1", "Of Faith").with_topics(["faith", "belief"]),
            TocEntry::new("2", "Of Assurance").with_topics(["assurance", "salvation"]),
            TocEntry::new("3", "Of Justification").with_topics(["justification", "faith"]),
        ]);
        let topics: Vec<&str> = toc.topics().into_iter().collect();
        assert_eq!(topics, ["assurance", "belief", "faith", "justification", "salvation"]);
    }

    #[test]
    fn topics_omitted_from_json_when_empty() {
        let json = serde_json::to_value(TocEntry::new("1", "Preface")).unwrap();
        assert!(json.get("topics").is_none());

        let entry: TocEntry =
            serde_json::from_str(r#"{"section_id": "1", "title": "Of Baptism", "topics": ["baptism"]}"#)
                .unwrap();
        assert_eq!(entry.topics, ["baptism"]);
    }

    #[test]
    fn error_display() {
        assert_eq!(TocError::RateLimited.to_string(), "rate limited");
        assert_eq!(
            TocError::Api {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "TOC API error: 500 - boom"
        );
    }
}

//! commentary::resolver
//!
//! Volume resolution for multi-volume and multi-author series.
//!
//! # Algorithm
//!
//! Given a series name and a free-text query:
//!
//! 1. Extract the book (and chapter, if any) from the query.
//! 2. Resolve the series by alias.
//! 3. **Range pass** (only with a chapter): the first volume whose coverage
//!    for the book has a chapter range containing the chapter. A range
//!    volume is more specific than a whole-book volume, so this pass wins.
//! 4. **Book pass**: the first volume with a coverage label naming the book.
//!
//! Absence is an ordinary outcome: most series do not cover every book.

use std::collections::HashSet;

use tracing::debug;

use super::extract::{BookMatch, BookMatcher};
use super::registry::{label_items, BookCoverage, CommentaryRegistry, CommentaryVolume};
use crate::core::books::CanonicalBook;

/// Whether a coverage label names `book`.
///
/// A label matches when it equals the book name, starts with it (followed
/// by a non-alphanumeric character), or one of its comma/`and`-separated
/// items has a word set containing every word of the book name. Numerals
/// in an item must also appear in the book name, so "1 John" in a label
/// does not match the Gospel of John.
pub fn label_names_book(label: &str, book: &CanonicalBook) -> bool {
    let label = label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let name = book.name.to_lowercase();

    if label == name {
        return true;
    }
    if let Some(rest) = label.strip_prefix(&name) {
        if rest.chars().next().map_or(true, |c| !c.is_alphanumeric()) {
            return true;
        }
    }

    let wanted: HashSet<&str> = name.split_whitespace().collect();
    label_items(&label).iter().any(|item| {
        let words: HashSet<&str> = item
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        words.is_superset(&wanted)
            && words
                .iter()
                .filter(|w| w.chars().all(|c| c.is_ascii_digit()))
                .all(|w| wanted.contains(w))
    })
}

/// Resolves series names and queries to concrete volumes.
#[derive(Debug, Clone, Copy)]
pub struct VolumeResolver<'a> {
    registry: &'a CommentaryRegistry,
    matcher: &'a BookMatcher<'a>,
}

impl VolumeResolver<'static> {
    /// Resolver over the embedded registry and book table.
    pub fn global() -> Self {
        Self::new(CommentaryRegistry::global(), BookMatcher::global())
    }
}

impl<'a> VolumeResolver<'a> {
    pub fn new(registry: &'a CommentaryRegistry, matcher: &'a BookMatcher<'a>) -> Self {
        Self { registry, matcher }
    }

    /// Find the volume of `series` covering the passage in `query`.
    ///
    /// Returns `None` when no book is recognised, the series is unknown, or
    /// the series does not cover the book.
    pub fn find_volume(&self, series: &str, query: &str) -> Option<&'a CommentaryVolume> {
        let Some(BookMatch { book, chapter }) = self.matcher.find(query) else {
            debug!(query, "no book found in query");
            return None;
        };
        let Some(found) = self.registry.series(series) else {
            debug!(series, "unknown commentary series");
            return None;
        };

        if let Some(chapter) = chapter {
            let ranged = found.volumes.iter().find(|volume| {
                volume
                    .coverage
                    .iter()
                    .any(|c| c.contains_chapter(chapter) && label_names_book(&c.book, book))
            });
            if let Some(volume) = ranged {
                debug!(series = %found.id, book = %book, chapter, work_id = %volume.work_id, "matched chapter range");
                return Some(volume);
            }
        }

        let whole = found
            .volumes
            .iter()
            .find(|volume| volume.coverage.iter().any(|c| covers(c, book)));
        match whole {
            Some(volume) => {
                debug!(series = %found.id, book = %book, work_id = %volume.work_id, "matched book");
            }
            None => {
                debug!(series = %found.id, book = %book, "series does not cover book");
            }
        }
        whole
    }

    /// Whether `work_id` asks for automatic volume routing.
    pub fn is_meta_commentary(&self, work_id: &str) -> bool {
        self.registry.is_meta(work_id)
    }
}

fn covers(coverage: &BookCoverage, book: &CanonicalBook) -> bool {
    label_names_book(&coverage.book, book)
}

/// [`VolumeResolver::find_volume`] over the embedded registry.
///
/// # Example
///
/// ```
/// use scriptref::commentary::find_volume;
///
/// let volume = find_volume("calvin", "Isaiah 53").unwrap();
/// assert_eq!(volume.work_id, "calvin/calcom16");
/// assert!(find_volume("calvin", "Revelation 1:1").is_none());
/// ```
pub fn find_volume(series: &str, query: &str) -> Option<&'static CommentaryVolume> {
    VolumeResolver::global().find_volume(series, query)
}

/// [`VolumeResolver::is_meta_commentary`] over the embedded registry.
pub fn is_meta_commentary(work_id: &str) -> bool {
    VolumeResolver::global().is_meta_commentary(work_id)
}

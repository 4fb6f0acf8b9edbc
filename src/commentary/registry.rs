//! commentary::registry
//!
//! The commentary series registry.
//!
//! # Data
//!
//! Series are embedded as TOML (`data/commentaries.toml`). Each series has
//! an id, display aliases, "meta" aliases (work ids that ask for automatic
//! volume routing rather than naming concrete content) and an ordered list
//! of volumes. Volume order is significant: resolvers return the first
//! match.
//!
//! # Validation
//!
//! Loading checks that:
//! - no alias (of either kind) is claimed by two series
//! - every book named in a coverage label exists in the book table
//! - chapter ranges are non-empty and within the book's chapter count

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::core::books::{BookTable, CanonicalBook};
use crate::core::errors::CatalogError;

const COMMENTARIES_TOML: &str = include_str!("../../data/commentaries.toml");

static GLOBAL: LazyLock<CommentaryRegistry> = LazyLock::new(|| {
    CommentaryRegistry::from_toml(COMMENTARIES_TOML, BookTable::global())
        .expect("embedded commentary registry must validate")
});

/// Coverage of one book (or a list of books) by a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookCoverage {
    /// Book label: a canonical name, or several joined by `,`/`and`
    pub book: String,
    /// Inclusive chapter range, when the volume covers only part of a book
    #[serde(
        default,
        rename = "chapters",
        skip_serializing_if = "Option::is_none"
    )]
    pub chapter_range: Option<(u16, u16)>,
}

impl BookCoverage {
    /// Whether `chapter` falls inside this entry's chapter range.
    pub fn contains_chapter(&self, chapter: u16) -> bool {
        self.chapter_range
            .is_some_and(|(start, end)| (start..=end).contains(&chapter))
    }
}

/// One concrete, fetchable volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentaryVolume {
    pub work_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub coverage: Vec<BookCoverage>,
}

/// A named commentary series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentarySeries {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Work ids meaning "pick the right volume for me"
    #[serde(default)]
    pub meta_aliases: Vec<String>,
    pub volumes: Vec<CommentaryVolume>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    series: Vec<CommentarySeries>,
}

/// Split a coverage label into lowercase book items.
///
/// `"Joel, Amos, Obadiah"` → `["joel", "amos", "obadiah"]`;
/// `"Judges and Ruth"` → `["judges", "ruth"]`.
pub(crate) fn label_items(label: &str) -> Vec<String> {
    let lower = label.to_lowercase();
    lower
        .split([',', ';', '&'])
        .flat_map(|part| part.split(" and "))
        .map(|item| item.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|item| !item.is_empty())
        .collect()
}

/// The immutable, validated series registry.
#[derive(Debug, Clone)]
pub struct CommentaryRegistry {
    series: Vec<CommentarySeries>,
    /// Lowercase id, alias or meta alias → series index
    by_alias: HashMap<String, usize>,
    /// Lowercase meta aliases
    meta: HashSet<String>,
}

impl CommentaryRegistry {
    /// The embedded registry, parsed and validated on first access.
    pub fn global() -> &'static CommentaryRegistry {
        &GLOBAL
    }

    /// Parse and validate a registry from TOML against `books`.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` on malformed TOML, duplicate aliases,
    /// coverage labels naming unknown books, or invalid chapter ranges.
    pub fn from_toml(source: &str, books: &BookTable) -> Result<Self, CatalogError> {
        let file: RegistryFile = toml::from_str(source).map_err(|e| CatalogError::Parse {
            table: "commentary",
            message: e.to_string(),
        })?;

        let mut by_alias: HashMap<String, usize> = HashMap::new();
        let mut meta = HashSet::new();

        for (index, series) in file.series.iter().enumerate() {
            let names = std::iter::once(&series.id)
                .chain(series.aliases.iter())
                .chain(series.meta_aliases.iter());
            for name in names {
                let key = name.trim().to_lowercase();
                match by_alias.get(&key) {
                    Some(&other) if other != index => {
                        return Err(CatalogError::DuplicateAlias {
                            alias: name.clone(),
                            first: file.series[other].id.clone(),
                            second: series.id.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_alias.insert(key, index);
                    }
                }
            }
            meta.extend(series.meta_aliases.iter().map(|m| m.trim().to_lowercase()));

            for volume in &series.volumes {
                for coverage in &volume.coverage {
                    Self::validate_coverage(volume, coverage, books)?;
                }
            }
        }

        Ok(Self {
            series: file.series,
            by_alias,
            meta,
        })
    }

    fn validate_coverage(
        volume: &CommentaryVolume,
        coverage: &BookCoverage,
        books: &BookTable,
    ) -> Result<(), CatalogError> {
        let unknown = || CatalogError::UnknownCoverageBook {
            work_id: volume.work_id.clone(),
            label: coverage.book.clone(),
        };

        let items = label_items(&coverage.book);
        if items.is_empty() {
            return Err(unknown());
        }
        let resolved: Vec<&CanonicalBook> = items
            .iter()
            .map(|item| books.lookup(item).ok_or_else(unknown))
            .collect::<Result<_, _>>()?;

        if let Some((start, end)) = coverage.chapter_range {
            let within = match resolved.as_slice() {
                [book] => end <= book.max_chapters,
                _ => false,
            };
            if start == 0 || end < start || !within {
                return Err(CatalogError::InvalidChapterRange {
                    work_id: volume.work_id.clone(),
                    label: coverage.book.clone(),
                    start,
                    end,
                });
            }
        }
        Ok(())
    }

    /// Find a series by id, alias or meta alias (case-insensitive).
    pub fn series(&self, name: &str) -> Option<&CommentarySeries> {
        self.by_alias
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.series[i])
    }

    /// All series in declaration order.
    pub fn all(&self) -> &[CommentarySeries] {
        &self.series
    }

    /// Whether `work_id` is a meta alias rather than a concrete volume id.
    pub fn is_meta(&self, work_id: &str) -> bool {
        self.meta.contains(&work_id.trim().to_lowercase())
    }

    /// Find a concrete volume by its work id (case-insensitive).
    pub fn volume(&self, work_id: &str) -> Option<&CommentaryVolume> {
        let wanted = work_id.trim();
        self.series
            .iter()
            .flat_map(|s| s.volumes.iter())
            .find(|v| v.work_id.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_registry_validates() {
        let registry = CommentaryRegistry::from_toml(COMMENTARIES_TOML, BookTable::global()).unwrap();
        assert!(registry.series("calvin").is_some());
        assert!(registry.series("Expositor's Bible").is_some());
        assert!(registry.series("gill").is_none());
    }

    #[test]
    fn calvin_volumes_are_ordered() {
        let calvin = CommentaryRegistry::global().series("calvin").unwrap();
        assert_eq!(calvin.volumes.len(), 45);
        assert_eq!(calvin.volumes[0].work_id, "calvin/calcom01");
        assert_eq!(calvin.volumes[44].work_id, "calvin/calcom45");
    }

    #[test]
    fn label_items_split() {
        assert_eq!(label_items("Joel, Amos, Obadiah"), ["joel", "amos", "obadiah"]);
        assert_eq!(label_items("Judges and Ruth"), ["judges", "ruth"]);
        assert_eq!(label_items("Song of Solomon"), ["song of solomon"]);
    }

    #[test]
    fn meta_aliases() {
        let registry = CommentaryRegistry::global();
        assert!(registry.is_meta("calvin"));
        assert!(registry.is_meta("CALVIN-COMMENTARIES"));
        assert!(registry.is_meta("expositors-bible"));
        assert!(!registry.is_meta("calvin/calcom16"));
        assert!(!registry.is_meta("john calvin"));
    }

    #[test]
    fn volume_by_work_id() {
        let registry = CommentaryRegistry::global();
        let volume = registry.volume("calvin/calcom16").unwrap();
        assert_eq!(volume.coverage[0].chapter_range, Some((49, 66)));
    }

    const BOOKS_ONLY_GENESIS: &str = r#"
        [[books]]
        name = "Genesis"
        testament = "OT"
        volume = 1
        usfm = "GEN"
        osis = "Gen"
        ccel = "Gen"
        chapters = 50
    "#;

    #[test]
    fn unknown_coverage_book_rejected() {
        let books = BookTable::from_toml(BOOKS_ONLY_GENESIS).unwrap();
        let source = r#"
            [[series]]
            id = "test"
            title = "Test"
            [[series.volumes]]
            work_id = "test/1"
            title = "Exodus"
            coverage = [{ book = "Exodus" }]
        "#;
        assert!(matches!(
            CommentaryRegistry::from_toml(source, &books),
            Err(CatalogError::UnknownCoverageBook { .. })
        ));
    }

    #[test]
    fn chapter_range_beyond_book_rejected() {
        let books = BookTable::from_toml(BOOKS_ONLY_GENESIS).unwrap();
        let source = r#"
            [[series]]
            id = "test"
            title = "Test"
            [[series.volumes]]
            work_id = "test/1"
            title = "Genesis"
            coverage = [{ book = "Genesis", chapters = [40, 60] }]
        "#;
        assert!(matches!(
            CommentaryRegistry::from_toml(source, &books),
            Err(CatalogError::InvalidChapterRange { .. })
        ));
    }

    #[test]
    fn duplicate_series_alias_rejected() {
        let books = BookTable::from_toml(BOOKS_ONLY_GENESIS).unwrap();
        let source = r#"
            [[series]]
            id = "one"
            title = "One"
            aliases = ["shared"]
            volumes = []

            [[series]]
            id = "two"
            title = "Two"
            meta_aliases = ["Shared"]
            volumes = []
        "#;
        assert!(matches!(
            CommentaryRegistry::from_toml(source, &books),
            Err(CatalogError::DuplicateAlias { .. })
        ));
    }
}

//! core::books
//!
//! The canonical book table.
//!
//! # Overview
//!
//! Every reference resolves to exactly one [`CanonicalBook`]. The table is
//! embedded as TOML (`data/books.toml`), parsed once on first use and then
//! shared read-only for the rest of the process.
//!
//! # Lookup Keys
//!
//! Names, aliases and provider codes are indexed by a normalized key:
//! lowercase, with everything but letters and digits removed. `"1 Jn"`,
//! `"1JN"` and `"1jn"` all map to the key `1jn`. Keys must be disjoint
//! across books; this is checked when the table is built.
//!
//! # Example
//!
//! ```
//! use scriptref::core::books::{BookTable, ProviderId};
//!
//! let table = BookTable::global();
//! let book = table.lookup("Psalm").unwrap();
//! assert_eq!(book.name, "Psalms");
//! assert_eq!(book.abbrev(ProviderId::Usfm), "PSA");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

const BOOKS_TOML: &str = include_str!("../../data/books.toml");

static GLOBAL: LazyLock<BookTable> = LazyLock::new(|| {
    BookTable::from_toml(BOOKS_TOML).expect("embedded book table must validate")
});

/// Old or New Testament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    #[serde(rename = "OT")]
    Old,
    #[serde(rename = "NT")]
    New,
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Testament::Old => write!(f, "OT"),
            Testament::New => write!(f, "NT"),
        }
    }
}

/// Providers whose book abbreviations the table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Three-character USFM codes used by chapter/verse APIs (`GEN`, `1SA`)
    Usfm,
    /// OSIS abbreviations used in dotted cross-reference data (`Gen`, `1Sam`)
    Osis,
    /// Commentary section abbreviations (`Gen`, `iSam`)
    Ccel,
}

impl ProviderId {
    /// All providers, in a stable order.
    pub fn all() -> &'static [ProviderId] {
        &[ProviderId::Usfm, ProviderId::Osis, ProviderId::Ccel]
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::Usfm => write!(f, "usfm"),
            ProviderId::Osis => write!(f, "osis"),
            ProviderId::Ccel => write!(f, "ccel"),
        }
    }
}

/// Provider abbreviations for one book.
///
/// Stored as fields rather than a map so that every book has a code for
/// every provider by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAbbrevs {
    pub usfm: String,
    pub osis: String,
    pub ccel: String,
}

/// One row of the canonical book table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBook {
    /// Canonical display name ("1 Samuel", "Song of Solomon")
    pub name: String,
    /// Alternate names and abbreviations, as written in the data file
    pub aliases: Vec<String>,
    pub testament: Testament,
    /// Which volume of a six-volume commentary this book falls in (1..=6)
    pub volume_number: u8,
    pub abbrevs: ProviderAbbrevs,
    pub single_chapter: bool,
    pub max_chapters: u16,
    /// Position in canonical order, starting at 0
    pub ordinal: usize,
}

impl CanonicalBook {
    /// The book's code for `provider`.
    pub fn abbrev(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::Usfm => &self.abbrevs.usfm,
            ProviderId::Osis => &self.abbrevs.osis,
            ProviderId::Ccel => &self.abbrevs.ccel,
        }
    }

    /// Leading numeral of a numbered book ("1 John" → 1).
    pub fn numeral(&self) -> Option<u8> {
        let (head, _) = self.name.split_once(' ')?;
        head.parse().ok()
    }

    /// Name without its leading numeral ("1 John" → "John").
    pub fn base_name(&self) -> &str {
        match self.numeral() {
            Some(_) => self.name.split_once(' ').map_or(&self.name[..], |(_, rest)| rest),
            None => &self.name,
        }
    }
}

impl fmt::Display for CanonicalBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Normalize a book token to its lookup key.
///
/// ```
/// use scriptref::core::books::book_key;
///
/// assert_eq!(book_key("1 Jn."), "1jn");
/// assert_eq!(book_key("Song of Songs"), "songofsongs");
/// ```
pub fn book_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercase and collapse internal whitespace.
fn collapse(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BookFile {
    books: Vec<BookRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BookRow {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    testament: Testament,
    volume: u8,
    usfm: String,
    osis: String,
    ccel: String,
    chapters: u16,
    #[serde(default)]
    single_chapter: bool,
}

/// The immutable, validated book table.
#[derive(Debug, Clone)]
pub struct BookTable {
    books: Vec<CanonicalBook>,
    /// Collapsed lowercase canonical name → index
    names: HashMap<String, usize>,
    /// Normalized key (name, alias or provider code) → index
    keys: HashMap<String, usize>,
}

impl BookTable {
    /// The embedded table, parsed and validated on first access.
    pub fn global() -> &'static BookTable {
        &GLOBAL
    }

    /// Parse and validate a book table from TOML.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the TOML is malformed, a row is
    /// inconsistent, or two books claim the same lookup key.
    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        let file: BookFile = toml::from_str(source).map_err(|e| CatalogError::Parse {
            table: "book",
            message: e.to_string(),
        })?;

        let mut books = Vec::with_capacity(file.books.len());
        let mut names = HashMap::new();
        let mut keys: HashMap<String, usize> = HashMap::new();

        for (ordinal, row) in file.books.into_iter().enumerate() {
            Self::validate_row(&row)?;

            if names.insert(collapse(&row.name), ordinal).is_some() {
                return Err(CatalogError::InvalidBook {
                    book: row.name,
                    message: "duplicate canonical name".into(),
                });
            }

            let candidates = std::iter::once(&row.name)
                .chain(row.aliases.iter())
                .chain([&row.usfm, &row.osis]);
            for candidate in candidates {
                let key = book_key(candidate);
                match keys.get(&key) {
                    Some(&other) if other != ordinal => {
                        let first: &CanonicalBook = &books[other];
                        return Err(CatalogError::DuplicateAlias {
                            alias: candidate.clone(),
                            first: first.name.clone(),
                            second: row.name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        keys.insert(key, ordinal);
                    }
                }
            }

            books.push(CanonicalBook {
                name: row.name,
                aliases: row.aliases,
                testament: row.testament,
                volume_number: row.volume,
                abbrevs: ProviderAbbrevs {
                    usfm: row.usfm,
                    osis: row.osis,
                    ccel: row.ccel,
                },
                single_chapter: row.single_chapter,
                max_chapters: row.chapters,
                ordinal,
            });
        }

        Ok(Self { books, names, keys })
    }

    fn validate_row(row: &BookRow) -> Result<(), CatalogError> {
        let invalid = |message: &str| CatalogError::InvalidBook {
            book: row.name.clone(),
            message: message.to_string(),
        };

        if row.name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if row.chapters == 0 {
            return Err(invalid("chapter count must be at least 1"));
        }
        if row.single_chapter != (row.chapters == 1) {
            return Err(invalid("single_chapter must be set exactly when chapters = 1"));
        }
        if !(1..=6).contains(&row.volume) {
            return Err(invalid("volume must be within 1..=6"));
        }
        if [&row.usfm, &row.osis, &row.ccel]
            .iter()
            .any(|code| code.trim().is_empty())
        {
            return Err(invalid("provider abbreviations cannot be empty"));
        }
        if row.aliases.iter().any(|a| book_key(a).is_empty()) {
            return Err(invalid("alias must contain a letter or digit"));
        }
        Ok(())
    }

    /// Resolve a book token: canonical name first, then alias keys.
    ///
    /// Matching is case-insensitive and ignores whitespace and dots.
    pub fn lookup(&self, token: &str) -> Option<&CanonicalBook> {
        if let Some(&i) = self.names.get(&collapse(token)) {
            return Some(&self.books[i]);
        }
        self.lookup_key(&book_key(token))
    }

    /// Resolve an already-normalized key (see [`book_key`]).
    pub fn lookup_key(&self, key: &str) -> Option<&CanonicalBook> {
        self.keys.get(key).map(|&i| &self.books[i])
    }

    /// All books in canonical order.
    pub fn books(&self) -> &[CanonicalBook] {
        &self.books
    }

    /// Every lookup key with the book it resolves to.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &CanonicalBook)> {
        self.keys
            .iter()
            .map(|(key, &i)| (key.as_str(), &self.books[i]))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

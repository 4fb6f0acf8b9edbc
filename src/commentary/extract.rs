//! commentary::extract
//!
//! Book and chapter extraction from free-text Bible queries.
//!
//! Queries handed to the volume resolver are looser than references: they
//! may carry surrounding words ("what does Calvin say on Isaiah 53?"). The
//! book is found by three patterns tried in order:
//!
//! 1. **Numbered**: a numeral (`1`, `ii`, `first`) followed by the base of a
//!    numbered book (`timothy`, `sam`, `jn`). Runs first so that
//!    "1 Timothy" is never swallowed by a bare "timothy".
//! 2. **Names**: canonical names of un-numbered books and long alternate
//!    spellings (`psalm`, `song of songs`, `revelations`).
//! 3. **Abbreviations**: short aliases and provider codes, only when
//!    directly followed by a chapter number (`Isa 53`, `Gen.1`), since bare
//!    short tokens like "is" or "am" are ordinary words.
//!
//! The chapter is the first number after the matched book token.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::books::{BookTable, CanonicalBook};

/// Aliases at least this long count as names rather than abbreviations.
const NAME_MIN_LEN: usize = 5;

static GLOBAL: LazyLock<BookMatcher<'static>> =
    LazyLock::new(|| BookMatcher::new(BookTable::global()));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is a valid regex"));

/// A book found in a query, with an optional chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMatch<'a> {
    pub book: &'a CanonicalBook,
    pub chapter: Option<u16>,
}

/// Compiled three-layer book matcher for one book table.
#[derive(Debug)]
pub struct BookMatcher<'a> {
    table: &'a BookTable,
    numbered: Regex,
    names: Regex,
    abbrevs: Regex,
}

impl BookMatcher<'static> {
    /// Matcher over the embedded book table.
    pub fn global() -> &'static BookMatcher<'static> {
        &GLOBAL
    }
}

impl<'a> BookMatcher<'a> {
    /// Compile the patterns for `table`.
    pub fn new(table: &'a BookTable) -> Self {
        let mut bases = BTreeSet::new();
        let mut names = BTreeSet::new();
        let mut abbrevs = BTreeSet::new();

        for book in table.books() {
            if book.numeral().is_none() {
                names.insert(book.name.to_lowercase());
                for alias in &book.aliases {
                    if alias.chars().filter(|c| c.is_alphanumeric()).count() >= NAME_MIN_LEN {
                        names.insert(alias.to_lowercase());
                    }
                }
            }
        }

        for (key, book) in table.keys() {
            match book.numeral() {
                Some(n) => {
                    if let Some(base) = key.strip_prefix(&n.to_string()) {
                        if !base.is_empty() {
                            bases.insert(base.to_string());
                        }
                    }
                }
                None => {
                    if key.len() < NAME_MIN_LEN && !key.chars().all(|c| c.is_ascii_digit()) {
                        abbrevs.insert(key.to_string());
                    }
                }
            }
        }

        let numbered = format!(
            r"(?i)\b(?:(?P<word>1st|2nd|3rd|iii|ii|i|first|second|third)\s+|(?P<digit>[1-3])\s*)(?P<base>{})\b\.?",
            alternation(&bases)
        );
        let names = format!(r"(?i)\b(?P<name>{})\b", alternation(&names));
        let abbrevs = format!(r"(?i)\b(?P<abbr>{})\.?\s*\d", alternation(&abbrevs));

        Self {
            table,
            numbered: compile(&numbered),
            names: compile(&names),
            abbrevs: compile(&abbrevs),
        }
    }

    /// Find a book and optional chapter in `query`.
    ///
    /// # Example
    ///
    /// ```
    /// use scriptref::commentary::extract::BookMatcher;
    ///
    /// let found = BookMatcher::global().find("notes on 1 Timothy 3").unwrap();
    /// assert_eq!(found.book.name, "1 Timothy");
    /// assert_eq!(found.chapter, Some(3));
    /// ```
    pub fn find(&self, query: &str) -> Option<BookMatch<'a>> {
        let (book, end) = self
            .find_numbered(query)
            .or_else(|| self.find_name(query))
            .or_else(|| self.find_abbrev(query))?;

        let chapter = NUMBER_RE
            .find(&query[end..])
            .and_then(|m| m.as_str().parse().ok());

        Some(BookMatch { book, chapter })
    }

    fn find_numbered(&self, query: &str) -> Option<(&'a CanonicalBook, usize)> {
        self.numbered.captures_iter(query).find_map(|caps| {
            let numeral = caps
                .name("word")
                .or_else(|| caps.name("digit"))
                .and_then(|m| numeral_digit(m.as_str()))?;
            let base = caps.name("base")?;
            let key = format!("{}{}", numeral, base.as_str().to_lowercase());
            let book = self.table.lookup_key(&key)?;
            Some((book, base.end()))
        })
    }

    fn find_name(&self, query: &str) -> Option<(&'a CanonicalBook, usize)> {
        self.names.captures_iter(query).find_map(|caps| {
            let name = caps.name("name")?;
            let book = self.table.lookup(name.as_str())?;
            Some((book, name.end()))
        })
    }

    fn find_abbrev(&self, query: &str) -> Option<(&'a CanonicalBook, usize)> {
        self.abbrevs.captures_iter(query).find_map(|caps| {
            let abbr = caps.name("abbr")?;
            let book = self.table.lookup_key(&abbr.as_str().to_lowercase())?;
            Some((book, abbr.end()))
        })
    }
}

/// Regex alternation of `items`, longest first, with inner whitespace
/// matching any run of whitespace.
fn alternation(items: &BTreeSet<String>) -> String {
    let mut sorted: Vec<&String> = items.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted
        .iter()
        .map(|item| {
            item.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(pattern: &str) -> Regex {
    // Patterns are built from escaped table entries and cannot be invalid.
    Regex::new(pattern).expect("book pattern is a valid regex")
}

fn numeral_digit(token: &str) -> Option<u8> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "i" | "first" | "1st" => Some(1),
        "2" | "ii" | "second" | "2nd" => Some(2),
        "3" | "iii" | "third" | "3rd" => Some(3),
        _ => None,
    }
}

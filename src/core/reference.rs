//! core::reference
//!
//! The canonical [`Reference`] model and the free-text reference parser.
//!
//! # Grammar
//!
//! ```text
//! reference := numeral? book chapter (sep verse ("-" verse)?)?
//! numeral   := "1" | "2" | "3" | "i" | "ii" | "iii" | "first" | ... | "3rd"
//! sep       := ":" | "."
//! ```
//!
//! Matching is case-insensitive and whitespace is collapsed, so
//! `"1 John 5:7"`, `"1john 5:7"`, `"I Jn 5.7"` and `"Gen.1.1"` all parse.
//! The numeral is folded into the book key before lookup, which is how
//! numbered books win over their un-numbered namesakes ("1 John" is never
//! read as "John").
//!
//! # Single-Chapter Books
//!
//! For books with one chapter a bare number other than 1 is a verse:
//! `"Jude 3"` is `Jude 1:3`. `"Jude 1"` is the whole chapter.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use super::books::{book_key, BookTable, CanonicalBook};
use super::errors::ReferenceError;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^
        (?:
            (?P<word>1st|2nd|3rd|iii|ii|i|first|second|third)\s+
          | (?P<digit>[1-3])\s*
        )?
        (?P<book>[a-z][a-z'\x20.]*?)
        \.?\s*
        (?P<chapter>\d+)
        (?:
            \s*[:.]\s*(?P<verse>\d+)
            (?:\s*[-\x{2013}]\s*(?P<end>\d+))?
        )?
        $",
    )
    .expect("reference grammar is a valid regex")
});

/// How chapter bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Chapters above the book's chapter count are rejected
    #[default]
    Strict,
    /// Chapters above the book's chapter count pass through
    Lenient,
}

/// A validated Bible reference.
///
/// Borrows its book from the book table; construction is the only place
/// invariants are checked, so a `Reference` is always internally
/// consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reference<'a> {
    #[serde(serialize_with = "serialize_book")]
    book: &'a CanonicalBook,
    chapter: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_verse: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_verse: Option<u16>,
}

fn serialize_book<S: Serializer>(book: &&CanonicalBook, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&book.name)
}

impl<'a> Reference<'a> {
    /// Build a reference, enforcing every invariant.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::Range` if the chapter is 0 (or above the
    /// book's chapter count under `Strictness::Strict`), a verse is 0, an end
    /// verse is given without a start verse, or `end < start`.
    pub fn new(
        book: &'a CanonicalBook,
        chapter: u16,
        start_verse: Option<u16>,
        end_verse: Option<u16>,
        strictness: Strictness,
    ) -> Result<Self, ReferenceError> {
        if chapter == 0 {
            return Err(ReferenceError::Range(format!(
                "{} has no chapter 0",
                book.name
            )));
        }
        if strictness == Strictness::Strict && chapter > book.max_chapters {
            return Err(ReferenceError::Range(format!(
                "{} has {} chapter{}, got {}",
                book.name,
                book.max_chapters,
                if book.max_chapters == 1 { "" } else { "s" },
                chapter
            )));
        }
        match (start_verse, end_verse) {
            (Some(0), _) | (_, Some(0)) => {
                return Err(ReferenceError::Range("verse numbers start at 1".into()));
            }
            (None, Some(_)) => {
                return Err(ReferenceError::Range(
                    "end verse given without a start verse".into(),
                ));
            }
            (Some(start), Some(end)) if end < start => {
                return Err(ReferenceError::Range(format!(
                    "end verse {} precedes start verse {}",
                    end, start
                )));
            }
            _ => {}
        }

        Ok(Self {
            book,
            chapter,
            start_verse,
            end_verse,
        })
    }

    pub fn book(&self) -> &'a CanonicalBook {
        self.book
    }

    pub fn chapter(&self) -> u16 {
        self.chapter
    }

    pub fn start_verse(&self) -> Option<u16> {
        self.start_verse
    }

    pub fn end_verse(&self) -> Option<u16> {
        self.end_verse
    }

    /// Whether this reference names a whole chapter.
    pub fn is_chapter_only(&self) -> bool {
        self.start_verse.is_none()
    }
}

impl fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book.name, self.chapter)?;
        if let Some(start) = self.start_verse {
            write!(f, ":{}", start)?;
            match self.end_verse {
                Some(end) if end != start => write!(f, "-{}", end)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Canonical rendering of a reference.
///
/// Omits the verse segment for whole chapters and the end verse when it
/// equals the start verse.
pub fn format_reference(reference: &Reference<'_>) -> String {
    reference.to_string()
}

/// Reference parser bound to a book table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    table: &'a BookTable,
    strictness: Strictness,
}

impl Parser<'static> {
    /// A strict parser over the embedded book table.
    pub fn global() -> Self {
        Parser::new(BookTable::global())
    }
}

impl<'a> Parser<'a> {
    pub fn new(table: &'a BookTable) -> Self {
        Self {
            table,
            strictness: Strictness::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn table(&self) -> &'a BookTable {
        self.table
    }

    /// Parse a free-text reference.
    ///
    /// # Errors
    ///
    /// - `ReferenceError::Parse` for empty or ungrammatical input
    /// - `ReferenceError::UnknownBook` when the book token is not in the table
    /// - `ReferenceError::Range` for out-of-bounds chapters and verses
    ///
    /// # Example
    ///
    /// ```
    /// use scriptref::core::reference::Parser;
    ///
    /// let reference = Parser::global().parse("1 Samuel 17:45").unwrap();
    /// assert_eq!(reference.book().name, "1 Samuel");
    /// assert_eq!(reference.chapter(), 17);
    /// assert_eq!(reference.start_verse(), Some(45));
    /// ```
    pub fn parse(&self, raw: &str) -> Result<Reference<'a>, ReferenceError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(ReferenceError::parse(raw, "reference is empty"));
        }

        let caps = REFERENCE_RE.captures(&collapsed).ok_or_else(|| {
            ReferenceError::parse(raw, "expected '<book> <chapter>[:<verse>[-<verse>]]'")
        })?;

        let numeral = caps
            .name("word")
            .map(|m| numeral_value(m.as_str()))
            .or_else(|| caps.name("digit").map(|m| numeral_value(m.as_str())))
            .flatten();
        // The grammar guarantees this group participates in every match.
        let book_token = caps.name("book").map_or("", |m| m.as_str()).trim();

        let book = self.resolve_book(numeral, book_token).ok_or_else(|| {
            let shown = match numeral {
                Some(n) => format!("{} {}", n, book_token),
                None => book_token.to_string(),
            };
            ReferenceError::UnknownBook(shown)
        })?;

        let number = |name: &str| -> Result<Option<u16>, ReferenceError> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse::<u16>()
                        .map_err(|_| ReferenceError::Range(format!("{} is too large", m.as_str())))
                })
                .transpose()
        };

        let mut chapter = number("chapter")?.unwrap_or(0);
        let mut start_verse = number("verse")?;
        let end_verse = number("end")?;

        if book.single_chapter && start_verse.is_none() && chapter != 1 {
            start_verse = Some(chapter);
            chapter = 1;
        }

        Reference::new(book, chapter, start_verse, end_verse, self.strictness)
    }

    fn resolve_book(&self, numeral: Option<u8>, token: &str) -> Option<&'a CanonicalBook> {
        match numeral {
            Some(n) => self.table.lookup_key(&format!("{}{}", n, book_key(token))),
            None => self.table.lookup(token),
        }
    }
}

/// Value of a leading book numeral in any accepted spelling.
fn numeral_value(token: &str) -> Option<u8> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "i" | "first" | "1st" => Some(1),
        "2" | "ii" | "second" | "2nd" => Some(2),
        "3" | "iii" | "third" | "3rd" => Some(3),
        _ => None,
    }
}

/// Parse with the strict global parser.
pub fn parse(raw: &str) -> Result<Reference<'static>, ReferenceError> {
    Parser::global().parse(raw)
}

//! mapping
//!
//! Translation of a canonical [`Reference`] into provider identifiers.
//!
//! # Targets
//!
//! - [`ProviderKey`]: book code plus chapter/verse for chapter/verse APIs
//! - [`SectionId`]: roman-numeral commentary sections (see [`scheme`])
//! - [`LexiconKey`]: compact book/chapter/verse keys for lexicon lookups
//!
//! Every function here is pure. The book table carries a code for every
//! provider, so mapping a valid reference cannot miss; the only failure is a
//! chapter beyond the roman numeral domain, which strict parsing already
//! rules out.
//!
//! # Example
//!
//! ```
//! use scriptref::core::parse;
//! use scriptref::mapping::{to_provider_key, to_section_id, SectionScheme};
//!
//! let reference = parse("Genesis 1:1-5").unwrap();
//! let key = to_provider_key(&reference);
//! assert_eq!(key.book_code, "GEN");
//! assert_eq!((key.verse, key.end_verse), (Some(1), Some(5)));
//!
//! let section = to_section_id(&reference, &SectionScheme::MATTHEW_HENRY).unwrap();
//! assert_eq!(section.work, "henry/mhc1");
//! assert_eq!(section.section, "mhc1.Gen.i");
//! ```

pub mod external;
pub mod scheme;

pub use external::normalize_external_range;
pub use scheme::{SectionScheme, VolumeLayout};

use std::fmt;

use serde::Serialize;

use crate::core::books::ProviderId;
use crate::core::errors::ReferenceError;
use crate::core::reference::Reference;
use crate::core::roman::to_roman_numeral;

/// Chapter/verse key for a verse API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderKey {
    pub book_code: String,
    pub chapter: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_verse: Option<u16>,
}

/// Commentary section address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionId {
    pub work: String,
    pub section: String,
}

/// Lexicon lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconKey {
    pub book: String,
    pub chapter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<String>,
}

/// Any provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetIdentifier {
    ProviderKey(ProviderKey),
    SectionId(SectionId),
    LexiconKey(LexiconKey),
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.book_code, self.chapter)?;
        if let Some(verse) = self.verse {
            write!(f, ".{}", verse)?;
            if let Some(end) = self.end_verse.filter(|&end| end != verse) {
                write!(f, "-{}", end)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.work, self.section)
    }
}

impl fmt::Display for LexiconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.book, self.chapter)?;
        if let Some(verse) = &self.verse {
            write!(f, ".{}", verse)?;
        }
        Ok(())
    }
}

impl fmt::Display for TargetIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetIdentifier::ProviderKey(key) => key.fmt(f),
            TargetIdentifier::SectionId(id) => id.fmt(f),
            TargetIdentifier::LexiconKey(key) => key.fmt(f),
        }
    }
}

/// Map to a USFM-coded provider key (`GEN`, `1SA`, `JHN`).
pub fn to_provider_key(reference: &Reference<'_>) -> ProviderKey {
    to_provider_key_for(reference, ProviderId::Usfm)
}

/// Map to a provider key using `provider`'s book codes.
pub fn to_provider_key_for(reference: &Reference<'_>, provider: ProviderId) -> ProviderKey {
    ProviderKey {
        book_code: reference.book().abbrev(provider).to_string(),
        chapter: reference.chapter(),
        verse: reference.start_verse(),
        end_verse: reference.end_verse(),
    }
}

/// Map to a commentary section id under `scheme`.
///
/// # Errors
///
/// Returns `ReferenceError::Range` when the chapter has no roman numeral
/// form (only reachable with leniently parsed references).
pub fn to_section_id(
    reference: &Reference<'_>,
    scheme: &SectionScheme,
) -> Result<SectionId, ReferenceError> {
    let book = reference.book();
    let roman = to_roman_numeral(reference.chapter())?;
    Ok(SectionId {
        work: scheme.work(book),
        section: format!(
            "{}.{}.{}",
            scheme.volume_prefix(book),
            book.abbrev(ProviderId::Ccel),
            roman
        ),
    })
}

/// Map to a lexicon key: the book name with spaces removed.
///
/// ```
/// use scriptref::core::parse;
/// use scriptref::mapping::to_lexicon_key;
///
/// let key = to_lexicon_key(&parse("1 Samuel 17:45").unwrap());
/// assert_eq!(key.book, "1Samuel");
/// assert_eq!(key.verse.as_deref(), Some("45"));
/// ```
pub fn to_lexicon_key(reference: &Reference<'_>) -> LexiconKey {
    LexiconKey {
        book: reference.book().name.split_whitespace().collect(),
        chapter: reference.chapter().to_string(),
        verse: reference.start_verse().map(|v| v.to_string()),
    }
}

/// Every identifier for `reference`, in a stable order.
///
/// # Errors
///
/// Propagates `to_section_id` failures.
pub fn map_all(
    reference: &Reference<'_>,
    scheme: &SectionScheme,
) -> Result<Vec<TargetIdentifier>, ReferenceError> {
    Ok(vec![
        TargetIdentifier::ProviderKey(to_provider_key(reference)),
        TargetIdentifier::SectionId(to_section_id(reference, scheme)?),
        TargetIdentifier::LexiconKey(to_lexicon_key(reference)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::{parse, Parser, Strictness};

    #[test]
    fn provider_key_copies_verses() {
        let key = to_provider_key(&parse("Genesis 1:1-5").unwrap());
        assert_eq!(
            key,
            ProviderKey {
                book_code: "GEN".into(),
                chapter: 1,
                verse: Some(1),
                end_verse: Some(5),
            }
        );
        assert_eq!(key.to_string(), "GEN.1.1-5");
    }

    #[test]
    fn provider_key_for_osis() {
        let key = to_provider_key_for(&parse("1 Samuel 17").unwrap(), ProviderId::Osis);
        assert_eq!(key.book_code, "1Sam");
        assert_eq!(key.verse, None);
    }

    #[test]
    fn section_ids() {
        let scheme = SectionScheme::MATTHEW_HENRY;
        let id = to_section_id(&parse("Genesis 1:1-5").unwrap(), &scheme).unwrap();
        assert_eq!(id.work, "henry/mhc1");
        assert_eq!(id.section, "mhc1.Gen.i");

        let id = to_section_id(&parse("2 Samuel 22:2").unwrap(), &scheme).unwrap();
        assert_eq!(id.section, "mhc2.iiSam.xxii");

        let id = to_section_id(&parse("Psalm 119").unwrap(), &scheme).unwrap();
        assert_eq!(id.work, "henry/mhc3");
        assert_eq!(id.section, "mhc3.Ps.cxix");

        let id = to_section_id(
            &parse("Revelation 22:21").unwrap(),
            &SectionScheme::MATTHEW_HENRY_CONCISE,
        )
        .unwrap();
        assert_eq!(id.work, "henry/mhcc");
        assert_eq!(id.section, "mhcc.Rev.xxii");
    }

    #[test]
    fn lenient_chapter_beyond_numeral_domain() {
        let parser = Parser::global().with_strictness(Strictness::Lenient);
        let reference = parser.parse("Psalms 151").unwrap();
        assert!(matches!(
            to_section_id(&reference, &SectionScheme::MATTHEW_HENRY),
            Err(ReferenceError::Range(_))
        ));
    }

    #[test]
    fn lexicon_keys() {
        let key = to_lexicon_key(&parse("Song of Solomon 2:1").unwrap());
        assert_eq!(key.book, "SongofSolomon");
        assert_eq!(key.chapter, "2");
        assert_eq!(key.verse.as_deref(), Some("1"));

        let key = to_lexicon_key(&parse("1 Samuel 17").unwrap());
        assert_eq!(key.book, "1Samuel");
        assert_eq!(key.verse, None);
        assert_eq!(key.to_string(), "1Samuel.17");
    }

    #[test]
    fn map_all_is_ordered() {
        let ids = map_all(&parse("John 3:16").unwrap(), &SectionScheme::default()).unwrap();
        assert!(matches!(ids[0], TargetIdentifier::ProviderKey(_)));
        assert!(matches!(ids[1], TargetIdentifier::SectionId(_)));
        assert!(matches!(ids[2], TargetIdentifier::LexiconKey(_)));
        assert_eq!(ids[1].to_string(), "henry/mhc5#mhc5.John.iii");
    }
}

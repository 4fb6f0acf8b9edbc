//! mapping::scheme
//!
//! Section addressing schemes for roman-numeral commentary sections.
//!
//! A section id is `{volume_prefix}.{book_abbrev}.{roman_chapter}`. Schemes
//! differ only in how the volume prefix and work id are chosen:
//!
//! - **Per-volume** schemes split the Bible across numbered volumes and take
//!   the volume from the book table (`henry/mhc1`, `mhc1.Gen.i`).
//! - **Single-volume** schemes use one fixed prefix for every book
//!   (`henry/mhcc`, `mhcc.Gen.i`).

use crate::core::books::CanonicalBook;

/// How a scheme maps books onto volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLayout {
    /// One volume per region of the canon, numbered by `volume_number`
    PerVolume,
    /// A single volume for the whole Bible
    Single,
}

/// A commentary section addressing scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionScheme {
    /// Name used on the command line and in config
    pub name: &'static str,
    work_root: &'static str,
    section_root: &'static str,
    layout: VolumeLayout,
}

impl SectionScheme {
    /// Matthew Henry's six-volume Commentary on the Whole Bible.
    pub const MATTHEW_HENRY: SectionScheme = SectionScheme {
        name: "henry",
        work_root: "henry/mhc",
        section_root: "mhc",
        layout: VolumeLayout::PerVolume,
    };

    /// Matthew Henry's single-volume Concise Commentary.
    pub const MATTHEW_HENRY_CONCISE: SectionScheme = SectionScheme {
        name: "henry-concise",
        work_root: "henry/mhcc",
        section_root: "mhcc",
        layout: VolumeLayout::Single,
    };

    /// All known schemes.
    pub fn all() -> &'static [SectionScheme] {
        &[Self::MATTHEW_HENRY, Self::MATTHEW_HENRY_CONCISE]
    }

    /// Look up a scheme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<SectionScheme> {
        Self::all()
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
            .copied()
    }

    /// Names of all known schemes, for validation messages.
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(|s| s.name).collect()
    }

    pub fn layout(&self) -> VolumeLayout {
        self.layout
    }

    /// Prefix of the section id for `book` (`mhc4`, `mhcc`).
    pub fn volume_prefix(&self, book: &CanonicalBook) -> String {
        match self.layout {
            VolumeLayout::PerVolume => format!("{}{}", self.section_root, book.volume_number),
            VolumeLayout::Single => self.section_root.to_string(),
        }
    }

    /// Work id holding `book` (`henry/mhc4`, `henry/mhcc`).
    pub fn work(&self, book: &CanonicalBook) -> String {
        match self.layout {
            VolumeLayout::PerVolume => format!("{}{}", self.work_root, book.volume_number),
            VolumeLayout::Single => self.work_root.to_string(),
        }
    }
}

impl Default for SectionScheme {
    fn default() -> Self {
        Self::MATTHEW_HENRY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::books::BookTable;

    #[test]
    fn per_volume_prefix_follows_book_table() {
        let table = BookTable::global();
        let scheme = SectionScheme::MATTHEW_HENRY;
        let isaiah = table.lookup("Isaiah").unwrap();
        assert_eq!(scheme.volume_prefix(isaiah), "mhc4");
        assert_eq!(scheme.work(isaiah), "henry/mhc4");
        let acts = table.lookup("Acts").unwrap();
        assert_eq!(scheme.work(acts), "henry/mhc6");
    }

    #[test]
    fn single_volume_prefix_is_fixed() {
        let table = BookTable::global();
        let scheme = SectionScheme::MATTHEW_HENRY_CONCISE;
        for book in table.books() {
            assert_eq!(scheme.volume_prefix(book), "mhcc");
            assert_eq!(scheme.work(book), "henry/mhcc");
        }
    }

    #[test]
    fn by_name() {
        assert_eq!(
            SectionScheme::by_name("Henry-Concise"),
            Some(SectionScheme::MATTHEW_HENRY_CONCISE)
        );
        assert_eq!(SectionScheme::by_name("gill"), None);
    }
}

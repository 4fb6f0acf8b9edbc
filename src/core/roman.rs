//! core::roman
//!
//! Lowercase roman numerals for chapter-addressed commentary sections.
//!
//! Section ids never need a chapter above 150 (Psalms), so the domain is
//! fixed at `1..=150` and anything outside fails instead of producing an id
//! no provider will recognise.

use super::errors::ReferenceError;

/// Largest chapter count among all canonical books.
pub const MAX_ROMAN: u16 = 150;

const NUMERALS: &[(u16, &str)] = &[
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

/// Convert `n` to a lowercase roman numeral using subtractive notation.
///
/// # Errors
///
/// Returns `ReferenceError::Range` when `n` is outside `1..=150`.
///
/// # Example
///
/// ```
/// use scriptref::core::roman::to_roman_numeral;
///
/// assert_eq!(to_roman_numeral(4).unwrap(), "iv");
/// assert_eq!(to_roman_numeral(150).unwrap(), "cl");
/// assert!(to_roman_numeral(0).is_err());
/// ```
pub fn to_roman_numeral(n: u16) -> Result<String, ReferenceError> {
    if !(1..=MAX_ROMAN).contains(&n) {
        return Err(ReferenceError::Range(format!(
            "roman numeral input {} is outside 1..={}",
            n, MAX_ROMAN
        )));
    }

    let mut remaining = n;
    let mut out = String::new();
    for &(value, symbol) in NUMERALS {
        while remaining >= value {
            out.push_str(symbol);
            remaining -= value;
        }
    }
    Ok(out)
}

/// Parse a roman numeral (either case) back to its value.
///
/// Only canonical subtractive forms within `1..=150` are accepted, so
/// `"iiii"` or `"ic"` return `None`. Used for TOC headings like
/// `CHAPTER XIV` and queries like `book iii`.
pub fn from_roman_numeral(s: &str) -> Option<u16> {
    let lower = s.trim().to_ascii_lowercase();
    if lower.is_empty() || !lower.chars().all(|c| matches!(c, 'i' | 'v' | 'x' | 'l' | 'c')) {
        return None;
    }

    let value_of = |c: char| match c {
        'i' => 1,
        'v' => 5,
        'x' => 10,
        'l' => 50,
        _ => 100,
    };

    let chars: Vec<u16> = lower.chars().map(value_of).collect();
    let mut total: u16 = 0;
    for (i, &v) in chars.iter().enumerate() {
        match chars.get(i + 1) {
            Some(&next) if next > v => total = total.checked_sub(v)?,
            _ => total = total.checked_add(v)?,
        }
    }

    // Reject non-canonical spellings by round-tripping.
    match to_roman_numeral(total) {
        Ok(canonical) if canonical == lower => Some(total),
        _ => None,
    }
}

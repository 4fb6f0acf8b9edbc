//! mapping::external
//!
//! Normalization of dotted cross-reference ranges.
//!
//! Cross-reference data addresses verses as `Book.Chapter.Verse` with OSIS
//! book codes, and ranges as two such addresses joined by `-`
//! (`Ps.148.4-Ps.148.5`). Some rows abbreviate the end to a bare verse
//! (`Ps.148.4-5`).
//!
//! Only ranges within a single chapter collapse to a display form. Ranges
//! that cross a chapter or book boundary are rejected: no observed data
//! settles how they should render.

use crate::core::errors::ReferenceError;
use crate::core::reference::{Parser, Reference};

/// Convert an external dotted reference into canonical display form.
///
/// # Errors
///
/// - `ReferenceError::Parse` for malformed input or a cross-chapter range
/// - `ReferenceError::UnknownBook` / `ReferenceError::Range` from parsing
///   either endpoint
///
/// # Example
///
/// ```
/// use scriptref::mapping::normalize_external_range;
///
/// assert_eq!(normalize_external_range("Gen.1.1").unwrap(), "Genesis 1:1");
/// assert_eq!(
///     normalize_external_range("Ps.148.4-Ps.148.5").unwrap(),
///     "Psalms 148:4-5"
/// );
/// ```
pub fn normalize_external_range(external: &str) -> Result<String, ReferenceError> {
    normalize_with(&Parser::global(), external)
}

/// As [`normalize_external_range`], with an explicit parser.
pub fn normalize_with(parser: &Parser<'_>, external: &str) -> Result<String, ReferenceError> {
    let trimmed = external.trim();
    if trimmed.is_empty() {
        return Err(ReferenceError::parse(external, "reference is empty"));
    }

    let (start_part, end_part) = match trimmed.split_once('-') {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (trimmed, None),
    };

    let start = parser.parse(start_part)?;
    let Some(end_part) = end_part else {
        return Ok(start.to_string());
    };

    let Some(start_verse) = start.start_verse() else {
        return Err(ReferenceError::parse(
            external,
            "range start must name a verse",
        ));
    };

    let end_verse = if end_part.chars().all(|c| c.is_ascii_digit()) && !end_part.is_empty() {
        end_part
            .parse::<u16>()
            .map_err(|_| ReferenceError::Range(format!("{} is too large", end_part)))?
    } else {
        let end = parser.parse(end_part)?;
        if end.book().ordinal != start.book().ordinal || end.chapter() != start.chapter() {
            return Err(ReferenceError::parse(
                external,
                "ranges across chapters or books are not supported",
            ));
        }
        end.start_verse()
            .ok_or_else(|| ReferenceError::parse(external, "range end must name a verse"))?
    };

    let range = Reference::new(
        start.book(),
        start.chapter(),
        Some(start_verse),
        Some(end_verse),
        parser.strictness(),
    )?;
    Ok(range.to_string())
}

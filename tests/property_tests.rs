//! Property-based tests for the reference model and numeral conversion.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use scriptref::core::roman::{from_roman_numeral, to_roman_numeral};
use scriptref::core::{parse, BookTable, Reference, Strictness};
use scriptref::mapping::{to_section_id, SectionScheme};

/// Strategy for (book index, chapter, start verse, end offset) within the
/// embedded book table's bounds.
fn reference_parts() -> impl Strategy<Value = (usize, u16, Option<u16>, u16)> {
    let books = BookTable::global().books();
    (0..books.len()).prop_flat_map(move |i| {
        (
            Just(i),
            1..=books[i].max_chapters,
            prop::option::of(1u16..=176),
            0u16..20,
        )
    })
}

fn build(parts: (usize, u16, Option<u16>, u16)) -> Reference<'static> {
    let (index, chapter, verse, offset) = parts;
    let book = &BookTable::global().books()[index];
    let end = verse.filter(|_| offset > 0).map(|v| v + offset);
    Reference::new(book, chapter, verse, end, Strictness::Strict)
        .expect("strategy only produces valid references")
}

proptest! {
    /// Canonical form parses back to the same reference.
    #[test]
    fn canonical_form_roundtrip(parts in reference_parts()) {
        let reference = build(parts);
        let parsed = parse(&reference.to_string()).unwrap();
        prop_assert_eq!(parsed, reference);
    }

    /// Case and spacing do not matter.
    #[test]
    fn case_and_spacing_insensitive(parts in reference_parts()) {
        let reference = build(parts);
        let shouted = reference.to_string().to_uppercase().replace(' ', "   ");
        prop_assert_eq!(parse(&shouted).unwrap(), reference);
    }

    /// Every strictly parsed reference has a section id.
    #[test]
    fn section_id_total_for_strict_references(parts in reference_parts()) {
        let reference = build(parts);
        for scheme in SectionScheme::all() {
            prop_assert!(to_section_id(&reference, scheme).is_ok());
        }
    }

    /// Parsing arbitrary text never panics.
    #[test]
    fn parse_total(input in "\\PC{0,40}") {
        let _ = parse(&input);
    }

    /// Roman numerals roundtrip over their domain.
    #[test]
    fn roman_roundtrip(n in 1u16..=150) {
        let numeral = to_roman_numeral(n).unwrap();
        prop_assert_eq!(from_roman_numeral(&numeral), Some(n));
        prop_assert_eq!(from_roman_numeral(&numeral.to_uppercase()), Some(n));
    }

    /// Values above the domain are rejected.
    #[test]
    fn roman_out_of_domain(n in 151u16..=1000) {
        prop_assert!(to_roman_numeral(n).is_err());
    }
}

#[test]
fn zero_has_no_numeral() {
    assert!(to_roman_numeral(0).is_err());
    assert_eq!(from_roman_numeral(""), None);
}

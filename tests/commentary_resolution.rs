//! Integration tests for commentary volume routing.
//!
//! Every test runs against the embedded registry, so these double as a check
//! that the shipped catalogs stay consistent with the book table.

use scriptref::commentary::{
    find_volume, is_meta_commentary, BookMatcher, CommentaryRegistry, VolumeResolver,
};
use scriptref::core::BookTable;

fn work_id(series: &str, query: &str) -> Option<&'static str> {
    find_volume(series, query).map(|v| v.work_id.as_str())
}

// =============================================================================
// Chapter ranges
// =============================================================================

mod chapter_ranges {
    use super::*;

    #[test]
    fn isaiah_split_across_volumes() {
        assert_eq!(work_id("calvin", "Isaiah 1"), Some("calvin/calcom13"));
        assert_eq!(work_id("calvin", "Isaiah 17:4"), Some("calvin/calcom14"));
        assert_eq!(work_id("calvin", "Isaiah 40"), Some("calvin/calcom15"));
        assert_eq!(work_id("calvin", "Isaiah 53"), Some("calvin/calcom16"));
    }

    #[test]
    fn chapter_in_free_text() {
        assert_eq!(
            work_id("calvin", "what does Calvin say on Psalm 119:105?"),
            Some("calvin/calcom11")
        );
        assert_eq!(work_id("calvin", "the gospel of John 3:16"), Some("calvin/calcom34"));
        assert_eq!(work_id("calvin", "John 14"), Some("calvin/calcom35"));
    }

    #[test]
    fn book_without_chapter_takes_first_volume() {
        assert_eq!(work_id("calvin", "Isaiah"), Some("calvin/calcom13"));
    }
}

// =============================================================================
// Book labels
// =============================================================================

mod book_labels {
    use super::*;

    #[test]
    fn combined_volume_labels() {
        assert_eq!(work_id("calvin", "Amos 5:24"), Some("calvin/calcom27"));
        assert_eq!(work_id("calvin", "1 John 4:8"), Some("calvin/calcom45"));
        assert_eq!(work_id("calvin", "Jude 3"), Some("calvin/calcom45"));
    }

    #[test]
    fn numbered_book_is_not_its_namesake() {
        let volume = find_volume("calvin", "1 John 1:9").unwrap();
        assert!(!volume.title.contains("Harmony"));
        assert_ne!(volume.work_id, "calvin/calcom34");
    }

    #[test]
    fn authors_come_with_volumes() {
        let acts = find_volume("expositors-bible", "Acts 2:1").unwrap();
        assert_eq!(acts.work_id, "expositors/acts1");
        assert_eq!(acts.author.as_deref(), Some("G. T. Stokes"));

        let romans = find_volume("expositors", "Romans 8:28").unwrap();
        assert_eq!(romans.author.as_deref(), Some("H. C. G. Moule"));
    }
}

// =============================================================================
// Misses
// =============================================================================

mod misses {
    use super::*;

    #[test]
    fn uncovered_books() {
        assert_eq!(work_id("calvin", "Revelation 22:21"), None);
        assert_eq!(work_id("calvin", "Ruth 1:16"), None);
    }

    #[test]
    fn unknown_series_or_book() {
        assert_eq!(work_id("gill", "Romans 8"), None);
        assert_eq!(work_id("calvin", "grace alone"), None);
        assert_eq!(work_id("calvin", ""), None);
    }
}

#[test]
fn meta_aliases() {
    assert!(is_meta_commentary("calvin"));
    assert!(is_meta_commentary("calvin/calcom"));
    assert!(!is_meta_commentary("calvin/calcom16"));
    assert!(!is_meta_commentary("henry/mhc1"));
}

#[test]
fn explicit_resolver_matches_global() {
    let registry = CommentaryRegistry::global();
    let matcher = BookMatcher::new(BookTable::global());
    let resolver = VolumeResolver::new(registry, &matcher);

    assert_eq!(
        resolver.find_volume("calvin", "Romans 8").map(|v| v.work_id.as_str()),
        work_id("calvin", "Romans 8")
    );
    assert_eq!(
        resolver.is_meta_commentary("calvin"),
        is_meta_commentary("calvin")
    );
}

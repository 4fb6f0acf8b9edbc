//! sections::matching
//!
//! Free-text query matching against a table of contents.
//!
//! # Steps
//!
//! Steps run in priority order and the first hit wins:
//!
//! 1. [`exact_title`]: the query equals, or is contained in, an entry title.
//!    Confidence `exact`.
//! 2. [`structured`]: `book N`, `chapter N` and `part N` criteria from the
//!    query compared with entry hints. `exact` when every criterion matches,
//!    `high` when at least half do, `medium` otherwise.
//! 3. [`keyword`]: significant query words (longer than three characters)
//!    found in title or topic words by substring containment either way.
//!    `medium` when at least half are found, `low` otherwise.
//! 4. Fallback: the first entry at `low`.
//!
//! Non-exact results carry up to [`MAX_ALTERNATIVES`] other entries, ranked
//! by keyword overlap and then document order.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::traits::TocEntry;
use crate::core::roman::from_roman_numeral;

/// Upper bound on alternatives attached to a resolution.
pub const MAX_ALTERNATIVES: usize = 5;

/// Query words must be longer than this to count as keywords.
const KEYWORD_MIN_LEN: usize = 4;

/// Title and topic words shorter than this are ignored by keyword matching.
const TITLE_WORD_MIN_LEN: usize = 4;

static HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<field>book|chapter|part)\s+(?P<value>\d+|[ivxlc]+|first|second|third|fourth|fifth|sixth)\b",
    )
    .expect("hint pattern is a valid regex")
});

/// How certain a section match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Exact,
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Exact => "exact",
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        f.write_str(s)
    }
}

/// The matching step that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStep {
    ExactTitle,
    Structured,
    Keyword,
    Fallback,
}

impl fmt::Display for MatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStep::ExactTitle => "exact title",
            MatchStep::Structured => "structured",
            MatchStep::Keyword => "keyword",
            MatchStep::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// Book/chapter/part numbers named in a title or query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralHints {
    pub book: Option<u16>,
    pub chapter: Option<u16>,
    pub part: Option<u16>,
}

impl StructuralHints {
    /// Extract hints from text. The first occurrence of each field wins.
    ///
    /// Values may be Arabic (`2`), roman (`II`) or ordinal words (`second`).
    ///
    /// ```
    /// use scriptref::sections::StructuralHints;
    ///
    /// let hints = StructuralHints::from_text("Book second, chapter IV");
    /// assert_eq!(hints.book, Some(2));
    /// assert_eq!(hints.chapter, Some(4));
    /// assert_eq!(hints.part, None);
    /// ```
    pub fn from_text(text: &str) -> Self {
        let mut hints = Self::default();
        for caps in HINT_RE.captures_iter(text) {
            let Some(value) = caps.name("value").and_then(|m| hint_value(m.as_str())) else {
                continue;
            };
            let slot = match caps["field"].to_ascii_lowercase().as_str() {
                "book" => &mut hints.book,
                "chapter" => &mut hints.chapter,
                _ => &mut hints.part,
            };
            slot.get_or_insert(value);
        }
        hints
    }

    fn criteria(&self) -> [Option<u16>; 3] {
        [self.book, self.chapter, self.part]
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.criteria().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of fields present in `self` that `other` has with equal value.
    pub fn matches(&self, other: &StructuralHints) -> usize {
        self.criteria()
            .iter()
            .zip(other.criteria())
            .filter(|(wanted, have)| wanted.is_some() && **wanted == *have)
            .count()
    }
}

fn hint_value(token: &str) -> Option<u16> {
    if let Ok(n) = token.parse::<u16>() {
        return Some(n);
    }
    match token.to_ascii_lowercase().as_str() {
        "first" => Some(1),
        "second" => Some(2),
        "third" => Some(3),
        "fourth" => Some(4),
        "fifth" => Some(5),
        "sixth" => Some(6),
        other => from_roman_numeral(other),
    }
}

/// Result of resolving a free-text section query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResolution {
    pub section_id: String,
    pub title: String,
    pub confidence: Confidence,
    pub step: MatchStep,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<TocEntry>,
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn words(text: &str, min_len: usize) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= min_len)
        .map(str::to_lowercase)
        .collect()
}

/// Index of the first entry whose title equals or contains the query.
pub fn exact_title(entries: &[TocEntry], query: &str) -> Option<usize> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }
    entries.iter().position(|entry| {
        let title = normalize(&entry.title);
        title == query || title.contains(&query)
    })
}

/// Best entry by structural criteria, when the query names any.
pub fn structured(entries: &[TocEntry], query: &str) -> Option<(usize, Confidence)> {
    let wanted = StructuralHints::from_text(query);
    let total = wanted.len();
    if total == 0 {
        return None;
    }

    let (index, matched) = best_by(entries, |entry| wanted.matches(&entry.hints()))?;
    let confidence = if matched == total {
        Confidence::Exact
    } else if matched * 2 >= total {
        Confidence::High
    } else {
        Confidence::Medium
    };
    Some((index, confidence))
}

/// Best entry by keyword overlap, when any significant word is found.
pub fn keyword(entries: &[TocEntry], query: &str) -> Option<(usize, Confidence)> {
    let query_words = words(query, KEYWORD_MIN_LEN);
    if query_words.is_empty() {
        return None;
    }

    let (index, found) = best_by(entries, |entry| keyword_score(&query_words, entry))?;
    let confidence = if found * 2 >= query_words.len() {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    Some((index, confidence))
}

fn keyword_score(query_words: &[String], entry: &TocEntry) -> usize {
    let mut entry_words = words(&entry.title, TITLE_WORD_MIN_LEN);
    for topic in &entry.topics {
        entry_words.extend(words(topic, TITLE_WORD_MIN_LEN));
    }
    query_words
        .iter()
        .filter(|qw| {
            entry_words
                .iter()
                .any(|ew| ew.contains(qw.as_str()) || qw.contains(ew.as_str()))
        })
        .count()
}

/// First entry with the highest nonzero score.
fn best_by<F>(entries: &[TocEntry], score: F) -> Option<(usize, usize)>
where
    F: Fn(&TocEntry) -> usize,
{
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (i, score(entry)))
        .filter(|&(_, s)| s > 0)
        .fold(None, |best, candidate| match best {
            Some((_, s)) if s >= candidate.1 => best,
            _ => Some(candidate),
        })
}

fn alternatives(entries: &[TocEntry], chosen: usize, query: &str) -> Vec<TocEntry> {
    let query_words = words(query, KEYWORD_MIN_LEN);
    let mut ranked: Vec<(usize, usize)> = entries
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != chosen)
        .map(|(i, entry)| (i, keyword_score(&query_words, entry)))
        .collect();
    // Stable: equal scores keep document order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .map(|(i, _)| entries[i].clone())
        .collect()
}

/// Run every step against `entries`. Returns `None` only for an empty TOC.
pub fn match_entries(entries: &[TocEntry], query: &str) -> Option<SectionResolution> {
    if entries.is_empty() {
        return None;
    }

    let (index, confidence, step) = exact_title(entries, query)
        .map(|i| (i, Confidence::Exact, MatchStep::ExactTitle))
        .or_else(|| structured(entries, query).map(|(i, c)| (i, c, MatchStep::Structured)))
        .or_else(|| keyword(entries, query).map(|(i, c)| (i, c, MatchStep::Keyword)))
        .unwrap_or((0, Confidence::Low, MatchStep::Fallback));

    let entry = &entries[index];
    let alternatives = if confidence == Confidence::Exact {
        Vec::new()
    } else {
        alternatives(entries, index, query)
    };

    Some(SectionResolution {
        section_id: entry.section_id.clone(),
        title: entry.title.clone(),
        confidence,
        step,
        alternatives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institutes() -> Vec<TocEntry> {
        vec![
            TocEntry::new("iii", "Prefatory Address to the King of France"),
            TocEntry::new(
                "iv.ii",
                "Book I. Chapter 1. The Knowledge of God and of Ourselves Mutually Connected",
            ),
            TocEntry::new("iv.iii", "Book I. Chapter 2. What it is to Know God"),
            TocEntry::new("v.ii", "Book II. Chapter 1. Through the Fall and Revolt of Adam"),
            TocEntry::new(
                "vi.ii",
                "Book III. Chapter 1. The Benefits of Christ Made Available by the Secret Operation of the Spirit",
            ),
            TocEntry::new("vii.ii", "Book IV. Chapter 1. Of the True Church"),
            TocEntry::new(
                "vii.iii",
                "Book IV. Chapter 2. Comparison between the False Church and the True",
            ),
        ]
    }

    fn resolve(query: &str) -> SectionResolution {
        match_entries(&institutes(), query).unwrap()
    }

    #[test]
    fn hints_from_titles() {
        let entries = institutes();
        assert_eq!(entries[0].hints(), StructuralHints::default());
        assert_eq!(entries[4].book, Some(3));
        assert_eq!(entries[4].chapter, Some(1));
    }

    #[test]
    fn hint_values() {
        assert_eq!(StructuralHints::from_text("Part third").part, Some(3));
        assert_eq!(StructuralHints::from_text("chapter x").chapter, Some(10));
        assert_eq!(StructuralHints::from_text("chapter civil").chapter, None);
        assert_eq!(StructuralHints::from_text("chapters 3").chapter, None);
        assert!(StructuralHints::from_text("Introduction").is_empty());
    }

    #[test]
    fn first_occurrence_wins() {
        let hints = StructuralHints::from_text("Book 2, then Book 5");
        assert_eq!(hints.book, Some(2));
    }

    #[test]
    fn exact_title_match() {
        let r = resolve("Prefatory Address");
        assert_eq!(r.section_id, "iii");
        assert_eq!(r.confidence, Confidence::Exact);
        assert_eq!(r.step, MatchStep::ExactTitle);
        assert!(r.alternatives.is_empty());

        let r = resolve("  knowledge of   GOD ");
        assert_eq!(r.section_id, "iv.ii");
        assert_eq!(r.confidence, Confidence::Exact);
    }

    #[test]
    fn structured_all_criteria() {
        let r = resolve("Book 1 Chapter 1");
        assert_eq!(r.section_id, "iv.ii");
        assert_eq!(r.confidence, Confidence::Exact);
        assert_eq!(r.step, MatchStep::Structured);

        let r = resolve("Book IV, chapter second");
        assert_eq!(r.section_id, "vii.iii");
        assert_eq!(r.confidence, Confidence::Exact);
    }

    #[test]
    fn structured_partial_criteria() {
        let r = resolve("Book 2 Chapter 2");
        assert_eq!(r.section_id, "iv.iii");
        assert_eq!(r.confidence, Confidence::High);
        assert!(!r.alternatives.is_empty());

        let r = resolve("book 4 chapter 9 part 3");
        assert_eq!(r.section_id, "vii.ii");
        assert_eq!(r.confidence, Confidence::Medium);
    }

    #[test]
    fn unmatched_criteria_fall_through() {
        assert!(structured(&institutes(), "part 7").is_none());
        assert_eq!(resolve("part 7").step, MatchStep::Fallback);

        let r = resolve("Book 9 Chapter 9");
        assert_eq!(r.step, MatchStep::Keyword);
        assert_eq!(r.section_id, "iv.ii");
    }

    #[test]
    fn keyword_overlap() {
        let r = resolve("true church comparison");
        assert_eq!(r.section_id, "vii.iii");
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.step, MatchStep::Keyword);
        assert_eq!(r.alternatives[0].section_id, "vii.ii");

        let r = resolve("spirit operation mysteries fallen angels");
        assert_eq!(r.section_id, "vi.ii");
        assert_eq!(r.confidence, Confidence::Low);
    }

    #[test]
    fn short_title_words_ignored() {
        // "the" sits inside both query words.
        let r = resolve("another mother");
        assert_eq!(r.section_id, "iii");
        assert_eq!(r.confidence, Confidence::Low);
        assert_eq!(r.step, MatchStep::Fallback);
    }

    #[test]
    fn keyword_matches_topics() {
        let mut entries = institutes();
        entries.push(
            TocEntry::new("viii.i", "Book III. Chapter 21. Of the Eternal Decree")
                .with_topics(["predestination", "election", "sovereignty"]),
        );

        let r = match_entries(&entries, "predestination").unwrap();
        assert_eq!(r.section_id, "viii.i");
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.step, MatchStep::Keyword);

        let r = match_entries(&entries, "election of angels").unwrap();
        assert_eq!(r.section_id, "viii.i");
        assert_eq!(r.confidence, Confidence::Medium);
    }

    #[test]
    fn fallback_never_fails() {
        let r = resolve("zzz-nonsense");
        assert_eq!(r.section_id, "iii");
        assert_eq!(r.confidence, Confidence::Low);
        assert_eq!(r.step, MatchStep::Fallback);
        assert_eq!(r.alternatives.len(), MAX_ALTERNATIVES);
        assert_eq!(r.alternatives[0].section_id, "iv.ii");

        let r = resolve("");
        assert_eq!(r.step, MatchStep::Fallback);
    }

    #[test]
    fn small_toc_has_fewer_alternatives() {
        let entries = &institutes()[..3];
        let r = match_entries(entries, "zzz").unwrap();
        assert_eq!(r.alternatives.len(), 2);
    }

    #[test]
    fn empty_toc() {
        assert!(match_entries(&[], "anything").is_none());
    }
}

//! sections::plaintext
//!
//! TOC source for plain-text confession documents on disk.
//!
//! # Format
//!
//! Each `CHAPTER <roman>` heading line starts an entry. The title is the
//! first following line beginning with `Of `, joined with continuation lines
//! until a blank line or a bracketed marker line:
//!
//! ```text
//! CHAPTER VI (PCUS)
//! Of the Fall of Man, of Sin, and
//! of the Punishment Thereof
//!
//! [6.031] 1. Our first parents, ...
//! ```
//!
//! Headings tagged with a denomination other than `PCUS` repeat an earlier
//! chapter and are skipped. Paragraph markers (`[6.001]`) are removed from
//! titles, and `[PCUS a] [UPCUSA b]` variant pairs keep the `UPCUSA` text.
//! Section ids are 1-based chapter ordinals. Each chapter is tagged with the
//! topics its title's keywords map to.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::topics::TopicTable;
use super::traits::{Toc, TocEntry, TocError, TocSource};

/// Lines scanned after a heading when looking for its title.
const TITLE_WINDOW: usize = 9;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CHAPTER\s+[IVXLC]+\b(?:\s*\((?P<tag>[A-Z]+)\))?")
        .expect("heading pattern is a valid regex")
});

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\.\d+\]").expect("marker pattern is a valid regex"));

static VARIANT_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[PCUS [^\]]+\]\s*\[UPCUSA (?P<keep>[^\]]+)\]|\[UPCUSA (?P<first>[^\]]+)\]\s*\[PCUS [^\]]+\]")
        .expect("variant pattern is a valid regex")
});

static VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:PCUS|UPCUSA) (?P<text>[^\]]+)\]").expect("variant pattern is a valid regex")
});

/// Reads `<dir>/<work>.txt`.
#[derive(Debug, Clone)]
pub struct PlainTextTocSource {
    dir: PathBuf,
}

impl PlainTextTocSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `work`, or `None` when the work id would
    /// escape the source directory.
    pub fn document_path(&self, work: &str) -> Option<PathBuf> {
        let relative = Path::new(work);
        let safe = !work.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        safe.then(|| self.dir.join(format!("{}.txt", work)))
    }
}

#[async_trait]
impl TocSource for PlainTextTocSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_toc(&self, work: &str) -> Result<Toc, TocError> {
        let path = self
            .document_path(work)
            .ok_or_else(|| TocError::NotFound(work.to_string()))?;
        debug!(path = %path.display(), "reading TOC document");

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => TocError::NotFound(work.to_string()),
            _ => TocError::Io(format!("{}: {}", path.display(), e)),
        })?;

        Ok(Toc::from_entries(parse_confession(&text)))
    }
}

/// Parse a confession document into TOC entries.
///
/// ```
/// use scriptref::sections::plaintext::parse_confession;
///
/// let entries = parse_confession("CHAPTER I (PCUS)\nOf the Holy Scripture\n\n[6.001] 1. ...");
/// assert_eq!(entries[0].section_id, "1");
/// assert_eq!(entries[0].title, "Of the Holy Scripture");
/// ```
pub fn parse_confession(text: &str) -> Vec<TocEntry> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut entries = Vec::new();
    let mut ordinal: u16 = 0;

    for (i, line) in lines.iter().enumerate() {
        let Some(caps) = HEADING_RE.captures(line) else {
            continue;
        };
        if caps.name("tag").is_some_and(|tag| tag.as_str() != "PCUS") {
            continue;
        }
        ordinal += 1;

        let window = lines.iter().skip(i + 1).take(TITLE_WINDOW);
        let Some(title) = collect_title(window) else {
            debug!(chapter = ordinal, "chapter heading without title");
            continue;
        };

        let title = clean_title(&title);
        entries.push(TocEntry {
            section_id: ordinal.to_string(),
            topics: TopicTable::global().topics_for(&title),
            title,
            book: None,
            chapter: Some(ordinal),
            part: None,
        });
    }
    entries
}

fn collect_title<'a>(lines: impl Iterator<Item = &'a &'a str>) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for &line in lines {
        if HEADING_RE.is_match(line) {
            break;
        }
        if line.starts_with("Of ") {
            parts.push(line);
        } else if !parts.is_empty() && !line.is_empty() && !line.starts_with('[') {
            parts.push(line);
        } else if !parts.is_empty() {
            break;
        }
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Strip paragraph markers and resolve denomination variants.
pub fn clean_title(title: &str) -> String {
    let title = VARIANT_PAIR_RE.replace_all(title, |caps: &regex::Captures<'_>| {
        caps.name("keep")
            .or_else(|| caps.name("first"))
            .map_or(String::new(), |m| m.as_str().to_string())
    });
    let title = VARIANT_RE.replace_all(&title, "$text");
    let title = MARKER_RE.replace_all(&title, "");
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::matching::{match_entries, Confidence};

    const SAMPLE: &str = "\
Presbyterian Church
in the United States

CHAPTER I (PCUS)
Of the Holy Scripture

[6.001] 1. Although the light of nature...

CHAPTER I (UPCUSA)
Of the Holy Scripture

CHAPTER II (PCUS)
Of God, and of the Holy Trinity
[6.011] 1. There is but one only living and true God...

CHAPTER III (PCUS)

CHAPTER IV (PCUS)
Of the Fall of Man, of Sin, and
of the Punishment Thereof

[6.031] 1. Our first parents...
";

    #[test]
    fn headings_and_titles() {
        let entries = parse_confession(SAMPLE);
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Of the Holy Scripture",
                "Of God, and of the Holy Trinity",
                "Of the Fall of Man, of Sin, and of the Punishment Thereof",
            ]
        );
    }

    #[test]
    fn ordinals_count_untitled_chapters() {
        let entries = parse_confession(SAMPLE);
        let ids: Vec<_> = entries.iter().map(|e| e.section_id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "4"]);
        assert_eq!(entries[2].chapter, Some(4));
    }

    #[test]
    fn chapters_tagged_with_topics() {
        let entries = parse_confession(SAMPLE);
        assert_eq!(
            entries[0].topics,
            ["scripture", "revelation", "authority", "word of god"]
        );
        assert_eq!(entries[1].topics, ["god", "trinity", "attributes"]);
        assert!(entries[2].topics.iter().any(|t| t == "original sin"));
    }

    #[test]
    fn topic_queries_reach_tagged_chapters() {
        let text = "\
CHAPTER I (PCUS)
Of the Holy Scripture

CHAPTER II (PCUS)
Of God, and of the Holy Trinity

CHAPTER III (PCUS)
Of God's Eternal Decree

CHAPTER XI (PCUS)
Of Justification
";
        let entries = parse_confession(text);
        for (query, id) in [("predestination", "3"), ("election", "3"), ("salvation", "4")] {
            let found = match_entries(&entries, query).unwrap();
            assert_eq!(found.section_id, id, "{}", query);
            assert_eq!(found.confidence, Confidence::Medium, "{}", query);
        }
    }

    #[test]
    fn variants_keep_upcusa_text() {
        assert_eq!(
            clean_title("Of [PCUS the Civil Magistrate] [UPCUSA Civil Government]"),
            "Of Civil Government"
        );
        assert_eq!(
            clean_title("Of [UPCUSA Marriage] [PCUS Marriage and Divorce]"),
            "Of Marriage"
        );
        assert_eq!(clean_title("Of [PCUS Synods] and Councils"), "Of Synods and Councils");
        assert_eq!(clean_title("Of Adoption [6.074]"), "Of Adoption");
    }

    #[test]
    fn path_escapes_rejected() {
        let source = PlainTextTocSource::new("/data");
        assert_eq!(
            source.document_path("westminster"),
            Some(PathBuf::from("/data/westminster.txt"))
        );
        assert!(source.document_path("../etc/passwd").is_none());
        assert!(source.document_path("/abs").is_none());
        assert!(source.document_path("").is_none());
    }
}

//! sections::topics
//!
//! Topic tags for confession chapters.
//!
//! Tags come from an embedded keyword table (`data/topics.toml`). A title
//! collects the topics of every keyword it contains, in table order and
//! without duplicates; a title matching nothing gets the fallback tags.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::core::errors::CatalogError;

const TOPICS_TOML: &str = include_str!("../../data/topics.toml");

static GLOBAL: LazyLock<TopicTable> = LazyLock::new(|| {
    TopicTable::from_toml(TOPICS_TOML).expect("embedded topic table must validate")
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicFile {
    fallback: Vec<String>,
    keywords: Vec<KeywordRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordRow {
    keyword: String,
    topics: Vec<String>,
}

/// Keyword → topics table.
#[derive(Debug, Clone)]
pub struct TopicTable {
    /// Lowercase keyword with its topics
    keywords: Vec<(String, Vec<String>)>,
    fallback: Vec<String>,
}

impl TopicTable {
    /// The embedded table, parsed and validated on first access.
    pub fn global() -> &'static TopicTable {
        &GLOBAL
    }

    /// Parse and validate a topic table from TOML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the TOML is malformed, a keyword is
    /// empty or has no topics, or the fallback is empty.
    pub fn from_toml(source: &str) -> Result<Self, CatalogError> {
        let invalid = |message: String| CatalogError::Parse {
            table: "topic",
            message,
        };

        let file: TopicFile = toml::from_str(source).map_err(|e| invalid(e.to_string()))?;
        if file.fallback.is_empty() {
            return Err(invalid("fallback topics cannot be empty".into()));
        }

        let mut keywords = Vec::with_capacity(file.keywords.len());
        for row in file.keywords {
            let keyword = row.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(invalid("keyword cannot be empty".into()));
            }
            if row.topics.is_empty() {
                return Err(invalid(format!("keyword '{}' has no topics", keyword)));
            }
            keywords.push((keyword, row.topics));
        }

        Ok(Self {
            keywords,
            fallback: file.fallback,
        })
    }

    /// Topics for a chapter title.
    ///
    /// ```
    /// use scriptref::sections::topics::TopicTable;
    ///
    /// let topics = TopicTable::global().topics_for("Of Justification");
    /// assert_eq!(topics, ["justification", "faith", "salvation"]);
    /// assert_eq!(TopicTable::global().topics_for("Of Nothing Much"), ["theology"]);
    /// ```
    pub fn topics_for(&self, title: &str) -> Vec<String> {
        let title = title.to_lowercase();
        let mut topics: Vec<String> = Vec::new();
        for (keyword, tags) in &self.keywords {
            if title.contains(keyword.as_str()) {
                for tag in tags {
                    if !topics.contains(tag) {
                        topics.push(tag.clone());
                    }
                }
            }
        }
        if topics.is_empty() {
            topics = self.fallback.clone();
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = TopicTable::global();
        assert!(!table.keywords.is_empty());
        assert_eq!(table.fallback, ["theology"]);
    }

    #[test]
    fn keywords_accumulate_without_duplicates() {
        let topics = TopicTable::global().topics_for("Of God's Eternal Decree");
        assert_eq!(
            topics,
            [
                "god",
                "trinity",
                "attributes",
                "predestination",
                "election",
                "sovereignty",
                "decrees"
            ]
        );

        let topics = TopicTable::global().topics_for("Of Creation and Providence");
        assert_eq!(topics, ["creation", "providence", "sovereignty"]);
    }

    #[test]
    fn case_insensitive() {
        let topics = TopicTable::global().topics_for("OF BAPTISM");
        assert_eq!(topics, ["baptism"]);
    }

    #[test]
    fn invalid_tables_rejected() {
        assert!(TopicTable::from_toml("fallback = []\nkeywords = []").is_err());
        assert!(TopicTable::from_toml(
            "fallback = [\"x\"]\n[[keywords]]\nkeyword = \" \"\ntopics = [\"y\"]"
        )
        .is_err());
        assert!(TopicTable::from_toml(
            "fallback = [\"x\"]\n[[keywords]]\nkeyword = \"law\"\ntopics = []"
        )
        .is_err());
        assert!(TopicTable::from_toml("fallback = [\"x\"]\nkeywords = []\nextra = 1").is_err());
    }
}

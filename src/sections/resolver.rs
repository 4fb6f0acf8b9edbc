//! sections::resolver
//!
//! Cached free-text section resolution.
//!
//! # Cache
//!
//! Parsed TOCs are cached per work in a copy-on-write map behind an
//! [`ArcSwap`]. Readers never block. A TOC is inserted only after its fetch
//! and parse succeed, so a dropped future leaves no partial entry.
//! Concurrent misses for the same work are not deduplicated: each fetches,
//! and since parsing is deterministic the writers converge.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tracing::{debug, warn};

use super::matching::{match_entries, SectionResolution};
use super::traits::{Toc, TocError, TocSource};

/// Errors from section resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SectionError {
    /// The work's TOC has no entries.
    #[error("no sections found for {0}")]
    NotFound(String),

    /// The TOC source failed.
    #[error(transparent)]
    Source(#[from] TocError),
}

type TocCache = HashMap<String, Arc<Toc>>;

/// Resolves free-text queries to section ids of a work.
pub struct SectionResolver {
    source: Arc<dyn TocSource>,
    cache: ArcSwap<TocCache>,
}

impl std::fmt::Debug for SectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionResolver")
            .field("source", &self.source.name())
            .field("cached", &self.cache.load().len())
            .finish()
    }
}

impl SectionResolver {
    pub fn new(source: Arc<dyn TocSource>) -> Self {
        Self {
            source,
            cache: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// The underlying TOC source.
    pub fn source(&self) -> &dyn TocSource {
        self.source.as_ref()
    }

    /// Resolve `query` against the TOC of `work`.
    ///
    /// Never fails on an unmatched query: the first entry is returned at
    /// `low` confidence with alternatives.
    ///
    /// # Errors
    ///
    /// - `SectionError::NotFound` if the TOC has no entries
    /// - `SectionError::Source` if the TOC cannot be fetched
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use scriptref::sections::mock::MockTocSource;
    /// use scriptref::sections::{Confidence, SectionResolver, TocEntry};
    ///
    /// # tokio_test::block_on(async {
    /// let source = MockTocSource::new().with_toc(
    ///     "calvin/institutes",
    ///     vec![TocEntry::new("iv.ii", "Book I. Chapter 1. The Knowledge of God")],
    /// );
    /// let resolver = SectionResolver::new(Arc::new(source));
    ///
    /// let found = resolver.resolve("calvin/institutes", "Book 1 Chapter 1").await.unwrap();
    /// assert_eq!(found.section_id, "iv.ii");
    /// assert_eq!(found.confidence, Confidence::Exact);
    /// # });
    /// ```
    pub async fn resolve(&self, work: &str, query: &str) -> Result<SectionResolution, SectionError> {
        let toc = self.toc(work).await?;
        let resolution =
            match_entries(&toc.entries, query).ok_or_else(|| SectionError::NotFound(work.to_string()))?;

        debug!(
            work,
            query,
            section = %resolution.section_id,
            confidence = %resolution.confidence,
            step = %resolution.step,
            "resolved section"
        );
        Ok(resolution)
    }

    /// The full TOC of `work`.
    ///
    /// # Errors
    ///
    /// Returns `SectionError::Source` if the TOC cannot be fetched.
    pub async fn list_sections(&self, work: &str) -> Result<Arc<Toc>, SectionError> {
        self.toc(work).await
    }

    /// Drop the cached TOC of `work`, or every cached TOC.
    pub fn clear_cache(&self, work: Option<&str>) {
        match work {
            Some(work) => {
                self.cache.rcu(|cache| {
                    let mut next = TocCache::clone(cache);
                    next.remove(work);
                    next
                });
                debug!(work, "cleared cached TOC");
            }
            None => {
                self.cache.store(Arc::new(HashMap::new()));
                debug!("cleared all cached TOCs");
            }
        }
    }

    /// Whether the TOC of `work` is cached.
    pub fn is_cached(&self, work: &str) -> bool {
        self.cache.load().contains_key(work)
    }

    async fn toc(&self, work: &str) -> Result<Arc<Toc>, SectionError> {
        if let Some(toc) = self.cache.load().get(work) {
            debug!(work, "TOC cache hit");
            return Ok(Arc::clone(toc));
        }

        debug!(work, source = self.source.name(), "TOC cache miss");
        let toc = match self.source.fetch_toc(work).await {
            Ok(toc) => Arc::new(toc),
            Err(err) => {
                warn!(work, source = self.source.name(), error = %err, "TOC fetch failed");
                return Err(err.into());
            }
        };

        self.cache.rcu(|cache| {
            let mut next = TocCache::clone(cache);
            next.insert(work.to_string(), Arc::clone(&toc));
            next
        });
        Ok(toc)
    }
}

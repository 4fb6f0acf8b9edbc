//! sections::mock
//!
//! In-memory TOC source for deterministic testing.
//!
//! # Example
//!
//! ```
//! use scriptref::sections::mock::MockTocSource;
//! use scriptref::sections::{TocEntry, TocSource};
//!
//! # tokio_test::block_on(async {
//! let source = MockTocSource::new()
//!     .with_toc("calvin/institutes", vec![TocEntry::new("iv.ii", "Book I. Chapter 1.")]);
//!
//! let toc = source.fetch_toc("calvin/institutes").await.unwrap();
//! assert_eq!(toc.entries[0].book, Some(1));
//! assert_eq!(source.fetch_count("calvin/institutes"), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::{Toc, TocEntry, TocError, TocSource};

/// Mock TOC source. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTocSource {
    inner: Arc<Mutex<MockTocInner>>,
}

#[derive(Debug, Default)]
struct MockTocInner {
    tocs: HashMap<String, Vec<TocEntry>>,
    fail_on: Option<FailOn>,
    /// Works fetched, in call order.
    fetches: Vec<String>,
}

/// Which fetches should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Every fetch fails with the given error.
    AnyFetch(TocError),
    /// Only fetches of the named work fail.
    Work(String, TocError),
}

impl MockTocSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a TOC for `work`. Entries pass through [`Toc::from_entries`].
    pub fn with_toc(self, work: impl Into<String>, entries: Vec<TocEntry>) -> Self {
        self.set_toc(work, entries);
        self
    }

    /// Register or replace a TOC on a shared source.
    pub fn set_toc(&self, work: impl Into<String>, entries: Vec<TocEntry>) {
        self.lock().tocs.insert(work.into(), entries);
    }

    /// Configure fetch failures.
    ///
    /// ```
    /// use scriptref::sections::mock::{FailOn, MockTocSource};
    /// use scriptref::sections::TocError;
    ///
    /// let source = MockTocSource::new().fail_on(FailOn::AnyFetch(TocError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Works fetched so far, in call order.
    pub fn fetches(&self) -> Vec<String> {
        self.lock().fetches.clone()
    }

    /// Number of fetches of `work`.
    pub fn fetch_count(&self, work: &str) -> usize {
        self.lock().fetches.iter().filter(|w| *w == work).count()
    }

    fn lock(&self) -> MutexGuard<'_, MockTocInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TocSource for MockTocSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_toc(&self, work: &str) -> Result<Toc, TocError> {
        let mut inner = self.lock();
        inner.fetches.push(work.to_string());

        match &inner.fail_on {
            Some(FailOn::AnyFetch(err)) => return Err(err.clone()),
            Some(FailOn::Work(failing, err)) if failing == work => return Err(err.clone()),
            _ => {}
        }

        inner
            .tocs
            .get(work)
            .cloned()
            .map(Toc::from_entries)
            .ok_or_else(|| TocError::NotFound(work.to_string()))
    }
}

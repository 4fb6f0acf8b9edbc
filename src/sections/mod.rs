//! sections
//!
//! Free-text lookup of sections in multi-part works.
//!
//! Some works are addressed by irregular section ids taken from an external
//! table of contents. Users ask for "Book 1 Chapter 1" or "Introduction";
//! the [`SectionResolver`] fetches the TOC through a [`TocSource`], caches
//! it, and picks an entry with a discrete [`Confidence`] tier.
//!
//! # Sources
//!
//! - [`http::HttpTocSource`] - JSON TOC documents over HTTP
//! - [`plaintext::PlainTextTocSource`] - confession documents on disk
//! - [`mock::MockTocSource`] - in-memory, for tests
//!
//! Plain-text chapters are tagged with subjects from [`topics::TopicTable`].

pub mod http;
pub mod matching;
pub mod mock;
pub mod plaintext;
pub mod resolver;
pub mod topics;
pub mod traits;

pub use matching::{Confidence, MatchStep, SectionResolution, StructuralHints};
pub use resolver::{SectionError, SectionResolver};
pub use topics::TopicTable;
pub use traits::{Toc, TocEntry, TocError, TocSource};

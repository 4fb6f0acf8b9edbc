//! commentary
//!
//! Commentary series and volume resolution.
//!
//! A commentary series (Calvin's Commentaries, the Expositor's Bible) spans
//! many separately published volumes, each covering a book, a chapter range
//! of a book, or several books. Callers name the series loosely and pass a
//! free-text passage; the resolver returns the concrete volume to fetch.
//!
//! # Modules
//!
//! - [`registry`] - Embedded series data and validation
//! - [`extract`] - Book/chapter extraction from free text
//! - [`resolver`] - Two-pass volume selection

pub mod extract;
pub mod registry;
pub mod resolver;

pub use extract::{BookMatch, BookMatcher};
pub use registry::{BookCoverage, CommentaryRegistry, CommentarySeries, CommentaryVolume};
pub use resolver::{find_volume, is_meta_commentary, label_names_book, VolumeResolver};

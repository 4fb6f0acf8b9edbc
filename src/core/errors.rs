//! core::errors
//!
//! Error types shared by the parser, the mapper and the static catalogs.
//!
//! # Design
//!
//! Parsing and mapping failures indicate malformed caller input. They are
//! surfaced as-is and never recovered locally: guessing a book or clamping an
//! out-of-range verse would hand back the wrong passage.

use thiserror::Error;

/// Errors from reference parsing and identifier mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// Input is empty or does not match the reference grammar.
    #[error("cannot parse reference '{input}': {reason}")]
    Parse {
        /// The raw input as given by the caller
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// The book token is not a known name or alias.
    #[error("unknown book: '{0}'")]
    UnknownBook(String),

    /// A chapter, verse or numeral is outside its declared bounds.
    #[error("out of range: {0}")]
    Range(String),
}

impl ReferenceError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        ReferenceError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from loading and validating the embedded static tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {table} table: {message}")]
    Parse { table: &'static str, message: String },

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("invalid book '{book}': {message}")]
    InvalidBook { book: String, message: String },

    #[error("volume '{work_id}' covers unknown book '{label}'")]
    UnknownCoverageBook { work_id: String, label: String },

    #[error("volume '{work_id}' has an invalid chapter range for '{label}': {start}-{end}")]
    InvalidChapterRange {
        work_id: String,
        label: String,
        start: u16,
        end: u16,
    },
}

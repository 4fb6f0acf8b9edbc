//! core
//!
//! Canonical reference model, book table and configuration.
//!
//! # Modules
//!
//! - [`books`] - The canonical book table and lookup keys
//! - [`reference`] - `Reference` model and the free-text parser
//! - [`roman`] - Roman numeral conversion for section ids
//! - [`errors`] - Parse, lookup and catalog errors
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Static tables are parsed and validated once, then shared read-only
//! - A `Reference` cannot be constructed in an invalid state
//! - Everything here is synchronous and free of I/O except config loading

pub mod books;
pub mod config;
pub mod errors;
pub mod reference;
pub mod roman;

pub use books::{BookTable, CanonicalBook, ProviderId, Testament};
pub use errors::{CatalogError, ReferenceError};
pub use reference::{format_reference, parse, Parser, Reference, Strictness};

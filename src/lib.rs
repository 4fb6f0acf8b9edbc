//! scriptref - Bible reference parsing and commentary identifier mapping
//!
//! Free-text Bible references ("1 Cor. 13:4-7", "Jude 3") are parsed into a
//! validated canonical model and mapped onto the identifiers external
//! providers expect: chapter/verse API keys, roman-numeral commentary
//! sections and lexicon keys. Multi-volume commentary series are routed to
//! the right volume, and multi-part works are searched by table of contents.
//!
//! # Architecture
//!
//! - [`core`] - Book table, reference model and parser, configuration
//! - [`mapping`] - Pure reference → provider identifier functions
//! - [`commentary`] - Commentary series registry and volume resolution
//! - [`sections`] - TOC sources and free-text section resolution
//! - [`cli`] - The `sref` command-line interface
//! - [`ui`] - Output rendering
//!
//! # Invariants
//!
//! 1. A `Reference` is always valid for its book
//! 2. Static tables are validated once and never mutated
//! 3. An unmatched section query yields a low-confidence result, not an error
//! 4. A TOC is cached only after a successful fetch and parse
//!
//! # Example
//!
//! ```
//! use scriptref::core::parse;
//! use scriptref::mapping::to_provider_key;
//!
//! let reference = parse("1 John 5:7").unwrap();
//! assert_eq!(reference.book().name, "1 John");
//! assert_eq!(to_provider_key(&reference).to_string(), "1JN.5.7");
//! ```

pub mod cli;
pub mod commentary;
pub mod core;
pub mod mapping;
pub mod sections;
pub mod ui;

//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity, text and JSON rendering
//!
//! Command handlers print through this module so that `--quiet` and
//! `--json` behave the same everywhere. Diagnostics go through `tracing`
//! instead.

pub mod output;

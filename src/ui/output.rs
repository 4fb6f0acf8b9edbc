//! ui::output
//!
//! Output formatting and display.
//!
//! Human-readable output respects the quiet flag. With `--json`, results are
//! written to stdout as one JSON document and quiet mode does not apply:
//! machine output is the point of the invocation.

use std::fmt::Display;

use serde::Serialize;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - results only, no notes or warnings
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Output settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub verbosity: Verbosity,
    pub json: bool,
}

impl Output {
    pub fn new(verbosity: Verbosity, json: bool) -> Self {
        Self { verbosity, json }
    }

    /// Emit a command result: JSON when requested, otherwise `text`.
    ///
    /// Results are printed even in quiet mode.
    pub fn result<T, D>(&self, value: &T, text: D) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
        D: Display,
    {
        if self.json {
            println!("{}", to_json(value)?);
        } else {
            println!("{}", text);
        }
        Ok(())
    }

    /// Print an informational note (text mode only, respects quiet mode).
    pub fn note(&self, message: impl Display) {
        if !self.json {
            print(message, self.verbosity);
        }
    }

    /// Print a warning (respects quiet mode).
    pub fn warn(&self, message: impl Display) {
        warn(message, self.verbosity);
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Pretty-printed JSON for `value`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Format a list of items, one per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! strict_chapters = true
//! default_scheme = "henry"
//!
//! [toc]
//! source = "http"
//! base_url = "https://toc.example.org"
//! timeout_secs = 20
//! ```
//!
//! # Validation
//!
//! Values are validated after parsing: the scheme must be a known section
//! scheme, a TOC source must have its location, URLs must be HTTP(S) and
//! timeouts must be positive.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::mapping::SectionScheme;

/// Where section TOCs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocSourceKind {
    /// JSON documents under `base_url`
    Http,
    /// Plain-text documents under `dir`
    File,
}

impl std::fmt::Display for TocSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TocSourceKind::Http => write!(f, "http"),
            TocSourceKind::File => write!(f, "file"),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Reject chapters beyond a book's chapter count (default: true)
    pub strict_chapters: Option<bool>,

    /// Section scheme name (default: "henry")
    pub default_scheme: Option<String>,

    /// TOC source settings
    pub toc: Option<TocConfig>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(scheme) = &self.default_scheme {
            if SectionScheme::by_name(scheme).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid scheme '{}', must be one of: {}",
                    scheme,
                    SectionScheme::names().join(", ")
                )));
            }
        }

        if let Some(toc) = &self.toc {
            toc.validate()?;
        }

        Ok(())
    }
}

/// TOC source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TocConfig {
    /// Source kind; inferred from `base_url`/`dir` when absent
    pub source: Option<TocSourceKind>,

    /// Base URL for the HTTP source
    pub base_url: Option<String>,

    /// Directory for the plain-text source
    pub dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl TocConfig {
    /// The effective source kind.
    pub fn kind(&self) -> Option<TocSourceKind> {
        self.source.or_else(|| {
            if self.base_url.is_some() {
                Some(TocSourceKind::Http)
            } else if self.dir.is_some() {
                Some(TocSourceKind::File)
            } else {
                None
            }
        })
    }

    /// Validate the TOC settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "toc.base_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }

        if let Some(dir) = &self.dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("toc.dir cannot be empty".to_string()));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "toc.timeout_secs must be positive".to_string(),
            ));
        }

        match self.source {
            Some(TocSourceKind::Http) if self.base_url.is_none() => Err(ConfigError::InvalidValue(
                "toc.source = \"http\" requires toc.base_url".to_string(),
            )),
            Some(TocSourceKind::File) if self.dir.is_none() => Err(ConfigError::InvalidValue(
                "toc.source = \"file\" requires toc.dir".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

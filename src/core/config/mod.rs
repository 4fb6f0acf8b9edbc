//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags, via [`ConfigOverrides`]
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$SCRIPTREF_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/scriptref/config.toml`
//! 3. `~/.scriptref/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use scriptref::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("strictness: {:?}", config.strictness());
//! println!("scheme: {}", config.scheme().name);
//! ```

pub mod schema;

pub use schema::{ConfigFile, TocConfig, TocSourceKind};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::reference::Strictness;
use crate::mapping::SectionScheme;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCRIPTREF_CONFIG";

/// Default TOC request timeout.
pub const DEFAULT_TOC_TIMEOUT_SECS: u64 = 30;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Allow chapters beyond a book's chapter count
    pub lenient: bool,
    /// Section scheme name
    pub scheme: Option<String>,
    /// Use the HTTP TOC source at this URL
    pub toc_url: Option<String>,
    /// Use the plain-text TOC source in this directory
    pub toc_dir: Option<PathBuf>,
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    /// Path the file was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let candidates = candidate_paths(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        match candidates.into_iter().find(|path| path.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Apply command-line overrides and revalidate.
    ///
    /// `toc_url` selects the HTTP source and `toc_dir` the plain-text source,
    /// replacing whatever the file configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an override is invalid.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if overrides.lenient {
            self.file.strict_chapters = Some(false);
        }
        if let Some(scheme) = overrides.scheme {
            self.file.default_scheme = Some(scheme);
        }
        if let Some(url) = overrides.toc_url {
            let toc = self.file.toc.get_or_insert_with(TocConfig::default);
            toc.source = Some(TocSourceKind::Http);
            toc.base_url = Some(url);
        }
        if let Some(dir) = overrides.toc_dir {
            let toc = self.file.toc.get_or_insert_with(TocConfig::default);
            toc.source = Some(TocSourceKind::File);
            toc.dir = Some(dir);
        }

        self.file.validate()?;
        Ok(self)
    }

    /// Path the configuration was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    /// Chapter-bound strictness. Defaults to strict.
    pub fn strictness(&self) -> Strictness {
        match self.file.strict_chapters {
            Some(false) => Strictness::Lenient,
            _ => Strictness::Strict,
        }
    }

    /// Section scheme. Defaults to Matthew Henry.
    pub fn scheme(&self) -> SectionScheme {
        self.file
            .default_scheme
            .as_deref()
            .and_then(SectionScheme::by_name)
            .unwrap_or_default()
    }

    /// Effective TOC source kind, if one is configured.
    pub fn toc_source(&self) -> Option<TocSourceKind> {
        self.file.toc.as_ref().and_then(TocConfig::kind)
    }

    pub fn toc_base_url(&self) -> Option<&str> {
        self.file.toc.as_ref().and_then(|t| t.base_url.as_deref())
    }

    pub fn toc_dir(&self) -> Option<&Path> {
        self.file.toc.as_ref().and_then(|t| t.dir.as_deref())
    }

    /// TOC request timeout. Defaults to 30 seconds.
    pub fn toc_timeout(&self) -> Duration {
        let secs = self
            .file
            .toc
            .as_ref()
            .and_then(|t| t.timeout_secs)
            .unwrap_or(DEFAULT_TOC_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

/// Config file candidates in search order.
fn candidate_paths(
    explicit: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    paths.extend(explicit);
    paths.extend(xdg_config_home.map(|dir| dir.join("scriptref/config.toml")));
    paths.extend(home.map(|dir| dir.join(".scriptref/config.toml")));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.strictness(), Strictness::Strict);
        assert_eq!(config.scheme(), SectionScheme::MATTHEW_HENRY);
        assert_eq!(config.toc_source(), None);
        assert_eq!(config.toc_timeout(), Duration::from_secs(30));
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn search_order() {
        let paths = candidate_paths(
            Some("/explicit.toml".into()),
            Some("/xdg".into()),
            Some("/home/u".into()),
        );
        assert_eq!(
            paths,
            [
                PathBuf::from("/explicit.toml"),
                PathBuf::from("/xdg/scriptref/config.toml"),
                PathBuf::from("/home/u/.scriptref/config.toml"),
            ]
        );
        assert_eq!(
            candidate_paths(None, None, Some("/h".into())),
            [PathBuf::from("/h/.scriptref/config.toml")]
        );
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "strict_chapters = false\ndefault_scheme = \"henry-concise\"\n[toc]\nbase_url = \"http://localhost:8080\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.loaded_from(), Some(path.as_path()));
        assert_eq!(config.strictness(), Strictness::Lenient);
        assert_eq!(config.scheme(), SectionScheme::MATTHEW_HENRY_CONCISE);
        assert_eq!(config.toc_source(), Some(TocSourceKind::Http));
        assert_eq!(config.toc_base_url(), Some("http://localhost:8080"));
        assert_eq!(config.toc_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        fs::write(&path, "default_scheme = \"gill\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue(_))
        ));

        fs::write(&path, "not toml [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            Config::load_from(&temp.path().join("absent.toml")),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = Config::default()
            .with_overrides(ConfigOverrides {
                lenient: true,
                scheme: Some("henry-concise".into()),
                toc_dir: Some("/srv/toc".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.strictness(), Strictness::Lenient);
        assert_eq!(config.scheme(), SectionScheme::MATTHEW_HENRY_CONCISE);
        assert_eq!(config.toc_source(), Some(TocSourceKind::File));
        assert_eq!(config.toc_dir(), Some(Path::new("/srv/toc")));
    }

    #[test]
    fn invalid_override_rejected() {
        let result = Config::default().with_overrides(ConfigOverrides {
            toc_url: Some("localhost".into()),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}

//! cli
//!
//! Command-line interface layer for sref.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Load configuration and apply flag overrides
//! - Delegate to command handlers
//!
//! The CLI layer is thin. Parsing, mapping and resolution live in the
//! library modules; handlers only build inputs and render results.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use tracing::Level;

use crate::core::config::{Config, ConfigOverrides};
use crate::ui::output::{Output, Verbosity};

/// Per-invocation state shared by command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: Output,
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = Config::load()
        .context("failed to load configuration")?
        .with_overrides(ConfigOverrides {
            lenient: cli.lenient,
            scheme: cli.scheme.clone(),
            toc_url: cli.toc_url.clone(),
            toc_dir: cli.toc_dir.clone(),
        })
        .context("invalid command-line option")?;

    if let Some(path) = config.loaded_from() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }

    let ctx = Context {
        output: Output::new(Verbosity::from_flags(cli.quiet, cli.debug), cli.json),
        config,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr: DEBUG with `--debug`, otherwise WARN.
fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

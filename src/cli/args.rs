//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--debug`: Enable debug logging on stderr
//! - `--quiet` / `-q`: Results only, no notes or warnings
//! - `--json`: Machine-readable output
//! - `--lenient`: Allow chapters beyond a book's chapter count
//! - `--scheme <name>`: Section scheme for `map`
//! - `--toc-url <url>` / `--toc-dir <dir>`: TOC source for `section`/`sections`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::books::ProviderId;

/// sref - Bible reference parsing and commentary lookup
#[derive(Parser, Debug)]
#[command(name = "sref")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Accept chapters beyond a book's chapter count
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Section scheme (henry, henry-concise)
    #[arg(long, global = true, value_name = "NAME")]
    pub scheme: Option<String>,

    /// Fetch tables of contents from this base URL
    #[arg(long, global = true, value_name = "URL", conflicts_with = "toc_dir")]
    pub toc_url: Option<String>,

    /// Read tables of contents from this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub toc_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a reference and print its canonical form
    #[command(after_help = "\
EXAMPLES:
    sref parse john 3:16          # John 3:16
    sref parse '1 Cor. 13:4-7'    # 1 Corinthians 13:4-7
    sref parse 'Jude 3'           # Jude 1:3")]
    Parse {
        /// Reference text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,
    },

    /// Map a reference to provider identifiers
    Map {
        /// Reference text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        reference: Vec<String>,

        /// Book code scheme for the provider key
        #[arg(long, value_enum, default_value_t = ProviderArg::Usfm)]
        provider: ProviderArg,
    },

    /// Convert a dotted cross-reference (Gen.1.1, Ps.148.4-5) to display form
    Normalize {
        /// External reference
        external: String,
    },

    /// Find the volume of a commentary series covering a passage
    #[command(after_help = "\
EXAMPLES:
    sref volume calvin 'Isaiah 53'
    sref volume expositors-bible 'what about Acts 2:1?'")]
    Volume {
        /// Series id or alias
        series: String,

        /// Free-text passage query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Check whether a work id asks for automatic volume routing
    Meta {
        /// Work id
        work_id: String,
    },

    /// Resolve a free-text section query against a work's table of contents
    #[command(after_help = "\
EXAMPLES:
    sref --toc-url https://toc.example.org section calvin/institutes 'Book 1 Chapter 1'
    sref --toc-dir ./confessions section westminster 'Of Justification'")]
    Section {
        /// Work id
        work: String,

        /// Free-text section query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List the sections of a work
    Sections {
        /// Work id
        work: String,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Book code scheme selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    Usfm,
    Osis,
    Ccel,
}

impl From<ProviderArg> for ProviderId {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Usfm => ProviderId::Usfm,
            ProviderArg::Osis => ProviderId::Osis,
            ProviderArg::Ccel => ProviderId::Ccel,
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

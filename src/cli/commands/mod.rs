//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each command handler:
//! 1. Builds library inputs from its arguments and the context
//! 2. Calls the library
//! 3. Renders the result through [`crate::ui::output`]
//!
//! # Async Commands
//!
//! `section` and `sections` fetch tables of contents over the network or
//! from disk. They build a tokio runtime and block on the async resolver,
//! keeping dispatch synchronous.

mod completion;
mod map;
mod parse;
mod section;
mod volume;

pub use completion::completion;
pub use map::{map, normalize};
pub use parse::parse;
pub use section::{section, sections, toc_source};
pub use volume::{meta, volume};

use anyhow::Result;

use super::args::Command;
use super::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Parse { reference } => parse::parse(ctx, &reference.join(" ")),
        Command::Map {
            reference,
            provider,
        } => map::map(ctx, &reference.join(" "), provider.into()),
        Command::Normalize { external } => map::normalize(ctx, &external),
        Command::Volume { series, query } => volume::volume(ctx, &series, &query.join(" ")),
        Command::Meta { work_id } => volume::meta(ctx, &work_id),
        Command::Section { work, query } => section::section(ctx, &work, &query.join(" ")),
        Command::Sections { work } => section::sections(ctx, &work),
        Command::Completion { shell } => completion::completion(shell),
    }
}

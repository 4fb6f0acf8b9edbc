//! parse command - Parse a reference and print its canonical form

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::reference::Parser;

/// Parse `raw` with the configured strictness.
pub fn parse(ctx: &Context, raw: &str) -> Result<()> {
    let parser = Parser::global().with_strictness(ctx.config.strictness());
    let reference = parser
        .parse(raw)
        .with_context(|| format!("cannot parse '{}'", raw))?;

    ctx.output.result(&reference, reference)?;
    Ok(())
}

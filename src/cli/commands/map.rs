//! map and normalize commands - Provider identifiers for a reference

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::books::ProviderId;
use crate::core::reference::Parser;
use crate::mapping::external::normalize_with;
use crate::mapping::{to_lexicon_key, to_provider_key_for, to_section_id, TargetIdentifier};

/// Print the provider key, section id and lexicon key for `raw`.
pub fn map(ctx: &Context, raw: &str, provider: ProviderId) -> Result<()> {
    let parser = Parser::global().with_strictness(ctx.config.strictness());
    let reference = parser
        .parse(raw)
        .with_context(|| format!("cannot parse '{}'", raw))?;
    let scheme = ctx.config.scheme();

    let targets = vec![
        TargetIdentifier::ProviderKey(to_provider_key_for(&reference, provider)),
        TargetIdentifier::SectionId(
            to_section_id(&reference, &scheme)
                .with_context(|| format!("no {} section for {}", scheme.name, reference))?,
        ),
        TargetIdentifier::LexiconKey(to_lexicon_key(&reference)),
    ];

    let text = [
        format!("reference  {}", reference),
        format!("{:<9}  {}", provider.to_string(), targets[0]),
        format!("section    {}", targets[1]),
        format!("lexicon    {}", targets[2]),
    ]
    .join("\n");

    ctx.output.result(&targets, text)?;
    Ok(())
}

/// Print the display form of a dotted cross-reference.
pub fn normalize(ctx: &Context, external: &str) -> Result<()> {
    let parser = Parser::global().with_strictness(ctx.config.strictness());
    let display = normalize_with(&parser, external)
        .with_context(|| format!("cannot normalize '{}'", external))?;
    ctx.output.result(&display, &display)?;
    Ok(())
}

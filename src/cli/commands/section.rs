//! section and sections commands - Table-of-contents lookup

use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, TocSourceKind};
use crate::sections::http::HttpTocSource;
use crate::sections::plaintext::PlainTextTocSource;
use crate::sections::{Confidence, SectionResolution, SectionResolver, TocSource};
use crate::ui::output::format_list;

/// Build the TOC source selected by configuration.
///
/// # Errors
///
/// Fails when no source is configured or the HTTP client cannot be built.
pub fn toc_source(config: &Config) -> Result<Arc<dyn TocSource>> {
    let not_configured = || {
        anyhow!("no TOC source configured; pass --toc-url or --toc-dir, or set [toc] in the config file")
    };

    match config.toc_source().ok_or_else(not_configured)? {
        TocSourceKind::Http => {
            let base_url = config.toc_base_url().ok_or_else(not_configured)?;
            let source = HttpTocSource::with_timeout(base_url, config.toc_timeout())
                .context("failed to create HTTP client")?;
            Ok(Arc::new(source))
        }
        TocSourceKind::File => {
            let dir = config.toc_dir().ok_or_else(not_configured)?;
            Ok(Arc::new(PlainTextTocSource::new(dir)))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start async runtime")
}

/// Resolve `query` against the TOC of `work`.
pub fn section(ctx: &Context, work: &str, query: &str) -> Result<()> {
    let resolver = SectionResolver::new(toc_source(&ctx.config)?);
    let resolution = runtime()?
        .block_on(resolver.resolve(work, query))
        .with_context(|| format!("cannot resolve sections of '{}'", work))?;

    if resolution.confidence == Confidence::Low {
        ctx.output.warn(format!(
            "no confident match for '{}' in {}; showing the closest section",
            query, work
        ));
    }
    ctx.output.result(&resolution, describe(&resolution))?;
    Ok(())
}

fn describe(resolution: &SectionResolution) -> String {
    let mut text = format!(
        "{}\t{} ({})",
        resolution.section_id, resolution.title, resolution.confidence
    );
    if !resolution.alternatives.is_empty() {
        let lines: Vec<String> = resolution
            .alternatives
            .iter()
            .map(|entry| format!("{}\t{}", entry.section_id, entry.title))
            .collect();
        text.push_str("\nalternatives:\n");
        text.push_str(&format_list(&lines, "  "));
    }
    text
}

/// List every section of `work`.
pub fn sections(ctx: &Context, work: &str) -> Result<()> {
    let resolver = SectionResolver::new(toc_source(&ctx.config)?);
    let toc = runtime()?
        .block_on(resolver.list_sections(work))
        .with_context(|| format!("cannot list sections of '{}'", work))?;

    let lines: Vec<String> = toc
        .entries
        .iter()
        .map(|entry| format!("{}\t{}", entry.section_id, entry.title))
        .collect();
    ctx.output.result(&toc.entries, lines.join("\n"))?;
    Ok(())
}

//! volume and meta commands - Commentary volume routing

use anyhow::Result;

use crate::cli::Context;
use crate::commentary::{find_volume, is_meta_commentary, CommentaryVolume};

/// Print the volume of `series` covering `query`.
///
/// A series that does not cover the passage is an ordinary outcome: a note
/// in text mode, `null` in JSON mode.
pub fn volume(ctx: &Context, series: &str, query: &str) -> Result<()> {
    match find_volume(series, query) {
        Some(volume) => ctx.output.result(volume, describe(volume))?,
        None => {
            if ctx.output.json {
                ctx.output.result(&Option::<&CommentaryVolume>::None, "")?;
            } else {
                ctx.output
                    .note(format!("no volume of '{}' covers '{}'", series, query));
            }
        }
    }
    Ok(())
}

fn describe(volume: &CommentaryVolume) -> String {
    match &volume.author {
        Some(author) => format!("{}\t{} ({})", volume.work_id, volume.title, author),
        None => format!("{}\t{}", volume.work_id, volume.title),
    }
}

/// Print whether `work_id` is a meta alias.
pub fn meta(ctx: &Context, work_id: &str) -> Result<()> {
    let meta = is_meta_commentary(work_id);
    ctx.output.result(&meta, meta)?;
    Ok(())
}

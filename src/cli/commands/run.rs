use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

use super::invoke::invoke;

/// Execute the `blobseal run` command.
///
/// Each path is one arrival event. Events are handled in order and the
/// first failure aborts the command.
pub fn execute(ctx: &Context, paths: &[String]) -> Result<()> {
    ctx.require_public_key()?;
    let handler = ctx.handler();

    for path in paths {
        let dest = invoke(ctx, &handler, path)?;
        output::success(&format!("Encrypted {path} → {dest}"));
    }

    Ok(())
}

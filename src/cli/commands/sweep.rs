use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{BlobsealError, Result};
use crate::core::traits::blob_store::BlobStore;

use super::invoke::invoke;

/// Execute the `blobseal sweep` command.
///
/// Lists the source prefix and delivers an event for every matching blob
/// whose destination does not exist yet (every matching blob with
/// `force`). A failed blob does not stop the sweep; the command fails at
/// the end if any blob failed.
pub fn execute(ctx: &Context, force: bool, quiet: bool) -> Result<()> {
    ctx.require_public_key()?;
    let handler = ctx.handler();

    let source_root = ctx.binding.source_root();
    let candidates = ctx.store.list(&source_root)?;

    let mut pending = Vec::new();
    let mut unmatched = 0;
    let mut up_to_date = 0;
    for path in candidates {
        let Some(blob) = ctx.binding.match_source(&path) else {
            tracing::debug!(path = %path, "blob does not match the binding, skipping");
            unmatched += 1;
            continue;
        };
        if !force && ctx.store.exists(&ctx.binding.dest_path(&blob)) {
            up_to_date += 1;
            continue;
        }
        pending.push(path);
    }

    if pending.is_empty() {
        output::success(&format!(
            "Nothing to encrypt under {source_root} ({up_to_date} already encrypted)"
        ));
        return Ok(());
    }

    let total = pending.len();
    let mut failed = 0;
    let pb = output::progress_bar(total as u64, quiet);

    for path in &pending {
        pb.set_message(path.clone());
        if let Err(e) = invoke(ctx, &handler, path) {
            tracing::error!(path = %path, error = %e, "invocation failed");
            pb.suspend(|| output::error(&format!("{path}: {e}")));
            failed += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    output::success(&format!(
        "Encrypted {} of {total} blob(s) under {source_root}",
        total - failed
    ));
    if up_to_date > 0 {
        output::warning(&format!(
            "Skipped {up_to_date} already encrypted blob(s); use --force to re-encrypt"
        ));
    }
    if unmatched > 0 {
        output::warning(&format!(
            "Ignored {unmatched} blob(s) not matching {}",
            ctx.binding.source_template()
        ));
    }

    if failed > 0 {
        return Err(BlobsealError::InvocationsFailed { failed, total });
    }
    Ok(())
}

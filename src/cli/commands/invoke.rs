use crate::adapters::cipher::pgp_backend::PgpBackend;
use crate::cli::context::Context;
use crate::core::errors::Result;
use crate::core::services::encryption_handler::EncryptionHandler;
use crate::core::traits::blob_store::BlobStore;

/// Deliver one arrival event for `path` and return the destination path.
///
/// The sink is bound before the handler runs but only written by it,
/// so a failed invocation leaves no destination object.
pub fn invoke(
    ctx: &Context,
    handler: &EncryptionHandler<PgpBackend>,
    path: &str,
) -> Result<String> {
    let blob = ctx.binding.require_source(path)?;
    let dest = ctx.binding.dest_path(&blob);

    let span = tracing::info_span!("invocation", source = %path, dest = %dest);
    let _guard = span.enter();

    let input = ctx.store.open(path)?;
    let mut sink = ctx.store.sink(&dest)?;
    handler.handle(input, &blob, &mut sink)?;

    Ok(dest)
}

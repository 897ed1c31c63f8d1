use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `blobseal check` command.
///
/// Decodes and verifies the configured public key and prints the
/// effective binding.
pub fn execute(ctx: &Context) -> Result<()> {
    let public_key = ctx.require_public_key()?;
    let handler = ctx.handler();
    let summary = handler.cipher().inspect(&public_key)?;

    output::header("Public key");
    for user in &summary.user_ids {
        output::detail("User ID", user);
    }
    output::detail("Primary key", &summary.primary_key_id);
    output::detail("Encrypts to", &summary.encryption_key_id);
    output::detail(
        "Output",
        if handler.cipher().armor() {
            "AES-256, integrity protected, ASCII armor"
        } else {
            "AES-256, integrity protected, binary"
        },
    );

    output::header("Binding");
    output::detail("Store root", &ctx.store.root().display().to_string());
    output::detail("Source", ctx.binding.source_template().as_str());
    output::detail("Destination", ctx.binding.dest_template().as_str());

    println!();
    output::success("Configuration is valid");
    Ok(())
}

use std::io::{Read, Write};
use std::path::Path;

use crate::adapters::cipher::pgp_backend::PgpBackend;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{BlobsealError, Result};
use crate::core::traits::blob_store::BlobStore;

/// Execute the `blobseal decrypt` command.
///
/// Reads an encrypted blob from the store and writes the plaintext to
/// `out`, or to stdout when no output file is given.
pub fn execute(ctx: &Context, path: &str, secret_key: &Path, out: Option<&Path>) -> Result<()> {
    let secret_key_armored =
        std::fs::read_to_string(secret_key).map_err(|e| BlobsealError::Decryption {
            reason: format!("Cannot read secret key {}: {e}", secret_key.display()),
        })?;

    let mut ciphertext = Vec::new();
    ctx.store.open(path)?.read_to_end(&mut ciphertext)?;

    let backend = PgpBackend::new();
    let plaintext = backend.decrypt(&ciphertext, &secret_key_armored)?;
    tracing::info!(blob = %path, bytes = plaintext.len(), "Decrypted blob");

    match out {
        Some(out_path) => {
            std::fs::write(out_path, &plaintext)?;
            output::success(&format!(
                "Decrypted {path} → {} ({} bytes)",
                out_path.display(),
                plaintext.len()
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&plaintext)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

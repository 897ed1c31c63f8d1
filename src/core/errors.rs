/// All domain errors for blobseal.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum BlobsealError {
    #[error(
        "Invalid configuration: {detail}\n\n  \
         Set PGP_PUBLIC_KEY to the Base64 encoding of an armored public key:\n    \
         → export PGP_PUBLIC_KEY=$(base64 -w0 public.asc)\n  \
         Run 'blobseal check' to validate the configuration."
    )]
    Configuration { detail: String },

    #[error("Encryption failed: {reason}")]
    Encryption { reason: String },

    #[error(
        "Decryption failed: {reason}\n\n  \
         Check that the secret key matches the public key the blob was encrypted to\n  \
         and that it is not protected by a passphrase."
    )]
    Decryption { reason: String },

    #[error(
        "Blob path '{path}' does not match the trigger binding\n\n  \
         Expected: {template}\n  \
         Check the [binding] section of blobseal.toml."
    )]
    BindingMismatch { path: String, template: String },

    #[error("Blob not found: {path}")]
    BlobNotFound { path: String },

    #[error(
        "{failed} of {total} invocation(s) failed\n\n  \
         Each failure is listed above. Fix the cause and run 'blobseal sweep' again;\n  \
         blobs that were already encrypted are skipped."
    )]
    InvocationsFailed { failed: usize, total: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlobsealError>;

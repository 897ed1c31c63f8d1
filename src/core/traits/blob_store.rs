use std::io::Read;

use crate::core::errors::Result;

/// Destination for one encrypted object.
///
/// `put` is called once per invocation with the complete ciphertext.
pub trait BlobSink {
    fn put(&mut self, bytes: &[u8]) -> Result<()>;
}

impl BlobSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Port for the storage container objects arrive in and are written to.
///
/// Paths are `/`-separated and relative to the store root; the first
/// segment is the container.
pub trait BlobStore: Send + Sync {
    type Reader: Read;
    type Sink: BlobSink;

    /// Open an object for reading.
    fn open(&self, path: &str) -> Result<Self::Reader>;

    /// Bind a sink to a destination path. Nothing is written until `put`.
    fn sink(&self, path: &str) -> Result<Self::Sink>;

    fn exists(&self, path: &str) -> bool;

    /// List every object below `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

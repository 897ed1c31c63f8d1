use std::io::Read;

use tracing::{debug, info};

use crate::config::handler_config::HandlerConfig;
use crate::core::errors::Result;
use crate::core::models::blob_name::BlobName;
use crate::core::traits::blob_store::BlobSink;
use crate::core::traits::cipher::CipherBackend;

/// Handles one object-arrival event: encrypts the object to the
/// configured public key and writes the ciphertext to the sink.
///
/// Holds no state between invocations; the same handler may serve any
/// number of events.
pub struct EncryptionHandler<C: CipherBackend> {
    cipher: C,
    config: HandlerConfig,
}

impl<C: CipherBackend> EncryptionHandler<C> {
    pub fn new(cipher: C, config: HandlerConfig) -> Self {
        Self { cipher, config }
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Encrypt `input` and write the result to `sink` exactly once.
    ///
    /// The key is resolved before the input is read, so configuration
    /// errors never touch storage. Any error leaves the sink unwritten.
    pub fn handle<R: Read>(
        &self,
        mut input: R,
        blob: &BlobName,
        sink: &mut dyn BlobSink,
    ) -> Result<()> {
        info!(blob = %blob, "Getting public key from configuration");
        let public_key = self.config.public_key()?;

        let mut plaintext = Vec::new();
        input.read_to_end(&mut plaintext)?;
        drop(input);
        debug!(blob = %blob, bytes = plaintext.len(), "Read source object");

        info!(blob = %blob, cipher = self.cipher.name(), "Encrypting content");
        let ciphertext = self
            .cipher
            .encrypt(&plaintext, &public_key, &blob.file_name())?;
        drop(plaintext);

        info!(
            blob = %blob,
            destination = %blob.encrypted_file_name(),
            bytes = ciphertext.len(),
            "Writing to output binding"
        );
        sink.put(&ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cipher::pgp_backend::PgpBackend;
    use crate::core::errors::BlobsealError;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use std::cell::Cell;
    use std::io::Cursor;

    const TEST_PUBLIC_KEY: &str = include_str!("../../../tests/fixtures/test_public.asc");
    const TEST_SECRET_KEY: &str = include_str!("../../../tests/fixtures/test_secret.asc");

    /// Records every `put` so tests can assert on write counts.
    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<Vec<u8>>,
    }

    impl BlobSink for RecordingSink {
        fn put(&mut self, bytes: &[u8]) -> Result<()> {
            self.writes.push(bytes.to_vec());
            Ok(())
        }
    }

    /// Reader that counts how often it is read from.
    struct CountingReader<'a> {
        inner: Cursor<&'a [u8]>,
        reads: &'a Cell<usize>,
    }

    impl Read for CountingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "source stream dropped",
            ))
        }
    }

    fn handler(public_key_base64: Option<String>) -> EncryptionHandler<PgpBackend> {
        EncryptionHandler::new(PgpBackend::new(), HandlerConfig::new(public_key_base64))
    }

    fn valid_config() -> Option<String> {
        Some(STANDARD.encode(TEST_PUBLIC_KEY))
    }

    #[test]
    fn encrypts_and_writes_once() {
        let handler = handler(valid_config());
        let mut sink = RecordingSink::default();
        let blob = BlobName::new("hello", "txt");

        handler
            .handle(Cursor::new(b"hello world".as_slice()), &blob, &mut sink)
            .unwrap();

        assert_eq!(sink.writes.len(), 1);
        let armored = String::from_utf8(sink.writes[0].clone()).unwrap();
        assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----"));
        assert!(armored.trim_end().ends_with("-----END PGP MESSAGE-----"));

        let plaintext = handler
            .cipher()
            .decrypt(&sink.writes[0], TEST_SECRET_KEY)
            .unwrap();
        assert_eq!(plaintext, b"hello world");
    }

    #[test]
    fn missing_key_fails_before_reading_input() {
        let handler = handler(None);
        let reads = Cell::new(0);
        let input = CountingReader {
            inner: Cursor::new(b"data".as_slice()),
            reads: &reads,
        };
        let mut sink = RecordingSink::default();

        let result = handler.handle(input, &BlobName::new("a", "txt"), &mut sink);

        assert!(matches!(result, Err(BlobsealError::Configuration { .. })));
        assert_eq!(reads.get(), 0);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn malformed_base64_is_configuration_error_without_write() {
        let handler = handler(Some("%%% not base64 %%%".into()));
        let mut sink = RecordingSink::default();

        let result = handler.handle(
            Cursor::new(b"data".as_slice()),
            &BlobName::new("a", "txt"),
            &mut sink,
        );

        assert!(matches!(result, Err(BlobsealError::Configuration { .. })));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn invalid_key_content_is_encryption_error_without_write() {
        let handler = handler(Some(STANDARD.encode("just some text, not a key")));
        let mut sink = RecordingSink::default();

        let result = handler.handle(
            Cursor::new(b"data".as_slice()),
            &BlobName::new("a", "txt"),
            &mut sink,
        );

        assert!(matches!(result, Err(BlobsealError::Encryption { .. })));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn read_failure_propagates_as_io_error() {
        let handler = handler(valid_config());
        let mut sink = RecordingSink::default();

        let result = handler.handle(FailingReader, &BlobName::new("a", "txt"), &mut sink);

        match result {
            Err(BlobsealError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn handler_is_reusable_across_invocations() {
        let handler = handler(valid_config());

        for (name, body) in [("one", "first body"), ("two", "second body")] {
            let mut sink = Vec::new();
            handler
                .handle(Cursor::new(body.as_bytes()), &BlobName::new(name, "txt"), &mut sink)
                .unwrap();
            let plaintext = handler.cipher().decrypt(&sink, TEST_SECRET_KEY).unwrap();
            assert_eq!(plaintext, body.as_bytes());
        }
    }
}

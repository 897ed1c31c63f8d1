use crate::core::errors::Result;
use crate::core::models::public_key::PublicKeyMaterial;

/// Port for public-key encryption backends.
///
/// Implementations live in `adapters::cipher` (e.g. PgpBackend).
/// The core layer only depends on this trait, never on a concrete backend.
pub trait CipherBackend: Send + Sync {
    /// Encrypt plaintext to the given public key.
    ///
    /// `file_name` is recorded inside the envelope where the format
    /// supports it.
    fn encrypt(&self, plaintext: &[u8], key: &PublicKeyMaterial, file_name: &str)
    -> Result<Vec<u8>>;

    /// Human-readable name of this backend (e.g. "openpgp").
    fn name(&self) -> &str;
}

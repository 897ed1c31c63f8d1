use crate::core::errors::{BlobsealError, Result};
use crate::core::models::public_key::PublicKeyMaterial;

/// Name of the environment variable holding the Base64 public key.
pub const PUBLIC_KEY_ENV: &str = "PGP_PUBLIC_KEY";

/// Configuration the encryption handler needs at invocation time.
///
/// Built once by the bootstrap (the CLI reads `PGP_PUBLIC_KEY`) and
/// passed to the handler at construction. The key stays in its encoded
/// form until an invocation resolves it, so a missing or malformed value
/// fails that invocation rather than the bootstrap.
#[derive(Clone)]
pub struct HandlerConfig {
    pub public_key_base64: Option<String>,
    /// ASCII-armor the ciphertext.
    pub armor: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            public_key_base64: None,
            armor: true,
        }
    }
}

impl HandlerConfig {
    pub fn new(public_key_base64: Option<String>) -> Self {
        Self {
            public_key_base64,
            ..Self::default()
        }
    }

    pub fn with_armor(mut self, armor: bool) -> Self {
        self.armor = armor;
        self
    }

    /// Decode the configured public key.
    pub fn public_key(&self) -> Result<PublicKeyMaterial> {
        let encoded = self
            .public_key_base64
            .as_deref()
            .ok_or_else(|| BlobsealError::Configuration {
                detail: format!("{PUBLIC_KEY_ENV} is not set"),
            })?;

        PublicKeyMaterial::from_base64(encoded)
    }
}

impl std::fmt::Debug for HandlerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerConfig")
            .field("public_key_set", &self.public_key_base64.is_some())
            .field("armor", &self.armor)
            .finish()
    }
}

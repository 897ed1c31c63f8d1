use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::errors::{BlobsealError, Result};

/// The armored OpenPGP public key that objects are encrypted to.
///
/// Obtained by Base64-decoding the configured value; the decoded bytes
/// must be UTF-8 text in the encryption library's armored format.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    armored: String,
}

impl PublicKeyMaterial {
    /// Wrap already-decoded armored key text.
    #[cfg(test)]
    pub fn from_armored(armored: impl Into<String>) -> Self {
        Self {
            armored: armored.into(),
        }
    }

    /// Decode the Base64 value stored in configuration.
    ///
    /// ASCII whitespace is ignored so wrapped values and trailing
    /// newlines from `base64` tools are accepted.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if compact.is_empty() {
            return Err(BlobsealError::Configuration {
                detail: "public key value is empty".into(),
            });
        }

        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| BlobsealError::Configuration {
                detail: format!("public key is not valid Base64: {e}"),
            })?;

        let armored = String::from_utf8(bytes).map_err(|_| BlobsealError::Configuration {
            detail: "decoded public key is not valid UTF-8 text".into(),
        })?;

        Ok(Self { armored })
    }

    /// The armored key text.
    pub fn armored(&self) -> &str {
        &self.armored
    }
}

// Key text stays out of logs and panic messages.
impl std::fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKeyMaterial")
            .field("len", &self.armored.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_text() {
        let encoded = STANDARD.encode("-----BEGIN PGP PUBLIC KEY BLOCK-----");
        let key = PublicKeyMaterial::from_base64(&encoded).unwrap();
        assert_eq!(key.armored(), "-----BEGIN PGP PUBLIC KEY BLOCK-----");
    }

    #[test]
    fn ignores_line_wrapping_and_trailing_newline() {
        let encoded = STANDARD.encode("armored key text that is long enough to wrap");
        let (head, tail) = encoded.split_at(20);
        let wrapped = format!("{head}\n{tail}\n");

        let key = PublicKeyMaterial::from_base64(&wrapped).unwrap();
        assert_eq!(key.armored(), "armored key text that is long enough to wrap");
    }

    #[test]
    fn empty_value_is_configuration_error() {
        let result = PublicKeyMaterial::from_base64("  \n");
        assert!(matches!(result, Err(BlobsealError::Configuration { .. })));
    }

    #[test]
    fn invalid_base64_is_configuration_error() {
        let result = PublicKeyMaterial::from_base64("not*base64!");
        assert!(matches!(result, Err(BlobsealError::Configuration { .. })));
    }

    #[test]
    fn non_utf8_is_configuration_error() {
        let encoded = STANDARD.encode([0xffu8, 0xfe, 0xfd]);
        let result = PublicKeyMaterial::from_base64(&encoded);
        assert!(matches!(result, Err(BlobsealError::Configuration { .. })));
    }

    #[test]
    fn debug_does_not_print_key_text() {
        let key = PublicKeyMaterial::from_armored("secret-looking text");
        assert!(!format!("{key:?}").contains("secret-looking"));
    }
}

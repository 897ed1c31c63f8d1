use std::io::Cursor;

use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::ser::Serialize;
use pgp::types::PublicKeyTrait;
use pgp::{ArmorOptions, Deserializable, Message, SignedPublicKey, SignedSecretKey};

use crate::core::errors::{BlobsealError, Result};
use crate::core::models::public_key::PublicKeyMaterial;
use crate::core::traits::cipher::CipherBackend;

/// Bulk cipher used inside the OpenPGP envelope.
pub const SYMMETRIC_ALGORITHM: SymmetricKeyAlgorithm = SymmetricKeyAlgorithm::AES256;

/// OpenPGP encryption backend built on the pure-Rust `pgp` crate.
///
/// Produces a hybrid envelope: a random AES-256 session key encrypted to
/// the recipient's key, and the data in a symmetrically encrypted,
/// integrity-protected (MDC) packet. Output is ASCII-armored unless
/// armor is turned off.
pub struct PgpBackend {
    armor: bool,
}

/// What `inspect` learned about a public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySummary {
    pub primary_key_id: String,
    pub user_ids: Vec<String>,
    /// Key id of the key session keys are encrypted to.
    pub encryption_key_id: String,
}

impl PgpBackend {
    /// Create a backend producing armored output.
    pub fn new() -> Self {
        Self { armor: true }
    }

    /// Create a backend with armor switched on or off.
    pub fn with_armor(armor: bool) -> Self {
        Self { armor }
    }

    pub fn armor(&self) -> bool {
        self.armor
    }

    /// Parse the armored key text and check its self-signatures.
    fn parse_public_key(key: &PublicKeyMaterial) -> Result<SignedPublicKey> {
        let (public_key, _headers) = SignedPublicKey::from_string(key.armored()).map_err(|e| {
            BlobsealError::Encryption {
                reason: format!("Invalid public key: {e}"),
            }
        })?;

        public_key.verify().map_err(|e| BlobsealError::Encryption {
            reason: format!("Public key failed signature verification: {e}"),
        })?;

        Ok(public_key)
    }

    /// Parse and verify a public key, and report which key would be used.
    pub fn inspect(&self, key: &PublicKeyMaterial) -> Result<KeySummary> {
        let public_key = Self::parse_public_key(key)?;

        let encryption_key_id = match public_key
            .public_subkeys
            .iter()
            .find(|sub| sub.is_encryption_key())
        {
            Some(sub) => format!("{:?}", sub.key_id()),
            None if public_key.is_encryption_key() => format!("{:?}", public_key.key_id()),
            None => return Err(no_encryption_key()),
        };

        Ok(KeySummary {
            primary_key_id: format!("{:?}", public_key.key_id()),
            user_ids: public_key
                .details
                .users
                .iter()
                .map(|u| String::from_utf8_lossy(u.id.id().as_ref()).into_owned())
                .collect(),
            encryption_key_id,
        })
    }

    /// Decrypt an armored or binary message with an unprotected secret key.
    pub fn decrypt(&self, ciphertext: &[u8], secret_key_armored: &str) -> Result<Vec<u8>> {
        let (secret_key, _headers) =
            SignedSecretKey::from_string(secret_key_armored).map_err(|e| {
                BlobsealError::Decryption {
                    reason: format!("Invalid secret key: {e}"),
                }
            })?;

        let message = if is_armored(ciphertext) {
            Message::from_armor_single(Cursor::new(ciphertext)).map(|(m, _)| m)
        } else {
            Message::from_bytes(Cursor::new(ciphertext))
        }
        .map_err(|e| BlobsealError::Decryption {
            reason: format!("Invalid encrypted message: {e}"),
        })?;

        let (decrypted, _key_ids) = message
            .decrypt(String::new, &[&secret_key])
            .map_err(|e| BlobsealError::Decryption {
                reason: format!("{e}"),
            })?;

        decrypted
            .get_content()
            .map_err(|e| BlobsealError::Decryption {
                reason: format!("Read decrypted data failed: {e}"),
            })?
            .ok_or_else(|| BlobsealError::Decryption {
                reason: "Message has no literal data".into(),
            })
    }
}

impl Default for PgpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherBackend for PgpBackend {
    fn encrypt(
        &self,
        plaintext: &[u8],
        key: &PublicKeyMaterial,
        file_name: &str,
    ) -> Result<Vec<u8>> {
        let public_key = Self::parse_public_key(key)?;
        let message = Message::new_literal_bytes(file_name, plaintext);
        let mut rng = rand::thread_rng();

        // Prefer a dedicated encryption subkey over the primary key.
        let encrypted = match public_key
            .public_subkeys
            .iter()
            .find(|sub| sub.is_encryption_key())
        {
            Some(sub) => message.encrypt_to_keys_seipdv1(&mut rng, SYMMETRIC_ALGORITHM, &[sub]),
            None if public_key.is_encryption_key() => {
                message.encrypt_to_keys_seipdv1(&mut rng, SYMMETRIC_ALGORITHM, &[&public_key])
            }
            None => return Err(no_encryption_key()),
        }
        .map_err(|e| BlobsealError::Encryption {
            reason: format!("{e}"),
        })?;

        if self.armor {
            encrypted
                .to_armored_string(ArmorOptions::default())
                .map(String::into_bytes)
                .map_err(|e| BlobsealError::Encryption {
                    reason: format!("Armor failed: {e}"),
                })
        } else {
            encrypted.to_bytes().map_err(|e| BlobsealError::Encryption {
                reason: format!("Serialization failed: {e}"),
            })
        }
    }

    fn name(&self) -> &str {
        "openpgp"
    }
}

fn no_encryption_key() -> BlobsealError {
    BlobsealError::Encryption {
        reason: "Public key has no encryption-capable key or subkey".into(),
    }
}

fn is_armored(data: &[u8]) -> bool {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..].starts_with(b"-----BEGIN PGP")
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{BlobsealError, Result};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "blobseal.toml";

/// Top-level configuration read from `blobseal.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub binding: BindingSection,
    #[serde(default)]
    pub encryption: EncryptionSection,
}

impl TriggerConfig {
    /// Load the configuration from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BlobsealError::Configuration {
                detail: format!("config file {} not found", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            BlobsealError::Configuration { detail } => BlobsealError::Configuration {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Load `path` if given, otherwise `blobseal.toml` when present,
    /// otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BlobsealError::Configuration {
            detail: format!("failed to parse config: {e}"),
        })
    }
}

/// The `[binding]` section: where objects arrive and where ciphertext goes.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingSection {
    /// Local directory backing the storage account.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default = "default_source_prefix")]
    pub source_prefix: String,
    #[serde(default = "default_dest_prefix")]
    pub dest_prefix: String,
}

impl Default for BindingSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            container: default_container(),
            source_prefix: default_source_prefix(),
            dest_prefix: default_dest_prefix(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_container() -> String {
    "container".into()
}

fn default_source_prefix() -> String {
    "incoming".into()
}

fn default_dest_prefix() -> String {
    "encrypted".into()
}

/// The `[encryption]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionSection {
    /// ASCII-armor the ciphertext. Defaults to true.
    #[serde(default = "default_armor")]
    pub armor: bool,
}

impl Default for EncryptionSection {
    fn default() -> Self {
        Self {
            armor: default_armor(),
        }
    }
}

fn default_armor() -> bool {
    true
}

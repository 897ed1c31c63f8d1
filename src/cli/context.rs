use crate::adapters::cipher::pgp_backend::PgpBackend;
use crate::adapters::storage::fs_blob_store::FsBlobStore;
use crate::cli::Cli;
use crate::config::app_config::TriggerConfig;
use crate::config::binding::TriggerBinding;
use crate::config::handler_config::HandlerConfig;
use crate::core::errors::Result;
use crate::core::models::public_key::PublicKeyMaterial;
use crate::core::services::encryption_handler::EncryptionHandler;

/// Everything a command needs, read once from flags, environment and
/// `blobseal.toml`.
#[derive(Debug)]
pub struct Context {
    pub config: TriggerConfig,
    pub binding: TriggerBinding,
    pub store: FsBlobStore,
    pub handler_config: HandlerConfig,
}

impl Context {
    pub fn from_args(args: &Cli) -> Result<Self> {
        let mut config = TriggerConfig::load_or_default(args.config.as_deref())?;
        if let Some(root) = &args.root {
            config.binding.root = root.clone();
        }

        let binding = TriggerBinding::from_config(&config.binding)?;
        let store = FsBlobStore::new(config.binding.root.clone());
        let handler_config =
            HandlerConfig::new(args.public_key.clone()).with_armor(config.encryption.armor);

        tracing::debug!(
            root = %store.root().display(),
            source = %binding.source_template(),
            dest = %binding.dest_template(),
            "configuration loaded"
        );

        Ok(Self {
            config,
            binding,
            store,
            handler_config,
        })
    }

    /// Resolve the public key up front so a bad configuration fails
    /// before any storage is touched.
    pub fn require_public_key(&self) -> Result<PublicKeyMaterial> {
        self.handler_config.public_key()
    }

    pub fn handler(&self) -> EncryptionHandler<PgpBackend> {
        EncryptionHandler::new(
            PgpBackend::with_armor(self.handler_config.armor),
            self.handler_config.clone(),
        )
    }
}

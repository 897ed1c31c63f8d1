pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Encrypt newly uploaded storage objects to an OpenPGP public key.
#[derive(Parser, Debug)]
#[command(name = "blobseal", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file (default: ./blobseal.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage root directory, overriding [binding].root
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Base64-encoded armored OpenPGP public key
    #[arg(long, global = true, env = "PGP_PUBLIC_KEY", hide_env_values = true)]
    pub public_key: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: hide progress and informational logs
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver an arrival event for each blob path and encrypt it
    Run {
        /// Blob paths relative to the storage root, e.g. container/incoming/report.csv
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Encrypt every blob under the source prefix that has no encrypted copy yet
    Sweep {
        /// Re-encrypt blobs whose destination already exists
        #[arg(long)]
        force: bool,
    },

    /// Decrypt an encrypted blob with a secret key
    Decrypt {
        /// Blob path of the encrypted object
        path: String,
        /// Armored, unprotected OpenPGP secret key file
        #[arg(long)]
        secret_key: PathBuf,
        /// Write plaintext to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate configuration and key material
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

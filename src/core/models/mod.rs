pub mod blob_name;
pub mod public_key;

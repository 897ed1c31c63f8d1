/// Suffix appended to the source object name to form the encrypted object name.
pub const ENCRYPTED_SUFFIX: &str = "pgp";

/// The `{name}` and `{extension}` captured from an arriving object's path.
///
/// `name` may contain `/` (nested objects) and dots; `extension` is the
/// text after the final dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobName {
    pub name: String,
    pub extension: String,
}

impl BlobName {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// The source file name, `{name}.{extension}`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }

    /// The destination file name, `{name}.{extension}.pgp`.
    pub fn encrypted_file_name(&self) -> String {
        format!("{}.{ENCRYPTED_SUFFIX}", self.file_name())
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::errors::{BlobsealError, Result};
use crate::core::traits::blob_store::{BlobSink, BlobStore};

/// File name prefix of the staging files a sink writes before renaming.
const STAGING_PREFIX: &str = ".blobseal-staging";

/// Storage account backed by a local directory.
///
/// Each top-level directory under `root` is a container; a blob path
/// `container/incoming/report.csv` maps to `root/container/incoming/report.csv`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a blob path onto the filesystem, refusing anything that could
    /// escape the root.
    pub fn resolve(&self, blob_path: &str) -> Result<PathBuf> {
        let escapes = blob_path.is_empty()
            || blob_path.contains('\\')
            || blob_path
                .split('/')
                .any(|seg| seg.is_empty() || seg == "." || seg == "..");

        if escapes {
            return Err(BlobsealError::BindingMismatch {
                path: blob_path.to_string(),
                template: "a relative '/'-separated blob path without '.' or '..' segments".into(),
            });
        }

        Ok(blob_path
            .split('/')
            .fold(self.root.clone(), |path, seg| path.join(seg)))
    }
}

/// Sink that stages the ciphertext next to its destination and renames
/// it into place, so readers never observe a partial object.
///
/// The staging file is created on `put`; if persisting fails it is
/// removed when the staging file is dropped.
#[derive(Debug)]
pub struct FsBlobSink {
    path: PathBuf,
    written: bool,
}

impl BlobSink for FsBlobSink {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        if self.written {
            return Err(BlobsealError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} was already written by this sink", self.path.display()),
            )));
        }

        let parent = self.path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(parent)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| BlobsealError::Io(e.error))?;

        self.written = true;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "blob committed");
        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    type Reader = File;
    type Sink = FsBlobSink;

    fn open(&self, path: &str) -> Result<File> {
        let fs_path = self.resolve(path)?;
        if !fs_path.is_file() {
            return Err(BlobsealError::BlobNotFound {
                path: path.to_string(),
            });
        }
        Ok(File::open(fs_path)?)
    }

    fn sink(&self, path: &str) -> Result<FsBlobSink> {
        Ok(FsBlobSink {
            path: self.resolve(path)?,
            written: false,
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let dir = self.resolve(prefix)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut blobs = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(false) {
            let entry = entry.map_err(|e| {
                BlobsealError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Staging files from an interrupted write are not blobs.
            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with(STAGING_PREFIX) {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let blob_path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            blobs.push(blob_path);
        }

        blobs.sort();
        Ok(blobs)
    }
}

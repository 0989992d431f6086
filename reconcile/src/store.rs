//! YAML fixture document store.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use model::FixtureDocument;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Location of the fixture document relative to the working directory.
pub const DEFAULT_FIXTURE_PATH: &str = "config/seeded_data.yaml";

/// Reads and atomically replaces the persisted fixture document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureStore {
    path: PathBuf,
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_PATH)
    }
}

impl FixtureStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document.
    ///
    /// A missing or blank file yields an empty document. Fixtures without a
    /// usable menu are dropped.
    pub fn load(&self) -> StoreResult<FixtureDocument> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "fixture document not found");
                return Ok(FixtureDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(FixtureDocument::default());
        }

        let mut document: FixtureDocument =
            serde_yaml::from_str(&text).map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        let dropped = document.retain_usable();
        if dropped > 0 {
            warn!(
                path = %self.path.display(),
                dropped,
                "dropped fixtures without a usable menu"
            );
        }
        Ok(document)
    }

    /// Replaces the document on disk.
    ///
    /// The YAML is written to a sibling temp file, synced, then renamed over
    /// the destination. Missing parent directories are created.
    pub fn save(&self, document: &FixtureDocument) -> StoreResult<()> {
        let yaml = serde_yaml::to_string(document).map_err(|e| StoreError::Encode {
            message: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.temp_path();
        write_and_sync(&tmp, yaml.as_bytes())?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }
        debug!(
            path = %self.path.display(),
            restaurants = document.len(),
            "fixture document saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.sync_all().map_err(io_err)
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::ArtifactKey;
use crate::error::{Error, Result};

/// Flat-file JSON cache: one pretty-printed file per [`ArtifactKey`].
///
/// Access is sequential and unguarded. There is no locking and no atomic
/// rename, so an interrupted save leaves a truncated file that later loads
/// report as [`Error::Malformed`].
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the artifact for `key`.
    #[must_use]
    pub fn path(&self, key: &ArtifactKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    #[must_use]
    pub fn exists(&self, key: &ArtifactKey) -> bool {
        self.path(key).is_file()
    }

    /// Load the raw JSON of an artifact.
    pub fn load(&self, key: &ArtifactKey) -> Result<Value> {
        let path = self.path(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    entity: "artifact",
                    id: key.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| Error::Malformed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Load an artifact and validate it as `T`.
    pub fn load_as<T: DeserializeOwned>(&self, key: &ArtifactKey) -> Result<T> {
        let value = self.load(key)?;
        serde_json::from_value(value).map_err(|e| Error::Malformed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Write an artifact, replacing any previous content.
    pub fn save(&self, key: &ArtifactKey, value: &Value) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path(key);
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, contents)?;
        log::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }
}

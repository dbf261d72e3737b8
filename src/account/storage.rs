//! JSON file persistence for the account store.
//!
//! The document lives at `<config_dir>/pax8/config.json` unless an explicit
//! path is given. Every mutation is a fresh read-modify-write; there is no
//! locking between concurrent invocations.

use super::ConfigurationStore;
use crate::error::ApiError;
use directories::BaseDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = "pax8";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Per-user config directory for the tool (`$XDG_CONFIG_HOME/pax8` on Linux).
pub fn config_dir() -> Result<PathBuf, ApiError> {
    let base = BaseDirs::new().ok_or_else(|| {
        ApiError::Setup("could not determine the user configuration directory".to_string())
    })?;
    Ok(base.config_dir().join(CONFIG_DIR_NAME))
}

/// Result of reading the store file.
///
/// A malformed document does not abort the load: `store` is then the empty
/// store and `parse_error` carries the reason so the caller can report it.
#[derive(Debug)]
pub struct LoadedStore {
    pub store: ConfigurationStore,
    pub parse_error: Option<ApiError>,
}

/// Location of the persisted account store
#[derive(Debug, Clone)]
pub struct AccountStoreFile {
    path: PathBuf,
}

impl AccountStoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store file under the per-user config directory.
    pub fn default_location() -> Result<Self, ApiError> {
        Ok(Self::new(config_dir()?.join(CONFIG_FILE_NAME)))
    }

    /// Explicit path when given, otherwise the per-user default.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ApiError> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_location(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store. A missing file yields an empty store.
    pub fn load(&self) -> Result<LoadedStore, ApiError> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Config file not found, using empty store");
                return Ok(LoadedStore {
                    store: ConfigurationStore::new(),
                    parse_error: None,
                });
            }
            Err(e) => {
                return Err(ApiError::ConfigIo {
                    action: "reading",
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        match serde_json::from_slice::<ConfigurationStore>(&contents) {
            Ok(store) => {
                tracing::debug!(
                    path = %self.path.display(),
                    accounts = store.account_map.len(),
                    "Loaded config file"
                );
                Ok(LoadedStore {
                    store,
                    parse_error: None,
                })
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to parse config file: {}", e);
                Ok(LoadedStore {
                    store: ConfigurationStore::new(),
                    parse_error: Some(ApiError::ConfigParse {
                        path: self.path.clone(),
                        source: e,
                    }),
                })
            }
        }
    }

    /// Write the store as indented JSON, readable only by the owner.
    pub fn save(&self, store: &ConfigurationStore) -> Result<(), ApiError> {
        let contents = serde_json::to_vec_pretty(store).map_err(ApiError::ConfigSerialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::ConfigIo {
                action: "creating directory for",
                path: self.path.clone(),
                source: e,
            })?;
        }

        write_owner_only(&self.path, &contents).map_err(|e| ApiError::ConfigIo {
            action: "writing",
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %self.path.display(), "Saved config file");
        Ok(())
    }
}

#[cfg(unix)]
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation; tighten files that already existed.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

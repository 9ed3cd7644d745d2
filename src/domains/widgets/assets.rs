//! Asset store - read-only widget files keyed by file name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The name is empty or tries to leave the asset directory.
    #[error("Invalid asset name: {0}")]
    InvalidName(String),

    /// No asset with this name exists.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read.
    #[error("Failed to read asset {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only store of widget assets rooted at one directory.
///
/// Assets are read from disk on every load; nothing is cached.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load an asset as UTF-8 text.
    pub fn load(&self, name: &str) -> Result<String, AssetError> {
        let path = self.path_for(name)?;
        debug!("Loading asset {}", path.display());

        std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                warn!("Asset not found: {}", name);
                AssetError::NotFound(name.to_string())
            } else {
                AssetError::Io {
                    name: name.to_string(),
                    source: e,
                }
            }
        })
    }

    /// Resolve a bare file name inside the store.
    fn path_for(&self, name: &str) -> Result<PathBuf, AssetError> {
        let is_plain = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.contains("..");
        if !is_plain {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

/// MIME type for serving an asset over HTTP.
pub fn content_type(name: &str) -> &'static str {
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

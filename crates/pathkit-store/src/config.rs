//! Store configuration, usually read from a TOML file

use crate::Result;
use pathkit_archive::ArchiveCodec;
use pathkit_fs::{FilePath, WriteOptions};
use serde::{Deserialize, Serialize};

/// How a [`PersistenceService`](crate::PersistenceService) writes its
/// archive.
///
/// ```toml
/// binary_fallback = false
/// file_extension = "plist"
///
/// [write]
/// atomic = true
/// fsync = false
/// lock_timeout_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub write: WriteOptions,
    /// Allow the binary format for collections JSON cannot hold.
    pub binary_fallback: bool,
    /// Extension of the archive file, without the dot.
    pub file_extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            write: WriteOptions::default(),
            binary_fallback: true,
            file_extension: "plist".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(file: &FilePath) -> Result<Self> {
        Self::from_toml_str(&file.string()?)
    }

    /// The codec this configuration describes, with no byte transform.
    pub fn codec(&self) -> ArchiveCodec {
        if self.binary_fallback {
            ArchiveCodec::default()
        } else {
            ArchiveCodec::json_only()
        }
    }
}

//! Error types for pathkit-store

use pathkit_fs::Location;

/// Result type for pathkit-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving a persisted collection
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The archive file could not be encoded or decoded
    #[error("Archive {location}: {source}")]
    Archive {
        location: Location,
        #[source]
        source: pathkit_archive::Error,
    },

    /// Store configuration could not be parsed
    #[error("Invalid store configuration: {0}")]
    Config(#[from] toml::de::Error),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from pathkit-fs
    #[error(transparent)]
    Fs(#[from] pathkit_fs::Error),

    /// Archive error from pathkit-archive, not tied to a file
    #[error(transparent)]
    Codec(#[from] pathkit_archive::Error),
}

impl Error {
    pub(crate) fn archive(location: &Location, source: pathkit_archive::Error) -> Self {
        Self::Archive {
            location: location.clone(),
            source,
        }
    }
}

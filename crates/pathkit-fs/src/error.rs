//! Error types for pathkit-fs

use crate::{Kind, Location};

/// Result type for pathkit-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pathkit-fs operations.
///
/// Every variant carries the location the operation was attempted on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Nothing exists at {location}")]
    NotFound { location: Location },

    #[error("An item already exists at {location}")]
    AlreadyExists { location: Location },

    #[error("Expected a {expected} at {location} but found a {found}")]
    WrongKind {
        location: Location,
        expected: Kind,
        found: Kind,
    },

    #[error("Link destination {location} does not exist")]
    DestinationMissing { location: Location },

    #[error("Link destination {location} is a directory")]
    DestinationIsDirectory { location: Location },

    #[error("Item at {location} still exists after deletion")]
    StillExists { location: Location },

    #[error("Invalid entry name {name:?} under {location}")]
    InvalidName { location: Location, name: String },

    #[error("Lock acquisition failed for {location}")]
    LockFailed { location: Location },

    #[error("I/O error at {location}: {source}")]
    Io {
        location: Location,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(location: impl Into<Location>, source: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }

    /// Map an OS error onto the taxonomy, keeping `NotFound` and
    /// `AlreadyExists` distinguishable from other I/O failures.
    pub fn from_os(location: impl Into<Location>, source: std::io::Error) -> Self {
        let location = location.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { location },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { location },
            _ => Self::Io { location, source },
        }
    }

    /// The location the failed operation targeted.
    pub fn location(&self) -> &Location {
        match self {
            Self::NotFound { location }
            | Self::AlreadyExists { location }
            | Self::WrongKind { location, .. }
            | Self::DestinationMissing { location }
            | Self::DestinationIsDirectory { location }
            | Self::StillExists { location }
            | Self::InvalidName { location, .. }
            | Self::LockFailed { location }
            | Self::Io { location, .. } => location,
        }
    }
}

//! Error types for pathkit-archive

/// Result type for pathkit-archive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or archiving values
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tree root cannot stand alone as an archive
    #[error("Invalid archive root: {reason}")]
    InvalidRoot { reason: String },

    /// Mapping keys in a native tree must be strings
    #[error("Mapping key must be a string, found {found}")]
    NonStringKey { found: String },

    /// A format could not represent the tree
    #[error("Failed to encode as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    /// The tree does not have the shape the target type expects
    #[error("Failed to decode native tree: {message}")]
    Decode { message: String },

    /// The bytes matched none of the configured formats
    #[error("Archive matches no known format ({})", .attempts.join("; "))]
    DecodeCorrupt { attempts: Vec<String> },
}

impl Error {
    pub fn encode(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }
}

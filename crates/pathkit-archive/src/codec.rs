//! Native trees to archive bytes and back
//!
//! Encoding tries each configured format in order and keeps the first that
//! can represent the tree, then encrypts the result. Decoding has no header
//! to go on, so it tries, in order:
//!
//! 1. the bytes as stored, through the primary format only (plain archives
//!    written before a transform was configured), then
//! 2. the decrypted bytes, through each format.
//!
//! Probing ciphertext with the binary format could misread it, so the first
//! pass never does. With the identity transform the first pass is skipped.

use crate::format::{ArchiveFormat, JsonFormat};
use crate::transform::{ByteTransform, Identity};
use crate::{DecodeContext, Error, NativeDecoder, NativeEncoder, NativeValue, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Converts between native trees and the bytes of an archive file.
#[derive(Debug, Clone)]
pub struct ArchiveCodec {
    formats: Vec<Arc<dyn ArchiveFormat>>,
    transform: Arc<dyn ByteTransform>,
}

impl Default for ArchiveCodec {
    /// JSON, then the binary format when that feature is enabled; no
    /// encryption.
    fn default() -> Self {
        let codec = Self::json_only();
        #[cfg(feature = "binary-fallback")]
        let codec = codec.with_format(crate::format::BinaryFormat);
        codec
    }
}

impl ArchiveCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json_only() -> Self {
        Self {
            formats: vec![Arc::new(JsonFormat)],
            transform: Arc::new(Identity),
        }
    }

    /// Append a format to try after the ones already configured.
    pub fn with_format(mut self, format: impl ArchiveFormat + 'static) -> Self {
        self.formats.push(Arc::new(format));
        self
    }

    pub fn with_transform(mut self, transform: impl ByteTransform + 'static) -> Self {
        self.transform = Arc::new(transform);
        self
    }

    pub fn format_names(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.name()).collect()
    }

    /// Serialize and encrypt `tree`.
    ///
    /// If no format can represent the tree, the first format's error is
    /// returned.
    pub fn data(&self, tree: &NativeValue) -> Result<Vec<u8>> {
        if !tree.is_container() {
            return Err(Error::InvalidRoot {
                reason: format!("archive root is a bare {}", tree.type_name()),
            });
        }

        let mut first_error = None;
        for format in &self.formats {
            match format.encode(tree) {
                Ok(bytes) => {
                    tracing::debug!(format = format.name(), len = bytes.len(), "Encoded archive");
                    return Ok(self.transform.encrypt(bytes));
                }
                Err(e) => {
                    tracing::debug!(
                        format = format.name(),
                        error = %e,
                        "Format cannot encode tree"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error.unwrap_or_else(|| Error::encode("archive", "no formats configured")))
    }

    /// Decrypt and deserialize archive bytes.
    pub fn object(&self, bytes: &[u8]) -> Result<NativeValue> {
        let mut attempts = Vec::new();

        if !self.transform.is_identity() {
            let primary = &self.formats[..self.formats.len().min(1)];
            if let Some(tree) = Self::try_formats(primary, bytes, "raw", &mut attempts) {
                return Ok(tree);
            }
        }

        let decrypted = self.transform.decrypt(bytes.to_vec());
        let found = Self::try_formats(&self.formats, &decrypted, "decrypted", &mut attempts);
        if let Some(tree) = found {
            return Ok(tree);
        }

        tracing::warn!(len = bytes.len(), attempts = attempts.len(), "Archive matches no format");
        Err(Error::DecodeCorrupt { attempts })
    }

    fn try_formats(
        formats: &[Arc<dyn ArchiveFormat>],
        bytes: &[u8],
        pass: &str,
        attempts: &mut Vec<String>,
    ) -> Option<NativeValue> {
        for format in formats {
            let result = format.decode(bytes).and_then(|tree| {
                if tree.is_container() {
                    Ok(tree)
                } else {
                    Err(Error::InvalidRoot {
                        reason: format!("archive root is a bare {}", tree.type_name()),
                    })
                }
            });

            match result {
                Ok(tree) => {
                    tracing::debug!(format = format.name(), pass, "Decoded archive");
                    return Some(tree);
                }
                Err(e) => {
                    tracing::debug!(
                        format = format.name(),
                        pass,
                        error = %e,
                        "Decode attempt failed"
                    );
                    attempts.push(format!("{pass} {}: {e}", format.name()));
                }
            }
        }
        None
    }

    /// Encode a typed value all the way to archive bytes.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.data(&NativeEncoder.encode(value)?)
    }

    /// Decode archive bytes all the way to a typed value.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8], context: DecodeContext) -> Result<T> {
        NativeDecoder::with_context(context).decode(&self.object(bytes)?)
    }
}

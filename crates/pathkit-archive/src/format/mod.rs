//! On-disk representations of a native tree
//!
//! An archive carries no header naming its format. Readers find the format
//! by trying each [`ArchiveFormat`] in order until one accepts the bytes.

mod json;
pub use json::JsonFormat;

#[cfg(feature = "binary-fallback")]
mod binary;
#[cfg(feature = "binary-fallback")]
pub use binary::BinaryFormat;

use crate::{NativeValue, Result};

/// One way of turning a native tree into bytes and back.
pub trait ArchiveFormat: Send + Sync + std::fmt::Debug {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn encode(&self, tree: &NativeValue) -> Result<Vec<u8>>;

    /// Decode `bytes`, failing if anything but the one value is present.
    fn decode(&self, bytes: &[u8]) -> Result<NativeValue>;
}

//! Native value trees and the archive codec for pathkit
//!
//! Values travel `T` ⇄ [`NativeValue`] ⇄ bytes. [`NativeEncoder`] and
//! [`NativeDecoder`] handle the first step through serde, and
//! [`ArchiveCodec`] the second, choosing a format and applying an optional
//! [`ByteTransform`] such as encryption.

mod codec;
mod context;
mod encoder;
mod error;
pub mod format;
mod native;
mod transform;

pub use codec::ArchiveCodec;
pub use context::{DecodeContext, Origin, Purpose};
pub use encoder::{NativeDecoder, NativeEncoder};
pub use error::{Error, Result};
pub use format::{ArchiveFormat, JsonFormat};
#[cfg(feature = "binary-fallback")]
pub use format::BinaryFormat;
pub use native::NativeValue;
pub use transform::{ByteTransform, FnTransform, Identity};

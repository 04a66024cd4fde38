//! Typed values to native trees and back

use crate::{DecodeContext, Error, NativeValue, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Converts serde-serializable values to native trees.
///
/// The root of every produced tree is a sequence or a mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEncoder;

impl NativeEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<NativeValue> {
        let wire = ciborium::Value::serialized(value).map_err(|e| Error::encode("native", e))?;
        let tree = NativeValue::try_from(wire)?;

        if !tree.is_container() {
            return Err(Error::InvalidRoot {
                reason: format!("encoded root is a bare {}", tree.type_name()),
            });
        }
        Ok(tree)
    }
}

/// Converts native trees back into typed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDecoder {
    context: DecodeContext,
}

impl NativeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: DecodeContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> DecodeContext {
        self.context
    }

    /// Decode `tree` into `T`, with this decoder's context visible to
    /// `T`'s `Deserialize` impl through [`DecodeContext::current`].
    pub fn decode<T: DeserializeOwned>(&self, tree: &NativeValue) -> Result<T> {
        if tree.is_null() {
            return Err(Error::InvalidRoot {
                reason: "root is null".to_string(),
            });
        }

        let wire = ciborium::Value::from(tree);
        let _context = self.context.enter();
        wire.deserialized().map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }
}

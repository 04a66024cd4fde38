use super::ArchiveFormat;
use crate::{Error, NativeValue, Result};

/// CBOR, the fallback for trees JSON cannot represent.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryFormat;

impl ArchiveFormat for BinaryFormat {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn encode(&self, tree: &NativeValue) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(&ciborium::Value::from(tree), &mut bytes)
            .map_err(|e| Error::encode("binary", e))?;
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<NativeValue> {
        let mut remaining = bytes;
        let wire: ciborium::Value =
            ciborium::de::from_reader(&mut remaining).map_err(|e| Error::Decode {
                message: format!("binary: {e}"),
            })?;

        if !remaining.is_empty() {
            return Err(Error::Decode {
                message: format!("binary: {} trailing bytes", remaining.len()),
            });
        }
        NativeValue::try_from(wire)
    }
}

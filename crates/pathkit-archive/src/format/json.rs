use super::ArchiveFormat;
use crate::{Error, NativeValue, Result};

/// Pretty-printed JSON. Cannot carry byte strings or non-finite floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ArchiveFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, tree: &NativeValue) -> Result<Vec<u8>> {
        let json = serde_json::Value::try_from(tree)?;
        serde_json::to_vec_pretty(&json).map_err(|e| Error::encode("json", e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<NativeValue> {
        let json: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| Error::Decode {
            message: format!("json: {e}"),
        })?;
        Ok(NativeValue::from(json))
    }
}

//! The serialization-agnostic value tree between typed values and bytes

use crate::{Error, Result};
use ciborium::Value as Wire;
use indexmap::IndexMap;

/// A scalar, a sequence, or a string-keyed mapping.
///
/// Integers that fit `i64` are always `Integer`; `Unsigned` only holds
/// values above `i64::MAX`. Mappings keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<NativeValue>),
    Mapping(IndexMap<String, NativeValue>),
}

impl NativeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Sequences and mappings can be archive roots; scalars cannot.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    pub fn as_sequence(&self) -> Option<&[NativeValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, NativeValue>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&NativeValue> {
        self.as_mapping()?.get(key)
    }

    fn from_integer(value: i128) -> Result<Self> {
        if let Ok(small) = i64::try_from(value) {
            Ok(Self::Integer(small))
        } else if let Ok(large) = u64::try_from(value) {
            Ok(Self::Unsigned(large))
        } else {
            Err(Error::encode("native", format!("integer {value} is out of range")))
        }
    }
}

impl From<&NativeValue> for Wire {
    fn from(value: &NativeValue) -> Self {
        match value {
            NativeValue::Null => Wire::Null,
            NativeValue::Bool(b) => Wire::Bool(*b),
            NativeValue::Integer(i) => Wire::Integer((*i).into()),
            NativeValue::Unsigned(u) => Wire::Integer((*u).into()),
            NativeValue::Float(f) => Wire::Float(*f),
            NativeValue::String(s) => Wire::Text(s.clone()),
            NativeValue::Bytes(b) => Wire::Bytes(b.clone()),
            NativeValue::Sequence(items) => Wire::Array(items.iter().map(Wire::from).collect()),
            NativeValue::Mapping(entries) => Wire::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Wire::Text(k.clone()), Wire::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<Wire> for NativeValue {
    type Error = Error;

    fn try_from(value: Wire) -> Result<Self> {
        Ok(match value {
            Wire::Null => Self::Null,
            Wire::Bool(b) => Self::Bool(b),
            Wire::Integer(i) => Self::from_integer(i128::from(i))?,
            Wire::Float(f) => Self::Float(f),
            Wire::Text(s) => Self::String(s),
            Wire::Bytes(b) => Self::Bytes(b),
            Wire::Tag(_, inner) => Self::try_from(*inner)?,
            Wire::Array(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_>>()?,
            ),
            Wire::Map(entries) => {
                let mut mapping = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    let Wire::Text(key) = key else {
                        return Err(Error::NonStringKey {
                            found: format!("{key:?}"),
                        });
                    };
                    mapping.insert(key, Self::try_from(value)?);
                }
                Self::Mapping(mapping)
            }
            other => {
                return Err(Error::encode("native", format!("unsupported value {other:?}")));
            }
        })
    }
}

impl TryFrom<&NativeValue> for serde_json::Value {
    type Error = Error;

    /// JSON has no byte strings and no non-finite floats.
    fn try_from(value: &NativeValue) -> Result<Self> {
        use serde_json::Value as Json;

        Ok(match value {
            NativeValue::Null => Json::Null,
            NativeValue::Bool(b) => Json::Bool(*b),
            NativeValue::Integer(i) => Json::from(*i),
            NativeValue::Unsigned(u) => Json::from(*u),
            NativeValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .ok_or_else(|| Error::encode("json", format!("non-finite float {f}")))?,
            NativeValue::String(s) => Json::String(s.clone()),
            NativeValue::Bytes(b) => {
                return Err(Error::encode(
                    "json",
                    format!("{} bytes of binary data", b.len()),
                ));
            }
            NativeValue::Sequence(items) => Json::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            NativeValue::Mapping(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    object.insert(key.clone(), serde_json::Value::try_from(value)?);
                }
                Json::Object(object)
            }
        })
    }
}

impl From<serde_json::Value> for NativeValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Unsigned(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Self::String(s),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Json::Object(entries) => {
                Self::Mapping(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_prefer_signed_representation() {
        let small = NativeValue::try_from(Wire::Integer(7u64.into())).unwrap();
        let large = NativeValue::try_from(Wire::Integer(u64::MAX.into())).unwrap();

        assert_eq!(small, NativeValue::Integer(7));
        assert_eq!(large, NativeValue::Unsigned(u64::MAX));
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let wire = Wire::Map(vec![(Wire::Integer(1.into()), Wire::Null)]);

        let err = NativeValue::try_from(wire).unwrap_err();

        assert!(matches!(err, Error::NonStringKey { .. }));
    }

    #[test]
    fn json_conversion_rejects_bytes_and_non_finite_floats() {
        let bytes = NativeValue::Sequence(vec![NativeValue::Bytes(vec![1, 2])]);
        let infinite = NativeValue::Sequence(vec![NativeValue::Float(f64::INFINITY)]);

        assert!(serde_json::Value::try_from(&bytes).is_err());
        assert!(serde_json::Value::try_from(&infinite).is_err());
    }

    #[test]
    fn mapping_order_survives_json() {
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), NativeValue::Integer(1));
        entries.insert("alpha".to_string(), NativeValue::Integer(2));
        let tree = NativeValue::Mapping(entries);

        let json = serde_json::Value::try_from(&tree).unwrap();
        let back = NativeValue::from(json);

        let keys: Vec<_> = back.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}

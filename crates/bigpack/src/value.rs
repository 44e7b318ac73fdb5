//! [`Value`] — the in-memory data model carried through the codec.

use crate::Extension;

/// Tree of values the codec can carry through the MessagePack wire format.
///
/// The set is closed on purpose: every consumer matches exhaustively, so a
/// new variant cannot silently fall through an encoder or the transform.
///
/// - `Number` is a host double and subject to float64 precision rules.
/// - `BigInt` carries integers whose magnitude may exceed the float64 safe
///   range (±2^53); the wire contract is 64 bits, see [`crate::int64`].
/// - `Object` keeps ordered key-value pairs; insertion order is preserved
///   on encode and key uniqueness is the caller's responsibility.
/// - `Extension` is the wire-level escape hatch. It only appears in host
///   trees transiently (a decoded foreign extension, or one the caller
///   constructed deliberately).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// MessagePack nil / JSON null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Host-native double-precision number.
    Number(f64),
    /// Wide integer, preserved exactly through encode/decode.
    BigInt(i128),
    /// UTF-8 string.
    Str(String),
    /// Binary data (MessagePack bin family).
    Bytes(Vec<u8>),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Ordered key-value pairs.
    Object(Vec<(String, Value)>),
    /// MessagePack extension (tag + opaque payload).
    Extension(Box<Extension>),
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i.unsigned_abs() > MAX_SAFE_INTEGER {
                        Value::BigInt(i as i128)
                    } else {
                        Value::Number(i as f64)
                    }
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(u as i128)
                } else {
                    Value::Number(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(f) => serde_json::json!(f),
            Value::BigInt(i) => {
                // serde_json numbers cap at the i64/u64 ranges; wider
                // integers fall back to their decimal string.
                if let Ok(v) = i64::try_from(i) {
                    serde_json::json!(v)
                } else if let Ok(v) = u64::try_from(i) {
                    serde_json::json!(v)
                } else {
                    serde_json::Value::String(i.to_string())
                }
            }
            Value::Str(s) => serde_json::Value::String(s),
            Value::Bytes(b) => {
                use base64::Engine;
                let b64 = base64::engine::general_purpose::STANDARD.encode(&b);
                serde_json::Value::String(format!("data:application/octet-stream;base64,{}", b64))
            }
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Extension(_) => serde_json::Value::Null,
        }
    }
}

/// Largest integer a float64 can represent without precision loss (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

#[cfg(test)]
mod tests {
    use super::{Value, MAX_SAFE_INTEGER};
    use serde_json::json;

    #[test]
    fn json_integers_within_safe_range_become_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Number(42.0));
        assert_eq!(Value::from(json!(-7)), Value::Number(-7.0));
        assert_eq!(
            Value::from(json!(MAX_SAFE_INTEGER)),
            Value::Number(MAX_SAFE_INTEGER as f64)
        );
    }

    #[test]
    fn json_integers_beyond_safe_range_become_big_ints() {
        assert_eq!(
            Value::from(json!(u64::MAX)),
            Value::BigInt(u64::MAX as i128)
        );
        assert_eq!(Value::from(json!(i64::MIN)), Value::BigInt(i64::MIN as i128));
    }

    #[test]
    fn big_ints_convert_to_json_without_panicking() {
        // Within the u64/i64 ranges: numbers.
        let v: serde_json::Value = Value::BigInt(u64::MAX as i128).into();
        assert_eq!(v, json!(u64::MAX));
        let v: serde_json::Value = Value::BigInt(i64::MIN as i128).into();
        assert_eq!(v, json!(i64::MIN));
        // Beyond 64 bits: decimal strings, never a panic.
        let wide = u64::MAX as i128 + 1;
        let v: serde_json::Value = Value::BigInt(wide).into();
        assert_eq!(v, json!("18446744073709551616"));
        let v: serde_json::Value = Value::BigInt(-wide).into();
        assert_eq!(v, json!("-18446744073709551616"));
    }

    #[test]
    fn object_order_survives_json_conversion() {
        let v = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        if let Value::Object(pairs) = v {
            let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
            assert_eq!(keys, ["z", "a", "m"]);
        } else {
            panic!("expected object");
        }
    }
}

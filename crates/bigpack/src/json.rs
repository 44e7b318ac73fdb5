//! Deterministic JSON stringifier for [`Value`] trees.
//!
//! Independent of the wire layer and the tree transform: JSON has no
//! extension concept, so `BigInt` leaves are rendered directly as bare
//! decimal number tokens. That is a deliberate deviation from strict JSON
//! (which cannot carry integers beyond float64 precision); consumers that
//! need strict JSON must post-process. Output carries no whitespace and
//! preserves object pair order, so equal trees produce identical text.

use base64::Engine;

use crate::Value;

/// `data:application/octet-stream;base64,` prefix for binary payloads.
const BIN_URI_PREFIX: &str = "\"data:application/octet-stream;base64,";

/// Renders `value` as deterministic JSON text.
pub fn encode_json(value: &Value) -> String {
    let mut encoder = JsonEncoder::new();
    encoder.encode(value)
}

pub struct JsonEncoder {
    out: String,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    pub fn encode(&mut self, value: &Value) -> String {
        self.out.clear();
        self.write_any(value);
        std::mem::take(&mut self.out)
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(f) => self.write_number(*f),
            Value::BigInt(int) => self.write_big_int(*int),
            Value::Str(s) => self.write_str(s),
            Value::Bytes(b) => self.write_bin(b),
            Value::Array(arr) => self.write_arr(arr),
            Value::Object(obj) => self.write_obj(obj),
            // No JSON representation; same fallback as the standard
            // stringifier applied to an opaque value.
            Value::Extension(_) => self.out.push_str("null"),
        }
    }

    fn write_number(&mut self, num: f64) {
        if num.is_nan() || num.is_infinite() {
            // JSON.stringify renders non-finite numbers as null.
            self.out.push_str("null");
        } else if num.fract() == 0.0 && num.abs() < 1e15 {
            self.out.push_str(&(num as i64).to_string());
        } else {
            // Shortest round-trip float representation.
            self.out.push_str(&num.to_string());
        }
    }

    /// Bare decimal token, never quoted, full digit string.
    fn write_big_int(&mut self, int: i128) {
        self.out.push_str(&int.to_string());
    }

    fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();

        // Fast path: printable ASCII with no quotes or backslashes.
        let plain = bytes
            .iter()
            .all(|&b| (32..=126).contains(&b) && b != b'"' && b != b'\\');
        if plain {
            self.out.push('"');
            self.out.push_str(s);
            self.out.push('"');
            return;
        }

        // Fall back to serde_json for proper escaping.
        let escaped = serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string());
        self.out.push_str(&escaped);
    }

    /// Binary data as a data-URI JSON string.
    fn write_bin(&mut self, buf: &[u8]) {
        let b64 = base64::engine::general_purpose::STANDARD.encode(buf);
        self.out.push_str(BIN_URI_PREFIX);
        self.out.push_str(&b64);
        self.out.push('"');
    }

    fn write_arr(&mut self, arr: &[Value]) {
        self.out.push('[');
        let last = arr.len().saturating_sub(1);
        for (i, item) in arr.iter().enumerate() {
            self.write_any(item);
            if i < last {
                self.out.push(',');
            }
        }
        self.out.push(']');
    }

    fn write_obj(&mut self, obj: &[(String, Value)]) {
        self.out.push('{');
        let last = obj.len().saturating_sub(1);
        for (i, (key, val)) in obj.iter().enumerate() {
            self.write_str(key);
            self.out.push(':');
            self.write_any(val);
            if i < last {
                self.out.push(',');
            }
        }
        self.out.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::encode_json;
    use crate::{Extension, Value};

    fn obj(fields: &[(&str, Value)]) -> Value {
        Value::Object(
            fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn primitives() {
        assert_eq!(encode_json(&Value::Null), "null");
        assert_eq!(encode_json(&Value::Bool(true)), "true");
        assert_eq!(encode_json(&Value::Bool(false)), "false");
        assert_eq!(encode_json(&Value::Number(42.0)), "42");
        assert_eq!(encode_json(&Value::Number(-7.0)), "-7");
        assert_eq!(encode_json(&Value::Number(1.5)), "1.5");
        assert_eq!(encode_json(&Value::Str("hello".into())), "\"hello\"");
    }

    #[test]
    fn object_preserves_insertion_order_without_whitespace() {
        let v = obj(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]);
        assert_eq!(encode_json(&v), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn big_int_is_a_bare_token() {
        let v = obj(&[("x", Value::BigInt(12345678901234567890))]);
        assert_eq!(encode_json(&v), r#"{"x":12345678901234567890}"#);
        assert_eq!(encode_json(&Value::BigInt(-5)), "-5");
    }

    #[test]
    fn arrays_keep_order() {
        let v = Value::Array(vec![
            Value::Number(3.0),
            Value::Number(1.0),
            Value::Number(2.0),
        ]);
        assert_eq!(encode_json(&v), "[3,1,2]");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(encode_json(&Value::Str("a\"b".into())), r#""a\"b""#);
        assert_eq!(encode_json(&Value::Str("a\nb".into())), r#""a\nb""#);
        let v = obj(&[("k\\ey", Value::Null)]);
        assert_eq!(encode_json(&v), r#"{"k\\ey":null}"#);
    }

    #[test]
    fn non_finite_numbers_render_as_null() {
        assert_eq!(encode_json(&Value::Number(f64::NAN)), "null");
        assert_eq!(encode_json(&Value::Number(f64::INFINITY)), "null");
    }

    #[test]
    fn empty_compounds() {
        assert_eq!(encode_json(&Value::Array(vec![])), "[]");
        assert_eq!(encode_json(&Value::Object(vec![])), "{}");
    }

    #[test]
    fn bytes_render_as_data_uri() {
        let s = encode_json(&Value::Bytes(vec![1, 2, 3]));
        assert!(s.starts_with("\"data:application/octet-stream;base64,"));
        assert!(s.ends_with('"'));
    }

    #[test]
    fn extensions_fall_back_to_null() {
        let v = Value::Extension(Box::new(Extension::new(0x42, vec![1])));
        assert_eq!(encode_json(&v), "null");
    }
}

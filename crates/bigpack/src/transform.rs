//! Structure-preserving tree transform.
//!
//! The codec façade runs the same recursive walk in both directions: on
//! encode it rewrites `BigInt` leaves into wide-integer extensions, on
//! decode it rewrites those extensions back. The walk itself never changes
//! shape — array order, object pair order and nesting come out exactly as
//! they went in — and never mutates its input.

use crate::error::CodecError;
use crate::{Extension, Value};

/// Leaf hooks for [`transform`]. Both default to identity.
pub trait TransformHandlers {
    fn on_big_int(&self, int: i128) -> Result<Value, CodecError> {
        Ok(Value::BigInt(int))
    }

    fn on_special(&self, ext: &Extension) -> Result<Value, CodecError> {
        Ok(Value::Extension(Box::new(ext.clone())))
    }
}

/// Identity handlers, for walks that only need a structural copy.
pub struct Identity;

impl TransformHandlers for Identity {}

/// Rebuilds `value` with every `BigInt` and `Extension` leaf passed
/// through the handlers. Primitive leaves are cloned unchanged.
pub fn transform<H: TransformHandlers>(value: &Value, handlers: &H) -> Result<Value, CodecError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Number(f) => Ok(Value::Number(*f)),
        Value::Str(s) => Ok(Value::Str(s.clone())),
        Value::Bytes(b) => Ok(Value::Bytes(b.clone())),
        Value::BigInt(int) => handlers.on_big_int(*int),
        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for item in arr {
                out.push(transform(item, handlers)?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(obj) => {
            let mut out = Vec::with_capacity(obj.len());
            for (key, val) in obj {
                out.push((key.clone(), transform(val, handlers)?));
            }
            Ok(Value::Object(out))
        }
        Value::Extension(ext) => handlers.on_special(ext),
    }
}

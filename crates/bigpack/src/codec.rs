//! Codec façade: `encode`, `decode` and the options bag.
//!
//! Composes the tree transform with the MessagePack wire layer. The
//! wide-integer extension handling is wired in here unconditionally — it
//! is part of the codec's identity, not an option, so no caller can
//! accidentally disable it and corrupt round-tripping.

use crate::error::CodecError;
use crate::int64;
use crate::msgpack::{MsgPackDecoder, MsgPackEncoder};
use crate::transform::{transform, TransformHandlers};
use crate::{Extension, Value};

/// Options forwarded to the wire layer. Everything defaults to off.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Encode object keys in lexicographic order instead of insertion
    /// order, for byte-stable output across writers.
    pub sort_keys: bool,
    /// Fail `decode` on extension tags outside the reserved wide-integer
    /// set instead of passing them through unchanged.
    pub reject_foreign_extensions: bool,
}

/// Rewrites `BigInt` leaves into wide-integer extensions.
struct WidenBigInts;

impl TransformHandlers for WidenBigInts {
    fn on_big_int(&self, int: i128) -> Result<Value, CodecError> {
        let ext = int64::encode_big_int(int)?;
        Ok(Value::Extension(Box::new(ext)))
    }
}

/// Folds wide-integer extensions back into `BigInt` leaves.
struct NarrowInt64s {
    reject_foreign: bool,
}

impl TransformHandlers for NarrowInt64s {
    fn on_special(&self, ext: &Extension) -> Result<Value, CodecError> {
        if int64::is_int64(ext) {
            return Ok(Value::BigInt(int64::decode_extension(ext)?));
        }
        if self.reject_foreign {
            return Err(CodecError::ForeignExtension { tag: ext.tag });
        }
        Ok(Value::Extension(Box::new(ext.clone())))
    }
}

/// Encodes a value tree to MessagePack bytes with default options.
pub fn encode(value: &Value) -> Result<Vec<u8>, CodecError> {
    encode_with(value, &CodecOptions::default())
}

/// Encodes a value tree to MessagePack bytes.
pub fn encode_with(value: &Value, options: &CodecOptions) -> Result<Vec<u8>, CodecError> {
    let widened = transform(value, &WidenBigInts)?;
    let mut encoder = MsgPackEncoder::with_sort_keys(options.sort_keys);
    Ok(encoder.encode(&widened)?)
}

/// Decodes MessagePack bytes into a value tree with default options.
pub fn decode(data: &[u8]) -> Result<Value, CodecError> {
    decode_with(data, &CodecOptions::default())
}

/// Decodes MessagePack bytes into a value tree.
pub fn decode_with(data: &[u8], options: &CodecOptions) -> Result<Value, CodecError> {
    let mut decoder = MsgPackDecoder::new();
    let raw = decoder.decode(data)?;
    transform(
        &raw,
        &NarrowInt64s {
            reject_foreign: options.reject_foreign_extensions,
        },
    )
}

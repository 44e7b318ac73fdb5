//! MessagePack codec that carries wide integers losslessly.
//!
//! Standard MessagePack caps integers at 64 bits and many hosts cap them
//! at float64 precision (±2^53). This crate round-trips the full 64-bit
//! range exactly by carrying [`Value::BigInt`] leaves as MessagePack
//! extensions with reserved tags (see [`int64`]), while all other types
//! use standard framing, so the output stays readable by any MessagePack
//! decoder that honors the int64 extension convention.
//!
//! Entry points:
//! - [`encode`] / [`encode_with`] — value tree to bytes
//! - [`decode`] / [`decode_with`] — bytes to value tree
//! - [`encode_json`] — deterministic JSON text, with big integers emitted
//!   as bare number tokens

mod codec;
mod error;
mod ext;
mod json;
mod transform;
mod value;

pub mod int64;
pub mod msgpack;

pub use codec::{decode, decode_with, encode, encode_with, CodecOptions};
pub use error::CodecError;
pub use ext::Extension;
pub use json::{encode_json, JsonEncoder};
pub use transform::{transform, Identity, TransformHandlers};
pub use value::{Value, MAX_SAFE_INTEGER};

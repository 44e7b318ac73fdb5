//! MessagePack wire-layer errors.

use thiserror::Error;

/// Malformed wire data, reported by [`MsgPackDecoder`](super::MsgPackDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsgPackError {
    /// Input ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// An unknown or reserved marker byte at the given offset.
    #[error("invalid marker byte at offset {0}")]
    InvalidByte(usize),
    /// A forbidden object key (`__proto__`).
    #[error("forbidden object key")]
    InvalidKey,
    /// A map key that is not a string.
    #[error("expected string key")]
    NotStr,
}

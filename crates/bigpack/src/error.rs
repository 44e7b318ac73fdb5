//! Top-level error type for the codec façade.

use thiserror::Error;

use crate::int64::Int64Error;
use crate::msgpack::MsgPackError;

/// Any failure an `encode`/`decode` call can surface.
///
/// All errors are synchronous and leave no partial state behind; a failed
/// call produces no bytes and no tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Wide-integer encode/decode failure (out-of-range value or a
    /// reserved tag with a malformed payload).
    #[error(transparent)]
    Int64(#[from] Int64Error),
    /// Malformed wire data reported by the MessagePack decoder.
    #[error(transparent)]
    Wire(#[from] MsgPackError),
    /// A non-reserved extension tag was decoded while
    /// [`CodecOptions::reject_foreign_extensions`](crate::CodecOptions)
    /// was set.
    #[error("foreign extension tag 0x{tag:02x} in input")]
    ForeignExtension { tag: i8 },
}

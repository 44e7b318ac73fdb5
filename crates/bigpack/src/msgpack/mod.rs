//! MessagePack wire layer: marker-level encoder and decoder.
//!
//! This is the "underlying binary serializer" the codec façade composes
//! with the tree transform. It speaks standard MessagePack framing for all
//! primitive and compound types; wide integers travel as extensions with
//! the reserved tags in [`crate::int64`].

mod decoder;
mod encoder;
mod error;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

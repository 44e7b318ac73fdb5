//! Binary buffer primitives for the bigpack codec.

mod writer;

pub use writer::Writer;

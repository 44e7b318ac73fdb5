//! [`Extension`] — MessagePack extension value (type tag + opaque payload).

/// A MessagePack extension: a small integer type tag plus a byte payload.
///
/// The decoder surfaces every wire extension as an `Extension`; the codec
/// façade then folds the reserved wide-integer tags back into
/// [`Value::BigInt`](crate::Value::BigInt) and leaves everything else for
/// the caller to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type tag (application range is 0..=127).
    pub tag: i8,
    /// Opaque payload bytes.
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(tag: i8, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}

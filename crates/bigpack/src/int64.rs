//! Wide-integer extension codec.
//!
//! Maps [`Value::BigInt`](crate::Value::BigInt) to a MessagePack extension
//! carrying a fixed 8-byte integer payload, and back. Four extension tags
//! are reserved, one per signedness/endianness combination. This build
//! always emits big-endian; the little-endian tags are accepted on decode
//! for interop with writers that chose the other byte order.

use thiserror::Error;

use crate::Extension;

/// Signed 64-bit integer, big-endian two's complement payload.
pub const INT64_BE: i8 = 0x01;
/// Unsigned 64-bit integer, big-endian payload.
pub const UINT64_BE: i8 = 0x02;
/// Signed 64-bit integer, little-endian two's complement payload.
pub const INT64_LE: i8 = 0x03;
/// Unsigned 64-bit integer, little-endian payload.
pub const UINT64_LE: i8 = 0x04;

/// Exact payload size for every reserved wide-integer tag.
pub const INT64_PAYLOAD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Int64Error {
    /// The integer does not fit the 64-bit wire contract.
    #[error("big integer {0} does not fit the 64-bit wire encoding")]
    OutOfRange(i128),
    /// A reserved tag arrived with a payload of the wrong size.
    #[error("int64 extension tag 0x{tag:02x} carries {len} payload bytes, expected 8")]
    PayloadLength { tag: i8, len: usize },
    /// [`decode_extension`] was called with a tag outside the reserved set.
    #[error("extension tag 0x{0:02x} is not a wide-integer tag")]
    UnknownTag(i8),
}

/// True iff `ext` carries one of the four reserved wide-integer tags.
pub fn is_int64(ext: &Extension) -> bool {
    matches!(ext.tag, INT64_BE | UINT64_BE | INT64_LE | UINT64_LE)
}

/// Encodes a wide integer as an extension value.
///
/// Negative integers use the signed layout, non-negative integers the
/// unsigned one, so the full `[-2^63, 2^64)` range is representable in
/// 8 bytes. Anything outside that range is an error rather than a silent
/// truncation.
pub fn encode_big_int(int: i128) -> Result<Extension, Int64Error> {
    if int < 0 {
        let v = i64::try_from(int).map_err(|_| Int64Error::OutOfRange(int))?;
        Ok(Extension::new(INT64_BE, v.to_be_bytes().to_vec()))
    } else {
        let v = u64::try_from(int).map_err(|_| Int64Error::OutOfRange(int))?;
        Ok(Extension::new(UINT64_BE, v.to_be_bytes().to_vec()))
    }
}

/// Decodes a reserved wide-integer extension back to the exact integer.
///
/// Non-reserved tags are rejected as [`Int64Error::UnknownTag`], reserved
/// tags with the wrong payload size as [`Int64Error::PayloadLength`]. The
/// conversion is pure integer arithmetic, never a float intermediate.
pub fn decode_extension(ext: &Extension) -> Result<i128, Int64Error> {
    if !is_int64(ext) {
        return Err(Int64Error::UnknownTag(ext.tag));
    }
    let bytes: [u8; INT64_PAYLOAD_LEN] =
        ext.data
            .as_slice()
            .try_into()
            .map_err(|_| Int64Error::PayloadLength {
                tag: ext.tag,
                len: ext.data.len(),
            })?;
    let int = match ext.tag {
        INT64_BE => i64::from_be_bytes(bytes) as i128,
        UINT64_BE => u64::from_be_bytes(bytes) as i128,
        INT64_LE => i64::from_le_bytes(bytes) as i128,
        UINT64_LE => u64::from_le_bytes(bytes) as i128,
        _ => unreachable!("gated by is_int64"),
    };
    Ok(int)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_selects_the_tag() {
        let neg = encode_big_int(-1).unwrap();
        let pos = encode_big_int(1).unwrap();
        assert_eq!(neg.tag, INT64_BE);
        assert_eq!(pos.tag, UINT64_BE);
        assert_ne!(neg.tag, pos.tag);
        assert_eq!(decode_extension(&neg).unwrap(), -1);
        assert_eq!(decode_extension(&pos).unwrap(), 1);
    }

    #[test]
    fn boundary_values_roundtrip_exactly() {
        for int in [
            i64::MAX as i128,
            i64::MIN as i128,
            u64::MAX as i128,
            (1i128 << 53) - 1,
            1i128 << 53,
            -(1i128 << 53),
            0,
        ] {
            let ext = encode_big_int(int).unwrap();
            assert_eq!(ext.data.len(), INT64_PAYLOAD_LEN);
            assert!(is_int64(&ext));
            assert_eq!(decode_extension(&ext).unwrap(), int, "value {int}");
        }
    }

    #[test]
    fn negative_payload_is_twos_complement() {
        let ext = encode_big_int(-1).unwrap();
        assert_eq!(ext.data, vec![0xff; 8]);
        let ext = encode_big_int(i64::MIN as i128).unwrap();
        assert_eq!(ext.data, vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn little_endian_tags_decode() {
        let ext = Extension::new(UINT64_LE, 258u64.to_le_bytes().to_vec());
        assert_eq!(decode_extension(&ext).unwrap(), 258);
        let ext = Extension::new(INT64_LE, (-42i64).to_le_bytes().to_vec());
        assert_eq!(decode_extension(&ext).unwrap(), -42);
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        assert_eq!(
            encode_big_int(u64::MAX as i128 + 1),
            Err(Int64Error::OutOfRange(u64::MAX as i128 + 1))
        );
        assert_eq!(
            encode_big_int(i64::MIN as i128 - 1),
            Err(Int64Error::OutOfRange(i64::MIN as i128 - 1))
        );
    }

    #[test]
    fn wrong_payload_length_is_rejected() {
        let ext = Extension::new(INT64_BE, vec![0x01, 0x02]);
        assert_eq!(
            decode_extension(&ext),
            Err(Int64Error::PayloadLength {
                tag: INT64_BE,
                len: 2
            })
        );
    }

    #[test]
    fn unknown_tags_are_rejected_as_unknown() {
        // Even with a plausible 8-byte payload, a tag outside the
        // reserved set must not decode and must not be reported as a
        // payload-length problem.
        let ext = Extension::new(0x10, vec![0; 8]);
        assert_eq!(decode_extension(&ext), Err(Int64Error::UnknownTag(0x10)));
        let ext = Extension::new(-1, vec![0x01, 0x02]);
        assert_eq!(decode_extension(&ext), Err(Int64Error::UnknownTag(-1)));
    }

    #[test]
    fn foreign_tags_are_not_int64() {
        assert!(!is_int64(&Extension::new(0x10, vec![0; 8])));
        assert!(!is_int64(&Extension::new(0, vec![0; 8])));
    }
}

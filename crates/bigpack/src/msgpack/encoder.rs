//! [`MsgPackEncoder`] — MessagePack wire encoder.

use bigpack_buffers::Writer;

use crate::int64::{self, Int64Error};
use crate::{Extension, Value};

/// Encodes a [`Value`] tree into MessagePack bytes.
///
/// Integral doubles in the 32-bit range take the compact int markers;
/// everything else numeric is written as float64, which round-trips every
/// `f64` exactly. `BigInt` leaves are written through the wide-integer
/// extension codec, never as a lossy float, which is why encoding is
/// fallible (integers beyond the 64-bit wire contract are rejected).
pub struct MsgPackEncoder {
    pub writer: Writer,
    /// Write object keys in lexicographic order instead of insertion order.
    sort_keys: bool,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            sort_keys: false,
        }
    }

    pub fn with_sort_keys(sort_keys: bool) -> Self {
        Self {
            writer: Writer::new(),
            sort_keys,
        }
    }

    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, Int64Error> {
        self.writer.reset();
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), Int64Error> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Number(f) => self.write_number(*f),
            Value::BigInt(int) => {
                let ext = int64::encode_big_int(*int)?;
                self.write_ext(&ext);
            }
            Value::Str(s) => self.write_str(s),
            Value::Bytes(b) => self.write_bin(b),
            Value::Array(arr) => self.write_arr(arr)?,
            Value::Object(obj) => self.write_obj(obj)?,
            Value::Extension(ext) => self.write_ext(ext),
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.writer.u8(0xc0);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { 0xc3 } else { 0xc2 });
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8f64(0xcb, float);
    }

    /// Integral doubles in the 32-bit range take int markers; everything
    /// else is float64.
    pub fn write_number(&mut self, num: f64) {
        if num.fract() == 0.0 {
            // -0.0 compares equal to 0.0 but only float64 keeps the
            // sign bit.
            if num == 0.0 && num.is_sign_negative() {
                return self.write_float(num);
            }
            if (0.0..=u32::MAX as f64).contains(&num) {
                return self.u32_int(num as u32);
            }
            if (i32::MIN as f64..0.0).contains(&num) {
                return self.n32_int(num as i32);
            }
        }
        self.write_float(num);
    }

    /// Encode a non-negative integer (u32 range) efficiently.
    fn u32_int(&mut self, num: u32) {
        let writer = &mut self.writer;
        writer.ensure_capacity(5);
        if num <= 0x7f {
            writer.uint8[writer.x] = num as u8;
            writer.x += 1;
        } else if num <= 0xffff {
            writer.uint8[writer.x] = 0xcd;
            writer.x += 1;
            writer.u16(num as u16);
        } else {
            writer.uint8[writer.x] = 0xce;
            writer.x += 1;
            writer.u32(num);
        }
    }

    /// Encode a negative integer (i32 range) efficiently.
    fn n32_int(&mut self, num: i32) {
        let writer = &mut self.writer;
        writer.ensure_capacity(5);
        if num >= -0x20 {
            // negative fixint: 0xe0..0xff
            writer.uint8[writer.x] = (0x100i32 + num) as u8;
            writer.x += 1;
        } else if num >= -0x8000 {
            writer.uint8[writer.x] = 0xd1;
            writer.x += 1;
            writer.u16(num as u16);
        } else {
            writer.uint8[writer.x] = 0xd2;
            writer.x += 1;
            writer.i32(num);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        let char_count = s.chars().count();
        let max_size = char_count * 4;
        self.writer.ensure_capacity(5 + max_size);

        // Reserve space for the header, write UTF-8, then patch the header.
        let length_offset;
        if max_size <= 0x1f {
            length_offset = self.writer.x;
            self.writer.x += 1;
        } else if max_size <= 0xff {
            self.writer.uint8[self.writer.x] = 0xd9;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 1;
        } else if max_size <= 0xffff {
            self.writer.uint8[self.writer.x] = 0xda;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 2;
        } else {
            self.writer.uint8[self.writer.x] = 0xdb;
            self.writer.x += 1;
            length_offset = self.writer.x;
            self.writer.x += 4;
        }

        let bytes_written = self.writer.utf8(s);

        if max_size <= 0x1f {
            self.writer.uint8[length_offset] = 0xa0 | bytes_written as u8;
        } else if max_size <= 0xff {
            self.writer.uint8[length_offset] = bytes_written as u8;
        } else if max_size <= 0xffff {
            let b = (bytes_written as u16).to_be_bytes();
            self.writer.uint8[length_offset] = b[0];
            self.writer.uint8[length_offset + 1] = b[1];
        } else {
            let b = (bytes_written as u32).to_be_bytes();
            self.writer.uint8[length_offset..length_offset + 4].copy_from_slice(&b);
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        let length = buf.len();
        if length <= 0xff {
            self.writer.u16(0xc400 | length as u16);
        } else if length <= 0xffff {
            self.writer.u8u16(0xc5, length as u16);
        } else {
            self.writer.u8u32(0xc6, length as u32);
        }
        self.writer.buf(buf);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.writer.u8(0x90 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xdc, length as u16);
        } else {
            self.writer.u8u32(0xdd, length as u32);
        }
    }

    pub fn write_arr(&mut self, arr: &[Value]) -> Result<(), Int64Error> {
        self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item)?;
        }
        Ok(())
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.writer.u8(0x80 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xde, length as u16);
        } else {
            self.writer.u8u32(0xdf, length as u32);
        }
    }

    pub fn write_obj(&mut self, obj: &[(String, Value)]) -> Result<(), Int64Error> {
        self.write_obj_hdr(obj.len());
        if self.sort_keys {
            let mut indices: Vec<usize> = (0..obj.len()).collect();
            indices.sort_by(|&a, &b| obj[a].0.cmp(&obj[b].0));
            for idx in indices {
                let (key, val) = &obj[idx];
                self.write_str(key);
                self.write_any(val)?;
            }
        } else {
            for (key, val) in obj {
                self.write_str(key);
                self.write_any(val)?;
            }
        }
        Ok(())
    }

    pub fn write_ext_header(&mut self, tag: i8, length: usize) {
        match length {
            1 => self.writer.u16((0xd4u16 << 8) | (tag as u8 as u16)),
            2 => self.writer.u16((0xd5u16 << 8) | (tag as u8 as u16)),
            4 => self.writer.u16((0xd6u16 << 8) | (tag as u8 as u16)),
            8 => self.writer.u16((0xd7u16 << 8) | (tag as u8 as u16)),
            16 => self.writer.u16((0xd8u16 << 8) | (tag as u8 as u16)),
            _ => {
                if length <= 0xff {
                    self.writer.u16(0xc700 | length as u16);
                    self.writer.u8(tag as u8);
                } else if length <= 0xffff {
                    self.writer.u8u16(0xc8, length as u16);
                    self.writer.u8(tag as u8);
                } else {
                    self.writer.u8u32(0xc9, length as u32);
                    self.writer.u8(tag as u8);
                }
            }
        }
    }

    pub fn write_ext(&mut self, ext: &Extension) {
        self.write_ext_header(ext.tag, ext.data.len());
        self.writer.buf(&ext.data);
    }
}

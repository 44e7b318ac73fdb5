//! [`MsgPackDecoder`] — MessagePack wire decoder.

use super::error::MsgPackError;
use crate::value::MAX_SAFE_INTEGER;
use crate::{Extension, Value};

/// Decodes MessagePack bytes into a raw [`Value`] tree.
///
/// All integer markers up to 32 bits decode as `Number` (exact in a
/// float64). Native int64/uint64 markers, which this codec never emits but
/// foreign writers may, decode as `Number` while the value is within ±2^53
/// and as `BigInt` beyond, so magnitude is never lost. Extensions are
/// surfaced as-is; folding the reserved wide-integer tags back into
/// `BigInt` is the façade's job.
pub struct MsgPackDecoder {
    data: Vec<u8>,
    x: usize,
}

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
        }
    }

    pub fn decode(&mut self, input: &[u8]) -> Result<Value, MsgPackError> {
        self.data = input.to_vec();
        self.x = 0;
        self.read_any()
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), MsgPackError> {
        if self.x + n > self.data.len() {
            Err(MsgPackError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn u8(&mut self) -> Result<u8, MsgPackError> {
        self.check(1)?;
        let v = self.data[self.x];
        self.x += 1;
        Ok(v)
    }

    #[inline]
    fn u16(&mut self) -> Result<u16, MsgPackError> {
        self.check(2)?;
        let v = u16::from_be_bytes([self.data[self.x], self.data[self.x + 1]]);
        self.x += 2;
        Ok(v)
    }

    #[inline]
    fn u32(&mut self) -> Result<u32, MsgPackError> {
        self.check(4)?;
        let v = u32::from_be_bytes([
            self.data[self.x],
            self.data[self.x + 1],
            self.data[self.x + 2],
            self.data[self.x + 3],
        ]);
        self.x += 4;
        Ok(v)
    }

    #[inline]
    fn u64(&mut self) -> Result<u64, MsgPackError> {
        self.check(8)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[self.x..self.x + 8]);
        self.x += 8;
        Ok(u64::from_be_bytes(bytes))
    }

    #[inline]
    fn i8(&mut self) -> Result<i8, MsgPackError> {
        Ok(self.u8()? as i8)
    }

    #[inline]
    fn i16(&mut self) -> Result<i16, MsgPackError> {
        Ok(self.u16()? as i16)
    }

    #[inline]
    fn i32(&mut self) -> Result<i32, MsgPackError> {
        Ok(self.u32()? as i32)
    }

    #[inline]
    fn i64(&mut self) -> Result<i64, MsgPackError> {
        Ok(self.u64()? as i64)
    }

    #[inline]
    fn f32(&mut self) -> Result<f32, MsgPackError> {
        Ok(f32::from_bits(self.u32()?))
    }

    #[inline]
    fn f64(&mut self) -> Result<f64, MsgPackError> {
        Ok(f64::from_bits(self.u64()?))
    }

    #[inline]
    fn utf8(&mut self, size: usize) -> Result<String, MsgPackError> {
        self.check(size)?;
        let slice = &self.data[self.x..self.x + size];
        let s = std::str::from_utf8(slice)
            .map_err(|_| MsgPackError::InvalidUtf8)?
            .to_string();
        self.x += size;
        Ok(s)
    }

    #[inline]
    fn buf(&mut self, size: usize) -> Result<Vec<u8>, MsgPackError> {
        self.check(size)?;
        let v = self.data[self.x..self.x + size].to_vec();
        self.x += size;
        Ok(v)
    }

    pub fn read_any(&mut self) -> Result<Value, MsgPackError> {
        let byte = self.u8()?;

        // negative fixint: 0xe0..0xff
        if byte >= 0xe0 {
            return Ok(Value::Number(byte as i8 as f64));
        }
        // positive fixint: 0x00..0x7f
        if byte <= 0x7f {
            return Ok(Value::Number(byte as f64));
        }
        // fixmap: 0x80..0x8f
        if (0x80..=0x8f).contains(&byte) {
            return self.read_obj(byte as usize & 0xf);
        }
        // fixarray: 0x90..0x9f
        if (0x90..=0x9f).contains(&byte) {
            return self.read_arr(byte as usize & 0xf);
        }
        // fixstr: 0xa0..0xbf
        if (0xa0..=0xbf).contains(&byte) {
            let len = byte as usize & 0x1f;
            return self.utf8(len).map(Value::Str);
        }

        match byte {
            0xc0 => Ok(Value::Null),
            0xc2 => Ok(Value::Bool(false)),
            0xc3 => Ok(Value::Bool(true)),
            // bin8, bin16, bin32
            0xc4 => {
                let n = self.u8()? as usize;
                Ok(Value::Bytes(self.buf(n)?))
            }
            0xc5 => {
                let n = self.u16()? as usize;
                Ok(Value::Bytes(self.buf(n)?))
            }
            0xc6 => {
                let n = self.u32()? as usize;
                Ok(Value::Bytes(self.buf(n)?))
            }
            // ext8, ext16, ext32
            0xc7 => {
                let n = self.u8()? as usize;
                self.read_ext(n)
            }
            0xc8 => {
                let n = self.u16()? as usize;
                self.read_ext(n)
            }
            0xc9 => {
                let n = self.u32()? as usize;
                self.read_ext(n)
            }
            // float32, float64
            0xca => Ok(Value::Number(self.f32()? as f64)),
            0xcb => Ok(Value::Number(self.f64()?)),
            // uint8, uint16, uint32, uint64
            0xcc => Ok(Value::Number(self.u8()? as f64)),
            0xcd => Ok(Value::Number(self.u16()? as f64)),
            0xce => Ok(Value::Number(self.u32()? as f64)),
            0xcf => {
                let v = self.u64()?;
                if v <= MAX_SAFE_INTEGER {
                    Ok(Value::Number(v as f64))
                } else {
                    Ok(Value::BigInt(v as i128))
                }
            }
            // int8, int16, int32, int64
            0xd0 => Ok(Value::Number(self.i8()? as f64)),
            0xd1 => Ok(Value::Number(self.i16()? as f64)),
            0xd2 => Ok(Value::Number(self.i32()? as f64)),
            0xd3 => {
                let v = self.i64()?;
                if v.unsigned_abs() <= MAX_SAFE_INTEGER {
                    Ok(Value::Number(v as f64))
                } else {
                    Ok(Value::BigInt(v as i128))
                }
            }
            // fixext1, fixext2, fixext4, fixext8, fixext16
            0xd4 => self.read_ext(1),
            0xd5 => self.read_ext(2),
            0xd6 => self.read_ext(4),
            0xd7 => self.read_ext(8),
            0xd8 => self.read_ext(16),
            // str8, str16, str32
            0xd9 => {
                let n = self.u8()? as usize;
                self.utf8(n).map(Value::Str)
            }
            0xda => {
                let n = self.u16()? as usize;
                self.utf8(n).map(Value::Str)
            }
            0xdb => {
                let n = self.u32()? as usize;
                self.utf8(n).map(Value::Str)
            }
            // array16, array32
            0xdc => {
                let n = self.u16()? as usize;
                self.read_arr(n)
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_arr(n)
            }
            // map16, map32
            0xde => {
                let n = self.u16()? as usize;
                self.read_obj(n)
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_obj(n)
            }
            // 0xc1 is never used by MessagePack
            _ => Err(MsgPackError::InvalidByte(self.x - 1)),
        }
    }

    fn read_obj(&mut self, size: usize) -> Result<Value, MsgPackError> {
        // A malformed map32 header can claim billions of entries; cap the
        // preallocation at what the remaining input could possibly hold.
        let mut obj = Vec::with_capacity(size.min(self.data.len() - self.x));
        for _ in 0..size {
            let key = self.read_key()?;
            if key == "__proto__" {
                return Err(MsgPackError::InvalidKey);
            }
            let val = self.read_any()?;
            obj.push((key, val));
        }
        Ok(Value::Object(obj))
    }

    fn read_arr(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let mut arr = Vec::with_capacity(size.min(self.data.len() - self.x));
        for _ in 0..size {
            arr.push(self.read_any()?);
        }
        Ok(Value::Array(arr))
    }

    fn read_ext(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let tag = self.i8()?;
        let data = self.buf(size)?;
        Ok(Value::Extension(Box::new(Extension::new(tag, data))))
    }

    fn read_key(&mut self) -> Result<String, MsgPackError> {
        self.check(1)?;
        let byte = self.data[self.x];
        // fixstr
        if (0xa0..=0xbf).contains(&byte) {
            let size = (byte & 0x1f) as usize;
            self.x += 1;
            return self.utf8(size);
        }
        // str8
        if byte == 0xd9 {
            self.x += 1;
            let size = self.u8()? as usize;
            return self.utf8(size);
        }
        // str16
        if byte == 0xda {
            self.x += 1;
            let size = self.u16()? as usize;
            return self.utf8(size);
        }
        // str32
        if byte == 0xdb {
            self.x += 1;
            let size = self.u32()? as usize;
            return self.utf8(size);
        }
        Err(MsgPackError::NotStr)
    }
}

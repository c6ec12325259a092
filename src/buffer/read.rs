//! Typed readers layered on top of [`super::Buffer`]'s raw byte operations.
//!
//! Ported from the typed-reader semantics in the BSON byte-buffer source
//! (`pvt_get_string`, `pvt_get_boolean`, `rb_bson_byte_buffer_get_cstring`,
//! `pvt_get_int32`/`pvt_get_int64`/`pvt_get_double`,
//! `rb_bson_byte_buffer_get_decimal128_bytes`).

use super::Buffer;
use crate::error::{Error, Result};
use crate::utf8;

impl Buffer {
    pub fn get_int32(&mut self) -> Result<i32> {
        let bytes = self.get_bytes(4)?;
        Ok(i32::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn get_uint32(&mut self) -> Result<u32> {
        let bytes = self.get_bytes(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn get_int64(&mut self) -> Result<i64> {
        let bytes = self.get_bytes(8)?;
        Ok(i64::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub fn get_double(&mut self) -> Result<f64> {
        let bytes = self.get_bytes(8)?;
        Ok(crate::endian::f64_from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Raw 16-byte Decimal128 payload; numeric interpretation is an
    /// external concern (SPEC_FULL.md §9).
    pub fn get_decimal128_bytes(&mut self) -> Result<[u8; 16]> {
        let bytes = self.get_bytes(16)?;
        Ok(bytes.try_into().unwrap())
    }

    /// Consumes one byte; `0x00` is `false`, `0x01` is `true`, anything
    /// else is a decode error.
    pub fn get_boolean(&mut self) -> Result<bool> {
        match self.get_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            other => Err(Error::decode(format!("Invalid boolean byte value: {}", other))),
        }
    }

    /// Scans forward from the read cursor for a 0x00 terminator, never
    /// reading past `write_position`. Unlike a `strlen`-based scan, a
    /// missing terminator within the writable region is a range error
    /// rather than undefined behavior.
    pub fn get_cstring(&mut self) -> Result<String> {
        let start = self.read_position_raw();
        let end = self.write_position_raw();
        let data = self.data();
        let terminator = data[start..end].iter().position(|&b| b == 0);
        let terminator = match terminator {
            Some(offset) => start + offset,
            None => {
                return Err(Error::range(format!(
                    "cstring has no terminating NUL within the remaining {} bytes",
                    end - start
                )))
            }
        };
        let bytes = &self.data()[start..terminator];
        utf8::validate(bytes, false).map_err(|e| Error::encoding(e.message()))?;
        let s = String::from_utf8(bytes.to_vec()).expect("validated as UTF-8 above");
        self.advance_read(terminator - start + 1);
        Ok(s)
    }

    /// Reads a little-endian `int32` length `n`, then `n` bytes including
    /// the trailing NUL. Fails if `n < 1`, if the final byte isn't `0x00`,
    /// or if the leading `n - 1` bytes aren't valid UTF-8 (interior NULs
    /// permitted).
    pub fn get_string(&mut self) -> Result<String> {
        let n = self.get_int32()?;
        if n < 1 {
            return Err(Error::decode(format!("string length {} must be at least 1", n)));
        }
        let bytes = self.get_bytes(n as usize)?;
        if bytes[bytes.len() - 1] != 0 {
            return Err(Error::decode("string is missing its trailing NUL byte".to_string()));
        }
        let body = &bytes[..bytes.len() - 1];
        utf8::validate(body, true).map_err(|e| Error::encoding(e.message()))?;
        Ok(String::from_utf8(body.to_vec()).expect("validated as UTF-8 above"))
    }
}

//! Typed writers layered on top of [`super::Buffer`]'s raw byte operations.
//!
//! Ported from the typed-writer semantics in the BSON byte-buffer source
//! (`pvt_put_field`, `pvt_put_cstring`, `pvt_bson_byte_buffer_put_binary_string`,
//! `pvt_put_int32`/`pvt_put_int64`/`pvt_put_double`, `pvt_replace_int32`).

use super::Buffer;
use crate::error::{Error, Result};
use crate::utf8;

/// A value `put_cstring` can accept without the caller formatting it first:
/// a string, or an integer formatted as decimal ASCII (used for array
/// indices, see `document::put_array`).
pub trait ToCstringInput {
    fn to_cstring_bytes(&self) -> String;
}

impl ToCstringInput for &str {
    fn to_cstring_bytes(&self) -> String {
        self.to_string()
    }
}

impl ToCstringInput for String {
    fn to_cstring_bytes(&self) -> String {
        self.clone()
    }
}

impl ToCstringInput for i32 {
    fn to_cstring_bytes(&self) -> String {
        self.to_string()
    }
}

impl ToCstringInput for i64 {
    fn to_cstring_bytes(&self) -> String {
        self.to_string()
    }
}

impl Buffer {
    pub fn put_int32(&mut self, value: i32) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_uint32(&mut self, value: u32) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_int64(&mut self, value: i64) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_double(&mut self, value: f64) {
        self.put_bytes(&crate::endian::f64_to_le_bytes(value));
    }

    /// Writes two little-endian `u64`s, low word first, as a raw 16-byte
    /// Decimal128 payload. Numeric interpretation is left to an external
    /// component (SPEC_FULL.md §9, "Decimal128 symmetry").
    pub fn put_decimal128(&mut self, low: u64, high: u64) {
        self.put_bytes(&low.to_le_bytes());
        self.put_bytes(&high.to_le_bytes());
    }

    /// Writes `value` followed by a 0x00 terminator. Rejects an interior
    /// NUL or invalid UTF-8.
    pub fn put_cstring(&mut self, value: impl ToCstringInput) -> Result<()> {
        let s = value.to_cstring_bytes();
        let bytes = s.as_bytes();
        utf8::validate(bytes, false).map_err(|e| Error::encoding(e.message()))?;
        self.put_bytes(bytes);
        self.put_byte(0);
        Ok(())
    }

    /// Writes a BSON string: little-endian `int32` length (including the
    /// terminator), the UTF-8 bytes, then a 0x00 terminator. Interior NULs
    /// are permitted.
    pub fn put_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        utf8::validate(bytes, true).map_err(|e| Error::encoding(e.message()))?;
        let len = i32::try_from(bytes.len() + 1)
            .map_err(|_| Error::range(format!("string of {} bytes is too long to encode", bytes.len())))?;
        self.put_int32(len);
        self.put_bytes(bytes);
        self.put_byte(0);
        Ok(())
    }

    /// A BSON symbol is framed exactly like a string (§4.4).
    pub fn put_symbol(&mut self, value: &str) -> Result<()> {
        self.put_string(value)
    }
}

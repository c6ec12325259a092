//! A split read/write cursor over an auto-growing byte region.
//!
//! This is the base the typed codec layer (`write`, `read`) is built on: a
//! single heap `Vec<u8>` plus two cursors. Unlike the source this crate is
//! ported from, there is no separate small-buffer inline region — the spec
//! calls that split an allocation optimization with no observable contract
//! (SPEC_FULL.md §9), so a `Vec<u8>` pre-sized to the same inline capacity
//! serves identically.

pub mod read;
pub mod write;

use crate::error::{Error, Result};

/// Starting capacity, matching the inline small-buffer size the ported
/// source reserves before its first heap growth.
const INLINE_CAPACITY: usize = 1024;

/// A contiguous mutable byte region with independent read and write cursors.
#[derive(Debug, Clone)]
pub struct Buffer {
    data: Vec<u8>,
    read_position: usize,
    write_position: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// An empty buffer with a small starting capacity.
    pub fn new() -> Self {
        Buffer {
            data: vec![0u8; INLINE_CAPACITY],
            read_position: 0,
            write_position: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Equivalent to `new()` followed by `put_bytes(bytes)`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = Self::new();
        buf.put_bytes(bytes);
        buf
    }

    /// Remaining readable bytes: `write_position - read_position`.
    pub fn length(&self) -> usize {
        self.write_position - self.read_position
    }

    pub fn read_position(&self) -> usize {
        self.read_position
    }

    pub fn write_position(&self) -> usize {
        self.write_position
    }

    /// Resets the read cursor to the start of the live window; the write
    /// cursor and the bytes already written are untouched.
    pub fn rewind(&mut self) {
        self.read_position = 0;
    }

    /// Returns a copy of the bytes in `[read_position, write_position)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data[self.read_position..self.write_position].to_vec()
    }

    /// Ensures at least `need` more bytes can be written past
    /// `write_position`, compacting the live window in place when that's
    /// enough, or reallocating at `required * 2` otherwise.
    fn ensure_capacity(&mut self, need: usize) {
        if self.write_position + need <= self.capacity() {
            return;
        }
        let required = self.length() + need;
        if required <= self.capacity() {
            self.data.copy_within(self.read_position..self.write_position, 0);
        } else {
            let new_size = required * 2;
            let mut new_data = vec![0u8; new_size];
            new_data[..self.length()].copy_from_slice(&self.data[self.read_position..self.write_position]);
            self.data = new_data;
        }
        self.write_position -= self.read_position;
        self.read_position = 0;
    }

    /// Appends raw bytes to the tail, growing the backing region as needed.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.data[self.write_position..self.write_position + bytes.len()].copy_from_slice(bytes);
        self.write_position += bytes.len();
    }

    /// Appends a single byte.
    pub fn put_byte(&mut self, byte: u8) {
        self.put_bytes(&[byte]);
    }

    /// Consumes and returns `n` bytes from the head of the live window.
    pub fn get_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.length() < n {
            return Err(Error::range(format!(
                "requested {} bytes but only {} remain",
                n,
                self.length()
            )));
        }
        let out = self.data[self.read_position..self.read_position + n].to_vec();
        self.read_position += n;
        Ok(out)
    }

    /// Consumes and returns a single byte.
    pub fn get_byte(&mut self) -> Result<u8> {
        Ok(self.get_bytes(1)?[0])
    }

    /// Overwrites 4 bytes at `pos` (measured from the read cursor's
    /// coordinate space) with `value`'s little-endian encoding. Used to
    /// back-patch document/array length prefixes after the fact.
    pub fn replace_int32(&mut self, pos: usize, value: i32) -> Result<()> {
        if pos + 4 > self.write_position - self.read_position {
            return Err(Error::argument(format!(
                "replace_int32 position {} is out of bounds for a {}-byte buffer",
                pos,
                self.length()
            )));
        }
        let start = self.read_position + pos;
        self.data[start..start + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads the byte `offset` positions past the read cursor without
    /// consuming it. Used by the document/array decoder to validate the
    /// declared-length terminator up front (§4.6 step 1).
    pub(crate) fn peek_byte(&self, offset: usize) -> Result<u8> {
        let pos = self.read_position + offset;
        if pos >= self.write_position {
            return Err(Error::range(format!(
                "requested byte at offset {} but only {} remain",
                offset,
                self.length()
            )));
        }
        Ok(self.data[pos])
    }

    pub(crate) fn read_position_raw(&self) -> usize {
        self.read_position
    }

    pub(crate) fn write_position_raw(&self) -> usize {
        self.write_position
    }

    pub(crate) fn advance_read(&mut self, n: usize) {
        self.read_position += n;
    }

    pub(crate) fn advance_write(&mut self, n: usize) {
        self.write_position += n;
    }
}

//! BSON array framing: identical to a document's, except keys are the
//! decimal ASCII indices `"0"`, `"1"`, … in order and are discarded again
//! on decode (§4.6).

use std::sync::OnceLock;

use crate::buffer::Buffer;
use crate::codec;
use crate::error::{Error, Result};
use crate::registry::{DecodeOptions, Registry};
use crate::value::Bson;

/// Short-circuits formatting for the first 1000 array indices, matching the
/// source's precomputed `index_strings[0..999]` table (§4.6, "Encoding an
/// array").
const PRECOMPUTED_INDEX_COUNT: usize = 1000;

fn precomputed_indices() -> &'static [String; PRECOMPUTED_INDEX_COUNT] {
    static INDICES: OnceLock<[String; PRECOMPUTED_INDEX_COUNT]> = OnceLock::new();
    INDICES.get_or_init(|| {
        std::array::from_fn(|i| i.to_string())
    })
}

fn index_key(i: usize) -> String {
    if i < PRECOMPUTED_INDEX_COUNT {
        precomputed_indices()[i].clone()
    } else {
        i.to_string()
    }
}

/// Encodes `values` as a BSON array.
pub fn encode(values: &[Bson], buf: &mut Buffer, validate_keys: bool) -> Result<()> {
    let l0 = buf.length();
    buf.put_int32(0);
    for (i, value) in values.iter().enumerate() {
        codec::write_field(buf, index_key(i), value, validate_keys)?;
    }
    buf.put_byte(0);
    let l1 = buf.length();
    let total_len = (l1 - l0) as i32;
    buf.replace_int32(l0, total_len)?;
    Ok(())
}

/// Decodes a BSON array. Keys are validated only insofar as the framing
/// requires a terminator and a consistent declared length; their actual
/// text is discarded (§4.6, "Decoding an array").
pub fn decode(buf: &mut Buffer, registry: &dyn Registry, opts: &DecodeOptions) -> Result<Vec<Bson>> {
    let start = buf.read_position();
    let l = buf.get_int32()?;
    if l < 5 {
        return Err(Error::decode(format!("declared array length {} is less than the minimum of 5", l)));
    }
    let l = l as usize;
    if buf.length() < l - 4 {
        return Err(Error::range(format!(
            "declared array length {} exceeds the {} bytes available",
            l,
            buf.length() + 4
        )));
    }
    if buf.peek_byte(l - 1 - 4)? != 0 {
        return Err(Error::decode(format!(
            "array of declared length {} is missing its trailing terminator byte",
            l
        )));
    }

    let mut values = Vec::new();
    loop {
        let tag_byte = buf.get_byte()?;
        if tag_byte == 0 {
            break;
        }
        let _key = buf.get_cstring()?;
        values.push(codec::read_tagged_value(buf, tag_byte, registry, opts)?);
    }

    let consumed = buf.read_position() - start;
    if consumed != l {
        return Err(Error::decode(format!(
            "array declared length {} but {} bytes were consumed",
            l, consumed
        )));
    }

    Ok(values)
}

impl Buffer {
    /// Encodes `values` as a BSON array in place, matching [`encode`].
    pub fn put_array(&mut self, values: &[Bson], validate_keys: bool) -> Result<()> {
        encode(values, self, validate_keys)
    }

    /// Decodes one array from the read cursor, resolving any non-native
    /// tags through `registry`.
    pub fn get_array(&mut self, registry: &dyn Registry, opts: &DecodeOptions) -> Result<Vec<Bson>> {
        decode(self, registry, opts)
    }
}

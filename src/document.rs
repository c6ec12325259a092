//! BSON document framing: `int32 total_length | tagged fields | 0x00` (§4.6).
//!
//! Backed by `indexmap::IndexMap` rather than a hand-rolled
//! `Vec<(String, Bson)>` or a hash map, since both encode and decode must
//! preserve insertion order (§9, "Insertion-order maps") and this pack's
//! wider corpus (`sui`, the real `mongodb/bson-rust` crate) already reaches
//! for `indexmap` for exactly this shape.

use indexmap::IndexMap;

use crate::buffer::Buffer;
use crate::codec;
use crate::error::{Error, Result};
use crate::registry::{DecodeOptions, Registry};
use crate::value::Bson;

/// An ordered, string-keyed map of BSON values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    fields: IndexMap<String, Bson>,
}

impl Document {
    pub fn new() -> Self {
        Document { fields: IndexMap::new() }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Inserts `value` at `key`, returning any value previously at that
    /// key. Insertion order is preserved for new keys; re-inserting an
    /// existing key keeps its original position (matching `IndexMap`'s
    /// default `insert` behavior).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Bson>) -> Option<Bson> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Bson> {
        self.fields.iter()
    }
}

impl FromIterator<(String, Bson)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Bson)>>(iter: I) -> Self {
        Document { fields: iter.into_iter().collect() }
    }
}

/// Rejects a document key with a leading `$` or an interior `.` (§4.6).
pub fn validate_key(key: &str) -> Result<()> {
    if key.starts_with('$') || key.contains('.') {
        return Err(Error::illegal_key(key));
    }
    Ok(())
}

/// Encodes `doc` as a length-prefixed, terminated sequence of tagged
/// fields, patching the length placeholder once the body is known (§4.6).
pub fn encode(doc: &Document, buf: &mut Buffer, validate_keys: bool) -> Result<()> {
    let l0 = buf.length();
    buf.put_int32(0);
    for (key, value) in doc.iter() {
        if validate_keys {
            validate_key(key)?;
        }
        codec::write_field(buf, key.as_str(), value, validate_keys)?;
    }
    buf.put_byte(0);
    let l1 = buf.length();
    let total_len = (l1 - l0) as i32;
    buf.replace_int32(l0, total_len)?;
    Ok(())
}

/// Decodes one document, returning it as `Bson::Document` unless its shape
/// matches a DBRef, in which case the registry's lift (§4.6 step 4, §9) is
/// given the chance to produce something else.
pub fn decode(buf: &mut Buffer, registry: &dyn Registry, opts: &DecodeOptions) -> Result<Bson> {
    let start = buf.read_position();
    let l = buf.get_int32()?;
    if l < 5 {
        return Err(Error::decode(format!("declared document length {} is less than the minimum of 5", l)));
    }
    let l = l as usize;
    // The length field itself has already been consumed (4 bytes); what
    // remains to validate is that the whole declared span is available and
    // that its last byte is the 0x00 terminator (§4.6 step 1).
    if buf.length() < l - 4 {
        return Err(Error::range(format!(
            "declared document length {} exceeds the {} bytes available",
            l,
            buf.length() + 4
        )));
    }
    if buf.peek_byte(l - 1 - 4)? != 0 {
        return Err(Error::decode(format!(
            "document of declared length {} is missing its trailing terminator byte",
            l
        )));
    }

    let mut fields = Document::new();
    loop {
        let tag_byte = buf.get_byte()?;
        if tag_byte == 0 {
            break;
        }
        let key = buf.get_cstring()?;
        let value = codec::read_tagged_value(buf, tag_byte, registry, opts)?;
        fields.insert(key, value);
    }

    let consumed = buf.read_position() - start;
    if consumed != l {
        return Err(Error::decode(format!(
            "document declared length {} but {} bytes were consumed",
            l, consumed
        )));
    }

    if is_dbref_shape(&fields) {
        Ok(registry.dbref(fields))
    } else {
        Ok(Bson::Document(fields))
    }
}

impl Buffer {
    /// Encodes `doc` in place, matching [`encode`]. Named after the
    /// source's `put_hash` entry point (§6).
    pub fn put_hash(&mut self, doc: &Document, validate_keys: bool) -> Result<()> {
        encode(doc, self, validate_keys)
    }

    /// Decodes one document from the read cursor, resolving any non-native
    /// tags and the DBRef lift through `registry`.
    pub fn get_document(&mut self, registry: &dyn Registry, opts: &DecodeOptions) -> Result<Bson> {
        decode(self, registry, opts)
    }
}

/// `$ref: string`, `$id: any`, optional `$db: string` (§4.6 step 4, §9).
fn is_dbref_shape(doc: &Document) -> bool {
    let ref_is_string = matches!(doc.get("$ref"), Some(Bson::String(_)));
    let has_id = doc.contains_key("$id");
    let db_ok = match doc.get("$db") {
        None => true,
        Some(Bson::String(_)) => true,
        Some(_) => false,
    };
    ref_is_string && has_id && db_ok
}

impl From<f64> for Bson {
    fn from(v: f64) -> Self {
        Bson::Double(v)
    }
}

impl From<&str> for Bson {
    fn from(v: &str) -> Self {
        Bson::String(v.to_string())
    }
}

impl From<String> for Bson {
    fn from(v: String) -> Self {
        Bson::String(v)
    }
}

impl From<bool> for Bson {
    fn from(v: bool) -> Self {
        Bson::Boolean(v)
    }
}

impl From<i32> for Bson {
    fn from(v: i32) -> Self {
        Bson::Int32(v)
    }
}

impl From<i64> for Bson {
    fn from(v: i64) -> Self {
        Bson::from_i64(v)
    }
}

impl From<Document> for Bson {
    fn from(v: Document) -> Self {
        Bson::Document(v)
    }
}

impl From<Vec<Bson>> for Bson {
    fn from(v: Vec<Bson>) -> Self {
        Bson::Array(v)
    }
}

impl From<Bson> for Bson {
    fn from(v: Bson) -> Self {
        v
    }
}

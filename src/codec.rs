//! Type-tag dispatch: picks a tag byte and writer for a [`Bson`] value on
//! encode, and resolves a tag byte to a reader on decode (§4.7).
//!
//! The eight native tags are handled directly; anything else is delegated
//! to the caller-supplied [`Registry`]. This module is the seam
//! [`crate::document`] and [`crate::array`] call into per entry — the
//! framing logic (length placeholder, terminator, key cstrings) lives
//! there, not here.

use crate::array;
use crate::buffer::Buffer;
use crate::document;
use crate::error::Result;
use crate::registry::{DecodeMode, DecodeOptions, Registry};
use crate::value::{tag, Bson};

/// Writes one document/array entry: `value`'s tag byte, `key` as a cstring,
/// then `value`'s body. Shared by `document::encode` and `array::encode` so
/// the tag-dispatch logic lives in exactly one place.
pub fn write_field(buf: &mut Buffer, key: impl crate::buffer::write::ToCstringInput, value: &Bson, validate_keys: bool) -> Result<()> {
    match value {
        Bson::Extended(ext) => {
            buf.put_byte(ext.bson_type());
            buf.put_cstring(key)?;
            ext.to_bson(buf, validate_keys)
        }
        native => {
            buf.put_byte(native.native_tag().expect("non-Extended values always have a native tag"));
            buf.put_cstring(key)?;
            write_native_body(buf, native, validate_keys)
        }
    }
}

fn write_native_body(buf: &mut Buffer, value: &Bson, validate_keys: bool) -> Result<()> {
    match value {
        Bson::Double(v) => {
            buf.put_double(*v);
            Ok(())
        }
        Bson::String(v) => buf.put_string(v),
        Bson::Document(v) => document::encode(v, buf, validate_keys),
        Bson::Array(v) => array::encode(v, buf, validate_keys),
        Bson::Boolean(v) => {
            buf.put_byte(if *v { 1 } else { 0 });
            Ok(())
        }
        Bson::Symbol(v) => buf.put_symbol(v),
        Bson::Int32(v) => {
            buf.put_int32(*v);
            Ok(())
        }
        Bson::Int64(v) => {
            buf.put_int64(*v);
            Ok(())
        }
        Bson::Extended(_) => unreachable!("Extended values are handled by write_tagged_value"),
    }
}

/// Resolves a decoded `tag` byte to a value, reading its body from `buf`.
pub fn read_tagged_value(
    buf: &mut Buffer,
    tag_byte: u8,
    registry: &dyn Registry,
    opts: &DecodeOptions,
) -> Result<Bson> {
    match tag_byte {
        tag::DOUBLE => Ok(Bson::Double(buf.get_double()?)),
        tag::STRING => Ok(Bson::String(buf.get_string()?)),
        tag::DOCUMENT => document::decode(buf, registry, opts),
        tag::ARRAY => Ok(Bson::Array(array::decode(buf, registry, opts)?)),
        tag::BOOLEAN => Ok(Bson::Boolean(buf.get_boolean()?)),
        // `DecodeMode::Bson` asks the registry for a dedicated raw-symbol
        // wrapper (§4.8), the same mode-aware split `tag::INT64` makes below.
        tag::SYMBOL => match opts.mode {
            DecodeMode::Default => Ok(Bson::Symbol(buf.get_string()?)),
            DecodeMode::Bson => registry.decode(tag::SYMBOL, buf, opts),
        },
        tag::INT32 => Ok(Bson::Int32(buf.get_int32()?)),
        tag::INT64 => match opts.mode {
            DecodeMode::Default => Ok(Bson::Int64(buf.get_int64()?)),
            DecodeMode::Bson => registry.decode(tag::INT64, buf, opts),
        },
        other => registry.decode(other, buf, opts),
    }
}

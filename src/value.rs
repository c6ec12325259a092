//! The `Bson` value enum and the capability pair non-native values use to
//! plug into encoding.
//!
//! SPEC_FULL.md §4.7 and §9 ("Type dispatch") ask for a tagged variant over
//! the eight native tags, plus a trait/interface capability pair for
//! anything else. [`Bson`] is that tagged variant; [`BsonExternal`] is the
//! capability pair (`bson_type()` / `to_bson()`).

use std::fmt;

use crate::buffer::Buffer;
use crate::document::Document;
use crate::error::Result;

/// Tag bytes for the eight natively-handled BSON types (§3).
pub mod tag {
    pub const DOUBLE: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const DOCUMENT: u8 = 0x03;
    pub const ARRAY: u8 = 0x04;
    pub const BOOLEAN: u8 = 0x08;
    pub const SYMBOL: u8 = 0x0E;
    pub const INT32: u8 = 0x10;
    pub const INT64: u8 = 0x12;
}

/// A decoded or to-be-encoded BSON value.
///
/// The native variants are a closed set matching §3's type tag table. Any
/// value whose BSON representation the core doesn't itself understand
/// (Decimal128, Binary, DBRef, Regex, Symbol-as-distinct-from-string under
/// `DecodeMode::Bson`, Timestamp, …) is carried in `Extended`, produced and
/// consumed only through a caller-supplied [`crate::registry::Registry`].
#[derive(Debug)]
pub enum Bson {
    Double(f64),
    String(String),
    Document(Document),
    Array(Vec<Bson>),
    Boolean(bool),
    Symbol(String),
    Int32(i32),
    Int64(i64),
    Extended(Box<dyn BsonExternal>),
}

impl Clone for Bson {
    fn clone(&self) -> Self {
        match self {
            Bson::Double(v) => Bson::Double(*v),
            Bson::String(v) => Bson::String(v.clone()),
            Bson::Document(v) => Bson::Document(v.clone()),
            Bson::Array(v) => Bson::Array(v.clone()),
            Bson::Boolean(v) => Bson::Boolean(*v),
            Bson::Symbol(v) => Bson::Symbol(v.clone()),
            Bson::Int32(v) => Bson::Int32(*v),
            Bson::Int64(v) => Bson::Int64(*v),
            Bson::Extended(v) => Bson::Extended(v.clone_box()),
        }
    }
}

impl PartialEq for Bson {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Bson::Double(a), Bson::Double(b)) => a.to_bits() == b.to_bits(),
            (Bson::String(a), Bson::String(b)) => a == b,
            (Bson::Document(a), Bson::Document(b)) => a == b,
            (Bson::Array(a), Bson::Array(b)) => a == b,
            (Bson::Boolean(a), Bson::Boolean(b)) => a == b,
            (Bson::Symbol(a), Bson::Symbol(b)) => a == b,
            (Bson::Int32(a), Bson::Int32(b)) => a == b,
            (Bson::Int64(a), Bson::Int64(b)) => a == b,
            // External values are registry-owned; the core has no general
            // way to compare them, so two Extended values are never equal
            // here even if a caller's own type would consider them so.
            (Bson::Extended(_), Bson::Extended(_)) => false,
            _ => false,
        }
    }
}

impl Bson {
    /// The tag byte this value encodes as, for the seven native kinds.
    /// Returns `None` for `Extended`, whose tag comes from `BsonExternal::bson_type`.
    pub fn native_tag(&self) -> Option<u8> {
        match self {
            Bson::Double(_) => Some(tag::DOUBLE),
            Bson::String(_) => Some(tag::STRING),
            Bson::Document(_) => Some(tag::DOCUMENT),
            Bson::Array(_) => Some(tag::ARRAY),
            Bson::Boolean(_) => Some(tag::BOOLEAN),
            Bson::Symbol(_) => Some(tag::SYMBOL),
            Bson::Int32(_) => Some(tag::INT32),
            Bson::Int64(_) => Some(tag::INT64),
            Bson::Extended(_) => None,
        }
    }

    /// Picks `Int32` when `value` fits `[-2^31, 2^31)`, else `Int64` — the
    /// promotion rule behind the spec's `{"n": 2147483648}` example (§8).
    pub fn from_i64(value: i64) -> Bson {
        match i32::try_from(value) {
            Ok(v) => Bson::Int32(v),
            Err(_) => Bson::Int64(value),
        }
    }
}

/// Capability pair a non-native value supplies so the core can encode it
/// without understanding its semantics (§4.7, §9 "Type dispatch").
pub trait BsonExternal: fmt::Debug {
    /// The tag byte this value should be written with.
    fn bson_type(&self) -> u8;

    /// Writes this value's body (not its tag or key) to `buf`.
    fn to_bson(&self, buf: &mut Buffer, validate_keys: bool) -> Result<()>;

    /// Supports `Bson::clone()` despite living behind `Box<dyn BsonExternal>`.
    fn clone_box(&self) -> Box<dyn BsonExternal>;
}

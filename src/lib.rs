//! A native BSON (Binary JSON) codec.
//!
//! A split read/write [`Buffer`] carries little-endian typed primitives
//! (`put_int32`/`get_int32`, `put_string`/`get_string`, …); [`Document`] and
//! the free functions in [`array`] layer BSON's document/array framing
//! (length prefix, tagged fields, terminator) on top. [`ObjectIdGenerator`]
//! produces the 12-byte identifiers MongoDB documents commonly key on.
//!
//! Everything this crate does not itself interpret — Decimal128, Binary,
//! DBRef, Regex, Symbol-as-distinct-from-string, Timestamp, and so on — is
//! reached through the [`Registry`] trait a caller supplies; [`NoopRegistry`]
//! is the crate's own default and keeps it fully usable over the native
//! tag set (§3) without one.

pub mod array;
pub mod buffer;
pub mod cli;
pub mod codec;
pub mod document;
pub mod endian;
pub mod error;
pub mod object_id;
pub mod registry;
pub mod utf8;
pub mod value;

// ─────────────────────────────────────────────────────────────────────────
// Convenience re-exports of the most common entry points.
// ─────────────────────────────────────────────────────────────────────────

/// The split read/write byte cursor every other primitive is layered on.
pub use buffer::Buffer;

/// An ordered, string-keyed map of BSON values.
pub use document::Document;

/// A decoded or to-be-encoded BSON value (the closed native tag set, plus
/// `Extended` for registry-owned types).
pub use value::Bson;

/// The capability pair (`bson_type()` / `to_bson()`) a non-native value
/// implements to plug into encoding.
pub use value::BsonExternal;

/// The error taxonomy every fallible operation in this crate returns.
pub use error::Error;

/// `Result<T, Error>` alias used throughout the codec.
pub use error::Result;

/// The external collaborator that resolves non-native type tags and
/// performs the DBRef lift.
pub use registry::Registry;

/// The registry used when no caller-supplied one is available.
pub use registry::NoopRegistry;

/// Options accepted by composite (document/array) readers (`mode`).
pub use registry::{DecodeMode, DecodeOptions};

/// Generates 12-byte ObjectIds: big-endian timestamp, per-process random,
/// monotonic counter.
pub use object_id::ObjectIdGenerator;

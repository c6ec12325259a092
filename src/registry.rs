//! The external type registry: the seam through which tag bytes outside the
//! eight natively-handled ones (Decimal128, Binary, DBRef, Regex, Symbol,
//! Timestamp, …) are resolved to host values, and through which documents
//! shaped like a DBRef are lifted to one.
//!
//! Per SPEC_FULL.md §1/§4.7, the registry itself — how it maps tag bytes to
//! user classes — is an external collaborator, not core scope. This module
//! defines only the trait the core depends on and a [`NoopRegistry`]
//! default so the crate is useful standalone over the native tag set.

use crate::buffer::Buffer;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::Bson;

/// Controls how `get_int64`/symbol decoding behave (§4.8).
///
/// The spec's `mode: null | "bson"` option is modeled as this two-variant
/// enum rather than an `Option<Mode>`: `Default` *is* the "absent" state,
/// so there is no separate `None` to represent (SPEC_FULL.md §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    #[default]
    Default,
    Bson,
}

impl DecodeMode {
    /// Parses the `mode` option's accepted string forms. Any other value is
    /// an argument error (§4.8).
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(DecodeMode::Default),
            Some("bson") => Ok(DecodeMode::Bson),
            Some(other) => Err(Error::argument(format!("invalid mode option: {:?}", other))),
        }
    }
}

/// Options accepted by composite (document/array) readers (§4.8).
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
}

impl DecodeOptions {
    pub fn new(mode: DecodeMode) -> Self {
        DecodeOptions { mode }
    }
}

/// The external collaborator that resolves non-native tag bytes and
/// performs the DBRef lift (§4.6 step 4, §4.7, §9).
pub trait Registry {
    /// Decodes the body of a value tagged `tag` (not itself one of the
    /// eight native tags) from `buf`.
    fn decode(&self, tag: u8, buf: &mut Buffer, opts: &DecodeOptions) -> Result<Bson>;

    /// Given a decoded document whose shape matches a DBRef
    /// (`$ref: string`, `$id: any`, optional `$db: string`), optionally
    /// lifts it to a registry-owned representation. Returning the
    /// document unchanged (wrapped back in `Bson::Document`) declines the
    /// lift.
    fn dbref(&self, doc: Document) -> Bson {
        Bson::Document(doc)
    }
}

/// The registry used when no caller-supplied one is available: it has no
/// mapping for any non-native tag, and it never performs the DBRef lift.
/// This keeps the crate fully usable over the native tag set without
/// requiring a registry (SPEC_FULL.md §9, Open Questions).
#[derive(Debug, Default)]
pub struct NoopRegistry;

impl Registry for NoopRegistry {
    fn decode(&self, tag: u8, _buf: &mut Buffer, _opts: &DecodeOptions) -> Result<Bson> {
        Err(Error::decode(format!("unknown type tag 0x{:02X} with no registry entry", tag)))
    }
}

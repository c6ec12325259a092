//! Error taxonomy for the BSON codec.
//!
//! Mirrors the manual, `thiserror`-free error enum shape this crate's
//! teacher uses for its own wire-format errors (`Lz4FError`, `Lz4Error`):
//! one flat enum, a `kind()` name accessor, and a bare `Display`/`Error`
//! impl with no source chain.

use std::fmt;

/// Any failure the codec can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not enough bytes remained to satisfy a read, an out-of-range integer
    /// input, or an out-of-bounds `replace_int32` position.
    Range { message: String },
    /// Wrong input type, an invalid `mode` option, or similar caller misuse.
    Argument { message: String },
    /// A value's host-language kind has no native BSON tag and no registry
    /// capability pair to supply one.
    Type { message: String },
    /// Invalid UTF-8 per the strict BSON rules, or a cstring with an
    /// interior NUL.
    Encoding { message: String },
    /// A well-formed-looking byte stream violates BSON's framing rules.
    Decode { message: String },
    /// A document key begins with `$` or contains an interior `.` while key
    /// validation is enabled.
    IllegalKey { key: String },
    /// A value's host class exposes neither `bson_type()` nor `to_bson()`.
    UnserializableClass { message: String },
}

impl Error {
    pub fn range(message: impl Into<String>) -> Self {
        Error::Range { message: message.into() }
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Error::Argument { message: message.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Error::Type { message: message.into() }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding { message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode { message: message.into() }
    }

    pub fn illegal_key(key: impl Into<String>) -> Self {
        Error::IllegalKey { key: key.into() }
    }

    pub fn unserializable_class(message: impl Into<String>) -> Self {
        Error::UnserializableClass { message: message.into() }
    }

    /// Stable tag for this error's kind, independent of its message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Range { .. } => "Range",
            Error::Argument { .. } => "Argument",
            Error::Type { .. } => "Type",
            Error::Encoding { .. } => "Encoding",
            Error::Decode { .. } => "Decode",
            Error::IllegalKey { .. } => "IllegalKey",
            Error::UnserializableClass { .. } => "UnserializableClass",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Range { message }
            | Error::Argument { message }
            | Error::Type { message }
            | Error::Encoding { message }
            | Error::Decode { message }
            | Error::UnserializableClass { message } => write!(f, "{}: {}", self.kind(), message),
            Error::IllegalKey { key } => write!(f, "IllegalKey: key {:?} is illegal", key),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Error::range("x").kind(), "Range");
        assert_eq!(Error::illegal_key("$foo").kind(), "IllegalKey");
    }

    #[test]
    fn display_includes_message() {
        let e = Error::decode("missing trailing NUL");
        assert_eq!(e.to_string(), "Decode: missing trailing NUL");
    }

    #[test]
    fn illegal_key_display_names_key() {
        let e = Error::illegal_key("$bad");
        assert_eq!(e.to_string(), "IllegalKey: key \"$bad\" is illegal");
    }
}

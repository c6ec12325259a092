//! Host ↔ wire endianness conversions.
//!
//! BSON puts every integer and double on the wire little-endian; ObjectId's
//! timestamp and counter fields are the sole big-endian exception (§4.2,
//! §4.9). `to_le_bytes`/`from_le_bytes`/`to_be_bytes`/`from_be_bytes` on the
//! primitive numeric types are a portable, allocation-free stand-in for the
//! byte-swap macro matrix a C port of this codec would otherwise need; no
//! `cfg!`-gated manual swap path is required on any target Rust supports.

/// Reinterprets `bits` as the little-endian byte pattern of an `f64`.
#[inline]
pub fn f64_to_le_bytes(value: f64) -> [u8; 8] {
    value.to_bits().to_le_bytes()
}

/// Recovers an `f64` from 8 little-endian bytes holding its bit pattern.
#[inline]
pub fn f64_from_le_bytes(bytes: [u8; 8]) -> f64 {
    f64::from_bits(u64::from_le_bytes(bytes))
}

#[inline]
pub fn u32_to_be_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

#[inline]
pub fn u32_from_be_bytes(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

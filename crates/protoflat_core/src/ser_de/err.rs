//! Error implementations

use crate::wire::WireType;

/// Result type used throughout the codec.
pub type SerDeResult<T> = Result<T, Error>;

/// Decode failures.
///
/// Any of these aborts the enclosing message decode; no partially decoded
/// message is handed back as valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The view ran out before a varint terminator, a fixed-width value or
    /// a declared length-delimited payload.
    #[error("input truncated")]
    TruncatedInput,

    /// A varint kept its continuation bit set past 64 bits of payload.
    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    /// The tag of a known field carried a different wire type than declared.
    #[error("field {field_number}: expected wire type {expected:?}, found {found:?}")]
    WireTypeMismatch {
        field_number: u32,
        expected: WireType,
        found: WireType,
    },

    /// A packed run whose length does not land on an element boundary.
    #[error("packed run does not align with its elements")]
    MalformedPackedRun,

    /// Wire type codes 6 and 7 are unassigned.
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),

    /// Field number 0, or one beyond the schema maximum.
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),

    /// Groups are not supported.
    #[error("unsupported wire type {0:?}")]
    UnsupportedWireType(WireType),

    /// A string field held bytes that are not UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
}

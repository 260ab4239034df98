//! Wire types, field headers (tags) and the zigzag mapping.
//!
//! Every encoded field starts with a tag: the varint of
//! `(field_number << 3) | wire_type`.

use crate::ser_de::err::{Error, SerDeResult};

/// Largest field number a schema may declare (`2^29 - 1`).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Mask for the wire type bits of a tag.
const WIRE_TYPE_MASK: u64 = 0x7;

/// Number of bits the field number is shifted by inside a tag.
const WIRE_TYPE_BITS: u32 = 3;

/// How the bytes following a tag are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    /// Reserved for groups, never produced.
    StartGroup = 3,
    /// Reserved for groups, never produced.
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Wire type from its 3-bit code.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            3 => Some(Self::StartGroup),
            4 => Some(Self::EndGroup),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The `(field number, wire type)` pair prefixing a field on the wire.
///
/// Generated bindings keep one of these as an associated constant per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl FieldHeader {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// Packs the header into its tag value.
    pub const fn encode(self) -> u64 {
        ((self.field_number as u64) << WIRE_TYPE_BITS) | self.wire_type.as_u8() as u64
    }

    /// Splits a tag value back into field number and wire type.
    ///
    /// Field number `0`, numbers past [`MAX_FIELD_NUMBER`] and the unassigned
    /// wire types `6` and `7` are rejected.
    pub fn decode(tag: u64) -> SerDeResult<Self> {
        let code = (tag & WIRE_TYPE_MASK) as u8;
        let wire_type = WireType::from_u8(code).ok_or(Error::InvalidWireType(code))?;

        let field_number = tag >> WIRE_TYPE_BITS;
        match field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            true => Err(Error::InvalidFieldNumber(field_number)),
            false => Ok(Self {
                field_number: field_number as u32,
                wire_type,
            }),
        }
    }

    /// Encoded size of the tag in bytes.
    pub const fn size(self) -> usize {
        crate::ser_de::primitive::varint_size(self.encode())
    }
}

/// Zigzag mapping between signed and unsigned integers.
///
/// Small magnitudes, positive or negative, map to small unsigned values:
/// `0 -> 0`, `-1 -> 1`, `1 -> 2`, `-2 -> 3`.
pub mod zigzag {
    pub const fn encode(value: i64) -> u64 {
        ((value << 1) ^ (value >> 63)) as u64
    }

    pub const fn decode(value: u64) -> i64 {
        ((value >> 1) as i64) ^ -((value & 1) as i64)
    }

    pub const fn encode32(value: i32) -> u32 {
        ((value << 1) ^ (value >> 31)) as u32
    }

    pub const fn decode32(value: u32) -> i32 {
        ((value >> 1) as i32) ^ -((value & 1) as i32)
    }
}

//! Primitive codec: varints, zigzag-mapped integers and fixed-width values.
//!
//! Field types do not alias each other's storage. Each one states how its
//! bit pattern converts to and from the raw wire integer through the
//! [`VarintValue`], [`ZigzagValue`] and [`FixedValue`] traits.

use crate::wire::{zigzag, WireType};

use super::byte_viewer::ByteViewer;
use super::err::{Error, SerDeResult};

/// Longest varint accepted: ten 7-bit groups cover 64 bits.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const GROUP_MASK: u64 = 0x7f;

/// Number of 7-bit groups needed for `value`. Zero still takes one byte.
pub const fn varint_size(value: u64) -> usize {
    // bits used, rounded up to whole groups; `| 1` keeps zero at one byte
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Appends `value` as a varint, least significant group first.
pub fn write_varint(mut value: u64, buf: &mut Vec<u8>) {
    while value > GROUP_MASK {
        buf.push((value & GROUP_MASK) as u8 | CONTINUATION_BIT);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Reads one varint, consuming it from the view.
///
/// On failure the view may have been partially advanced; the caller abandons
/// the whole decode anyway.
pub fn read_varint(view: &mut ByteViewer<'_>) -> SerDeResult<u64> {
    let mut value = 0_u64;

    for group in 0..MAX_VARINT_LEN {
        let byte = view.next_byte()?;
        let bits = (byte as u64) & GROUP_MASK;

        // the tenth byte only has room for the top bit
        if group == MAX_VARINT_LEN - 1 && bits > 1 {
            return Err(Error::VarintOverflow);
        }

        value |= bits << (7 * group);

        if byte & CONTINUATION_BIT == 0 {
            return Ok(value);
        }
    }

    Err(Error::VarintOverflow)
}

/// Integer-like values carried as plain varints (`int32`, `int64`,
/// `uint32`, `uint64`, `bool` and enum numbers).
pub trait VarintValue: Copy {
    fn to_varint(self) -> u64;

    /// Narrowing keeps the low bits, matching protobuf parsers.
    fn from_varint(raw: u64) -> Self;
}

/// Impl varint conversion for integer primitives
macro_rules! varint_value {
    ($num_type: ty => $conv_type: ty) => {
        impl VarintValue for $num_type {
            fn to_varint(self) -> u64 {
                self as $conv_type as u64
            }

            fn from_varint(raw: u64) -> Self {
                raw as $num_type
            }
        }
    };
}

// signed values are sign-extended first, so negatives always take 10 bytes
varint_value! {i32 => i64}
varint_value! {i64 => i64}
varint_value! {u32 => u64}
varint_value! {u64 => u64}

impl VarintValue for bool {
    fn to_varint(self) -> u64 {
        self as u64
    }

    fn from_varint(raw: u64) -> Self {
        raw != 0
    }
}

/// Signed values carried as zigzag-mapped varints (`sint32`, `sint64`).
pub trait ZigzagValue: Copy {
    fn to_zigzag(self) -> u64;

    fn from_zigzag(raw: u64) -> Self;
}

impl ZigzagValue for i32 {
    fn to_zigzag(self) -> u64 {
        zigzag::encode32(self) as u64
    }

    fn from_zigzag(raw: u64) -> Self {
        zigzag::decode32(raw as u32)
    }
}

impl ZigzagValue for i64 {
    fn to_zigzag(self) -> u64 {
        zigzag::encode(self)
    }

    fn from_zigzag(raw: u64) -> Self {
        zigzag::decode(raw)
    }
}

/// Values carried as little-endian fixed-width words.
pub trait FixedValue: Copy {
    /// [`WireType::Fixed32`] or [`WireType::Fixed64`].
    const WIRE_TYPE: WireType;

    /// Width on the wire, in bytes.
    const SIZE: usize;

    fn write_fixed(self, buf: &mut Vec<u8>);

    fn read_fixed(view: &mut ByteViewer<'_>) -> SerDeResult<Self>;

    /// Whether the bit pattern is all zeroes.
    fn is_zero(self) -> bool;
}

/// Impl fixed-width conversion for numeric primitives
macro_rules! fixed_value {
    ($num_type: ty, $wire_type: expr, $bits: ty, $width: literal) => {
        impl FixedValue for $num_type {
            const WIRE_TYPE: WireType = $wire_type;
            const SIZE: usize = $width;

            fn write_fixed(self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.to_le_bytes());
            }

            fn read_fixed(view: &mut ByteViewer<'_>) -> SerDeResult<Self> {
                let bytes = view.next_bytes_fixed::<$width>()?;
                Ok(<$num_type>::from_le_bytes(bytes))
            }

            fn is_zero(self) -> bool {
                <$bits>::from_le_bytes(self.to_le_bytes()) == 0
            }
        }
    };
}

fixed_value! {u32, WireType::Fixed32, u32, 4}
fixed_value! {i32, WireType::Fixed32, u32, 4}
fixed_value! {f32, WireType::Fixed32, u32, 4}
fixed_value! {u64, WireType::Fixed64, u64, 8}
fixed_value! {i64, WireType::Fixed64, u64, 8}
fixed_value! {f64, WireType::Fixed64, u64, 8}

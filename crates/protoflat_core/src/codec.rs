//! Type-dispatch registry.
//!
//! One marker type per wire category implements [`TypeCodec`] for every
//! Rust type it can carry. Generated bindings name the marker for each field
//! (`Varint`, `Zigzag`, `Fixed`, `LengthDelimited`, `Nested`, `Packed<E>`)
//! and the compiler resolves the implementation statically, so there is no
//! per-field type switch at runtime.

use std::marker::PhantomData;

use crate::message::Message;
use crate::ser_de::byte_viewer::ByteViewer;
use crate::ser_de::container;
use crate::ser_de::err::{Error, SerDeResult};
use crate::ser_de::primitive::{
    read_varint, varint_size, write_varint, FixedValue, VarintValue, ZigzagValue,
};
use crate::wire::WireType;

/// Uniform `{size, serialize, deserialize}` contract for values of type `T`.
///
/// Sizes exclude the field tag but include any length prefix, so summing
/// tag sizes and value sizes gives the exact serialized length.
pub trait TypeCodec<T: ?Sized> {
    /// Wire type written in the tag of a single value.
    const WIRE_TYPE: WireType;

    /// Whether `value` is the implicit default, which is never written.
    fn is_default(value: &T) -> bool;

    fn size(value: &T) -> usize;

    fn serialize(value: &T, buf: &mut Vec<u8>);

    /// Decodes one value from the view into `value`.
    ///
    /// Scalars and strings overwrite, nested messages merge.
    fn deserialize(view: &mut ByteViewer<'_>, value: &mut T) -> SerDeResult<()>;
}

/// Codecs whose values may be packed into a single length-delimited run.
pub trait ScalarCodec<T>: TypeCodec<T> {
    /// Element width for fixed encodings, `None` for varints.
    const FIXED_WIDTH: Option<usize>;
}

/// `int32`, `int64`, `uint32`, `uint64`, `bool` and enum numbers.
#[derive(Debug, Clone, Copy)]
pub struct Varint;

/// `sint32` and `sint64`.
#[derive(Debug, Clone, Copy)]
pub struct Zigzag;

/// `fixed32`, `sfixed32`, `float`, `fixed64`, `sfixed64` and `double`.
#[derive(Debug, Clone, Copy)]
pub struct Fixed;

/// `string` and `bytes`.
#[derive(Debug, Clone, Copy)]
pub struct LengthDelimited;

/// Embedded messages, recursing into the message's own driver.
#[derive(Debug, Clone, Copy)]
pub struct Nested;

/// A packed run of scalars encoded element-wise by `E`.
#[derive(Debug, Clone, Copy)]
pub struct Packed<E>(PhantomData<E>);

impl<T: VarintValue> TypeCodec<T> for Varint {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn is_default(value: &T) -> bool {
        value.to_varint() == 0
    }

    fn size(value: &T) -> usize {
        varint_size(value.to_varint())
    }

    fn serialize(value: &T, buf: &mut Vec<u8>) {
        write_varint(value.to_varint(), buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut T) -> SerDeResult<()> {
        *value = T::from_varint(read_varint(view)?);
        Ok(())
    }
}

impl<T: VarintValue> ScalarCodec<T> for Varint {
    const FIXED_WIDTH: Option<usize> = None;
}

impl<T: ZigzagValue> TypeCodec<T> for Zigzag {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn is_default(value: &T) -> bool {
        value.to_zigzag() == 0
    }

    fn size(value: &T) -> usize {
        varint_size(value.to_zigzag())
    }

    fn serialize(value: &T, buf: &mut Vec<u8>) {
        write_varint(value.to_zigzag(), buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut T) -> SerDeResult<()> {
        *value = T::from_zigzag(read_varint(view)?);
        Ok(())
    }
}

impl<T: ZigzagValue> ScalarCodec<T> for Zigzag {
    const FIXED_WIDTH: Option<usize> = None;
}

impl<T: FixedValue> TypeCodec<T> for Fixed {
    const WIRE_TYPE: WireType = T::WIRE_TYPE;

    fn is_default(value: &T) -> bool {
        value.is_zero()
    }

    fn size(_: &T) -> usize {
        T::SIZE
    }

    fn serialize(value: &T, buf: &mut Vec<u8>) {
        value.write_fixed(buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut T) -> SerDeResult<()> {
        *value = T::read_fixed(view)?;
        Ok(())
    }
}

impl<T: FixedValue> ScalarCodec<T> for Fixed {
    const FIXED_WIDTH: Option<usize> = Some(T::SIZE);
}

impl TypeCodec<String> for LengthDelimited {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn is_default(value: &String) -> bool {
        value.is_empty()
    }

    fn size(value: &String) -> usize {
        container::delimited_size(value.len())
    }

    fn serialize(value: &String, buf: &mut Vec<u8>) {
        container::write_delimited(value.as_bytes(), buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut String) -> SerDeResult<()> {
        let payload = container::read_delimited(view)?.remaining();
        let text = std::str::from_utf8(payload).map_err(|_| Error::InvalidUtf8)?;

        value.clear();
        value.push_str(text);
        Ok(())
    }
}

impl TypeCodec<Vec<u8>> for LengthDelimited {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn is_default(value: &Vec<u8>) -> bool {
        value.is_empty()
    }

    fn size(value: &Vec<u8>) -> usize {
        container::delimited_size(value.len())
    }

    fn serialize(value: &Vec<u8>, buf: &mut Vec<u8>) {
        container::write_delimited(value, buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut Vec<u8>) -> SerDeResult<()> {
        let payload = container::read_delimited(view)?.remaining();

        value.clear();
        value.extend_from_slice(payload);
        Ok(())
    }
}

impl<M: Message> TypeCodec<M> for Nested {
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn is_default(value: &M) -> bool {
        value.is_default()
    }

    fn size(value: &M) -> usize {
        container::delimited_size(value.size())
    }

    fn serialize(value: &M, buf: &mut Vec<u8>) {
        write_varint(value.size() as u64, buf);
        value.serialize(buf);
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut M) -> SerDeResult<()> {
        let mut payload = container::read_delimited(view)?;
        value.merge(&mut payload)
    }
}

impl<E, T> TypeCodec<Vec<T>> for Packed<E>
where
    E: ScalarCodec<T>,
    T: Default,
{
    const WIRE_TYPE: WireType = WireType::LengthDelimited;

    fn is_default(value: &Vec<T>) -> bool {
        value.is_empty()
    }

    fn size(value: &Vec<T>) -> usize {
        container::delimited_size(container::packed_payload_size::<E, T>(value))
    }

    fn serialize(value: &Vec<T>, buf: &mut Vec<u8>) {
        container::write_packed::<E, T>(value, buf)
    }

    fn deserialize(view: &mut ByteViewer<'_>, value: &mut Vec<T>) -> SerDeResult<()> {
        container::read_packed::<E, T>(view, value)
    }
}

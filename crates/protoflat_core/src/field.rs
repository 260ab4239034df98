//! Field-level building blocks the generated message drivers are made of.
//!
//! Each helper takes the field's constant [`FieldHeader`] and the codec
//! marker that carries its values, e.g.
//! `field::size::<Varint, _>(Self::ID_TAG, &self.id)`.

use crate::codec::{Packed, ScalarCodec, TypeCodec};
use crate::ser_de::byte_viewer::ByteViewer;
use crate::ser_de::container;
use crate::ser_de::err::{Error, SerDeResult};
use crate::ser_de::primitive::write_varint;
use crate::wire::{FieldHeader, WireType};

/// Writes a tag.
pub fn write_header(header: FieldHeader, buf: &mut Vec<u8>) {
    write_varint(header.encode(), buf)
}

/// Fails unless the wire type read from the tag is the one declared.
pub fn check_wire_type(found: FieldHeader, expected: FieldHeader) -> SerDeResult<()> {
    match found.wire_type == expected.wire_type {
        true => Ok(()),
        false => Err(Error::WireTypeMismatch {
            field_number: expected.field_number,
            expected: expected.wire_type,
            found: found.wire_type,
        }),
    }
}

/// Size of a singular implicit-presence field; zero when it holds its default.
pub fn size<E, T>(header: FieldHeader, value: &T) -> usize
where
    E: TypeCodec<T>,
{
    match E::is_default(value) {
        true => 0,
        false => header.size() + E::size(value),
    }
}

/// Writes a singular implicit-presence field unless it holds its default.
pub fn serialize<E, T>(header: FieldHeader, value: &T, buf: &mut Vec<u8>)
where
    E: TypeCodec<T>,
{
    if !E::is_default(value) {
        write_header(header, buf);
        E::serialize(value, buf);
    }
}

/// Size of a field that is written even when it holds a default value
/// (oneof alternatives).
pub fn size_explicit<E, T>(header: FieldHeader, value: &T) -> usize
where
    E: TypeCodec<T>,
{
    header.size() + E::size(value)
}

/// Writes a field regardless of its value.
pub fn serialize_explicit<E, T>(header: FieldHeader, value: &T, buf: &mut Vec<u8>)
where
    E: TypeCodec<T>,
{
    write_header(header, buf);
    E::serialize(value, buf);
}

/// Decodes a singular field into `value`.
pub fn deserialize<E, T>(
    found: FieldHeader,
    expected: FieldHeader,
    view: &mut ByteViewer<'_>,
    value: &mut T,
) -> SerDeResult<()>
where
    E: TypeCodec<T>,
{
    check_wire_type(found, expected)?;
    E::deserialize(view, value)
}

/// Size of an unpacked repeated field: one tag per element, every element
/// written.
pub fn size_repeated<E, T>(header: FieldHeader, values: &[T]) -> usize
where
    E: TypeCodec<T>,
{
    values.len() * header.size() + values.iter().map(E::size).sum::<usize>()
}

/// Writes an unpacked repeated field as tag and value pairs.
pub fn serialize_repeated<E, T>(header: FieldHeader, values: &[T], buf: &mut Vec<u8>)
where
    E: TypeCodec<T>,
{
    for value in values {
        write_header(header, buf);
        E::serialize(value, buf);
    }
}

/// Decodes one element of a repeated string, bytes or message field and
/// appends it.
pub fn deserialize_repeated<E, T>(
    found: FieldHeader,
    expected: FieldHeader,
    view: &mut ByteViewer<'_>,
    values: &mut Vec<T>,
) -> SerDeResult<()>
where
    E: TypeCodec<T>,
    T: Default,
{
    check_wire_type(found, expected)?;

    let mut value = T::default();
    E::deserialize(view, &mut value)?;
    values.push(value);

    Ok(())
}

/// Size of a packed repeated field; zero when empty.
pub fn size_packed<E, T>(header: FieldHeader, values: &Vec<T>) -> usize
where
    E: ScalarCodec<T>,
    T: Default,
{
    size::<Packed<E>, Vec<T>>(header, values)
}

/// Writes a packed repeated field as one tag and one run.
pub fn serialize_packed<E, T>(header: FieldHeader, values: &Vec<T>, buf: &mut Vec<u8>)
where
    E: ScalarCodec<T>,
    T: Default,
{
    serialize::<Packed<E>, Vec<T>>(header, values, buf)
}

/// Decodes a repeated scalar field, accepting both encodings.
///
/// A length-delimited tag carries a packed run; a tag with the element's own
/// wire type carries a single element. Either way the elements are appended,
/// so a peer that packs differently still decodes to the same sequence.
pub fn deserialize_scalars<E, T>(
    found: FieldHeader,
    expected: FieldHeader,
    view: &mut ByteViewer<'_>,
    values: &mut Vec<T>,
) -> SerDeResult<()>
where
    E: ScalarCodec<T>,
    T: Default,
{
    if found.wire_type == WireType::LengthDelimited {
        return container::read_packed::<E, T>(view, values);
    }

    match found.wire_type == E::WIRE_TYPE {
        true => {
            let mut value = T::default();
            E::deserialize(view, &mut value)?;
            values.push(value);
            Ok(())
        }
        false => Err(Error::WireTypeMismatch {
            field_number: expected.field_number,
            expected: expected.wire_type,
            found: found.wire_type,
        }),
    }
}

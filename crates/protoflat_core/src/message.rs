//! Message driver traits.
//!
//! Bindings for a message type implement the per-field parts of [`Message`]
//! (`size`, `serialize`, `merge_field`, `is_default`); the tag-driven decode
//! loop and the unknown-field skip live here once for every message.

use crate::ser_de::byte_viewer::ByteViewer;
use crate::ser_de::container;
use crate::ser_de::err::{Error, SerDeResult};
use crate::ser_de::primitive::read_varint;
use crate::wire::{FieldHeader, WireType};

/// A message type with generated field dispatch.
pub trait Message: Default {
    /// Exact number of bytes [`Message::serialize`] will write.
    fn size(&self) -> usize;

    /// Writes every non-default field in declaration order.
    ///
    /// Callers size the buffer through [`Message::size`] first, see
    /// [`crate::ser_de::serialize_into`].
    fn serialize(&self, buf: &mut Vec<u8>);

    /// Decodes one field whose tag has already been read.
    ///
    /// Returns `Ok(false)` when the field number is not declared on this
    /// message, leaving the value bytes unread.
    fn merge_field(&mut self, header: FieldHeader, view: &mut ByteViewer<'_>) -> SerDeResult<bool>;

    /// Whether every field holds its default value, i.e. the message encodes
    /// to nothing.
    fn is_default(&self) -> bool;

    /// Decodes fields until the view is exhausted, merging them into `self`.
    fn merge(&mut self, view: &mut ByteViewer<'_>) -> SerDeResult<()> {
        while !view.is_end() {
            let header = FieldHeader::decode(read_varint(view)?)?;

            match self.merge_field(header, view)? {
                true => (),
                false => {
                    log::trace!(
                        "skipping unknown field {} ({:?}) of {}",
                        header.field_number,
                        header.wire_type,
                        std::any::type_name::<Self>()
                    );
                    skip_field(header.wire_type, view)?;
                }
            }
        }

        Ok(())
    }

    /// Decodes a fresh value from the view.
    fn deserialize(view: &mut ByteViewer<'_>) -> SerDeResult<Self> {
        let mut message = Self::default();
        message.merge(view)?;

        Ok(message)
    }

    /// Resets every field to its default.
    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A oneof group: at most one alternative is set, carried as `Option<Self>`.
///
/// The active alternative is always written under its own tag, even when it
/// holds a default value.
pub trait Oneof: Sized {
    /// Field numbers of every alternative.
    const TAGS: &'static [u32];

    /// Size of the active alternative, tag included.
    fn size(&self) -> usize;

    /// Writes the active alternative with its tag.
    fn serialize(&self, buf: &mut Vec<u8>);

    /// Decodes an alternative into `field` if `header` belongs to this group.
    ///
    /// Returns `Ok(false)` for field numbers outside the group.
    fn merge(
        field: &mut Option<Self>,
        header: FieldHeader,
        view: &mut ByteViewer<'_>,
    ) -> SerDeResult<bool>;
}

/// Whether `declared` and `expected` hold the same field numbers, in any
/// order. Both lists are assumed free of duplicates.
///
/// Message bindings check the tags they route to a oneof against
/// [`Oneof::TAGS`] with this at compile time.
pub const fn tags_match(declared: &[u32], expected: &[u32]) -> bool {
    if declared.len() != expected.len() {
        return false;
    }

    let mut i = 0;
    while i < declared.len() {
        let mut found = false;
        let mut j = 0;
        while j < expected.len() {
            if declared[i] == expected[j] {
                found = true;
            }
            j += 1;
        }
        if !found {
            return false;
        }
        i += 1;
    }

    true
}

/// A schema enum. Fields store the raw `i32` so that numbers unknown to this
/// schema version survive a round trip.
pub trait Enumeration: Copy + Default + Into<i32> {
    /// The variant with this number, if declared.
    fn from_i32(value: i32) -> Option<Self>;

    /// The variant name as written in the schema.
    fn as_str_name(&self) -> &'static str;

    /// Whether `value` names a declared variant.
    fn is_valid(value: i32) -> bool {
        Self::from_i32(value).is_some()
    }
}

/// Discards the value of a field nobody claimed, based only on its wire type.
pub fn skip_field(wire_type: WireType, view: &mut ByteViewer<'_>) -> SerDeResult<()> {
    match wire_type {
        WireType::Varint => read_varint(view).map(|_| ()),
        WireType::Fixed64 => view.advance(8),
        WireType::Fixed32 => view.advance(4),
        WireType::LengthDelimited => container::read_delimited(view).map(|_| ()),
        WireType::StartGroup | WireType::EndGroup => Err(Error::UnsupportedWireType(wire_type)),
    }
}

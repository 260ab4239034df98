//! Runtime codec for protobuf-compatible binary messages.
//!
//! Generated bindings (see `protoflat_codegen`) and the derive macros in
//! `protoflat_macros` expand to calls into this crate: [`field`] helpers
//! build each message's [`Message`] driver out of the [`codec`] markers.

pub mod codec;
pub mod field;
pub mod message;
pub mod ser_de;
pub mod wire;

pub use codec::{Fixed, LengthDelimited, Nested, Packed, ScalarCodec, TypeCodec, Varint, Zigzag};
pub use message::{skip_field, tags_match, Enumeration, Message, Oneof};
pub use ser_de::byte_viewer::ByteViewer;
pub use ser_de::err::{Error, SerDeResult};
pub use ser_de::{deserialize, deserialize_into, merge_from, serialize, serialize_into};
pub use wire::{zigzag, FieldHeader, WireType, MAX_FIELD_NUMBER};

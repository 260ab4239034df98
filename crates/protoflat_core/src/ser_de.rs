//! Serialization and deserialization module

use crate::message::Message;

use self::byte_viewer::ByteViewer;
use self::err::SerDeResult;

pub mod byte_viewer;
pub mod container;
pub mod err;
pub mod primitive;

/// Serialize a message to a new vector of bytes
pub fn serialize<M: Message>(message: &M) -> Vec<u8> {
    let mut buf = Vec::new();
    serialize_into(message, &mut buf);

    buf
}

/// Append a serialized message to `buf`.
///
/// The message is sized once up front, so the buffer grows at most once.
/// Clear the buffer between calls when reusing it.
pub fn serialize_into<M: Message>(message: &M, buf: &mut Vec<u8>) {
    let size = message.size();
    buf.reserve(size);

    let start = buf.len();
    message.serialize(buf);

    debug_assert_eq!(
        buf.len() - start,
        size,
        "size() disagrees with serialize() for {}",
        std::any::type_name::<M>()
    );
}

/// Deserialize a message from a slice of bytes
pub fn deserialize<M: Message>(bytes: &[u8]) -> SerDeResult<M> {
    let mut view = ByteViewer::from_slice(bytes);

    M::deserialize(&mut view).map_err(|e| {
        log::debug!("failed to deserialize {}: {}", std::any::type_name::<M>(), e);
        e
    })
}

/// Reset `message` to its defaults, then decode `bytes` into it.
///
/// On failure the message is left reset; no partially decoded value survives.
pub fn deserialize_into<M: Message>(bytes: &[u8], message: &mut M) -> SerDeResult<()> {
    message.clear();

    merge_from(bytes, message).map_err(|e| {
        message.clear();
        e
    })
}

/// Decode `bytes` into an existing message following merge rules: scalars
/// overwrite, repeated fields append, nested messages merge.
pub fn merge_from<M: Message>(bytes: &[u8], message: &mut M) -> SerDeResult<()> {
    let mut view = ByteViewer::from_slice(bytes);

    message.merge(&mut view).map_err(|e| {
        log::debug!("failed to merge into {}: {}", std::any::type_name::<M>(), e);
        e
    })
}

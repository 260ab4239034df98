//! Container codec: length-delimited runs and packed repeated scalars.
//!
//! Both share the same framing, a varint byte length followed by the payload.
//! Unpacked repeated fields are not handled here; the message driver writes
//! one tag per element for those.

use crate::codec::ScalarCodec;

use super::byte_viewer::ByteViewer;
use super::err::{Error, SerDeResult};
use super::primitive::{read_varint, varint_size, write_varint};

/// Encoded size of a payload of `payload_len` bytes, length prefix included.
pub const fn delimited_size(payload_len: usize) -> usize {
    varint_size(payload_len as u64) + payload_len
}

/// Writes the length prefix and then the payload.
pub fn write_delimited(payload: &[u8], buf: &mut Vec<u8>) {
    write_varint(payload.len() as u64, buf);
    buf.extend_from_slice(payload);
}

/// Reads a length prefix and returns a view over exactly that many bytes.
pub fn read_delimited<'a>(view: &mut ByteViewer<'a>) -> SerDeResult<ByteViewer<'a>> {
    let len = read_varint(view)?;

    // a length that does not fit in memory cannot be satisfied by the input
    let len = usize::try_from(len).map_err(|_| Error::TruncatedInput)?;
    view.split_to(len)
}

/// Sum of the element encodings, without the length prefix.
pub fn packed_payload_size<E, T>(values: &[T]) -> usize
where
    E: ScalarCodec<T>,
{
    values.iter().map(E::size).sum()
}

/// Writes one length prefix followed by every element, untagged.
pub fn write_packed<E, T>(values: &[T], buf: &mut Vec<u8>)
where
    E: ScalarCodec<T>,
{
    write_varint(packed_payload_size::<E, T>(values) as u64, buf);
    for value in values {
        E::serialize(value, buf);
    }
}

/// Reads a packed run and appends its elements to `values`.
///
/// Every declared byte must belong to a whole element; an element cut short
/// by the end of the run fails with [`Error::MalformedPackedRun`].
pub fn read_packed<E, T>(view: &mut ByteViewer<'_>, values: &mut Vec<T>) -> SerDeResult<()>
where
    E: ScalarCodec<T>,
    T: Default,
{
    let mut run = read_delimited(view)?;

    if let Some(width) = E::FIXED_WIDTH {
        match run.distance_to_end() % width == 0 {
            true => values.reserve(run.distance_to_end() / width),
            false => return Err(Error::MalformedPackedRun),
        }
    }

    while !run.is_end() {
        let mut value = T::default();
        E::deserialize(&mut run, &mut value).map_err(|e| match e {
            Error::TruncatedInput => Error::MalformedPackedRun,
            other => other,
        })?;
        values.push(value);
    }

    Ok(())
}

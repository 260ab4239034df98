//! Read cursor over a borrowed byte slice.

use super::err::{Error, SerDeResult};

/// A reference into an existing slice of bytes.
///
/// Reads consume a prefix of the remaining bytes. Nothing is copied unless
/// the caller copies the returned slice into a destination field.
#[derive(Debug, Clone, Copy)]
pub struct ByteViewer<'arr> {
    slice: &'arr [u8],
    offset: usize,
}

impl<'arr> ByteViewer<'arr> {
    /// Create a new viewer on a byte slice
    pub fn from_slice(s: &'arr [u8]) -> Self {
        Self { slice: s, offset: 0 }
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_end(&self) -> bool {
        self.offset >= self.slice.len()
    }

    /// Number of bytes left in the view.
    pub fn distance_to_end(&self) -> usize {
        self.slice.len() - self.offset
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the unconsumed bytes without advancing.
    pub fn remaining(&self) -> &'arr [u8] {
        &self.slice[self.offset..]
    }

    /// Peek at the next byte in the slice
    pub fn peek(&self) -> Option<u8> {
        self.slice.get(self.offset).copied()
    }

    /// Advance the view on the underlying slice.
    pub fn advance(&mut self, steps: usize) -> SerDeResult<()> {
        match steps <= self.distance_to_end() {
            true => {
                self.offset += steps;
                Ok(())
            }
            false => Err(Error::TruncatedInput),
        }
    }

    /// Return the next byte and advance the view
    pub fn next_byte(&mut self) -> SerDeResult<u8> {
        let b = self.peek().ok_or(Error::TruncatedInput)?;
        self.offset += 1;

        Ok(b)
    }

    /// Returns the next `size` bytes and advances past them.
    pub fn next_bytes(&mut self, size: usize) -> SerDeResult<&'arr [u8]> {
        let start = self.offset;
        self.advance(size)?;

        Ok(&self.slice[start..self.offset])
    }

    /// Returns a copy of the next bytes as a fixed-size array.
    pub fn next_bytes_fixed<const ARR_SIZE: usize>(&mut self) -> SerDeResult<[u8; ARR_SIZE]> {
        let mut arr = [0_u8; ARR_SIZE];
        arr.copy_from_slice(self.next_bytes(ARR_SIZE)?);

        Ok(arr)
    }

    /// Splits off the next `size` bytes as their own view, advancing this one
    /// past them.
    ///
    /// Length-delimited payloads are decoded through the split view so a
    /// nested decode can never read past its declared length.
    pub fn split_to(&mut self, size: usize) -> SerDeResult<ByteViewer<'arr>> {
        self.next_bytes(size).map(ByteViewer::from_slice)
    }
}

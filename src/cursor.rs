//! Bounds checked primitive readers over an in memory MIDI buffer

use crate::error::{ParseError, ParseResult};

/// Maximum number of bytes in a MIDI variable-length quantity
const MAX_VAR_INT_BYTES: usize = 4;

/// A read position into an immutable byte buffer.
///
/// Every read either consumes exactly the bytes it decodes or fails with
/// [`ParseErrorKind::OutOfBounds`](crate::error::ParseErrorKind::OutOfBounds) without moving.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// The whole buffer
    data: &'a [u8],
    /// Offset of the next unread byte, never greater than `data.len()`
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns true if every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Takes the next `n` bytes, advancing past them
    fn take(&mut self, n: usize) -> ParseResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(ParseError::oob(self.position));
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    /// Reads the next `N` bytes as an array
    fn take_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Returns the next byte without consuming it
    pub fn peek_u8(&self) -> ParseResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ParseError::oob(self.position))
    }

    /// Reads a single byte
    pub fn read_u8(&mut self) -> ParseResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads a big-endian 16 bit integer
    pub fn read_u16(&mut self) -> ParseResult<u16> {
        self.take_array().map(u16::from_be_bytes)
    }

    /// Reads a big-endian 32 bit integer
    pub fn read_u32(&mut self) -> ParseResult<u32> {
        self.take_array().map(u32::from_be_bytes)
    }

    /// Reads exactly `len` bytes as ASCII. Bytes outside the ASCII range become `'?'`.
    pub fn read_ascii(&mut self, len: usize) -> ParseResult<String> {
        let bytes = self.take(len)?;
        Ok(bytes
            .iter()
            .map(|&byte| if byte.is_ascii() { byte as char } else { '?' })
            .collect())
    }

    /// Reads a MIDI variable-length quantity.
    ///
    /// Each byte adds its low 7 bits to the result and a set MSB means another byte follows.
    /// At most 4 bytes are read, even if the fourth still has its MSB set.
    pub fn read_var_int(&mut self) -> ParseResult<u32> {
        const MASK: u8 = 0x7F;

        let start = self.position;
        let mut result: u32 = 0;

        for _ in 0..MAX_VAR_INT_BYTES {
            let Ok(byte) = self.read_u8() else {
                self.position = start;
                return Err(ParseError::oob(start));
            };

            result <<= 7;
            result |= (byte & MASK) as u32;

            if !msb_is_one(byte) {
                break;
            }
        }

        Ok(result)
    }

    /// Advances past `n` bytes without decoding them
    pub fn skip(&mut self, n: usize) -> ParseResult<()> {
        self.take(n).map(|_| ())
    }
}

/// Returns true if the msb of a byte is 1
pub(crate) fn msb_is_one(byte: u8) -> bool {
    byte >> 7 == 1
}

//! Chunk header reading and the header/track chunk decoders

use crate::{
    cursor::ByteCursor,
    error::{ParseError, ParseErrorKind, ParseResult},
    Chunk,
};

pub mod chunk_types;
pub mod header;
pub mod track;

impl Chunk {
    /// Reads a chunk's type tag and length, failing with `mismatch` if the tag is not `expected`.
    ///
    /// The cursor is left at the start of the chunk body.
    pub fn read_expecting(
        cursor: &mut ByteCursor<'_>,
        expected: [char; 4],
        mismatch: ParseErrorKind,
    ) -> ParseResult<Self> {
        let start = cursor.position();
        let tag = cursor.read_ascii(expected.len())?;

        if !tag.chars().eq(expected) {
            return Err(ParseError::new(start, mismatch));
        }

        let length = cursor.read_u32()?;
        log::trace!("Read {tag} chunk of {length} bytes at offset {start}");

        Ok(Self {
            chunk_type: expected,
            length,
        })
    }
}

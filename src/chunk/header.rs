//! Header Chunk decoding

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    chunk::chunk_types::{HEADER_CHUNK, HEADER_CHUNK_LENGTH},
    cursor::ByteCursor,
    error::{ParseError, ParseErrorKind, ParseResult},
    Chunk,
};

/// Header chunk data, including format, ntrks and division as 3 16 bit unsigned integers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderChunk {
    /// The MIDI format, not validated
    format: u16,
    /// Number of tracks
    ntrks: u16,
    /// Metrical division, top bit always clear
    ticks_per_quarter_note: u16,
}

impl HeaderChunk {
    /// Decodes the `MThd` chunk at the cursor, leaving the cursor at the first track chunk
    pub fn read(cursor: &mut ByteCursor<'_>) -> ParseResult<Self> {
        const SMPTE_MASK: u16 = 0x8000;

        let length_position = cursor.position() + HEADER_CHUNK.len();
        let chunk =
            Chunk::read_expecting(cursor, HEADER_CHUNK, ParseErrorKind::InvalidHeaderMagic)?;

        if chunk.length != HEADER_CHUNK_LENGTH {
            return Err(ParseError::new(
                length_position,
                ParseErrorKind::InvalidHeaderLength(chunk.length),
            ));
        }

        let format = cursor.read_u16()?;
        let ntrks = cursor.read_u16()?;

        let division_position = cursor.position();
        let division = cursor.read_u16()?;

        if division & SMPTE_MASK != 0 {
            return Err(ParseError::new(
                division_position,
                ParseErrorKind::UnsupportedTimingMode,
            ));
        }

        Ok(Self {
            format,
            ntrks,
            ticks_per_quarter_note: division,
        })
    }

    /// Raw format value
    pub fn format(&self) -> u16 {
        self.format
    }

    /// Number of track chunks the header declares
    pub fn ntrks(&self) -> u16 {
        self.ntrks
    }

    /// Ticks per quarter note
    pub fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }
}

/// The overall organization of the MIDI file. Only three values are valid, making most of the 16
/// bits irrelevant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// The file contains a single multi-channel track
    Zero,
    /// The file contains one or more simultaneous tracks (or MIDI outputs) of a sequence
    One,
    /// The file contains one or more sequentially independent single-track patterns
    Two,
}

/// Error struct representing an invalid format specifier
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid header format {0}")]
pub struct InvalidFormat(pub u16);

impl TryFrom<u16> for Format {
    type Error = InvalidFormat;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Format::Zero),
            1 => Ok(Format::One),
            2 => Ok(Format::Two),
            _ => Err(InvalidFormat(value)),
        }
    }
}

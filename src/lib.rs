//! # smfread
//!
//! A small Standard MIDI File (SMF) decoder. A whole `.mid` file is read into memory and decoded
//! into its header metadata plus, for every track, the channel events and text events it holds.
//!
//! ## Overview
//!
//! MIDI files are structured as a series of chunks. Each chunk contains a 4-character ASCII
//! type identifier and a 32-bit length that specifies how many bytes of data follow. A file starts
//! with one `MThd` header chunk, followed by one `MTrk` chunk per track.
//!
//! - **Channel events**: note on/off, aftertouch, control and program changes and pitch bends, with
//!   absolute tick times and running status resolved.
//! - **Meta events**: tempo, time signature and key signature are decoded and stored alongside
//!   the channel events, text meta events (`0x01..=0x0F`) are collected separately, and every
//!   other meta or system exclusive event is skipped.
//!
//! ## Example Usage
//!
//! ```rust
//! use smfread::{EventKind, MidiFile};
//!
//! let bytes = [
//!     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0,
//!     b'M', b'T', b'r', b'k', 0, 0, 0, 8,
//!     0x00, 0x90, 0x3C, 0x40,
//!     0x60, 0x80, 0x3C, 0x00,
//! ];
//!
//! let midi = MidiFile::parse(&bytes).expect("Parse in memory MIDI file");
//! assert_eq!(midi.ticks_per_quarter_note(), 480);
//!
//! for event in midi.tracks()[0].channel_events() {
//!     if let Some(EventKind::NoteOn { note, .. }) = event.kind() {
//!         println!("Note {note} on at tick {}", event.time());
//!     }
//! }
//! ```
//!
//! ## Library Structure
//!
//! - **[`cursor`]**: The bounds checked [`ByteCursor`] all decoding reads go through.
//! - **[`chunk`]**: Header and track chunk decoding, along with the decoded event model.
//! - **[`reader`]**: The [`MidiReadable`] trait for pulling a file's bytes from a path or stream.
//! - **[`error`]**: Decoding and loading errors.

pub mod chunk;
pub mod cursor;
pub mod error;
pub mod reader;

use std::{io::Read, path::Path};

pub use chunk::{
    header::{Format, HeaderChunk},
    track::{
        event::{
            ChannelEvent, ControlChangeType, EventKind, MetaEventType, MidiEventType, TextEvent,
            TextEventType,
        },
        meta::{KeySignature, Tempo, TimeSignature},
        Track,
    },
};
pub use cursor::ByteCursor;
pub use error::{LoadError, ParseError, ParseErrorKind, ParseResult};
pub use reader::{MidiReadable, MidiStream};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a raw MIDI Chunk header.
/// A MIDI Chunk consists of a 4-character ASCII type identifier and a 32-bit unsigned integer specifying the length of its data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chunk {
    /// 4 character ASCII chunk type
    pub chunk_type: [char; 4],
    /// Length of the data that follows
    length: u32,
}

impl Chunk {
    /// Gets the length of the chunk as a usize
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Returns if the chunk has no attributed data
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// A fully decoded MIDI file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MidiFile {
    /// Raw header format value, 0, 1 or 2 for well formed files
    format: u16,
    /// Ticks per quarter note from the header division
    ticks_per_quarter_note: u16,
    /// Every track, in file order
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Decodes a complete MIDI file held in memory.
    ///
    /// Fails on the first structural error; no partially decoded file is returned.
    pub fn parse(data: &[u8]) -> ParseResult<Self> {
        let mut cursor = ByteCursor::new(data);
        let header = HeaderChunk::read(&mut cursor)?;

        let tracks = (0..usize::from(header.ntrks()))
            .map(|index| Track::read(&mut cursor, index))
            .collect::<ParseResult<Vec<_>>>()?;

        if !cursor.is_empty() {
            log::debug!(
                "Ignoring {} trailing bytes after the last track",
                cursor.remaining()
            );
        }

        Ok(Self {
            format: header.format(),
            ticks_per_quarter_note: header.ticks_per_quarter_note(),
            tracks,
        })
    }

    /// Reads the whole file at `path` and decodes it
    pub fn from_path<PATH: AsRef<Path>>(path: PATH) -> Result<Self, LoadError> {
        let bytes = path.get_midi_bytes()?;
        Ok(Self::parse(&bytes)?)
    }

    /// Drains `reader` into memory and decodes the result
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let bytes = MidiStream(reader).get_midi_bytes()?;
        Ok(Self::parse(&bytes)?)
    }

    /// Raw header format value
    pub fn format(&self) -> u16 {
        self.format
    }

    /// The header format as a [`Format`], if it is one of the three defined values
    pub fn format_kind(&self) -> Option<Format> {
        Format::try_from(self.format).ok()
    }

    /// Ticks per quarter note
    pub fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// Number of tracks
    pub fn tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// All decoded tracks in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

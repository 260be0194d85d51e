//! Error types raised while decoding or loading a MIDI file

use thiserror::Error;

/// The reason a MIDI byte buffer was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The file does not start with the `MThd` chunk tag
    #[error("Invalid file header (expected MThd)")]
    InvalidHeaderMagic,
    /// The header chunk declares a length other than 6
    #[error("Invalid header length {0} (expected 6)")]
    InvalidHeaderLength(u32),
    /// The division field has its top bit set
    #[error("Invalid timing mode (SMPTE timecode not supported)")]
    UnsupportedTimingMode,
    /// A track chunk does not start with the `MTrk` chunk tag
    #[error("Invalid track header (expected MTrk)")]
    InvalidTrackMagic,
    /// A read would run past the end of the buffer
    #[error("Read out of bounds")]
    OutOfBounds,
}

/// A decoding error together with the byte offset it was detected at
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("At byte {position}: {kind}")]
pub struct ParseError {
    /// Offset of the read that failed
    position: usize,
    /// What went wrong
    kind: ParseErrorKind,
}

impl ParseError {
    /// Creates an error of the given kind at `position`
    pub const fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// Creates an out of bounds error at `position`
    pub const fn oob(position: usize) -> Self {
        Self::new(position, ParseErrorKind::OutOfBounds)
    }

    /// Byte offset where the failing read started
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The kind of error
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// True if the buffer ended before decoding was done
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ParseErrorKind::OutOfBounds)
    }
}

/// Result alias for decoding operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for loading a MIDI file from a path or a stream
#[derive(Debug, Error)]
pub enum LoadError {
    /// The byte source could not be read
    #[error("Failed to read MIDI bytes")]
    Io(#[from] std::io::Error),
    /// The bytes were read but are not a valid MIDI file
    #[error("Failed to parse MIDI file")]
    Parse(#[from] ParseError),
}

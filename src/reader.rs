//! MIDI byte sources. A file path, a readable stream or an in memory buffer is drained fully
//! into memory before decoding starts.

use std::{convert::Infallible, io::Read, path::Path};

/// Trait that allows for different types to be translated to a MIDI parseable buffer
pub trait MidiReadable {
    /// Error type that may be returned while collecting the bytes
    type Error;
    /// Reads every byte of the source into memory
    fn get_midi_bytes(self) -> Result<Vec<u8>, Self::Error>;
}

/// Wrapper struct to allow passing `Vec<u8>` to the MidiReadable trait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiData(pub Vec<u8>);

impl MidiReadable for MidiData {
    type Error = Infallible;
    fn get_midi_bytes(self) -> Result<Vec<u8>, Self::Error> {
        Ok(self.0)
    }
}

/// Wrapper struct to allow passing any [`Read`] implementor to the MidiReadable trait
#[derive(Debug)]
pub struct MidiStream<R>(pub R);

impl<R: Read> MidiReadable for MidiStream<R> {
    type Error = std::io::Error;
    fn get_midi_bytes(mut self) -> Result<Vec<u8>, Self::Error> {
        let mut bytes = vec![];
        self.0.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl<PATH> MidiReadable for PATH
where
    PATH: AsRef<Path>,
{
    type Error = std::io::Error;
    fn get_midi_bytes(self) -> Result<Vec<u8>, Self::Error> {
        let path = self.as_ref();
        log::debug!("Reading MIDI file {}", path.display());
        std::fs::read(path)
    }
}

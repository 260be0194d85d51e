//! Track chunk decoding

use event::{ChannelEvent, MidiEventType, TextEvent};
use meta::META_EVENT_STATUS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    chunk::chunk_types::TRACK_DATA_CHUNK,
    cursor::{msb_is_one, ByteCursor},
    error::{ParseErrorKind, ParseResult},
    Chunk,
};

pub mod event;
pub mod meta;
pub mod sysex;

/// A decoded track chunk
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    /// Zero based position of the track in the file
    index: usize,
    /// Channel events and decoded meta events, in file order
    channel_events: Vec<ChannelEvent>,
    /// Text meta events, in file order
    text_events: Vec<TextEvent>,
}

impl Track {
    /// Decodes the `MTrk` chunk at the cursor.
    ///
    /// Reads stop at the track's declared end, except for an event that straddles it, which is
    /// read to completion as long as the buffer holds its bytes.
    pub fn read(cursor: &mut ByteCursor<'_>, index: usize) -> ParseResult<Self> {
        let chunk =
            Chunk::read_expecting(cursor, TRACK_DATA_CHUNK, ParseErrorKind::InvalidTrackMagic)?;
        let track_end = cursor.position().saturating_add(chunk.len());

        let mut track = Self {
            index,
            channel_events: vec![],
            text_events: vec![],
        };
        let mut decoder = TrackDecoder::default();

        while cursor.position() < track_end {
            match decoder.read_event(cursor)? {
                Some(TrackEvent::Channel(event)) => track.channel_events.push(event),
                Some(TrackEvent::Text(event)) => track.text_events.push(event),
                None => {}
            }
        }

        if cursor.position() != track_end {
            log::warn!(
                "Track {index} overran its declared end {track_end} by {} bytes",
                cursor.position() - track_end
            );
        }

        Ok(track)
    }

    /// Zero based position of the track in the file
    pub fn index(&self) -> usize {
        self.index
    }

    /// Channel events and the tempo, time signature and key signature meta events
    pub fn channel_events(&self) -> &[ChannelEvent] {
        &self.channel_events
    }

    /// Text meta events
    pub fn text_events(&self) -> &[TextEvent] {
        &self.text_events
    }
}

/// An event produced by a single decode step
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrackEvent {
    /// Goes into [`Track::channel_events`]
    Channel(ChannelEvent),
    /// Goes into [`Track::text_events`]
    Text(TextEvent),
}

/// Decoding state carried from one event of a track to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TrackDecoder {
    /// Absolute tick time of the last event
    time: u64,
    /// Last status byte seen, 0 before the first one
    running_status: u8,
}

impl TrackDecoder {
    /// Decodes one delta time and event, returning `None` for skipped events
    pub(crate) fn read_event(
        &mut self,
        cursor: &mut ByteCursor<'_>,
    ) -> ParseResult<Option<TrackEvent>> {
        self.time += u64::from(cursor.read_var_int()?);

        // A data byte here means the previous status is reused
        let peek = cursor.peek_u8()?;
        if msb_is_one(peek) {
            self.running_status = peek;
            cursor.skip(1)?;
        }

        let status = self.running_status;

        if status & 0xF0 != 0xF0 {
            self.read_channel_event(cursor, status)
        } else if status == META_EVENT_STATUS {
            meta::read_meta_event(cursor, self.time)
        } else if sysex::is_sysex_status(status) {
            sysex::skip_sysex_event(cursor)?;
            Ok(None)
        } else {
            log::debug!(
                "Skipping byte after status {status:#04X} at offset {}",
                cursor.position()
            );
            cursor.skip(1)?;
            Ok(None)
        }
    }

    /// Reads the data bytes of a channel message with the given status
    fn read_channel_event(
        &self,
        cursor: &mut ByteCursor<'_>,
        status: u8,
    ) -> ParseResult<Option<TrackEvent>> {
        let Ok(mut event_type) = MidiEventType::try_from(status & 0xF0) else {
            // No status seen yet, the message still carries two data bytes
            let position = cursor.position();
            let data1 = cursor.read_u8()?;
            let data2 = cursor.read_u8()?;
            log::warn!(
                "Skipping data bytes {data1:#04X} {data2:#04X} with no running status at offset {position}"
            );
            return Ok(None);
        };
        let channel = (status & 0x0F) + 1;

        let data1 = cursor.read_u8()?;
        let data2 = if event_type.data_bytes() == 2 {
            cursor.read_u8()?
        } else {
            0
        };

        // Zero velocity note on is a note off
        if event_type == MidiEventType::NoteOn && data2 == 0 {
            event_type = MidiEventType::NoteOff;
        }

        Ok(Some(TrackEvent::Channel(ChannelEvent::new(
            self.time, event_type, channel, data1, data2,
        ))))
    }
}

//! Meta Event decoding

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    event::{ChannelEvent, MetaEventType, MidiEventType, TextEvent},
    TrackEvent,
};
use crate::{cursor::ByteCursor, error::ParseResult};

/// Status byte that starts every meta event
pub const META_EVENT_STATUS: u8 = 0xFF;

/// Microseconds in a minute
const MICROSECONDS_PER_MINUTE: f64 = 60_000_000.0;

/// A decoded tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tempo {
    /// Beats per minute, truncated to 8 bits
    pub bpm: u8,
}

/// A decoded time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSignature {
    /// The time signature's numerator
    pub numerator: u8,
    /// The time signature's denominator, already raised from its power of two exponent
    pub denominator: u8,
}

/// A key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative
    pub sharps_flats: i8,
    /// True if in minor, false if in major
    pub minor: bool,
}

/// Returns true for the text meta event sub-types
pub fn is_text_event(meta_type: u8) -> bool {
    (0x01..=0x0F).contains(&meta_type)
}

/// Converts microseconds per quarter note to beats per minute, keeping only the low 8 bits
pub fn bpm_from_mspqn(mspqn: u32) -> u8 {
    let bpm = (MICROSECONDS_PER_MINUTE / f64::from(mspqn)).round();
    // Float to int casts saturate, so a zero tempo ends up as 255
    bpm as u32 as u8
}

/// Raises 2 to the power of a time signature's denominator exponent, keeping only the low 8 bits
pub fn denominator_from_exponent(exponent: u8) -> u8 {
    1u32.checked_shl(u32::from(exponent)).unwrap_or(0) as u8
}

/// Decodes the meta event whose `0xFF` status byte has just been consumed.
///
/// Text events become a [`TextEvent`], tempo, time and key signatures become a meta
/// [`ChannelEvent`] and any other meta type is skipped.
pub(crate) fn read_meta_event(
    cursor: &mut ByteCursor<'_>,
    time: u64,
) -> ParseResult<Option<TrackEvent>> {
    let meta_type = cursor.read_u8()?;

    if is_text_event(meta_type) {
        let length = cursor.read_var_int()?;
        let value = cursor.read_ascii(length as usize)?;
        return Ok(Some(TrackEvent::Text(TextEvent::new(time, meta_type, value))));
    }

    match MetaEventType::try_from(meta_type) {
        Ok(kind) => {
            let (arg2, arg3) = read_fixed_payload(cursor, kind)?;
            Ok(Some(TrackEvent::Channel(ChannelEvent::new(
                time,
                MidiEventType::MetaEvent,
                meta_type,
                arg2,
                arg3,
            ))))
        }
        Err(_) => {
            let length = cursor.read_var_int()?;
            log::debug!(
                "Skipping meta event {meta_type:#04X} of {length} bytes at offset {}",
                cursor.position()
            );
            cursor.skip(length as usize)?;
            Ok(None)
        }
    }
}

/// Reads the fixed size payload of a decoded meta event.
///
/// The single length byte in front of the payload is skipped, not interpreted.
fn read_fixed_payload(cursor: &mut ByteCursor<'_>, kind: MetaEventType) -> ParseResult<(u8, u8)> {
    cursor.skip(1)?;

    match kind {
        MetaEventType::Tempo => {
            let high = cursor.read_u8()?;
            let low = cursor.read_u16()?;
            let mspqn = (u32::from(high) << 16) | u32::from(low);
            Ok((bpm_from_mspqn(mspqn), 0))
        }
        MetaEventType::TimeSignature => {
            let numerator = cursor.read_u8()?;
            let exponent = cursor.read_u8()?;
            // Metronome clicks and 32nd notes per quarter
            cursor.skip(2)?;
            Ok((numerator, denominator_from_exponent(exponent)))
        }
        MetaEventType::KeySignature => {
            let sharps_flats = cursor.read_u8()?;
            let major_minor = cursor.read_u8()?;
            Ok((sharps_flats, major_minor))
        }
    }
}

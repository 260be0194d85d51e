//! Decoded track events and the tag enums used to label them

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::meta::{KeySignature, Tempo, TimeSignature};

/// Error type for a tag byte that has no named variant
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown tag {0:#04X}")]
pub struct UnknownTag(pub u8);

/// Declares a `u8` backed tag enum with a `TryFrom<u8>` conversion and an `as_byte` accessor
macro_rules! byte_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            /// The raw byte for this tag
            pub const fn as_byte(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownTag;
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(Self::$variant), )*
                    _ => Err(UnknownTag(value)),
                }
            }
        }
    };
}

byte_tag! {
    /// The type of a [`ChannelEvent`], taken from the upper nibble of its status byte
    pub enum MidiEventType {
        /// Note released
        NoteOff = 0x80,
        /// Note pressed
        NoteOn = 0x90,
        /// Polyphonic key pressure
        KeyAfterTouch = 0xA0,
        /// Controller value change
        ControlChange = 0xB0,
        /// Patch change
        ProgramChange = 0xC0,
        /// Pressure applied to the whole channel
        ChannelAfterTouch = 0xD0,
        /// Pitch wheel movement
        PitchBendChange = 0xE0,
        /// Marker for tempo, time signature and key signature meta events
        MetaEvent = 0xFF,
    }
}

impl MidiEventType {
    /// Number of data bytes following the status byte of a channel message
    pub const fn data_bytes(self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelAfterTouch => 1,
            _ => 2,
        }
    }
}

byte_tag! {
    /// The meta events that are decoded into a [`ChannelEvent`]
    pub enum MetaEventType {
        /// Microseconds per quarter note, tag 0x51
        Tempo = 0x51,
        /// Time signature, tag 0x58
        TimeSignature = 0x58,
        /// Key signature, tag 0x59
        KeySignature = 0x59,
    }
}

byte_tag! {
    /// Labels for the common text meta event sub-types
    pub enum TextEventType {
        /// Free text, tag 0x01
        Text = 0x01,
        /// Sequence or track name, tag 0x03
        TrackName = 0x03,
        /// Lyric, tag 0x05
        Lyric = 0x05,
    }
}

byte_tag! {
    /// Labels for commonly used controller numbers
    pub enum ControlChangeType {
        /// Bank select
        BankSelect = 0x00,
        /// Modulation wheel
        Modulation = 0x01,
        /// Channel volume
        Volume = 0x07,
        /// Balance
        Balance = 0x08,
        /// Pan
        Pan = 0x0A,
        /// Sustain pedal
        Sustain = 0x40,
    }
}

/// A channel message, or one of the three decoded meta events, at an absolute tick time.
///
/// The meaning of the three argument bytes depends on the event type:
/// for channel messages `arg1` is the channel (1-16) and `arg2`/`arg3` are the data bytes
/// (`arg3` is 0 for single data byte messages). For meta events `arg1` is the meta type and
/// `arg2`/`arg3` hold the decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelEvent {
    /// Absolute time in ticks
    time: u64,
    /// Event type
    event_type: MidiEventType,
    /// Channel or meta type
    arg1: u8,
    /// First data byte or first payload value
    arg2: u8,
    /// Second data byte or second payload value
    arg3: u8,
}

impl ChannelEvent {
    /// Creates an event from its raw fields
    pub const fn new(time: u64, event_type: MidiEventType, arg1: u8, arg2: u8, arg3: u8) -> Self {
        Self {
            time,
            event_type,
            arg1,
            arg2,
            arg3,
        }
    }

    /// Absolute time in ticks
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Event type
    pub fn event_type(&self) -> MidiEventType {
        self.event_type
    }

    /// Raw first argument
    pub fn arg1(&self) -> u8 {
        self.arg1
    }

    /// Raw second argument
    pub fn arg2(&self) -> u8 {
        self.arg2
    }

    /// Raw third argument
    pub fn arg3(&self) -> u8 {
        self.arg3
    }

    /// True for the tempo, time signature and key signature events
    pub fn is_meta(&self) -> bool {
        self.event_type == MidiEventType::MetaEvent
    }

    /// The meta event type, for meta events
    pub fn meta_event_type(&self) -> Option<MetaEventType> {
        self.is_meta()
            .then(|| MetaEventType::try_from(self.arg1).ok())
            .flatten()
    }

    /// The 1-based channel, for channel messages
    pub fn channel(&self) -> Option<u8> {
        (!self.is_meta()).then_some(self.arg1)
    }

    /// Note number of note and key aftertouch messages
    pub fn note(&self) -> u8 {
        self.arg2
    }

    /// Velocity of note messages
    pub fn velocity(&self) -> u8 {
        self.arg3
    }

    /// Second data byte, e.g. the new value of a control change
    pub fn value(&self) -> u8 {
        self.arg3
    }

    /// The controller label of a control change, if it is a common one
    pub fn control_change_type(&self) -> Option<ControlChangeType> {
        if self.event_type != MidiEventType::ControlChange {
            return None;
        }
        ControlChangeType::try_from(self.arg2).ok()
    }

    /// The typed payload of this event.
    ///
    /// Returns `None` only for a meta marker whose meta type is not one the decoder produces.
    pub fn kind(&self) -> Option<EventKind> {
        let channel = self.arg1;
        let kind = match self.event_type {
            MidiEventType::NoteOff => EventKind::NoteOff {
                channel,
                note: self.arg2,
                velocity: self.arg3,
            },
            MidiEventType::NoteOn => EventKind::NoteOn {
                channel,
                note: self.arg2,
                velocity: self.arg3,
            },
            MidiEventType::KeyAfterTouch => EventKind::KeyAfterTouch {
                channel,
                note: self.arg2,
                pressure: self.arg3,
            },
            MidiEventType::ControlChange => EventKind::ControlChange {
                channel,
                controller: self.arg2,
                value: self.arg3,
            },
            MidiEventType::ProgramChange => EventKind::ProgramChange {
                channel,
                program: self.arg2,
            },
            MidiEventType::ChannelAfterTouch => EventKind::ChannelAfterTouch {
                channel,
                pressure: self.arg2,
            },
            MidiEventType::PitchBendChange => EventKind::PitchBendChange {
                channel,
                value: (u16::from(self.arg3 & 0x7F) << 7) | u16::from(self.arg2 & 0x7F),
            },
            MidiEventType::MetaEvent => match self.meta_event_type()? {
                MetaEventType::Tempo => EventKind::Tempo(Tempo { bpm: self.arg2 }),
                MetaEventType::TimeSignature => EventKind::TimeSignature(TimeSignature {
                    numerator: self.arg2,
                    denominator: self.arg3,
                }),
                MetaEventType::KeySignature => EventKind::KeySignature(KeySignature {
                    sharps_flats: self.arg2 as i8,
                    minor: self.arg3 != 0,
                }),
            },
        };

        Some(kind)
    }
}

/// Typed view of a [`ChannelEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// Note released, also produced by a note on with zero velocity
    NoteOff {
        /// Channel, 1-16
        channel: u8,
        /// Note number
        note: u8,
        /// Release velocity
        velocity: u8,
    },
    /// Note pressed
    NoteOn {
        /// Channel, 1-16
        channel: u8,
        /// Note number
        note: u8,
        /// Attack velocity
        velocity: u8,
    },
    /// Polyphonic key pressure
    KeyAfterTouch {
        /// Channel, 1-16
        channel: u8,
        /// Note number
        note: u8,
        /// Pressure amount
        pressure: u8,
    },
    /// Controller change
    ControlChange {
        /// Channel, 1-16
        channel: u8,
        /// Controller number
        controller: u8,
        /// New value
        value: u8,
    },
    /// Patch change
    ProgramChange {
        /// Channel, 1-16
        channel: u8,
        /// Program number
        program: u8,
    },
    /// Channel pressure
    ChannelAfterTouch {
        /// Channel, 1-16
        channel: u8,
        /// Pressure amount
        pressure: u8,
    },
    /// Pitch wheel change
    PitchBendChange {
        /// Channel, 1-16
        channel: u8,
        /// 14 bit wheel position, 0x2000 is centered
        value: u16,
    },
    /// Tempo meta event
    Tempo(Tempo),
    /// Time signature meta event
    TimeSignature(TimeSignature),
    /// Key signature meta event
    KeySignature(KeySignature),
}

/// A text meta event (meta types 0x01 to 0x0F)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextEvent {
    /// Absolute time in ticks
    time: u64,
    /// Raw meta sub-type
    event_type: u8,
    /// ASCII decoded text
    value: String,
}

impl TextEvent {
    /// Creates a text event
    pub fn new(time: u64, event_type: u8, value: impl Into<String>) -> Self {
        Self {
            time,
            event_type,
            value: value.into(),
        }
    }

    /// Absolute time in ticks
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Raw meta sub-type
    pub fn event_type(&self) -> u8 {
        self.event_type
    }

    /// The sub-type label, if it is a common one
    pub fn text_event_type(&self) -> Option<TextEventType> {
        TextEventType::try_from(self.event_type).ok()
    }

    /// The text
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ChannelEvent, ControlChangeType, EventKind, MetaEventType, MidiEventType, TextEvent,
        TextEventType, UnknownTag,
    };
    use crate::{KeySignature, TimeSignature};

    #[test]
    fn tag_bytes_round_through_enums() {
        assert_eq!(MidiEventType::try_from(0xB0), Ok(MidiEventType::ControlChange));
        assert_eq!(MidiEventType::PitchBendChange.as_byte(), 0xE0);
        assert_eq!(MidiEventType::try_from(0xF0), Err(UnknownTag(0xF0)));
        assert_eq!(MetaEventType::try_from(0x58), Ok(MetaEventType::TimeSignature));
        assert_eq!(ControlChangeType::try_from(0x40), Ok(ControlChangeType::Sustain));
        assert_eq!(TextEventType::try_from(0x02), Err(UnknownTag(0x02)));
    }

    #[test]
    fn single_data_byte_messages() {
        assert_eq!(MidiEventType::ProgramChange.data_bytes(), 1);
        assert_eq!(MidiEventType::ChannelAfterTouch.data_bytes(), 1);
        assert_eq!(MidiEventType::NoteOn.data_bytes(), 2);
        assert_eq!(MidiEventType::PitchBendChange.data_bytes(), 2);
    }

    #[test]
    fn channel_event_accessors() {
        let event = ChannelEvent::new(10, MidiEventType::ControlChange, 3, 0x07, 100);

        assert_eq!(event.channel(), Some(3));
        assert_eq!(event.control_change_type(), Some(ControlChangeType::Volume));
        assert_eq!(event.value(), 100);
        assert_eq!(event.meta_event_type(), None);
        assert_eq!(
            event.kind(),
            Some(EventKind::ControlChange {
                channel: 3,
                controller: 7,
                value: 100
            })
        );
    }

    #[test]
    fn pitch_bend_combines_data_bytes() {
        let event = ChannelEvent::new(0, MidiEventType::PitchBendChange, 1, 0x00, 0x40);

        assert_eq!(
            event.kind(),
            Some(EventKind::PitchBendChange {
                channel: 1,
                value: 0x2000
            })
        );
    }

    #[test]
    fn meta_event_views() {
        let time_signature = ChannelEvent::new(0, MidiEventType::MetaEvent, 0x58, 6, 8);
        assert_eq!(time_signature.channel(), None);
        assert_eq!(
            time_signature.meta_event_type(),
            Some(MetaEventType::TimeSignature)
        );
        assert_eq!(
            time_signature.kind(),
            Some(EventKind::TimeSignature(TimeSignature {
                numerator: 6,
                denominator: 8
            }))
        );

        let key_signature = ChannelEvent::new(0, MidiEventType::MetaEvent, 0x59, 0xFD, 1);
        assert_eq!(
            key_signature.kind(),
            Some(EventKind::KeySignature(KeySignature {
                sharps_flats: -3,
                minor: true
            }))
        );

        let unknown = ChannelEvent::new(0, MidiEventType::MetaEvent, 0x2F, 0, 0);
        assert_eq!(unknown.kind(), None);
    }

    #[test]
    fn text_event_labels() {
        let name = TextEvent::new(0, 0x03, "Piano");
        assert_eq!(name.text_event_type(), Some(TextEventType::TrackName));
        assert_eq!(name.value(), "Piano");

        let copyright = TextEvent::new(0, 0x02, "(c)");
        assert_eq!(copyright.text_event_type(), None);
    }
}

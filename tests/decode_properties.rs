mod common;

use common::{chunk, header, smf};
use pretty_assertions::assert_eq;
use smfread::{ChannelEvent, MidiEventType, MidiFile, ParseError, ParseErrorKind};

#[test]
fn running_status_matches_explicit_status() {
    let explicit: &[u8] = &[
        0x00, 0x91, 0x3C, 0x40, 0x10, 0x91, 0x3E, 0x40, 0x10, 0x91, 0x40, 0x00, 0x00, 0xE1, 0x00,
        0x40, 0x08, 0xE1, 0x7F, 0x7F,
    ];
    let running: &[u8] = &[
        0x00, 0x91, 0x3C, 0x40, 0x10, 0x3E, 0x40, 0x10, 0x40, 0x00, 0x00, 0xE1, 0x00, 0x40, 0x08,
        0x7F, 0x7F,
    ];

    let explicit = MidiFile::parse(&smf(0, 96, &[explicit])).expect("Decode explicit status");
    let running = MidiFile::parse(&smf(0, 96, &[running])).expect("Decode running status");

    assert_eq!(explicit, running);
    assert_eq!(running.tracks()[0].channel_events().len(), 5);
}

#[test]
fn event_times_never_decrease() {
    let events: &[u8] = &[
        0x00, 0x90, 0x3C, 0x40, 0x81, 0x00, 0x3C, 0x00, 0x00, 0xFF, 0x05, 0x02, b'l', b'a', 0x7F,
        0xB0, 0x40, 0x7F, 0xFF, 0xFF, 0xFF, 0x7F, 0xB0, 0x40, 0x00,
    ];
    let midi = MidiFile::parse(&smf(0, 96, &[events])).expect("Decode track");
    let track = &midi.tracks()[0];

    let times = track
        .channel_events()
        .iter()
        .map(ChannelEvent::time)
        .collect::<Vec<_>>();
    assert_eq!(times, vec![0, 128, 255, 255 + 0x0FFF_FFFF]);
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(track.text_events()[0].time(), 128);
}

#[test]
fn zero_velocity_note_on_is_note_off() {
    let midi = MidiFile::parse(&smf(0, 96, &[&[0x00, 0x95, 0x30, 0x00]])).expect("Decode track");

    assert_eq!(
        midi.tracks()[0].channel_events(),
        &[ChannelEvent::new(0, MidiEventType::NoteOff, 6, 0x30, 0)]
    );
}

#[test]
fn unknown_meta_event_is_fully_skipped() {
    let events: &[u8] = &[
        0x00, 0xFF, 0x20, 0x03, 0x01, 0x02, 0x03, 0x00, 0xFF, 0x7F, 0x02, 0x00, 0x41, 0x00,
        0xC2, 0x11,
    ];
    let midi = MidiFile::parse(&smf(0, 96, &[events])).expect("Decode track");
    let track = &midi.tracks()[0];

    assert!(track.text_events().is_empty());
    assert_eq!(
        track.channel_events(),
        &[ChannelEvent::new(0, MidiEventType::ProgramChange, 3, 0x11, 0)]
    );
}

#[test]
fn tracks_respect_declared_lengths() {
    let first: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00];
    let second: &[u8] = &[0x00, 0xFF, 0x03, 0x03, b'B', b'a', b's', 0x00, 0xA2, 0x3C, 0x20];
    let midi = MidiFile::parse(&smf(1, 480, &[first, second])).expect("Decode two tracks");

    assert_eq!(midi.tracks_count(), 2);
    assert_eq!(midi.tracks()[0].channel_events().len(), 1);
    assert!(midi.tracks()[0].text_events().is_empty());
    assert_eq!(midi.tracks()[1].text_events()[0].value(), "Bas");
    assert_eq!(
        midi.tracks()[1].channel_events(),
        &[ChannelEvent::new(0, MidiEventType::KeyAfterTouch, 3, 0x3C, 0x20)]
    );
}

#[test]
fn bad_header_magic_produces_no_file() {
    let mut bytes = smf(0, 96, &[&[0x00, 0x90, 0x3C, 0x40]]);
    bytes[..4].copy_from_slice(b"XXXX");

    assert_eq!(
        MidiFile::parse(&bytes),
        Err(ParseError::new(0, ParseErrorKind::InvalidHeaderMagic))
    );
}

#[test]
fn header_errors() {
    let mut long_header = chunk(b"MThd", &[0, 0, 0, 1, 0, 96, 0, 0]);
    long_header.extend(chunk(b"MTrk", &[]));
    assert_eq!(
        MidiFile::parse(&long_header).map_err(|err| err.kind()),
        Err(ParseErrorKind::InvalidHeaderLength(8))
    );

    let smpte = header(0, 0, 0xE250);
    assert_eq!(
        MidiFile::parse(&smpte).map_err(|err| err.kind()),
        Err(ParseErrorKind::UnsupportedTimingMode)
    );

    assert_eq!(MidiFile::parse(b"MTh"), Err(ParseError::oob(0)));
}

#[test]
fn truncated_sysex_is_out_of_bounds() {
    let bytes = smf(0, 96, &[&[0x00, 0xF0, 0x10, 0x43]]);
    let err = MidiFile::parse(&bytes).expect_err("Sysex runs past the buffer");

    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 25);
}

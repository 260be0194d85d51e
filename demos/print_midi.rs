//! Example program that decodes a MIDI file and prints its tracks

use std::{io, process::exit};

use clap::{arg, Command};
use smfread::{MidiFile, Track};

/// Installs a stderr logger, at debug level when requested
fn setup_logger(debug_log: bool) -> Result<(), fern::InitError> {
    let level = if debug_log {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;

    Ok(())
}

/// Prints one track's channel and text events
fn print_track(track: &Track) {
    println!("\nTrack: {}\n", track.index());

    for event in track.channel_events() {
        match event.meta_event_type() {
            Some(meta) => println!(
                "{:?} Channel - Time {} Args {} {}",
                meta,
                event.time(),
                event.arg2(),
                event.arg3()
            ),
            None => println!(
                "{:?} Channel {} Time {} Args {} {}",
                event.event_type(),
                event.arg1(),
                event.time(),
                event.arg2(),
                event.arg3()
            ),
        }
    }

    for text in track.text_events() {
        match text.text_event_type() {
            Some(kind) => println!("{:?} Time {} \"{}\"", kind, text.time(), text.value()),
            None => println!(
                "Text({:#04X}) Time {} \"{}\"",
                text.event_type(),
                text.time(),
                text.value()
            ),
        }
    }
}

fn main() {
    let matches = Command::new("print_midi")
        .about("Decodes a Standard MIDI File and prints its events")
        .arg(arg!([PATH] "MIDI file to decode").default_value("test/simple.mid"))
        .arg(arg!(--debug "Log skipped events and chunk headers"))
        .get_matches();

    if let Err(e) = setup_logger(matches.get_flag("debug")) {
        eprintln!("Unable to set up logging: {:?}", e);
    }

    let Some(path) = matches.get_one::<String>("PATH") else {
        eprintln!("No MIDI file given");
        exit(1);
    };

    println!("Parsing: {path}\n");

    let midi = match MidiFile::from_path(path) {
        Ok(midi) => midi,
        Err(e) => {
            eprintln!("Failed to decode {path}: {e}");
            if let smfread::LoadError::Parse(source) = e {
                eprintln!("  {source}");
            }
            exit(1);
        }
    };

    println!("Format: {}", midi.format());
    println!("TicksPerQuarterNote: {}", midi.ticks_per_quarter_note());
    println!("TracksCount: {}", midi.tracks_count());

    for track in midi.tracks() {
        print_track(track);
    }

    println!();
}

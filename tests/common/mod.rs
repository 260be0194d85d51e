//! Helpers for assembling SMF byte buffers in tests

/// Wraps a body in a chunk with the given tag
pub fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend((body.len() as u32).to_be_bytes());
    bytes.extend(body);
    bytes
}

/// A header chunk for `ntrks` tracks
pub fn header(format: u16, ntrks: u16, division: u16) -> Vec<u8> {
    let mut body = format.to_be_bytes().to_vec();
    body.extend(ntrks.to_be_bytes());
    body.extend(division.to_be_bytes());
    chunk(b"MThd", &body)
}

/// A complete file from a list of track event streams
pub fn smf(format: u16, division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut bytes = header(format, tracks.len() as u16, division);
    for events in tracks {
        bytes.extend(chunk(b"MTrk", events));
    }
    bytes
}

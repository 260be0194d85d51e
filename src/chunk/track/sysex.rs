//! System Exclusive Messages

use crate::{cursor::ByteCursor, error::ParseResult};

/// Starts a system exclusive message
pub const SYSEX_START: u8 = 0xF0;
/// Continues or escapes a system exclusive message
pub const SYSEX_ESCAPE: u8 = 0xF7;

/// Returns true for the two system exclusive status bytes
pub fn is_sysex_status(status: u8) -> bool {
    matches!(status, SYSEX_START | SYSEX_ESCAPE)
}

/// Skips a length prefixed system exclusive payload, the status byte already consumed
pub(crate) fn skip_sysex_event(cursor: &mut ByteCursor<'_>) -> ParseResult<()> {
    let length = cursor.read_var_int()?;
    log::debug!(
        "Skipping {length} byte sysex payload at offset {}",
        cursor.position()
    );
    cursor.skip(length as usize)
}

//! Replies sent back on the notification channel

use heapless::String;

/// Fixed acknowledgment for every handled motion/LED command
pub const ACK: &str = "OK";

/// Maximum length of a relayed status line
pub const MAX_STATUS_LINE: usize = 96;

/// A structured `TAG:field[:field...]` status line
pub type StatusLine = String<MAX_STATUS_LINE>;

/// Build a status line from raw co-processor bytes.
///
/// Non-UTF-8 input yields `None`; the line is truncated to
/// [`MAX_STATUS_LINE`] bytes at a character boundary.
pub fn status_line(bytes: &[u8]) -> Option<StatusLine> {
    let text = core::str::from_utf8(bytes).ok()?;
    let mut line = StatusLine::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    Some(line)
}

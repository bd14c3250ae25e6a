//! Incremental framing for the bridge UART byte stream
//!
//! BLE transfers are framed, but the UART leg between the bridge module
//! and this controller is a raw byte stream: back-to-back commands can
//! coalesce into one read and a multi-byte command can split across
//! reads. The bridge therefore wraps each command on the wire:
//!
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): body length, 1..=97 (opcode plus payload)
//! - BODY (LENGTH bytes): opcode followed by the payload
//! - CHECKSUM (1 byte): XOR of LENGTH and all BODY bytes
//!
//! The parser consumes one byte at a time and resynchronizes on the next
//! START byte after any error.

use heapless::Vec;

use crate::command::{CommandFrame, MAX_COMMAND_PAYLOAD};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum body length (opcode + payload)
pub const MAX_FRAME_BODY: usize = 1 + MAX_COMMAND_PAYLOAD;

/// Errors that can occur while parsing the wire stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Declared body length is zero or exceeds the maximum
    InvalidLength,
    /// Checksum mismatch
    InvalidChecksum,
}

/// State machine for parsing incoming command frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    body: Vec<u8, MAX_FRAME_BODY>,
    expected_length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Got START, waiting for LENGTH
    WaitingForLength,
    /// Reading body bytes
    ReadingBody,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            body: Vec::new(),
            expected_length: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.body.clear();
        self.expected_length = 0;
    }

    /// Feed a single byte to the parser.
    ///
    /// Returns `Ok(Some(command))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a framing error.
    /// After an error the parser waits for the next START byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<CommandFrame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForLength;
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if byte == 0 || byte as usize > MAX_FRAME_BODY {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.expected_length = byte;
                self.body.clear();
                self.state = ParseState::ReadingBody;
                Ok(None)
            }
            ParseState::ReadingBody => {
                // Cannot fail: expected_length is bounded by MAX_FRAME_BODY
                let _ = self.body.push(byte);
                if self.body.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                if byte != checksum(self.expected_length, &self.body) {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                // Body is never empty here, parse cannot return None
                let command = CommandFrame::parse(&self.body);
                self.reset();
                Ok(command)
            }
        }
    }
}

/// XOR checksum over the length byte and the body
pub fn checksum(length: u8, body: &[u8]) -> u8 {
    let mut acc = length;
    for &byte in body {
        acc ^= byte;
    }
    acc
}

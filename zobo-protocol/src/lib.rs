//! Wireless command protocol for the Zobo robot
//!
//! This crate defines the short binary command format consumed by the
//! robot and the text replies it sends back on the notification channel.
//!
//! # Command format
//!
//! ```text
//! ┌────────┬──────────────────┐
//! │ OPCODE │ PAYLOAD          │
//! │ 1B     │ 0–96B            │
//! └────────┴──────────────────┘
//! ```
//!
//! BLE transfers carry exactly one command each, but the UART leg between
//! the bridge module and the controller is a plain byte stream, so each
//! command is wrapped in a sync/length/checksum envelope there; see
//! [`frame`] for the wire layout and the incremental parser.
//!
//! For single-parameter commands (manual PWM) the first payload byte is the
//! parameter. Connectivity commands carry NUL-separated strings which are
//! forwarded verbatim to the network co-processor.
//!
//! # Replies
//!
//! Motion and LED commands are acknowledged with the fixed `OK` frame.
//! Connectivity commands reply with structured ASCII lines of the form
//! `TAG:field[:field...]` (e.g. `WIFI:CONNECTED:192.168.1.17`), produced by
//! the co-processor and relayed unmodified. Keepalives get no reply.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod reply;

pub use command::{
    CommandClass, CommandFrame, ConnectivityOp, LedColor, MotionCommand, MAX_COMMAND_PAYLOAD,
};
pub use frame::{FrameError, FrameParser, FRAME_START, MAX_FRAME_BODY};
pub use reply::{status_line, StatusLine, ACK, MAX_STATUS_LINE};

//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication. All control
//! state lives in the controller task; everything here is one-way traffic
//! into or out of it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use zobo_core::output::{ActuatorOutput, LedState};
use zobo_protocol::{CommandFrame, StatusLine};

/// Channel capacity for inbound command frames
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound reply/status lines
const REPLY_CHANNEL_SIZE: usize = 8;

/// Channel capacity for requests forwarded to the network co-processor
const FORWARD_CHANNEL_SIZE: usize = 4;

/// Command frames from the wireless link (and session keepalives)
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, CommandFrame, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Acks and relayed status lines back to the link
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, StatusLine, REPLY_CHANNEL_SIZE> =
    Channel::new();

/// Connectivity requests forwarded verbatim to the co-processor
pub static FORWARD_CHANNEL: Channel<CriticalSectionRawMutex, CommandFrame, FORWARD_CHANNEL_SIZE> =
    Channel::new();

/// Motor output decision (updated by the controller)
pub static MOTOR_CMD: Signal<CriticalSectionRawMutex, ActuatorOutput> = Signal::new();

/// LED output decision (updated by the controller)
pub static LED_CMD: Signal<CriticalSectionRawMutex, LedState> = Signal::new();

/// Link session dropped; the controller must stop the motors
pub static LINK_DOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// True while the link module reports an active session
pub static SESSION_UP: AtomicBool = AtomicBool::new(false);

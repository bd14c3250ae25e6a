//! Board-agnostic control core for the Zobo robot firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Motion controller (forward-ramp state machine, fixed-duty moves)
//! - Inactivity watchdog (forces a motor stop when commands stop arriving)
//! - Power scheduler (idle tracking for the deep-sleep cycle)
//! - Command dispatch tying the three together
//! - Actuator/LED output value types
//!
//! All state is owned by [`controller::Controller`] and mutated only from
//! the command path and the periodic control tick; the firmware runs both
//! on a single task, which is what makes the shared state race-free.

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod motion;
pub mod output;
pub mod power;
pub mod watchdog;

/// Control tick period. The ramp resolution and the watchdog window are
/// both defined in terms of this.
pub const TICK_INTERVAL_MS: u32 = 10;

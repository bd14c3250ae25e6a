//! Inactivity watchdog for the motor outputs
//!
//! A dropped stop frame or a silently dead link must not leave the motors
//! powered. Every motion-class command rearms a short countdown; when it
//! runs out the controller forces a full stop. The expiry is edge-triggered:
//! one stop per idle episode, not one per tick.

use crate::TICK_INTERVAL_MS;

/// Window with no motion command before the motors are stopped
pub const INACTIVITY_MS: u32 = 300;
/// Countdown length in control ticks
pub const INACTIVITY_TICKS: u16 = (INACTIVITY_MS / TICK_INTERVAL_MS) as u16;

/// Tick-driven countdown, rearmed by command arrival
#[derive(Debug, Clone)]
pub struct InactivityWatchdog {
    ticks_remaining: u16,
    armed: bool,
}

impl Default for InactivityWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl InactivityWatchdog {
    /// Starts disarmed; nothing fires until the first motion command
    pub fn new() -> Self {
        Self {
            ticks_remaining: 0,
            armed: false,
        }
    }

    /// Rearm the countdown. Called on every motion-class command.
    pub fn on_activity(&mut self) {
        self.ticks_remaining = INACTIVITY_TICKS;
        self.armed = true;
    }

    /// Advance the countdown by one control tick.
    ///
    /// Returns true exactly once per idle episode, when the countdown has
    /// run out and the expiry has not been consumed yet.
    pub fn tick(&mut self) -> bool {
        if self.ticks_remaining > 0 {
            self.ticks_remaining -= 1;
            false
        } else if self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn ticks_remaining(&self) -> u16 {
        self.ticks_remaining
    }
}

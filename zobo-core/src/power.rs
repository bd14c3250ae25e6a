//! Power scheduler: idle tracking for the deep-sleep cycle
//!
//! Unlike the motor watchdog, every kind of inbound traffic counts as
//! activity here - motion, LED, connectivity and keepalive alike. The
//! scheduler only decides WHEN to sleep; actually powering down (and the
//! timed micro-wake blink) is the firmware's sleep primitive, because the
//! transition loses all volatile state.

/// Idle time before the device goes to deep sleep
pub const IDLE_TIMEOUT_MS: u32 = 15_000;
/// Time between timed micro-wakes while sleeping
pub const WAKE_INTERVAL_MS: u32 = 10_000;
/// Indicator blink length during a micro-wake
pub const WAKE_BLINK_MS: u32 = 50;
/// Session keepalive period; well under the idle timeout so an established
/// session never sleeps
pub const KEEPALIVE_PERIOD_MS: u32 = 5_000;

/// Idle clock with an edge-triggered sleep decision
#[derive(Debug, Clone)]
pub struct PowerScheduler {
    last_activity_ms: u32,
    sleep_pending: bool,
}

impl PowerScheduler {
    pub fn new(now_ms: u32) -> Self {
        Self {
            last_activity_ms: now_ms,
            sleep_pending: false,
        }
    }

    /// Reset the idle clock. Any inbound command or keepalive calls this.
    pub fn on_activity(&mut self, now_ms: u32) {
        self.last_activity_ms = now_ms;
        self.sleep_pending = false;
    }

    /// Check the idle clock. Returns true once when the timeout is reached;
    /// stays quiet afterwards until the next activity.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if !self.sleep_pending && self.idle_ms(now_ms) >= IDLE_TIMEOUT_MS {
            self.sleep_pending = true;
            return true;
        }
        false
    }

    /// Milliseconds since the last activity
    pub fn idle_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity_ms)
    }
}

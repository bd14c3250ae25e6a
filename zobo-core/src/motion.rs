//! Motion controller: opcode-to-actuation mapping and the forward ramp
//!
//! Forward motion accelerates along a 2 s linear duty ramp and then latches
//! at full duty. The transport re-sends the forward command for as long as
//! the control key is held, so re-issuing it while the ramp is active or
//! latched must be a no-op; restarting the ramp on every repeat would pin
//! the robot at the ramp start duty. Every other motion command cancels the
//! ramp before acting.

use crate::output::ActuatorOutput;
use zobo_protocol::MotionCommand;

/// Duty at ramp start
pub const RAMP_START: u8 = 100;
/// Duty at ramp end (held by the latch)
pub const RAMP_END: u8 = 255;
/// Ramp length in milliseconds
pub const RAMP_DURATION_MS: u32 = 2000;

/// Fixed reverse duty, both channels
pub const BACKWARD_DUTY: u8 = 100;
/// Boosted channel duty while turning; the other channel gets the complement
pub const TURN_DUTY_FAST: u8 = 200;
pub const TURN_DUTY_SLOW: u8 = 255 - TURN_DUTY_FAST;
/// Manual steering: parameter value meaning "straight ahead"
pub const MANUAL_CENTER: u8 = 50;
/// Manual steering: duty both channels get at center
pub const MANUAL_BASE: u8 = 180;

/// Duty on the ramp curve at `elapsed_ms` (integer truncation, clamped at
/// the end value)
pub fn ramp_duty(elapsed_ms: u32) -> u8 {
    if elapsed_ms >= RAMP_DURATION_MS {
        RAMP_END
    } else {
        RAMP_START + ((RAMP_END - RAMP_START) as u32 * elapsed_ms / RAMP_DURATION_MS) as u8
    }
}

/// Left/right duties for a manual steering parameter.
///
/// The parameter biases the channels symmetrically around [`MANUAL_BASE`];
/// saturating arithmetic keeps out-of-range parameters in bounds instead of
/// wrapping.
pub fn manual_duties(param: u8) -> (u8, u8) {
    if param >= MANUAL_CENTER {
        let bias = param - MANUAL_CENTER;
        (
            MANUAL_BASE.saturating_sub(bias),
            MANUAL_BASE.saturating_add(bias),
        )
    } else {
        let bias = MANUAL_CENTER - param;
        (
            MANUAL_BASE.saturating_add(bias),
            MANUAL_BASE.saturating_sub(bias),
        )
    }
}

/// Ramp state machine plus the current actuation decision.
///
/// Invariant: `ramp_active` and `ramp_latched` are never both true.
#[derive(Debug, Clone)]
pub struct MotionController {
    ramp_active: bool,
    ramp_latched: bool,
    /// Monotonic timestamp of ramp start; meaningful only while ramping
    ramp_start_ms: u32,
    output: ActuatorOutput,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionController {
    pub fn new() -> Self {
        Self {
            ramp_active: false,
            ramp_latched: false,
            ramp_start_ms: 0,
            output: ActuatorOutput::STOPPED,
        }
    }

    /// Current actuation decision
    pub fn output(&self) -> ActuatorOutput {
        self.output
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp_active
    }

    pub fn is_latched(&self) -> bool {
        self.ramp_latched
    }

    /// Apply a motion command.
    ///
    /// Every command except forward cancels an in-flight ramp or latch
    /// before acting. Forward starts a ramp only when neither flag is set;
    /// a repeat while ramping or latched changes nothing.
    pub fn apply(&mut self, cmd: MotionCommand, now_ms: u32) {
        match cmd {
            MotionCommand::Forward => {
                if !self.ramp_active && !self.ramp_latched {
                    self.ramp_start_ms = now_ms;
                    self.ramp_active = true;
                    self.output = ActuatorOutput::new(RAMP_START, RAMP_START, false, false);
                }
            }
            MotionCommand::Backward => {
                self.cancel_ramp();
                self.output = ActuatorOutput::new(BACKWARD_DUTY, BACKWARD_DUTY, true, true);
            }
            MotionCommand::Stop => {
                self.force_stop();
            }
            MotionCommand::TurnRight => {
                self.cancel_ramp();
                self.output = ActuatorOutput::new(TURN_DUTY_FAST, TURN_DUTY_SLOW, false, true);
            }
            MotionCommand::TurnLeft => {
                self.cancel_ramp();
                self.output = ActuatorOutput::new(TURN_DUTY_SLOW, TURN_DUTY_FAST, true, false);
            }
            MotionCommand::Manual(param) => {
                self.cancel_ramp();
                let (left, right) = manual_duties(param);
                self.output = ActuatorOutput::new(left, right, false, false);
            }
        }
    }

    /// Service the ramp. Call at the fixed control tick period.
    pub fn tick(&mut self, now_ms: u32) {
        if !self.ramp_active {
            return;
        }

        let elapsed = now_ms.wrapping_sub(self.ramp_start_ms);
        if elapsed >= RAMP_DURATION_MS {
            self.output = ActuatorOutput::new(RAMP_END, RAMP_END, false, false);
            self.ramp_active = false;
            self.ramp_latched = true;
        } else {
            let duty = ramp_duty(elapsed);
            self.output = ActuatorOutput::new(duty, duty, false, false);
        }
    }

    /// Unconditional stop: zero duty, direction pins cleared, ramp and
    /// latch dropped. Idempotent; used by the watchdog and on link loss.
    pub fn force_stop(&mut self) {
        self.cancel_ramp();
        self.output = ActuatorOutput::STOPPED;
    }

    fn cancel_ramp(&mut self) {
        self.ramp_active = false;
        self.ramp_latched = false;
    }
}

//! Command dispatch tying motion, watchdog and power together
//!
//! The controller owns all mutable control state. The firmware feeds it
//! from exactly two places - received command frames and the 10 ms control
//! tick - both on the same task, so no mutation ever races another.

use crate::motion::MotionController;
use crate::output::{ActuatorOutput, LedState};
use crate::power::PowerScheduler;
use crate::watchdog::InactivityWatchdog;
use zobo_protocol::{CommandClass, CommandFrame, ConnectivityOp};

/// What the caller owes the transport after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Motion or LED command handled; send the fixed ack
    Acknowledged,
    /// Connectivity command; forward the payload verbatim to the
    /// coordinator, which produces its own status reply
    Forward(ConnectivityOp),
    /// Keepalive consumed; no reply by design
    Keepalive,
    /// Unrecognized opcode; no state was touched, diagnostic only
    Unknown(u8),
}

/// Effects of one control tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// The inactivity watchdog expired and the motors were force-stopped
    pub stopped_by_watchdog: bool,
    /// Idle timeout reached; the caller should begin the sleep transition
    pub sleep_due: bool,
}

/// Central control state: motion, watchdog, power and LED outputs
pub struct Controller {
    motion: MotionController,
    watchdog: InactivityWatchdog,
    power: PowerScheduler,
    led: LedState,
}

impl Controller {
    pub fn new(now_ms: u32) -> Self {
        Self {
            motion: MotionController::new(),
            watchdog: InactivityWatchdog::new(),
            power: PowerScheduler::new(now_ms),
            // The headlight is on from boot until the first stop command
            led: LedState {
                main: true,
                ..LedState::OFF
            },
        }
    }

    /// Route one received command frame.
    ///
    /// Motion commands rearm the motor watchdog; every command class except
    /// unknown resets the sleep scheduler's idle clock.
    pub fn dispatch(&mut self, frame: &CommandFrame, now_ms: u32) -> Dispatch {
        match frame.classify() {
            CommandClass::Motion(cmd) => {
                self.watchdog.on_activity();
                self.power.on_activity(now_ms);
                if cmd == zobo_protocol::MotionCommand::Stop {
                    // Stop also drops the headlight, matching the remote's
                    // expectation that stop means "all quiet"
                    self.led.main = false;
                }
                self.motion.apply(cmd, now_ms);
                Dispatch::Acknowledged
            }
            CommandClass::Led(color) => {
                // LED commands must not perturb the ramp or the motor
                // watchdog; only the sleep clock notices them
                self.power.on_activity(now_ms);
                self.led.set_color(color);
                Dispatch::Acknowledged
            }
            CommandClass::Connectivity(op) => {
                self.power.on_activity(now_ms);
                Dispatch::Forward(op)
            }
            CommandClass::Keepalive => {
                self.power.on_activity(now_ms);
                Dispatch::Keepalive
            }
            CommandClass::Unknown(opcode) => Dispatch::Unknown(opcode),
        }
    }

    /// Service the ramp, the watchdog countdown and the idle check.
    /// Call at the fixed control tick period.
    pub fn tick(&mut self, now_ms: u32) -> TickOutcome {
        self.motion.tick(now_ms);

        let stopped_by_watchdog = self.watchdog.tick();
        if stopped_by_watchdog {
            self.motion.force_stop();
        }

        let sleep_due = self.power.tick(now_ms);

        TickOutcome {
            stopped_by_watchdog,
            sleep_due,
        }
    }

    /// Link session dropped: stop the motors immediately.
    pub fn on_disconnect(&mut self) {
        self.motion.force_stop();
    }

    /// Quiesce all outputs ahead of the sleep transition. Idempotent.
    pub fn quiesce(&mut self) {
        self.motion.force_stop();
        self.led = LedState::OFF;
    }

    pub fn output(&self) -> ActuatorOutput {
        self.motion.output()
    }

    pub fn led(&self) -> LedState {
        self.led
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn watchdog(&self) -> &InactivityWatchdog {
        &self.watchdog
    }

    pub fn power(&self) -> &PowerScheduler {
        &self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{RAMP_END, RAMP_START};
    use crate::power::IDLE_TIMEOUT_MS;
    use crate::watchdog::INACTIVITY_TICKS;
    use crate::TICK_INTERVAL_MS;
    use zobo_protocol::command::{
        OP_BACKWARD, OP_FORWARD, OP_LED_BLUE, OP_MANUAL_PWM, OP_PING, OP_STOP, OP_WIFI_STATUS,
    };

    fn frame(bytes: &[u8]) -> CommandFrame {
        CommandFrame::parse(bytes).unwrap()
    }

    /// Drive ticks from `from_ms` (exclusive) to `to_ms` (inclusive)
    fn run_ticks(ctrl: &mut Controller, from_ms: u32, to_ms: u32) -> TickOutcome {
        let mut last = TickOutcome::default();
        let mut now = from_ms;
        while now < to_ms {
            now += TICK_INTERVAL_MS;
            let outcome = ctrl.tick(now);
            last.stopped_by_watchdog |= outcome.stopped_by_watchdog;
            last.sleep_due |= outcome.sleep_due;
        }
        last
    }

    #[test]
    fn test_forward_ramp_scenario() {
        let mut ctrl = Controller::new(0);

        assert_eq!(ctrl.dispatch(&frame(&[OP_FORWARD]), 0), Dispatch::Acknowledged);
        assert_eq!(ctrl.output().left_duty, RAMP_START);

        // Key held: forward repeats, ramp must not restart
        let mut now = 0;
        while now < 2000 {
            now += TICK_INTERVAL_MS;
            ctrl.tick(now);
            if now % 100 == 0 {
                ctrl.dispatch(&frame(&[OP_FORWARD]), now);
            }
            if now == 1000 {
                assert_eq!(ctrl.output().left_duty, 177);
            }
        }

        assert!(ctrl.motion().is_latched());
        assert_eq!(ctrl.output().left_duty, RAMP_END);

        // Re-issue after completion: still latched at max
        ctrl.dispatch(&frame(&[OP_FORWARD]), 2001);
        assert_eq!(ctrl.output().left_duty, RAMP_END);
    }

    #[test]
    fn test_watchdog_stops_motors_after_idle_window() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_BACKWARD]), 0);
        assert_eq!(ctrl.output().left_duty, 100);

        let outcome = run_ticks(&mut ctrl, 0, 310);
        assert!(outcome.stopped_by_watchdog);
        assert_eq!(ctrl.output(), ActuatorOutput::STOPPED);
    }

    #[test]
    fn test_watchdog_fires_once_per_episode() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_BACKWARD]), 0);

        let mut fires = 0;
        let mut now = 0;
        for _ in 0..200 {
            now += TICK_INTERVAL_MS;
            if ctrl.tick(now).stopped_by_watchdog {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn test_led_command_does_not_touch_ramp_or_watchdog() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_FORWARD]), 0);
        ctrl.tick(500);
        let ticks_before = ctrl.watchdog().ticks_remaining();

        assert_eq!(ctrl.dispatch(&frame(&[OP_LED_BLUE]), 500), Dispatch::Acknowledged);

        assert!(ctrl.motion().is_ramping());
        assert!(!ctrl.motion().is_latched());
        assert_eq!(ctrl.watchdog().ticks_remaining(), ticks_before);
        assert!(ctrl.led().blue);
    }

    #[test]
    fn test_keepalive_resets_only_sleep_clock() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_BACKWARD]), 0);
        let ticks_before = ctrl.watchdog().ticks_remaining();

        assert_eq!(ctrl.dispatch(&frame(&[OP_PING]), 100), Dispatch::Keepalive);

        assert_eq!(ctrl.watchdog().ticks_remaining(), ticks_before);
        assert_eq!(ctrl.power().idle_ms(100), 0);
    }

    #[test]
    fn test_connectivity_forwarded_without_motor_activity() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_BACKWARD]), 0);

        let dispatch = ctrl.dispatch(&frame(&[OP_WIFI_STATUS]), 50);
        assert_eq!(
            dispatch,
            Dispatch::Forward(zobo_protocol::ConnectivityOp::WifiStatus)
        );

        // Motor watchdog unaffected: motors still stop on schedule
        let outcome = run_ticks(&mut ctrl, 0, 310);
        assert!(outcome.stopped_by_watchdog);
    }

    #[test]
    fn test_unknown_opcode_changes_nothing() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_FORWARD]), 0);
        ctrl.tick(100);
        let output = ctrl.output();
        let idle = ctrl.power().idle_ms(100);

        assert_eq!(ctrl.dispatch(&frame(&[0x42]), 100), Dispatch::Unknown(0x42));

        assert_eq!(ctrl.output(), output);
        assert!(ctrl.motion().is_ramping());
        assert_eq!(ctrl.power().idle_ms(100), idle);
    }

    #[test]
    fn test_stop_drops_headlight() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_LED_BLUE]), 0);
        assert!(ctrl.led().main);

        ctrl.dispatch(&frame(&[OP_STOP]), 10);
        assert!(!ctrl.led().main);
        assert!(ctrl.led().blue);
    }

    #[test]
    fn test_headlight_on_from_boot_until_stop() {
        let mut ctrl = Controller::new(0);
        assert!(ctrl.led().main);

        // No opcode besides stop touches the headlight
        for op in 0u8..=255 {
            if op == OP_STOP {
                continue;
            }
            ctrl.dispatch(&frame(&[op]), 0);
            assert!(ctrl.led().main, "opcode {op} dropped the headlight");
        }

        ctrl.dispatch(&frame(&[OP_STOP]), 10);
        assert!(!ctrl.led().main);

        // And nothing relights it afterwards
        for op in 0u8..=255 {
            ctrl.dispatch(&frame(&[op]), 20);
            assert!(!ctrl.led().main, "opcode {op} relit the headlight");
        }
    }

    #[test]
    fn test_sleep_due_after_idle_timeout() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_PING]), 0);

        assert!(!ctrl.tick(IDLE_TIMEOUT_MS - 10).sleep_due);
        assert!(ctrl.tick(IDLE_TIMEOUT_MS).sleep_due);
        // Edge-triggered
        assert!(!ctrl.tick(IDLE_TIMEOUT_MS + 10).sleep_due);
    }

    #[test]
    fn test_manual_dispatch_scenario() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_MANUAL_PWM, 80]), 0);
        let out = ctrl.output();
        assert_eq!((out.left_duty, out.right_duty), (150, 210));
        assert!(!out.left_dir_high && !out.right_dir_high);
    }

    #[test]
    fn test_disconnect_force_stops() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_FORWARD]), 0);
        ctrl.tick(1000);
        assert!(ctrl.output().left_duty > 0);

        ctrl.on_disconnect();
        assert_eq!(ctrl.output(), ActuatorOutput::STOPPED);
        assert!(!ctrl.motion().is_ramping());
    }

    #[test]
    fn test_quiesce_clears_all_outputs() {
        let mut ctrl = Controller::new(0);
        ctrl.dispatch(&frame(&[OP_LED_BLUE]), 0);
        ctrl.dispatch(&frame(&[OP_FORWARD]), 0);

        ctrl.quiesce();
        assert_eq!(ctrl.output(), ActuatorOutput::STOPPED);
        assert_eq!(ctrl.led(), LedState::OFF);
    }

    #[test]
    fn test_watchdog_window_covers_300ms() {
        // Sanity: 30 ticks at 10 ms covers the 300 ms window
        assert_eq!(INACTIVITY_TICKS as u32 * TICK_INTERVAL_MS, 300);
    }
}

//! Dual-channel motor sink: two PWM outputs plus two direction pins
//!
//! Writes are best-effort and fire-and-forget; there is nothing useful the
//! control loop could do with a failed pin write, and actuation must never
//! block or propagate errors into the command path.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use zobo_core::output::ActuatorOutput;

/// Full-scale duty as commanded by the controller
const DUTY_SCALE: u16 = 255;

/// The two-motor actuator: left/right PWM channels and direction pins
pub struct MotorPair<L, R, DL, DR> {
    left_pwm: L,
    right_pwm: R,
    left_dir: DL,
    right_dir: DR,
    /// Last output actually written, for redundant-write suppression
    last: Option<ActuatorOutput>,
}

impl<L, R, DL, DR> MotorPair<L, R, DL, DR>
where
    L: SetDutyCycle,
    R: SetDutyCycle,
    DL: OutputPin,
    DR: OutputPin,
{
    pub fn new(left_pwm: L, right_pwm: R, left_dir: DL, right_dir: DR) -> Self {
        Self {
            left_pwm,
            right_pwm,
            left_dir,
            right_dir,
            last: None,
        }
    }

    /// Apply an actuation decision. A repeat of the last written output is
    /// skipped entirely.
    pub fn apply(&mut self, out: ActuatorOutput) {
        if self.last == Some(out) {
            return;
        }

        let _ = self
            .left_pwm
            .set_duty_cycle_fraction(out.left_duty as u16, DUTY_SCALE);
        let _ = self
            .right_pwm
            .set_duty_cycle_fraction(out.right_duty as u16, DUTY_SCALE);

        let _ = if out.left_dir_high {
            self.left_dir.set_high()
        } else {
            self.left_dir.set_low()
        };
        let _ = if out.right_dir_high {
            self.right_dir.set_high()
        } else {
            self.right_dir.set_low()
        };

        self.last = Some(out);
    }

    /// Zero both channels immediately
    pub fn stop(&mut self) {
        self.apply(ActuatorOutput::STOPPED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct MockPwm {
        duty: u16,
        writes: usize,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    fn pair() -> MotorPair<MockPwm, MockPwm, MockPin, MockPin> {
        MotorPair::new(
            MockPwm::default(),
            MockPwm::default(),
            MockPin::default(),
            MockPin::default(),
        )
    }

    #[test]
    fn test_duty_scaled_to_channel_range() {
        let mut motors = pair();
        motors.apply(ActuatorOutput::new(255, 100, false, true));

        // 255/255 of max 1000, 100/255 of max 1000
        assert_eq!(motors.left_pwm.duty, 1000);
        assert_eq!(motors.right_pwm.duty, (100u32 * 1000 / 255) as u16);
        assert!(!motors.left_dir.high);
        assert!(motors.right_dir.high);
    }

    #[test]
    fn test_redundant_write_suppressed() {
        let mut motors = pair();
        let out = ActuatorOutput::new(200, 55, false, true);
        motors.apply(out);
        motors.apply(out);
        motors.apply(out);

        assert_eq!(motors.left_pwm.writes, 1);
        assert_eq!(motors.right_pwm.writes, 1);
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut motors = pair();
        motors.apply(ActuatorOutput::new(200, 200, true, true));
        motors.stop();

        assert_eq!(motors.left_pwm.duty, 0);
        assert_eq!(motors.right_pwm.duty, 0);
        assert!(!motors.left_dir.high);
        assert!(!motors.right_dir.high);
    }
}

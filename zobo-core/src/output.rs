//! Output value types for the actuator and LED sinks
//!
//! Both are plain derived values: the controller recomputes them on every
//! decision and the firmware forwards them fire-and-forget to the hardware
//! tasks. Nothing here is persisted.

use zobo_protocol::LedColor;

/// Duty and direction for the two motor channels.
///
/// Direction pins low mean forward; `STOPPED` clears everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorOutput {
    /// Left channel duty (0-255)
    pub left_duty: u8,
    /// Right channel duty (0-255)
    pub right_duty: u8,
    /// Left direction pin level (high = reverse)
    pub left_dir_high: bool,
    /// Right direction pin level (high = reverse)
    pub right_dir_high: bool,
}

impl ActuatorOutput {
    /// Zero duty, direction pins cleared
    pub const STOPPED: Self = Self {
        left_duty: 0,
        right_duty: 0,
        left_dir_high: false,
        right_dir_high: false,
    };

    pub const fn new(left_duty: u8, right_duty: u8, left_dir_high: bool, right_dir_high: bool) -> Self {
        Self {
            left_duty,
            right_duty,
            left_dir_high,
            right_dir_high,
        }
    }
}

impl Default for ActuatorOutput {
    fn default() -> Self {
        Self::STOPPED
    }
}

/// Commanded state of the tri-color LED plus the main headlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedState {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    /// Main headlight, switched off by the stop command
    pub main: bool,
}

impl LedState {
    /// Everything off
    pub const OFF: Self = Self {
        red: false,
        green: false,
        blue: false,
        main: false,
    };

    /// Apply an LED color command to the tri-color channels.
    ///
    /// The headlight is untouched; LED commands never perturb other state.
    pub fn set_color(&mut self, color: LedColor) {
        let (red, green, blue) = match color {
            LedColor::Red => (true, false, false),
            LedColor::Green => (false, true, false),
            LedColor::Blue => (false, false, true),
            LedColor::White => (true, true, true),
        };
        self.red = red;
        self.green = green;
        self.blue = blue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_color_leaves_headlight() {
        let mut led = LedState {
            main: true,
            ..LedState::OFF
        };
        led.set_color(LedColor::Blue);
        assert!(led.blue && !led.red && !led.green);
        assert!(led.main);
    }

    #[test]
    fn test_white_is_all_channels() {
        let mut led = LedState::OFF;
        led.set_color(LedColor::White);
        assert!(led.red && led.green && led.blue);
    }
}

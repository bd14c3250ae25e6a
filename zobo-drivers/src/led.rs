//! Tri-color LED plus main headlight
//!
//! The RGB channels are wired active-low on the robot board; the headlight
//! is active-high.

use embedded_hal::digital::OutputPin;

use zobo_core::output::LedState;

/// RGB indicator and headlight sink
pub struct RgbLed<R, G, B, M> {
    red: R,
    green: G,
    blue: B,
    main: M,
}

impl<R, G, B, M> RgbLed<R, G, B, M>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    M: OutputPin,
{
    /// Takes ownership of the four pins and switches everything off
    pub fn new(red: R, green: G, blue: B, main: M) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            main,
        };
        led.apply(LedState::OFF);
        led
    }

    /// Drive the pins to match a commanded LED state
    pub fn apply(&mut self, state: LedState) {
        // Active-low RGB: on = low
        let _ = if state.red {
            self.red.set_low()
        } else {
            self.red.set_high()
        };
        let _ = if state.green {
            self.green.set_low()
        } else {
            self.green.set_high()
        };
        let _ = if state.blue {
            self.blue.set_low()
        } else {
            self.blue.set_high()
        };
        let _ = if state.main {
            self.main.set_high()
        } else {
            self.main.set_low()
        };
    }

    /// Everything off
    pub fn off(&mut self) {
        self.apply(LedState::OFF);
    }
}

//! LED output task
//!
//! Runs a short power-on color walk so a bench operator can see the board
//! came up, then mirrors the controller's LED state onto the pins.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use zobo_core::output::LedState;
use zobo_drivers::RgbLed;

use crate::channels::LED_CMD;

pub type BoardLed =
    RgbLed<Output<'static>, Output<'static>, Output<'static>, Output<'static>>;

const STARTUP_STEP_MS: u64 = 150;

/// LED task - startup sequence, then follows commanded LED state
#[embassy_executor::task]
pub async fn led_task(mut led: BoardLed) {
    info!("LED task started");

    // Power-on walk: red, green, blue, then the headlight alone. The
    // headlight stays on from here until a stop command clears it, which
    // matches the controller's boot state.
    for state in [
        LedState {
            red: true,
            ..LedState::OFF
        },
        LedState {
            green: true,
            ..LedState::OFF
        },
        LedState {
            blue: true,
            ..LedState::OFF
        },
        LedState {
            main: true,
            ..LedState::OFF
        },
    ] {
        led.apply(state);
        Timer::after_millis(STARTUP_STEP_MS).await;
    }

    loop {
        let state = LED_CMD.wait().await;
        trace!(
            "LED state: r={} g={} b={} main={}",
            state.red,
            state.green,
            state.blue,
            state.main
        );
        led.apply(state);
    }
}

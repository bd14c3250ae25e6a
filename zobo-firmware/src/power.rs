//! Deep-sleep cycle built on the RP2040 watchdog
//!
//! Sleep is a real power-down of the application: the watchdog scratch
//! registers (which survive a watchdog reboot but not a power cycle) mark
//! the reboot as part of a sleep cycle, the watchdog times the wake, and
//! the core idles in WFI until it fires. On the timed reboot `main` checks
//! the marker before bringing up any subsystem and runs the micro-wake
//! branch: a brief indicator blink, then straight back down.
//!
//! The RP2040 watchdog cannot time a full 10 s interval, so one wake
//! interval is chained from two 5 s watchdog periods; the blink happens
//! only on the interval boundary.

use embassy_rp::pac;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{block_for, Duration};
use embedded_hal::digital::OutputPin;

use zobo_core::output::LedState;
use zobo_core::power::{WAKE_BLINK_MS, WAKE_INTERVAL_MS};
use zobo_drivers::RgbLed;

/// Scratch marker identifying a sleep-cycle reboot
const SLEEP_MAGIC: u32 = 0x5A0B_05EE;

/// Watchdog periods per wake interval
const PERIODS_PER_WAKE: u32 = 2;

/// Single watchdog period (the RP2040 maximum is ~8.3 s)
const SLEEP_PERIOD: Duration = Duration::from_millis((WAKE_INTERVAL_MS / PERIODS_PER_WAKE) as u64);

/// Did this boot come out of a sleep cycle?
pub fn in_sleep_cycle() -> bool {
    pac::WATCHDOG.scratch0().read() == SLEEP_MAGIC
}

/// Drop a stale marker (e.g. after a debugger-driven reboot)
pub fn clear_marker() {
    pac::WATCHDOG.scratch0().write_value(0);
}

/// Begin a sleep cycle. Outputs must already be quiesced. Never returns;
/// the watchdog reboots the chip after the first period.
pub fn enter_sleep(watchdog: &mut Watchdog) -> ! {
    pac::WATCHDOG.scratch0().write_value(SLEEP_MAGIC);
    pac::WATCHDOG.scratch1().write_value(PERIODS_PER_WAKE - 1);
    sleep_until_reboot(watchdog)
}

/// Service a timed wake inside a sleep cycle and go back down.
///
/// Runs the micro-wake blink on each full wake interval; intermediate
/// watchdog reboots only decrement the chain counter.
pub fn service_wake<R, G, B, M>(watchdog: &mut Watchdog, led: &mut RgbLed<R, G, B, M>) -> !
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    M: OutputPin,
{
    let remaining = pac::WATCHDOG.scratch1().read();
    if remaining > 0 {
        pac::WATCHDOG.scratch1().write_value(remaining - 1);
    } else {
        led.apply(LedState {
            blue: true,
            ..LedState::OFF
        });
        block_for(Duration::from_millis(WAKE_BLINK_MS as u64));
        led.off();
        pac::WATCHDOG.scratch1().write_value(PERIODS_PER_WAKE - 1);
    }
    sleep_until_reboot(watchdog)
}

fn sleep_until_reboot(watchdog: &mut Watchdog) -> ! {
    watchdog.start(SLEEP_PERIOD);
    loop {
        cortex_m::asm::wfi();
    }
}

//! Control tick task
//!
//! Provides the fixed 10 ms tick the motion ramp, the inactivity watchdog
//! and the sleep scheduler all depend on. Motor safety hangs off this
//! period, so nothing in the control path is allowed to block it; the
//! connectivity side runs on its own tasks for exactly that reason.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

use zobo_core::TICK_INTERVAL_MS;

/// Signal carrying the tick timestamp (ms since boot) to the controller
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis() as u32);
    }
}

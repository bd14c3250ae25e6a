//! Session tracking for the wireless link
//!
//! The bridge module raises its STATE pin while an app is connected. While
//! a session is up, a periodic keepalive is injected into the command
//! stream so the inactivity timers treat a silent-but-connected app as
//! alive. When the session drops, the controller is told so it can stop
//! the motors.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use zobo_core::power::KEEPALIVE_PERIOD_MS;
use zobo_protocol::command::OP_PING;
use zobo_protocol::CommandFrame;

use crate::channels::{COMMAND_CHANNEL, LINK_DOWN, SESSION_UP};

/// Link state task - tracks the bridge STATE pin
#[embassy_executor::task]
pub async fn link_state_task(mut state_pin: Input<'static>) {
    info!("Link state task started");

    SESSION_UP.store(state_pin.is_high(), Ordering::Relaxed);

    loop {
        state_pin.wait_for_any_edge().await;
        let up = state_pin.is_high();
        SESSION_UP.store(up, Ordering::Relaxed);

        if up {
            info!("App session established");
        } else {
            info!("App session dropped");
            LINK_DOWN.signal(());
        }
    }
}

/// Session keepalive task - injects a ping while a session is up
#[embassy_executor::task]
pub async fn session_task() {
    info!("Session task started");

    let mut ticker = Ticker::every(Duration::from_millis(KEEPALIVE_PERIOD_MS as u64));

    loop {
        ticker.next().await;

        if !SESSION_UP.load(Ordering::Relaxed) {
            continue;
        }

        if let Some(ping) = CommandFrame::parse(&[OP_PING]) {
            if COMMAND_CHANNEL.try_send(ping).is_err() {
                warn!("Command channel full, keepalive skipped");
            }
        }
    }
}

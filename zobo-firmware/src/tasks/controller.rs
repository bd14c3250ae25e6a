//! Main controller task
//!
//! Owns all control state (motion, watchdog, power, LED). Both mutation
//! sources - received command frames and the periodic control tick - are
//! serviced here on one task, which is what enforces the single-writer
//! rule for the shared state.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Instant, Timer};

use zobo_core::controller::{Controller, Dispatch};
use zobo_core::output::{ActuatorOutput, LedState};
use zobo_core::power::IDLE_TIMEOUT_MS;
use zobo_protocol::{StatusLine, ACK};

use crate::channels::{COMMAND_CHANNEL, FORWARD_CHANNEL, LED_CMD, LINK_DOWN, MOTOR_CMD, REPLY_CHANNEL};
use crate::power;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut watchdog: Watchdog) {
    info!("Controller task started");

    let mut controller = Controller::new(Instant::now().as_millis() as u32);
    let mut last_output = controller.output();
    let mut last_led = controller.led();

    loop {
        match select3(
            COMMAND_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
            LINK_DOWN.wait(),
        )
        .await
        {
            Either3::First(frame) => {
                let now_ms = Instant::now().as_millis() as u32;
                match controller.dispatch(&frame, now_ms) {
                    Dispatch::Acknowledged => send_ack(),
                    Dispatch::Forward(op) => {
                        debug!("Forwarding {:?} to connectivity", op);
                        if FORWARD_CHANNEL.try_send(frame).is_err() {
                            warn!("Connectivity busy, dropping request");
                        }
                    }
                    Dispatch::Keepalive => {
                        trace!("Keepalive");
                    }
                    Dispatch::Unknown(opcode) => {
                        warn!("Unknown opcode 0x{:02X}", opcode);
                    }
                }
                push_outputs(&controller, &mut last_output, &mut last_led);
            }

            Either3::Second(now_ms) => {
                let outcome = controller.tick(now_ms);
                if outcome.stopped_by_watchdog {
                    info!("Inactivity timeout - motors stopped");
                }
                push_outputs(&controller, &mut last_output, &mut last_led);

                if outcome.sleep_due {
                    info!("Idle for {} ms, entering deep sleep", IDLE_TIMEOUT_MS);
                    controller.quiesce();
                    MOTOR_CMD.signal(controller.output());
                    LED_CMD.signal(controller.led());
                    // Give the hardware tasks a moment to apply the quiesce
                    Timer::after_millis(50).await;
                    power::enter_sleep(&mut watchdog);
                }
            }

            Either3::Third(()) => {
                info!("Link down - motors stopped");
                controller.on_disconnect();
                push_outputs(&controller, &mut last_output, &mut last_led);
            }
        }
    }
}

/// Queue the fixed acknowledgment for the link TX task
fn send_ack() {
    let mut line = StatusLine::new();
    // ACK always fits
    let _ = line.push_str(ACK);
    if REPLY_CHANNEL.try_send(line).is_err() {
        warn!("Reply channel full, dropping ack");
    }
}

/// Forward changed output decisions to the hardware tasks, fire-and-forget
fn push_outputs(controller: &Controller, last_output: &mut ActuatorOutput, last_led: &mut LedState) {
    let output = controller.output();
    if output != *last_output {
        *last_output = output;
        MOTOR_CMD.signal(output);
    }

    let led = controller.led();
    if led != *last_led {
        *last_led = led;
        LED_CMD.signal(led);
    }
}

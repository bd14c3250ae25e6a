//! Zobo - Two-Motor Robot Control Firmware
//!
//! Main firmware binary for RP2040-based Zobo robot boards. Commands
//! arrive over a BLE/UART bridge, motion runs on a fixed 10 ms control
//! tick, and idle periods end in a watchdog-timed deep-sleep cycle.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use zobo_drivers::{MotorPair, RgbLed};

mod channels;
mod power;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static LINK_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static LINK_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static NET_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static NET_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut watchdog = Watchdog::new(p.WATCHDOG);

    // RGB indicator (active-low) and headlight (active-high)
    let mut led: tasks::BoardLed = RgbLed::new(
        Output::new(p.PIN_27, Level::High),
        Output::new(p.PIN_14, Level::High),
        Output::new(p.PIN_12, Level::High),
        Output::new(p.PIN_5, Level::Low),
    );

    // A sleep-cycle reboot must be detected before anything else comes up:
    // a timed wake only blinks the indicator and goes straight back down.
    if power::in_sleep_cycle() {
        power::service_wake(&mut watchdog, &mut led);
    }
    power::clear_marker();

    info!("Zobo firmware starting...");

    // Motor PWM: 1 MHz count, top 255 gives ~3.9 kHz and a 1:1 mapping
    // from commanded duty to compare value
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = 125.into();
    pwm_config.top = 255;

    let (left_pwm, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config.clone()).split();
    let (_, right_pwm) = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_25, pwm_config).split();

    // The outputs are always present for the channels configured above
    let motors: tasks::BoardMotors = MotorPair::new(
        left_pwm.expect("left PWM channel not configured"),
        right_pwm.expect("right PWM channel not configured"),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_26, Level::Low),
    );

    info!("Motor outputs initialized");

    // UART0: wireless link bridge (one command frame per transfer)
    let uart_config = UartConfig::default(); // 115200 baud default

    let link_tx_buf = LINK_TX_BUF.init([0u8; 256]);
    let link_rx_buf = LINK_RX_BUF.init([0u8; 256]);
    let link_uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let link_uart = link_uart.into_buffered(Irqs, link_tx_buf, link_rx_buf);
    let (link_tx, link_rx) = link_uart.split();

    // Bridge STATE pin, high while an app session is connected
    let state_pin = Input::new(p.PIN_2, Pull::Down);

    info!("Wireless link initialized");

    // UART1: network co-processor (WiFi/OTA)
    let net_config = UartConfig::default();

    let net_tx_buf = NET_TX_BUF.init([0u8; 256]);
    let net_rx_buf = NET_RX_BUF.init([0u8; 256]);
    let net_uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, net_config);
    let net_uart = net_uart.into_buffered(Irqs, net_tx_buf, net_rx_buf);
    let (net_tx, net_rx) = net_uart.split();

    info!("Connectivity co-processor link initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(link_rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(link_tx)).unwrap();
    spawner.spawn(tasks::motor_task(motors)).unwrap();
    spawner.spawn(tasks::led_task(led)).unwrap();
    spawner.spawn(tasks::connectivity_task(net_tx, net_rx)).unwrap();
    spawner.spawn(tasks::link_state_task(state_pin)).unwrap();
    spawner.spawn(tasks::session_task()).unwrap();
    spawner.spawn(tasks::controller_task(watchdog)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

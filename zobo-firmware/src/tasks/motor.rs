//! Motor output task
//!
//! Waits on the motor output signal and pushes each new actuator state to
//! the dual H-bridge driver. The signal holds only the latest value, so a
//! burst of updates collapses to the most recent one.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;

use zobo_drivers::MotorPair;

use crate::channels::MOTOR_CMD;

pub type BoardMotors =
    MotorPair<PwmOutput<'static>, PwmOutput<'static>, Output<'static>, Output<'static>>;

/// Motor task - applies actuator outputs to the H-bridge pair
#[embassy_executor::task]
pub async fn motor_task(mut motors: BoardMotors) {
    info!("Motor task started");

    motors.stop();

    loop {
        let out = MOTOR_CMD.wait().await;
        trace!(
            "Motor output: L={} R={} dirs=({},{})",
            out.left_duty,
            out.right_duty,
            out.left_dir_high,
            out.right_dir_high
        );
        motors.apply(out);
    }
}

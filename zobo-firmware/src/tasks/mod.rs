//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod connectivity;
pub mod controller;
pub mod led;
pub mod link_rx;
pub mod link_tx;
pub mod motor;
pub mod session;
pub mod tick;

pub use connectivity::connectivity_task;
pub use controller::controller_task;
pub use led::{led_task, BoardLed};
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use motor::{motor_task, BoardMotors};
pub use session::{link_state_task, session_task};
pub use tick::tick_task;

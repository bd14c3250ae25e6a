//! Hardware driver implementations for the Zobo robot
//!
//! Thin sinks over `embedded-hal` traits. The drivers hold no control
//! logic; they apply output values computed by `zobo-core` and remember
//! the last written value to skip redundant hardware writes.

#![no_std]
#![deny(unsafe_code)]

pub mod led;
pub mod motor;

pub use led::RgbLed;
pub use motor::MotorPair;

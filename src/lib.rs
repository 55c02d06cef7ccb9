#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod constants;
mod driver;
mod error;

pub use constants::{
    Selection, DATA_BITS, MAX_VALUE, MIN_VALUE, PULSE_WIDTH_NS, READY_POLL_US, READY_TIMEOUT_US,
    SLEEP_DELAY_US,
};

pub use driver::{convert_from_twos_complement, Hx711};

pub use error::Hx711Error;

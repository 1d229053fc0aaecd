//! This is a [bit banging] driver for the AT24C02 two-wire serial EEPROM,
//! built on the [`embedded-hal`] traits.
//!
//! The crate has two layers:
//!
//! - [`i2c::I2cBB`] owns the SCL and SDA pins plus a delay and implements the
//!   bus primitives (start, stop, byte shifting, acknowledgment).
//! - [`eeprom::At24c02`] sequences those primitives into single-byte random
//!   reads and writes against the 256-byte memory array.
//!
//! [bit banging]: https://en.wikipedia.org/wiki/Bit_banging
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
//!
//! ## Usage
//!
//! ```ignore
//! let mut eeprom = at24c02_bitbang::At24c02::from_pins(scl, sda, delay);
//! eeprom.write_byte(0x10, 0xe5)?;
//! assert_eq!(eeprom.read_byte(0x10)?, 0xe5);
//! ```

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod eeprom;
pub mod i2c;

pub use crate::config::{AckCheck, Config, Timing};
pub use crate::eeprom::At24c02;
pub use crate::error::{Error, Result};
pub use crate::i2c::{Ack, BusState, I2cBB};

//! Configuration for the bus timing and the EEPROM transaction layer.

/// 7-bit bus address of the AT24C02 with the A2..A0 pins tied low.
pub const DEVICE_ADDRESS: u8 = 0x50;

/// Size of the memory array in bytes; every `u8` is a valid memory address.
pub const CAPACITY: usize = 256;

/// Internal write cycle of the device after a stop condition (datasheet tWR).
pub const WRITE_CYCLE_MS: u16 = 5;

/// Delay after every line transition, half an SCL period (about 100 kHz).
pub const HALF_PERIOD_US: u16 = 5;

/// Time the clock is held high on the acknowledgment pulse before SDA is sampled.
pub const ACK_SETTLE_US: u16 = 200;

/// Bus-level delays used by [`I2cBB`](crate::i2c::I2cBB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Microseconds waited after each SCL or SDA transition.
    pub half_period_us: u16,
    /// Microseconds SCL stays high on the ninth pulse before the ack is sampled.
    pub ack_settle_us: u16,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            half_period_us: HALF_PERIOD_US,
            ack_settle_us: ACK_SETTLE_US,
        }
    }
}

/// What the transaction layer does with the sampled acknowledgment bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AckCheck {
    /// A missing acknowledgment aborts the transaction and is retried, then
    /// reported as [`Error::NoAck`](crate::Error::NoAck).
    Enabled,
    /// Sample the acknowledgment but always proceed as if the device answered.
    Ignore,
}

/// User-facing configuration of an [`At24c02`](crate::eeprom::At24c02).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Bus-level delays.
    pub timing: Timing,
    /// Milliseconds waited after the stop condition of a write.
    pub write_cycle_ms: u16,
    /// Acknowledgment handling.
    pub ack_check: AckCheck,
    /// Extra attempts made after a transaction was not acknowledged.
    pub retries: u8,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            write_cycle_ms: WRITE_CYCLE_MS,
            ack_check: AckCheck::Enabled,
            retries: 1,
        }
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the bus timing.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.config.timing = timing;
        self
    }

    /// Overrides the post-write delay.
    pub fn write_cycle_ms(mut self, ms: u16) -> Self {
        self.config.write_cycle_ms = ms;
        self
    }

    /// Selects the acknowledgment handling.
    pub fn ack_check(mut self, ack_check: AckCheck) -> Self {
        self.config.ack_check = ack_check;
        self
    }

    /// Sets how many times a transaction is repeated after a missing ack.
    pub fn retries(mut self, retries: u8) -> Self {
        self.config.retries = retries;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

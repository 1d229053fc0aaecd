//! Single-byte random access to the AT24C02 memory array.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::config::{AckCheck, Config, DEVICE_ADDRESS};
use crate::error::{Error, Result};
use crate::i2c::{Ack, I2cBB};

/// Transfer direction carried in the lowest bit of the device address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Write = 0,
    Read = 1,
}

const fn address_byte(direction: Direction) -> u8 {
    (DEVICE_ADDRESS << 1) | direction as u8
}

/// AT24C02 driver on top of a bit banged bus
pub struct At24c02<SCL, SDA, DELAY>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    bus: I2cBB<SCL, SDA, DELAY>,
    config: Config,
}

impl<SCL, SDA, DELAY, E> At24c02<SCL, SDA, DELAY>
where
    SCL: OutputPin<Error = E>,
    SDA: OutputPin<Error = E> + InputPin<Error = E>,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    /// Wraps a bus. The bus timing is taken from the bus itself, not from
    /// `config.timing`.
    pub fn new(bus: I2cBB<SCL, SDA, DELAY>, config: Config) -> Self {
        At24c02 { bus, config }
    }

    /// Builds the bus and the driver with [`Config::default()`].
    pub fn from_pins(scl: SCL, sda: SDA, delay: DELAY) -> Self {
        Self::with_config(scl, sda, delay, Config::default())
    }

    /// Builds the bus with `config.timing` and the driver with `config`.
    pub fn with_config(scl: SCL, sda: SDA, delay: DELAY, config: Config) -> Self {
        Self::new(I2cBB::new(scl, sda, delay, config.timing), config)
    }

    /// Consumes the driver and returns the bus
    pub fn release(self) -> I2cBB<SCL, SDA, DELAY> {
        self.bus
    }

    /// Direct access to the bus primitives
    pub fn bus_mut(&mut self) -> &mut I2cBB<SCL, SDA, DELAY> {
        &mut self.bus
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the byte stored at `address`.
    ///
    /// Dummy write of the memory address, repeated start, then one byte is
    /// read and answered with a NACK.
    pub fn read_byte(&mut self, address: u8) -> Result<u8, E> {
        self.with_retries(|eeprom| eeprom.random_read(address))
    }

    /// Writes `value` to `address` and waits out the internal write cycle.
    pub fn write_byte(&mut self, address: u8, value: u8) -> Result<(), E> {
        self.with_retries(|eeprom| eeprom.byte_write(address, value))
    }

    fn random_read(&mut self, address: u8) -> Result<u8, E> {
        trace!("eeprom: read {=u8:#x}", address);

        // ST, SAD + W
        self.bus.start()?;
        self.bus.write_byte(address_byte(Direction::Write))?;
        self.expect_ack()?;

        // word address
        self.bus.write_byte(address)?;
        self.expect_ack()?;

        // SR, SAD + R
        self.bus.start()?;
        self.bus.write_byte(address_byte(Direction::Read))?;
        self.expect_ack()?;

        let value = self.bus.read_byte()?;
        self.bus.send_ack(Ack::Nack)?;

        // SP
        self.bus.stop()?;

        Ok(value)
    }

    fn byte_write(&mut self, address: u8, value: u8) -> Result<(), E> {
        trace!("eeprom: write {=u8:#x} <- {=u8:#x}", address, value);

        // ST, SAD + W
        self.bus.start()?;
        self.bus.write_byte(address_byte(Direction::Write))?;
        self.expect_ack()?;

        self.bus.write_byte(address)?;
        self.expect_ack()?;

        self.bus.write_byte(value)?;
        self.expect_ack()?;

        // SP
        self.bus.stop()?;

        // tWR: the device ignores the bus until the cell is programmed
        self.bus.delay_ms(self.config.write_cycle_ms);

        Ok(())
    }

    /// Samples the ninth pulse. On a NACK with checking enabled the
    /// transaction is closed with a stop before the error is returned.
    fn expect_ack(&mut self) -> Result<(), E> {
        let ack = self.bus.wait_ack()?;

        if ack == Ack::Nack && self.config.ack_check == AckCheck::Enabled {
            self.bus.stop()?;
            return Err(Error::NoAck);
        }

        Ok(())
    }

    fn with_retries<T, F>(&mut self, mut transaction: F) -> Result<T, E>
    where
        F: FnMut(&mut Self) -> Result<T, E>,
    {
        let mut attempt: u8 = 0;

        loop {
            match transaction(self) {
                Err(Error::NoAck) if attempt < self.config.retries => {
                    attempt += 1;
                    warn!("eeprom: not acknowledged, retry {=u8}", attempt);
                }
                Err(Error::NoAck) => {
                    warn!("eeprom: not acknowledged, giving up");
                    return Err(Error::NoAck);
                }
                result => return result,
            }
        }
    }
}

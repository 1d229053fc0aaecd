/*!
  # Bit banged I2C bus primitives

  This implementation consumes the following hardware resources:
  - A blocking delay with microsecond and millisecond granularity
  - Two GPIO pins for SDA and SCL lines.

  Note that the current implementation does not support I2C clock stretching
  or multi-master arbitration.

  ## Hardware requirements

  1. Configure GPIO pins as Open-Drain outputs with pull-ups. Driving SDA high
     releases the line so the device can pull it low.
  2. Pick [`Timing::half_period_us`] for the desired clock rate; the default
     gives roughly 100 kHz.

  The primitives only shift bits. Sequencing them into device transactions
  is the job of [`At24c02`](crate::eeprom::At24c02).
*/

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::config::Timing;
use crate::error::{Error, Result};

/// Level on SDA during the ninth clock pulse of a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// SDA held low, the byte was accepted
    Ack,
    /// SDA left high, the byte was rejected or no more data is wanted
    Nack,
}

impl Ack {
    fn from_sda_high(high: bool) -> Self {
        if high {
            Ack::Nack
        } else {
            Ack::Ack
        }
    }
}

/// Whether a transaction is open on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusState {
    /// No transaction, both lines released
    Idle,
    /// A start condition was issued and no stop yet
    Started,
}

/// Bit banging I2C master
pub struct I2cBB<SCL, SDA, DELAY>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    scl: SCL,
    sda: SDA,
    delay: DELAY,
    timing: Timing,
    state: BusState,
}

impl<SCL, SDA, DELAY, E> I2cBB<SCL, SDA, DELAY>
where
    SCL: OutputPin<Error = E>,
    SDA: OutputPin<Error = E> + InputPin<Error = E>,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    /// Create instance
    pub fn new(scl: SCL, sda: SDA, delay: DELAY, timing: Timing) -> Self {
        I2cBB {
            scl,
            sda,
            delay,
            timing,
            state: BusState::Idle,
        }
    }

    /// Give back the pins and the delay
    pub fn destroy(self) -> (SCL, SDA, DELAY) {
        (self.scl, self.sda, self.delay)
    }

    /// Current transaction state
    pub fn state(&self) -> BusState {
        self.state
    }

    /// Bus timing in use
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Start condition: SDA falls while SCL is high, then SCL is pulled low
    /// for the data phase.
    ///
    /// Called again without a stop in between it forms a repeated start.
    pub fn start(&mut self) -> Result<(), E> {
        if self.state == BusState::Started {
            trace!("i2c: repeated start");
        }

        self.set_sda_high()?;
        self.wait_half_period();

        self.set_scl_high()?;
        self.wait_half_period();

        self.set_sda_low()?;
        self.wait_half_period();

        self.set_scl_low()?;
        self.wait_half_period();

        self.state = BusState::Started;
        Ok(())
    }

    /// Stop condition: SDA rises while SCL is high.
    ///
    /// SCL must already be low, which holds after any of the byte or
    /// acknowledgment primitives.
    pub fn stop(&mut self) -> Result<(), E> {
        self.set_sda_low()?;
        self.wait_half_period();

        self.set_scl_high()?;
        self.wait_half_period();

        self.set_sda_high()?;
        self.wait_half_period();

        self.state = BusState::Idle;
        Ok(())
    }

    /// Shift out eight bits, MSB first. The acknowledgment is not read.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), E> {
        for bit_offset in 0..8 {
            let out_bit = (byte >> (7 - bit_offset)) & 0b1;

            if out_bit == 1 {
                self.set_sda_high()?;
            } else {
                self.set_sda_low()?;
            }
            self.wait_half_period();

            self.pulse_scl()?;
        }

        Ok(())
    }

    /// Release SDA and clock in eight bits, MSB first.
    pub fn read_byte(&mut self) -> Result<u8, E> {
        let mut byte: u8 = 0;

        self.set_sda_high()?;
        self.wait_half_period();

        for bit_offset in 0..8 {
            self.set_scl_high()?;
            self.wait_half_period();

            if self.sda.is_high().map_err(Error::Bus)? {
                byte |= 1 << (7 - bit_offset);
            }

            self.set_scl_low()?;
            self.wait_half_period();
        }

        Ok(byte)
    }

    /// Clock the ninth pulse with SDA released and report what the device
    /// drove on it.
    pub fn wait_ack(&mut self) -> Result<Ack, E> {
        self.set_sda_high()?;
        self.wait_half_period();

        self.set_scl_high()?;
        self.delay.delay_us(self.timing.ack_settle_us);

        let ack = Ack::from_sda_high(self.sda.is_high().map_err(Error::Bus)?);

        self.set_scl_low()?;
        self.wait_half_period();

        if ack == Ack::Nack {
            debug!("i2c: no ack from device");
        }

        Ok(ack)
    }

    /// Drive the ninth pulse ourselves, as the receiver of a byte.
    pub fn send_ack(&mut self, ack: Ack) -> Result<(), E> {
        match ack {
            Ack::Ack => self.set_sda_low()?,
            Ack::Nack => self.set_sda_high()?,
        }
        self.wait_half_period();

        self.pulse_scl()
    }

    /// Block for `ms` milliseconds, e.g. while the device commits a write.
    pub fn delay_ms(&mut self, ms: u16) {
        self.delay.delay_ms(ms);
    }

    #[inline]
    fn pulse_scl(&mut self) -> Result<(), E> {
        self.set_scl_high()?;
        self.wait_half_period();

        self.set_scl_low()?;
        self.wait_half_period();

        Ok(())
    }

    #[inline]
    fn set_scl_high(&mut self) -> Result<(), E> {
        self.scl.set_high().map_err(Error::Bus)
    }

    #[inline]
    fn set_scl_low(&mut self) -> Result<(), E> {
        self.scl.set_low().map_err(Error::Bus)
    }

    #[inline]
    fn set_sda_high(&mut self) -> Result<(), E> {
        self.sda.set_high().map_err(Error::Bus)
    }

    #[inline]
    fn set_sda_low(&mut self) -> Result<(), E> {
        self.sda.set_low().map_err(Error::Bus)
    }

    #[inline]
    fn wait_half_period(&mut self) {
        self.delay.delay_us(self.timing.half_period_us);
    }
}

//! Support for the `PCF8575` "Remote 16-bit I/O expander for I2C-bus with interrupt"
//!
//! Datasheet: <https://www.ti.com/lit/ds/symlink/pcf8575.pdf>
//!
//! The PCF8575 has no registers. Writing two bytes sets the output latches of port 0 (P00..P07)
//! and port 1 (P10..P17), reading two bytes returns the electrical level of the same pins.
//! A pin latched HIGH is only held up by a weak pull-up, so it doubles as an input; a pin
//! latched LOW is actively driven low.
//!
//! Logical pin `n` in `0..=7` is `P0n`, pin `n` in `8..=15` is `P1(n-8)`. When passing 16-bit
//! values to this driver, the lower byte corresponds to port 0.
//!
//! The interrupt output of the chip is not supported.
use core::cell::RefCell;
use core::fmt;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::bits;
use crate::{Device, Error, I2cBus, I2cConn, Operation, PortDriver};

/// Address of a PCF8575 with A0, A1 and A2 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Address selected by the A0..A2 hardware strapping pins.
pub const fn address(a0: bool, a1: bool, a2: bool) -> u8 {
    DEFAULT_ADDRESS | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8)
}

/// `PCF8575` "Remote 16-bit I/O expander for I2C-bus with interrupt"
///
/// The handle keeps a shadow of the output latches, which always equals the last payload the
/// chip acknowledged. It does no locking of its own; see [`SharedPcf8575`] for sharing it between
/// pins.
pub struct Pcf8575<I2C> {
    conn: I2cConn<I2C>,
    latch: [u8; 2],
}

impl<I2C: I2cBus> Pcf8575<I2C> {
    /// Create a new driver for the device at `addr`.
    ///
    /// All pins are released HIGH, the chip's power-on state, and that state is written to the
    /// chip before the handle is returned.
    pub fn new(i2c: I2C, addr: u8) -> Result<Self, Error<I2C::BusError>> {
        let mut dev = Self {
            conn: I2cConn::new(i2c, addr),
            latch: bits::RESET_LATCH,
        };
        dev.commit(bits::RESET_LATCH)?;
        Ok(dev)
    }

    /// Create a new driver for the device strapped with `a0`, `a1` and `a2`.
    pub fn with_address_pins(i2c: I2C, a0: bool, a1: bool, a2: bool) -> Result<Self, Error<I2C::BusError>> {
        Self::new(i2c, address(a0, a1, a2))
    }

    /// Set the output latch of pin `index` and write both ports to the chip.
    ///
    /// `true` releases the pin to its pull-up, `false` drives it low. The shadow latch only
    /// changes once the chip acknowledged the write.
    pub fn write_output(&mut self, index: u8, state: bool) -> Result<(), Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::WriteOutput, index)?;
        self.commit(bits::with_pin(self.latch, port, bit, state))
    }

    /// Return the last value written to pin `index`.
    ///
    /// This method does **not** read the pin's electrical state.
    pub fn read_output(&self, index: u8) -> Result<bool, Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::ReadOutput, index)?;
        Ok(bits::pin_level(self.latch, port, bit))
    }

    /// Read the electrical level of pin `index` from the chip.
    ///
    /// Every call reads both ports from the chip.
    pub fn read_input(&mut self, index: u8) -> Result<bool, Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::ReadInput, index)?;
        let levels = self.fetch()?;
        Ok(bits::pin_level(levels, port, bit))
    }

    /// Write all sixteen output latches at once.
    pub fn write_port(&mut self, value: u16) -> Result<(), Error<I2C::BusError>> {
        self.commit(bits::from_word(value))
    }

    /// Read the electrical level of all sixteen pins.
    pub fn read_port(&mut self) -> Result<u16, Error<I2C::BusError>> {
        self.fetch().map(bits::to_word)
    }

    /// Wrap the driver in a mutex so it can be split into individual pins.
    pub fn into_shared<RM: RawMutex>(self) -> SharedPcf8575<RM, I2C> {
        SharedPcf8575::new(self)
    }

    fn commit(&mut self, latch: [u8; 2]) -> Result<(), Error<I2C::BusError>> {
        self.conn.tx(&latch, &mut []).map_err(Error::Bus)?;
        log::trace!("{}: latched {:02x?}", self, latch);
        self.latch = latch;
        Ok(())
    }

    fn fetch(&mut self) -> Result<[u8; 2], Error<I2C::BusError>> {
        let mut levels = [0x00; 2];
        self.conn.tx(&[], &mut levels).map_err(Error::Bus)?;
        log::trace!("{}: read {:02x?}", self, levels);
        Ok(levels)
    }
}

impl<I2C> Pcf8575<I2C> {
    /// Shadow of the output latches, lower byte is port 0.
    pub fn latch(&self) -> u16 {
        bits::to_word(self.latch)
    }

    /// I2C address of the device.
    pub fn address(&self) -> u8 {
        self.conn.addr()
    }

    /// Destroy the driver and give the bus back. The chip keeps its current outputs.
    pub fn release(self) -> I2C {
        self.conn.release()
    }
}

impl<I2C> fmt::Display for Pcf8575<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PCF8575{{{}}}", self.conn)
    }
}

impl<I2C: I2cBus> Device for Pcf8575<I2C> {
    type Error = Error<I2C::BusError>;

    /// The chip has no mode to disable, so this does nothing.
    fn halt(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<I2C: I2cBus> PortDriver for Pcf8575<I2C> {
    type Error = Error<I2C::BusError>;

    fn set(&mut self, mask_high: u16, mask_low: u16) -> Result<(), Self::Error> {
        let out = (bits::to_word(self.latch) | mask_high) & !mask_low;
        self.commit(bits::from_word(out))
    }

    fn is_set(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error> {
        let out = bits::to_word(self.latch);
        Ok((out & mask_high) | (!out & mask_low))
    }

    fn get(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error> {
        let in_ = self.read_port()?;
        Ok((in_ & mask_high) | (!in_ & mask_low))
    }
}

/// A [`Pcf8575`] behind a blocking mutex, ready to be split into pins.
///
/// `RM` picks the locking strategy, e.g. `NoopRawMutex` for single-context use or
/// `CriticalSectionRawMutex` when pins are used from interrupts.
pub struct SharedPcf8575<RM: RawMutex, I2C>(Mutex<RM, RefCell<Pcf8575<I2C>>>);

impl<RM, I2C> SharedPcf8575<RM, I2C>
where
    RM: RawMutex,
    I2C: I2cBus,
{
    /// Wrap an initialized driver.
    pub fn new(dev: Pcf8575<I2C>) -> Self {
        Self(Mutex::new(RefCell::new(dev)))
    }

    /// Run `f` with exclusive access to the driver.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Pcf8575<I2C>) -> R) -> R {
        self.0.lock(|dev| f(&mut *dev.borrow_mut()))
    }

    /// Split the PCF8575 driver instance into its individual pins
    pub fn split(&mut self) -> Parts<'_, RM, I2C> {
        Parts {
            p00: crate::Pin::new(0, &self.0),
            p01: crate::Pin::new(1, &self.0),
            p02: crate::Pin::new(2, &self.0),
            p03: crate::Pin::new(3, &self.0),
            p04: crate::Pin::new(4, &self.0),
            p05: crate::Pin::new(5, &self.0),
            p06: crate::Pin::new(6, &self.0),
            p07: crate::Pin::new(7, &self.0),
            p10: crate::Pin::new(8, &self.0),
            p11: crate::Pin::new(9, &self.0),
            p12: crate::Pin::new(10, &self.0),
            p13: crate::Pin::new(11, &self.0),
            p14: crate::Pin::new(12, &self.0),
            p15: crate::Pin::new(13, &self.0),
            p16: crate::Pin::new(14, &self.0),
            p17: crate::Pin::new(15, &self.0),
        }
    }

    /// Unwrap the driver again.
    pub fn into_inner(self) -> Pcf8575<I2C> {
        self.0.into_inner().into_inner()
    }
}

/// Pins of the PCF8575
#[allow(missing_docs)]
pub struct Parts<'a, RM, I2C>
where
    RM: RawMutex,
    I2C: I2cBus,
{
    pub p00: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p01: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p02: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p03: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p04: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p05: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p06: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p07: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p10: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p11: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p12: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p13: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p14: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p15: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p16: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
    pub p17: crate::Pin<'a, crate::mode::QuasiBidirectional, Pcf8575<I2C>, RM>,
}

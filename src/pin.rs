use core::cell::RefCell;
use core::marker::PhantomData;
use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embedded_hal::digital::{self as hal_digital, ErrorType};

use crate::PortDriver;

/// Representation of a port-expander pin.
///
/// `Pin` is not constructed directly, this type is created by wrapping a port-expander in a
/// mutex and then getting access to all its pins using the `.split()` method.
pub struct Pin<'a, MODE, PD, RM: RawMutex> {
    pin_mask: u16,
    port_driver: &'a Mutex<RM, RefCell<PD>>,
    _m: PhantomData<MODE>,
}

impl<'a, MODE, PD, RM> Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    RM: RawMutex,
{
    pub(crate) fn new(pin_number: u8, port_driver: &'a Mutex<RM, RefCell<PD>>) -> Self {
        assert!(pin_number < 16);
        Self {
            pin_mask: 1 << pin_number,
            port_driver,
            _m: PhantomData,
        }
    }

    /// Mask of this pin in the expander's 16-bit pin space.
    pub fn pin_mask(&self) -> u16 {
        self.pin_mask
    }

    /// Run `f` with exclusive access to the port driver.
    pub fn access_port_driver<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PD) -> R,
    {
        self.port_driver.lock(|pd| f(&mut *pd.borrow_mut()))
    }
}

/// Error type for [`Pin`] which implements [`embedded_hal::digital::Error`].
#[derive(Debug)]
pub struct PinError<PDE> {
    driver_error: PDE,
}

impl<PDE> PinError<PDE> {
    /// The upstream port driver error that occurred
    pub fn driver_error(&self) -> &PDE {
        &self.driver_error
    }
}

impl<PDE> hal_digital::Error for PinError<PDE>
where
    PDE: core::fmt::Debug,
{
    fn kind(&self) -> hal_digital::ErrorKind {
        hal_digital::ErrorKind::Other
    }
}

impl<PDE> From<PDE> for PinError<PDE> {
    fn from(value: PDE) -> Self {
        Self {
            driver_error: value,
        }
    }
}

impl<'a, MODE, PD, RM> ErrorType for Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    PD::Error: core::fmt::Debug,
    RM: RawMutex,
{
    type Error = PinError<PD::Error>;
}

impl<'a, MODE: crate::mode::HasInput, PD, RM> Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    RM: RawMutex,
{
    /// Read the pin's input state and return `true` if it is HIGH.
    pub fn is_high(&self) -> Result<bool, PinError<PD::Error>> {
        Ok(self.access_port_driver(|pd| pd.get(self.pin_mask, 0))? == self.pin_mask)
    }

    /// Read the pin's input state and return `true` if it is LOW.
    pub fn is_low(&self) -> Result<bool, PinError<PD::Error>> {
        Ok(self.access_port_driver(|pd| pd.get(0, self.pin_mask))? == self.pin_mask)
    }
}

impl<'a, MODE: crate::mode::HasInput, PD, RM> hal_digital::InputPin for Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    PD::Error: core::fmt::Debug,
    RM: RawMutex,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, PD, RM> Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    RM: RawMutex,
{
    /// Set the pin's output state to HIGH.
    ///
    /// On a quasi-bidirectional pin this releases it to the weak pull-up.
    pub fn set_high(&mut self) -> Result<(), PinError<PD::Error>> {
        self.access_port_driver(|pd| pd.set(self.pin_mask, 0))?;
        Ok(())
    }

    /// Set the pin's output state to LOW.
    pub fn set_low(&mut self) -> Result<(), PinError<PD::Error>> {
        self.access_port_driver(|pd| pd.set(0, self.pin_mask))?;
        Ok(())
    }

    /// Return `true` if the pin's output state is HIGH.
    ///
    /// This method does **not** read the pin's electrical state.
    pub fn is_set_high(&self) -> Result<bool, PinError<PD::Error>> {
        Ok(self.access_port_driver(|pd| pd.is_set(self.pin_mask, 0))? == self.pin_mask)
    }

    /// Return `true` if the pin's output state is LOW.
    ///
    /// This method does **not** read the pin's electrical state.
    pub fn is_set_low(&self) -> Result<bool, PinError<PD::Error>> {
        Ok(self.access_port_driver(|pd| pd.is_set(0, self.pin_mask))? == self.pin_mask)
    }

    /// Toggle the pin's output state.
    pub fn toggle(&mut self) -> Result<(), PinError<PD::Error>> {
        self.access_port_driver(|pd| pd.toggle(self.pin_mask))?;
        Ok(())
    }
}

impl<'a, MODE: crate::mode::HasOutput, PD, RM> hal_digital::OutputPin for Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    PD::Error: core::fmt::Debug,
    RM: RawMutex,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, PD, RM> hal_digital::StatefulOutputPin
    for Pin<'a, MODE, PD, RM>
where
    PD: PortDriver,
    PD::Error: core::fmt::Debug,
    RM: RawMutex,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}

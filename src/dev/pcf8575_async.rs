//! Async driver for the `PCF8575`, for buses implementing `embedded_hal_async::i2c::I2c`.
//!
//! Behaves exactly like [`Pcf8575`](crate::Pcf8575): same wire traffic, same errors, and the
//! shadow latch is committed only after the chip acknowledged a write.
use core::fmt;

use crate::bits;
use crate::dev::pcf8575::address;
use crate::{AsyncI2cBus, Device, Error, I2cConn, Operation};

/// `PCF8575` driver over an async I2C bus
pub struct Pcf8575Async<I2C> {
    conn: I2cConn<I2C>,
    latch: [u8; 2],
}

impl<I2C: AsyncI2cBus> Pcf8575Async<I2C> {
    /// Create a new driver for the device at `addr` and release all pins HIGH.
    pub async fn new(i2c: I2C, addr: u8) -> Result<Self, Error<I2C::BusError>> {
        let mut dev = Self {
            conn: I2cConn::new(i2c, addr),
            latch: bits::RESET_LATCH,
        };
        dev.commit(bits::RESET_LATCH).await?;
        Ok(dev)
    }

    /// Create a new driver for the device strapped with `a0`, `a1` and `a2`.
    pub async fn with_address_pins(i2c: I2C, a0: bool, a1: bool, a2: bool) -> Result<Self, Error<I2C::BusError>> {
        Self::new(i2c, address(a0, a1, a2)).await
    }

    /// Set the output latch of pin `index` and write both ports to the chip.
    pub async fn write_output(&mut self, index: u8, state: bool) -> Result<(), Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::WriteOutput, index)?;
        self.commit(bits::with_pin(self.latch, port, bit, state)).await
    }

    /// Return the last value written to pin `index`. No bus traffic.
    pub fn read_output(&self, index: u8) -> Result<bool, Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::ReadOutput, index)?;
        Ok(bits::pin_level(self.latch, port, bit))
    }

    /// Read the electrical level of pin `index` from the chip.
    pub async fn read_input(&mut self, index: u8) -> Result<bool, Error<I2C::BusError>> {
        let (port, bit) = bits::locate_for(Operation::ReadInput, index)?;
        let levels = self.fetch().await?;
        Ok(bits::pin_level(levels, port, bit))
    }

    /// Write all sixteen output latches at once.
    pub async fn write_port(&mut self, value: u16) -> Result<(), Error<I2C::BusError>> {
        self.commit(bits::from_word(value)).await
    }

    /// Read the electrical level of all sixteen pins.
    pub async fn read_port(&mut self) -> Result<u16, Error<I2C::BusError>> {
        self.fetch().await.map(bits::to_word)
    }

    async fn commit(&mut self, latch: [u8; 2]) -> Result<(), Error<I2C::BusError>> {
        self.conn.tx_async(&latch, &mut []).await.map_err(Error::Bus)?;
        log::trace!("{}: latched {:02x?}", self, latch);
        self.latch = latch;
        Ok(())
    }

    async fn fetch(&mut self) -> Result<[u8; 2], Error<I2C::BusError>> {
        let mut levels = [0x00; 2];
        self.conn.tx_async(&[], &mut levels).await.map_err(Error::Bus)?;
        log::trace!("{}: read {:02x?}", self, levels);
        Ok(levels)
    }
}

impl<I2C> Pcf8575Async<I2C> {
    /// Shadow of the output latches, lower byte is port 0.
    pub fn latch(&self) -> u16 {
        bits::to_word(self.latch)
    }

    /// I2C address of the device.
    pub fn address(&self) -> u8 {
        self.conn.addr()
    }

    /// Destroy the driver and give the bus back.
    pub fn release(self) -> I2C {
        self.conn.release()
    }
}

impl<I2C> fmt::Display for Pcf8575Async<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PCF8575{{{}}}", self.conn)
    }
}

impl<I2C: AsyncI2cBus> Device for Pcf8575Async<I2C> {
    type Error = Error<I2C::BusError>;

    fn halt(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    use super::Pcf8575Async;
    use crate::{Device, Error, Operation, DEFAULT_ADDRESS};

    #[test]
    fn pcf8575_async() {
        let expectations = [
            mock_i2c::Transaction::write(DEFAULT_ADDRESS, vec![0xff, 0xff]),
            mock_i2c::Transaction::write(DEFAULT_ADDRESS, vec![0xff, 0xfb]),
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x01, 0x80]),
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x01, 0x80]),
            mock_i2c::Transaction::write(DEFAULT_ADDRESS, vec![0x00, 0xff]),
            mock_i2c::Transaction::read(DEFAULT_ADDRESS, vec![0x0f, 0xf0]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        block_on(async {
            let mut dev = Pcf8575Async::new(bus.clone(), DEFAULT_ADDRESS).await.unwrap();
            assert!(dev.read_output(10).unwrap());

            dev.write_output(10, false).await.unwrap();
            assert!(!dev.read_output(10).unwrap());
            assert_eq!(dev.latch(), 0xfbff);

            assert!(dev.read_input(15).await.unwrap());
            assert!(!dev.read_input(1).await.unwrap());

            dev.write_port(0xff00).await.unwrap();
            assert_eq!(dev.read_port().await.unwrap(), 0xf00f);

            assert_eq!(dev.to_string(), "PCF8575{I2C(0x20)}");
            dev.halt().unwrap();
        });

        bus.done();
    }

    #[test]
    fn pcf8575_async_errors() {
        let expectations = [
            mock_i2c::Transaction::write(0x23, vec![0xff, 0xff]),
            mock_i2c::Transaction::write(0x23, vec![0xfb, 0xff]).with_error(ErrorKind::Other),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        block_on(async {
            let mut dev = Pcf8575Async::with_address_pins(bus.clone(), true, true, false)
                .await
                .unwrap();

            assert!(matches!(
                dev.read_input(16).await,
                Err(Error::PinOutOfRange { op: Operation::ReadInput, index: 16 })
            ));
            assert!(matches!(
                dev.write_output(2, false).await,
                Err(Error::Bus(ErrorKind::Other))
            ));
            assert_eq!(dev.latch(), 0xffff);
        });

        bus.done();
    }

    #[test]
    fn pcf8575_async_range_checks_before_io() {
        let expectations = [mock_i2c::Transaction::write(DEFAULT_ADDRESS, vec![0xff, 0xff])];
        let mut bus = mock_i2c::Mock::new(&expectations);

        block_on(async {
            let mut dev = Pcf8575Async::new(bus.clone(), DEFAULT_ADDRESS).await.unwrap();

            assert!(matches!(
                dev.write_output(16, false).await,
                Err(Error::PinOutOfRange { op: Operation::WriteOutput, index: 16 })
            ));
            assert!(matches!(
                dev.read_output(255),
                Err(Error::PinOutOfRange { op: Operation::ReadOutput, index: 255 })
            ));
            assert!(matches!(
                dev.read_input(200).await,
                Err(Error::PinOutOfRange { op: Operation::ReadInput, index: 200 })
            ));
            assert_eq!(dev.latch(), 0xffff);
        });

        bus.done();
    }

    #[test]
    fn pcf8575_async_new_fails() {
        let expectations = [
            mock_i2c::Transaction::write(DEFAULT_ADDRESS, vec![0xff, 0xff]).with_error(ErrorKind::Other),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);

        let dev = block_on(Pcf8575Async::new(bus.clone(), DEFAULT_ADDRESS));
        assert!(matches!(dev, Err(Error::Bus(ErrorKind::Other))));

        bus.done();
    }
}

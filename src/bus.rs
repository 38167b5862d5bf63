use core::fmt;

use embedded_hal::i2c as hal_i2c;
use embedded_hal_async::i2c as async_i2c;

/// Blanket trait for types implementing `embedded_hal::i2c::I2c`
pub trait I2cBus: hal_i2c::I2c {
    /// Error surfaced by the driver for failed transactions.
    type BusError: From<<Self as hal_i2c::ErrorType>::Error>;
}

impl<T, E> I2cBus for T
where
    T: hal_i2c::I2c<Error = E>,
{
    type BusError = E;
}

/// Blanket trait for types implementing `embedded_hal_async::i2c::I2c`
pub trait AsyncI2cBus: async_i2c::I2c {
    /// Error surfaced by the driver for failed transactions.
    type BusError: From<<Self as hal_i2c::ErrorType>::Error>;
}

impl<T, E> AsyncI2cBus for T
where
    T: async_i2c::I2c<Error = E>,
{
    type BusError = E;
}

/// An I2C bus bound to one device address.
///
/// Pass `&mut I2C` or a shared-bus device (e.g. from `embedded-hal-bus`) to keep using the bus
/// elsewhere.
pub struct I2cConn<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C> I2cConn<I2C> {
    /// Bind `i2c` to the 7-bit address `addr`.
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// The bound device address.
    pub fn addr(&self) -> u8 {
        self.addr
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> I2cConn<I2C> {
    /// Run one transaction: write `write`, then fill `read`.
    ///
    /// An empty `read` is a plain write, an empty `write` a plain read.
    pub fn tx(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), I2C::BusError> {
        if read.is_empty() {
            self.i2c.write(self.addr, write)?;
        } else if write.is_empty() {
            self.i2c.read(self.addr, read)?;
        } else {
            self.i2c.write_read(self.addr, write, read)?;
        }
        Ok(())
    }
}

impl<I2C: AsyncI2cBus> I2cConn<I2C> {
    /// Async version of [`I2cConn::tx`].
    pub async fn tx_async(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), I2C::BusError> {
        if read.is_empty() {
            self.i2c.write(self.addr, write).await?;
        } else if write.is_empty() {
            self.i2c.read(self.addr, read).await?;
        } else {
            self.i2c.write_read(self.addr, write, read).await?;
        }
        Ok(())
    }
}

impl<I2C> fmt::Display for I2cConn<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I2C({:#04x})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::i2c as mock_i2c;

    use super::I2cConn;

    #[test]
    fn tx_picks_direction() {
        let expectations = [
            mock_i2c::Transaction::write(0x20, vec![0xaa, 0x55]),
            mock_i2c::Transaction::read(0x20, vec![0x12, 0x34]),
            mock_i2c::Transaction::write_read(0x20, vec![0x01], vec![0x02]),
        ];
        let mut bus = mock_i2c::Mock::new(&expectations);
        let mut conn = I2cConn::new(bus.clone(), 0x20);

        conn.tx(&[0xaa, 0x55], &mut []).unwrap();

        let mut buf = [0u8; 2];
        conn.tx(&[], &mut buf).unwrap();
        assert_eq!(buf, [0x12, 0x34]);

        let mut buf = [0u8; 1];
        conn.tx(&[0x01], &mut buf).unwrap();
        assert_eq!(buf, [0x02]);

        bus.done();
    }

    #[test]
    fn label_includes_address() {
        let mut bus = mock_i2c::Mock::new(&[]);
        let conn = I2cConn::new(bus.clone(), 0x27);
        assert_eq!(conn.to_string(), "I2C(0x27)");
        bus.done();
    }
}

use core::fmt;

/// Driver operation that rejected a pin index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Operation {
    /// [`Pcf8575::write_output`](crate::Pcf8575::write_output)
    WriteOutput,
    /// [`Pcf8575::read_output`](crate::Pcf8575::read_output)
    ReadOutput,
    /// [`Pcf8575::read_input`](crate::Pcf8575::read_input)
    ReadInput,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::WriteOutput => "WriteOutput",
            Operation::ReadOutput => "ReadOutput",
            Operation::ReadInput => "ReadInput",
        };
        f.write_str(name)
    }
}

/// Errors returned by the PCF8575 drivers.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// The pin index was not in `0..=15`. Raised before any bus traffic.
    PinOutOfRange {
        /// Operation that was called.
        op: Operation,
        /// Offending pin index.
        index: u8,
    },
    /// The bus reported an error, passed through unchanged.
    Bus(E),
}

impl<E> Error<E> {
    /// The bus error, if this is one.
    pub fn bus_error(&self) -> Option<&E> {
        match self {
            Error::Bus(e) => Some(e),
            Error::PinOutOfRange { .. } => None,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PinOutOfRange { op, index } => {
                write!(f, "PCF8575.{}: pin index out of range ({})", op, index)
            }
            Error::Bus(e) => write!(f, "PCF8575: bus error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_call_site() {
        let write: Error<()> = Error::PinOutOfRange { op: Operation::WriteOutput, index: 16 };
        let output: Error<()> = Error::PinOutOfRange { op: Operation::ReadOutput, index: 99 };
        let read: Error<()> = Error::PinOutOfRange { op: Operation::ReadInput, index: 200 };

        assert_eq!(write.to_string(), "PCF8575.WriteOutput: pin index out of range (16)");
        assert_eq!(output.to_string(), "PCF8575.ReadOutput: pin index out of range (99)");
        assert_eq!(read.to_string(), "PCF8575.ReadInput: pin index out of range (200)");
    }

    #[test]
    fn bus_errors_pass_through() {
        let err = Error::Bus(embedded_hal::i2c::ErrorKind::Bus);
        assert_eq!(err.bus_error(), Some(&embedded_hal::i2c::ErrorKind::Bus));
        assert_eq!(err.to_string(), "PCF8575: bus error: Bus");
    }
}

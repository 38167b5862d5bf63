use core::fmt;

/// Capability shared by every device handle: a human readable label and a way to stop it.
pub trait Device: fmt::Display {
    /// Error returned by [`Device::halt`].
    type Error;

    /// Put the device in a quiescent state.
    fn halt(&mut self) -> Result<(), Self::Error>;
}

/// Mask-based access to a port expander's pins.
///
/// Bit `n` of every mask refers to logical pin `n`.
pub trait PortDriver {
    /// Error returned by the driver.
    type Error;

    /// Set all pins in `mask_high` to HIGH and all pins in `mask_low` to LOW.
    ///
    /// All pins in both masks change state in the same bus transaction.
    fn set(&mut self, mask_high: u16, mask_low: u16) -> Result<(), Self::Error>;

    /// Check whether pins in `mask_high` were set HIGH and pins in `mask_low` were set LOW.
    ///
    /// For each pin in either of the masks, the returned `u16` should have a 1 if they meet the
    /// expected state and a 0 otherwise.  All other bits MUST always stay 0.
    ///
    /// If a bit is set in both `mask_high` and `mask_low`, the resulting bit must be 1.
    fn is_set(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error>;

    /// Check whether pins in `mask_high` are driven HIGH and pins in `mask_low` are driven LOW.
    ///
    /// Same result encoding as [`PortDriver::is_set`].
    fn get(&mut self, mask_high: u16, mask_low: u16) -> Result<u16, Self::Error>;

    /// Invert the output state of all pins in `mask`.
    fn toggle(&mut self, mask: u16) -> Result<(), Self::Error> {
        // for all pins which are currently low, make them high.
        let mask_high = self.is_set(0, mask)?;
        // for all pins which are currently high, make them low.
        let mask_low = self.is_set(mask, 0)?;
        self.set(mask_high, mask_low)
    }
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin configured as a quasi-bidirectional input/output.
    ///
    /// Setting the pin HIGH releases it to the chip's weak pull-up, after which it can be read as
    /// an input. Setting it LOW actively drives it low.
    pub struct QuasiBidirectional;
    impl HasInput for QuasiBidirectional {}
    impl HasOutput for QuasiBidirectional {}
}

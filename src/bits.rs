//! Mapping between the 16-bit pin space and the two port bytes on the wire.
use crate::{Error, Operation};

/// One of the two 8-bit halves of the pin space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Port {
    /// Pins P00..P07, logical index 0..=7. First byte on the wire.
    Low = 0,
    /// Pins P10..P17, logical index 8..=15. Second byte on the wire.
    High = 1,
}

/// Number of pins on the chip.
pub(crate) const PIN_COUNT: u8 = 16;

/// Power-on state of both ports: every pin released high.
pub(crate) const RESET_LATCH: [u8; 2] = [0xff, 0xff];

/// Locate a logical pin index as `(port, bit)`, or `None` if out of range.
pub(crate) fn locate(index: u8) -> Option<(Port, u8)> {
    if index >= PIN_COUNT {
        None
    } else if index < 8 {
        Some((Port::Low, index))
    } else {
        Some((Port::High, index - 8))
    }
}

/// Like [`locate`], but reports a range error on behalf of `op`.
pub(crate) fn locate_for<E>(op: Operation, index: u8) -> Result<(Port, u8), Error<E>> {
    locate(index).ok_or(Error::PinOutOfRange { op, index })
}

pub(crate) const fn mask(bit: u8) -> u8 {
    1 << bit
}

/// Return `value` with `bit` (0..=7) set to `state`.
pub(crate) const fn set_bit(value: u8, bit: u8, state: bool) -> u8 {
    if state {
        value | mask(bit)
    } else {
        value & !mask(bit)
    }
}

/// Return whether `bit` (0..=7) of `value` is set.
pub(crate) const fn get_bit(value: u8, bit: u8) -> bool {
    value & mask(bit) != 0
}

/// Return `pair` with `bit` of `port` set to `state`.
pub(crate) fn with_pin(pair: [u8; 2], port: Port, bit: u8, state: bool) -> [u8; 2] {
    let mut next = pair;
    next[port as usize] = set_bit(pair[port as usize], bit, state);
    next
}

/// Read `bit` of `port` out of a port pair.
pub(crate) fn pin_level(pair: [u8; 2], port: Port, bit: u8) -> bool {
    get_bit(pair[port as usize], bit)
}

// low byte carries pins 0..=7
pub(crate) fn to_word(pair: [u8; 2]) -> u16 {
    u16::from_le_bytes(pair)
}

pub(crate) fn from_word(word: u16) -> [u8; 2] {
    word.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_helpers() {
        assert_eq!(set_bit(0xff, 2, false), 0b1111_1011);
        assert_eq!(set_bit(0x00, 7, true), 0x80);
        assert_eq!(set_bit(0x80, 7, true), 0x80);
        assert!(get_bit(0x80, 7));
        assert!(!get_bit(0x7f, 7));
        assert!(get_bit(0x01, 0));
    }

    #[test]
    fn locate_splits_ports() {
        assert_eq!(locate(0), Some((Port::Low, 0)));
        assert_eq!(locate(7), Some((Port::Low, 7)));
        assert_eq!(locate(8), Some((Port::High, 0)));
        assert_eq!(locate(15), Some((Port::High, 7)));
        assert_eq!(locate(16), None);
        assert_eq!(locate(u8::MAX), None);
    }

    #[test]
    fn with_pin_only_touches_one_bit() {
        let (port, bit) = locate(10).unwrap();
        assert_eq!(with_pin(RESET_LATCH, port, bit, false), [0xff, 0xfb]);

        for index in 0..PIN_COUNT {
            let (port, bit) = locate(index).unwrap();
            let cleared = with_pin(RESET_LATCH, port, bit, false);
            assert_eq!(to_word(cleared), !(1u16 << index));
            assert!(!pin_level(cleared, port, bit));
        }
    }

    #[test]
    fn word_is_little_endian() {
        assert_eq!(to_word([0x01, 0x80]), 0x8001);
        assert_eq!(from_word(0x8001), [0x01, 0x80]);
    }
}

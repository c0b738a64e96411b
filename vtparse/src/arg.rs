//! Parameter slot encoding used by CSI, DCS and sixel parameters.
//!
//! Mirrors the `vte_seq_arg_t` representation in the reference VT
//! parser: a parameter is a 32-bit cell, `-1` means "not present /
//! default", and a separate bit records whether the slot is a
//! sub-parameter (colon-separated) of the following slot.

pub const ARG_DEFAULT: i32 = -1;
const ARG_MAX: i32 = 0xffff;

/// A single numeric parameter slot inside a CSI/DCS/sixel sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SequenceArg {
    value: i32,
    started: bool,
    /// true if this slot was separated from the next one by `:`
    /// rather than `;`.
    is_sub: bool,
}

impl Default for SequenceArg {
    fn default() -> Self {
        SequenceArg {
            value: ARG_DEFAULT,
            started: false,
            is_sub: false,
        }
    }
}

impl SequenceArg {
    pub fn reset(&mut self) {
        *self = SequenceArg::default();
    }

    /// Append a decimal digit, clamping at `ARG_MAX`.
    pub fn push_digit(&mut self, digit: u8) {
        let base = if self.started { self.value } else { 0 };
        self.started = true;
        self.value = (base.saturating_mul(10) + digit as i32).min(ARG_MAX);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn mark_sub(&mut self) {
        self.is_sub = true;
    }

    pub fn is_sub(&self) -> bool {
        self.is_sub
    }

    /// The accumulated value, or `ARG_DEFAULT` if no digit was ever seen.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The value, or `default` if this slot was never started.
    pub fn value_or(&self, default: i32) -> i32 {
        if self.started {
            self.value
        } else {
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_unset() {
        let a = SequenceArg::default();
        assert_eq!(a.value(), ARG_DEFAULT);
        assert!(!a.started());
    }

    #[test]
    fn clamps_at_max() {
        let mut a = SequenceArg::default();
        for _ in 0..6 {
            a.push_digit(9);
        }
        assert_eq!(a.value(), ARG_MAX);
    }

    #[test]
    fn accumulates_decimal() {
        let mut a = SequenceArg::default();
        a.push_digit(3);
        a.push_digit(1);
        assert_eq!(a.value(), 31);
    }

    proptest::proptest! {
        /// P1: whatever the digit run, the accumulated value never
        /// exceeds `ARG_MAX` and is never negative.
        #[test]
        fn value_is_always_clamped_in_range(digits in proptest::collection::vec(0u8..10, 0..32)) {
            let mut a = SequenceArg::default();
            for d in &digits {
                a.push_digit(*d);
            }
            if digits.is_empty() {
                proptest::prop_assert_eq!(a.value(), ARG_DEFAULT);
            } else {
                proptest::prop_assert!(a.value() >= 0);
                proptest::prop_assert!(a.value() <= ARG_MAX);
            }
        }
    }
}

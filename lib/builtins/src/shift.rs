//! Logical right shift of 64-bit lanes held as 32-bit halves.
//!
//! The shift amount is only known per lane at run time and may be 0, at
//! least 32, or anything up to 63. A 32-bit hardware shift reduces its
//! amount modulo 32, so a naive `lo >> n | hi << (32 - n)` goes wrong for
//! `n == 0` (the high half would be shifted by 32, i.e. not at all) and for
//! `n >= 32`. Both cases are computed unconditionally and masked out with
//! per-lane guards instead.

use crate::halves::Halves;
use crate::lanes::{Lanes, Mask};

/// A per-lane shift amount, reduced modulo 64, with its guards precomputed.
#[derive(Copy, Clone, Debug)]
pub struct ShiftAmount<const N: usize> {
    amount: Lanes<u32, N>,
    /// `32 - amount`, the left shift that moves high bits into the low half.
    complement: Lanes<u32, N>,
    /// All ones where `amount < 32`.
    within_word: Lanes<u32, N>,
    /// All ones where `amount != 0`.
    nonzero: Lanes<u32, N>,
}

impl<const N: usize> ShiftAmount<N> {
    /// Prepares a shift by `amount % 64` bits in each lane.
    #[inline]
    pub fn new(amount: Lanes<u32, N>) -> Self {
        let zero = Lanes::splat(0);
        let word = Lanes::splat(32);
        let amount = amount & Lanes::splat(0x3f);

        let mut within_word = Lanes::splat(u32::MAX);
        within_word.merge(zero, amount.lanes_ge(word));
        let mut nonzero = Lanes::splat(u32::MAX);
        nonzero.merge(zero, amount.lanes_eq(zero));

        Self {
            amount,
            complement: word - amount,
            within_word,
            nonzero,
        }
    }

    /// Shifts each 64-bit lane of `value` right, filling with zeros.
    #[inline]
    pub fn shr(&self, value: Halves<N>) -> Halves<N> {
        let word = Lanes::splat(32);
        let spill = ((value.hi & self.nonzero) << self.complement) & self.within_word;
        let from_hi = (value.hi >> (self.amount - word)) & !self.within_word;
        let lo = ((value.lo >> self.amount) & self.within_word) | spill | from_hi;
        let hi = (value.hi >> self.amount) & self.within_word;
        Halves { lo, hi }
    }

    /// Lanes where [`ShiftAmount::shr`] drops at least one set bit.
    #[inline]
    pub fn drops_set_bits(&self, value: Halves<N>) -> Mask<N> {
        let zero = Lanes::splat(0);
        let one = Lanes::<u32, N>::splat(1);
        let word = Lanes::splat(32);

        // Shifting a word or more drops all of `lo` and the bottom
        // `amount - 32` bits of `hi`.
        let hi_mask = (one << (self.amount - word)) - one;
        let dropped_hi = value.hi & !self.within_word & hi_mask;
        let dropped_lo = (value.lo & !self.within_word)
            | (value.lo & (self.within_word >> self.complement) & self.nonzero);

        (dropped_hi | dropped_lo).lanes_ne(zero)
    }
}

//! Splitting 64-bit lanes into 32-bit halves and putting them back together.
//!
//! The emulated target only has 32-bit integer lanes, so every 64-bit value
//! is handled as a `(lo, hi)` pair. Splitting reinterprets the `N` wide
//! vector of `u64` as a `2N` wide vector of `u32` and picks every other
//! word; combining writes the words back at the same stride.

use crate::lanes::{Lanes, Mask};

cfg_if::cfg_if! {
    if #[cfg(target_endian = "little")] {
        const LO_WORD: usize = 0;
        const HI_WORD: usize = 1;
    } else {
        const LO_WORD: usize = 1;
        const HI_WORD: usize = 0;
    }
}

const SIGN_BIT: u32 = 1 << 31;

/// The low and high 32-bit halves of `N` 64-bit lanes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Halves<const N: usize> {
    /// Bits 0..32 of each lane.
    pub lo: Lanes<u32, N>,
    /// Bits 32..64 of each lane.
    pub hi: Lanes<u32, N>,
}

impl<const N: usize> Halves<N> {
    /// Every lane set to `value`.
    #[inline]
    pub fn splat(value: u64) -> Self {
        Self {
            lo: Lanes::splat(value as u32),
            hi: Lanes::splat((value >> 32) as u32),
        }
    }

    /// Picks the halves of `if_true` where `mask` is set and of `if_false`
    /// elsewhere.
    #[inline]
    pub fn select(mask: Mask<N>, if_true: Self, if_false: Self) -> Self {
        Self {
            lo: Lanes::select(mask, if_true.lo, if_false.lo),
            hi: Lanes::select(mask, if_true.hi, if_false.hi),
        }
    }

    /// Splits every 64-bit lane into its halves.
    #[inline]
    pub fn split(value: Lanes<u64, N>) -> Self {
        let words: &[u32] = bytemuck::cast_slice(value.0.as_slice());
        Self {
            lo: strided(words, LO_WORD),
            hi: strided(words, HI_WORD),
        }
    }

    /// Reassembles the 64-bit lanes, `lo` in the low bits and `hi` in the
    /// high bits.
    #[inline]
    pub fn combine(self) -> Lanes<u64, N> {
        let mut value = Lanes([0u64; N]);
        let words: &mut [u32] = bytemuck::cast_slice_mut(value.0.as_mut_slice());
        for (i, (lo, hi)) in self.lo.0.into_iter().zip(self.hi.0).enumerate() {
            words[2 * i + LO_WORD] = lo;
            words[2 * i + HI_WORD] = hi;
        }
        value
    }

    /// Two's complement negation of the 64-bit lanes.
    #[inline]
    pub fn negate(self) -> Self {
        let zero = Lanes::splat(0);
        let one = Lanes::splat(1);
        let not_lo = !self.lo;
        let not_hi = !self.hi;
        // Adding one to the low half carries out only if it was all ones.
        let carry = Lanes::select(not_lo.lanes_eq(Lanes::splat(u32::MAX)), one, zero);
        Self {
            lo: not_lo + one,
            hi: not_hi + carry,
        }
    }

    /// Lanes whose 64-bit value is zero.
    #[inline]
    pub fn is_zero(self) -> Mask<N> {
        (self.lo | self.hi).lanes_eq(Lanes::splat(0))
    }

    /// Lanes whose bit 63 is set.
    #[inline]
    pub fn is_negative(self) -> Mask<N> {
        (self.hi & Lanes::splat(SIGN_BIT)).lanes_ne(Lanes::splat(0))
    }
}

#[inline]
fn strided<const N: usize>(words: &[u32], offset: usize) -> Lanes<u32, N> {
    Lanes(std::array::from_fn(|i| words[2 * i + offset]))
}

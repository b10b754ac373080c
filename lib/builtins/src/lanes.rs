//! Fixed-width lane vectors.
//!
//! `Lanes<T, N>` is the value the builtins take and return. Every operation
//! is elementwise: lane `i` of the result depends only on lane `i` of the
//! operands. Integer arithmetic wraps, and shift amounts are reduced modulo
//! the lane bit width the way the emulated hardware reduces them, so shifting
//! a `u32` lane by 32 is a shift by 0.

use bytemuck::Pod;
use std::ops::{Add, BitAnd, BitOr, BitXor, Neg, Not, Shl, Shr, Sub};

/// A vector of `N` lanes of type `T`.
///
/// The layout is that of `[T; N]`, so a `Lanes` can be passed by value
/// across the C ABI.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

/// The result of an elementwise comparison, one `bool` per lane.
pub type Mask<const N: usize> = Lanes<bool, N>;

impl<T: Copy, const N: usize> Lanes<T, N> {
    /// Builds a vector from an array of lanes.
    #[inline]
    pub const fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    /// Builds a vector with every lane set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Returns the lanes as an array.
    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    /// Returns lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline]
    pub fn extract(&self, index: usize) -> T {
        self.0[index]
    }

    /// Applies `f` to every lane.
    #[inline]
    pub fn map<U: Copy>(self, f: impl FnMut(T) -> U) -> Lanes<U, N> {
        Lanes(self.0.map(f))
    }

    /// Applies `f` to every pair of lanes at the same position.
    #[inline]
    pub fn zip_map<U: Copy, R: Copy>(
        self,
        rhs: Lanes<U, N>,
        mut f: impl FnMut(T, U) -> R,
    ) -> Lanes<R, N> {
        Lanes(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    /// Picks lane `i` from `if_true` where `mask[i]` is set and from
    /// `if_false` elsewhere.
    #[inline]
    pub fn select(mask: Mask<N>, if_true: Self, if_false: Self) -> Self {
        Lanes(std::array::from_fn(|i| {
            if mask.0[i] {
                if_true.0[i]
            } else {
                if_false.0[i]
            }
        }))
    }

    /// Overwrites the lanes selected by `mask` with the lanes of `other`.
    #[inline]
    pub fn merge(&mut self, other: Self, mask: Mask<N>) {
        *self = Self::select(mask, other, *self);
    }
}

impl<T: Copy + PartialEq, const N: usize> Lanes<T, N> {
    /// Lanewise `==`.
    #[inline]
    pub fn lanes_eq(self, rhs: Self) -> Mask<N> {
        self.zip_map(rhs, |a, b| a == b)
    }

    /// Lanewise `!=`.
    #[inline]
    pub fn lanes_ne(self, rhs: Self) -> Mask<N> {
        self.zip_map(rhs, |a, b| a != b)
    }
}

impl<T: Copy + PartialOrd, const N: usize> Lanes<T, N> {
    /// Lanewise `>`.
    #[inline]
    pub fn lanes_gt(self, rhs: Self) -> Mask<N> {
        self.zip_map(rhs, |a, b| a > b)
    }

    /// Lanewise `>=`.
    #[inline]
    pub fn lanes_ge(self, rhs: Self) -> Mask<N> {
        self.zip_map(rhs, |a, b| a >= b)
    }
}

impl<T: Pod, const N: usize> Lanes<T, N> {
    /// Reinterprets every lane as another type of the same size.
    ///
    /// This keeps the bit pattern; it is not a numeric conversion.
    ///
    /// # Panics
    ///
    /// Panics if `T` and `U` differ in size.
    #[inline]
    pub fn format<U: Pod>(self) -> Lanes<U, N> {
        self.map(bytemuck::cast)
    }
}

impl<const N: usize> Lanes<u32, N> {
    /// Number of leading zero bits in each lane; 32 for a zero lane.
    #[inline]
    pub fn leading_zeros(self) -> Self {
        self.map(u32::leading_zeros)
    }
}

impl<T: Copy, const N: usize> From<[T; N]> for Lanes<T, N> {
    #[inline]
    fn from(lanes: [T; N]) -> Self {
        Self(lanes)
    }
}

macro_rules! impl_bitwise {
    ($($ty:ty),*) => {
        $(
            impl<const N: usize> BitAnd for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn bitand(self, rhs: Self) -> Self {
                    self.zip_map(rhs, |a, b| a & b)
                }
            }

            impl<const N: usize> BitOr for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn bitor(self, rhs: Self) -> Self {
                    self.zip_map(rhs, |a, b| a | b)
                }
            }

            impl<const N: usize> BitXor for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn bitxor(self, rhs: Self) -> Self {
                    self.zip_map(rhs, |a, b| a ^ b)
                }
            }

            impl<const N: usize> Not for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn not(self) -> Self {
                    self.map(|a| !a)
                }
            }
        )*
    };
}

macro_rules! impl_wrapping {
    ($($ty:ty),*) => {
        $(
            impl<const N: usize> Add for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn add(self, rhs: Self) -> Self {
                    self.zip_map(rhs, <$ty>::wrapping_add)
                }
            }

            impl<const N: usize> Sub for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn sub(self, rhs: Self) -> Self {
                    self.zip_map(rhs, <$ty>::wrapping_sub)
                }
            }

            impl<const N: usize> Neg for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn neg(self) -> Self {
                    self.map(<$ty>::wrapping_neg)
                }
            }

            impl<const N: usize> Shl<Lanes<u32, N>> for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn shl(self, amount: Lanes<u32, N>) -> Self {
                    self.zip_map(amount, <$ty>::wrapping_shl)
                }
            }

            impl<const N: usize> Shr<Lanes<u32, N>> for Lanes<$ty, N> {
                type Output = Self;
                #[inline]
                fn shr(self, amount: Lanes<u32, N>) -> Self {
                    self.zip_map(amount, <$ty>::wrapping_shr)
                }
            }
        )*
    };
}

impl_bitwise!(bool, u32, u64);
impl_wrapping!(u32, u64);

impl<const N: usize> Neg for Lanes<f32, N> {
    type Output = Self;
    /// Flips the sign bit of every lane.
    #[inline]
    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_wrap_like_the_hardware() {
        let x = Lanes::<u32, 5>::splat(0x8000_0001);
        let amounts = Lanes::from_array([0, 1, 31, 32, 33]);
        assert_eq!(
            (x >> amounts).to_array(),
            [0x8000_0001, 0x4000_0000, 1, 0x8000_0001, 0x4000_0000]
        );
        assert_eq!(
            (x << amounts).to_array(),
            [0x8000_0001, 2, 0x8000_0000, 0x8000_0001, 2]
        );
    }

    #[test]
    fn arithmetic_wraps() {
        let a = Lanes::from_array([0u32, u32::MAX]);
        assert_eq!((a + Lanes::splat(1)).to_array(), [1, 0]);
        assert_eq!((a - Lanes::splat(1)).to_array(), [u32::MAX, u32::MAX - 1]);
        assert_eq!((-Lanes::from_array([1u64, 0])).to_array(), [u64::MAX, 0]);
    }

    #[test]
    fn select_and_merge() {
        let mask = Lanes::from_array([true, false, true, false]);
        let a = Lanes::from_array([1u32, 2, 3, 4]);
        let b = Lanes::splat(9u32);
        assert_eq!(Lanes::select(mask, a, b).to_array(), [1, 9, 3, 9]);

        let mut c = a;
        c.merge(b, mask);
        assert_eq!(c.to_array(), [9, 2, 9, 4]);
    }

    #[test]
    fn compare() {
        let a = Lanes::from_array([1u32, 5, 7]);
        let b = Lanes::splat(5u32);
        assert_eq!(a.lanes_eq(b).to_array(), [false, true, false]);
        assert_eq!(a.lanes_ne(b).to_array(), [true, false, true]);
        assert_eq!(a.lanes_gt(b).to_array(), [false, false, true]);
        assert_eq!(a.lanes_ge(b).to_array(), [false, true, true]);
        assert_eq!((!a.lanes_eq(b) & a.lanes_ge(b)).to_array(), [false, false, true]);
    }

    #[test]
    fn format_keeps_bits() {
        let f = Lanes::from_array([1.0f32, -0.0]);
        assert_eq!(f.format::<u32>().to_array(), [0x3f80_0000, 0x8000_0000]);
        assert_eq!((-f).format::<u32>().to_array(), [0xbf80_0000, 0]);
        let i = Lanes::from_array([-1i64]);
        assert_eq!(i.format::<u64>().to_array(), [u64::MAX]);
    }

    #[test]
    fn leading_zeros() {
        let a = Lanes::from_array([0u32, 1, 0x8000_0000, 0x00ff_0000]);
        assert_eq!(a.leading_zeros().to_array(), [32, 31, 0, 8]);
    }
}

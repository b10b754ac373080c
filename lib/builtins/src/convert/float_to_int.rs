use super::{MANTISSA_BITS, SIGN_BIT};
use crate::halves::Halves;
use crate::lanes::{Lanes, Mask};
use crate::shift::ShiftAmount;
use bytemuck::Pod;

const EXPONENT_MASK: u32 = 0xff;
const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;
const IMPLICIT_BIT: u32 = 1 << MANTISSA_BITS;

/// Biased exponent of the largest power of two below `2^64`. A float with
/// this exponent needs no shift once its mantissa sits at bit 63.
const TOP_BIT_EXPONENT: u32 = 0xbe;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Signed {}
    impl Sealed for super::Unsigned {}
}

/// Selects the integer produced by [`fp2int`] at compile time.
pub trait Signedness: sealed::Sealed {
    /// The lane type of the result.
    type Int: Pod;

    /// Applies the sign and the saturation rules to the truncated magnitude.
    ///
    /// `too_large` marks lanes whose magnitude is at least `2^64`, including
    /// infinities and NaNs.
    fn resolve<const N: usize>(
        magnitude: Halves<N>,
        negative: Mask<N>,
        too_large: Mask<N>,
    ) -> Halves<N>;
}

/// Conversion to `u64`.
#[derive(Debug)]
pub enum Unsigned {}

/// Conversion to `i64`.
#[derive(Debug)]
pub enum Signed {}

impl Signedness for Unsigned {
    type Int = u64;

    #[inline]
    fn resolve<const N: usize>(
        magnitude: Halves<N>,
        negative: Mask<N>,
        too_large: Mask<N>,
    ) -> Halves<N> {
        let value = Halves::select(negative, Halves::splat(0), magnitude);
        Halves::select(too_large & !negative, Halves::splat(u64::MAX), value)
    }
}

impl Signedness for Signed {
    type Int = i64;

    #[inline]
    fn resolve<const N: usize>(
        magnitude: Halves<N>,
        negative: Mask<N>,
        too_large: Mask<N>,
    ) -> Halves<N> {
        let value = Halves::select(negative, magnitude.negate(), magnitude);

        // A nonzero result whose sign disagrees with the input did not fit.
        let wrong_sign = !value.is_zero() & (value.is_negative() ^ negative);
        let overflow = wrong_sign | too_large;

        let min = Halves::splat(i64::MIN as u64);
        let max = Halves::splat(i64::MAX as u64);
        let value = Halves::select(overflow & negative, min, value);
        Halves::select(overflow & !negative, max, value)
    }
}

/// Converts `f32` lanes to 64-bit integers, truncating toward zero.
///
/// Magnitudes below one become zero. Out of range lanes saturate: to zero
/// or `u64::MAX` for [`Unsigned`], to `i64::MIN` or `i64::MAX` for
/// [`Signed`], following the sign bit. NaNs saturate like infinities of the
/// same sign.
pub fn fp2int<S: Signedness, const N: usize>(value: Lanes<f32, N>) -> Lanes<S::Int, N> {
    let zero = Lanes::splat(0);
    let bits = value.format::<u32>();

    let exponent = (bits >> Lanes::splat(MANTISSA_BITS)) & Lanes::splat(EXPONENT_MASK);
    let mantissa = (bits & Lanes::splat(MANTISSA_MASK)) | Lanes::splat(IMPLICIT_BIT);

    // Put the leading mantissa bit at bit 63 and shift it back down.
    let aligned = Halves {
        lo: zero,
        hi: mantissa << Lanes::splat(31 - MANTISSA_BITS),
    };
    let amount = Lanes::splat(TOP_BIT_EXPONENT) - exponent;
    let truncated = ShiftAmount::new(amount).shr(aligned);

    // Nothing is left after a shift past bit 63, and a wrapped amount means
    // the exponent is above the top one.
    let discarded = amount.lanes_gt(Lanes::splat(63));
    let magnitude = Halves::select(discarded, Halves::splat(0), truncated);

    let negative = (bits & Lanes::splat(SIGN_BIT)).lanes_ne(zero);
    let too_large = exponent.lanes_gt(Lanes::splat(TOP_BIT_EXPONENT));

    S::resolve(magnitude, negative, too_large)
        .combine()
        .format::<S::Int>()
}

/// Converts `f32` lanes to `u64`. See [`fp2int`].
#[inline]
pub fn fp2ui<const N: usize>(value: Lanes<f32, N>) -> Lanes<u64, N> {
    fp2int::<Unsigned, N>(value)
}

/// Converts `f32` lanes to `i64`. See [`fp2int`].
#[inline]
pub fn fp2si<const N: usize>(value: Lanes<f32, N>) -> Lanes<i64, N> {
    fp2int::<Signed, N>(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_63: f32 = 9_223_372_036_854_775_808.0;
    const TWO_64: f32 = 18_446_744_073_709_551_616.0;

    fn from_parts(exponent: u32, mantissa: u32) -> f32 {
        f32::from_bits((exponent << MANTISSA_BITS) | mantissa)
    }

    #[test]
    fn zero_and_small_magnitudes() {
        let values = [
            0.0,
            -0.0,
            0.5,
            -0.5,
            0.999_999_94,
            f32::MIN_POSITIVE,
            1e-45,
            -1e-45,
        ];
        assert_eq!(fp2ui(Lanes::from_array(values)).to_array(), [0; 8]);
        assert_eq!(fp2si(Lanes::from_array(values)).to_array(), [0; 8]);
    }

    #[test]
    fn negative_one() {
        assert_eq!(fp2ui(Lanes::from_array([-1.0])).to_array(), [0]);
        assert_eq!(fp2si(Lanes::from_array([-1.0])).to_array(), [-1]);
    }

    #[test]
    fn truncates_toward_zero() {
        let values = [1.0, 1.5, 2.75, 123_456.79, -1.5, -2.75];
        assert_eq!(
            fp2si(Lanes::from_array(values)).to_array(),
            [1, 1, 2, 123_456, -1, -2]
        );
        assert_eq!(
            fp2ui(Lanes::from_array(values)).to_array(),
            [1, 1, 2, 123_456, 0, 0]
        );
    }

    #[test]
    fn top_exponent_needs_no_shift() {
        // Exponent 0xbe: the whole mantissa lands in bits 40..64.
        let values = [
            from_parts(TOP_BIT_EXPONENT, 0),
            from_parts(TOP_BIT_EXPONENT, 0x40_0000),
            from_parts(TOP_BIT_EXPONENT, MANTISSA_MASK),
        ];
        assert_eq!(
            fp2ui(Lanes::from_array(values)).to_array(),
            [1 << 63, 0xc000_0000_0000_0000, 0xffff_ff00_0000_0000]
        );
        assert_eq!(fp2si(Lanes::from_array(values)).to_array(), [i64::MAX; 3]);
        assert_eq!(
            fp2si(Lanes::from_array(values.map(|v| -v))).to_array(),
            [i64::MIN; 3]
        );
    }

    #[test]
    fn word_boundary_shifts() {
        // Shifts of 33, 32 and 31 bits around the half boundary.
        let values = [
            from_parts(TOP_BIT_EXPONENT - 33, 0x40_0001),
            from_parts(TOP_BIT_EXPONENT - 32, 0x40_0001),
            from_parts(TOP_BIT_EXPONENT - 31, 0x40_0001),
        ];
        let expected = values.map(|v| v as u64);
        assert_eq!(expected, [0x6000_0080, 0xc000_0100, 0x1_8000_0200]);
        assert_eq!(fp2ui(Lanes::from_array(values)).to_array(), expected);
        assert_eq!(
            fp2si(Lanes::from_array(values.map(|v| -v))).to_array(),
            expected.map(|v| -(v as i64))
        );
    }

    #[test]
    fn unsigned_saturation() {
        let values = [
            TWO_64,
            f32::MAX,
            f32::INFINITY,
            f32::NAN,
            -TWO_64,
            f32::NEG_INFINITY,
            -f32::NAN,
        ];
        assert_eq!(
            fp2ui(Lanes::from_array(values)).to_array(),
            [u64::MAX, u64::MAX, u64::MAX, u64::MAX, 0, 0, 0]
        );
    }

    #[test]
    fn signed_saturation() {
        let values = [TWO_63, TWO_64, f32::INFINITY, f32::NAN];
        assert_eq!(fp2si(Lanes::from_array(values)).to_array(), [i64::MAX; 4]);
        let values = [-TWO_63, -1.5 * TWO_63, -TWO_64, f32::NEG_INFINITY, -f32::NAN];
        assert_eq!(fp2si(Lanes::from_array(values)).to_array(), [i64::MIN; 5]);
    }

    #[test]
    fn largest_in_range_values() {
        let below_2_63 = f32::from_bits(TWO_63.to_bits() - 1);
        assert_eq!(
            fp2si(Lanes::from_array([below_2_63, -below_2_63])).to_array(),
            [0x7fff_ff80_0000_0000, -0x7fff_ff80_0000_0000]
        );
        let below_2_64 = f32::from_bits(TWO_64.to_bits() - 1);
        assert_eq!(
            fp2ui(Lanes::from_array([below_2_64])).to_array(),
            [0xffff_ff00_0000_0000]
        );
    }
}

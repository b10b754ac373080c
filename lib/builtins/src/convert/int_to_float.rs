use super::MANTISSA_BITS;
use crate::halves::Halves;
use crate::lanes::Lanes;
use crate::shift::ShiftAmount;

/// Biased exponent of `2^63`, minus the one that the implicit mantissa bit
/// adds when the mantissa is summed into the exponent field.
const TOP_BIT_EXPONENT: u32 = 0xbd;

/// Shifting right by `39 - clz(hi)` brings the leading set bit of a value
/// with a nonzero high half to bit 24: 24 mantissa bits and a round bit.
const ALIGN_SHIFT: u32 = 63 - MANTISSA_BITS - 1;

/// Converts unsigned 64-bit lanes to `f32`, rounding to nearest, ties to
/// even.
pub fn ui2fp<const N: usize>(value: Lanes<u64, N>) -> Lanes<f32, N> {
    let zero = Lanes::splat(0);
    let one = Lanes::splat(1);

    let halves = Halves::split(value);
    let leading_zeros = halves.hi.leading_zeros();

    let shift = ShiftAmount::new(Lanes::splat(ALIGN_SHIFT) - leading_zeros);
    let kept = shift.shr(halves).lo;
    let sticky = shift.drops_set_bits(halves);
    let round = (kept & one).lanes_ne(zero);

    let mut mantissa = (kept + one) >> one;
    // Exactly halfway between two floats: keep the even one.
    mantissa.merge(mantissa & !one, round & !sticky);

    // The sum lets a mantissa that rounded up to 2^24 carry into the exponent.
    let exponent = Lanes::splat(TOP_BIT_EXPONENT) - leading_zeros;
    let large = ((exponent << Lanes::splat(MANTISSA_BITS)) + mantissa).format::<f32>();

    // Values below 2^32 fit the native 32-bit conversion.
    let small = halves.lo.map(|lo| lo as f32);

    Lanes::select(halves.hi.lanes_eq(zero), small, large)
}

/// Converts signed 64-bit lanes to `f32`, rounding to nearest, ties to even.
///
/// Negative lanes are converted as their magnitude and negated afterwards.
/// `i64::MIN` negates to itself, which read as unsigned is `2^63`, its
/// magnitude.
pub fn si2fp<const N: usize>(value: Lanes<i64, N>) -> Lanes<f32, N> {
    let bits = value.format::<u64>();
    let negative = Halves::split(bits).is_negative();
    let magnitude = Lanes::select(negative, -bits, bits);
    let result = ui2fp(magnitude);
    Lanes::select(negative, -result, result)
}

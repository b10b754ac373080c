//! The conversions, generic over the lane count.
//!
//! Each function is a fixed sequence of lanewise integer operations: every
//! conditional is computed for all lanes and then resolved with a select,
//! so the work done never depends on the input values.

mod float_to_int;
mod int_to_float;

pub use self::float_to_int::{Signed, Signedness, Unsigned, fp2int, fp2si, fp2ui};
pub use self::int_to_float::{si2fp, ui2fp};

/// Bit 31 of an `f32` or of the high half of a 64-bit integer.
const SIGN_BIT: u32 = 1 << 31;

/// Position of the lowest exponent bit of an `f32`.
const MANTISSA_BITS: u32 = 23;

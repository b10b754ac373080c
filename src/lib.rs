//! Emulated conversions between 64-bit integers and `f32`.
//!
//! This crate bundles the builtin descriptions from [`lanecvt_types`] with
//! their implementations in [`lanecvt_builtins`].
//!
//! ```
//! use lanecvt::{Lanes, fp2si, ui2fp};
//!
//! let floats = ui2fp(Lanes::from_array([1u64, u64::MAX]));
//! assert_eq!(floats.to_array(), [1.0, 18446744073709551616.0]);
//!
//! let ints = fp2si(Lanes::from_array([-2.5f32, f32::INFINITY]));
//! assert_eq!(ints.to_array(), [-2, i64::MAX]);
//! ```
//!
//! A code generator links against the builtins by name:
//!
//! ```
//! use lanecvt::{Builtin, ConversionKind, LaneWidth};
//!
//! let builtin = Builtin::vector(ConversionKind::SignedToFloat, LaneWidth::W8);
//! assert_eq!(builtin.to_function_name(), "__lanecvt_si2fp_8_");
//! let (resolved, _address) = lanecvt::resolve("__lanecvt_si2fp_8_").unwrap();
//! assert_eq!(resolved, builtin);
//! ```

#![deny(missing_docs, unused_extern_crates)]

pub use lanecvt_builtins::{
    Lanes, Mask, convert, fp2si, fp2ui, function_pointer, libcalls, resolve, si2fp, ui2fp,
};
pub use lanecvt_types::{
    BUILTIN_PREFIX, Builtin, BuiltinShape, BuiltinSignature, ConversionKind, LaneWidth,
    LaneWidthError, ParseBuiltinError, ScalarType,
};

//! The conversion builtins as linked into generated code.
//!
//! A code generator that cannot lower a conversion inline emits a call to
//! one of these functions instead, looked up by the name
//! [`Builtin::to_function_name`] gives. They are therefore bound by a few
//! rules:
//!
//! * They must always be `pub extern "C"` with an unmangled name, and only
//!   take and return bare `u64`/`i64`/`f32` scalars or `#[repr(C)]`
//!   [`Lanes`] of them.
//!
//! * Every width instantiates the same generic implementation, so a value
//!   converts identically whatever vector it is passed in.

use crate::convert::{fp2si, fp2ui, si2fp, ui2fp};
use crate::lanes::Lanes;
use lanecvt_types::{Builtin, BuiltinShape, ConversionKind, LaneWidth, ParseBuiltinError};

macro_rules! define_vector_builtins {
    ($($lanes:literal => $width:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("Implementation of `fp2ui` over ", stringify!($lanes), " lanes.")]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<__lanecvt_fp2ui_ $lanes _>](
                    a: Lanes<f32, $lanes>,
                ) -> Lanes<u64, $lanes> {
                    fp2ui(a)
                }

                #[doc = concat!("Implementation of `fp2si` over ", stringify!($lanes), " lanes.")]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<__lanecvt_fp2si_ $lanes _>](
                    a: Lanes<f32, $lanes>,
                ) -> Lanes<i64, $lanes> {
                    fp2si(a)
                }

                #[doc = concat!("Implementation of `ui2fp` over ", stringify!($lanes), " lanes.")]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<__lanecvt_ui2fp_ $lanes _>](
                    a: Lanes<u64, $lanes>,
                ) -> Lanes<f32, $lanes> {
                    ui2fp(a)
                }

                #[doc = concat!("Implementation of `si2fp` over ", stringify!($lanes), " lanes.")]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<__lanecvt_si2fp_ $lanes _>](
                    a: Lanes<i64, $lanes>,
                ) -> Lanes<f32, $lanes> {
                    si2fp(a)
                }
            )*

            fn vector_function_pointer(kind: ConversionKind, width: LaneWidth) -> usize {
                match (kind, width) {
                    $(
                        (ConversionKind::FloatToUnsigned, LaneWidth::$width) => {
                            [<__lanecvt_fp2ui_ $lanes _>] as usize
                        }
                        (ConversionKind::FloatToSigned, LaneWidth::$width) => {
                            [<__lanecvt_fp2si_ $lanes _>] as usize
                        }
                        (ConversionKind::UnsignedToFloat, LaneWidth::$width) => {
                            [<__lanecvt_ui2fp_ $lanes _>] as usize
                        }
                        (ConversionKind::SignedToFloat, LaneWidth::$width) => {
                            [<__lanecvt_si2fp_ $lanes _>] as usize
                        }
                    )*
                }
            }
        }
    };
}

define_vector_builtins!(1 => W1, 2 => W2, 4 => W4, 8 => W8, 16 => W16, 32 => W32);

/// Implementation of `fp2ui` for a bare scalar.
#[unsafe(no_mangle)]
pub extern "C" fn __lanecvt_fp2ui_1_base__(a: f32) -> u64 {
    fp2ui(Lanes::from_array([a])).extract(0)
}

/// Implementation of `fp2si` for a bare scalar.
#[unsafe(no_mangle)]
pub extern "C" fn __lanecvt_fp2si_1_base__(a: f32) -> i64 {
    fp2si(Lanes::from_array([a])).extract(0)
}

/// Implementation of `ui2fp` for a bare scalar.
#[unsafe(no_mangle)]
pub extern "C" fn __lanecvt_ui2fp_1_base__(a: u64) -> f32 {
    ui2fp(Lanes::from_array([a])).extract(0)
}

/// Implementation of `si2fp` for a bare scalar.
#[unsafe(no_mangle)]
pub extern "C" fn __lanecvt_si2fp_1_base__(a: i64) -> f32 {
    si2fp(Lanes::from_array([a])).extract(0)
}

/// The address of the function implementing `builtin`.
pub fn function_pointer(builtin: Builtin) -> usize {
    match builtin.shape {
        BuiltinShape::Vector(width) => vector_function_pointer(builtin.kind, width),
        BuiltinShape::Scalar => match builtin.kind {
            ConversionKind::FloatToUnsigned => __lanecvt_fp2ui_1_base__ as usize,
            ConversionKind::FloatToSigned => __lanecvt_fp2si_1_base__ as usize,
            ConversionKind::UnsignedToFloat => __lanecvt_ui2fp_1_base__ as usize,
            ConversionKind::SignedToFloat => __lanecvt_si2fp_1_base__ as usize,
        },
    }
}

/// Looks up a builtin by symbol name, returning it with its address.
pub fn resolve(name: &str) -> Result<(Builtin, usize), ParseBuiltinError> {
    let builtin: Builtin = name
        .parse()
        .inspect_err(|err| tracing::debug!(name, %err, "not a conversion builtin"))?;
    let address = function_pointer(builtin);
    tracing::trace!(
        %builtin,
        signature = %builtin.signature(),
        address = %format!("{address:#x}"),
        "resolved conversion builtin"
    );
    Ok((builtin, address))
}

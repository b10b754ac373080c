//! Software emulation of conversions between 64-bit integers and `f32`.
//!
//! Targets whose vector units only have 32-bit integer lanes cannot convert
//! `u64`/`i64` to and from `f32` natively. This crate provides those
//! conversions as plain lanewise integer arithmetic on 32-bit halves, for
//! vectors of 1, 2, 4, 8, 16 or 32 lanes, and exports them as
//! [`libcalls`] under the names [`lanecvt_types::Builtin`] describes.
//!
//! Results are bit-exact with IEEE-754 round-to-nearest-even for
//! integer to float, and truncation toward zero with saturation for float to
//! integer.

#![deny(missing_docs, unused_extern_crates)]
#![warn(unused_import_braces)]
#![cfg_attr(
    feature = "cargo-clippy",
    warn(
        clippy::mut_mut,
        clippy::nonminimal_bool,
        clippy::map_unwrap_or,
        clippy::print_stdout,
        clippy::unicode_not_nfc,
        clippy::use_self
    )
)]

pub mod convert;
pub mod halves;
pub mod lanes;
pub mod libcalls;
pub mod shift;

pub use crate::convert::{fp2si, fp2ui, si2fp, ui2fp};
pub use crate::lanes::{Lanes, Mask};
pub use crate::libcalls::{function_pointer, resolve};

//! Common types shared by the `lanecvt` builtins and the code generators
//! that link against them.
//!
//! A code generator that cannot lower a 64-bit integer ⇄ `f32` conversion
//! to a native instruction emits a call to one of the builtins described
//! here. This crate names those builtins, describes their ABI shape and
//! parses their symbol names back; the implementations live in
//! `lanecvt-builtins`.

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

mod builtins;
pub mod error;

pub use crate::builtins::{
    BUILTIN_PREFIX, Builtin, BuiltinShape, BuiltinSignature, ConversionKind, LaneWidth,
    ScalarType,
};
pub use crate::error::{LaneWidthError, ParseBuiltinError};

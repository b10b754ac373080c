//! The errors that can occur while naming or looking up a builtin.
//!
//! The conversions themselves never fail: every input bit pattern has a
//! defined result. Only the surfaces that take free-form input from a code
//! generator (lane counts and symbol names) can be rejected.
use thiserror::Error;

/// A lane count that has no builtin instantiation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("unsupported lane count {0}: expected one of 1, 2, 4, 8, 16 or 32")]
pub struct LaneWidthError(pub u32);

/// The error returned when a symbol name does not denote a builtin.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseBuiltinError {
    /// The name does not start with the builtin prefix.
    #[error("`{0}` is not a conversion builtin")]
    MissingPrefix(String),
    /// The conversion mnemonic is not one of `fp2ui`, `fp2si`, `ui2fp`, `si2fp`.
    #[error("unknown conversion `{0}`")]
    UnknownKind(String),
    /// The lane count is missing, not a number, or not instantiated.
    #[error("invalid lane count `{0}`")]
    InvalidWidth(String),
    /// The name does not end in `_` (vector form) or `_base__` (scalar form).
    #[error("unexpected suffix `{0}`")]
    BadSuffix(String),
    /// The scalar form only exists for a single lane.
    #[error("scalar builtins take a single lane, got {0}")]
    ScalarWidth(u32),
}

impl From<LaneWidthError> for ParseBuiltinError {
    fn from(err: LaneWidthError) -> Self {
        Self::InvalidWidth(err.0.to_string())
    }
}

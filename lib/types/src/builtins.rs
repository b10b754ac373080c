use crate::error::{LaneWidthError, ParseBuiltinError};
use enum_iterator::IntoEnumIterator;
#[cfg(feature = "enable-serde")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::iter;
use std::str::FromStr;

/// Every builtin symbol starts with this prefix.
pub const BUILTIN_PREFIX: &str = "__lanecvt_";

/// The direction of a conversion builtin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ConversionKind {
    /// `f32` to `u64`, saturating.
    FloatToUnsigned,
    /// `f32` to `i64`, saturating.
    FloatToSigned,
    /// `u64` to `f32`, round to nearest even.
    UnsignedToFloat,
    /// `i64` to `f32`, round to nearest even.
    SignedToFloat,
}

impl ConversionKind {
    /// The short name used in symbol names.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::FloatToUnsigned => "fp2ui",
            Self::FloatToSigned => "fp2si",
            Self::UnsignedToFloat => "ui2fp",
            Self::SignedToFloat => "si2fp",
        }
    }

    /// Looks up a conversion by its mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::into_enum_iter().find(|kind| kind.mnemonic() == mnemonic)
    }

    /// The scalar type of each input lane.
    pub fn param_type(self) -> ScalarType {
        match self {
            Self::FloatToUnsigned | Self::FloatToSigned => ScalarType::F32,
            Self::UnsignedToFloat => ScalarType::U64,
            Self::SignedToFloat => ScalarType::I64,
        }
    }

    /// The scalar type of each output lane.
    pub fn result_type(self) -> ScalarType {
        match self {
            Self::FloatToUnsigned => ScalarType::U64,
            Self::FloatToSigned => ScalarType::I64,
            Self::UnsignedToFloat | Self::SignedToFloat => ScalarType::F32,
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// The lane counts a builtin is instantiated for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum LaneWidth {
    /// One lane.
    W1 = 1,
    /// Two lanes.
    W2 = 2,
    /// Four lanes.
    W4 = 4,
    /// Eight lanes.
    W8 = 8,
    /// Sixteen lanes.
    W16 = 16,
    /// Thirty-two lanes.
    W32 = 32,
}

impl LaneWidth {
    /// The number of lanes.
    #[inline]
    pub const fn lanes(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for LaneWidth {
    type Error = LaneWidthError;

    fn try_from(lanes: u32) -> Result<Self, Self::Error> {
        Self::into_enum_iter()
            .find(|width| width.lanes() == lanes)
            .ok_or(LaneWidthError(lanes))
    }
}

impl fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.lanes())
    }
}

/// Whether a builtin passes a packed vector or a bare scalar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum BuiltinShape {
    /// A packed vector of the given width.
    Vector(LaneWidth),
    /// A single bare scalar, for callers that never build a one-lane vector.
    Scalar,
}

impl BuiltinShape {
    /// The number of lanes processed per call.
    pub fn lanes(self) -> u32 {
        match self {
            Self::Vector(width) => width.lanes(),
            Self::Scalar => 1,
        }
    }
}

/// The type of one lane at the builtin ABI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub enum ScalarType {
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 64-bit integer.
    I64,
    /// IEEE-754 single precision.
    F32,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F32 => "f32",
        })
    }
}

/// The ABI shape of a builtin: what a caller passes and gets back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct BuiltinSignature {
    /// Lane type of the single parameter.
    pub param: ScalarType,
    /// Lane type of the result.
    pub result: ScalarType,
    /// Number of lanes in both parameter and result.
    pub lanes: u32,
    /// `false` for the bare scalar form.
    pub vectorized: bool,
}

impl fmt::Display for BuiltinSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.vectorized {
            write!(
                f,
                "(<{n} x {}>) -> <{n} x {}>",
                self.param,
                self.result,
                n = self.lanes
            )
        } else {
            write!(f, "({}) -> {}", self.param, self.result)
        }
    }
}

/// A conversion routine that generated code may call in place of a native
/// instruction.
///
/// There is one builtin per conversion kind and lane width, plus a scalar
/// form of each kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "enable-serde", derive(Serialize, Deserialize))]
pub struct Builtin {
    /// What the builtin converts.
    pub kind: ConversionKind,
    /// How the builtin takes its argument.
    pub shape: BuiltinShape,
}

impl Builtin {
    /// The vector form of `kind` over `width` lanes.
    pub const fn vector(kind: ConversionKind, width: LaneWidth) -> Self {
        Self {
            kind,
            shape: BuiltinShape::Vector(width),
        }
    }

    /// The scalar form of `kind`.
    pub const fn scalar(kind: ConversionKind) -> Self {
        Self {
            kind,
            shape: BuiltinShape::Scalar,
        }
    }

    /// All builtins, vector forms first for each kind.
    pub fn all() -> impl Iterator<Item = Self> {
        ConversionKind::into_enum_iter().flat_map(|kind| {
            LaneWidth::into_enum_iter()
                .map(BuiltinShape::Vector)
                .chain(iter::once(BuiltinShape::Scalar))
                .map(move |shape| Self { kind, shape })
        })
    }

    /// Return the symbol name the builtin is exported under.
    pub fn to_function_name(&self) -> String {
        match self.shape {
            BuiltinShape::Vector(width) => {
                format!("{BUILTIN_PREFIX}{}_{}_", self.kind.mnemonic(), width.lanes())
            }
            BuiltinShape::Scalar => format!("{BUILTIN_PREFIX}{}_1_base__", self.kind.mnemonic()),
        }
    }

    /// The ABI shape of the builtin.
    pub fn signature(&self) -> BuiltinSignature {
        BuiltinSignature {
            param: self.kind.param_type(),
            result: self.kind.result_type(),
            lanes: self.shape.lanes(),
            vectorized: matches!(self.shape, BuiltinShape::Vector(_)),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_function_name())
    }
}

impl FromStr for Builtin {
    type Err = ParseBuiltinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(BUILTIN_PREFIX)
            .ok_or_else(|| ParseBuiltinError::MissingPrefix(s.to_string()))?;
        let (mnemonic, rest) = rest.split_once('_').unwrap_or((rest, ""));
        let kind = ConversionKind::from_mnemonic(mnemonic)
            .ok_or_else(|| ParseBuiltinError::UnknownKind(mnemonic.to_string()))?;
        let (count, suffix) = rest
            .split_once('_')
            .ok_or_else(|| ParseBuiltinError::InvalidWidth(rest.to_string()))?;
        let lanes: u32 = count
            .parse()
            .map_err(|_| ParseBuiltinError::InvalidWidth(count.to_string()))?;
        let width = LaneWidth::try_from(lanes)?;
        // Reject spellings such as `04` or `+4` so that names stay canonical.
        if width.to_string() != count {
            return Err(ParseBuiltinError::InvalidWidth(count.to_string()));
        }

        match suffix {
            "" => Ok(Self::vector(kind, width)),
            "base__" if width == LaneWidth::W1 => Ok(Self::scalar(kind)),
            "base__" => Err(ParseBuiltinError::ScalarWidth(lanes)),
            other => Err(ParseBuiltinError::BadSuffix(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names() {
        assert_eq!(
            Builtin::vector(ConversionKind::FloatToUnsigned, LaneWidth::W16).to_string(),
            "__lanecvt_fp2ui_16_"
        );
        assert_eq!(
            Builtin::scalar(ConversionKind::SignedToFloat).to_string(),
            "__lanecvt_si2fp_1_base__"
        );
        assert_eq!(
            Builtin::vector(ConversionKind::SignedToFloat, LaneWidth::W1).to_string(),
            "__lanecvt_si2fp_1_"
        );
    }

    #[test]
    fn all_builtins_are_distinct() {
        let names: HashSet<String> = Builtin::all().map(|b| b.to_function_name()).collect();
        assert_eq!(names.len(), 28);
        assert_eq!(Builtin::all().count(), 28);
    }

    #[test]
    fn parse_roundtrip() {
        for builtin in Builtin::all() {
            assert_eq!(builtin.to_string().parse(), Ok(builtin));
        }
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "memcpy".parse::<Builtin>(),
            Err(ParseBuiltinError::MissingPrefix("memcpy".into()))
        );
        assert_eq!(
            "__lanecvt_fp2xx_4_".parse::<Builtin>(),
            Err(ParseBuiltinError::UnknownKind("fp2xx".into()))
        );
        assert_eq!(
            "__lanecvt_fp2xx".parse::<Builtin>(),
            Err(ParseBuiltinError::UnknownKind("fp2xx".into()))
        );
        assert_eq!(
            "__lanecvt_fp2ui_3_".parse::<Builtin>(),
            Err(ParseBuiltinError::InvalidWidth("3".into()))
        );
        assert_eq!(
            "__lanecvt_fp2ui_04_".parse::<Builtin>(),
            Err(ParseBuiltinError::InvalidWidth("04".into()))
        );
        assert_eq!(
            "__lanecvt_fp2ui_4".parse::<Builtin>(),
            Err(ParseBuiltinError::InvalidWidth("4".into()))
        );
        assert_eq!(
            "__lanecvt_ui2fp_4_base__".parse::<Builtin>(),
            Err(ParseBuiltinError::ScalarWidth(4))
        );
        assert_eq!(
            "__lanecvt_ui2fp_4_vec".parse::<Builtin>(),
            Err(ParseBuiltinError::BadSuffix("vec".into()))
        );
    }

    #[test]
    fn known_kind_without_width() {
        assert_eq!(
            "__lanecvt_fp2ui".parse::<Builtin>(),
            Err(ParseBuiltinError::InvalidWidth("".into()))
        );
        assert_eq!(
            "__lanecvt_si2fp_".parse::<Builtin>(),
            Err(ParseBuiltinError::InvalidWidth("".into()))
        );
    }

    #[test]
    fn lane_width() {
        assert_eq!(LaneWidth::try_from(8), Ok(LaneWidth::W8));
        assert_eq!(LaneWidth::try_from(0), Err(LaneWidthError(0)));
        assert_eq!(LaneWidth::try_from(64), Err(LaneWidthError(64)));
        assert_eq!(
            LaneWidth::into_enum_iter()
                .map(LaneWidth::lanes)
                .collect::<Vec<_>>(),
            vec![1, 2, 4, 8, 16, 32]
        );
    }

    #[test]
    fn signatures() {
        let sig = Builtin::vector(ConversionKind::FloatToSigned, LaneWidth::W4).signature();
        assert_eq!(
            sig,
            BuiltinSignature {
                param: ScalarType::F32,
                result: ScalarType::I64,
                lanes: 4,
                vectorized: true,
            }
        );
        assert_eq!(sig.to_string(), "(<4 x f32>) -> <4 x i64>");

        let sig = Builtin::scalar(ConversionKind::UnsignedToFloat).signature();
        assert_eq!(sig.to_string(), "(u64) -> f32");
        assert_eq!(sig.lanes, 1);
        assert!(!sig.vectorized);
    }

    #[cfg(feature = "enable-serde")]
    #[test]
    fn serde_roundtrip() {
        let builtin = Builtin::vector(ConversionKind::UnsignedToFloat, LaneWidth::W32);
        let json = serde_json::to_string(&builtin).unwrap();
        assert_eq!(serde_json::from_str::<Builtin>(&json).unwrap(), builtin);
    }
}

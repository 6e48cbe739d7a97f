//! The `GLSL.std.450` extended instruction set.

use std::fmt;

/// Import name of the extended instruction set.
pub const GLSL_STD_450: &str = "GLSL.std.450";

/// Operand/result shape of an extended instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlslSignature {
    /// `float-like -> same`, with `arity` operands of the result type.
    Float { arity: u8 },
    /// `signed-int-like -> same`.
    SignedInt { arity: u8 },
    /// `unsigned-int-like -> same`.
    UnsignedInt { arity: u8 },
    /// `float vector(s) -> float scalar` (`Length`, `Distance`).
    FloatReduce { arity: u8 },
    /// `float vec3 x float vec3 -> float vec3`.
    Cross,
}

/// Instruction within `GLSL.std.450`, rendered by its bare name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlslOp {
    Round,
    RoundEven,
    Trunc,
    FAbs,
    SAbs,
    FSign,
    SSign,
    Floor,
    Ceil,
    Fract,
    Sin,
    Cos,
    Tan,
    Atan,
    Exp,
    Exp2,
    FMin,
    UMin,
    SMin,
    FMax,
    UMax,
    SMax,
    Fma,
    Length,
    Distance,
    Cross,
    Normalize,
    Step,
    FMix,
}

impl GlslOp {
    pub const ALL: &'static [GlslOp] = &[
        GlslOp::Round,
        GlslOp::RoundEven,
        GlslOp::Trunc,
        GlslOp::FAbs,
        GlslOp::SAbs,
        GlslOp::FSign,
        GlslOp::SSign,
        GlslOp::Floor,
        GlslOp::Ceil,
        GlslOp::Fract,
        GlslOp::Sin,
        GlslOp::Cos,
        GlslOp::Tan,
        GlslOp::Atan,
        GlslOp::Exp,
        GlslOp::Exp2,
        GlslOp::FMin,
        GlslOp::UMin,
        GlslOp::SMin,
        GlslOp::FMax,
        GlslOp::UMax,
        GlslOp::SMax,
        GlslOp::Fma,
        GlslOp::Length,
        GlslOp::Distance,
        GlslOp::Cross,
        GlslOp::Normalize,
        GlslOp::Step,
        GlslOp::FMix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GlslOp::Round => "Round",
            GlslOp::RoundEven => "RoundEven",
            GlslOp::Trunc => "Trunc",
            GlslOp::FAbs => "FAbs",
            GlslOp::SAbs => "SAbs",
            GlslOp::FSign => "FSign",
            GlslOp::SSign => "SSign",
            GlslOp::Floor => "Floor",
            GlslOp::Ceil => "Ceil",
            GlslOp::Fract => "Fract",
            GlslOp::Sin => "Sin",
            GlslOp::Cos => "Cos",
            GlslOp::Tan => "Tan",
            GlslOp::Atan => "Atan",
            GlslOp::Exp => "Exp",
            GlslOp::Exp2 => "Exp2",
            GlslOp::FMin => "FMin",
            GlslOp::UMin => "UMin",
            GlslOp::SMin => "SMin",
            GlslOp::FMax => "FMax",
            GlslOp::UMax => "UMax",
            GlslOp::SMax => "SMax",
            GlslOp::Fma => "Fma",
            GlslOp::Length => "Length",
            GlslOp::Distance => "Distance",
            GlslOp::Cross => "Cross",
            GlslOp::Normalize => "Normalize",
            GlslOp::Step => "Step",
            GlslOp::FMix => "FMix",
        }
    }

    pub fn signature(self) -> GlslSignature {
        match self {
            GlslOp::Round
            | GlslOp::RoundEven
            | GlslOp::Trunc
            | GlslOp::FAbs
            | GlslOp::FSign
            | GlslOp::Floor
            | GlslOp::Ceil
            | GlslOp::Fract
            | GlslOp::Sin
            | GlslOp::Cos
            | GlslOp::Tan
            | GlslOp::Atan
            | GlslOp::Exp
            | GlslOp::Exp2
            | GlslOp::Normalize => GlslSignature::Float { arity: 1 },
            GlslOp::FMin | GlslOp::FMax | GlslOp::Step => GlslSignature::Float { arity: 2 },
            GlslOp::Fma | GlslOp::FMix => GlslSignature::Float { arity: 3 },
            GlslOp::SAbs | GlslOp::SSign => GlslSignature::SignedInt { arity: 1 },
            GlslOp::SMin | GlslOp::SMax => GlslSignature::SignedInt { arity: 2 },
            GlslOp::UMin | GlslOp::UMax => GlslSignature::UnsignedInt { arity: 2 },
            GlslOp::Length => GlslSignature::FloatReduce { arity: 1 },
            GlslOp::Distance => GlslSignature::FloatReduce { arity: 2 },
            GlslOp::Cross => GlslSignature::Cross,
        }
    }
}

impl fmt::Display for GlslOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

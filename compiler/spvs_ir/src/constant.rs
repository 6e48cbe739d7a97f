//! Constant entities.

use std::fmt;

use crate::op::OpKind;
use crate::GlobalId;

/// A scalar literal.
///
/// Floats are stored as `f64` bits so the value participates in the
/// derived `Eq`/`Hash` like every other field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LitValue {
    Int(i64),
    UInt(u64),
    Float(u64),
}

impl LitValue {
    pub fn float(value: f64) -> Self {
        LitValue::Float(value.to_bits())
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            LitValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// Non-negative integer value, if this literal has one.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            LitValue::Int(v) => u64::try_from(v).ok(),
            LitValue::UInt(v) => Some(v),
            LitValue::Float(_) => None,
        }
    }

    /// Render the literal for a scalar of the given bit width.
    pub fn render(self, width: u32) -> LitDisplay {
        LitDisplay { value: self, width }
    }
}

/// Display adapter from [`LitValue::render`].
pub struct LitDisplay {
    value: LitValue,
    width: u32,
}

impl fmt::Display for LitDisplay {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrow floats are generated as exact f32 values"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            LitValue::Int(v) => write!(f, "{v}"),
            LitValue::UInt(v) => write!(f, "{v}"),
            LitValue::Float(bits) => {
                let value = f64::from_bits(bits);
                if self.width <= 32 {
                    write!(f, "{}", value as f32)
                } else {
                    write!(f, "{value}")
                }
            }
        }
    }
}

/// A constant entity. Every variant carries its type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstData {
    True { ty: GlobalId },
    False { ty: GlobalId },
    Scalar { ty: GlobalId, value: LitValue },
    Composite { ty: GlobalId, parts: Vec<GlobalId> },
}

impl ConstData {
    pub fn ty(&self) -> GlobalId {
        match *self {
            ConstData::True { ty }
            | ConstData::False { ty }
            | ConstData::Scalar { ty, .. }
            | ConstData::Composite { ty, .. } => ty,
        }
    }

    /// The opcode declaring this constant.
    pub fn kind(&self) -> OpKind {
        match self {
            ConstData::True { .. } => OpKind::ConstantTrue,
            ConstData::False { .. } => OpKind::ConstantFalse,
            ConstData::Scalar { .. } => OpKind::Constant,
            ConstData::Composite { .. } => OpKind::ConstantComposite,
        }
    }
}

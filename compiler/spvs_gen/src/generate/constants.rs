//! Constant variants.

use rand::Rng;
use spvs_ir::{Category, ConstData, GlobalId, LitValue, OpKind, TypeData};
use tracing::trace;

use super::Generator;
use crate::error::{produce, require, GenResult, Outcome};

/// Integer values that exercise edge cases more often than a uniform draw.
const INTERESTING: &[i64] = &[0, 1, 2, -1, 7, 8, 31, 32, 255, 256, -128];

impl Generator {
    pub fn generate_constant(&mut self) -> GenResult<GlobalId> {
        self.delegate(Category::Constant, |g, kind| g.constant_variant(kind))
    }

    fn constant_variant(&mut self, kind: OpKind) -> GenResult<GlobalId> {
        let id = match kind {
            OpKind::ConstantTrue | OpKind::ConstantFalse => {
                let ty = require!(self.existing_type(|d| matches!(d, TypeData::Bool)));
                let data = if kind == OpKind::ConstantTrue {
                    ConstData::True { ty }
                } else {
                    ConstData::False { ty }
                };
                self.ctx.add_to_global_table(data).id
            }
            OpKind::Constant => {
                let ty = match self.existing_type(TypeData::is_numeric_scalar) {
                    Some(ty) => ty,
                    None => produce!(self.generate_type(Category::NumericType)),
                };
                require!(self.constant_of(ty))
            }
            OpKind::ConstantComposite => {
                let ty = require!(self.existing_type(|d| matches!(
                    d,
                    TypeData::Vector { .. }
                        | TypeData::Matrix { .. }
                        | TypeData::Array { .. }
                        | TypeData::Struct { .. }
                )));
                require!(self.constant_of(ty))
            }
            _ => return Ok(Outcome::Infeasible),
        };
        trace!(%kind, id = id.raw(), "constant");
        Ok(Outcome::Produced(id))
    }

    /// Random existing type whose entry satisfies `pred`.
    fn existing_type(&mut self, pred: impl Fn(&TypeData) -> bool) -> Option<GlobalId> {
        let candidates: Vec<GlobalId> = self
            .ctx
            .module
            .globals
            .types()
            .filter(|(_, data)| pred(data))
            .map(|(id, _)| id)
            .collect();
        self.pick(&candidates)
    }

    /// A constant of exactly `ty`.
    ///
    /// Composite parts reuse an existing constant of the part type half of
    /// the time and are created otherwise. `None` for types that have no
    /// constants (void, pointers, functions).
    pub(crate) fn constant_of(&mut self, ty: GlobalId) -> Option<GlobalId> {
        let data = self.ctx.module.type_data(ty).clone();
        let constant = match data {
            TypeData::Bool => {
                if self.session.chance(0.5) {
                    ConstData::True { ty }
                } else {
                    ConstData::False { ty }
                }
            }
            TypeData::Int { width, signed } => ConstData::Scalar {
                ty,
                value: self.int_value(width, signed),
            },
            TypeData::Float { width } => ConstData::Scalar {
                ty,
                value: self.float_value(width),
            },
            TypeData::Vector { .. }
            | TypeData::Matrix { .. }
            | TypeData::Array { .. }
            | TypeData::Struct { .. } => {
                let count = self.ctx.module.component_count(ty);
                let mut parts = Vec::with_capacity(count as usize);
                for index in 0..count {
                    let part_ty = self.ctx.module.member_type(ty, index)?;
                    parts.push(self.part_constant(part_ty)?);
                }
                ConstData::Composite { ty, parts }
            }
            TypeData::Void | TypeData::Pointer { .. } | TypeData::Function { .. } => return None,
        };
        Some(self.ctx.add_to_global_table(constant).id)
    }

    fn part_constant(&mut self, ty: GlobalId) -> Option<GlobalId> {
        let existing: Vec<GlobalId> = self
            .ctx
            .module
            .globals
            .constants()
            .filter(|(_, c)| c.ty() == ty)
            .map(|(id, _)| id)
            .collect();
        if !existing.is_empty() && self.session.chance(0.5) {
            return self.pick(&existing);
        }
        self.constant_of(ty)
    }

    fn int_value(&mut self, width: u32, signed: bool) -> LitValue {
        let rng = self.session.rng();
        let (min, max): (i128, i128) = if signed {
            (-(1i128 << (width - 1)), (1i128 << (width - 1)) - 1)
        } else {
            (0, (1i128 << width) - 1)
        };
        let value = if rng.gen_bool(0.5) {
            let v = INTERESTING[rng.gen_range(0..INTERESTING.len())];
            i128::from(v).clamp(min, max)
        } else {
            rng.gen_range(min..=max)
        };
        if signed {
            LitValue::Int(i64::try_from(value).unwrap_or_default())
        } else {
            LitValue::UInt(u64::try_from(value).unwrap_or_default())
        }
    }

    /// Half precision only gets quarters in `(-256, 256)`, which it holds
    /// exactly; single precision values are rounded through `f32`.
    fn float_value(&mut self, width: u32) -> LitValue {
        let rng = self.session.rng();
        let value = match width {
            16 => f64::from(rng.gen_range(-1023i32..=1023)) / 4.0,
            32 => f64::from(rng.gen_range(-1.0e4f32..1.0e4)),
            _ => rng.gen_range(-1.0e6..1.0e6),
        };
        LitValue::float(value)
    }
}

//! Numeric conversions and bitcasts.
//!
//! Every conversion keeps the component count of its operand; only the
//! scalar type changes.

use spvs_ir::{GlobalId, Module, OpKind, Operand, ScopeId, TypeData};

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates::{self, int_like_for};

impl Generator {
    pub(super) fn conversion(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        let pred: Box<dyn Fn(&Module, GlobalId) -> bool> = match kind {
            OpKind::ConvertFToU | OpKind::ConvertFToS | OpKind::FConvert => {
                Box::new(predicates::is_float_like)
            }
            OpKind::ConvertSToF | OpKind::ConvertUToF | OpKind::UConvert | OpKind::SConvert => {
                Box::new(int_like_for(kind))
            }
            OpKind::Bitcast => Box::new(predicates::is_numeric_like),
            _ => return Ok(Outcome::Infeasible),
        };
        let x = require!(self.operand(scope, pred));
        let ty = require!(self.type_of(x));
        let count = self.ctx.module.component_count(ty);
        let source = self.ctx.module.type_data(self.ctx.module.base_type(ty)).clone();

        let scalar = require!(self.converted_scalar(kind, &source));
        let scalar = self.ctx.add_to_global_table(scalar).id;
        let result = self.with_components(scalar, count);
        Ok(Outcome::Produced(self.emit(kind, result, [Operand::Value(x)])))
    }

    /// Target scalar type of `kind` applied to a `source` scalar.
    fn converted_scalar(&mut self, kind: OpKind, source: &TypeData) -> Option<TypeData> {
        let int_widths = self.config().int_widths();
        let float_widths = self.config().float_widths();
        match (kind, source) {
            (OpKind::ConvertFToU | OpKind::ConvertFToS, &TypeData::Float { .. }) => {
                Some(TypeData::Int {
                    width: self.pick(&int_widths)?,
                    signed: kind == OpKind::ConvertFToS,
                })
            }
            (OpKind::ConvertSToF | OpKind::ConvertUToF, &TypeData::Int { .. }) => {
                Some(TypeData::Float {
                    width: self.pick(&float_widths)?,
                })
            }
            (OpKind::UConvert | OpKind::SConvert, &TypeData::Int { width, signed }) => {
                let others: Vec<u32> = int_widths.into_iter().filter(|&w| w != width).collect();
                Some(TypeData::Int {
                    width: self.pick(&others)?,
                    signed,
                })
            }
            (OpKind::FConvert, &TypeData::Float { width }) => {
                let others: Vec<u32> = float_widths.into_iter().filter(|&w| w != width).collect();
                Some(TypeData::Float {
                    width: self.pick(&others)?,
                })
            }
            (OpKind::Bitcast, &TypeData::Int { width, signed }) => {
                if float_widths.contains(&width) && self.session.chance(0.5) {
                    Some(TypeData::Float { width })
                } else {
                    Some(TypeData::Int {
                        width,
                        signed: !signed,
                    })
                }
            }
            (OpKind::Bitcast, &TypeData::Float { width }) => Some(TypeData::Int {
                width,
                signed: self.session.chance(0.5),
            }),
            _ => None,
        }
    }

    /// `scalar` itself for one component, a vector of it otherwise.
    pub(super) fn with_components(&mut self, scalar: GlobalId, count: u32) -> GlobalId {
        if count <= 1 {
            return scalar;
        }
        self.ctx
            .add_to_global_table(TypeData::Vector {
                element: scalar,
                count,
            })
            .id
    }
}

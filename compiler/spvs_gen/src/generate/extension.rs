//! `OpExtInst` over `GLSL.std.450`.

use rand::seq::SliceRandom;
use smallvec::SmallVec;
use spvs_ir::{GlobalId, GlslOp, GlslSignature, Module, OpKind, Operand, ScopeId, GLSL_STD_450};
use tracing::trace;

use super::{Emitted, Generator};
use crate::error::{GenResult, Outcome};
use crate::predicates;

/// Operands are limited to 32-bit types, which every target supports.
fn is_f32_like(m: &Module, ty: GlobalId) -> bool {
    predicates::is_float_like(m, ty) && predicates::base_width(m, ty) == Some(32)
}

fn is_i32_like(signed: bool) -> impl Fn(&Module, GlobalId) -> bool {
    move |m, ty| {
        predicates::is_int_like(m, ty)
            && predicates::base_width(m, ty) == Some(32)
            && m.type_data(m.base_type(ty)).signedness() == Some(signed)
    }
}

impl Generator {
    /// Try the instructions of the set in random order; infeasible only
    /// if none of them finds operands.
    pub(super) fn ext_inst(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let mut ops: SmallVec<[GlslOp; 32]> = GlslOp::ALL.iter().copied().collect();
        ops.shuffle(self.session.rng());
        for op in ops {
            if let Some(emitted) = self.try_ext_inst(scope, op) {
                trace!(op = op.name(), "extended instruction");
                return Ok(Outcome::Produced(emitted));
            }
        }
        Ok(Outcome::Infeasible)
    }

    fn try_ext_inst(&mut self, scope: ScopeId, op: GlslOp) -> Option<Emitted> {
        let (first, arity, reduce) = match op.signature() {
            GlslSignature::Float { arity } => (self.operand(scope, is_f32_like)?, arity, false),
            GlslSignature::SignedInt { arity } => {
                (self.operand(scope, is_i32_like(true))?, arity, false)
            }
            GlslSignature::UnsignedInt { arity } => {
                (self.operand(scope, is_i32_like(false))?, arity, false)
            }
            GlslSignature::FloatReduce { arity } => (self.operand(scope, is_f32_like)?, arity, true),
            GlslSignature::Cross => (
                self.operand(scope, |m, ty| {
                    predicates::is_float_vector(m, ty)
                        && is_f32_like(m, ty)
                        && m.component_count(ty) == 3
                })?,
                2,
                false,
            ),
        };
        let ty = self.type_of(first)?;

        let mut values = vec![first];
        for _ in 1..arity {
            values.push(self.operand_of(scope, ty)?);
        }
        let result = if reduce {
            self.ctx.module.base_type(ty)
        } else {
            ty
        };

        let set = self.ctx.module.ext_import(GLSL_STD_450);
        let mut operands = vec![Operand::ExtSet(set), Operand::ExtOp(op)];
        operands.extend(values.into_iter().map(Operand::Value));
        Some(self.emit(OpKind::ExtInst, result, operands))
    }
}

//! Shifts and bit operations.

use spvs_ir::{OpKind, Operand, ScopeId};

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates;

impl Generator {
    pub(super) fn bitwise(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        match kind {
            OpKind::ShiftRightLogical | OpKind::ShiftRightArithmetic | OpKind::ShiftLeftLogical => {
                self.shift(scope, kind)
            }
            OpKind::BitwiseOr | OpKind::BitwiseXor | OpKind::BitwiseAnd => {
                self.binary(scope, kind, predicates::is_int_like)
            }
            OpKind::Not => self.unary(scope, kind, predicates::is_int_like),
            // Vulkan only allows 32-bit operands here.
            OpKind::BitCount | OpKind::BitReverse => self.unary(scope, kind, |m, ty| {
                predicates::is_int_like(m, ty) && predicates::base_width(m, ty) == Some(32)
            }),
            _ => Ok(Outcome::Infeasible),
        }
    }

    /// The shift amount may have any integer type with the same number of
    /// components as the base.
    fn shift(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        let base = require!(self.operand(scope, predicates::is_int_like));
        let ty = require!(self.type_of(base));
        let count = self.ctx.module.component_count(ty);
        let amount = require!(self.operand(scope, move |m, t| {
            predicates::is_int_like(m, t) && m.component_count(t) == count
        }));
        Ok(Outcome::Produced(self.emit(
            kind,
            ty,
            [Operand::Value(base), Operand::Value(amount)],
        )))
    }
}

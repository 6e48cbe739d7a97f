//! Boolean logic, relational tests, comparisons and `OpSelect`.

use spvs_ir::{GlobalId, Module, OpKind, Operand, ScopeId, TypeData};

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates::{self, int_like_for};

impl Generator {
    pub(super) fn logical(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        use OpKind as K;
        match kind {
            K::Any | K::All => self.reduce_bool(scope, kind),
            K::IsNan | K::IsInf => self.float_test(scope, kind),
            K::LogicalEqual | K::LogicalNotEqual | K::LogicalOr | K::LogicalAnd => {
                self.binary(scope, kind, predicates::is_bool_like)
            }
            K::LogicalNot => self.unary(scope, kind, predicates::is_bool_like),
            K::Select => self.select(scope),
            K::IEqual
            | K::INotEqual
            | K::UGreaterThan
            | K::SGreaterThan
            | K::UGreaterThanEqual
            | K::SGreaterThanEqual
            | K::ULessThan
            | K::SLessThan
            | K::ULessThanEqual
            | K::SLessThanEqual => self.compare(scope, kind, int_like_for(kind)),
            K::FOrdEqual
            | K::FOrdNotEqual
            | K::FOrdLessThan
            | K::FOrdGreaterThan
            | K::FOrdLessThanEqual
            | K::FOrdGreaterThanEqual => self.compare(scope, kind, predicates::is_float_like),
            _ => Ok(Outcome::Infeasible),
        }
    }

    /// `bool` for one component, a `bool` vector otherwise.
    pub(super) fn bool_like(&mut self, count: u32) -> GlobalId {
        let element = self.ctx.module.bool_type();
        if count <= 1 {
            return element;
        }
        self.ctx
            .add_to_global_table(TypeData::Vector { element, count })
            .id
    }

    fn reduce_bool(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        let v = require!(self.operand(scope, |m, ty| {
            predicates::is_vector(m, ty) && predicates::is_bool_like(m, ty)
        }));
        let result = self.ctx.module.bool_type();
        Ok(Outcome::Produced(self.emit(kind, result, [Operand::Value(v)])))
    }

    fn float_test(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        let x = require!(self.operand(scope, predicates::is_float_like));
        let count = self.ctx.module.component_count(require!(self.type_of(x)));
        let result = self.bool_like(count);
        Ok(Outcome::Produced(self.emit(kind, result, [Operand::Value(x)])))
    }

    /// Two operands of the same shape, a `bool`-like result. Integer
    /// comparisons only need equal widths, so `IEqual` may compare a signed
    /// value with an unsigned one.
    fn compare(
        &mut self,
        scope: ScopeId,
        kind: OpKind,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, &pred));
        let ty = require!(self.type_of(a));
        let b = require!(self.operand_like(scope, &pred, ty));
        let result = self.bool_like(self.ctx.module.component_count(ty));
        Ok(Outcome::Produced(self.emit(
            kind,
            result,
            [Operand::Value(a), Operand::Value(b)],
        )))
    }

    /// Objects are scalars or vectors of one type; the condition has as
    /// many components.
    fn select(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, predicates::is_scalar_or_vector));
        let ty = require!(self.type_of(a));
        let b = require!(self.operand_of(scope, ty));
        let cond_ty = self.bool_like(self.ctx.module.component_count(ty));
        let cond = require!(self.operand_of(scope, cond_ty));
        Ok(Outcome::Produced(self.emit(
            OpKind::Select,
            ty,
            [Operand::Value(cond), Operand::Value(a), Operand::Value(b)],
        )))
    }
}

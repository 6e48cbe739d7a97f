//! Integer, float, vector and matrix arithmetic.

use spvs_ir::{GlobalId, Module, OpKind, Operand, ScopeId, TypeData, ValueRef};

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates::{self, int_like_for};

impl Generator {
    pub(super) fn arithmetic(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        use OpKind as K;
        match kind {
            K::SNegate => self.unary(scope, kind, predicates::is_int_like),
            K::FNegate => self.unary(scope, kind, predicates::is_float_like),
            K::IAdd | K::ISub | K::IMul | K::UDiv | K::SDiv | K::UMod | K::SRem | K::SMod => {
                self.binary(scope, kind, int_like_for(kind))
            }
            K::FAdd | K::FSub | K::FMul | K::FDiv | K::FRem | K::FMod => {
                self.binary(scope, kind, predicates::is_float_like)
            }
            K::VectorTimesScalar => self.times_scalar(scope, kind, predicates::is_float_vector),
            K::MatrixTimesScalar => self.times_scalar(scope, kind, predicates::is_matrix),
            K::VectorTimesMatrix => self.vector_times_matrix(scope),
            K::MatrixTimesVector => self.matrix_times_vector(scope),
            K::MatrixTimesMatrix => self.matrix_times_matrix(scope),
            K::OuterProduct => self.outer_product(scope),
            K::Dot => self.dot(scope),
            _ => Ok(Outcome::Infeasible),
        }
    }

    /// `op a` with the result typed like `a`.
    pub(super) fn unary(
        &mut self,
        scope: ScopeId,
        kind: OpKind,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, pred));
        let ty = require!(self.type_of(a));
        Ok(Outcome::Produced(self.emit(kind, ty, [Operand::Value(a)])))
    }

    /// `a op b` over two operands of the same type.
    pub(super) fn binary(
        &mut self,
        scope: ScopeId,
        kind: OpKind,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, pred));
        let ty = require!(self.type_of(a));
        let b = require!(self.operand_of(scope, ty));
        Ok(Outcome::Produced(self.emit(
            kind,
            ty,
            [Operand::Value(a), Operand::Value(b)],
        )))
    }

    /// Vector or matrix times a scalar of its component type.
    fn times_scalar(
        &mut self,
        scope: ScopeId,
        kind: OpKind,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> GenResult<Emitted> {
        let composite = require!(self.operand(scope, pred));
        let ty = require!(self.type_of(composite));
        let scalar_ty = self.ctx.module.base_type(ty);
        let scalar = require!(self.operand_of(scope, scalar_ty));
        Ok(Outcome::Produced(self.emit(
            kind,
            ty,
            [Operand::Value(composite), Operand::Value(scalar)],
        )))
    }

    /// Matrix operand plus its column type and column count.
    fn matrix_operand(&mut self, scope: ScopeId) -> Option<(ValueRef, GlobalId, u32)> {
        let m = self.operand(scope, predicates::is_matrix)?;
        match *self.ctx.module.type_data(self.type_of(m)?) {
            TypeData::Matrix { column, count } => Some((m, column, count)),
            _ => None,
        }
    }

    fn float_vector(&mut self, element: GlobalId, count: u32) -> GlobalId {
        self.ctx
            .add_to_global_table(TypeData::Vector { element, count })
            .id
    }

    /// Row vector times matrix: the vector matches a column, the result
    /// has one component per column.
    fn vector_times_matrix(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (m, column, cols) = require!(self.matrix_operand(scope));
        let v = require!(self.operand_of(scope, column));
        let base = self.ctx.module.base_type(column);
        let result = self.float_vector(base, cols);
        Ok(Outcome::Produced(self.emit(
            OpKind::VectorTimesMatrix,
            result,
            [Operand::Value(v), Operand::Value(m)],
        )))
    }

    /// Matrix times column vector: the vector has one component per
    /// column, the result is a column.
    fn matrix_times_vector(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (m, column, cols) = require!(self.matrix_operand(scope));
        let base = self.ctx.module.base_type(column);
        let vector_ty = self.float_vector(base, cols);
        let v = require!(self.operand_of(scope, vector_ty));
        Ok(Outcome::Produced(self.emit(
            OpKind::MatrixTimesVector,
            column,
            [Operand::Value(m), Operand::Value(v)],
        )))
    }

    /// `L * R` where R's columns have as many rows as L has columns.
    fn matrix_times_matrix(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (left, column, cols) = require!(self.matrix_operand(scope));
        let base = self.ctx.module.base_type(column);
        let right_column = self.float_vector(base, cols);
        let right = require!(self.operand(scope, move |m, ty| matches!(
            *m.type_data(ty),
            TypeData::Matrix { column, .. } if column == right_column
        )));
        let right_ty = require!(self.type_of(right));
        let right_cols = self.ctx.module.component_count(right_ty);
        let result = self
            .ctx
            .add_to_global_table(TypeData::Matrix {
                column,
                count: right_cols,
            })
            .id;
        Ok(Outcome::Produced(self.emit(
            OpKind::MatrixTimesMatrix,
            result,
            [Operand::Value(left), Operand::Value(right)],
        )))
    }

    /// Column vector times row vector: a matrix with the first as column
    /// type and one column per component of the second.
    fn outer_product(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, predicates::is_float_vector));
        let column = require!(self.type_of(a));
        let base = self.ctx.module.base_type(column);
        let b = require!(self.operand(scope, move |m, ty| {
            predicates::is_float_vector(m, ty) && m.base_type(ty) == base
        }));
        let cols = self.ctx.module.component_count(require!(self.type_of(b)));
        let result = self
            .ctx
            .add_to_global_table(TypeData::Matrix {
                column,
                count: cols,
            })
            .id;
        Ok(Outcome::Produced(self.emit(
            OpKind::OuterProduct,
            result,
            [Operand::Value(a), Operand::Value(b)],
        )))
    }

    fn dot(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let a = require!(self.operand(scope, predicates::is_float_vector));
        let ty = require!(self.type_of(a));
        let b = require!(self.operand_of(scope, ty));
        let scalar = self.ctx.module.base_type(ty);
        Ok(Outcome::Produced(self.emit(
            OpKind::Dot,
            scalar,
            [Operand::Value(a), Operand::Value(b)],
        )))
    }
}

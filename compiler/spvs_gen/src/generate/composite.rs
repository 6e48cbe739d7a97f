//! Vector and composite access, construction and copies.

use spvs_ir::{GlobalId, OpKind, Operand, ScopeId, TypeData, ValueRef};

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates;

impl Generator {
    pub(super) fn composite(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        match kind {
            OpKind::VectorExtractDynamic => self.vector_extract_dynamic(scope),
            OpKind::VectorInsertDynamic => self.vector_insert_dynamic(scope),
            OpKind::VectorShuffle => self.vector_shuffle(scope),
            OpKind::CompositeConstruct => self.composite_construct(scope),
            OpKind::CompositeExtract => self.composite_extract(scope),
            OpKind::CompositeInsert => self.composite_insert(scope),
            OpKind::CopyObject => self.unary(scope, kind, predicates::is_data),
            OpKind::Transpose => self.transpose(scope),
            _ => Ok(Outcome::Infeasible),
        }
    }

    /// Vector operand plus its element type and component count.
    fn vector_operand(&mut self, scope: ScopeId) -> Option<(ValueRef, GlobalId, u32)> {
        let v = self.operand(scope, predicates::is_vector)?;
        match *self.ctx.module.type_data(self.type_of(v)?) {
            TypeData::Vector { element, count } => Some((v, element, count)),
            _ => None,
        }
    }

    fn dynamic_index(&mut self, scope: ScopeId) -> Option<ValueRef> {
        self.operand(scope, |m, ty| predicates::is_int(m, ty))
    }

    fn vector_extract_dynamic(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (v, element, _) = require!(self.vector_operand(scope));
        let index = require!(self.dynamic_index(scope));
        Ok(Outcome::Produced(self.emit(
            OpKind::VectorExtractDynamic,
            element,
            [Operand::Value(v), Operand::Value(index)],
        )))
    }

    fn vector_insert_dynamic(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (v, element, _) = require!(self.vector_operand(scope));
        let ty = require!(self.type_of(v));
        let component = require!(self.operand_of(scope, element));
        let index = require!(self.dynamic_index(scope));
        Ok(Outcome::Produced(self.emit(
            OpKind::VectorInsertDynamic,
            ty,
            [
                Operand::Value(v),
                Operand::Value(component),
                Operand::Value(index),
            ],
        )))
    }

    /// Components are selected from the concatenation of both operands.
    fn vector_shuffle(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (first, element, n1) = require!(self.vector_operand(scope));
        let second = require!(self.operand(scope, move |m, ty| {
            predicates::is_vector(m, ty) && m.element_type(ty) == Some(element)
        }));
        let n2 = self.ctx.module.component_count(require!(self.type_of(second)));

        let count = self.range(2, 4);
        let result = self.with_components(element, count);
        let mut operands = vec![Operand::Value(first), Operand::Value(second)];
        for _ in 0..count {
            operands.push(Operand::Literal(self.range(0, n1 + n2 - 1)));
        }
        Ok(Outcome::Produced(self.emit(
            OpKind::VectorShuffle,
            result,
            operands,
        )))
    }

    /// Build an existing composite type from visible values of exactly its
    /// member types.
    fn composite_construct(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let candidates: Vec<GlobalId> = self
            .ctx
            .module
            .globals
            .types()
            .filter(|(_, data)| data.is_composite())
            .map(|(id, _)| id)
            .collect();
        let ty = require!(self.pick(&candidates));

        let count = self.ctx.module.component_count(ty);
        let mut operands = Vec::with_capacity(count as usize);
        for index in 0..count {
            let member = require!(self.ctx.module.member_type(ty, index));
            operands.push(Operand::Value(require!(self.operand_of(scope, member))));
        }
        Ok(Outcome::Produced(self.emit(
            OpKind::CompositeConstruct,
            ty,
            operands,
        )))
    }

    /// Random literal index path one or two levels into `ty`, with the
    /// type it reaches.
    fn index_path(&mut self, ty: GlobalId) -> Option<(Vec<u32>, GlobalId)> {
        let levels = self.range(1, 2);
        let mut path = Vec::with_capacity(levels as usize);
        let mut current = ty;
        for _ in 0..levels {
            if !self.ctx.module.type_data(current).is_composite() {
                break;
            }
            let count = self.ctx.module.component_count(current);
            let index = self.range(0, count.saturating_sub(1));
            current = self.ctx.module.member_type(current, index)?;
            path.push(index);
        }
        Some((path, current))
    }

    fn composite_extract(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let c = require!(self.operand(scope, predicates::is_composite));
        let (path, result) = require!(self.index_path(require!(self.type_of(c))));
        let mut operands = vec![Operand::Value(c)];
        operands.extend(path.into_iter().map(Operand::Literal));
        Ok(Outcome::Produced(self.emit(
            OpKind::CompositeExtract,
            result,
            operands,
        )))
    }

    fn composite_insert(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let c = require!(self.operand(scope, predicates::is_composite));
        let ty = require!(self.type_of(c));
        let (path, part) = require!(self.index_path(ty));
        let object = require!(self.operand_of(scope, part));
        let mut operands = vec![Operand::Value(object), Operand::Value(c)];
        operands.extend(path.into_iter().map(Operand::Literal));
        Ok(Outcome::Produced(self.emit(
            OpKind::CompositeInsert,
            ty,
            operands,
        )))
    }

    /// An `R x C` matrix becomes `C x R`.
    fn transpose(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let m = require!(self.operand(scope, predicates::is_matrix));
        let ty = require!(self.type_of(m));
        let TypeData::Matrix { column, count: cols } = *self.ctx.module.type_data(ty) else {
            return Ok(Outcome::Infeasible);
        };
        let rows = self.ctx.module.component_count(column);
        let base = self.ctx.module.base_type(column);
        let new_column = self.with_components(base, cols);
        let result = self
            .ctx
            .add_to_global_table(TypeData::Matrix {
                column: new_column,
                count: rows,
            })
            .id;
        Ok(Outcome::Produced(self.emit(
            OpKind::Transpose,
            result,
            [Operand::Value(m)],
        )))
    }
}

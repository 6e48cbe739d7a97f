//! Variables, loads, stores and access chains.

use spvs_ir::{
    GlobalId, Instr, Module, OpKind, Operand, ScopeId, StorageClass, TypeData, ValueRef,
};

use super::{Emitted, Generator};
use crate::context::NumericKind;
use crate::error::{require, GenResult, Outcome};
use crate::predicates;

impl Generator {
    pub(super) fn memory(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        match kind {
            OpKind::Variable => self.local_variable(),
            OpKind::Load => self.load(scope),
            OpKind::Store => self.store(scope),
            OpKind::AccessChain => self.access_chain(scope),
            _ => Ok(Outcome::Infeasible),
        }
    }

    /// Visible pointers (local variables, access chains, module-scope
    /// variables) whose pointee satisfies `pred`.
    fn pointer_operand(
        &mut self,
        scope: ScopeId,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> Option<(ValueRef, StorageClass, GlobalId)> {
        let module = &self.ctx.module;
        let pointee_fits =
            |m: &Module, ty: GlobalId| m.pointee(ty).is_some_and(|(_, p)| pred(m, p));

        let mut pool = self.ctx.get_statements(scope, pointee_fits);
        pool.extend(
            module
                .globals
                .variables()
                .filter(|(_, v)| pointee_fits(module, v.ty))
                .map(|(id, _)| ValueRef::Global(id)),
        );
        let ptr = self.pick(&pool)?;
        let (storage, pointee) = self.ctx.module.pointee(self.type_of(ptr)?)?;
        Some((ptr, storage, pointee))
    }

    /// Function variables are hoisted, so nothing enters the stream here.
    fn local_variable(&mut self) -> GenResult<Emitted> {
        let ty = require!(self.variable_type());
        let var = require!(self
            .ctx
            .create_on_demand_variable(StorageClass::Function, ty, self.session.rng()));
        let ValueRef::Instr(id) = var else {
            return Ok(Outcome::Infeasible);
        };
        Ok(Outcome::Produced(Emitted {
            stream: Vec::new(),
            visible: vec![id],
            variables: vec![id],
        }))
    }

    fn load(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (ptr, _, pointee) = require!(self.pointer_operand(scope, predicates::is_data));
        Ok(Outcome::Produced(self.emit(
            OpKind::Load,
            pointee,
            [Operand::Value(ptr)],
        )))
    }

    fn store(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (ptr, _, pointee) = require!(self.pointer_operand(scope, predicates::is_data));
        let value = require!(self.operand_of(scope, pointee));
        let id = self.ctx.module.alloc(Instr::new(
            OpKind::Store,
            None,
            [Operand::Value(ptr), Operand::Value(value)],
        ));
        Ok(Outcome::Produced(Emitted {
            stream: vec![id],
            visible: Vec::new(),
            variables: Vec::new(),
        }))
    }

    /// Walk one or two levels into a composite pointee with constant
    /// `uint` indices.
    fn access_chain(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let (base, storage, pointee) =
            require!(self.pointer_operand(scope, predicates::is_composite));

        let levels = self.range(1, 2);
        let mut operands = vec![Operand::Value(base)];
        let mut current = pointee;
        for _ in 0..levels {
            if !self.ctx.module.type_data(current).is_composite() {
                break;
            }
            let count = self.ctx.module.component_count(current);
            let index = self.range(0, count.saturating_sub(1));
            let member = require!(self.ctx.module.member_type(current, index));
            let constant = self.ctx.create_on_demand_numeric_constant(
                NumericKind::Int { signed: false },
                spvs_ir::LitValue::UInt(u64::from(index)),
                32,
            );
            operands.push(Operand::value(constant));
            current = member;
        }

        let result = self.ctx.add_to_global_table(TypeData::Pointer {
            storage,
            pointee: current,
        });
        Ok(Outcome::Produced(self.emit(
            OpKind::AccessChain,
            result.id,
            operands,
        )))
    }
}

//! Structured selection.
//!
//! ```text
//! OpSelectionMerge %merge None
//! OpBranchConditional %cond %then %else
//! %then = OpLabel
//!         ...
//!         OpBranch %merge
//! %else = OpLabel
//!         ...
//!         OpBranch %merge
//! %merge = OpLabel
//! ```
//!
//! Each arm is a child scope of the selection's scope, so nothing defined
//! in an arm is visible after the merge.

use spvs_ir::{Instr, InstrId, OpKind, Operand, ScopeId};
use tracing::debug;

use super::{Emitted, Generator};
use crate::error::{require, GenResult, Outcome};
use crate::predicates;

impl Generator {
    pub(super) fn selection(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        let depth = self.ctx.depth(scope);
        if depth >= self.config().max_depth {
            return Ok(Outcome::Infeasible);
        }
        let cond = require!(self.operand(scope, predicates::is_bool));

        let then_scope = self.ctx.make_child_scope(scope, None);
        let then_block = self.generate_block(then_scope)?;
        let else_scope = self.ctx.make_child_scope(scope, None);
        let else_block = self.generate_block(else_scope)?;

        let merge = self.label();
        let then_label = self.label();
        let else_label = self.label();

        let module = &mut self.ctx.module;
        let header = module.alloc(Instr::new(
            OpKind::SelectionMerge,
            None,
            [Operand::value(merge), Operand::Keyword("None")],
        ));
        let branch = module.alloc(Instr::new(
            OpKind::BranchConditional,
            None,
            [
                Operand::Value(cond),
                Operand::value(then_label),
                Operand::value(else_label),
            ],
        ));

        let mut stream = vec![header, branch, then_label];
        stream.extend(then_block.stream);
        stream.push(self.branch_to(merge));
        stream.push(else_label);
        stream.extend(else_block.stream);
        stream.push(self.branch_to(merge));
        stream.push(merge);

        let mut variables = then_block.variables;
        variables.extend(else_block.variables);
        debug!(depth, instructions = stream.len(), "selection");

        Ok(Outcome::Produced(Emitted {
            stream,
            visible: Vec::new(),
            variables,
        }))
    }

    pub(crate) fn label(&mut self) -> InstrId {
        self.ctx.module.alloc(Instr::new(OpKind::Label, None, []))
    }

    fn branch_to(&mut self, target: InstrId) -> InstrId {
        self.ctx
            .module
            .alloc(Instr::new(OpKind::Branch, None, [Operand::value(target)]))
    }
}

//! Statement sequences.

use spvs_ir::{InstrId, ScopeId};
use spvs_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Generator;
use crate::error::{GenError, Outcome};

/// A generated block body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// Statements in emission order, without the leading label.
    pub stream: Vec<InstrId>,
    /// `Function` variables to hoist into the enclosing function's entry
    /// block, including those of nested selections.
    pub variables: Vec<InstrId>,
}

impl Generator {
    /// Fill `scope` with statements: continue with the configured
    /// statement probability, stop at the first infeasible statement.
    ///
    /// Recursion through nested selections goes through here, so the
    /// stack is grown on demand.
    pub fn generate_block(&mut self, scope: ScopeId) -> Result<Block, GenError> {
        ensure_sufficient_stack(|| self.generate_block_inner(scope))
    }

    fn generate_block_inner(&mut self, scope: ScopeId) -> Result<Block, GenError> {
        let mut block = Block::default();
        let p = self.config().statement_probability;
        while self.session.chance(p) {
            match self.generate_statement(scope)? {
                Outcome::Produced(emitted) => {
                    for id in emitted.visible {
                        self.ctx.declare(scope, id);
                    }
                    block.stream.extend(emitted.stream);
                    block.variables.extend(emitted.variables);
                }
                Outcome::Infeasible => break,
            }
        }
        trace!(
            depth = self.ctx.depth(scope),
            statements = block.stream.len(),
            variables = block.variables.len(),
            "block"
        );
        Ok(block)
    }
}

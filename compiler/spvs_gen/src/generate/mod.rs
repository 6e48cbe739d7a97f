//! Variant generation routines and the weighted delegator.
//!
//! # Architecture
//!
//! - [`Generator`] owns the [`Session`] (weights, random source, budget)
//!   and the [`Context`] (module and scopes) of one shader.
//! - [`Generator::delegate`] turns "something of category C" into one
//!   concrete variant: sample by weight, run the variant's routine,
//!   zero the variant and resample on infeasibility.
//! - One file per operator family holds the routines. A routine returns
//!   [`Outcome::Infeasible`] when the context has nothing it can use; it
//!   never leaves partial state in the stream.

mod arithmetic;
mod bitwise;
mod block;
mod composite;
mod constants;
mod control_flow;
mod conversion;
mod extension;
mod globals;
mod logical;
mod memory;
mod types;

use smallvec::SmallVec;
use spvs_ir::{Category, Family, GlobalId, Instr, InstrId, Module, OpKind, Operand, ScopeId, ValueRef};
use tracing::{debug, trace};

use crate::config::GeneratorConfig;
use crate::context::Context;
use crate::error::{GenError, GenResult, Outcome};
use crate::session::Session;

pub use block::Block;

/// Instructions one production adds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Emitted {
    /// Appended to the current block, in order.
    pub stream: Vec<InstrId>,
    /// Declared in the current scope's symbol table.
    pub visible: Vec<InstrId>,
    /// `Function` variables, hoisted to the function's entry block.
    pub variables: Vec<InstrId>,
}

impl Emitted {
    /// A single visible instruction.
    pub fn single(id: InstrId) -> Self {
        Self {
            stream: vec![id],
            visible: vec![id],
            variables: Vec::new(),
        }
    }
}

pub struct Generator {
    pub(crate) session: Session,
    pub(crate) ctx: Context,
    /// `OpTypeFunction` productions, one function each. `main` is first.
    pub(crate) function_types: Vec<GlobalId>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            session: Session::new(config),
            ctx: Context::new(),
            function_types: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn module(&self) -> &Module {
        &self.ctx.module
    }

    pub(crate) fn config(&self) -> &GeneratorConfig {
        self.session.config()
    }

    // Delegator

    /// Produce one variant of `category`.
    ///
    /// 1. Abort the session once the statement budget is spent.
    /// 2. Parametrize lazily; each statement dispatch rolls
    ///    `mutation_probability` to re-draw the statement weights.
    /// 3. Zero the configured type exclusions for type categories.
    /// 4. Sample by weight. A table emptied by step 6 is infeasible; one
    ///    that was all zero without any such prune is a bookkeeping bug.
    /// 5. Run `produce` for the sampled variant.
    /// 6. On infeasibility, zero the variant for the rest of the session
    ///    and resample.
    /// 7. Count completed statements against the budget.
    pub(crate) fn delegate<T>(
        &mut self,
        category: Category,
        mut produce: impl FnMut(&mut Self, OpKind) -> GenResult<T>,
    ) -> GenResult<T> {
        self.session.check_budget()?;

        self.session.ensure_parametrized(category);
        if category == Category::Statement {
            self.session.maybe_mutate();
        }

        if category.is_type() {
            let excluded: SmallVec<[OpKind; 8]> = self
                .session
                .excluded_types()
                .iter()
                .copied()
                .filter(|k| category.members().contains(k))
                .collect();
            for kind in excluded {
                self.session.set_zero_probability(category, kind);
            }
        }

        loop {
            let Some(kind) = self.session.sample(category) else {
                if !self.session.has_pruned(category) {
                    return Err(GenError::InvariantViolation(format!(
                        "every variant of {category} has weight 0"
                    )));
                }
                debug!(%category, "category exhausted");
                return Ok(Outcome::Infeasible);
            };
            trace!(%category, %kind, "sampled");

            match produce(self, kind)? {
                Outcome::Produced(value) => {
                    if category == Category::Statement {
                        self.session.count_statement();
                    }
                    return Ok(Outcome::Produced(value));
                }
                Outcome::Infeasible => {
                    debug!(%category, %kind, "infeasible, resampling");
                    self.session.prune(category, kind);
                }
            }
        }
    }

    // Statements

    /// Produce one statement of any kind in `scope`.
    pub fn generate_statement(&mut self, scope: ScopeId) -> GenResult<Emitted> {
        self.delegate(Category::Statement, |g, kind| g.generate_variant(scope, kind))
    }

    /// Produce one statement of a specific kind in `scope`.
    pub fn generate_variant(&mut self, scope: ScopeId, kind: OpKind) -> GenResult<Emitted> {
        match kind.family() {
            Family::Memory => self.memory(scope, kind),
            Family::Arithmetic => self.arithmetic(scope, kind),
            Family::Bitwise => self.bitwise(scope, kind),
            Family::Logical => self.logical(scope, kind),
            Family::Conversion => self.conversion(scope, kind),
            Family::Composite => self.composite(scope, kind),
            Family::ControlFlow if kind == OpKind::SelectionMerge => self.selection(scope),
            Family::Extension => self.ext_inst(scope),
            _ => Err(GenError::InvariantViolation(format!(
                "{kind} is not a sampled statement"
            ))),
        }
    }

    // Helpers shared by the routines

    /// Random visible operand whose type satisfies `pred`.
    pub(crate) fn operand(
        &mut self,
        scope: ScopeId,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> Option<ValueRef> {
        self.ctx
            .get_random_operand(scope, self.session.rng(), pred, None)
    }

    /// Random visible operand satisfying `pred` with the same shape as `like`.
    pub(crate) fn operand_like(
        &mut self,
        scope: ScopeId,
        pred: impl Fn(&Module, GlobalId) -> bool,
        like: GlobalId,
    ) -> Option<ValueRef> {
        self.ctx
            .get_random_operand(scope, self.session.rng(), pred, Some(like))
    }

    /// Random visible operand of exactly type `ty`.
    pub(crate) fn operand_of(&mut self, scope: ScopeId, ty: GlobalId) -> Option<ValueRef> {
        self.operand(scope, move |_, t| t == ty)
    }

    /// Type of a value found by operand search.
    pub(crate) fn type_of(&self, value: ValueRef) -> Option<GlobalId> {
        self.ctx.module.type_of(value)
    }

    /// Allocate one typed statement.
    pub(crate) fn emit(
        &mut self,
        kind: OpKind,
        result_type: GlobalId,
        operands: impl IntoIterator<Item = Operand>,
    ) -> Emitted {
        let id = self
            .ctx
            .module
            .alloc(Instr::new(kind, Some(result_type), operands));
        Emitted::single(id)
    }

    /// Pick from a slice.
    pub(crate) fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        use rand::seq::SliceRandom;
        items.choose(self.session.rng()).copied()
    }

    pub(crate) fn range(&mut self, lo: u32, hi_inclusive: u32) -> u32 {
        use rand::Rng;
        self.session.rng().gen_range(lo..=hi_inclusive)
    }
}

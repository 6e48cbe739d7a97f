//! Lexical scopes and operand search.
//!
//! A [`Context`] owns the session's [`Module`] and a tree of scopes stored
//! in an arena. Every scope shares the module's global table, annotations
//! and extension imports; what a scope adds is its own symbol table: the
//! statements declared directly in it, in emission order.
//!
//! Visibility follows the tree: a statement is visible from the scope it
//! was declared in and from every descendant, never from an ancestor or a
//! sibling. This is exactly SPIR-V dominance for structured selections,
//! since a value defined in one arm does not dominate the merge block.

use rand::seq::SliceRandom;
use rand::Rng;
use spvs_ir::{
    ConstData, GlobalEntity, GlobalId, Instr, InstrId, Interned, LitValue, Module, OpKind, Operand,
    ScopeId, StorageClass, TypeData, ValueRef, VariableData,
};
use tracing::warn;

struct Scope {
    parent: Option<ScopeId>,
    /// `OpFunction` of the enclosing function; `None` for the root.
    function: Option<InstrId>,
    locals: Vec<InstrId>,
}

/// Numeric scalar kind for on-demand constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericKind {
    Int { signed: bool },
    Float,
}

pub struct Context {
    pub module: Module,
    scopes: Vec<Scope>,
    next_serial: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A context with only the root (global) scope.
    pub fn new() -> Self {
        Self {
            module: Module::new(),
            scopes: vec![Scope {
                parent: None,
                function: None,
                locals: Vec::new(),
            }],
            next_serial: 0,
        }
    }

    // Scopes

    /// New scope under `parent`. Inherits the parent's function unless
    /// `function` starts a new body.
    pub fn make_child_scope(
        &mut self,
        parent: ScopeId,
        function: Option<InstrId>,
    ) -> ScopeId {
        let function = function.or(self.scopes[parent.index()].function);
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(parent),
            function,
            locals: Vec::new(),
        });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    pub fn function(&self, scope: ScopeId) -> Option<InstrId> {
        self.scopes[scope.index()].function
    }

    /// Ancestor hops to the root. The root is at depth 0, a function body
    /// at depth 1.
    pub fn depth(&self, scope: ScopeId) -> usize {
        self.ancestors(scope).count() - 1
    }

    /// `scope` itself, then each ancestor up to the root.
    fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |s| self.scopes[s.index()].parent)
    }

    /// Append a statement to `scope`'s symbol table.
    pub fn declare(&mut self, scope: ScopeId, instr: InstrId) {
        self.scopes[scope.index()].locals.push(instr);
    }

    // Global table

    /// Insert unless a structurally equal entry exists; returns the
    /// canonical slot either way.
    pub fn add_to_global_table(&mut self, entity: impl Into<GlobalEntity>) -> Interned {
        self.module.globals.intern(entity)
    }

    pub fn types(&self) -> Vec<GlobalId> {
        self.module.globals.types().map(|(id, _)| id).collect()
    }

    pub fn constants(&self) -> Vec<GlobalId> {
        self.module.globals.constants().map(|(id, _)| id).collect()
    }

    // Symbol lookups

    /// Statements visible from `scope` whose result type satisfies `pred`.
    /// Innermost scope first.
    pub fn get_statements(
        &self,
        scope: ScopeId,
        pred: impl Fn(&Module, GlobalId) -> bool,
    ) -> Vec<ValueRef> {
        self.ancestors(scope)
            .flat_map(|s| self.scopes[s.index()].locals.iter().copied())
            .filter(|&id| {
                let instr = self.module.instr(id);
                instr.kind.is_typed()
                    && instr.kind.has_result()
                    && instr.result_type.is_some_and(|ty| pred(&self.module, ty))
            })
            .map(ValueRef::Instr)
            .collect()
    }

    /// Function-storage variables visible from `scope`.
    pub fn get_local_variables(&self, scope: ScopeId) -> Vec<InstrId> {
        self.ancestors(scope)
            .flat_map(|s| self.scopes[s.index()].locals.iter().copied())
            .filter(|&id| self.module.instr(id).kind == OpKind::Variable)
            .collect()
    }

    /// Module-scope variables. None of them belongs to a function.
    pub fn get_global_variables(&self) -> Vec<GlobalId> {
        self.module.globals.variables().map(|(id, _)| id).collect()
    }

    /// Uniformly pick a visible operand: a typed statement or a global
    /// constant whose type satisfies `pred` and, with a `constraint` type,
    /// has the same shape as it.
    ///
    /// An empty pool is not an error; the caller treats `None` as
    /// infeasibility.
    pub fn get_random_operand(
        &self,
        scope: ScopeId,
        rng: &mut impl Rng,
        pred: impl Fn(&Module, GlobalId) -> bool,
        constraint: Option<GlobalId>,
    ) -> Option<ValueRef> {
        let module = &self.module;
        let fits = |ty: GlobalId| {
            pred(module, ty) && constraint.map_or(true, |c| module.same_shape(ty, c))
        };

        let mut pool = self.get_statements(scope, |_, ty| fits(ty));
        pool.extend(
            module
                .globals
                .constants()
                .filter(|(_, c)| fits(c.ty()))
                .map(|(id, _)| ValueRef::Global(id)),
        );

        let picked = pool.choose(rng).copied();
        if picked.is_none() {
            warn!(depth = self.depth(scope), "no operand found");
        }
        picked
    }

    // On-demand entities

    /// Scalar constant of a freshly interned numeric type.
    pub fn create_on_demand_numeric_constant(
        &mut self,
        kind: NumericKind,
        value: LitValue,
        width: u32,
    ) -> GlobalId {
        let ty = match kind {
            NumericKind::Int { signed } => TypeData::Int { width, signed },
            NumericKind::Float => TypeData::Float { width },
        };
        let ty = self.add_to_global_table(ty).id;
        self.add_to_global_table(ConstData::Scalar { ty, value }).id
    }

    /// All-zero constant of `ty`. Composite types get a composite of zero
    /// members.
    pub fn zero_constant(&mut self, ty: GlobalId) -> Option<GlobalId> {
        let data = self.module.type_data(ty).clone();
        let constant = match data {
            TypeData::Bool => ConstData::False { ty },
            TypeData::Int { signed: true, .. } => ConstData::Scalar {
                ty,
                value: LitValue::Int(0),
            },
            TypeData::Int { signed: false, .. } => ConstData::Scalar {
                ty,
                value: LitValue::UInt(0),
            },
            TypeData::Float { .. } => ConstData::Scalar {
                ty,
                value: LitValue::float(0.0),
            },
            TypeData::Vector { element, count } | TypeData::Matrix { column: element, count } => {
                let part = self.zero_constant(element)?;
                ConstData::Composite {
                    ty,
                    parts: vec![part; count as usize],
                }
            }
            TypeData::Array { element, .. } => {
                let part = self.zero_constant(element)?;
                let count = self.module.component_count(ty) as usize;
                ConstData::Composite {
                    ty,
                    parts: vec![part; count],
                }
            }
            TypeData::Struct { members } => {
                let parts = members
                    .iter()
                    .map(|&m| self.zero_constant(m))
                    .collect::<Option<Vec<_>>>()?;
                ConstData::Composite { ty, parts }
            }
            TypeData::Void | TypeData::Pointer { .. } | TypeData::Function { .. } => return None,
        };
        Some(self.add_to_global_table(constant).id)
    }

    /// Initializer for a variable of type `ty`: a random existing constant
    /// of that type, or the zero constant.
    pub fn initializer(&mut self, ty: GlobalId, rng: &mut impl Rng) -> Option<GlobalId> {
        let existing: Vec<GlobalId> = self
            .module
            .globals
            .constants()
            .filter(|(_, c)| c.ty() == ty)
            .map(|(id, _)| id)
            .collect();
        match existing.choose(rng) {
            Some(&id) => Some(id),
            None => self.zero_constant(ty),
        }
    }

    /// A new, always initialized variable of type `ty`.
    ///
    /// `Private` and `StorageBuffer` variables go into the global table;
    /// `Function` variables become an `OpVariable` instruction that the
    /// caller hoists into the function's entry block.
    pub fn create_on_demand_variable(
        &mut self,
        storage: StorageClass,
        ty: GlobalId,
        rng: &mut impl Rng,
    ) -> Option<ValueRef> {
        let ptr = self.module.pointer_type(storage, ty);
        let initializer = match storage {
            StorageClass::StorageBuffer => None,
            StorageClass::Private | StorageClass::Function => Some(self.initializer(ty, rng)?),
        };

        if storage == StorageClass::Function {
            let mut operands = vec![Operand::StorageClass(storage)];
            operands.extend(initializer.map(Operand::value));
            let id = self
                .module
                .alloc(Instr::new(OpKind::Variable, Some(ptr), operands));
            return Some(ValueRef::Instr(id));
        }

        let serial = self.next_serial;
        self.next_serial += 1;
        let var = self.add_to_global_table(VariableData {
            ty: ptr,
            storage,
            initializer,
            serial,
        });
        Some(ValueRef::Global(var.id))
    }
}

#[cfg(test)]
mod tests;

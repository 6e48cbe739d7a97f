//! Whole-shader generation.
//!
//! One call runs one session end to end:
//!
//! 1. Global table: `main`'s function type, sampled types, sampled
//!    constants, storage buffers, private variables.
//! 2. One function per function type, `main` first. Each function gets a
//!    fresh scope under the root, its parameters, an entry label, the
//!    hoisted `Function` variables, then its generated body.
//! 3. Reconditioning, then id assignment.

use spvs_ir::{
    Category, GlobalId, Instr, InstrId, OpKind, Operand, ScopeId, Shader, ShaderStats, TypeData,
};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::generate::Generator;
use crate::recondition::recondition;

/// Sampling attempts per requested global-table entry. Duplicates dedup
/// into existing entries, so a target can take more than one draw.
const ATTEMPTS_PER_ENTRY: usize = 4;

/// Generate one shader.
///
/// `Err(GenError::BudgetExceeded)` is the expected way a session that ran
/// too long ends; callers log it and move on to the next seed.
pub fn generate_shader(config: &GeneratorConfig) -> Result<Shader, GenError> {
    config.validate()?;
    let mut generator = Generator::new(config.clone());

    generator.generate_global_table()?;
    let (body, entry_point) = generator.generate_functions()?;

    let statements = generator.session().statements();
    let mut shader = Shader::new(generator.ctx.module, body, entry_point);
    let reconditioned = recondition(&mut shader);
    shader.assign_ids();

    let stats = ShaderStats::collect(&shader);
    info!(
        seed = config.seed,
        statements,
        reconditioned,
        instructions = stats.instructions,
        types = stats.types,
        constants = stats.constants,
        functions = stats.functions,
        "shader generated"
    );
    Ok(shader)
}

impl Generator {
    /// Fill the global table up to the configured targets.
    pub fn generate_global_table(&mut self) -> Result<(), GenError> {
        self.main_function_type();

        let max_types = self.config().max_types;
        for _ in 0..max_types * ATTEMPTS_PER_ENTRY {
            if self.ctx.module.globals.type_count() >= max_types {
                break;
            }
            self.generate_type(Category::Type)?;
        }

        let max_constants = self.config().max_constants;
        for _ in 0..max_constants * ATTEMPTS_PER_ENTRY {
            if self.ctx.module.globals.constant_count() >= max_constants {
                break;
            }
            self.generate_constant()?;
        }

        self.generate_storage_buffers();
        self.generate_private_variables();

        debug!(
            entries = self.ctx.module.globals.len(),
            types = self.ctx.module.globals.type_count(),
            constants = self.ctx.module.globals.constant_count(),
            functions = self.function_types.len(),
            "global table"
        );
        Ok(())
    }

    /// `void main()` is always the first function type.
    fn main_function_type(&mut self) {
        let ret = self.ctx.module.void_type();
        let main = self
            .ctx
            .add_to_global_table(TypeData::Function {
                ret,
                params: Vec::new(),
            })
            .id;
        self.function_types.push(main);
        if self.function_types.len() >= self.config().max_functions {
            self.session
                .set_zero_probability(Category::Type, OpKind::TypeFunction);
        }
    }

    /// Every function in order; returns the flat stream and `main`'s
    /// `OpFunction`.
    pub fn generate_functions(&mut self) -> Result<(Vec<InstrId>, InstrId), GenError> {
        let mut stream = Vec::new();
        let mut entry_point = None;
        for fn_ty in self.function_types.clone() {
            let (function, body) = self.generate_function(fn_ty)?;
            entry_point.get_or_insert(function);
            stream.extend(body);
        }
        let entry_point = entry_point.ok_or(GenError::Exhausted {
            category: Category::Type,
            context: "the entry point",
        })?;
        Ok((stream, entry_point))
    }

    fn generate_function(&mut self, fn_ty: GlobalId) -> Result<(InstrId, Vec<InstrId>), GenError> {
        let TypeData::Function { ret, params } = self.ctx.module.type_data(fn_ty).clone() else {
            return Err(GenError::InvariantViolation(format!(
                "{fn_ty:?} is not a function type"
            )));
        };

        let module = &mut self.ctx.module;
        let function = module.alloc(Instr::new(
            OpKind::Function,
            Some(ret),
            [Operand::Keyword("None"), Operand::value(fn_ty)],
        ));
        let scope = self.ctx.make_child_scope(ScopeId::ROOT, Some(function));

        let mut stream = vec![function];
        for param in params {
            let id = self
                .ctx
                .module
                .alloc(Instr::new(OpKind::FunctionParameter, Some(param), []));
            self.ctx.declare(scope, id);
            stream.push(id);
        }
        stream.push(self.label());

        let block = self.generate_block(scope)?;
        stream.extend(block.variables);
        stream.extend(block.stream);

        let module = &mut self.ctx.module;
        stream.push(module.alloc(Instr::new(OpKind::Return, None, [])));
        stream.push(module.alloc(Instr::new(OpKind::FunctionEnd, None, [])));

        debug!(
            function = function.raw(),
            instructions = stream.len(),
            "function"
        );
        Ok((function, stream))
    }
}

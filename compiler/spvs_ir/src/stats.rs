//! Summary counts of a finished shader.

use std::collections::BTreeMap;
use std::fmt;

use crate::instr::{Operand, ValueRef};
use crate::op::{Family, OpKind};
use crate::shader::Shader;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderStats {
    pub instructions: usize,
    pub types: usize,
    pub constants: usize,
    pub global_variables: usize,
    pub functions: usize,
    /// Deepest nesting of selection constructs in any function.
    pub max_selection_depth: usize,
    pub per_family: BTreeMap<Family, usize>,
}

impl ShaderStats {
    pub fn collect(shader: &Shader) -> Self {
        let module = &shader.module;
        let mut stats = ShaderStats {
            instructions: shader.body().len(),
            types: module.globals.type_count(),
            constants: module.globals.constant_count(),
            global_variables: module.globals.variables().count(),
            ..ShaderStats::default()
        };

        // Merge labels of the open selections.
        let mut open = Vec::new();
        for &id in shader.body() {
            let instr = module.instr(id);
            *stats.per_family.entry(instr.kind.family()).or_default() += 1;
            match instr.kind {
                OpKind::Function => stats.functions += 1,
                OpKind::SelectionMerge => {
                    if let Some(Operand::Value(ValueRef::Instr(merge))) = instr.operands.first() {
                        open.push(*merge);
                        stats.max_selection_depth = stats.max_selection_depth.max(open.len());
                    }
                }
                OpKind::Label if open.last() == Some(&id) => {
                    open.pop();
                }
                _ => {}
            }
        }
        stats
    }

    pub fn family(&self, family: Family) -> usize {
        self.per_family.get(&family).copied().unwrap_or(0)
    }
}

impl fmt::Display for ShaderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instructions, {} types, {} constants, {} globals, {} functions, depth {}",
            self.instructions,
            self.types,
            self.constants,
            self.global_variables,
            self.functions,
            self.max_selection_depth
        )
    }
}

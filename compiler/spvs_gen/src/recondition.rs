//! Reconditioning: rewrite generated code so it has defined behavior.
//!
//! Runs once, after generation and before id assignment. Each rule
//! matches on opcode and may insert one instruction in front of the
//! matched one. Rules are idempotent: a second pass over a reconditioned
//! shader changes nothing.

use spvs_ir::{Instr, InstrId, Module, OpKind, Operand, Shader, ValueRef};
use tracing::{debug, trace};

struct Rule {
    name: &'static str,
    kinds: &'static [OpKind],
    /// Returns the instruction to insert before the matched one.
    rewrite: fn(&mut Module, InstrId) -> Option<InstrId>,
}

const RULES: &[Rule] = &[Rule {
    name: "clamp dynamic vector index",
    kinds: &[OpKind::VectorExtractDynamic, OpKind::VectorInsertDynamic],
    rewrite: clamp_dynamic_index,
}];

/// Apply every rule to `shader`'s stream. Returns the number of rewrites.
pub fn recondition(shader: &mut Shader) -> usize {
    let body = std::mem::take(shader.body_mut());
    let mut out = Vec::with_capacity(body.len());
    let mut rewrites = 0;

    for id in body {
        let kind = shader.module.instr(id).kind;
        for rule in RULES.iter().filter(|rule| rule.kinds.contains(&kind)) {
            if let Some(inserted) = (rule.rewrite)(&mut shader.module, id) {
                trace!(rule = rule.name, %kind, "rewrite");
                out.push(inserted);
                rewrites += 1;
            }
        }
        out.push(id);
    }

    *shader.body_mut() = out;
    debug!(rewrites, "reconditioned");
    rewrites
}

/// Operand slot of the dynamic index.
fn index_slot(kind: OpKind) -> Option<usize> {
    match kind {
        OpKind::VectorExtractDynamic => Some(1),
        OpKind::VectorInsertDynamic => Some(2),
        _ => None,
    }
}

/// Replace the index `i` with `i mod n`, `n` being the vector's component
/// count. The modulo keeps the sign of `n`, so the result is in range for
/// signed indices too.
fn clamp_dynamic_index(module: &mut Module, id: InstrId) -> Option<InstrId> {
    let instr = module.instr(id);
    let slot = index_slot(instr.kind)?;
    let vector = instr.operands.first()?.as_value()?;
    let index = instr.operands.get(slot)?.as_value()?;

    let index_ty = module.type_of(index)?;
    let count = module.component_count(module.type_of(vector)?);
    let signed = module.type_data(index_ty).signedness()?;
    let length = module.int_constant(index_ty, u64::from(count));

    if let ValueRef::Instr(prev) = index {
        let prev = module.instr(prev);
        if matches!(prev.kind, OpKind::SMod | OpKind::UMod)
            && prev.operands.get(1) == Some(&Operand::value(length))
        {
            return None;
        }
    }

    let op = if signed { OpKind::SMod } else { OpKind::UMod };
    let clamped = module.alloc(Instr::new(
        op,
        Some(index_ty),
        [Operand::Value(index), Operand::value(length)],
    ));
    module
        .instr_mut(id)
        .replace_operand(slot, ValueRef::Instr(clamped));
    Some(clamped)
}

#[cfg(test)]
mod tests;

//! ID assignment and SPIR-V assembly emission.
//!
//! Ids are assigned from 1 in a fixed order: extension imports, the global
//! table in insertion order, then every instruction of the flat stream.
//! The text is emitted in module-layout order: capabilities, extension
//! imports, memory model, entry point, execution mode, annotations,
//! global-table entries, then the stream.

use std::fmt::Write;

use crate::annotation::Annotation;
use crate::constant::ConstData;
use crate::global::{GlobalEntity, VariableData};
use crate::instr::{Instr, Operand, ValueRef};
use crate::shader::{
    Shader, ENTRY_POINT_NAME, EXECUTION_MODEL, LOCAL_SIZE, MEMORY_MODEL, SPIRV_VERSION,
};
use crate::types::TypeData;
use crate::{ExtImportId, GlobalId, InstrId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("ids have not been assigned")]
    IdsNotAssigned,
    #[error("{0:?} is referenced but not part of the emitted stream")]
    UnassignedInstr(InstrId),
    #[error("{op} has no result type")]
    MissingResultType { op: &'static str },
}

/// Final `%N` numbering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdMap {
    ext_imports: Vec<u32>,
    globals: Vec<u32>,
    /// Indexed by arena slot; `None` for instructions not in the stream.
    instrs: Vec<Option<u32>>,
    next: u32,
}

impl IdMap {
    pub fn assign(module: &crate::Module, body: &[InstrId]) -> Self {
        let mut map = IdMap {
            next: 1,
            instrs: vec![None; module.instr_count()],
            ..IdMap::default()
        };
        for _ in module.ext_imports() {
            let id = map.fresh();
            map.ext_imports.push(id);
        }
        for _ in 0..module.globals.len() {
            let id = map.fresh();
            map.globals.push(id);
        }
        for &instr in body {
            let id = map.fresh();
            map.instrs[instr.index()] = Some(id);
        }
        map
    }

    fn fresh(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn ext_import(&self, id: ExtImportId) -> u32 {
        self.ext_imports[id.index()]
    }

    pub fn global(&self, id: GlobalId) -> u32 {
        self.globals[id.index()]
    }

    pub fn instr(&self, id: InstrId) -> Option<u32> {
        self.instrs.get(id.index()).copied().flatten()
    }

    pub fn value(&self, value: ValueRef) -> Result<u32, EmitError> {
        match value {
            ValueRef::Global(id) => Ok(self.global(id)),
            ValueRef::Instr(id) => self.instr(id).ok_or(EmitError::UnassignedInstr(id)),
        }
    }

    /// One past the largest assigned id.
    pub fn next_id(&self) -> u32 {
        self.next
    }
}

pub(crate) fn emit(shader: &Shader, ids: &IdMap) -> Result<String, EmitError> {
    let module = &shader.module;
    let mut out = String::new();

    let _ = writeln!(out, "; SPIR-V");
    let _ = writeln!(out, "; Version: {SPIRV_VERSION}");
    let _ = writeln!(out, "; Generator: spvs; 0");
    let _ = writeln!(out, "; Bound: {}", shader.bound());
    let _ = writeln!(out, "; Schema: 0");

    for cap in shader.capabilities() {
        let _ = writeln!(out, "OpCapability {cap}");
    }
    for (i, name) in module.ext_imports().iter().enumerate() {
        let id = ids.ext_import(ExtImportId::from_index(i));
        let _ = writeln!(out, "%{id} = OpExtInstImport \"{name}\"");
    }
    let _ = writeln!(out, "OpMemoryModel {MEMORY_MODEL}");

    let entry = ids
        .instr(shader.entry_point())
        .ok_or(EmitError::UnassignedInstr(shader.entry_point()))?;
    let _ = writeln!(
        out,
        "OpEntryPoint {EXECUTION_MODEL} %{entry} \"{ENTRY_POINT_NAME}\""
    );
    let [x, y, z] = LOCAL_SIZE;
    let _ = writeln!(out, "OpExecutionMode %{entry} LocalSize {x} {y} {z}");

    for annotation in module.annotations() {
        match *annotation {
            Annotation::Decorate { target, decoration } => {
                let _ = writeln!(out, "OpDecorate %{} {decoration}", ids.global(target));
            }
            Annotation::MemberDecorate {
                target,
                member,
                decoration,
            } => {
                let _ = writeln!(
                    out,
                    "OpMemberDecorate %{} {member} {decoration}",
                    ids.global(target)
                );
            }
        }
    }

    for (id, entity) in module.globals.iter() {
        let result = ids.global(id);
        let line = match entity {
            GlobalEntity::Type(data) => type_line(data, ids),
            GlobalEntity::Constant(data) => constant_line(module, data, ids),
            GlobalEntity::Variable(data) => variable_line(data, ids),
        };
        let _ = writeln!(out, "%{result} = {line}");
    }

    for &instr_id in shader.body() {
        let instr = module.instr(instr_id);
        let line = instr_line(instr, ids)?;
        if instr.kind.has_result() {
            let result = ids
                .instr(instr_id)
                .ok_or(EmitError::UnassignedInstr(instr_id))?;
            let _ = writeln!(out, "%{result} = {line}");
        } else {
            let _ = writeln!(out, "{line}");
        }
    }

    Ok(out)
}

fn ids_list(ids: &IdMap, list: &[GlobalId]) -> String {
    let mut out = String::new();
    for &id in list {
        let _ = write!(out, " %{}", ids.global(id));
    }
    out
}

fn type_line(data: &TypeData, ids: &IdMap) -> String {
    let op = data.kind();
    match data {
        TypeData::Void | TypeData::Bool => op.name().to_owned(),
        TypeData::Int { width, signed } => format!("{op} {width} {}", u32::from(*signed)),
        TypeData::Float { width } => format!("{op} {width}"),
        TypeData::Vector { element, count } => format!("{op} %{} {count}", ids.global(*element)),
        TypeData::Matrix { column, count } => format!("{op} %{} {count}", ids.global(*column)),
        TypeData::Array { element, length } => {
            format!("{op} %{} %{}", ids.global(*element), ids.global(*length))
        }
        TypeData::Struct { members } => format!("{op}{}", ids_list(ids, members)),
        TypeData::Pointer { storage, pointee } => {
            format!("{op} {storage} %{}", ids.global(*pointee))
        }
        TypeData::Function { ret, params } => {
            format!("{op} %{}{}", ids.global(*ret), ids_list(ids, params))
        }
    }
}

fn constant_line(module: &crate::Module, data: &ConstData, ids: &IdMap) -> String {
    let op = data.kind();
    let ty = ids.global(data.ty());
    match data {
        ConstData::True { .. } | ConstData::False { .. } => format!("{op} %{ty}"),
        ConstData::Scalar { ty: ty_id, value } => {
            let width = module.type_data(*ty_id).scalar_width().unwrap_or(32);
            format!("{op} %{ty} {}", value.render(width))
        }
        ConstData::Composite { parts, .. } => format!("{op} %{ty}{}", ids_list(ids, parts)),
    }
}

fn variable_line(data: &VariableData, ids: &IdMap) -> String {
    let mut line = format!("OpVariable %{} {}", ids.global(data.ty), data.storage);
    if let Some(init) = data.initializer {
        let _ = write!(line, " %{}", ids.global(init));
    }
    line
}

fn instr_line(instr: &Instr, ids: &IdMap) -> Result<String, EmitError> {
    let mut line = instr.kind.name().to_owned();
    if instr.kind.is_typed() {
        let ty = instr.result_type.ok_or(EmitError::MissingResultType {
            op: instr.kind.name(),
        })?;
        let _ = write!(line, " %{}", ids.global(ty));
    }
    for operand in &instr.operands {
        let _ = match *operand {
            Operand::Value(value) => write!(line, " %{}", ids.value(value)?),
            Operand::Literal(n) => write!(line, " {n}"),
            Operand::StorageClass(storage) => write!(line, " {storage}"),
            Operand::Keyword(word) => write!(line, " {word}"),
            Operand::ExtSet(set) => write!(line, " %{}", ids.ext_import(set)),
            Operand::ExtOp(op) => write!(line, " {op}"),
        };
    }
    Ok(line)
}

#[cfg(test)]
mod tests;

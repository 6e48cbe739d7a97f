//! The arenas one generation session fills.
//!
//! `Module` owns the global structural table, the instruction arena, the
//! annotation list and the extension-import table. Scopes in the generator
//! refer into it by handle; nothing here knows about scoping.

use crate::annotation::{Annotation, Decoration};
use crate::constant::{ConstData, LitValue};
use crate::global::{GlobalEntity, GlobalTable, Interned, VariableData};
use crate::instr::{Instr, ValueRef};
use crate::types::{StorageClass, TypeData};
use crate::{ExtImportId, GlobalId, InstrId};

#[derive(Clone, Debug, Default)]
pub struct Module {
    pub globals: GlobalTable,
    instrs: Vec<Instr>,
    annotations: Vec<Annotation>,
    ext_imports: Vec<&'static str>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    // Global table

    pub fn intern_type(&mut self, data: TypeData) -> Interned {
        self.globals.intern(data)
    }

    pub fn intern_constant(&mut self, data: ConstData) -> Interned {
        self.globals.intern(data)
    }

    pub fn intern_variable(&mut self, data: VariableData) -> Interned {
        self.globals.intern(data)
    }

    pub fn void_type(&mut self) -> GlobalId {
        self.intern_type(TypeData::Void).id
    }

    pub fn bool_type(&mut self) -> GlobalId {
        self.intern_type(TypeData::Bool).id
    }

    pub fn int_type(&mut self, width: u32, signed: bool) -> GlobalId {
        self.intern_type(TypeData::Int { width, signed }).id
    }

    pub fn pointer_type(&mut self, storage: StorageClass, pointee: GlobalId) -> GlobalId {
        self.intern_type(TypeData::Pointer { storage, pointee }).id
    }

    /// Integer constant of an integer type, signed or not per the type.
    pub fn int_constant(&mut self, ty: GlobalId, value: u64) -> GlobalId {
        let value = match self.type_data(ty) {
            TypeData::Int { signed: true, .. } => {
                LitValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
            }
            _ => LitValue::UInt(value),
        };
        self.intern_constant(ConstData::Scalar { ty, value }).id
    }

    /// The type entry behind `id`.
    ///
    /// # Panics
    /// Panics if `id` is not a type. Generator code only passes ids it
    /// obtained from `intern_type` or from a value's result type.
    pub fn type_data(&self, id: GlobalId) -> &TypeData {
        match self.globals.get(id) {
            GlobalEntity::Type(data) => data,
            other => panic!("{id:?} is not a type: {other:?}"),
        }
    }

    pub fn constant(&self, id: GlobalId) -> Option<&ConstData> {
        match self.globals.get(id) {
            GlobalEntity::Constant(data) => Some(data),
            _ => None,
        }
    }

    pub fn variable(&self, id: GlobalId) -> Option<&VariableData> {
        match self.globals.get(id) {
            GlobalEntity::Variable(data) => Some(data),
            _ => None,
        }
    }

    /// Non-negative integer value of a scalar constant.
    pub fn constant_u64(&self, id: GlobalId) -> Option<u64> {
        match self.constant(id)? {
            ConstData::Scalar { value, .. } => value.as_u64(),
            _ => None,
        }
    }

    // Instruction arena

    pub fn alloc(&mut self, instr: Instr) -> InstrId {
        let id = InstrId::from_index(self.instrs.len());
        self.instrs.push(instr);
        id
    }

    pub fn instr(&self, id: InstrId) -> &Instr {
        &self.instrs[id.index()]
    }

    pub fn instr_mut(&mut self, id: InstrId) -> &mut Instr {
        &mut self.instrs[id.index()]
    }

    pub fn instr_count(&self) -> usize {
        self.instrs.len()
    }

    // Type queries

    /// Result type of a value: the declared type of a constant, the pointer
    /// type of a variable, the result type of an instruction.
    pub fn type_of(&self, value: ValueRef) -> Option<GlobalId> {
        match value {
            ValueRef::Global(id) => match self.globals.get(id) {
                GlobalEntity::Constant(c) => Some(c.ty()),
                GlobalEntity::Variable(v) => Some(v.ty),
                GlobalEntity::Type(_) => None,
            },
            ValueRef::Instr(id) => self.instr(id).result_type,
        }
    }

    /// Unwrap vectors and matrices down to their scalar.
    ///
    /// Matrices hold vectors and vectors hold scalars, so this recurses at
    /// most twice.
    pub fn base_type(&self, ty: GlobalId) -> GlobalId {
        match *self.type_data(ty) {
            TypeData::Vector { element, .. } => self.base_type(element),
            TypeData::Matrix { column, .. } => self.base_type(column),
            _ => ty,
        }
    }

    /// Direct element type of a vector, matrix or array.
    pub fn element_type(&self, ty: GlobalId) -> Option<GlobalId> {
        match *self.type_data(ty) {
            TypeData::Vector { element, .. } | TypeData::Array { element, .. } => Some(element),
            TypeData::Matrix { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Number of components a composite exposes to `OpCompositeExtract`;
    /// 1 for everything else.
    pub fn component_count(&self, ty: GlobalId) -> u32 {
        match self.type_data(ty) {
            TypeData::Vector { count, .. } | TypeData::Matrix { count, .. } => *count,
            TypeData::Array { length, .. } => self
                .constant_u64(*length)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(1),
            TypeData::Struct { members } => u32::try_from(members.len()).unwrap_or(u32::MAX),
            _ => 1,
        }
    }

    /// Member type `index` of a composite.
    pub fn member_type(&self, ty: GlobalId, index: u32) -> Option<GlobalId> {
        match self.type_data(ty) {
            TypeData::Struct { members } => members.get(index as usize).copied(),
            _ if index < self.component_count(ty) => self.element_type(ty),
            _ => None,
        }
    }

    pub fn pointee(&self, ty: GlobalId) -> Option<(StorageClass, GlobalId)> {
        match *self.type_data(ty) {
            TypeData::Pointer { storage, pointee } => Some((storage, pointee)),
            _ => None,
        }
    }

    /// Operand compatibility: the same kind of type, the same number of
    /// components and the same scalar width.
    ///
    /// Binary SPIR-V operators require equal component widths. Signedness
    /// may differ: integer comparisons accept mixed signedness.
    pub fn same_shape(&self, a: GlobalId, b: GlobalId) -> bool {
        let (ta, tb) = (self.type_data(a), self.type_data(b));
        if std::mem::discriminant(ta) != std::mem::discriminant(tb) {
            return false;
        }
        if self.component_count(a) != self.component_count(b) {
            return false;
        }
        let (ba, bb) = (self.base_type(a), self.base_type(b));
        self.type_data(ba).scalar_width() == self.type_data(bb).scalar_width()
    }

    // Annotations and extension imports

    pub fn annotate(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// `true` if `ty` carries a `Block` decoration.
    pub fn is_block(&self, ty: GlobalId) -> bool {
        self.annotations.iter().any(|a| {
            matches!(
                a,
                Annotation::Decorate {
                    target,
                    decoration: Decoration::Block,
                } if *target == ty
            )
        })
    }

    /// Import an extended instruction set, once per name.
    pub fn ext_import(&mut self, name: &'static str) -> ExtImportId {
        if let Some(pos) = self.ext_imports.iter().position(|n| *n == name) {
            return ExtImportId::from_index(pos);
        }
        self.ext_imports.push(name);
        ExtImportId::from_index(self.ext_imports.len() - 1)
    }

    pub fn ext_imports(&self) -> &[&'static str] {
        &self.ext_imports
    }
}

#[cfg(test)]
mod tests;

//! Global structural table.
//!
//! Types, constants and module-scope variables share one insertion-ordered
//! table. Inserting an entity that is structurally equal to an existing
//! entry is a no-op returning the existing slot, so a "new" randomly built
//! `int 32 signed` is transparently unified with every earlier one.
//!
//! Follows the shard layout of a type interner: a hash map from entity to
//! slot for dedup, plus a `Vec` of entities indexed by slot. Unlike an
//! interner the table is owned by exactly one generation session, so no
//! locking is needed.

use rustc_hash::FxHashMap;

use crate::constant::ConstData;
use crate::types::{StorageClass, TypeData};
use crate::GlobalId;

/// A module-scope variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariableData {
    /// Pointer type of the variable.
    pub ty: GlobalId,
    pub storage: StorageClass,
    pub initializer: Option<GlobalId>,
    /// Declaration number. Two variables of the same type and initializer
    /// are still distinct storage, so the serial is part of their identity.
    pub serial: u32,
}

/// An entry of the global table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GlobalEntity {
    Type(TypeData),
    Constant(ConstData),
    Variable(VariableData),
}

impl From<TypeData> for GlobalEntity {
    fn from(data: TypeData) -> Self {
        GlobalEntity::Type(data)
    }
}

impl From<ConstData> for GlobalEntity {
    fn from(data: ConstData) -> Self {
        GlobalEntity::Constant(data)
    }
}

impl From<VariableData> for GlobalEntity {
    fn from(data: VariableData) -> Self {
        GlobalEntity::Variable(data)
    }
}

/// Result of [`GlobalTable::intern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interned {
    /// The canonical slot.
    pub id: GlobalId,
    /// `false` if a structurally equal entry already existed.
    pub inserted: bool,
}

/// Insertion-ordered, structurally deduplicated table.
#[derive(Clone, Debug, Default)]
pub struct GlobalTable {
    /// Map from entity to slot for deduplication.
    map: FxHashMap<GlobalEntity, GlobalId>,
    /// Entities, indexed by slot.
    entries: Vec<GlobalEntity>,
}

impl GlobalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity unless a structurally equal one is present.
    pub fn intern(&mut self, entity: impl Into<GlobalEntity>) -> Interned {
        let entity = entity.into();
        if let Some(&id) = self.map.get(&entity) {
            return Interned {
                id,
                inserted: false,
            };
        }

        let id = GlobalId::from_index(self.entries.len());
        self.entries.push(entity.clone());
        self.map.insert(entity, id);
        Interned { id, inserted: true }
    }

    /// Slot of an entity, without inserting it.
    pub fn find(&self, entity: &GlobalEntity) -> Option<GlobalId> {
        self.map.get(entity).copied()
    }

    /// Look up an entry.
    ///
    /// # Panics
    /// Panics if the id was not created by this table.
    pub fn get(&self, id: GlobalId) -> &GlobalEntity {
        &self.entries[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GlobalId, &GlobalEntity)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (GlobalId::from_index(i), e))
    }

    pub fn types(&self) -> impl Iterator<Item = (GlobalId, &TypeData)> {
        self.iter().filter_map(|(id, e)| match e {
            GlobalEntity::Type(t) => Some((id, t)),
            _ => None,
        })
    }

    pub fn constants(&self) -> impl Iterator<Item = (GlobalId, &ConstData)> {
        self.iter().filter_map(|(id, e)| match e {
            GlobalEntity::Constant(c) => Some((id, c)),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = (GlobalId, &VariableData)> {
        self.iter().filter_map(|(id, e)| match e {
            GlobalEntity::Variable(v) => Some((id, v)),
            _ => None,
        })
    }

    pub fn type_count(&self) -> usize {
        self.types().count()
    }

    pub fn constant_count(&self) -> usize {
        self.constants().count()
    }
}

#[cfg(test)]
mod tests;

//! Type entities and the enum-valued operands they carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::op::OpKind;
use crate::GlobalId;

/// Target capability a module may have to declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    Shader,
    Int8,
    Int16,
    Int64,
    Float16,
    Float64,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Shader => "Shader",
            Capability::Int8 => "Int8",
            Capability::Int16 => "Int16",
            Capability::Int64 => "Int64",
            Capability::Float16 => "Float16",
            Capability::Float64 => "Float64",
        }
    }

    /// Capability gating an integer width, if any.
    pub fn for_int_width(width: u32) -> Option<Capability> {
        match width {
            8 => Some(Capability::Int8),
            16 => Some(Capability::Int16),
            64 => Some(Capability::Int64),
            _ => None,
        }
    }

    /// Capability gating a float width, if any.
    pub fn for_float_width(width: u32) -> Option<Capability> {
        match width {
            16 => Some(Capability::Float16),
            64 => Some(Capability::Float64),
            _ => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage class of a pointer or variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Function-local; declared at the top of the function's entry block.
    Function,
    /// Module-private global.
    Private,
    /// Externally visible buffer, bound by the execution harness.
    StorageBuffer,
}

impl StorageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageClass::Function => "Function",
            StorageClass::Private => "Private",
            StorageClass::StorageBuffer => "StorageBuffer",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type entity.
///
/// Structural identity is exactly the variant plus the listed fields;
/// the derived `Eq`/`Hash` are what the global table dedups on. Nested
/// types are referenced through [`GlobalId`], so two structurally equal
/// containers always point at the same canonical children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Void,
    Bool,
    Int { width: u32, signed: bool },
    Float { width: u32 },
    Vector { element: GlobalId, count: u32 },
    Matrix { column: GlobalId, count: u32 },
    /// `length` is an integer constant in the global table.
    Array { element: GlobalId, length: GlobalId },
    Struct { members: Vec<GlobalId> },
    Pointer { storage: StorageClass, pointee: GlobalId },
    Function { ret: GlobalId, params: Vec<GlobalId> },
}

impl TypeData {
    /// The opcode declaring this type.
    pub fn kind(&self) -> OpKind {
        match self {
            TypeData::Void => OpKind::TypeVoid,
            TypeData::Bool => OpKind::TypeBool,
            TypeData::Int { .. } => OpKind::TypeInt,
            TypeData::Float { .. } => OpKind::TypeFloat,
            TypeData::Vector { .. } => OpKind::TypeVector,
            TypeData::Matrix { .. } => OpKind::TypeMatrix,
            TypeData::Array { .. } => OpKind::TypeArray,
            TypeData::Struct { .. } => OpKind::TypeStruct,
            TypeData::Pointer { .. } => OpKind::TypePointer,
            TypeData::Function { .. } => OpKind::TypeFunction,
        }
    }

    /// Capabilities a module must declare to use this type.
    ///
    /// Only the type's own width matters: containers are covered by the
    /// scalar entries they reference, which are in the table too.
    pub fn required_capabilities(&self) -> Option<Capability> {
        match *self {
            TypeData::Int { width, .. } => Capability::for_int_width(width),
            TypeData::Float { width } => Capability::for_float_width(width),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeData::Bool | TypeData::Int { .. } | TypeData::Float { .. }
        )
    }

    pub fn is_numeric_scalar(&self) -> bool {
        matches!(self, TypeData::Int { .. } | TypeData::Float { .. })
    }

    /// Vectors, matrices, arrays and structs.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            TypeData::Vector { .. }
                | TypeData::Matrix { .. }
                | TypeData::Array { .. }
                | TypeData::Struct { .. }
        )
    }

    /// Bit width of a numeric scalar.
    pub fn scalar_width(&self) -> Option<u32> {
        match *self {
            TypeData::Int { width, .. } | TypeData::Float { width } => Some(width),
            _ => None,
        }
    }

    /// Signedness of an integer scalar.
    pub fn signedness(&self) -> Option<bool> {
        match *self {
            TypeData::Int { signed, .. } => Some(signed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;

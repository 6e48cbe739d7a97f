//! Type predicates for operand search.
//!
//! "-like" means a scalar of that kind or a vector of such scalars.

use spvs_ir::{GlobalId, Module, OpKind, OpTraits, TypeData};

pub fn is_bool(m: &Module, ty: GlobalId) -> bool {
    matches!(m.type_data(ty), TypeData::Bool)
}

pub fn is_bool_like(m: &Module, ty: GlobalId) -> bool {
    is_scalar_or_vector(m, ty) && is_bool(m, m.base_type(ty))
}

pub fn is_int(m: &Module, ty: GlobalId) -> bool {
    matches!(m.type_data(ty), TypeData::Int { .. })
}

pub fn is_int_like(m: &Module, ty: GlobalId) -> bool {
    is_scalar_or_vector(m, ty) && is_int(m, m.base_type(ty))
}

pub fn is_float_like(m: &Module, ty: GlobalId) -> bool {
    is_scalar_or_vector(m, ty) && matches!(m.type_data(m.base_type(ty)), TypeData::Float { .. })
}

pub fn is_numeric_like(m: &Module, ty: GlobalId) -> bool {
    is_int_like(m, ty) || is_float_like(m, ty)
}

pub fn is_scalar_or_vector(m: &Module, ty: GlobalId) -> bool {
    let data = m.type_data(ty);
    data.is_scalar() || matches!(data, TypeData::Vector { .. })
}

pub fn is_vector(m: &Module, ty: GlobalId) -> bool {
    matches!(m.type_data(ty), TypeData::Vector { .. })
}

pub fn is_float_vector(m: &Module, ty: GlobalId) -> bool {
    is_vector(m, ty) && is_float_like(m, ty)
}

pub fn is_matrix(m: &Module, ty: GlobalId) -> bool {
    matches!(m.type_data(ty), TypeData::Matrix { .. })
}

pub fn is_pointer(m: &Module, ty: GlobalId) -> bool {
    matches!(m.type_data(ty), TypeData::Pointer { .. })
}

/// Vector, matrix, array or struct value.
pub fn is_composite(m: &Module, ty: GlobalId) -> bool {
    m.type_data(ty).is_composite()
}

/// Anything a `CopyObject` or `Select` can carry: no pointers, no
/// functions, no void.
pub fn is_data(m: &Module, ty: GlobalId) -> bool {
    !matches!(
        m.type_data(ty),
        TypeData::Void | TypeData::Pointer { .. } | TypeData::Function { .. }
    )
}

/// Base scalar width.
pub fn base_width(m: &Module, ty: GlobalId) -> Option<u32> {
    m.type_data(m.base_type(ty)).scalar_width()
}

/// Integer signedness the opcode's sign marker asks for, if any.
pub fn required_signedness(kind: OpKind) -> Option<bool> {
    let traits = kind.traits();
    if traits.contains(OpTraits::SIGNED) {
        Some(true)
    } else if traits.contains(OpTraits::UNSIGNED) {
        Some(false)
    } else {
        None
    }
}

/// Integer-like with the signedness `kind`'s marker requires.
pub fn int_like_for(kind: OpKind) -> impl Fn(&Module, GlobalId) -> bool {
    let sign = required_signedness(kind);
    move |m, ty| {
        is_int_like(m, ty)
            && sign.map_or(true, |s| m.type_data(m.base_type(ty)).signedness() == Some(s))
    }
}

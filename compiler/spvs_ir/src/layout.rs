//! Externally visible buffer layout.
//!
//! An execution harness needs to know, for every `StorageBuffer` variable,
//! where to bind it and how its bytes are laid out so it can synthesize
//! input data. Members are restricted to 32-bit-or-wider numeric scalars
//! and vectors, laid out with std430 rules.

use serde::Serialize;

use crate::annotation::{Annotation, Decoration};
use crate::module::Module;
use crate::shader::Shader;
use crate::types::{StorageClass, TypeData};
use crate::GlobalId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Int,
    Uint,
    Float,
}

/// One member of a buffer block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemberLayout {
    pub kind: ScalarKind,
    /// Bits per component.
    pub width: u32,
    pub components: u32,
    /// Byte offset within the block.
    pub offset: u32,
}

/// One `StorageBuffer` variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BufferLayout {
    pub descriptor_set: u32,
    pub binding: u32,
    pub members: Vec<MemberLayout>,
    /// Block size in bytes, rounded up to the block alignment.
    pub size: u32,
}

/// Size and alignment in bytes of a scalar or vector member.
fn size_align(module: &Module, ty: GlobalId) -> Option<(u32, u32)> {
    match *module.type_data(ty) {
        TypeData::Int { width, .. } | TypeData::Float { width } => Some((width / 8, width / 8)),
        TypeData::Vector { element, count } => {
            let scalar = module.type_data(element).scalar_width()? / 8;
            // vec3 aligns like vec4
            let align = if count == 2 { 2 * scalar } else { 4 * scalar };
            Some((count * scalar, align))
        }
        _ => None,
    }
}

fn align_up(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}

/// std430 offsets of struct members, or `None` if a member is not a
/// numeric scalar or vector.
pub fn std430_offsets(module: &Module, members: &[GlobalId]) -> Option<Vec<u32>> {
    let mut offset = 0;
    let mut offsets = Vec::with_capacity(members.len());
    for &member in members {
        let (size, align) = size_align(module, member)?;
        offset = align_up(offset, align);
        offsets.push(offset);
        offset += size;
    }
    Some(offsets)
}

fn member_layout(module: &Module, ty: GlobalId, offset: u32) -> Option<MemberLayout> {
    let base = module.base_type(ty);
    let (kind, width) = match *module.type_data(base) {
        TypeData::Int {
            width,
            signed: true,
        } => (ScalarKind::Int, width),
        TypeData::Int {
            width,
            signed: false,
        } => (ScalarKind::Uint, width),
        TypeData::Float { width } => (ScalarKind::Float, width),
        _ => return None,
    };
    Some(MemberLayout {
        kind,
        width,
        components: module.component_count(ty),
        offset,
    })
}

impl Shader {
    /// `StorageBuffer` variables in binding order.
    pub fn external_buffers(&self) -> Vec<BufferLayout> {
        let module = &self.module;
        let mut buffers: Vec<BufferLayout> = module
            .globals
            .variables()
            .filter(|(_, v)| v.storage == StorageClass::StorageBuffer)
            .filter_map(|(id, v)| {
                let (_, block) = module.pointee(v.ty)?;
                buffer_layout(module, id, block)
            })
            .collect();
        buffers.sort_by_key(|b| (b.descriptor_set, b.binding));
        buffers
    }
}

fn buffer_layout(module: &Module, var: GlobalId, block: GlobalId) -> Option<BufferLayout> {
    let TypeData::Struct { members: member_types } = module.type_data(block) else {
        return None;
    };

    let mut descriptor_set = 0;
    let mut binding = 0;
    let mut offsets = vec![0; member_types.len()];
    for annotation in module.annotations() {
        match *annotation {
            Annotation::Decorate {
                target,
                decoration: Decoration::DescriptorSet(set),
            } if target == var => descriptor_set = set,
            Annotation::Decorate {
                target,
                decoration: Decoration::Binding(b),
            } if target == var => binding = b,
            Annotation::MemberDecorate {
                target,
                member,
                decoration: Decoration::Offset(offset),
            } if target == block => {
                if let Some(slot) = offsets.get_mut(member as usize) {
                    *slot = offset;
                }
            }
            _ => {}
        }
    }

    let members = member_types
        .iter()
        .zip(&offsets)
        .map(|(&ty, &offset)| member_layout(module, ty, offset))
        .collect::<Option<Vec<_>>>()?;

    let mut end = 0;
    let mut block_align = 1;
    for (&ty, &offset) in member_types.iter().zip(&offsets) {
        if let Some((size, align)) = size_align(module, ty) {
            end = end.max(offset + size);
            block_align = block_align.max(align);
        }
    }

    Some(BufferLayout {
        descriptor_set,
        binding,
        members,
        size: align_up(end, block_align),
    })
}

#[cfg(test)]
mod tests;

use pretty_assertions::assert_eq;

use super::*;
use crate::op::OpKind;
use crate::{Instr, Operand, VariableData};

fn vector(module: &mut Module, element: GlobalId, count: u32) -> GlobalId {
    module
        .intern_type(TypeData::Vector { element, count })
        .id
}

#[test]
fn std430_aligns_vec3_like_vec4() {
    let mut m = Module::new();
    let float = m.intern_type(TypeData::Float { width: 32 }).id;
    let uint = m.int_type(32, false);
    let v2 = vector(&mut m, float, 2);
    let v3 = vector(&mut m, float, 3);

    let offsets = std430_offsets(&m, &[float, v3, uint, v2]).unwrap();
    // float at 0, vec3 aligned to 16, uint right after the vec3, vec2 aligned to 8
    assert_eq!(offsets, vec![0, 16, 28, 32]);
}

#[test]
fn std430_doubles_for_wide_scalars() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let double = m.intern_type(TypeData::Float { width: 64 }).id;
    let dv2 = vector(&mut m, double, 2);

    let offsets = std430_offsets(&m, &[int, double, int, dv2]).unwrap();
    assert_eq!(offsets, vec![0, 8, 16, 32]);
}

#[test]
fn std430_rejects_non_numeric_members() {
    let mut m = Module::new();
    let boolean = m.bool_type();
    assert_eq!(std430_offsets(&m, &[boolean]), None);
}

fn buffer(m: &mut Module, members: Vec<GlobalId>, binding: u32, serial: u32) -> GlobalId {
    let offsets = std430_offsets(m, &members).unwrap();
    let block = m.intern_type(TypeData::Struct { members }).id;
    let ptr = m.pointer_type(StorageClass::StorageBuffer, block);
    let var = m
        .intern_variable(VariableData {
            ty: ptr,
            storage: StorageClass::StorageBuffer,
            initializer: None,
            serial,
        })
        .id;
    m.annotate(Annotation::Decorate {
        target: block,
        decoration: Decoration::Block,
    });
    for (member, offset) in (0..).zip(offsets) {
        m.annotate(Annotation::MemberDecorate {
            target: block,
            member,
            decoration: Decoration::Offset(offset),
        });
    }
    m.annotate(Annotation::Decorate {
        target: var,
        decoration: Decoration::DescriptorSet(0),
    });
    m.annotate(Annotation::Decorate {
        target: var,
        decoration: Decoration::Binding(binding),
    });
    var
}

#[test]
fn external_buffers_in_binding_order() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let uint = m.int_type(32, false);
    let float = m.intern_type(TypeData::Float { width: 32 }).id;
    let v4 = vector(&mut m, float, 4);

    buffer(&mut m, vec![v4, uint], 1, 0);
    buffer(&mut m, vec![int], 0, 1);

    let func = m.alloc(Instr::new(OpKind::Function, None, [Operand::Keyword("None")]));
    let shader = Shader::new(m, vec![func], func);
    let buffers = shader.external_buffers();

    assert_eq!(
        buffers,
        vec![
            BufferLayout {
                descriptor_set: 0,
                binding: 0,
                members: vec![MemberLayout {
                    kind: ScalarKind::Int,
                    width: 32,
                    components: 1,
                    offset: 0,
                }],
                size: 4,
            },
            BufferLayout {
                descriptor_set: 0,
                binding: 1,
                members: vec![
                    MemberLayout {
                        kind: ScalarKind::Float,
                        width: 32,
                        components: 4,
                        offset: 0,
                    },
                    MemberLayout {
                        kind: ScalarKind::Uint,
                        width: 32,
                        components: 1,
                        offset: 16,
                    },
                ],
                size: 32,
            },
        ]
    );
}

#[test]
fn private_variables_are_not_external() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let ptr = m.pointer_type(StorageClass::Private, int);
    m.intern_variable(VariableData {
        ty: ptr,
        storage: StorageClass::Private,
        initializer: None,
        serial: 0,
    });
    let func = m.alloc(Instr::new(OpKind::Function, None, []));
    let shader = Shader::new(m, vec![func], func);
    assert!(shader.external_buffers().is_empty());
}

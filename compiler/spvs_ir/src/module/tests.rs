use pretty_assertions::assert_eq;

use super::*;
use crate::op::OpKind;

#[test]
fn base_type_unwraps_vectors_and_matrices() {
    let mut m = Module::new();
    let float = m.intern_type(TypeData::Float { width: 32 }).id;
    let vec3 = m
        .intern_type(TypeData::Vector {
            element: float,
            count: 3,
        })
        .id;
    let mat = m
        .intern_type(TypeData::Matrix {
            column: vec3,
            count: 4,
        })
        .id;

    assert_eq!(m.base_type(float), float);
    assert_eq!(m.base_type(vec3), float);
    assert_eq!(m.base_type(mat), float);
    assert_eq!(m.element_type(mat), Some(vec3));
    assert_eq!(m.component_count(vec3), 3);
    assert_eq!(m.component_count(mat), 4);
    assert_eq!(m.component_count(float), 1);
}

#[test]
fn array_length_comes_from_its_constant() {
    let mut m = Module::new();
    let uint = m.int_type(32, false);
    let len = m.int_constant(uint, 5);
    let arr = m
        .intern_type(TypeData::Array {
            element: uint,
            length: len,
        })
        .id;

    assert_eq!(m.constant_u64(len), Some(5));
    assert_eq!(m.component_count(arr), 5);
    assert_eq!(m.member_type(arr, 4), Some(uint));
    assert_eq!(m.member_type(arr, 5), None);
}

#[test]
fn signed_int_constants_use_signed_literals() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let c = m.int_constant(int, 3);
    assert_eq!(
        m.constant(c),
        Some(&ConstData::Scalar {
            ty: int,
            value: LitValue::Int(3),
        })
    );
}

#[test]
fn same_shape_compares_kind_count_and_width() {
    let mut m = Module::new();
    let i32s = m.int_type(32, true);
    let u32s = m.int_type(32, false);
    let i64s = m.int_type(64, true);
    let f32s = m.intern_type(TypeData::Float { width: 32 }).id;
    let v2 = m
        .intern_type(TypeData::Vector {
            element: i32s,
            count: 2,
        })
        .id;
    let v3 = m
        .intern_type(TypeData::Vector {
            element: i32s,
            count: 3,
        })
        .id;
    let uv2 = m
        .intern_type(TypeData::Vector {
            element: u32s,
            count: 2,
        })
        .id;

    assert!(m.same_shape(i32s, u32s));
    assert!(!m.same_shape(i32s, i64s));
    assert!(!m.same_shape(i32s, f32s));
    assert!(!m.same_shape(v2, v3));
    assert!(m.same_shape(v2, uv2));
    assert!(!m.same_shape(v2, i32s));
}

#[test]
fn type_of_values() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let c = m.int_constant(int, 1);
    let ptr = m.pointer_type(StorageClass::Private, int);
    let var = m
        .intern_variable(VariableData {
            ty: ptr,
            storage: StorageClass::Private,
            initializer: Some(c),
            serial: 0,
        })
        .id;
    let add = m.alloc(Instr::new(
        OpKind::IAdd,
        Some(int),
        [crate::Operand::value(c), crate::Operand::value(c)],
    ));

    assert_eq!(m.type_of(ValueRef::Global(c)), Some(int));
    assert_eq!(m.type_of(ValueRef::Global(var)), Some(ptr));
    assert_eq!(m.type_of(ValueRef::Instr(add)), Some(int));
    assert_eq!(m.type_of(ValueRef::Global(int)), None);
    assert_eq!(m.pointee(ptr), Some((StorageClass::Private, int)));
}

#[test]
fn ext_imports_are_registered_once() {
    let mut m = Module::new();
    let a = m.ext_import(crate::GLSL_STD_450);
    let b = m.ext_import(crate::GLSL_STD_450);
    assert_eq!(a, b);
    assert_eq!(m.ext_imports(), &[crate::GLSL_STD_450]);
}

#[test]
fn block_decoration_lookup() {
    let mut m = Module::new();
    let int = m.int_type(32, true);
    let block = m.intern_type(TypeData::Struct { members: vec![int] }).id;
    assert!(!m.is_block(block));
    m.annotate(Annotation::Decorate {
        target: block,
        decoration: Decoration::Block,
    });
    assert!(m.is_block(block));
    assert!(!m.is_block(int));
}

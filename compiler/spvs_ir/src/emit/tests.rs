use pretty_assertions::assert_eq;

use super::*;
use crate::op::OpKind;
use crate::types::{Capability, StorageClass};
use crate::{Decoration, GlslOp, Module, GLSL_STD_450};

/// `void main() { %7 = 5 + 5; }`
fn small_shader() -> Shader {
    let mut m = Module::new();
    let void = m.void_type();
    let fn_ty = m
        .intern_type(TypeData::Function {
            ret: void,
            params: vec![],
        })
        .id;
    let int = m.int_type(32, true);
    let five = m.int_constant(int, 5);

    let func = m.alloc(Instr::new(
        OpKind::Function,
        Some(void),
        [Operand::Keyword("None"), Operand::value(fn_ty)],
    ));
    let label = m.alloc(Instr::new(OpKind::Label, None, []));
    let add = m.alloc(Instr::new(
        OpKind::IAdd,
        Some(int),
        [Operand::value(five), Operand::value(five)],
    ));
    let ret = m.alloc(Instr::new(OpKind::Return, None, []));
    let end = m.alloc(Instr::new(OpKind::FunctionEnd, None, []));

    Shader::new(m, vec![func, label, add, ret, end], func)
}

#[test]
fn emits_sections_in_layout_order() {
    let mut shader = small_shader();
    shader.assign_ids();
    let text = shader.to_text().unwrap();

    let expected = "\
; SPIR-V
; Version: 1.3
; Generator: spvs; 0
; Bound: 9
; Schema: 0
OpCapability Shader
OpMemoryModel Logical GLSL450
OpEntryPoint GLCompute %5 \"main\"
OpExecutionMode %5 LocalSize 1 1 1
%1 = OpTypeVoid
%2 = OpTypeFunction %1
%3 = OpTypeInt 32 1
%4 = OpConstant %3 5
%5 = OpFunction %1 None %2
%6 = OpLabel
%7 = OpIAdd %3 %4 %4
OpReturn
OpFunctionEnd
";
    assert_eq!(text, expected);
}

#[test]
fn ext_imports_are_numbered_first() {
    let mut shader = small_shader();
    let set = shader.module.ext_import(GLSL_STD_450);
    let float = shader.module.intern_type(TypeData::Float { width: 32 }).id;
    let one = shader.module.intern_constant(crate::ConstData::Scalar {
        ty: float,
        value: crate::LitValue::float(1.5),
    });
    let sin = shader.module.alloc(Instr::new(
        OpKind::ExtInst,
        Some(float),
        [
            Operand::ExtSet(set),
            Operand::ExtOp(GlslOp::Sin),
            Operand::value(one.id),
        ],
    ));
    shader.body_mut().insert(3, sin);
    shader.assign_ids();

    let text = shader.to_text().unwrap();
    assert!(text.contains("%1 = OpExtInstImport \"GLSL.std.450\"\n"));
    assert!(text.contains("%2 = OpTypeVoid\n"));
    assert!(text.contains("%6 = OpTypeFloat 32\n"));
    assert!(text.contains("%7 = OpConstant %6 1.5\n"));
    assert!(text.contains("= OpExtInst %6 %1 Sin %7\n"));
}

#[test]
fn capabilities_come_from_global_types() {
    let mut shader = small_shader();
    assert_eq!(shader.capabilities(), vec![Capability::Shader]);
    shader.module.intern_type(TypeData::Float { width: 64 });
    shader.module.int_type(64, false);
    assert_eq!(
        shader.capabilities(),
        vec![Capability::Shader, Capability::Int64, Capability::Float64]
    );
}

#[test]
fn annotations_and_variables() {
    let mut shader = small_shader();
    let m = &mut shader.module;
    let int = m.int_type(32, true);
    let block = m.intern_type(TypeData::Struct { members: vec![int] }).id;
    let ptr = m.pointer_type(StorageClass::StorageBuffer, block);
    let var = m
        .intern_variable(crate::VariableData {
            ty: ptr,
            storage: StorageClass::StorageBuffer,
            initializer: None,
            serial: 0,
        })
        .id;
    m.annotate(Annotation::Decorate {
        target: block,
        decoration: Decoration::Block,
    });
    m.annotate(Annotation::MemberDecorate {
        target: block,
        member: 0,
        decoration: Decoration::Offset(0),
    });
    m.annotate(Annotation::Decorate {
        target: var,
        decoration: Decoration::Binding(3),
    });
    shader.assign_ids();

    let text = shader.to_text().unwrap();
    assert!(text.contains("OpDecorate %5 Block\n"));
    assert!(text.contains("OpMemberDecorate %5 0 Offset 0\n"));
    assert!(text.contains("OpDecorate %7 Binding 3\n"));
    assert!(text.contains("%6 = OpTypePointer StorageBuffer %5\n"));
    assert!(text.contains("%7 = OpVariable %6 StorageBuffer\n"));

    let decorate = text.find("OpDecorate").unwrap();
    let first_type = text.find("OpTypeVoid").unwrap();
    assert!(decorate < first_type);
}

#[test]
fn emitting_requires_ids() {
    let mut shader = small_shader();
    assert_eq!(shader.to_text(), Err(EmitError::IdsNotAssigned));

    shader.assign_ids();
    assert!(shader.to_text().is_ok());

    shader.body_mut();
    assert_eq!(shader.to_text(), Err(EmitError::IdsNotAssigned));
}

#[test]
fn references_outside_the_stream_are_reported() {
    let mut shader = small_shader();
    let int = shader.module.int_type(32, true);
    let orphan = shader
        .module
        .alloc(Instr::new(OpKind::CopyObject, Some(int), []));
    let user = shader.module.alloc(Instr::new(
        OpKind::CopyObject,
        Some(int),
        [Operand::value(orphan)],
    ));
    shader.body_mut().insert(3, user);
    shader.assign_ids();

    assert_eq!(shader.to_text(), Err(EmitError::UnassignedInstr(orphan)));
}

#[test]
fn ids_are_dense_and_ordered() {
    let mut shader = small_shader();
    shader.assign_ids();
    let ids = shader.ids().unwrap();
    let body: Vec<u32> = shader
        .body()
        .iter()
        .map(|&i| ids.instr(i).unwrap())
        .collect();
    assert_eq!(body, vec![5, 6, 7, 8, 9]);
    assert_eq!(ids.next_id(), 10);
}

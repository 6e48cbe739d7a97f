use pretty_assertions::assert_eq;
use spvs_ir::{ConstData, LitValue, TypeData};

use super::*;

/// `%e = OpVectorExtractDynamic %float %v %i` with `%i` an integer
/// statement, wrapped in a minimal function.
fn shader_with_extract(signed: bool) -> (Shader, InstrId) {
    let mut m = Module::new();
    let void = m.void_type();
    let fn_ty = m
        .intern_type(TypeData::Function {
            ret: void,
            params: vec![],
        })
        .id;
    let float = m.intern_type(TypeData::Float { width: 32 }).id;
    let vec3 = m
        .intern_type(TypeData::Vector {
            element: float,
            count: 3,
        })
        .id;
    let one = m
        .intern_constant(ConstData::Scalar {
            ty: float,
            value: LitValue::float(1.0),
        })
        .id;
    let v = m
        .intern_constant(ConstData::Composite {
            ty: vec3,
            parts: vec![one; 3],
        })
        .id;
    let int = m.int_type(32, signed);
    let seven = m.int_constant(int, 7);

    let func = m.alloc(Instr::new(
        OpKind::Function,
        Some(void),
        [Operand::Keyword("None"), Operand::value(fn_ty)],
    ));
    let label = m.alloc(Instr::new(OpKind::Label, None, []));
    let index = m.alloc(Instr::new(
        OpKind::IAdd,
        Some(int),
        [Operand::value(seven), Operand::value(seven)],
    ));
    let extract = m.alloc(Instr::new(
        OpKind::VectorExtractDynamic,
        Some(float),
        [Operand::value(v), Operand::value(index)],
    ));
    let ret = m.alloc(Instr::new(OpKind::Return, None, []));
    let end = m.alloc(Instr::new(OpKind::FunctionEnd, None, []));
    let shader = Shader::new(m, vec![func, label, index, extract, ret, end], func);
    (shader, extract)
}

#[test]
fn dynamic_index_is_wrapped_in_a_modulo() {
    let (mut shader, extract) = shader_with_extract(true);
    assert_eq!(recondition(&mut shader), 1);

    let body = shader.body();
    assert_eq!(body.len(), 7);
    let pos = body.iter().position(|&id| id == extract).unwrap();
    let clamp = body[pos - 1];
    let clamp_instr = shader.module.instr(clamp);
    assert_eq!(clamp_instr.kind, OpKind::SMod);

    let length = clamp_instr.operands[1].as_value().unwrap();
    let ValueRef::Global(length) = length else {
        panic!("length is a constant");
    };
    assert_eq!(shader.module.constant_u64(length), Some(3));
    assert_eq!(
        shader.module.instr(extract).operands[1],
        Operand::Value(ValueRef::Instr(clamp))
    );
}

#[test]
fn unsigned_index_uses_umod() {
    let (mut shader, extract) = shader_with_extract(false);
    recondition(&mut shader);
    let ValueRef::Instr(clamp) = shader.module.instr(extract).operands[1]
        .as_value()
        .unwrap()
    else {
        panic!("index is a statement");
    };
    assert_eq!(shader.module.instr(clamp).kind, OpKind::UMod);
}

#[test]
fn second_pass_changes_nothing() {
    let (mut shader, _) = shader_with_extract(true);
    recondition(&mut shader);
    let once = shader.body().to_vec();
    assert_eq!(recondition(&mut shader), 0);
    assert_eq!(shader.body(), &once[..]);
}

#[test]
fn reconditioned_shader_still_emits() {
    let (mut shader, _) = shader_with_extract(true);
    recondition(&mut shader);
    shader.assign_ids();
    let text = shader.to_text().unwrap();
    assert!(text.contains("OpSMod"), "{text}");
}

#[test]
fn other_instructions_are_untouched() {
    let (mut shader, _) = shader_with_extract(true);
    let before: Vec<OpKind> = shader
        .body()
        .iter()
        .map(|&id| shader.module.instr(id).kind)
        .collect();
    recondition(&mut shader);
    let after: Vec<OpKind> = shader
        .body()
        .iter()
        .map(|&id| shader.module.instr(id).kind)
        .filter(|&k| k != OpKind::SMod)
        .collect();
    assert_eq!(before, after);
}

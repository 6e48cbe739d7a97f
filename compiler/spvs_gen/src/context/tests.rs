use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(3)
}

/// An `IAdd` of type `ty` declared in `scope`.
fn declare_add(ctx: &mut Context, scope: ScopeId, ty: GlobalId) -> InstrId {
    let id = ctx.module.alloc(Instr::new(OpKind::IAdd, Some(ty), []));
    ctx.declare(scope, id);
    id
}

#[test]
fn depth_counts_hops_to_root() {
    let mut ctx = Context::new();
    let func = ctx.module.alloc(Instr::new(OpKind::Label, None, []));
    let body = ctx.make_child_scope(ScopeId::ROOT, Some(func));
    let arm = ctx.make_child_scope(body, None);

    assert_eq!(ctx.depth(ScopeId::ROOT), 0);
    assert_eq!(ctx.depth(body), 1);
    assert_eq!(ctx.depth(arm), 2);
    assert_eq!(ctx.parent(arm), Some(body));
    assert_eq!(ctx.function(arm), Some(func));
    assert_eq!(ctx.function(ScopeId::ROOT), None);
}

#[test]
fn statements_are_visible_from_descendants_only() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let body = ctx.make_child_scope(ScopeId::ROOT, None);
    let then_arm = ctx.make_child_scope(body, None);
    let else_arm = ctx.make_child_scope(body, None);

    let outer = declare_add(&mut ctx, body, int);
    let inner = declare_add(&mut ctx, then_arm, int);

    let all = |_: &Module, _: GlobalId| true;
    assert_eq!(
        ctx.get_statements(then_arm, all),
        vec![ValueRef::Instr(inner), ValueRef::Instr(outer)]
    );
    assert_eq!(ctx.get_statements(else_arm, all), vec![ValueRef::Instr(outer)]);
    assert_eq!(ctx.get_statements(body, all), vec![ValueRef::Instr(outer)]);
    assert!(ctx.get_statements(ScopeId::ROOT, all).is_empty());
}

#[test]
fn untyped_statements_are_never_operands() {
    let mut ctx = Context::new();
    let body = ctx.make_child_scope(ScopeId::ROOT, None);
    let store = ctx.module.alloc(Instr::new(OpKind::Store, None, []));
    ctx.declare(body, store);
    assert!(ctx.get_statements(body, |_, _| true).is_empty());
}

#[test]
fn random_operand_draws_from_statements_and_constants() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let float = ctx.add_to_global_table(TypeData::Float { width: 32 }).id;
    let five = ctx.module.int_constant(int, 5);
    let body = ctx.make_child_scope(ScopeId::ROOT, None);
    let add = declare_add(&mut ctx, body, int);

    let mut rng = rng();
    let mut seen = Vec::new();
    for _ in 0..64 {
        let v = ctx
            .get_random_operand(body, &mut rng, |_, ty| ty == int, None)
            .unwrap();
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen.sort_by_key(|v| matches!(v, ValueRef::Instr(_)));
    assert_eq!(seen, vec![ValueRef::Global(five), ValueRef::Instr(add)]);

    assert_eq!(
        ctx.get_random_operand(body, &mut rng, move |_, ty| ty == float, None),
        None
    );
}

#[test]
fn shape_constraint_filters_operands() {
    let mut ctx = Context::new();
    let i32_ = ctx.module.int_type(32, true);
    let u32_ = ctx.module.int_type(32, false);
    let i64_ = ctx.module.int_type(64, true);
    let wide = ctx.module.int_constant(i64_, 1);
    let narrow = ctx.module.int_constant(u32_, 1);

    let mut rng = rng();
    for _ in 0..16 {
        let v = ctx
            .get_random_operand(ScopeId::ROOT, &mut rng, |_, _| true, Some(i32_))
            .unwrap();
        assert_eq!(v, ValueRef::Global(narrow));
    }
    let unconstrained: Vec<ValueRef> = (0..64)
        .filter_map(|_| ctx.get_random_operand(ScopeId::ROOT, &mut rng, |_, _| true, None))
        .collect();
    assert!(unconstrained.contains(&ValueRef::Global(wide)));
}

#[test]
fn on_demand_constant_interns_its_type() {
    let mut ctx = Context::new();
    let c = ctx.create_on_demand_numeric_constant(
        NumericKind::Int { signed: false },
        LitValue::UInt(4),
        32,
    );
    let again = ctx.create_on_demand_numeric_constant(
        NumericKind::Int { signed: false },
        LitValue::UInt(4),
        32,
    );
    assert_eq!(c, again);
    assert_eq!(ctx.types().len(), 1);
    assert_eq!(ctx.module.constant_u64(c), Some(4));
}

#[test]
fn zero_constants_nest() {
    let mut ctx = Context::new();
    let float = ctx.add_to_global_table(TypeData::Float { width: 32 }).id;
    let vec3 = ctx
        .add_to_global_table(TypeData::Vector {
            element: float,
            count: 3,
        })
        .id;
    let zero = ctx.zero_constant(vec3).unwrap();
    let Some(ConstData::Composite { parts, .. }) = ctx.module.constant(zero) else {
        panic!("expected a composite");
    };
    assert_eq!(parts.len(), 3);
    assert!(parts.iter().all(|&p| p == parts[0]));

    let void = ctx.module.void_type();
    assert_eq!(ctx.zero_constant(void), None);
}

#[test]
fn variables_are_initialized() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let mut rng = rng();

    let private = ctx
        .create_on_demand_variable(StorageClass::Private, int, &mut rng)
        .unwrap();
    let ValueRef::Global(private) = private else {
        panic!("private variables live in the global table");
    };
    let data = ctx.module.variable(private).unwrap();
    assert_eq!(data.storage, StorageClass::Private);
    assert!(data.initializer.is_some());

    let local = ctx
        .create_on_demand_variable(StorageClass::Function, int, &mut rng)
        .unwrap();
    let ValueRef::Instr(local) = local else {
        panic!("function variables are instructions");
    };
    let instr = ctx.module.instr(local);
    assert_eq!(instr.kind, OpKind::Variable);
    assert_eq!(instr.operands.len(), 2);
}

#[test]
fn equal_variables_stay_distinct() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let mut rng = rng();
    let a = ctx.create_on_demand_variable(StorageClass::Private, int, &mut rng);
    let b = ctx.create_on_demand_variable(StorageClass::Private, int, &mut rng);
    assert_ne!(a, b);
    assert_eq!(ctx.get_global_variables().len(), 2);
}

#[test]
fn storage_buffers_have_no_initializer() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let block = ctx
        .add_to_global_table(TypeData::Struct { members: vec![int] })
        .id;
    let Some(ValueRef::Global(var)) =
        ctx.create_on_demand_variable(StorageClass::StorageBuffer, block, &mut rng())
    else {
        panic!("expected a global variable");
    };
    assert_eq!(ctx.module.variable(var).unwrap().initializer, None);
}

#[test]
fn local_variables_are_found_through_ancestors() {
    let mut ctx = Context::new();
    let int = ctx.module.int_type(32, true);
    let body = ctx.make_child_scope(ScopeId::ROOT, None);
    let arm = ctx.make_child_scope(body, None);
    let Some(ValueRef::Instr(var)) =
        ctx.create_on_demand_variable(StorageClass::Function, int, &mut rng())
    else {
        panic!("expected an instruction");
    };
    ctx.declare(body, var);
    assert_eq!(ctx.get_local_variables(arm), vec![var]);
}

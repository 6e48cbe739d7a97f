use super::*;

#[test]
fn names_carry_op_prefix() {
    assert_eq!(OpKind::IAdd.name(), "OpIAdd");
    assert_eq!(OpKind::TypeFunction.name(), "OpTypeFunction");
    assert_eq!(OpKind::ExtInst.to_string(), "OpExtInst");
}

#[test]
fn void_ops_are_untyped() {
    for &kind in OpKind::ALL {
        if !kind.has_result() {
            assert!(!kind.is_typed(), "{kind} has no result but is typed");
        }
    }
    assert!(!OpKind::Store.has_result());
    assert!(OpKind::Label.has_result());
    assert!(!OpKind::Label.is_typed());
    assert!(OpKind::Load.is_typed());
}

#[test]
fn sign_markers_are_exclusive() {
    for &kind in OpKind::ALL {
        let traits = kind.traits();
        assert!(
            !(traits.contains(OpTraits::SIGNED) && traits.contains(OpTraits::UNSIGNED)),
            "{kind} is both signed and unsigned"
        );
    }
    assert!(OpKind::SDiv.traits().contains(OpTraits::SIGNED));
    assert!(OpKind::UMod.traits().contains(OpTraits::UNSIGNED));
    assert!(OpKind::IAdd.traits().is_empty());
}

#[test]
fn statements_are_statement_families() {
    for &kind in Category::Statement.members() {
        assert!(
            !matches!(kind.family(), Family::Type | Family::Constant | Family::Function),
            "{kind} sampled as a statement"
        );
    }
    assert!(!Category::Statement.members().contains(&OpKind::Label));
    assert!(!Category::Statement.members().contains(&OpKind::Return));
    assert!(Category::Statement.members().contains(&OpKind::SelectionMerge));
}

#[test]
fn type_categories_only_hold_types() {
    let type_categories = [
        Category::Type,
        Category::ScalarType,
        Category::NumericType,
        Category::ArithmeticType,
        Category::ContainerType,
        Category::ArrayElementType,
        Category::StructMemberType,
    ];
    for category in type_categories {
        assert!(category.is_type());
        for &kind in category.members() {
            assert_eq!(kind.family(), Family::Type, "{kind} in {category}");
        }
    }
    assert!(!Category::Constant.is_type());
    assert!(!Category::Statement.is_type());
}

#[test]
fn void_and_pointer_are_never_sampled() {
    let all = Category::Type.members();
    assert!(!all.contains(&OpKind::TypeVoid));
    assert!(!all.contains(&OpKind::TypePointer));
}

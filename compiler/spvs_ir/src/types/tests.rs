use super::*;

#[test]
fn capabilities_follow_widths() {
    assert_eq!(Capability::for_int_width(8), Some(Capability::Int8));
    assert_eq!(Capability::for_int_width(16), Some(Capability::Int16));
    assert_eq!(Capability::for_int_width(32), None);
    assert_eq!(Capability::for_int_width(64), Some(Capability::Int64));
    assert_eq!(Capability::for_float_width(16), Some(Capability::Float16));
    assert_eq!(Capability::for_float_width(32), None);
    assert_eq!(Capability::for_float_width(64), Some(Capability::Float64));
}

#[test]
fn required_capabilities_only_from_own_width() {
    let int64 = TypeData::Int {
        width: 64,
        signed: true,
    };
    assert_eq!(int64.required_capabilities(), Some(Capability::Int64));
    assert_eq!(
        TypeData::Float { width: 64 }.required_capabilities(),
        Some(Capability::Float64)
    );

    // A vector of 64-bit elements relies on its element's entry.
    let vector = TypeData::Vector {
        element: GlobalId::new(0),
        count: 4,
    };
    assert_eq!(vector.required_capabilities(), None);
    assert_eq!(TypeData::Bool.required_capabilities(), None);
}

#[test]
fn classification() {
    let int = TypeData::Int {
        width: 32,
        signed: false,
    };
    assert!(int.is_scalar());
    assert!(int.is_numeric_scalar());
    assert!(!int.is_composite());
    assert_eq!(int.scalar_width(), Some(32));
    assert_eq!(int.signedness(), Some(false));

    assert!(TypeData::Bool.is_scalar());
    assert!(!TypeData::Bool.is_numeric_scalar());
    assert_eq!(TypeData::Bool.scalar_width(), None);

    let strukt = TypeData::Struct {
        members: vec![GlobalId::new(1)],
    };
    assert!(strukt.is_composite());
    assert!(!strukt.is_scalar());
    assert_eq!(TypeData::Float { width: 16 }.signedness(), None);
}

#[test]
fn kinds_name_their_opcode() {
    assert_eq!(TypeData::Void.kind(), OpKind::TypeVoid);
    assert_eq!(
        TypeData::Pointer {
            storage: StorageClass::Private,
            pointee: GlobalId::new(0),
        }
        .kind()
        .name(),
        "OpTypePointer"
    );
}

#[test]
fn structural_equality_ignores_nothing_but_identity() {
    let a = TypeData::Int {
        width: 32,
        signed: true,
    };
    let b = TypeData::Int {
        width: 32,
        signed: true,
    };
    let c = TypeData::Int {
        width: 32,
        signed: false,
    };
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn storage_class_tokens() {
    assert_eq!(StorageClass::Function.to_string(), "Function");
    assert_eq!(StorageClass::Private.to_string(), "Private");
    assert_eq!(StorageClass::StorageBuffer.to_string(), "StorageBuffer");
}

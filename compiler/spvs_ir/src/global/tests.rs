use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn int(width: u32, signed: bool) -> TypeData {
    TypeData::Int { width, signed }
}

#[test]
fn equal_types_share_a_slot() {
    let mut table = GlobalTable::new();

    let first = table.intern(int(32, true));
    assert!(first.inserted);
    assert_eq!(table.len(), 1);

    let second = table.intern(int(32, true));
    assert!(!second.inserted);
    assert_eq!(second.id, first.id);
    assert_eq!(table.len(), 1);

    let unsigned = table.intern(int(32, false));
    assert!(unsigned.inserted);
    assert_ne!(unsigned.id, first.id);
    assert_eq!(table.len(), 2);
}

#[test]
fn equal_containers_share_a_slot() {
    let mut table = GlobalTable::new();
    let float = table.intern(TypeData::Float { width: 32 }).id;

    let a = table.intern(TypeData::Vector {
        element: float,
        count: 3,
    });
    let b = table.intern(TypeData::Vector {
        element: float,
        count: 3,
    });
    assert_eq!(a.id, b.id);
    assert_eq!(table.type_count(), 2);
}

#[test]
fn constants_dedup_by_type_and_value() {
    let mut table = GlobalTable::new();
    let ty = table.intern(int(32, true)).id;

    let a = table.intern(ConstData::Scalar {
        ty,
        value: crate::LitValue::Int(7),
    });
    let b = table.intern(ConstData::Scalar {
        ty,
        value: crate::LitValue::Int(7),
    });
    let c = table.intern(ConstData::Scalar {
        ty,
        value: crate::LitValue::Int(8),
    });
    assert_eq!(a.id, b.id);
    assert_ne!(a.id, c.id);
    assert_eq!(table.constant_count(), 2);
}

#[test]
fn variables_with_distinct_serials_stay_distinct() {
    let mut table = GlobalTable::new();
    let float = table.intern(TypeData::Float { width: 32 }).id;
    let ptr = table
        .intern(TypeData::Pointer {
            storage: StorageClass::Private,
            pointee: float,
        })
        .id;

    let var = |serial| VariableData {
        ty: ptr,
        storage: StorageClass::Private,
        initializer: None,
        serial,
    };
    let a = table.intern(var(0));
    let b = table.intern(var(1));
    let again = table.intern(var(0));
    assert_ne!(a.id, b.id);
    assert_eq!(again.id, a.id);
    assert_eq!(table.variables().count(), 2);
}

#[test]
fn iteration_is_insertion_order() {
    let mut table = GlobalTable::new();
    let b = table.intern(TypeData::Bool).id;
    let i = table.intern(int(16, false)).id;
    let f = table.intern(TypeData::Float { width: 64 }).id;
    table.intern(TypeData::Bool);

    let ids: Vec<GlobalId> = table.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![b, i, f]);
    assert_eq!(table.find(&GlobalEntity::Type(int(16, false))), Some(i));
    assert_eq!(table.find(&GlobalEntity::Type(int(8, false))), None);
}

fn scalar_strategy() -> impl Strategy<Value = TypeData> {
    prop_oneof![
        Just(TypeData::Bool),
        (prop::sample::select(vec![8u32, 16, 32, 64]), any::<bool>())
            .prop_map(|(width, signed)| TypeData::Int { width, signed }),
        prop::sample::select(vec![16u32, 32, 64]).prop_map(|width| TypeData::Float { width }),
    ]
}

proptest! {
    #[test]
    fn table_never_holds_equal_entries(types in prop::collection::vec(scalar_strategy(), 1..64)) {
        let mut table = GlobalTable::new();
        for ty in &types {
            let before = table.len();
            let interned = table.intern(ty.clone());
            prop_assert_eq!(table.len(), before + usize::from(interned.inserted));
            prop_assert_eq!(table.get(interned.id), &GlobalEntity::Type(ty.clone()));
        }

        let entries: Vec<&GlobalEntity> = table.iter().map(|(_, e)| e).collect();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }
}

//! Property tests over generated descriptors.
//!
//! 1. Acyclic record graphs always synthesize, and only mention visible fields.
//! 2. Nullable slots are `null` whatever they wrap.
//! 3. Containers are their empty literal whatever they hold.
//! 4. The selector is stable and loses nothing.
//! 5. The assembler emits one constructor param, field and override per
//!    surviving member.

use proptest::prelude::*;

use crate::assemble::assemble;
use crate::model::*;
use crate::select::{partition, select};
use crate::synth::synthesize;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_primitive() -> impl Strategy<Value = Primitive> {
    prop_oneof![
        Just(Primitive::String),
        Just(Primitive::Int32),
        Just(Primitive::Int64),
        Just(Primitive::Float32),
        Just(Primitive::Float64),
        Just(Primitive::Boolean),
        Just(Primitive::Char),
        Just(Primitive::Byte),
        Just(Primitive::Int16),
        Just(Primitive::Void),
    ]
}

fn arb_type() -> impl Strategy<Value = TypeRef> {
    let leaf = prop_oneof![
        4 => arb_primitive().prop_map(TypeRef::Primitive),
        1 => prop::sample::select(&["Order", "Node", "Missing"][..]).prop_map(|name| TypeRef::record(name)),
        1 => "[a-z<>]{1,4}".prop_map(TypeRef::Unresolved),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeRef::nullable),
            inner.clone().prop_map(TypeRef::list),
            inner.clone().prop_map(TypeRef::set),
            inner.clone().prop_map(TypeRef::array),
            (inner.clone(), inner).prop_map(|(k, v)| TypeRef::map(k, v)),
        ]
    })
}

#[derive(Debug, Clone)]
enum FieldShape {
    Leaf(Primitive),
    /// index into earlier records only
    Earlier(usize),
    /// any record, self included, behind a nullable
    NullableAny(usize),
}

fn arb_field_shape() -> impl Strategy<Value = FieldShape> {
    prop_oneof![
        3 => arb_primitive().prop_map(FieldShape::Leaf),
        2 => (0usize..8).prop_map(FieldShape::Earlier),
        1 => (0usize..8).prop_map(FieldShape::NullableAny),
    ]
}

/// `R0..Rn`, where a non-nullable record field only points at a lower index.
fn arb_acyclic_records() -> impl Strategy<Value = RecordTable> {
    prop::collection::vec(prop::collection::vec((arb_field_shape(), any::<bool>()), 0..5), 1..6).prop_map(
        |shapes| {
            let count = shapes.len();
            shapes
                .into_iter()
                .enumerate()
                .map(|(i, fields)| {
                    let fields = fields
                        .into_iter()
                        .enumerate()
                        .map(|(k, (shape, private))| {
                            let ty = match shape {
                                FieldShape::Leaf(p) => TypeRef::Primitive(p),
                                FieldShape::Earlier(_) if i == 0 => TypeRef::int32(),
                                FieldShape::Earlier(j) => TypeRef::record(format!("R{}", j % i)),
                                FieldShape::NullableAny(j) => TypeRef::nullable(TypeRef::record(format!("R{}", j % count))),
                            };
                            let mut field = FieldDescriptor::new(
                                if private { format!("hidden{k}") } else { format!("f{k}") },
                                ty,
                            );
                            if private {
                                field.visibility = Visibility::Private;
                            }
                            field
                        })
                        .collect();
                    RecordDeclaration::new(format!("R{i}"), fields)
                })
                .collect()
        },
    )
}

fn arb_member() -> impl Strategy<Value = MemberDescriptor> {
    (
        "[a-z][a-zA-Z]{0,6}",
        prop::collection::vec(("[a-z]{1,3}", arb_type()), 0..4),
        arb_type(),
        any::<bool>(),
        0u8..4,
        0u8..3,
        prop::option::of("[a-z0-9]{1,4}"),
    )
        .prop_map(|(name, params, ty, is_function, visibility, origin, literal)| {
            let member = if is_function {
                let params = params.into_iter().map(|(n, t)| Parameter::new(n, t)).collect();
                MemberDescriptor::function(name, params, ty)
            } else {
                MemberDescriptor::property(name, ty)
            };
            let member = member
                .with_visibility(match visibility {
                    0 => Visibility::Public,
                    1 => Visibility::Internal,
                    2 => Visibility::Protected,
                    _ => Visibility::Private,
                })
                .with_origin(match origin {
                    0 => Origin::Declared,
                    1 => Origin::Inherited("Base".into()),
                    _ => Origin::ImplicitRoot,
                });
            let member = match literal {
                Some(text) => member.with_override(text),
                None => member,
            };
            if visibility == 2 && origin == 1 { member.excluded() } else { member }
        })
}

fn arb_target() -> impl Strategy<Value = TargetDescriptor> {
    (prop::collection::vec(arb_member(), 0..10), any::<bool>()).prop_map(|(members, interface)| {
        let kind = if interface { TargetKind::Interface } else { TargetKind::AbstractClass };
        let mut target = TargetDescriptor::new("Subject", kind);
        target.members = members;
        target
    })
}

fn fixed_records() -> RecordTable {
    [
        RecordDeclaration::new("Order", vec![FieldDescriptor::new("id", TypeRef::string())]),
        RecordDeclaration::new("Node", vec![FieldDescriptor::new("next", TypeRef::record("Node"))]),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn acyclic_records_always_synthesize(records in arb_acyclic_records()) {
        for record in records.iter() {
            let literal = synthesize(&TypeRef::record(record.name.clone()), &records);
            prop_assert!(literal.is_ok(), "{:?}", literal);
            let literal = literal.unwrap();
            let opening = format!("{}(", record.name);
            prop_assert!(literal.starts_with(&opening));
            prop_assert!(!literal.contains("hidden"));
            // every argument carries a value
            prop_assert!(!literal.contains("= ,") && !literal.contains("= )"), "{}", literal);
            prop_assert_eq!(literal.matches('(').count(), literal.matches(')').count());
            for field in record.fields.iter().filter(|f| !f.visibility.is_private()) {
                let assignment = format!("{} = ", field.name);
                prop_assert!(literal.contains(&assignment));
            }
        }
    }

    #[test]
    fn nullable_is_always_null(inner in arb_type()) {
        let ty = TypeRef::nullable(inner);
        prop_assert_eq!(synthesize(&ty, &fixed_records()).unwrap(), "null");
    }

    #[test]
    fn containers_are_always_empty(element in arb_type(), value in arb_type()) {
        let records = fixed_records();
        prop_assert_eq!(synthesize(&TypeRef::list(element.clone()), &records).unwrap(), "emptyList()");
        prop_assert_eq!(synthesize(&TypeRef::set(element.clone()), &records).unwrap(), "emptySet()");
        prop_assert_eq!(synthesize(&TypeRef::array(element.clone()), &records).unwrap(), "emptyArray()");
        prop_assert_eq!(synthesize(&TypeRef::map(element, value), &records).unwrap(), "emptyMap()");
    }

    #[test]
    fn selector_is_stable_and_total(target in arb_target()) {
        let first = select(&target);
        let second = select(&target);
        prop_assert_eq!(&first, &second);

        let selection = partition(&target);
        prop_assert_eq!(selection.selected.len() + selection.skipped.len(), target.members.len());

        // once a property shows up, no function follows
        let first_property = first.iter().position(|m| !m.is_function()).unwrap_or(first.len());
        prop_assert!(first[first_property..].iter().all(|m| !m.is_function()));
    }

    #[test]
    fn assembler_counts_add_up(target in arb_target()) {
        let records = fixed_records();
        let selected = select(&target);
        let assembly = assemble(&target, &selected, &records);
        let spec = &assembly.spec;

        prop_assert_eq!(spec.constructor.len(), selected.len() - assembly.diagnostics.len());
        prop_assert_eq!(spec.fields.len(), spec.constructor.len());
        prop_assert_eq!(spec.overrides.len(), spec.constructor.len());
        prop_assert_eq!(&spec.name, "FakeSubject");
        for param in &spec.constructor {
            prop_assert!(param.name.ends_with("Fake"));
        }
    }
}

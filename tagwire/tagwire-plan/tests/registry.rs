mod test_helpers;

use std::sync::Arc;

use tagwire_core::{
    DataFormat, MemberDescriptor, PrimitiveKind, TypeDescriptor, TypeExpr, TypeShape, Value,
};
use tagwire_plan::{
    AccessorTable, ContainerKind, ElementOp, Operation, Registry, builtins::builtin_descriptors,
};
use test_helpers::*;

fn build(descriptors: Vec<TypeDescriptor>) -> Registry {
    Registry::build(descriptors, &AccessorTable::new()).expect("schema should compile")
}

#[test]
fn registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<Arc<Registry>>();
}

#[test]
fn compiles_point_and_circle() {
    let registry = build(point_circle());
    let point = registry.id("Point").unwrap();
    let circle = registry.plan_by_name("Circle").unwrap();

    assert_eq!(circle.len(), 2);
    assert!(circle.ensure_instance);
    assert_eq!(
        circle.get(1).unwrap().op,
        Operation::Message { schema: point }
    );
    assert_eq!(
        circle.get(2).unwrap().op,
        Operation::Scalar {
            kind: PrimitiveKind::F32,
            format: DataFormat::Default
        }
    );
    assert!(circle.get(3).is_none());
}

#[test]
fn declared_types_come_before_builtins() {
    let registry = build(point_circle());
    assert_eq!(registry.len(), 2 + builtin_descriptors().len());
    let names: Vec<_> = registry.plans().take(2).map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Point", "Circle"]);
    assert!(registry.id("Vector3").is_some());
    assert!(registry.id("AnimationCurve").is_some());
}

#[test]
fn declared_type_shadows_builtin() {
    let registry = build(vec![
        TypeDescriptor::message("Vector3").field(7, "packed", PrimitiveKind::Bytes),
    ]);
    let plan = registry.plan_by_name("Vector3").unwrap();
    assert_eq!(plan.shape, TypeShape::Reference);
    assert_eq!(plan.get(7).unwrap().op, Operation::Bytes);
    assert_eq!(registry.len(), builtin_descriptors().len());
}

#[test]
fn builtin_layouts() {
    let registry = build(Vec::new());
    let keyframe = registry.plan_by_name("Keyframe").unwrap();
    assert_eq!(keyframe.shape, TypeShape::Value);
    assert!(!keyframe.ensure_instance);
    let names: Vec<_> = keyframe.ops().map(|op| (op.tag, op.name.as_str())).collect();
    assert_eq!(
        names,
        vec![
            (1, "time"),
            (2, "value"),
            (3, "in_tangent"),
            (4, "out_tangent"),
            (5, "tangent_mode")
        ]
    );

    let curve = registry.plan_by_name("AnimationCurve").unwrap();
    assert_eq!(curve.shape, TypeShape::Reference);
    assert_eq!(
        curve.get(3).unwrap().op,
        Operation::Repeated {
            container: ContainerKind::Array,
            element: ElementOp::Message {
                schema: registry.id("Keyframe").unwrap()
            }
        }
    );

    let color32 = registry.plan_by_name("Color32").unwrap();
    assert!(color32.ops().all(|op| op.op
        == Operation::Scalar {
            kind: PrimitiveKind::U8,
            format: DataFormat::Default
        }));
}

#[test]
fn subtype_arms_become_dispatch_operations() {
    let registry = build(shapes());
    let base = registry.plan_by_name("BaseShape").unwrap();
    assert!(base.is_abstract);
    assert!(!base.ensure_instance);

    let arms: Vec<_> = base.dispatch_arms().collect();
    assert_eq!(
        arms,
        vec![
            (101, registry.id("RectShape").unwrap()),
            (102, registry.id("CircleShape").unwrap()),
            (103, registry.id("TriangleShape").unwrap()),
        ]
    );
    assert_eq!(base.members().count(), 1);
}

#[test]
fn group_members_resolve_to_group_root() {
    let registry = build(shapes());
    let root = registry.id("BaseShape").unwrap();
    let container = registry.plan_by_name("ShapeContainer").unwrap();

    assert_eq!(
        container.get(1).unwrap().op,
        Operation::Repeated {
            container: ContainerKind::List,
            element: ElementOp::Message { schema: root }
        }
    );
    // Declared as CircleShape, framed through the shared base entry point.
    assert_eq!(
        container.get(2).unwrap().op,
        Operation::Message { schema: root }
    );
}

#[test]
fn lineage_queries() {
    let registry = build(shapes());
    let base = registry.id("BaseShape").unwrap();
    let rect = registry.id("RectShape").unwrap();
    let circle = registry.id("CircleShape").unwrap();
    let container = registry.id("ShapeContainer").unwrap();

    assert_eq!(registry.parent(rect), Some(base));
    assert_eq!(registry.dispatch_tag(circle), Some(102));
    assert_eq!(registry.parent(base), None);
    assert_eq!(registry.group_root(circle), base);
    assert_eq!(registry.group_root(container), container);
    assert!(registry.is_ancestor_or_self(base, rect));
    assert!(registry.is_ancestor_or_self(rect, rect));
    assert!(!registry.is_ancestor_or_self(rect, circle));
    assert_eq!(registry.common_ancestor(rect, circle), Some(base));
    assert_eq!(registry.common_ancestor(rect, container), None);
    assert_eq!(registry.ancestors(circle).collect::<Vec<_>>(), vec![circle, base]);
}

#[test]
fn siblings_may_reuse_member_tags() {
    let registry = build(shapes());
    let rect = registry.plan_by_name("RectShape").unwrap();
    let circle = registry.plan_by_name("CircleShape").unwrap();
    assert!(rect.get(1).is_some() && circle.get(1).is_some());
}

#[test]
fn untagged_and_skipped_members_are_excluded() {
    let registry = build(vec![
        TypeDescriptor::message("Player")
            .field(1, "name", PrimitiveKind::String)
            .with_member(MemberDescriptor::new("cached_score", PrimitiveKind::I32))
            .with_member(MemberDescriptor::tagged(2, "session", PrimitiveKind::I64).skipped()),
    ]);
    let plan = registry.plan_by_name("Player").unwrap();
    assert_eq!(plan.len(), 1);
    assert!(plan.get(2).is_none());
}

#[test]
fn skipped_member_tag_is_free_for_reuse() {
    let registry = build(vec![
        TypeDescriptor::message("Legacy")
            .with_member(MemberDescriptor::tagged(1, "old", PrimitiveKind::I32).skipped())
            .field(1, "new", PrimitiveKind::String),
    ]);
    assert_eq!(
        registry.plan_by_name("Legacy").unwrap().get(1).unwrap().name,
        "new"
    );
}

#[test]
fn byte_shapes_classify_as_bytes() {
    let registry = build(vec![
        TypeDescriptor::message("Blob")
            .field(1, "raw", PrimitiveKind::Bytes)
            .field(2, "packed", TypeExpr::array(PrimitiveKind::U8.into()))
            .field(3, "small", TypeExpr::list(PrimitiveKind::U8.into())),
    ]);
    let plan = registry.plan_by_name("Blob").unwrap();
    assert_eq!(plan.get(1).unwrap().op, Operation::Bytes);
    assert_eq!(plan.get(2).unwrap().op, Operation::Bytes);
    assert!(matches!(
        plan.get(3).unwrap().op,
        Operation::Repeated {
            container: ContainerKind::List,
            ..
        }
    ));
}

#[test]
fn accessors_are_bound_at_compile_time() {
    let accessors = AccessorTable::new()
        .with_getter("read_percent", |m| m.get(1).cloned())
        .with_setter("clamp_percent", |m, v| {
            let clamped = v.try_i32()?.clamp(0, 100);
            m.set(1, Value::I32(clamped));
            Ok(())
        });
    let registry = Registry::build(
        vec![TypeDescriptor::message("Volume").with_member(
            MemberDescriptor::tagged(1, "percent", PrimitiveKind::I32)
                .with_getter("read_percent")
                .with_setter("clamp_percent"),
        )],
        &accessors,
    )
    .unwrap();
    let op = registry.plan_by_name("Volume").unwrap().get(1).unwrap();
    assert_eq!(op.getter.as_ref().unwrap().name(), "read_percent");
    assert_eq!(op.setter.as_ref().unwrap().name(), "clamp_percent");
}

#[test]
fn displays_plan_listing() {
    let registry = build(point_circle());
    let text = registry
        .display_plan(registry.id("Circle").unwrap())
        .to_string();
    assert_eq!(
        text,
        "message Circle\n      1  center               message Point\n      2  radius               scalar f32\n"
    );
}

#[test]
fn displays_group_flags() {
    let registry = build(shapes());
    let text = registry
        .display_plan(registry.id("CircleShape").unwrap())
        .to_string();
    assert!(text.starts_with("message CircleShape [extends BaseShape]\n"));

    let text = registry
        .display_plan(registry.id("BaseShape").unwrap())
        .to_string();
    assert!(text.starts_with("message BaseShape [abstract]\n"));
    assert!(text.contains("dispatch -> TriangleShape"));

    let text = registry
        .display_plan(registry.id("ShapeContainer").unwrap())
        .to_string();
    assert!(text.contains("repeated list<BaseShape>"));
}

//! Shared descriptor fixtures for plan compiler tests.

use tagwire_core::{PrimitiveKind, TypeDescriptor, TypeExpr};

/// `Point { 1: f32 x, 2: f32 y }` and `Circle { 1: Point center, 2: f32 radius }`.
pub fn point_circle() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::message("Point")
            .field(1, "x", PrimitiveKind::F32)
            .field(2, "y", PrimitiveKind::F32),
        TypeDescriptor::message("Circle")
            .field(1, "center", TypeExpr::named("Point"))
            .field(2, "radius", PrimitiveKind::F32),
    ]
}

/// Abstract `BaseShape` with three sibling arms and a container of shapes.
pub fn shapes() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::abstract_message("BaseShape")
            .field(10, "label", PrimitiveKind::String)
            .with_subtype(101, "RectShape")
            .with_subtype(102, "CircleShape")
            .with_subtype(103, "TriangleShape"),
        TypeDescriptor::message("RectShape")
            .field(1, "position", TypeExpr::named("Vector2"))
            .field(2, "size", TypeExpr::named("Vector2")),
        TypeDescriptor::message("CircleShape")
            .field(1, "position", TypeExpr::named("Vector2"))
            .field(2, "radius", PrimitiveKind::F32),
        TypeDescriptor::message("TriangleShape")
            .field(1, "position1", TypeExpr::named("Vector2"))
            .field(2, "position2", TypeExpr::named("Vector2"))
            .field(3, "position3", TypeExpr::named("Vector2")),
        TypeDescriptor::message("ShapeContainer")
            .field(1, "shapes", TypeExpr::list(TypeExpr::named("BaseShape")))
            .field(2, "favourite", TypeExpr::named("CircleShape")),
    ]
}

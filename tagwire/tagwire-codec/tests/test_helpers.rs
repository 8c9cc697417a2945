//! Shared schemas and message builders for codec tests.

use tagwire_codec::{Codec, DecodeOptions};
use tagwire_core::{Message, PrimitiveKind, TypeDescriptor, TypeExpr, Value};

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

pub fn codec(descriptors: Vec<TypeDescriptor>) -> Codec {
    Codec::builder()
        .with_descriptors(descriptors)
        .build()
        .expect("schema should compile")
}

pub fn resilient_codec(descriptors: Vec<TypeDescriptor>) -> Codec {
    Codec::builder()
        .with_descriptors(descriptors)
        .with_options(DecodeOptions::resilient())
        .build()
        .expect("schema should compile")
}

pub fn point(x: f32, y: f32) -> Message {
    Message::new("Point")
        .with(1, Value::F32(x))
        .with(2, Value::F32(y))
}

pub fn circle(x: f32, y: f32, radius: f32) -> Message {
    Message::new("Circle")
        .with(1, Value::message(point(x, y)))
        .with(2, Value::F32(radius))
}

pub fn vec2(x: f32, y: f32) -> Value {
    Value::message(
        Message::new("Vector2")
            .with(1, Value::F32(x))
            .with(2, Value::F32(y)),
    )
}

pub fn circle_shape(label: &str, radius: f32) -> Message {
    Message::new("CircleShape")
        .with(10, Value::string(label))
        .with(1, vec2(0.5, -0.5))
        .with(2, Value::F32(radius))
}

pub fn rect_shape(label: &str) -> Message {
    Message::new("RectShape")
        .with(10, Value::string(label))
        .with(1, vec2(1.0, 2.0))
        .with(2, vec2(3.0, 4.0))
}

pub fn triangle_shape() -> Message {
    Message::new("TriangleShape")
        .with(1, vec2(0.0, 0.0))
        .with(2, vec2(1.0, 0.0))
        .with(3, vec2(0.0, 1.0))
}

/// `Circle { center: Point { x: 1.0, y: 2.0 }, radius: 3.0 }` on the wire.
pub const CIRCLE_BYTES: [u8; 17] = [
    0x0A, 0x0A, // center, 10 bytes
    0x0D, 0x00, 0x00, 0x80, 0x3F, // x = 1.0
    0x15, 0x00, 0x00, 0x00, 0x40, // y = 2.0
    0x15, 0x00, 0x00, 0x40, 0x40, // radius = 3.0
];

/// `CircleShape { label: "c", radius: 1.0 }` framed through `BaseShape`.
pub const CIRCLE_SHAPE_BYTES: [u8; 11] = [
    0x52, 0x01, 0x63, // label = "c"
    0xB2, 0x06, 0x05, // include 102, 5 bytes
    0x15, 0x00, 0x00, 0x80, 0x3F, // radius = 1.0
];

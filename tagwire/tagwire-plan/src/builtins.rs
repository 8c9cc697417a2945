//! Built-in fixed schemas for common math and animation types.
//!
//! These are ordinary descriptors: any type can be added the same way. They
//! are injected by [`Registry::build`](crate::Registry::build) unless the
//! caller declares a type of the same name.

use tagwire_core::{PrimitiveKind, TypeDescriptor, TypeExpr};

const F32: PrimitiveKind = PrimitiveKind::F32;
const I32: PrimitiveKind = PrimitiveKind::I32;
const U8: PrimitiveKind = PrimitiveKind::U8;

/// A value-shaped type whose fields are tagged `1..` in order.
fn sequential(name: &str, kind: PrimitiveKind, fields: &[&str]) -> TypeDescriptor {
    fields
        .iter()
        .zip(1u32..)
        .fold(TypeDescriptor::value(name), |desc, (field, tag)| {
            desc.field(tag, *field, kind)
        })
}

/// Every built-in descriptor, in dependency order.
pub fn builtin_descriptors() -> Vec<TypeDescriptor> {
    vec![
        sequential("Vector2", F32, &["x", "y"]),
        sequential("Vector3", F32, &["x", "y", "z"]),
        sequential("Vector4", F32, &["x", "y", "z", "w"]),
        sequential("Quaternion", F32, &["x", "y", "z", "w"]),
        sequential("Color", F32, &["r", "g", "b", "a"]),
        sequential("Color32", U8, &["r", "g", "b", "a"]),
        sequential("Rect", F32, &["x", "y", "width", "height"]),
        TypeDescriptor::value("LayerMask").field(1, "value", I32),
        TypeDescriptor::value("Bounds")
            .field(1, "center", TypeExpr::named("Vector3"))
            .field(2, "size", TypeExpr::named("Vector3")),
        sequential(
            "Keyframe",
            F32,
            &["time", "value", "in_tangent", "out_tangent"],
        )
        .field(5, "tangent_mode", I32),
        sequential("GradientAlphaKey", F32, &["time", "alpha"]),
        TypeDescriptor::value("GradientColorKey")
            .field(1, "time", F32)
            .field(2, "color", TypeExpr::named("Color")),
        TypeDescriptor::message("Gradient")
            .field(1, "mode", I32)
            .field(
                2,
                "alpha_keys",
                TypeExpr::array(TypeExpr::named("GradientAlphaKey")),
            )
            .field(
                3,
                "color_keys",
                TypeExpr::array(TypeExpr::named("GradientColorKey")),
            ),
        TypeDescriptor::message("AnimationCurve")
            .field(1, "pre_wrap_mode", I32)
            .field(2, "post_wrap_mode", I32)
            .field(3, "keys", TypeExpr::array(TypeExpr::named("Keyframe"))),
    ]
}

/// Append every built-in whose name `descriptors` does not already declare.
pub fn ensure_builtin_types(descriptors: &mut Vec<TypeDescriptor>) {
    for builtin in builtin_descriptors() {
        if !descriptors.iter().any(|d| d.name == builtin.name) {
            descriptors.push(builtin);
        }
    }
}

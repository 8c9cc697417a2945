mod test_helpers;

use tagwire_codec::DecodeError;
use tagwire_core::{Message, Value};
use test_helpers::*;

#[test]
fn subtype_arm_selects_concrete_type() {
    let codec = codec(shapes());
    let decoded = codec.decode("BaseShape", &CIRCLE_SHAPE_BYTES).unwrap();
    assert_eq!(
        decoded,
        Message::new("CircleShape")
            .with(10, Value::string("c"))
            .with(2, Value::F32(1.0))
    );
    // The same bytes decode through the derived entry point.
    assert_eq!(
        codec.decode("CircleShape", &CIRCLE_SHAPE_BYTES).unwrap(),
        decoded
    );
}

#[test]
fn arm_may_precede_base_members() {
    let codec = codec(shapes());
    let bytes = [
        0xB2, 0x06, 0x05, 0x15, 0x00, 0x00, 0x80, 0x3F, // include 102 { radius }
        0x52, 0x01, 0x63, // label = "c"
    ];
    assert_eq!(
        codec.decode("BaseShape", &bytes).unwrap(),
        codec.decode("BaseShape", &CIRCLE_SHAPE_BYTES).unwrap()
    );
}

#[test]
fn missing_arm_leaves_abstract_instance() {
    let codec = codec(shapes());
    let err = codec.decode("BaseShape", &CIRCLE_SHAPE_BYTES[..3]).unwrap_err();
    assert!(
        matches!(&err, DecodeError::AbstractInstance { type_name } if type_name == "BaseShape"),
        "{err:?}"
    );
}

#[test]
fn decoded_type_outside_entry_lineage_is_rejected() {
    let codec = codec(shapes());
    let err = codec.decode("RectShape", &CIRCLE_SHAPE_BYTES).unwrap_err();
    assert!(
        matches!(&err, DecodeError::InstanceMismatch { expected, actual }
            if expected == "RectShape" && actual == "CircleShape"),
        "{err:?}"
    );
}

#[test]
fn round_trip_with_sibling_arms() {
    let codec = codec(shapes());
    let container = Message::new("ShapeContainer")
        .with(
            1,
            Value::List(vec![
                Value::message(rect_shape("r")),
                Value::message(circle_shape("c", 2.5)),
                Value::message(triangle_shape()),
            ]),
        )
        .with(2, Value::message(circle_shape("fav", 9.0)));

    let entry = codec.entry("ShapeContainer").unwrap();
    let bytes = entry.encode(&container).unwrap();
    let decoded = entry.decode(&bytes).unwrap();
    assert_eq!(decoded, container);
}

#[test]
fn nested_member_accepts_any_group_member() {
    let codec = codec(shapes());
    // favourite is declared CircleShape but frames through BaseShape.
    let container = Message::new("ShapeContainer").with(2, Value::message(rect_shape("r")));
    let bytes = codec.encode(&container).unwrap();
    let decoded = codec.decode("ShapeContainer", &bytes).unwrap();
    assert_eq!(decoded, container);
}

#[test]
fn reuse_keeps_derived_instance() {
    let codec = codec(shapes());
    let entry = codec.entry("BaseShape").unwrap();
    let existing = circle_shape("old", 4.0);
    // Only the label on the wire: the existing instance keeps its shape.
    let decoded = entry
        .decode_into(&CIRCLE_SHAPE_BYTES[..3], Some(existing))
        .unwrap();
    assert_eq!(decoded.type_name(), "CircleShape");
    assert_eq!(decoded.get(10), Some(&Value::string("c")));
    assert_eq!(decoded.get(2), Some(&Value::F32(4.0)));
    assert!(decoded.get(1).is_some());
}

#[test]
fn sibling_reshape_keeps_only_shared_fields() {
    let codec = codec(shapes());
    let entry = codec.entry("BaseShape").unwrap();
    // CircleShape arm without a label: the base member of the old rect survives,
    // the rect's own position and size do not.
    let decoded = entry
        .decode_into(&CIRCLE_SHAPE_BYTES[3..], Some(rect_shape("r")))
        .unwrap();
    assert_eq!(
        decoded,
        Message::new("CircleShape")
            .with(10, Value::string("r"))
            .with(2, Value::F32(1.0))
    );
}

#[test]
fn polymorphic_reuse_is_idempotent() {
    let codec = codec(shapes());
    let entry = codec.entry("ShapeContainer").unwrap();
    let container = Message::new("ShapeContainer").with(
        1,
        Value::List(vec![
            Value::message(circle_shape("a", 1.0)),
            Value::message(rect_shape("b")),
        ]),
    );
    let bytes = entry.encode(&container).unwrap();
    let first = entry.decode(&bytes).unwrap();
    let second = entry.decode_into(&bytes, Some(first.clone())).unwrap();
    assert_eq!(first, second);
}

use tagwire_core::{
    DataFormat, Decimal, KnownSubtype, MemberDescriptor, Message, PrimitiveKind, TypeDescriptor,
    TypeExpr, TypeShape, Uuid, Value,
};

#[test]
fn value_string_creates_arc_str_value() {
    let value = Value::string("hello");
    match value {
        Value::String(s) => assert_eq!(&*s, "hello"),
        other => panic!("unexpected value variant: {:?}", other),
    }
}

#[test]
fn typed_accessor_reports_mismatch() {
    let err = Value::I32(3).try_str().expect_err("should not be a string");
    assert_eq!(err.expected, "String");
    assert_eq!(err.actual, "I32");
    assert_eq!(err.to_string(), "expected String value, found I32");
}

#[test]
fn set_insert_ignores_duplicates_and_keeps_order() {
    let mut elements = Vec::new();
    Value::set_insert(&mut elements, Value::string("b"));
    Value::set_insert(&mut elements, Value::string("a"));
    Value::set_insert(&mut elements, Value::string("b"));
    assert_eq!(elements, vec![Value::string("b"), Value::string("a")]);
}

#[test]
fn message_fields_iterate_in_tag_order() {
    let msg = Message::new("Point")
        .with(2, Value::F32(2.0))
        .with(1, Value::F32(1.0));
    let tags: Vec<u32> = msg.fields().map(|(tag, _)| *tag).collect();
    assert_eq!(tags, vec![1, 2]);
    assert_eq!(msg.get(1), Some(&Value::F32(1.0)));
}

#[test]
fn reshape_keeps_fields() {
    let mut msg = Message::new("BaseShape").with(7, Value::I32(1));
    msg.reshape("CircleShape");
    assert_eq!(msg.type_name(), "CircleShape");
    assert!(msg.contains(7));
}

#[test]
fn primitive_kind_names_round_trip() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(PrimitiveKind::from_type_name(kind.type_name()), Some(kind));
        assert_eq!(kind.default_value().primitive_kind(), Some(kind));
    }
    assert_eq!(PrimitiveKind::from_type_name("float"), None);
}

#[test]
fn data_format_support_by_kind() {
    assert!(PrimitiveKind::I64.supports_format(DataFormat::ZigZag));
    assert!(!PrimitiveKind::U64.supports_format(DataFormat::ZigZag));
    assert!(PrimitiveKind::U32.supports_format(DataFormat::Fixed));
    assert!(!PrimitiveKind::F32.supports_format(DataFormat::Fixed));
    assert!(PrimitiveKind::String.supports_format(DataFormat::Default));
}

#[test]
fn decimal_mantissa_and_display() {
    let d = Decimal::from_i128(-12345, 2).expect("fits in 96 bits");
    assert_eq!(d.mantissa(), -12345);
    assert_eq!(d.to_string(), "-123.45");
    assert_eq!(Decimal::from_i128(5, 3).unwrap().to_string(), "0.005");
    assert!(Decimal::from_i128(1i128 << 96, 0).is_none());
    assert!(Decimal::from_i128(1, 29).is_none());
}

#[test]
fn uuid_halves_round_trip() {
    let uuid = Uuid::from_bytes([
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ]);
    let (lo, hi) = uuid.to_halves();
    assert_eq!(Uuid::from_halves(lo, hi), uuid);
    assert_eq!(uuid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
    assert!(Uuid::NIL.is_nil());
}

#[test]
fn descriptor_builders_set_all_fields() {
    let ty = TypeDescriptor::abstract_message("Shape")
        .with_member(
            MemberDescriptor::tagged(1, "id", PrimitiveKind::I64)
                .with_format(DataFormat::ZigZag)
                .with_getter("get_id")
                .with_setter("set_id"),
        )
        .with_member(MemberDescriptor::new("cache", PrimitiveKind::I32).skipped())
        .with_subtype(101, "Circle");

    assert!(ty.is_abstract);
    assert_eq!(ty.shape, TypeShape::Reference);
    assert_eq!(ty.members[0].tag, Some(1));
    assert_eq!(ty.members[0].getter.as_deref(), Some("get_id"));
    assert_eq!(ty.members[1].tag, None);
    assert!(ty.members[1].skip);
    assert_eq!(ty.subtypes, vec![KnownSubtype::new(101, "Circle")]);
    assert_eq!(TypeDescriptor::value("Vector2").shape, TypeShape::Value);
}

#[test]
fn type_expr_display() {
    let ty = TypeExpr::list(TypeExpr::array(TypeExpr::named("Point")));
    assert_eq!(ty.to_string(), "list<Point[]>");
    assert_eq!(TypeExpr::set(PrimitiveKind::String.into()).to_string(), "set<string>");
}

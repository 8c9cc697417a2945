use tagwire_core::{
    DataFormat, DateTime, DateTimeKind, Decimal, PrimitiveKind, TimeSpan, Uuid, Value,
};
use tagwire_wire::{WireError, WireReader, WireType, WireWriter, encoded_len};

fn write_one(format: DataFormat, value: &Value) -> Vec<u8> {
    let mut w = WireWriter::new();
    w.write_scalar(1, format, value).unwrap();
    w.finish().unwrap().to_vec()
}

fn read_one(data: &[u8], kind: PrimitiveKind, format: DataFormat) -> Result<Value, WireError> {
    let mut r = WireReader::from_slice(data);
    r.read_field_header()?;
    let value = r.read_scalar(kind, format)?;
    r.check_fully_consumed()?;
    Ok(value)
}

#[test]
fn writes_nested_message_with_back_patched_length() {
    let mut w = WireWriter::new();
    w.write_field_header(1, WireType::LengthDelimited);
    let token = w.start_sub_item();
    w.write_scalar(1, DataFormat::Default, &Value::I32(3)).unwrap();
    w.write_scalar(2, DataFormat::Default, &Value::I32(4)).unwrap();
    w.end_sub_item(token).unwrap();
    w.write_scalar(2, DataFormat::Default, &Value::I32(5)).unwrap();
    assert_eq!(
        w.finish().unwrap().as_ref(),
        &[0x0A, 0x04, 0x08, 0x03, 0x10, 0x04, 0x10, 0x05]
    );
}

#[test]
fn long_sub_item_gets_multi_byte_length() {
    let mut w = WireWriter::new();
    w.write_sub_item::<WireError, _>(1, |w| {
        w.write_scalar(2, DataFormat::Default, &Value::Bytes(vec![0xAB; 200]))
    })
    .unwrap();
    let out = w.finish().unwrap();
    assert_eq!(out.len(), 206);
    assert_eq!(&out[..5], &[0x0A, 0xCB, 0x01, 0x12, 0xC8]);
}

#[test]
fn empty_sub_item_is_two_bytes() {
    let mut w = WireWriter::new();
    w.write_sub_item::<WireError, _>(7, |_| Ok(())).unwrap();
    assert_eq!(w.finish().unwrap().as_ref(), &[0x3A, 0x00]);
}

#[test]
fn closing_out_of_order_is_unbalanced() {
    let mut w = WireWriter::new();
    let outer = w.start_sub_item();
    let _inner = w.start_sub_item();
    assert_eq!(w.end_sub_item(outer), Err(WireError::Unbalanced { open: 2 }));
}

#[test]
fn finish_with_open_sub_item_fails() {
    let mut w = WireWriter::new();
    let _token = w.start_sub_item();
    assert_eq!(w.finish().unwrap_err(), WireError::Unbalanced { open: 1 });
}

#[test]
fn non_scalar_values_are_rejected() {
    let mut w = WireWriter::new();
    assert_eq!(
        w.write_scalar(1, DataFormat::Default, &Value::List(Vec::new())),
        Err(WireError::NotScalar { variant: "List" })
    );
}

#[test]
fn negative_default_int_sign_extends_to_ten_bytes() {
    let out = write_one(DataFormat::Default, &Value::I32(-1));
    assert_eq!(out.len(), 11);
    assert_eq!(out[10], 0x01);
    assert_eq!(
        read_one(&out, PrimitiveKind::I32, DataFormat::Default),
        Ok(Value::I32(-1))
    );
}

#[test]
fn zigzag_keeps_small_negatives_short() {
    assert_eq!(write_one(DataFormat::ZigZag, &Value::I32(-1)), vec![0x08, 0x01]);
    assert_eq!(write_one(DataFormat::ZigZag, &Value::I64(-2)), vec![0x08, 0x03]);
}

#[test]
fn fixed_format_picks_width_by_kind() {
    assert_eq!(
        write_one(DataFormat::Fixed, &Value::U32(1)),
        vec![0x0D, 1, 0, 0, 0]
    );
    assert_eq!(
        write_one(DataFormat::Fixed, &Value::I64(1)),
        vec![0x09, 1, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn char_is_a_varint() {
    let out = write_one(DataFormat::Default, &Value::Char(0x263A));
    assert_eq!(out, vec![0x08, 0xBA, 0x4C]);
    assert_eq!(
        read_one(&out, PrimitiveKind::Char, DataFormat::Default),
        Ok(Value::Char(0x263A))
    );
}

#[test]
fn time_span_uses_coarsest_exact_scale() {
    let out = write_one(DataFormat::Default, &Value::TimeSpan(TimeSpan::from_secs(90)));
    assert_eq!(out, vec![0x0A, 0x05, 0x08, 0xB4, 0x01, 0x10, 0x03]);
    assert_eq!(
        read_one(&out, PrimitiveKind::TimeSpan, DataFormat::Default),
        Ok(Value::TimeSpan(TimeSpan::from_secs(90)))
    );
}

#[test]
fn time_span_extremes_use_minmax_scale() {
    let out = write_one(DataFormat::Default, &Value::TimeSpan(TimeSpan::MAX));
    assert_eq!(out, vec![0x0A, 0x04, 0x08, 0x02, 0x10, 0x0F]);
    assert_eq!(
        read_one(&out, PrimitiveKind::TimeSpan, DataFormat::Default),
        Ok(Value::TimeSpan(TimeSpan::MAX))
    );
    let out = write_one(DataFormat::Default, &Value::TimeSpan(TimeSpan::MIN));
    assert_eq!(
        read_one(&out, PrimitiveKind::TimeSpan, DataFormat::Default),
        Ok(Value::TimeSpan(TimeSpan::MIN))
    );
}

#[test]
fn zero_time_span_is_an_empty_frame() {
    let out = write_one(DataFormat::Default, &Value::TimeSpan(TimeSpan::default()));
    assert_eq!(out, vec![0x0A, 0x00]);
}

#[test]
fn unknown_time_scale_is_rejected() {
    let data = [0x0A, 0x04, 0x08, 0x02, 0x10, 0x07];
    assert!(matches!(
        read_one(&data, PrimitiveKind::TimeSpan, DataFormat::Default),
        Err(WireError::InvalidScale { value: 7, .. })
    ));
}

#[test]
fn date_time_carries_kind() {
    let when = DateTime::from_unix_secs(2 * 86_400, DateTimeKind::Utc);
    let out = write_one(DataFormat::Default, &Value::DateTime(when));
    assert_eq!(out, vec![0x0A, 0x04, 0x08, 0x04, 0x18, 0x01]);
    assert_eq!(
        read_one(&out, PrimitiveKind::DateTime, DataFormat::Default),
        Ok(Value::DateTime(when))
    );
}

#[test]
fn decimal_layout() {
    let d = Decimal::from_i128(-12_345, 2).unwrap();
    let out = write_one(DataFormat::Default, &Value::Decimal(d));
    assert_eq!(out, vec![0x0A, 0x05, 0x08, 0xB9, 0x60, 0x18, 0x05]);
    let Value::Decimal(back) = read_one(&out, PrimitiveKind::Decimal, DataFormat::Default).unwrap()
    else {
        panic!("expected decimal");
    };
    assert_eq!(back, d);
    assert_eq!(back.to_string(), "-123.45");
}

#[test]
fn decimal_scale_above_28_is_rejected() {
    let data = [0x0A, 0x02, 0x18, 0x3A];
    assert!(matches!(
        read_one(&data, PrimitiveKind::Decimal, DataFormat::Default),
        Err(WireError::InvalidScale { value: 29, .. })
    ));
}

#[test]
fn nil_uuid_is_an_empty_frame() {
    assert_eq!(
        write_one(DataFormat::Default, &Value::Uuid(Uuid::NIL)),
        vec![0x0A, 0x00]
    );
    assert_eq!(
        read_one(&[0x0A, 0x00], PrimitiveKind::Uuid, DataFormat::Default),
        Ok(Value::Uuid(Uuid::NIL))
    );
}

#[test]
fn uuid_halves_are_fixed64() {
    let id = Uuid::from_bytes([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
    let out = write_one(DataFormat::Default, &Value::Uuid(id));
    assert_eq!(out.len(), 2 + 18);
    assert_eq!(out[2], 0x09);
    assert_eq!(&out[3..11], &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        read_one(&out, PrimitiveKind::Uuid, DataFormat::Default),
        Ok(Value::Uuid(id))
    );
}

#[test]
fn varint_lengths() {
    assert_eq!(encoded_len(0), 1);
    assert_eq!(encoded_len(127), 1);
    assert_eq!(encoded_len(128), 2);
    assert_eq!(encoded_len(u64::MAX), 10);
}

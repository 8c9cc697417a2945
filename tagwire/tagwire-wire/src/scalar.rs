//! Scalar codecs: the (kind, format) → wire type mapping and the
//! range-checked conversions between wire payloads and [`Value`]s.

use tagwire_core::{DataFormat, PrimitiveKind, Value};

use crate::{
    bcl,
    error::WireError,
    reader::WireReader,
    varint::{decode_zigzag, encode_zigzag},
    wire_type::WireType,
    writer::WireWriter,
};

/// The single wire type a scalar of `kind` written with `format` uses.
pub fn expected_wire_type(kind: PrimitiveKind, format: DataFormat) -> WireType {
    use PrimitiveKind as K;
    match kind {
        K::Bool | K::Char => WireType::Varint,
        K::F32 => WireType::Fixed32,
        K::F64 => WireType::Fixed64,
        K::I64 | K::U64 if format == DataFormat::Fixed => WireType::Fixed64,
        K::I8 | K::I16 | K::I32 | K::U8 | K::U16 | K::U32 if format == DataFormat::Fixed => {
            WireType::Fixed32
        }
        K::I8 | K::I16 | K::I32 | K::I64 | K::U8 | K::U16 | K::U32 | K::U64 => WireType::Varint,
        K::String | K::Bytes | K::DateTime | K::TimeSpan | K::Decimal | K::Uuid => {
            WireType::LengthDelimited
        }
    }
}

macro_rules! narrow {
    ($value:expr, $ty:ty, $kind:expr, $offset:expr) => {
        <$ty>::try_from($value).map_err(|_| WireError::Overflow {
            kind: $kind.type_name(),
            offset: $offset,
        })
    };
}

impl WireReader {
    /// Read the current field as a scalar of `kind`.
    ///
    /// The field's wire type must be exactly the one
    /// [`expected_wire_type`] names.
    pub fn read_scalar(&mut self, kind: PrimitiveKind, format: DataFormat) -> Result<Value, WireError> {
        self.expect_wire_type(expected_wire_type(kind, format))?;
        match kind {
            PrimitiveKind::String => self.read_string().map(Value::String),
            PrimitiveKind::Bytes => Ok(Value::Bytes(self.read_bytes()?.to_vec())),
            PrimitiveKind::DateTime => bcl::read_date_time(self).map(Value::DateTime),
            PrimitiveKind::TimeSpan => bcl::read_time_span(self).map(Value::TimeSpan),
            PrimitiveKind::Decimal => bcl::read_decimal(self).map(Value::Decimal),
            PrimitiveKind::Uuid => bcl::read_uuid(self).map(Value::Uuid),
            _ => self.read_scalar_payload(kind, format),
        }
    }

    /// Read a packed run of `kind` scalars from the current
    /// length-delimited field, appending each element through `push`.
    pub fn read_packed(
        &mut self,
        kind: PrimitiveKind,
        format: DataFormat,
        mut push: impl FnMut(Value),
    ) -> Result<(), WireError> {
        self.for_each_packed(|r| {
            push(r.read_scalar_payload(kind, format)?);
            Ok(())
        })
    }

    /// Decode one fixed-width or varint scalar without a header check.
    fn read_scalar_payload(&mut self, kind: PrimitiveKind, format: DataFormat) -> Result<Value, WireError> {
        use PrimitiveKind as K;
        let offset = self.position();
        let value = match (kind, expected_wire_type(kind, format)) {
            (K::F32, _) => Value::F32(f32::from_bits(self.read_raw_fixed32()?)),
            (K::F64, _) => Value::F64(f64::from_bits(self.read_raw_fixed64()?)),
            (K::Bool, _) => match self.read_raw_varint()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                value => return Err(WireError::InvalidBool { value, offset }),
            },
            (K::Char, _) => Value::Char(narrow!(self.read_raw_varint()?, u16, kind, offset)?),
            (_, WireType::Fixed32) => {
                let raw = self.read_raw_fixed32()?;
                match kind {
                    K::I8 => Value::I8(narrow!(raw as i32, i8, kind, offset)?),
                    K::I16 => Value::I16(narrow!(raw as i32, i16, kind, offset)?),
                    K::I32 => Value::I32(raw as i32),
                    K::U8 => Value::U8(narrow!(raw, u8, kind, offset)?),
                    K::U16 => Value::U16(narrow!(raw, u16, kind, offset)?),
                    _ => Value::U32(raw),
                }
            }
            (_, WireType::Fixed64) => {
                let raw = self.read_raw_fixed64()?;
                match kind {
                    K::I64 => Value::I64(raw as i64),
                    _ => Value::U64(raw),
                }
            }
            _ => {
                let raw = self.read_raw_varint()?;
                let signed = if format == DataFormat::ZigZag {
                    decode_zigzag(raw)
                } else {
                    raw as i64
                };
                match kind {
                    K::I8 => Value::I8(narrow!(signed, i8, kind, offset)?),
                    K::I16 => Value::I16(narrow!(signed, i16, kind, offset)?),
                    K::I32 => Value::I32(narrow!(signed, i32, kind, offset)?),
                    K::I64 => Value::I64(signed),
                    K::U8 => Value::U8(narrow!(raw, u8, kind, offset)?),
                    K::U16 => Value::U16(narrow!(raw, u16, kind, offset)?),
                    K::U32 => Value::U32(narrow!(raw, u32, kind, offset)?),
                    _ => Value::U64(raw),
                }
            }
        };
        Ok(value)
    }
}

impl WireWriter {
    /// Write `value` as field `tag`, header included.
    ///
    /// The wire type follows from the value's kind and `format`; non-scalar
    /// values are rejected.
    pub fn write_scalar(&mut self, tag: u32, format: DataFormat, value: &Value) -> Result<(), WireError> {
        let kind = value.primitive_kind().ok_or(WireError::NotScalar {
            variant: value.variant_name(),
        })?;
        let wire_type = expected_wire_type(kind, format);
        self.write_field_header(tag, wire_type);
        let zigzag = format == DataFormat::ZigZag;
        match value {
            Value::Bool(v) => self.write_raw_varint(u64::from(*v)),
            Value::Char(v) => self.write_raw_varint(u64::from(*v)),
            Value::F32(v) => self.write_raw_fixed32(v.to_bits()),
            Value::F64(v) => self.write_raw_fixed64(v.to_bits()),
            Value::I8(v) => self.write_signed(i64::from(*v), wire_type, zigzag),
            Value::I16(v) => self.write_signed(i64::from(*v), wire_type, zigzag),
            Value::I32(v) => self.write_signed(i64::from(*v), wire_type, zigzag),
            Value::I64(v) => self.write_signed(*v, wire_type, zigzag),
            Value::U8(v) => self.write_unsigned(u64::from(*v), wire_type),
            Value::U16(v) => self.write_unsigned(u64::from(*v), wire_type),
            Value::U32(v) => self.write_unsigned(u64::from(*v), wire_type),
            Value::U64(v) => self.write_unsigned(*v, wire_type),
            Value::String(v) => self.write_raw_length_delimited(v.as_bytes()),
            Value::Bytes(v) => self.write_raw_length_delimited(v),
            Value::DateTime(v) => bcl::write_date_time(self, v)?,
            Value::TimeSpan(v) => bcl::write_time_span(self, v)?,
            Value::Decimal(v) => bcl::write_decimal(self, v)?,
            Value::Uuid(v) => bcl::write_uuid(self, v)?,
            other => {
                return Err(WireError::NotScalar {
                    variant: other.variant_name(),
                });
            }
        }
        Ok(())
    }

    fn write_signed(&mut self, v: i64, wire_type: WireType, zigzag: bool) {
        match wire_type {
            WireType::Fixed32 => self.write_raw_fixed32(v as i32 as u32),
            WireType::Fixed64 => self.write_raw_fixed64(v as u64),
            _ if zigzag => self.write_raw_varint(encode_zigzag(v)),
            // Negative values sign-extend to ten bytes.
            _ => self.write_raw_varint(v as u64),
        }
    }

    fn write_unsigned(&mut self, v: u64, wire_type: WireType) {
        match wire_type {
            WireType::Fixed32 => self.write_raw_fixed32(v as u32),
            WireType::Fixed64 => self.write_raw_fixed64(v),
            _ => self.write_raw_varint(v),
        }
    }
}

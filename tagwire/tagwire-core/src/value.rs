//! Dynamic value representation read from and written to the wire.

use std::sync::Arc;

use crate::{
    error::ValueTypeError,
    message::Message,
    scalar::{DateTime, Decimal, PrimitiveKind, TimeSpan, Uuid},
};

/// Value carried by a message field.
/// All types are explicit; no lossy conversions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Char(u16),
    F32(f32),
    F64(f64),
    String(Arc<str>),
    Bytes(Vec<u8>),
    DateTime(DateTime),
    TimeSpan(TimeSpan),
    Decimal(Decimal),
    Uuid(Uuid),
    Message(Box<Message>),
    Array(Vec<Value>),
    List(Vec<Value>),
    /// Insertion-ordered set; duplicates are dropped by [`Value::set_insert`].
    Set(Vec<Value>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn message(msg: Message) -> Self {
        Self::Message(Box::new(msg))
    }

    /// Insert into set-ordered storage unless an equal element is present.
    pub fn set_insert(elements: &mut Vec<Value>, value: Value) {
        if !elements.contains(&value) {
            elements.push(value);
        }
    }

    /// The primitive kind of a scalar value, `None` for messages and containers.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            Value::Bool(_) => PrimitiveKind::Bool,
            Value::I8(_) => PrimitiveKind::I8,
            Value::I16(_) => PrimitiveKind::I16,
            Value::I32(_) => PrimitiveKind::I32,
            Value::I64(_) => PrimitiveKind::I64,
            Value::U8(_) => PrimitiveKind::U8,
            Value::U16(_) => PrimitiveKind::U16,
            Value::U32(_) => PrimitiveKind::U32,
            Value::U64(_) => PrimitiveKind::U64,
            Value::Char(_) => PrimitiveKind::Char,
            Value::F32(_) => PrimitiveKind::F32,
            Value::F64(_) => PrimitiveKind::F64,
            Value::String(_) => PrimitiveKind::String,
            Value::Bytes(_) => PrimitiveKind::Bytes,
            Value::DateTime(_) => PrimitiveKind::DateTime,
            Value::TimeSpan(_) => PrimitiveKind::TimeSpan,
            Value::Decimal(_) => PrimitiveKind::Decimal,
            Value::Uuid(_) => PrimitiveKind::Uuid,
            Value::Message(_) | Value::Array(_) | Value::List(_) | Value::Set(_) => return None,
        })
    }

    pub fn try_bool(&self) -> Result<bool, ValueTypeError> {
        match self {
            Value::Bool(v) => Ok(*v),
            _ => Err(self.type_mismatch("Bool")),
        }
    }

    pub fn try_i32(&self) -> Result<i32, ValueTypeError> {
        match self {
            Value::I32(v) => Ok(*v),
            _ => Err(self.type_mismatch("I32")),
        }
    }

    pub fn try_i64(&self) -> Result<i64, ValueTypeError> {
        match self {
            Value::I64(v) => Ok(*v),
            _ => Err(self.type_mismatch("I64")),
        }
    }

    pub fn try_u32(&self) -> Result<u32, ValueTypeError> {
        match self {
            Value::U32(v) => Ok(*v),
            _ => Err(self.type_mismatch("U32")),
        }
    }

    pub fn try_u64(&self) -> Result<u64, ValueTypeError> {
        match self {
            Value::U64(v) => Ok(*v),
            _ => Err(self.type_mismatch("U64")),
        }
    }

    pub fn try_f32(&self) -> Result<f32, ValueTypeError> {
        match self {
            Value::F32(v) => Ok(*v),
            _ => Err(self.type_mismatch("F32")),
        }
    }

    pub fn try_f64(&self) -> Result<f64, ValueTypeError> {
        match self {
            Value::F64(v) => Ok(*v),
            _ => Err(self.type_mismatch("F64")),
        }
    }

    pub fn try_str(&self) -> Result<&str, ValueTypeError> {
        match self {
            Value::String(v) => Ok(v.as_ref()),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<&[u8], ValueTypeError> {
        match self {
            Value::Bytes(v) => Ok(v.as_slice()),
            _ => Err(self.type_mismatch("Bytes")),
        }
    }

    pub fn try_message(&self) -> Result<&Message, ValueTypeError> {
        match self {
            Value::Message(v) => Ok(v),
            _ => Err(self.type_mismatch("Message")),
        }
    }

    /// Elements of any container variant.
    pub fn try_elements(&self) -> Result<&[Value], ValueTypeError> {
        match self {
            Value::Array(v) | Value::List(v) | Value::Set(v) => Ok(v.as_slice()),
            _ => Err(self.type_mismatch("Array, List or Set")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::Char(_) => "Char",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::DateTime(_) => "DateTime",
            Value::TimeSpan(_) => "TimeSpan",
            Value::Decimal(_) => "Decimal",
            Value::Uuid(_) => "Uuid",
            Value::Message(_) => "Message",
            Value::Array(_) => "Array",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
        }
    }
}

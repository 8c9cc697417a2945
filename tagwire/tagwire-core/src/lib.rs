//! Wire-independent core types for `tagwire`.
//!
//! This crate provides the object model decoded from and encoded to the
//! tag-delimited wire format ([`Value`] / [`Message`]), the scalar kinds the
//! codec understands ([`PrimitiveKind`]), and the [`TypeDescriptor`] model the
//! decode-plan compiler consumes.

mod descriptor;
mod error;
mod format;
mod message;
mod scalar;
mod value;

pub use descriptor::{
    KnownSubtype, MAX_TAG, MemberDescriptor, TypeDescriptor, TypeExpr, TypeShape,
};
pub use error::ValueTypeError;
pub use format::format_message;
pub use message::Message;
pub use scalar::{DataFormat, DateTime, DateTimeKind, Decimal, PrimitiveKind, TimeSpan, Uuid};
pub use value::Value;

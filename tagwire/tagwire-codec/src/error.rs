//! Error types for the decode and encode paths.

use tagwire_core::ValueTypeError;
use tagwire_wire::{WireError, WireType};

/// Requested type name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown schema '{type_name}'")]
pub struct UnknownSchemaError {
    pub type_name: String,
}

/// Errors produced while decoding.
///
/// `tag` is the field being decoded when the error was detected, `0` when the
/// error is not tied to a field (top-level consumption checks).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A sub-item was over- or under-consumed, or its length runs past the
    /// enclosing block.
    #[error("{schema}: framing violated at field {tag}, byte {offset}: {source}")]
    Framing {
        schema: String,
        tag: u32,
        offset: usize,
        source: WireError,
    },

    #[error("{schema}: field {tag} at byte {offset} has wire type {actual}, expected {expected}")]
    TypeMismatch {
        schema: String,
        tag: u32,
        offset: usize,
        expected: WireType,
        actual: WireType,
    },

    /// Truncated input, bad varint, out-of-range value and the like.
    #[error("{schema}: malformed field {tag} at byte {offset}: {source}")]
    Malformed {
        schema: String,
        tag: u32,
        offset: usize,
        source: WireError,
    },

    #[error("unknown schema '{type_name}'")]
    UnknownSchema { type_name: String },

    /// The decoded instance never left an abstract type: no subtype arm was
    /// present on the wire.
    #[error("instance of abstract type '{type_name}' cannot be materialized")]
    AbstractInstance { type_name: String },

    #[error("{schema}: nesting deeper than {max_depth} at byte {offset}")]
    DepthExceeded {
        schema: String,
        max_depth: usize,
        offset: usize,
    },

    /// A member setter rejected the decoded value.
    #[error("{schema}.{member}: setter rejected value: {source}")]
    Accessor {
        schema: String,
        member: String,
        source: ValueTypeError,
    },

    #[error("instance of '{actual}' does not belong to '{expected}'")]
    InstanceMismatch { expected: String, actual: String },
}

impl DecodeError {
    /// Whether the error is a length-framing violation.
    pub fn is_framing(&self) -> bool {
        matches!(self, DecodeError::Framing { .. })
    }
}

impl From<UnknownSchemaError> for DecodeError {
    fn from(err: UnknownSchemaError) -> Self {
        DecodeError::UnknownSchema {
            type_name: err.type_name,
        }
    }
}

/// Errors produced while encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("unknown schema '{type_name}'")]
    UnknownSchema { type_name: String },

    /// A field value does not have the kind its plan operation expects.
    #[error("{schema}.{member}: expected {expected} value, found {actual}")]
    ValueMismatch {
        schema: String,
        member: String,
        expected: String,
        actual: &'static str,
    },

    #[error("instance of '{actual}' does not belong to '{expected}'")]
    InstanceMismatch { expected: String, actual: String },

    #[error(transparent)]
    Wire(#[from] WireError),
}

impl From<UnknownSchemaError> for EncodeError {
    fn from(err: UnknownSchemaError) -> Self {
        EncodeError::UnknownSchema {
            type_name: err.type_name,
        }
    }
}

/// Classify a reader error raised while decoding `tag` of `schema`.
pub(crate) fn wire_error(schema: &str, tag: u32, source: WireError) -> DecodeError {
    let offset = source.offset().unwrap_or_default();
    match source {
        WireError::WireTypeMismatch {
            tag,
            expected,
            actual,
            offset,
        } => DecodeError::TypeMismatch {
            schema: schema.to_string(),
            tag,
            offset,
            expected,
            actual,
        },
        source if source.is_framing() => DecodeError::Framing {
            schema: schema.to_string(),
            tag,
            offset,
            source,
        },
        source => DecodeError::Malformed {
            schema: schema.to_string(),
            tag,
            offset,
            source,
        },
    }
}

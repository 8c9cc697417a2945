//! Errors raised while reading or writing wire data.

use crate::wire_type::WireType;

/// Low-level wire error. Every read-side variant carries the byte offset
/// at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("unexpected end of data at byte {offset}: {needed} more bytes needed")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A read inside a sub-item crossed its declared end, or the sub-item
    /// ended somewhere other than its declared end.
    #[error("sub-item framing violated at byte {offset}: declared end is byte {expected_end}")]
    Framing { offset: usize, expected_end: usize },

    /// A sub-item length runs past the enclosing block.
    #[error(
        "sub-item at byte {offset} declares {length} bytes but the enclosing block has {available}"
    )]
    FrameOverrun {
        offset: usize,
        length: u64,
        available: usize,
    },

    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintOverflow { offset: usize },

    #[error("invalid wire type {value} at byte {offset}")]
    InvalidWireType { value: u8, offset: usize },

    #[error("invalid field tag {tag} at byte {offset}")]
    InvalidTag { tag: u64, offset: usize },

    #[error("field {tag} at byte {offset}: expected wire type {expected}, found {actual}")]
    WireTypeMismatch {
        tag: u32,
        expected: WireType,
        actual: WireType,
        offset: usize,
    },

    #[error("value at byte {offset} does not fit in {kind}")]
    Overflow { kind: &'static str, offset: usize },

    #[error("invalid boolean value {value} at byte {offset}")]
    InvalidBool { value: u64, offset: usize },

    #[error("invalid UTF-8 string at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("invalid {what} scale {value} at byte {offset}")]
    InvalidScale {
        what: &'static str,
        value: u64,
        offset: usize,
    },

    #[error("unexpected end-group marker for field {tag} at byte {offset}")]
    UnexpectedEndGroup { tag: u32, offset: usize },

    #[error("groups nested too deeply at byte {offset}")]
    NestingTooDeep { offset: usize },

    #[error("no current field header at byte {offset}")]
    NoCurrentField { offset: usize },

    /// Sub-item tokens were closed out of order or left open.
    #[error("unbalanced sub-item: {open} frame(s) open")]
    Unbalanced { open: usize },

    #[error("{variant} is not a scalar value")]
    NotScalar { variant: &'static str },
}

impl WireError {
    /// Whether this error is a length-framing violation rather than a
    /// malformed value.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            WireError::Framing { .. } | WireError::FrameOverrun { .. } | WireError::Unbalanced { .. }
        )
    }

    /// Byte offset the error was detected at, when the error has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            WireError::UnexpectedEof { offset, .. }
            | WireError::Framing { offset, .. }
            | WireError::FrameOverrun { offset, .. }
            | WireError::VarintOverflow { offset }
            | WireError::InvalidWireType { offset, .. }
            | WireError::InvalidTag { offset, .. }
            | WireError::WireTypeMismatch { offset, .. }
            | WireError::Overflow { offset, .. }
            | WireError::InvalidBool { offset, .. }
            | WireError::InvalidUtf8 { offset }
            | WireError::InvalidScale { offset, .. }
            | WireError::UnexpectedEndGroup { offset, .. }
            | WireError::NestingTooDeep { offset }
            | WireError::NoCurrentField { offset } => Some(*offset),
            WireError::Unbalanced { .. } | WireError::NotScalar { .. } => None,
        }
    }
}

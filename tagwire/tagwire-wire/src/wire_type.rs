use std::fmt::{Display, Formatter, Result};

use tagwire_core::MAX_TAG;

use crate::error::WireError;

/// Byte-level encoding family of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint,
    Fixed64,
    LengthDelimited,
    /// Legacy group start; only ever skipped.
    StartGroup,
    /// Legacy group end; only ever skipped.
    EndGroup,
    Fixed32,
}

impl WireType {
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    pub fn raw(&self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::StartGroup => 3,
            WireType::EndGroup => 4,
            WireType::Fixed32 => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        }
    }
}

impl Display for WireType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

/// A decoded field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    pub tag: u32,
    pub wire_type: WireType,
}

impl FieldHeader {
    pub fn new(tag: u32, wire_type: WireType) -> Self {
        Self { tag, wire_type }
    }

    pub fn key(&self) -> u64 {
        (u64::from(self.tag) << 3) | u64::from(self.wire_type.raw())
    }

    /// Split a raw header key read at `offset`.
    pub fn from_key(key: u64, offset: usize) -> std::result::Result<Self, WireError> {
        let tag = key >> 3;
        if tag == 0 || tag > u64::from(MAX_TAG) {
            return Err(WireError::InvalidTag { tag, offset });
        }
        let raw = (key & 0x07) as u8;
        let wire_type =
            WireType::from_raw(raw).ok_or(WireError::InvalidWireType { value: raw, offset })?;
        Ok(Self {
            tag: tag as u32,
            wire_type,
        })
    }
}

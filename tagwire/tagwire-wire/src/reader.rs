//! Cursor over an in-memory wire buffer.

use std::sync::Arc;

use bytes::Bytes;

use crate::{
    error::WireError,
    varint::{decode_zigzag, take_varint},
    wire_type::{FieldHeader, WireType},
};

/// Groups are only ever skipped; this bounds the skip recursion.
const MAX_GROUP_DEPTH: usize = 64;

/// Handle returned by [`WireReader::start_sub_item`]; must be handed back to
/// [`WireReader::end_sub_item`] in LIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a sub-item must be closed with end_sub_item"]
pub struct SubItemToken {
    end: usize,
    outer_limit: usize,
    depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    header: FieldHeader,
    start: usize,
}

/// Reads fields from a single contiguous buffer.
///
/// The reader tracks an explicit limit: the end of the innermost open
/// sub-item, or the end of the buffer at top level. Field headers are read
/// one at a time; [`WireReader::try_read_field_header`] peeks ahead for a
/// specific tag and, on mismatch, keeps the header it consumed so the next
/// [`WireReader::read_field_header`] returns it.
#[derive(Debug, Clone)]
pub struct WireReader {
    buf: Bytes,
    pos: usize,
    limit: usize,
    depth: usize,
    header: Option<FieldHeader>,
    field_start: usize,
    pending: Option<Pending>,
}

impl WireReader {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        let buf = buf.into();
        let limit = buf.len();
        Self {
            buf,
            pos: 0,
            limit,
            depth: 0,
            header: None,
            field_start: 0,
            pending: None,
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Absolute byte position of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset of the most recently read field header.
    pub fn field_offset(&self) -> usize {
        self.field_start
    }

    /// Number of open sub-items.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn current_header(&self) -> Option<FieldHeader> {
        self.header
    }

    /// Whether the cursor sits at the end of the current block with no
    /// header held back.
    pub fn at_end(&self) -> bool {
        self.pending.is_none() && self.pos >= self.limit
    }

    /// Read the next field header, or `None` at the end of the current block.
    pub fn read_field_header(&mut self) -> Result<Option<FieldHeader>, WireError> {
        if let Some(pending) = self.pending.take() {
            self.header = Some(pending.header);
            self.field_start = pending.start;
            return Ok(Some(pending.header));
        }
        if self.pos >= self.limit {
            self.header = None;
            return Ok(None);
        }
        let start = self.pos;
        let header = FieldHeader::from_key(self.read_raw_varint()?, start)?;
        self.header = Some(header);
        self.field_start = start;
        Ok(Some(header))
    }

    /// Consume the next header only if it carries `tag`.
    ///
    /// On a different tag the header stays consumed and is returned by the
    /// next [`WireReader::read_field_header`]. Never rewinds.
    pub fn try_read_field_header(&mut self, tag: u32) -> Result<bool, WireError> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => {
                if self.pos >= self.limit {
                    return Ok(false);
                }
                let start = self.pos;
                let header = FieldHeader::from_key(self.read_raw_varint()?, start)?;
                Pending { header, start }
            }
        };
        if pending.header.tag == tag && pending.header.wire_type != WireType::EndGroup {
            self.header = Some(pending.header);
            self.field_start = pending.start;
            Ok(true)
        } else {
            self.pending = Some(pending);
            Ok(false)
        }
    }

    /// Header of the field currently being read.
    pub fn current(&self) -> Result<FieldHeader, WireError> {
        self.header.ok_or(WireError::NoCurrentField { offset: self.pos })
    }

    /// Fail unless the current field was written with `expected`.
    pub fn expect_wire_type(&self, expected: WireType) -> Result<FieldHeader, WireError> {
        let header = self.current()?;
        if header.wire_type != expected {
            return Err(WireError::WireTypeMismatch {
                tag: header.tag,
                expected,
                actual: header.wire_type,
                offset: self.field_start,
            });
        }
        Ok(header)
    }

    /// Enter the length-delimited payload of the current field.
    pub fn start_sub_item(&mut self) -> Result<SubItemToken, WireError> {
        self.expect_wire_type(WireType::LengthDelimited)?;
        let len_offset = self.pos;
        let len = self.read_raw_varint()?;
        let available = self.limit - self.pos;
        if len > available as u64 {
            return Err(WireError::FrameOverrun {
                offset: len_offset,
                length: len,
                available,
            });
        }
        let token = SubItemToken {
            end: self.pos + len as usize,
            outer_limit: self.limit,
            depth: self.depth + 1,
        };
        self.limit = token.end;
        self.depth = token.depth;
        self.header = None;
        Ok(token)
    }

    /// Leave a sub-item; the cursor must sit exactly at its declared end.
    pub fn end_sub_item(&mut self, token: SubItemToken) -> Result<(), WireError> {
        if token.depth != self.depth || token.end != self.limit {
            return Err(WireError::Unbalanced { open: self.depth });
        }
        if self.pending.is_some() || self.pos != token.end {
            return Err(WireError::Framing {
                offset: self.pos,
                expected_end: token.end,
            });
        }
        self.limit = token.outer_limit;
        self.depth -= 1;
        self.header = None;
        Ok(())
    }

    /// Skip the payload of the current field, whatever its wire type.
    pub fn skip_field(&mut self) -> Result<(), WireError> {
        let header = self.current()?;
        self.skip_value(header, 0)
    }

    fn skip_value(&mut self, header: FieldHeader, group_depth: usize) -> Result<(), WireError> {
        match header.wire_type {
            WireType::Varint => self.read_raw_varint().map(drop),
            WireType::Fixed64 => self.advance(8),
            WireType::Fixed32 => self.advance(4),
            WireType::LengthDelimited => {
                let len_offset = self.pos;
                let len = self.read_raw_varint()?;
                let available = self.limit - self.pos;
                if len > available as u64 {
                    return Err(self.past_limit(len_offset, len));
                }
                self.advance(len as usize)
            }
            WireType::StartGroup => {
                if group_depth >= MAX_GROUP_DEPTH {
                    return Err(WireError::NestingTooDeep { offset: self.pos });
                }
                loop {
                    let offset = self.pos;
                    let inner = self.read_field_header()?.ok_or_else(|| {
                        self.eof_or_framing(offset, 1)
                    })?;
                    if inner.wire_type == WireType::EndGroup {
                        if inner.tag != header.tag {
                            return Err(WireError::UnexpectedEndGroup {
                                tag: inner.tag,
                                offset,
                            });
                        }
                        return Ok(());
                    }
                    self.skip_value(inner, group_depth + 1)?;
                }
            }
            WireType::EndGroup => Err(WireError::UnexpectedEndGroup {
                tag: header.tag,
                offset: self.field_start,
            }),
        }
    }

    /// Top-level completeness check: everything up to the buffer end has
    /// been consumed and no sub-item is open.
    pub fn check_fully_consumed(&self) -> Result<(), WireError> {
        if self.depth != 0 {
            return Err(WireError::Unbalanced { open: self.depth });
        }
        if self.pending.is_some() || self.pos != self.buf.len() {
            return Err(WireError::Framing {
                offset: self.pos,
                expected_end: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        self.expect_wire_type(WireType::Varint)?;
        self.read_raw_varint()
    }

    pub fn read_fixed32(&mut self) -> Result<u32, WireError> {
        self.expect_wire_type(WireType::Fixed32)?;
        self.read_raw_fixed32()
    }

    pub fn read_fixed64(&mut self) -> Result<u64, WireError> {
        self.expect_wire_type(WireType::Fixed64)?;
        self.read_raw_fixed64()
    }

    pub fn read_zigzag(&mut self) -> Result<i64, WireError> {
        self.read_varint().map(decode_zigzag)
    }

    /// Payload of the current length-delimited field, sharing the buffer.
    pub fn read_bytes(&mut self) -> Result<Bytes, WireError> {
        self.expect_wire_type(WireType::LengthDelimited)?;
        self.read_raw_length_delimited()
    }

    /// Append the payload of the current length-delimited field to `out`.
    pub fn append_bytes(&mut self, out: &mut Vec<u8>) -> Result<(), WireError> {
        let payload = self.read_bytes()?;
        out.extend_from_slice(&payload);
        Ok(())
    }

    pub fn read_string(&mut self) -> Result<Arc<str>, WireError> {
        let offset = self.pos;
        let payload = self.read_bytes()?;
        let s = std::str::from_utf8(&payload).map_err(|_| WireError::InvalidUtf8 { offset })?;
        Ok(Arc::from(s))
    }

    pub(crate) fn read_raw_varint(&mut self) -> Result<u64, WireError> {
        let offset = self.pos;
        let window = &self.buf[self.pos..self.limit];
        match take_varint(window) {
            Ok(Some((value, used))) => {
                self.pos += used;
                Ok(value)
            }
            Ok(None) => Err(self.eof_or_framing(offset, window.len() + 1)),
            Err(()) => Err(WireError::VarintOverflow { offset }),
        }
    }

    pub(crate) fn read_raw_fixed32(&mut self) -> Result<u32, WireError> {
        let start = self.pos;
        self.advance(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[start..start + 4]);
        Ok(u32::from_le_bytes(raw))
    }

    pub(crate) fn read_raw_fixed64(&mut self) -> Result<u64, WireError> {
        let start = self.pos;
        self.advance(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.buf[start..start + 8]);
        Ok(u64::from_le_bytes(raw))
    }

    pub(crate) fn read_raw_length_delimited(&mut self) -> Result<Bytes, WireError> {
        let len_offset = self.pos;
        let len = self.read_raw_varint()?;
        let available = self.limit - self.pos;
        if len > available as u64 {
            return Err(self.past_limit(len_offset, len));
        }
        let start = self.pos;
        self.pos += len as usize;
        Ok(self.buf.slice(start..self.pos))
    }

    /// Run `f` over the packed run of the current length-delimited field,
    /// once per element, until the run is exhausted.
    pub(crate) fn for_each_packed<F>(&mut self, mut f: F) -> Result<(), WireError>
    where
        F: FnMut(&mut Self) -> Result<(), WireError>,
    {
        let token = self.start_sub_item()?;
        while self.pos < self.limit {
            f(self)?;
        }
        self.end_sub_item(token)
    }

    fn advance(&mut self, n: usize) -> Result<(), WireError> {
        let available = self.limit - self.pos;
        if n > available {
            return Err(self.eof_or_framing(self.pos, n - available));
        }
        self.pos += n;
        Ok(())
    }

    /// A read that needs bytes beyond the current limit: inside a sub-item
    /// this is a framing violation, at top level the buffer is truncated.
    fn eof_or_framing(&self, offset: usize, needed: usize) -> WireError {
        if self.depth > 0 {
            WireError::Framing {
                offset,
                expected_end: self.limit,
            }
        } else {
            WireError::UnexpectedEof { offset, needed }
        }
    }

    fn past_limit(&self, offset: usize, len: u64) -> WireError {
        if self.depth > 0 {
            WireError::FrameOverrun {
                offset,
                length: len,
                available: self.limit - self.pos,
            }
        } else {
            WireError::UnexpectedEof {
                offset,
                needed: (len as usize).saturating_sub(self.limit - self.pos),
            }
        }
    }
}

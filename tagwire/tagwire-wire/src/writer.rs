use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    error::WireError,
    varint::put_varint,
    wire_type::{FieldHeader, WireType},
};

/// Handle for an open sub-item on a [`WireWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a sub-item must be closed with end_sub_item"]
pub struct FrameToken {
    start: usize,
    depth: usize,
}

/// Growable output buffer.
///
/// Sub-item payloads are written in place and their length prefix is
/// inserted when the sub-item is closed.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
    open: Vec<usize>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            open: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_field_header(&mut self, tag: u32, wire_type: WireType) {
        put_varint(&mut self.buf, FieldHeader::new(tag, wire_type).key());
    }

    pub fn write_raw_varint(&mut self, value: u64) {
        put_varint(&mut self.buf, value);
    }

    pub fn write_raw_fixed32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    pub fn write_raw_fixed64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Length prefix followed by `payload`.
    pub fn write_raw_length_delimited(&mut self, payload: &[u8]) {
        put_varint(&mut self.buf, payload.len() as u64);
        self.buf.put_slice(payload);
    }

    /// Open a sub-item; the caller has already written its header.
    pub fn start_sub_item(&mut self) -> FrameToken {
        let start = self.buf.len();
        self.open.push(start);
        FrameToken {
            start,
            depth: self.open.len(),
        }
    }

    /// Close the innermost sub-item and prefix it with its byte length.
    pub fn end_sub_item(&mut self, token: FrameToken) -> Result<(), WireError> {
        if self.open.len() != token.depth || self.open.last() != Some(&token.start) {
            return Err(WireError::Unbalanced {
                open: self.open.len(),
            });
        }
        self.open.pop();
        let payload = self.buf.split_off(token.start);
        put_varint(&mut self.buf, payload.len() as u64);
        self.buf.unsplit(payload);
        Ok(())
    }

    /// Header, then a sub-item filled by `body`.
    pub fn write_sub_item<E, F>(&mut self, tag: u32, body: F) -> Result<(), E>
    where
        E: From<WireError>,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.write_field_header(tag, WireType::LengthDelimited);
        let token = self.start_sub_item();
        body(self)?;
        self.end_sub_item(token)?;
        Ok(())
    }

    /// Finished buffer; fails while a sub-item is still open.
    pub fn finish(self) -> Result<Bytes, WireError> {
        if !self.open.is_empty() {
            return Err(WireError::Unbalanced {
                open: self.open.len(),
            });
        }
        Ok(self.buf.freeze())
    }
}

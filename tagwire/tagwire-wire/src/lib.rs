//! Reader and writer for the tag-delimited binary wire format.
//!
//! Every field is preceded by a varint header `(tag << 3) | wire_type`.
//! Nested messages are length-delimited sub-items; repeated fields repeat
//! their header once per element.
//!
//! Key components:
//! - [`WireReader`] — cursor over an in-memory buffer with explicit sub-item
//!   limits, tag peeking and generic skip-field
//! - [`WireWriter`] — buffer builder with back-patched sub-item lengths
//! - [`expected_wire_type`] — the scalar kind → wire type mapping

mod bcl;
mod error;
mod reader;
mod scalar;
mod varint;
mod wire_type;
mod writer;

pub use error::WireError;
pub use reader::{SubItemToken, WireReader};
pub use scalar::expected_wire_type;
pub use varint::{decode_zigzag, encode_zigzag, encoded_len};
pub use tagwire_core::MAX_TAG;
pub use wire_type::{FieldHeader, WireType};
pub use writer::{FrameToken, WireWriter};

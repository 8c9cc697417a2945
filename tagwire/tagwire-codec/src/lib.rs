//! Wire codec engine for `tagwire`.
//!
//! A [`Codec`] owns a compiled [`Registry`](tagwire_plan::Registry) and hands
//! out one [`Entry`] per type. Decoding interprets the type's decode plan
//! against a [`WireReader`](tagwire_wire::WireReader); encoding walks the same
//! plan in ascending tag order.
//!
//! ```ignore
//! let codec = Codec::builder().with_descriptors(descriptors).build()?;
//! let circle = codec.entry("Circle")?;
//! let bytes = circle.encode(&message)?;
//! let decoded = circle.decode(&bytes)?;
//! ```

mod codec;
mod decode;
mod encode;
mod error;
mod options;

pub use codec::{Codec, CodecBuilder, Entry};
pub use error::{DecodeError, EncodeError, UnknownSchemaError};
pub use options::{DecodeOptions, MismatchPolicy};

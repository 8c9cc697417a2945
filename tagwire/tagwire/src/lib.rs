mod error;
#[cfg(feature = "schema")]
mod loader;

pub use error::LoadError;
#[cfg(feature = "schema")]
pub use loader::SchemaLoader;
pub use tagwire_codec::{
    Codec, CodecBuilder, DecodeError, DecodeOptions, EncodeError, Entry, MismatchPolicy,
    UnknownSchemaError,
};
pub use tagwire_core as core;
pub use tagwire_plan as plan;
#[cfg(feature = "schema")]
pub use tagwire_schema as schema;
pub use tagwire_wire as wire;

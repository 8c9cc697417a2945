//! Error types for building a codec from schema files.

use tagwire_plan::CompileError;

/// Errors produced while loading schema text into a [`Codec`](crate::Codec).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// I/O error while reading a schema file.
    #[error("failed to read schema '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema text is syntactically invalid.
    #[cfg(feature = "schema")]
    #[error("{origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: tagwire_schema::SchemaParseError,
    },

    /// The combined descriptors failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

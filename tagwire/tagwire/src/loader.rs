//! Builds a [`Codec`] from one or more `.tws` schema sources.

use std::{fs, path::Path};

use tagwire_codec::{Codec, DecodeOptions};
use tagwire_core::TypeDescriptor;
use tagwire_plan::AccessorTable;
use tracing::debug;

use crate::error::LoadError;

/// Collects descriptors from schema text, then compiles them together.
///
/// Types may reference types declared in any other added source.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    descriptors: Vec<TypeDescriptor>,
    accessors: AccessorTable,
    options: DecodeOptions,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`; `origin` names the source in error messages.
    pub fn add_str(&mut self, origin: &str, text: &str) -> Result<&mut Self, LoadError> {
        let parsed =
            tagwire_schema::parse_schema(text).map_err(|source| LoadError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        debug!(origin, types = parsed.len(), "parsed schema source");
        self.descriptors.extend(parsed);
        Ok(self)
    }

    pub fn add_file(&mut self, path: &Path) -> Result<&mut Self, LoadError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: origin.clone(),
            source,
        })?;
        self.add_str(&origin, &text)
    }

    pub fn with_accessors(mut self, accessors: AccessorTable) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }

    pub fn build(self) -> Result<Codec, LoadError> {
        let codec = Codec::builder()
            .with_descriptors(self.descriptors)
            .with_accessors(self.accessors)
            .with_options(self.options)
            .build()?;
        Ok(codec)
    }
}

//! Codec handle and per-type entry points.

use std::sync::Arc;

use bytes::Bytes;
use tagwire_core::{Message, TypeDescriptor};
use tagwire_plan::{AccessorTable, CompileError, Registry, SchemaId};
use tagwire_wire::{WireReader, WireWriter};

use crate::{
    decode::Decoder,
    encode::Encoder,
    error::{DecodeError, EncodeError, UnknownSchemaError},
    options::DecodeOptions,
};

/// A compiled registry plus the options every decode runs with.
///
/// Cheap to clone; all clones share the same registry.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<Registry>,
    options: DecodeOptions,
}

/// Builder for configuring [`Codec`].
#[derive(Debug, Default)]
pub struct CodecBuilder {
    descriptors: Vec<TypeDescriptor>,
    accessors: AccessorTable,
    options: DecodeOptions,
}

impl CodecBuilder {
    pub fn with_descriptors(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn with_accessors(mut self, accessors: AccessorTable) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Compile every descriptor into a registry.
    pub fn build(self) -> Result<Codec, CompileError> {
        let registry = Registry::build(self.descriptors, &self.accessors)?;
        Ok(Codec {
            registry: Arc::new(registry),
            options: self.options,
        })
    }
}

impl Codec {
    pub fn builder() -> CodecBuilder {
        CodecBuilder::default()
    }

    /// Wrap an already compiled registry, with default options.
    pub fn from_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode/encode entry point for `type_name`.
    pub fn entry(&self, type_name: &str) -> Result<Entry, UnknownSchemaError> {
        let id = self
            .registry
            .id(type_name)
            .ok_or_else(|| UnknownSchemaError {
                type_name: type_name.to_string(),
            })?;
        Ok(Entry {
            registry: Arc::clone(&self.registry),
            options: self.options,
            id,
        })
    }

    pub fn decode(&self, type_name: &str, bytes: &[u8]) -> Result<Message, DecodeError> {
        self.entry(type_name)?.decode(bytes)
    }

    /// Encode `message` as its own concrete type.
    pub fn encode(&self, message: &Message) -> Result<Bytes, EncodeError> {
        self.entry(message.type_name())?.encode(message)
    }
}

/// Entry point for one type.
///
/// Decoding and encoding run through the root of the type's polymorphic
/// group, so subtype arms are read and written around the members; the
/// result must still be the entry type or one of its descendants.
#[derive(Debug, Clone)]
pub struct Entry {
    registry: Arc<Registry>,
    options: DecodeOptions,
    id: SchemaId,
}

impl Entry {
    pub fn schema(&self) -> SchemaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.registry.plan(self.id).name
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Message, DecodeError> {
        self.decode_into(bytes, None)
    }

    /// Decode into an existing instance, merging into its fields.
    ///
    /// Scalars and nested reference-shaped messages are overwritten in
    /// place, repeated fields are replaced, byte fields accumulate.
    pub fn decode_into(
        &self,
        bytes: &[u8],
        instance: Option<Message>,
    ) -> Result<Message, DecodeError> {
        let root = self.registry.group_root(self.id);
        if let Some(instance) = &instance {
            self.check_lineage(root, instance)?;
        }
        let reader = WireReader::from_slice(bytes);
        let message = Decoder::new(&self.registry, self.options, reader).decode_root(root, instance)?;
        self.check_lineage(self.id, &message)?;
        Ok(message)
    }

    pub fn encode(&self, message: &Message) -> Result<Bytes, EncodeError> {
        self.check_lineage(self.id, message)
            .map_err(|_| EncodeError::InstanceMismatch {
                expected: self.name().to_string(),
                actual: message.type_name().to_string(),
            })?;
        let mut writer = WireWriter::new();
        Encoder::new(&self.registry).encode_message(
            self.registry.group_root(self.id),
            message,
            &mut writer,
        )?;
        Ok(writer.finish()?)
    }

    fn check_lineage(&self, ancestor: SchemaId, message: &Message) -> Result<(), DecodeError> {
        let belongs = self
            .registry
            .id(message.type_name())
            .is_some_and(|actual| self.registry.is_ancestor_or_self(ancestor, actual));
        if belongs {
            Ok(())
        } else {
            Err(DecodeError::InstanceMismatch {
                expected: self.registry.plan(ancestor).name.clone(),
                actual: message.type_name().to_string(),
            })
        }
    }
}

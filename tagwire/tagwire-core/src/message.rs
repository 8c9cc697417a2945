//! Dynamic message instance populated by the decoder.

use std::collections::{BTreeMap, btree_map};

use crate::value::Value;

/// An object instance: its concrete type plus tag-keyed field values.
///
/// Fields of every layer of a polymorphic instance live in the same map;
/// the plan compiler guarantees that tags along one inheritance chain are
/// disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    type_name: String,
    fields: BTreeMap<u32, Value>,
}

impl Message {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, tag: u32, value: Value) -> Self {
        self.fields.insert(tag, value);
        self
    }

    /// Name of the most-derived type this instance currently has.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Change the concrete type, keeping the field values.
    pub fn reshape(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    pub fn get(&self, tag: u32) -> Option<&Value> {
        self.fields.get(&tag)
    }

    pub fn get_mut(&mut self, tag: u32) -> Option<&mut Value> {
        self.fields.get_mut(&tag)
    }

    pub fn set(&mut self, tag: u32, value: Value) -> Option<Value> {
        self.fields.insert(tag, value)
    }

    pub fn take(&mut self, tag: u32) -> Option<Value> {
        self.fields.remove(&tag)
    }

    pub fn contains(&self, tag: u32) -> bool {
        self.fields.contains_key(&tag)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(u32, &Value) -> bool) {
        self.fields.retain(|tag, value| keep(*tag, value));
    }

    /// Fields in ascending tag order.
    pub fn fields(&self) -> btree_map::Iter<'_, u32, Value> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

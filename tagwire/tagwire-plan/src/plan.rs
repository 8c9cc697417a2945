use std::{
    collections::{BTreeMap, btree_map},
    fmt::{Display, Formatter, Result},
};

use tagwire_core::{DataFormat, PrimitiveKind, TypeShape};

use crate::accessor::{Getter, Setter};

/// Index of a compiled plan inside its [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(pub(crate) u32);

impl SchemaId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for SchemaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "#{}", self.0)
    }
}

/// Collection flavour a repeated field decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Array,
    List,
    /// Insertion-ordered; duplicate elements are dropped on insert.
    Set,
}

impl ContainerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Array => "array",
            ContainerKind::List => "list",
            ContainerKind::Set => "set",
        }
    }
}

/// How a single element of a repeated field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementOp {
    Scalar {
        kind: PrimitiveKind,
        format: DataFormat,
    },
    /// Length-delimited sub-item decoded with the given plan.
    Message { schema: SchemaId },
}

/// One entry of a decode plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Scalar {
        kind: PrimitiveKind,
        format: DataFormat,
    },
    Message {
        schema: SchemaId,
    },
    Repeated {
        container: ContainerKind,
        element: ElementOp,
    },
    /// Raw byte payload, appended to the existing buffer.
    Bytes,
    /// Known-subtype arm: the sub-item carries the derived type's own fields.
    Dispatch {
        schema: SchemaId,
    },
}

/// A compiled member (or subtype arm) keyed by its tag.
#[derive(Debug, Clone)]
pub struct FieldOp {
    pub tag: u32,
    /// Member name, or the derived type name for dispatch arms.
    pub name: String,
    pub op: Operation,
    pub getter: Option<Getter>,
    pub setter: Option<Setter>,
}

impl FieldOp {
    pub fn is_dispatch(&self) -> bool {
        matches!(self.op, Operation::Dispatch { .. })
    }
}

/// The compiled tag → operation table for one type.
///
/// Covers the type's own members and its known-subtype arms only;
/// inherited members live in the ancestors' plans.
#[derive(Debug, Clone)]
pub struct DecodePlan {
    pub id: SchemaId,
    pub name: String,
    pub shape: TypeShape,
    pub is_abstract: bool,
    /// A missing or rejected instance is allocated as this type before the
    /// first field is assigned. Set for concrete reference types only: value
    /// types always decode into a fresh instance, and an abstract type gets a
    /// placeholder that one of its subtype arms reshapes.
    pub ensure_instance: bool,
    pub(crate) fields: BTreeMap<u32, FieldOp>,
}

impl DecodePlan {
    pub fn get(&self, tag: u32) -> Option<&FieldOp> {
        self.fields.get(&tag)
    }

    /// Operations in ascending tag order.
    pub fn ops(&self) -> btree_map::Values<'_, u32, FieldOp> {
        self.fields.values()
    }

    /// Member operations, excluding dispatch arms.
    pub fn members(&self) -> impl Iterator<Item = &FieldOp> {
        self.ops().filter(|op| !op.is_dispatch())
    }

    pub fn dispatch_arms(&self) -> impl Iterator<Item = (u32, SchemaId)> + '_ {
        self.ops().filter_map(|op| match op.op {
            Operation::Dispatch { schema } => Some((op.tag, schema)),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

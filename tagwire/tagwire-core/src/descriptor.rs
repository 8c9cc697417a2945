//! Type descriptors: the declared shape of a type as seen by the plan compiler.
//!
//! A descriptor lists every member together with its optional field tag and
//! accessor overrides, plus the closed list of known subtypes reachable
//! from the type on the wire.

use std::fmt::{Display, Formatter, Result};

use crate::scalar::{DataFormat, PrimitiveKind};

/// Allocation shape of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeShape {
    /// Heap object: nested occurrences are merged into an existing instance.
    #[default]
    Reference,
    /// Plain value: nested occurrences always start from a fresh instance.
    Value,
}

/// A member's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(PrimitiveKind),
    /// Another described type, by name.
    Named(String),
    Array(Box<TypeExpr>),
    List(Box<TypeExpr>),
    Set(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn array(elem: TypeExpr) -> Self {
        Self::Array(Box::new(elem))
    }

    pub fn list(elem: TypeExpr) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn set(elem: TypeExpr) -> Self {
        Self::Set(Box::new(elem))
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            TypeExpr::Array(_) | TypeExpr::List(_) | TypeExpr::Set(_)
        )
    }
}

impl From<PrimitiveKind> for TypeExpr {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TypeExpr::Primitive(kind) => f.write_str(kind.type_name()),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Array(elem) => write!(f, "{elem}[]"),
            TypeExpr::List(elem) => write!(f, "list<{elem}>"),
            TypeExpr::Set(elem) => write!(f, "set<{elem}>"),
        }
    }
}

/// Largest representable field tag (29 bits).
pub const MAX_TAG: u32 = (1 << 29) - 1;

/// A declared member (field or property) of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: TypeExpr,
    /// Field tag; members without one are not part of the wire contract.
    pub tag: Option<u32>,
    pub format: DataFormat,
    /// Accessor used instead of direct field reads.
    pub getter: Option<String>,
    /// Accessor used instead of direct field writes.
    pub setter: Option<String>,
    /// Explicit exclusion marker; wins over a tag.
    pub skip: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            tag: None,
            format: DataFormat::Default,
            getter: None,
            setter: None,
            skip: false,
        }
    }

    pub fn tagged(tag: u32, name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            tag: Some(tag),
            ..Self::new(name, ty)
        }
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_getter(mut self, accessor: impl Into<String>) -> Self {
        self.getter = Some(accessor.into());
        self
    }

    pub fn with_setter(mut self, accessor: impl Into<String>) -> Self {
        self.setter = Some(accessor.into());
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

/// One arm of a polymorphic group: `(dispatch tag, derived type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownSubtype {
    pub tag: u32,
    pub type_name: String,
}

impl KnownSubtype {
    pub fn new(tag: u32, type_name: impl Into<String>) -> Self {
        Self {
            tag,
            type_name: type_name.into(),
        }
    }
}

/// A described type: the plan compiler's unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub shape: TypeShape,
    pub is_abstract: bool,
    pub members: Vec<MemberDescriptor>,
    /// Known subtypes in declaration order.
    pub subtypes: Vec<KnownSubtype>,
}

impl TypeDescriptor {
    /// A reference-shaped (class-like) type.
    pub fn message(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Reference,
            is_abstract: false,
            members: Vec::new(),
            subtypes: Vec::new(),
        }
    }

    /// A value-shaped (struct-like) type.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            shape: TypeShape::Value,
            ..Self::message(name)
        }
    }

    pub fn abstract_message(name: impl Into<String>) -> Self {
        Self {
            is_abstract: true,
            ..Self::message(name)
        }
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Shorthand for a tagged member with the default data format.
    pub fn field(self, tag: u32, name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        self.with_member(MemberDescriptor::tagged(tag, name, ty))
    }

    pub fn with_subtype(mut self, tag: u32, type_name: impl Into<String>) -> Self {
        self.subtypes.push(KnownSubtype::new(tag, type_name));
        self
    }
}

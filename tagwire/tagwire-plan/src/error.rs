use tagwire_core::{DataFormat, PrimitiveKind};

/// A schema that cannot be lowered into a decode plan.
///
/// Raised by [`Registry::build`](crate::Registry::build) before any bytes are
/// touched. `member` is the member name, or `include <tag>` for a
/// known-subtype entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("type '{type_name}' is declared more than once")]
    DuplicateType { type_name: String },

    #[error("{type_name}.{member}: tag {tag} is already used by '{previous}'")]
    DuplicateTag {
        type_name: String,
        member: String,
        tag: u32,
        previous: String,
    },

    #[error("{type_name}.{member}: tag {tag} is outside 1..=536870911")]
    InvalidTag {
        type_name: String,
        member: String,
        tag: u32,
    },

    #[error(
        "{type_name}.{member}: tag {tag} collides with '{ancestor_member}' of ancestor '{ancestor}'"
    )]
    TagConflict {
        type_name: String,
        member: String,
        tag: u32,
        ancestor: String,
        ancestor_member: String,
    },

    #[error("{type_name}.{member}: unknown type '{target}'")]
    UnresolvedType {
        type_name: String,
        member: String,
        target: String,
    },

    #[error("{type_name}.{member}: '{subtype}' is already a known subtype of '{first_base}'")]
    DuplicateSubtype {
        type_name: String,
        member: String,
        subtype: String,
        first_base: String,
    },

    #[error("{type_name}.{member}: known-subtype declarations form a cycle")]
    CyclicInheritance { type_name: String, member: String },

    #[error("{type_name}.{member}: unsupported shape: {detail}")]
    UnsupportedShape {
        type_name: String,
        member: String,
        detail: String,
    },

    #[error("{type_name}.{member}: data format '{}' is not valid for {kind}", .format.name())]
    InvalidFormat {
        type_name: String,
        member: String,
        kind: PrimitiveKind,
        format: DataFormat,
    },

    #[error("{type_name}.{member}: accessor '{accessor}' is not registered")]
    UnknownAccessor {
        type_name: String,
        member: String,
        accessor: String,
    },
}

impl CompileError {
    /// Name of the type the error was raised for.
    pub fn type_name(&self) -> &str {
        match self {
            CompileError::DuplicateType { type_name }
            | CompileError::DuplicateTag { type_name, .. }
            | CompileError::InvalidTag { type_name, .. }
            | CompileError::TagConflict { type_name, .. }
            | CompileError::UnresolvedType { type_name, .. }
            | CompileError::DuplicateSubtype { type_name, .. }
            | CompileError::CyclicInheritance { type_name, .. }
            | CompileError::UnsupportedShape { type_name, .. }
            | CompileError::InvalidFormat { type_name, .. }
            | CompileError::UnknownAccessor { type_name, .. } => type_name,
        }
    }
}

//! Decode-plan compiler for `tagwire`.
//!
//! [`Registry::build`] lowers a set of [`TypeDescriptor`](tagwire_core::TypeDescriptor)s
//! into one immutable [`DecodePlan`] per type: a tag → [`Operation`] table the
//! codec interprets without further inspection of the descriptors.
//!
//! Polymorphic groups are declared through known-subtype entries; member
//! types that belong to a group resolve to the group root so nested framing
//! always recurses through the shared entry point.

mod accessor;
pub mod builtins;
mod compiler;
mod error;
mod lineage;
mod plan;
mod registry;

pub use accessor::{AccessorTable, Getter, Setter};
pub use error::CompileError;
pub use plan::{ContainerKind, DecodePlan, ElementOp, FieldOp, Operation, SchemaId};
pub use registry::{PlanDisplay, Registry};

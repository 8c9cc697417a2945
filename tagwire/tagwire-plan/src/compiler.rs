//! Lowering of one type descriptor into its decode plan.

use std::collections::{BTreeMap, HashMap};

use tagwire_core::{
    MAX_TAG, MemberDescriptor, PrimitiveKind, TypeDescriptor, TypeExpr, TypeShape,
};
use tracing::debug;

use crate::{
    accessor::AccessorTable,
    error::CompileError,
    lineage::Lineage,
    plan::{ContainerKind, DecodePlan, ElementOp, FieldOp, Operation, SchemaId},
};

/// Everything a single plan compilation can look at.
pub(crate) struct CompileContext<'a> {
    pub ids: &'a HashMap<String, SchemaId>,
    pub lineage: &'a Lineage,
    pub accessors: &'a AccessorTable,
}

/// Whether a member takes part in the wire contract.
pub(crate) fn is_wire_member(member: &MemberDescriptor) -> bool {
    member.tag.is_some() && !member.skip
}

/// Tags a type claims for itself: its wire members and its subtype arms.
///
/// Values are the owning member's display name.
pub(crate) fn own_tags(desc: &TypeDescriptor) -> Result<BTreeMap<u32, String>, CompileError> {
    let mut tags: BTreeMap<u32, String> = BTreeMap::new();
    let members = desc
        .members
        .iter()
        .filter(|m| is_wire_member(m))
        .filter_map(|m| m.tag.map(|tag| (tag, m.name.clone())));
    let arms = desc
        .subtypes
        .iter()
        .map(|s| (s.tag, format!("include {}", s.tag)));

    for (tag, member) in members.chain(arms) {
        if tag == 0 || tag > MAX_TAG {
            return Err(CompileError::InvalidTag {
                type_name: desc.name.clone(),
                member,
                tag,
            });
        }
        if let Some(previous) = tags.get(&tag) {
            return Err(CompileError::DuplicateTag {
                type_name: desc.name.clone(),
                member,
                tag,
                previous: previous.clone(),
            });
        }
        tags.insert(tag, member);
    }
    Ok(tags)
}

pub(crate) fn compile_plan(
    desc: &TypeDescriptor,
    id: SchemaId,
    ctx: &CompileContext<'_>,
) -> Result<DecodePlan, CompileError> {
    let mut fields = BTreeMap::new();

    for member in &desc.members {
        let Some(tag) = member.tag.filter(|_| !member.skip) else {
            debug!(
                type_name = %desc.name,
                member = %member.name,
                skip = member.skip,
                "member excluded from decode plan"
            );
            continue;
        };
        let op = classify(desc, member, ctx)?;
        let getter = match &member.getter {
            Some(name) => Some(lookup(desc, member, name, ctx.accessors.getter(name))?.clone()),
            None => None,
        };
        let setter = match &member.setter {
            Some(name) => Some(lookup(desc, member, name, ctx.accessors.setter(name))?.clone()),
            None => None,
        };
        fields.insert(
            tag,
            FieldOp {
                tag,
                name: member.name.clone(),
                op,
                getter,
                setter,
            },
        );
    }

    for sub in &desc.subtypes {
        let schema = resolve(desc, &format!("include {}", sub.tag), &sub.type_name, ctx)?;
        fields.insert(
            sub.tag,
            FieldOp {
                tag: sub.tag,
                name: sub.type_name.clone(),
                op: Operation::Dispatch { schema },
                getter: None,
                setter: None,
            },
        );
    }

    Ok(DecodePlan {
        id,
        name: desc.name.clone(),
        shape: desc.shape,
        is_abstract: desc.is_abstract,
        ensure_instance: desc.shape == TypeShape::Reference && !desc.is_abstract,
        fields,
    })
}

fn lookup<'t, T>(
    desc: &TypeDescriptor,
    member: &MemberDescriptor,
    name: &str,
    found: Option<&'t T>,
) -> Result<&'t T, CompileError> {
    found.ok_or_else(|| CompileError::UnknownAccessor {
        type_name: desc.name.clone(),
        member: member.name.clone(),
        accessor: name.to_string(),
    })
}

fn resolve(
    desc: &TypeDescriptor,
    member: &str,
    target: &str,
    ctx: &CompileContext<'_>,
) -> Result<SchemaId, CompileError> {
    ctx.ids
        .get(target)
        .copied()
        .ok_or_else(|| CompileError::UnresolvedType {
            type_name: desc.name.clone(),
            member: member.to_string(),
            target: target.to_string(),
        })
}

/// Nested message types enter through the root of their polymorphic group.
fn resolve_message(
    desc: &TypeDescriptor,
    member: &MemberDescriptor,
    target: &str,
    ctx: &CompileContext<'_>,
) -> Result<SchemaId, CompileError> {
    let id = resolve(desc, &member.name, target, ctx)?;
    Ok(ctx.lineage.root(id))
}

fn classify(
    desc: &TypeDescriptor,
    member: &MemberDescriptor,
    ctx: &CompileContext<'_>,
) -> Result<Operation, CompileError> {
    let unsupported = |detail: String| CompileError::UnsupportedShape {
        type_name: desc.name.clone(),
        member: member.name.clone(),
        detail,
    };

    match &member.ty {
        TypeExpr::Primitive(PrimitiveKind::Bytes) => Ok(Operation::Bytes),
        TypeExpr::Primitive(kind) => {
            check_format(desc, member, *kind)?;
            Ok(Operation::Scalar {
                kind: *kind,
                format: member.format,
            })
        }
        TypeExpr::Named(name) => Ok(Operation::Message {
            schema: resolve_message(desc, member, name, ctx)?,
        }),
        TypeExpr::Array(elem) if **elem == TypeExpr::Primitive(PrimitiveKind::U8) => {
            Ok(Operation::Bytes)
        }
        TypeExpr::Array(elem) | TypeExpr::List(elem) | TypeExpr::Set(elem) => {
            let container = match &member.ty {
                TypeExpr::Array(_) => ContainerKind::Array,
                TypeExpr::List(_) => ContainerKind::List,
                _ => ContainerKind::Set,
            };
            let element = match elem.as_ref() {
                TypeExpr::Primitive(PrimitiveKind::Bytes) => {
                    return Err(unsupported(format!(
                        "{} of bytes is not supported",
                        container.name()
                    )));
                }
                TypeExpr::Primitive(kind) => {
                    check_format(desc, member, *kind)?;
                    ElementOp::Scalar {
                        kind: *kind,
                        format: member.format,
                    }
                }
                TypeExpr::Named(name) => ElementOp::Message {
                    schema: resolve_message(desc, member, name, ctx)?,
                },
                TypeExpr::Array(_) | TypeExpr::List(_) | TypeExpr::Set(_) => {
                    return Err(unsupported(format!(
                        "nested container '{}' is not supported",
                        member.ty
                    )));
                }
            };
            Ok(Operation::Repeated { container, element })
        }
    }
}

fn check_format(
    desc: &TypeDescriptor,
    member: &MemberDescriptor,
    kind: PrimitiveKind,
) -> Result<(), CompileError> {
    if kind.supports_format(member.format) {
        Ok(())
    } else {
        Err(CompileError::InvalidFormat {
            type_name: desc.name.clone(),
            member: member.name.clone(),
            kind,
            format: member.format,
        })
    }
}

//! Schema registry: type name → compiled decode plan.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use tagwire_core::{DataFormat, TypeDescriptor, TypeShape};
use tracing::debug;

use crate::{
    accessor::AccessorTable,
    builtins::ensure_builtin_types,
    compiler::{CompileContext, compile_plan, own_tags},
    error::CompileError,
    lineage::Lineage,
    plan::{DecodePlan, ElementOp, Operation, SchemaId},
};

/// Immutable set of compiled plans.
///
/// Built once with [`Registry::build`]; read-only afterwards, so it can be
/// shared between threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Registry {
    plans: Vec<Arc<DecodePlan>>,
    by_name: HashMap<String, SchemaId>,
    lineage: Lineage,
}

impl Registry {
    /// Compile `descriptors` (plus the built-in fixed schemas) into plans.
    ///
    /// Fails on the first schema that cannot be compiled; no partial
    /// registry is returned.
    pub fn build(
        descriptors: impl IntoIterator<Item = TypeDescriptor>,
        accessors: &AccessorTable,
    ) -> Result<Self, CompileError> {
        let mut descriptors: Vec<TypeDescriptor> = descriptors.into_iter().collect();

        let mut by_name = HashMap::with_capacity(descriptors.len());
        for (index, desc) in descriptors.iter().enumerate() {
            if by_name
                .insert(desc.name.clone(), SchemaId(index as u32))
                .is_some()
            {
                return Err(CompileError::DuplicateType {
                    type_name: desc.name.clone(),
                });
            }
        }
        let declared = descriptors.len();
        ensure_builtin_types(&mut descriptors);
        for (index, desc) in descriptors.iter().enumerate().skip(declared) {
            by_name.insert(desc.name.clone(), SchemaId(index as u32));
        }

        let tags = descriptors
            .iter()
            .map(own_tags)
            .collect::<Result<Vec<_>, _>>()?;
        let lineage = Lineage::build(&descriptors, &by_name)?;
        check_ancestor_tags(&descriptors, &tags, &lineage)?;

        let ctx = CompileContext {
            ids: &by_name,
            lineage: &lineage,
            accessors,
        };
        let plans = descriptors
            .iter()
            .enumerate()
            .map(|(index, desc)| compile_plan(desc, SchemaId(index as u32), &ctx).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            declared,
            builtin = plans.len() - declared,
            "compiled decode plans"
        );
        Ok(Self {
            plans,
            by_name,
            lineage,
        })
    }

    pub fn id(&self, name: &str) -> Option<SchemaId> {
        self.by_name.get(name).copied()
    }

    /// Plan for an id minted by this registry.
    pub fn plan(&self, id: SchemaId) -> &Arc<DecodePlan> {
        &self.plans[id.index()]
    }

    pub fn plan_by_name(&self, name: &str) -> Option<&Arc<DecodePlan>> {
        self.id(name).map(|id| self.plan(id))
    }

    /// Plans in registration order: declared types first, then built-ins.
    pub fn plans(&self) -> impl Iterator<Item = &Arc<DecodePlan>> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Direct base of `id` in its polymorphic group.
    pub fn parent(&self, id: SchemaId) -> Option<SchemaId> {
        self.lineage.parent(id).map(|link| link.base)
    }

    /// Dispatch tag under which `id` is reached from its base.
    pub fn dispatch_tag(&self, id: SchemaId) -> Option<u32> {
        self.lineage.parent(id).map(|link| link.tag)
    }

    /// `id` followed by its ancestors, nearest first.
    pub fn ancestors(&self, id: SchemaId) -> impl Iterator<Item = SchemaId> + '_ {
        self.lineage.ancestors(id)
    }

    /// Least-derived ancestor of `id`; `id` itself outside any group.
    pub fn group_root(&self, id: SchemaId) -> SchemaId {
        self.lineage.root(id)
    }

    pub fn is_ancestor_or_self(&self, ancestor: SchemaId, id: SchemaId) -> bool {
        self.lineage.is_ancestor_or_self(ancestor, id)
    }

    pub fn common_ancestor(&self, a: SchemaId, b: SchemaId) -> Option<SchemaId> {
        self.lineage.common_ancestor(a, b)
    }

    /// Human-readable listing of one plan.
    pub fn display_plan(&self, id: SchemaId) -> PlanDisplay<'_> {
        PlanDisplay { registry: self, id }
    }
}

/// A derived type's own tags must not reuse any tag claimed by an ancestor.
fn check_ancestor_tags(
    descriptors: &[TypeDescriptor],
    tags: &[BTreeMap<u32, String>],
    lineage: &Lineage,
) -> Result<(), CompileError> {
    for (index, desc) in descriptors.iter().enumerate() {
        let id = SchemaId(index as u32);
        for ancestor in lineage.ancestors(id).skip(1) {
            let ancestor_tags = &tags[ancestor.index()];
            for (tag, member) in &tags[index] {
                if let Some(ancestor_member) = ancestor_tags.get(tag) {
                    return Err(CompileError::TagConflict {
                        type_name: desc.name.clone(),
                        member: member.clone(),
                        tag: *tag,
                        ancestor: descriptors[ancestor.index()].name.clone(),
                        ancestor_member: ancestor_member.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// [`Display`] adapter returned by [`Registry::display_plan`].
pub struct PlanDisplay<'a> {
    registry: &'a Registry,
    id: SchemaId,
}

impl PlanDisplay<'_> {
    fn name(&self, id: SchemaId) -> &str {
        &self.registry.plan(id).name
    }

    fn element(&self, element: &ElementOp) -> String {
        match element {
            ElementOp::Scalar { kind, format } => format!("{kind}{}", format_suffix(*format)),
            ElementOp::Message { schema } => self.name(*schema).to_string(),
        }
    }
}

fn format_suffix(format: DataFormat) -> String {
    match format {
        DataFormat::Default => String::new(),
        other => format!(" ({})", other.name()),
    }
}

impl Display for PlanDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let plan = self.registry.plan(self.id);
        let keyword = match plan.shape {
            TypeShape::Reference => "message",
            TypeShape::Value => "struct",
        };
        let mut flags = Vec::new();
        if plan.is_abstract {
            flags.push("abstract".to_string());
        }
        if let Some(parent) = self.registry.parent(self.id) {
            flags.push(format!("extends {}", self.name(parent)));
        }
        write!(f, "{keyword} {}", plan.name)?;
        if !flags.is_empty() {
            write!(f, " [{}]", flags.join(", "))?;
        }
        writeln!(f)?;

        for op in plan.ops() {
            let rendered = match &op.op {
                Operation::Scalar { kind, format } => {
                    format!("scalar {kind}{}", format_suffix(*format))
                }
                Operation::Bytes => "bytes".to_string(),
                Operation::Message { schema } => format!("message {}", self.name(*schema)),
                Operation::Repeated { container, element } => {
                    format!("repeated {}<{}>", container.name(), self.element(element))
                }
                Operation::Dispatch { schema } => format!("dispatch -> {}", self.name(*schema)),
            };
            write!(f, "  {:>5}  {:<20} {rendered}", op.tag, op.name)?;
            if let Some(getter) = &op.getter {
                write!(f, " get={}", getter.name())?;
            }
            if let Some(setter) = &op.setter {
                write!(f, " set={}", setter.name())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

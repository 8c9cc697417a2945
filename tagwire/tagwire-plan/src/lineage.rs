//! Parent links derived from known-subtype declarations.

use std::collections::HashMap;

use tagwire_core::{TypeDescriptor, TypeShape};

use crate::{error::CompileError, plan::SchemaId};

/// Base of a derived type together with the dispatch tag that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParentLink {
    pub base: SchemaId,
    pub tag: u32,
}

/// Parent link per schema, indexed by [`SchemaId`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Lineage {
    parents: Vec<Option<ParentLink>>,
}

impl Lineage {
    pub fn build(
        descriptors: &[TypeDescriptor],
        ids: &HashMap<String, SchemaId>,
    ) -> Result<Self, CompileError> {
        let mut parents: Vec<Option<ParentLink>> = vec![None; descriptors.len()];

        for (base_index, base) in descriptors.iter().enumerate() {
            for sub in &base.subtypes {
                let member = format!("include {}", sub.tag);
                let child = *ids.get(&sub.type_name).ok_or_else(|| {
                    CompileError::UnresolvedType {
                        type_name: base.name.clone(),
                        member: member.clone(),
                        target: sub.type_name.clone(),
                    }
                })?;
                let derived = &descriptors[child.index()];
                if base.shape == TypeShape::Value || derived.shape == TypeShape::Value {
                    return Err(CompileError::UnsupportedShape {
                        type_name: base.name.clone(),
                        member,
                        detail: format!(
                            "value-shaped types cannot take part in a polymorphic group ('{}' → '{}')",
                            base.name, derived.name
                        ),
                    });
                }
                if let Some(existing) = parents[child.index()] {
                    return Err(CompileError::DuplicateSubtype {
                        type_name: base.name.clone(),
                        member,
                        subtype: sub.type_name.clone(),
                        first_base: descriptors[existing.base.index()].name.clone(),
                    });
                }
                parents[child.index()] = Some(ParentLink {
                    base: SchemaId(base_index as u32),
                    tag: sub.tag,
                });
            }
        }

        let lineage = Self { parents };
        lineage.check_acyclic(descriptors)?;
        Ok(lineage)
    }

    fn check_acyclic(&self, descriptors: &[TypeDescriptor]) -> Result<(), CompileError> {
        let limit = self.parents.len();
        for start in 0..limit {
            let mut current = start;
            let mut steps = 0;
            while let Some(link) = self.parents[current] {
                steps += 1;
                if steps > limit {
                    let link = self.parents[start].unwrap_or(link);
                    return Err(CompileError::CyclicInheritance {
                        type_name: descriptors[link.base.index()].name.clone(),
                        member: format!("include {}", link.tag),
                    });
                }
                current = link.base.index();
            }
        }
        Ok(())
    }

    pub fn parent(&self, id: SchemaId) -> Option<ParentLink> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// `id` followed by each of its ancestors, nearest first.
    pub fn ancestors(&self, id: SchemaId) -> Ancestors<'_> {
        Ancestors {
            lineage: self,
            next: Some(id),
        }
    }

    /// Least-derived ancestor of `id` (`id` itself when it has no base).
    pub fn root(&self, id: SchemaId) -> SchemaId {
        self.ancestors(id).last().unwrap_or(id)
    }

    pub fn is_ancestor_or_self(&self, ancestor: SchemaId, id: SchemaId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Nearest type that both `a` and `b` derive from (or are).
    pub fn common_ancestor(&self, a: SchemaId, b: SchemaId) -> Option<SchemaId> {
        self.ancestors(a).find(|&candidate| self.is_ancestor_or_self(candidate, b))
    }
}

pub(crate) struct Ancestors<'a> {
    lineage: &'a Lineage,
    next: Option<SchemaId>,
}

impl Iterator for Ancestors<'_> {
    type Item = SchemaId;

    fn next(&mut self) -> Option<SchemaId> {
        let current = self.next?;
        self.next = self.lineage.parent(current).map(|link| link.base);
        Some(current)
    }
}

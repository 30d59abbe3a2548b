//! Version families
//!
//! Provides [`FamilyResolver`], which turns the leaf set into validated
//! `[base, base1, …, baseN]` chains.

use crate::config::{GapPolicy, GenerationConfig};
use crate::error::MalformedGraph;
use crate::leaf::LeafSet;
use crate::version::{family_chain, split_version};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wrapgen_model::{Iid, InterfaceGraph};

/// One version of a family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Interface name
    pub name: String,
    /// Version number, 0 for the base
    pub version: u32,
    /// Interface id
    pub iid: Iid,
}

/// Ascending chain of versions sharing a base name
///
/// The last member is the family's leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    base: String,
    members: Vec<FamilyMember>,
}

impl Family {
    /// Create family from ascending members
    ///
    /// Returns `None` when `members` is empty.
    #[must_use]
    pub fn new(base: impl Into<String>, members: Vec<FamilyMember>) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        Some(Self {
            base: base.into(),
            members,
        })
    }

    /// Base name (version 0)
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Members, oldest first
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    /// Members, newest first (promotion order)
    pub fn newest_first(&self) -> impl Iterator<Item = &FamilyMember> {
        self.members.iter().rev()
    }

    /// Highest version
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> Option<&FamilyMember> {
        self.members.last()
    }

    /// Member names, oldest first
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    /// Find member by interface id
    #[must_use]
    pub fn member_by_iid(&self, iid: &Iid) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.iid == *iid)
    }

    /// Check if `iid` belongs to this family
    #[inline]
    #[must_use]
    pub fn contains_iid(&self, iid: &Iid) -> bool {
        self.member_by_iid(iid).is_some()
    }

    /// Number of members
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if family has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Resolves the families of an interface graph
#[derive(Debug, Clone, Copy)]
pub struct FamilyResolver<'a> {
    graph: &'a InterfaceGraph,
    config: &'a GenerationConfig,
}

impl<'a> FamilyResolver<'a> {
    /// Create resolver
    #[inline]
    #[must_use]
    pub fn new(graph: &'a InterfaceGraph, config: &'a GenerationConfig) -> Self {
        Self { graph, config }
    }

    /// Leaves of the graph
    #[must_use]
    pub fn leaf_set(&self) -> LeafSet<'a> {
        LeafSet::detect(self.graph, self.config)
    }

    /// Resolve and validate every family, in leaf declaration order
    ///
    /// # Errors
    /// - [`MalformedGraph::Cycle`] if the parent relation is cyclic
    /// - [`MalformedGraph::MissingVersion`] for a naming gap under [`GapPolicy::Reject`]
    /// - [`MalformedGraph::MissingIid`] for a member without an id
    /// - [`MalformedGraph::OverlappingFamilies`] / [`MalformedGraph::DuplicateIid`]
    ///   if the leaf/family bijection does not hold
    pub fn resolve(&self) -> Result<Vec<Family>, MalformedGraph> {
        if let Some(name) = self.graph.find_cycle() {
            return Err(MalformedGraph::Cycle { name: name.to_string() });
        }

        let leaves = self.leaf_set();
        let mut families = Vec::with_capacity(leaves.len());
        let mut bases: HashMap<String, String> = HashMap::new();
        let mut iids: HashMap<Iid, String> = HashMap::new();

        for leaf in leaves.iter() {
            let family = self.resolve_leaf(&leaf.name)?;

            if let Some(first) = bases.insert(family.base.clone(), leaf.name.clone()) {
                return Err(MalformedGraph::OverlappingFamilies {
                    base: family.base,
                    first,
                    second: leaf.name.clone(),
                });
            }
            for member in &family.members {
                if let Some(first) = iids.insert(member.iid, member.name.clone()) {
                    return Err(MalformedGraph::DuplicateIid {
                        iid: member.iid,
                        first,
                        second: member.name.clone(),
                    });
                }
            }

            tracing::debug!(base = %family.base, members = family.len(), "resolved family");
            families.push(family);
        }

        Ok(families)
    }

    /// Resolve the family rooted at one leaf
    ///
    /// Under [`GapPolicy::Reject`] the chain is walked upwards and stops at
    /// the first undeclared version. Under [`GapPolicy::Skip`] the members are
    /// the declared interfaces sharing the leaf's base, up to its version.
    /// Neither walk is bounded by the leaf's suffix alone.
    ///
    /// # Errors
    /// See [`FamilyResolver::resolve`]
    pub fn resolve_leaf(&self, leaf: &str) -> Result<Family, MalformedGraph> {
        let split = split_version(leaf)?;
        let base = split.base.to_string();
        let newest = split.version.unwrap_or(0);

        let members = match self.config.gap_policy {
            GapPolicy::Reject => self.contiguous_members(&base, leaf)?,
            GapPolicy::Skip => {
                let members = self.declared_members(&base, newest)?;
                let skipped = u64::from(newest) + 1 - members.len() as u64;
                if skipped > 0 {
                    tracing::warn!(%leaf, skipped, "skipping undeclared family versions");
                }
                members
            }
        };

        Ok(Family { base, members })
    }

    fn contiguous_members(&self, base: &str, leaf: &str) -> Result<Vec<FamilyMember>, MalformedGraph> {
        let mut members = Vec::new();
        for (version, name) in (0u32..).zip(family_chain(leaf)?) {
            let Some(iface) = self.graph.get(&name) else {
                return Err(MalformedGraph::MissingVersion {
                    base: base.to_string(),
                    leaf: leaf.to_string(),
                    missing: name,
                });
            };
            members.push(member(name, version, iface.iid)?);
        }
        Ok(members)
    }

    fn declared_members(&self, base: &str, newest: u32) -> Result<Vec<FamilyMember>, MalformedGraph> {
        let mut members = Vec::new();
        for iface in self.graph.iter() {
            // Non-canonical names cannot be chain members
            let Ok(split) = split_version(&iface.name) else {
                continue;
            };
            let version = split.version.unwrap_or(0);
            if split.base == base && version <= newest {
                members.push(member(iface.name.clone(), version, iface.iid)?);
            }
        }
        members.sort_by_key(|m| m.version);
        Ok(members)
    }
}

fn member(name: String, version: u32, iid: Option<Iid>) -> Result<FamilyMember, MalformedGraph> {
    match iid {
        Some(iid) => Ok(FamilyMember { name, version, iid }),
        None => Err(MalformedGraph::MissingIid { name }),
    }
}

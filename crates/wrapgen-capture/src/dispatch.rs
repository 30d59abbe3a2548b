//! Interface id dispatch
//!
//! Maps every member id of every family to that family's constructor.

use crate::factory::FamilyFactory;
use std::collections::HashMap;
use std::sync::Arc;
use wrapgen_family::{DispatchPlan, GenerationConfig, MalformedGraph};
use wrapgen_model::{Iid, InterfaceGraph};

/// Interface id → family constructor
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: HashMap<Iid, Arc<FamilyFactory>>,
    factories: Vec<Arc<FamilyFactory>>,
}

impl DispatchTable {
    /// Build table from a dispatch plan
    ///
    /// If two families claim one id the first keeps it. Plans produced by
    /// [`DispatchPlan::generate`] never do.
    #[must_use]
    pub fn from_plan(plan: &DispatchPlan) -> Self {
        let mut table = Self::default();

        for entry in &plan.families {
            let factory = Arc::new(FamilyFactory::new(entry.constructor.clone(), entry.family.clone()));
            for member in entry.family.members() {
                if let Some(existing) = table.entries.get(&member.iid) {
                    tracing::warn!(
                        iid = %member.iid,
                        kept = existing.name(),
                        ignored = factory.name(),
                        "interface id claimed by two families"
                    );
                    continue;
                }
                table.entries.insert(member.iid, Arc::clone(&factory));
            }
            table.factories.push(factory);
        }

        tracing::debug!(
            families = table.factories.len(),
            iids = table.entries.len(),
            "built dispatch table"
        );
        table
    }

    /// Resolve families of `graph` and build the table
    ///
    /// # Errors
    /// Returns [`MalformedGraph`] if the graph's families are invalid
    pub fn generate(graph: &InterfaceGraph, config: &GenerationConfig) -> Result<Self, MalformedGraph> {
        Ok(Self::from_plan(&DispatchPlan::generate(graph, config)?))
    }

    /// Constructor responsible for `iid`
    #[inline]
    #[must_use]
    pub fn lookup(&self, iid: &Iid) -> Option<&FamilyFactory> {
        self.entries.get(iid).map(|f| &**f)
    }

    /// Constructor by constructor name or family base name
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<&FamilyFactory> {
        self.factories
            .iter()
            .find(|f| f.name() == name || f.family().base() == name)
            .map(|f| &**f)
    }

    /// All constructors, in plan order
    pub fn families(&self) -> impl Iterator<Item = &FamilyFactory> {
        self.factories.iter().map(|f| &**f)
    }

    /// Check if `iid` is dispatchable
    #[inline]
    #[must_use]
    pub fn contains(&self, iid: &Iid) -> bool {
        self.entries.contains_key(iid)
    }

    /// Number of dispatchable ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no id is dispatchable
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Dispatch plans
//!
//! A [`DispatchPlan`] is the generated artifact: one entry per family naming
//! its constructor and its members. The capture runtime assembles its
//! dispatch table from a plan, and the CLI writes plans as JSON.

use crate::config::GenerationConfig;
use crate::error::MalformedGraph;
use crate::family::{Family, FamilyResolver};
use serde::{Deserialize, Serialize};
use wrapgen_model::{Iid, InterfaceGraph};

/// One family and the constructor that wraps it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPlan {
    /// Constructor name, e.g. `WrapID3D12Device`
    pub constructor: String,
    /// The family chain
    #[serde(flatten)]
    pub family: Family,
}

/// Interface id → family constructor description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPlan {
    /// Families in leaf declaration order
    pub families: Vec<FamilyPlan>,
}

impl DispatchPlan {
    /// Resolve the graph and build its plan
    ///
    /// # Errors
    /// Propagates [`FamilyResolver::resolve`] errors
    pub fn generate(graph: &InterfaceGraph, config: &GenerationConfig) -> Result<Self, MalformedGraph> {
        let families = FamilyResolver::new(graph, config).resolve()?;
        let plan = Self::from_families(families, config);
        tracing::info!(
            families = plan.families.len(),
            iids = plan.iid_count(),
            "generated dispatch plan"
        );
        Ok(plan)
    }

    /// Build plan from resolved families
    #[must_use]
    pub fn from_families(families: Vec<Family>, config: &GenerationConfig) -> Self {
        let families = families
            .into_iter()
            .map(|family| FamilyPlan {
                constructor: config.constructor_name(family.base()),
                family,
            })
            .collect();
        Self { families }
    }

    /// Family plan containing `iid`
    #[must_use]
    pub fn find(&self, iid: &Iid) -> Option<&FamilyPlan> {
        self.families.iter().find(|f| f.family.contains_iid(iid))
    }

    /// Total number of dispatchable ids
    #[must_use]
    pub fn iid_count(&self) -> usize {
        self.families.iter().map(|f| f.family.len()).sum()
    }

    /// Serialize as JSON
    ///
    /// # Errors
    /// Returns the serializer error
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Parse JSON plan
    ///
    /// # Errors
    /// Returns the deserializer error
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wrapgen_model::Interface;

    fn graph() -> InterfaceGraph {
        [
            Interface::new("Device").with_iid(Iid::from_u128(1)),
            Interface::new("Device1").with_iid(Iid::from_u128(2)).with_parent("Device"),
            Interface::new("Fence").with_iid(Iid::from_u128(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn plan_names_constructors() {
        let plan = DispatchPlan::generate(&graph(), &GenerationConfig::default()).unwrap();
        let constructors: Vec<_> = plan.families.iter().map(|f| f.constructor.as_str()).collect();
        assert_eq!(constructors, vec!["WrapDevice", "WrapFence"]);
        assert_eq!(plan.iid_count(), 3);
    }

    #[test]
    fn plan_find_by_member_iid() {
        let plan = DispatchPlan::generate(&graph(), &GenerationConfig::default()).unwrap();
        assert_eq!(plan.find(&Iid::from_u128(1)).unwrap().constructor, "WrapDevice");
        assert_eq!(plan.find(&Iid::from_u128(2)).unwrap().constructor, "WrapDevice");
        assert!(plan.find(&Iid::from_u128(99)).is_none());
    }

    #[test]
    fn plan_json_is_flat() {
        let plan = DispatchPlan::generate(&graph(), &GenerationConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plan.to_json(false).unwrap()).unwrap();
        let first = &value["families"][0];
        assert_eq!(first["constructor"], "WrapDevice");
        assert_eq!(first["base"], "Device");
        assert_eq!(first["members"][1]["name"], "Device1");

        assert_eq!(DispatchPlan::from_json(&plan.to_json(true).unwrap()).unwrap(), plan);
    }
}

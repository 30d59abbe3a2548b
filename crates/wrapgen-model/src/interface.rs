//! Interface declarations

use crate::iid::Iid;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

/// One interface node of the inheritance graph
///
/// `parents` lists direct bases in declaration order. Names not declared in
/// the same graph (the root `IUnknown`, platform bases) are external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Declared name, e.g. `ID3D12Device5`
    pub name: String,

    /// Stable identifier, absent for declarations without a GUID
    #[serde(default)]
    pub iid: Option<Iid>,

    /// Direct parent interface names
    #[serde(default, alias = "inherits", deserialize_with = "deserialize_parents")]
    pub parents: SmallVec<[String; 2]>,

    /// Whether the interface participates in wrapper generation
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

fn deserialize_parents<'de, D>(deserializer: D) -> Result<SmallVec<[String; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut iface = Interface::new(String::new());
    for parent in Vec::<String>::deserialize(deserializer)? {
        iface.add_parent(parent);
    }
    Ok(iface.parents)
}

impl Interface {
    /// Create a required interface with no id and no parents
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iid: None,
            parents: SmallVec::new(),
            required: true,
        }
    }

    /// With interface id
    #[inline]
    #[must_use]
    pub fn with_iid(mut self, iid: Iid) -> Self {
        self.iid = Some(iid);
        self
    }

    /// With an additional direct parent (duplicates ignored)
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.add_parent(parent);
        self
    }

    /// Exclude from generation
    #[inline]
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Append a direct parent unless already present
    pub fn add_parent(&mut self, parent: impl Into<String>) {
        let parent = parent.into();
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }

    /// Drop repeated parent names, keeping first occurrences
    pub(crate) fn dedup_parents(&mut self) {
        let mut seen = SmallVec::<[String; 2]>::new();
        for parent in self.parents.drain(..) {
            if !seen.contains(&parent) {
                seen.push(parent);
            }
        }
        self.parents = seen;
    }

    /// Check whether `name` is a direct parent
    #[inline]
    #[must_use]
    pub fn inherits(&self, name: &str) -> bool {
        self.parents.iter().any(|p| p == name)
    }
}

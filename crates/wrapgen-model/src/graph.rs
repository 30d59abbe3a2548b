//! Interface inheritance graph
//!
//! Provides [`InterfaceGraph`], an insertion-ordered set of interfaces whose
//! edges are "inherits from". Declaration order is kept so that everything
//! derived from the graph (leaves, families, dispatch order) is deterministic.

use crate::error::ModelError;
use crate::iid::Iid;
use crate::interface::Interface;
use crate::source::SourceModel;
use indexmap::map::Entry;
use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

/// Interface graph keyed by interface name
#[derive(Debug, Clone, Default)]
pub struct InterfaceGraph {
    interfaces: IndexMap<String, Interface>,
}

impl InterfaceGraph {
    /// Create empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            interfaces: IndexMap::new(),
        }
    }

    /// Build from parsed header declarations
    ///
    /// Headers are visited in document order. An interface declared in more
    /// than one header (forward declarations) is kept once: parents are
    /// merged and the first id seen wins.
    #[must_use]
    pub fn from_source(source: &SourceModel) -> Self {
        let mut graph = Self::new();
        for (header, decls) in &source.headers {
            for iface in &decls.interfaces {
                if graph.merge(iface.clone()) {
                    tracing::debug!(header = %header, name = %iface.name, "merged repeated declaration");
                }
            }
        }
        graph
    }

    /// Insert interface
    ///
    /// # Errors
    /// Returns [`ModelError::DuplicateInterface`] if the name already exists
    pub fn insert(&mut self, interface: Interface) -> Result<(), ModelError> {
        match self.interfaces.entry(interface.name.clone()) {
            Entry::Occupied(_) => Err(ModelError::DuplicateInterface(interface.name)),
            Entry::Vacant(slot) => {
                let mut interface = interface;
                interface.dedup_parents();
                slot.insert(interface);
                Ok(())
            }
        }
    }

    /// Insert or merge into an existing declaration of the same name
    ///
    /// Returns `true` when an existing entry was merged.
    pub fn merge(&mut self, interface: Interface) -> bool {
        match self.interfaces.entry(interface.name.clone()) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                for parent in interface.parents {
                    existing.add_parent(parent);
                }
                if existing.iid.is_none() {
                    existing.iid = interface.iid;
                }
                existing.required |= interface.required;
                true
            }
            Entry::Vacant(slot) => {
                let mut interface = interface;
                interface.dedup_parents();
                slot.insert(interface);
                false
            }
        }
    }

    /// Lookup by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    /// Check if a name is declared in this graph
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.contains_key(name)
    }

    /// Find the interface carrying `iid`
    #[must_use]
    pub fn find_by_iid(&self, iid: &Iid) -> Option<&Interface> {
        self.interfaces.values().find(|i| i.iid.as_ref() == Some(iid))
    }

    /// Interfaces in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    /// Required interfaces in declaration order
    pub fn required(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values().filter(|i| i.required)
    }

    /// Interfaces naming `name` as a direct parent
    #[must_use]
    pub fn children_of(&self, name: &str) -> Vec<&Interface> {
        self.interfaces
            .values()
            .filter(|i| i.inherits(name))
            .collect()
    }

    /// Parent names not declared in this graph
    #[must_use]
    pub fn external_parents(&self) -> Vec<&str> {
        let mut external: Vec<&str> = Vec::new();
        for parent in self.interfaces.values().flat_map(|i| i.parents.iter()) {
            if !self.contains(parent) && !external.contains(&parent.as_str()) {
                external.push(parent);
            }
        }
        external
    }

    /// Number of declared interfaces
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Check if graph is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Find an interface that takes part in an inheritance cycle
    ///
    /// Edges to external parents are ignored; they cannot close a cycle.
    #[must_use]
    pub fn find_cycle(&self) -> Option<&str> {
        let mut g: DiGraphMap<&str, ()> = DiGraphMap::new();
        for iface in self.interfaces.values() {
            g.add_node(iface.name.as_str());
            for parent in &iface.parents {
                if let Some(declared) = self.interfaces.get(parent) {
                    g.add_edge(declared.name.as_str(), iface.name.as_str(), ());
                }
            }
        }

        match toposort(&g, None) {
            Ok(_) => None,
            Err(cycle) => Some(cycle.node_id()),
        }
    }
}

impl<'a> IntoIterator for &'a InterfaceGraph {
    type Item = &'a Interface;
    type IntoIter = indexmap::map::Values<'a, String, Interface>;

    fn into_iter(self) -> Self::IntoIter {
        self.interfaces.values()
    }
}

impl FromIterator<Interface> for InterfaceGraph {
    fn from_iter<I: IntoIterator<Item = Interface>>(iter: I) -> Self {
        let mut graph = Self::new();
        for iface in iter {
            graph.merge(iface);
        }
        graph
    }
}

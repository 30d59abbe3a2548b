//! Leaf detection
//!
//! A leaf is a participating interface that no other participating interface
//! lists as a parent. Each leaf roots exactly one family.

use crate::config::GenerationConfig;
use std::collections::HashSet;
use wrapgen_model::{Interface, InterfaceGraph};

/// Final interfaces of the graph, in declaration order
#[derive(Debug, Clone)]
pub struct LeafSet<'g> {
    leaves: Vec<&'g Interface>,
}

impl<'g> LeafSet<'g> {
    /// Detect leaves among required, non-excluded interfaces
    ///
    /// One pass collects every parent name, one pass filters.
    #[must_use]
    pub fn detect(graph: &'g InterfaceGraph, config: &GenerationConfig) -> Self {
        let participating: Vec<&Interface> = graph
            .required()
            .filter(|i| config.participates(&i.name))
            .collect();

        let parents: HashSet<&str> = participating
            .iter()
            .flat_map(|i| i.parents.iter().map(String::as_str))
            .collect();

        let leaves = participating
            .into_iter()
            .filter(|i| !parents.contains(i.name.as_str()))
            .collect();

        Self { leaves }
    }

    /// Leaf interfaces
    pub fn iter(&self) -> impl Iterator<Item = &'g Interface> + '_ {
        self.leaves.iter().copied()
    }

    /// Leaf names
    #[must_use]
    pub fn names(&self) -> Vec<&'g str> {
        self.leaves.iter().map(|i| i.name.as_str()).collect()
    }

    /// Check if `name` is a leaf
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.leaves.iter().any(|i| i.name == name)
    }

    /// Number of leaves
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if there are no leaves
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(ifaces: Vec<Interface>) -> InterfaceGraph {
        ifaces.into_iter().collect()
    }

    #[test]
    fn chain_has_single_leaf() {
        let g = graph(vec![
            Interface::new("A").with_parent("IUnknown"),
            Interface::new("A1").with_parent("A"),
            Interface::new("A2").with_parent("A1"),
        ]);
        let leaves = LeafSet::detect(&g, &GenerationConfig::default());
        assert_eq!(leaves.names(), vec!["A2"]);
    }

    #[test]
    fn isolated_interface_is_its_own_leaf() {
        let g = graph(vec![Interface::new("Lonely")]);
        let leaves = LeafSet::detect(&g, &GenerationConfig::default());
        assert!(leaves.contains("Lonely"));
        assert_eq!(leaves.len(), 1);
    }

    #[test]
    fn root_interface_is_never_a_leaf() {
        let g = graph(vec![Interface::new("IUnknown")]);
        assert!(LeafSet::detect(&g, &GenerationConfig::default()).is_empty());
    }

    #[test]
    fn optional_children_do_not_hide_parents() {
        let g = graph(vec![
            Interface::new("Heap"),
            Interface::new("Heap1").with_parent("Heap").optional(),
        ]);
        let leaves = LeafSet::detect(&g, &GenerationConfig::default());
        assert_eq!(leaves.names(), vec!["Heap"]);
    }

    #[test]
    fn excluded_interfaces_are_skipped() {
        let g = graph(vec![
            Interface::new("Debug"),
            Interface::new("Device"),
        ]);
        let config = GenerationConfig::default().with_excluded("Debug");
        assert_eq!(LeafSet::detect(&g, &config).names(), vec!["Device"]);
    }

    #[test]
    fn leaves_keep_declaration_order() {
        let g = graph(vec![
            Interface::new("Zeta"),
            Interface::new("Alpha"),
            Interface::new("Mid"),
        ]);
        let leaves = LeafSet::detect(&g, &GenerationConfig::default());
        assert_eq!(leaves.names(), vec!["Zeta", "Alpha", "Mid"]);
    }
}

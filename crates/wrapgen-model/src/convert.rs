//! Symbolic-name converters
//!
//! Lookups used by trace tooling to render enum values and interface ids.

use crate::graph::InterfaceGraph;
use crate::iid::Iid;
use crate::source::{EnumDecl, SourceModel};

/// Text returned for an id not in the table
pub const INVALID_IID_TEXT: &str = "Invalid IID";

/// Render an enum value by its symbolic name
///
/// The first enumerator declared with `value` wins, so aliases render as
/// the first-declared name. Unknown values render as `Invalid <Type>(<value>)`.
#[must_use]
pub fn enum_to_text(decl: &EnumDecl, value: i64) -> String {
    decl.values
        .iter()
        .find(|v| v.value == value)
        .map_or_else(|| format!("Invalid {}({value})", decl.name), |v| v.name.clone())
}

/// Well-known interface ids and their constant names
#[derive(Debug, Clone, Default)]
pub struct InterfaceNames {
    entries: Vec<(Iid, String)>,
}

impl InterfaceNames {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect names from a source model
    ///
    /// Standalone GUID constants come first, then `IID_<Name>` for every
    /// interface whose id was not already named.
    #[must_use]
    pub fn from_source(source: &SourceModel) -> Self {
        let mut names = Self::new();
        for guid in source.guids() {
            names.register(guid.iid, guid.name.clone());
        }
        names.extend_from_graph(&InterfaceGraph::from_source(source));
        names
    }

    /// Collect `IID_<Name>` for every interface carrying an id
    #[must_use]
    pub fn from_graph(graph: &InterfaceGraph) -> Self {
        let mut names = Self::new();
        names.extend_from_graph(graph);
        names
    }

    fn extend_from_graph(&mut self, graph: &InterfaceGraph) {
        for iface in graph {
            if let Some(iid) = iface.iid {
                self.register(iid, format!("IID_{}", iface.name));
            }
        }
    }

    /// Register a name; an id already present keeps its first name
    pub fn register(&mut self, iid: Iid, name: impl Into<String>) {
        if !self.entries.iter().any(|(known, _)| *known == iid) {
            self.entries.push((iid, name.into()));
        }
    }

    /// Symbolic name of `iid`, or [`INVALID_IID_TEXT`]
    #[must_use]
    pub fn iid_to_text(&self, iid: &Iid) -> &str {
        self.entries
            .iter()
            .find(|(known, _)| known == iid)
            .map_or(INVALID_IID_TEXT, |(_, name)| name.as_str())
    }

    /// Number of known ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

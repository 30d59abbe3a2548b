//! wrapgen Interface Model
//!
//! The data model consumed by family resolution and wrapper dispatch.
//!
//! # Overview
//!
//! - **Iid**: 128-bit interface identifier (GUID)
//! - **Interface**: a named interface with its direct parents
//! - **InterfaceGraph**: declaration-ordered "inherits from" graph
//! - **SourceModel**: parsed header declarations (JSON or YAML)
//! - **InterfaceNames** / [`enum_to_text`]: symbolic-name converters
//!
//! # Example
//!
//! ```rust
//! use wrapgen_model::{Interface, InterfaceGraph};
//!
//! let mut graph = InterfaceGraph::new();
//! graph.insert(Interface::new("Device")).unwrap();
//! graph.insert(Interface::new("Device1").with_parent("Device")).unwrap();
//!
//! assert_eq!(graph.children_of("Device").len(), 1);
//! assert!(graph.find_cycle().is_none());
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod graph;
pub mod iid;
pub mod interface;
pub mod source;

// Re-exports
pub use convert::{enum_to_text, InterfaceNames, INVALID_IID_TEXT};
pub use error::ModelError;
pub use graph::InterfaceGraph;
pub use iid::Iid;
pub use interface::Interface;
pub use source::{EnumDecl, EnumValue, GuidDecl, HeaderDecls, SourceFormat, SourceModel};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for model operations
    pub use crate::{Iid, Interface, InterfaceGraph, ModelError, SourceModel};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

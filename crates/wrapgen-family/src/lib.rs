//! wrapgen Family Resolution
//!
//! Derives version families from an interface graph.
//!
//! # Overview
//!
//! - **LeafSet**: interfaces that no other interface inherits from
//! - **split_version / family_chain**: numeric-suffix naming convention
//! - **FamilyResolver**: validated `[base, base1, …, baseN]` chains
//! - **DispatchPlan**: serializable id → family-constructor description
//!
//! # Example
//!
//! ```rust
//! use wrapgen_family::{FamilyResolver, GenerationConfig};
//! use wrapgen_model::{Iid, Interface, InterfaceGraph};
//!
//! let graph: InterfaceGraph = [
//!     Interface::new("A").with_iid(Iid::from_u128(1)),
//!     Interface::new("A1").with_iid(Iid::from_u128(2)).with_parent("A"),
//!     Interface::new("A2").with_iid(Iid::from_u128(3)).with_parent("A1"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = GenerationConfig::default();
//! let families = FamilyResolver::new(&graph, &config).resolve().unwrap();
//!
//! assert_eq!(families.len(), 1);
//! assert_eq!(families[0].names(), vec!["A", "A1", "A2"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod family;
pub mod leaf;
pub mod plan;
pub mod version;

// Re-exports
pub use config::{GapPolicy, GenerationConfig};
pub use error::{ConfigError, MalformedGraph};
pub use family::{Family, FamilyMember, FamilyResolver};
pub use leaf::LeafSet;
pub use plan::{DispatchPlan, FamilyPlan};
pub use version::{family_chain, split_version, versioned_name, VersionedName};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for family resolution
    pub use crate::{
        DispatchPlan, Family, FamilyMember, FamilyResolver, GapPolicy, GenerationConfig, LeafSet,
        MalformedGraph,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

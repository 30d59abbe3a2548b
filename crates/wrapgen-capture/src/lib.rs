//! wrapgen Capture Runtime
//!
//! Wraps native COM-style objects behind capture proxies, one proxy per
//! object, promoted to the highest interface version the object supports.
//!
//! # Architecture
//!
//! ```text
//! wrap_object(riid, slot)
//!     │
//!     ├─ DispatchTable: riid → FamilyFactory ("Wrap<Base>")
//!     │
//!     └─ FamilyFactory::wrap
//!          ├─ IdentityCache hit  → add_ref proxy, release native, reuse
//!          └─ miss → walk family newest → oldest
//!                      riid == V  → wrap at V, no probe
//!                      probe(V)   → release original, wrap at V
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use wrapgen_capture::{DispatchTable, ObjectSlot, WrapperFactory};
//!
//! let table = DispatchTable::generate(&graph, &config)?;
//! let factory = WrapperFactory::new(table);
//!
//! let mut slot = ObjectSlot::Native(device_ptr);
//! let proxy = factory.wrap_object(&riid, Some(&mut slot))?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod identity;
pub mod native;
pub mod wrapper;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use dispatch::DispatchTable;
pub use error::WrapError;
pub use factory::{FamilyFactory, ObjectSlot, WrapperFactory};
pub use identity::IdentityCache;
pub use native::{NativeObject, NativePtr, ObjectKey};
pub use wrapper::{Wrapper, WrapperHandle};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for capture-time wrapping
    pub use crate::{
        DispatchTable, IdentityCache, NativeObject, NativePtr, ObjectSlot, WrapError,
        WrapperFactory, WrapperHandle,
    };
    pub use wrapgen_family::{FamilyMember, GenerationConfig};
    pub use wrapgen_model::Iid;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

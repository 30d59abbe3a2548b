//! Wrapper construction
//!
//! [`FamilyFactory`] is the per-family constructor (`Wrap<Base>`): it
//! promotes a native pointer to the newest version the object supports and
//! registers the proxy in the identity cache. [`WrapperFactory`] is the
//! single entry point that routes an interface id to its family.

use crate::dispatch::DispatchTable;
use crate::error::WrapError;
use crate::identity::IdentityCache;
use crate::native::NativePtr;
use crate::wrapper::WrapperHandle;
use std::mem;
use wrapgen_family::{Family, FamilyMember};
use wrapgen_model::Iid;

/// In/out object argument of a wrap call
///
/// Holds the native pointer on entry and the proxy after a successful wrap.
/// On failure the native pointer is left in place.
#[derive(Debug, Default)]
pub enum ObjectSlot {
    /// Null object
    #[default]
    Empty,
    /// Unwrapped native pointer
    Native(NativePtr),
    /// Proxy returned to the application
    Wrapped(WrapperHandle),
}

impl ObjectSlot {
    /// Move the native pointer out, leaving the slot empty
    ///
    /// Other states are left untouched.
    pub fn take_native(&mut self) -> Option<NativePtr> {
        match mem::take(self) {
            Self::Native(native) => Some(native),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Proxy, if the slot has been wrapped
    #[must_use]
    pub fn as_wrapper(&self) -> Option<&WrapperHandle> {
        match self {
            Self::Wrapped(handle) => Some(handle),
            _ => None,
        }
    }

    /// Native pointer, if the slot is still unwrapped
    #[must_use]
    pub fn native(&self) -> Option<&NativePtr> {
        match self {
            Self::Native(native) => Some(native),
            _ => None,
        }
    }

    /// Check if the slot is null
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Constructor for one family
#[derive(Debug, Clone)]
pub struct FamilyFactory {
    constructor: String,
    family: Family,
}

impl FamilyFactory {
    /// Create factory
    #[must_use]
    pub fn new(constructor: impl Into<String>, family: Family) -> Self {
        Self {
            constructor: constructor.into(),
            family,
        }
    }

    /// Constructor name, e.g. `WrapDevice`
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.constructor
    }

    /// Family served by this constructor
    #[inline]
    #[must_use]
    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Wrap the native pointer held in `slot`
    ///
    /// A slot without a native pointer is a no-op returning `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`WrapError::UnsupportedInterface`] when every version of the
    /// family was rejected; the native pointer is put back in `slot`.
    pub fn wrap(
        &self,
        riid: &Iid,
        slot: &mut ObjectSlot,
        cache: &IdentityCache,
    ) -> Result<Option<WrapperHandle>, WrapError> {
        let Some(native) = slot.take_native() else {
            return Ok(None);
        };

        match self.wrap_native(riid, native, cache) {
            Ok(handle) => {
                *slot = ObjectSlot::Wrapped(handle.clone());
                Ok(Some(handle))
            }
            Err(native) => {
                *slot = ObjectSlot::Native(native);
                Err(self.unsupported(riid))
            }
        }
    }

    pub(crate) fn wrap_native(
        &self,
        riid: &Iid,
        native: NativePtr,
        cache: &IdentityCache,
    ) -> Result<WrapperHandle, NativePtr> {
        cache.get_or_promote(native, self.family.base(), |native| self.promote(riid, native))
    }

    pub(crate) fn unsupported(&self, riid: &Iid) -> WrapError {
        tracing::error!(
            family = %self.family.base(),
            %riid,
            "failed to wrap unsupported {} object type for capture",
            self.family.base()
        );
        WrapError::UnsupportedInterface {
            iid: *riid,
            family: Some(self.family.base().to_string()),
        }
    }

    /// Newest version the object supports
    ///
    /// Walks newest to oldest. Reaching `riid` itself wraps the pointer as is;
    /// a successful probe replaces the original reference with the probed one.
    fn promote(&self, riid: &Iid, native: NativePtr) -> Result<(FamilyMember, NativePtr), NativePtr> {
        for member in self.family.newest_first() {
            if member.iid == *riid {
                return Ok((member.clone(), native.retype(member.iid)));
            }
            if let Some(promoted) = native.query(&member.iid) {
                native.release();
                tracing::trace!(from = %riid, to = %member.name, "promoted");
                return Ok((member.clone(), promoted));
            }
        }
        Err(native)
    }
}

/// Capture-time wrap entry point
#[derive(Debug, Clone, Default)]
pub struct WrapperFactory {
    table: DispatchTable,
    cache: IdentityCache,
}

impl WrapperFactory {
    /// Create factory with a fresh identity cache
    #[must_use]
    pub fn new(table: DispatchTable) -> Self {
        Self::with_cache(table, IdentityCache::new())
    }

    /// Create factory sharing an existing identity cache
    #[must_use]
    pub fn with_cache(table: DispatchTable, cache: IdentityCache) -> Self {
        Self { table, cache }
    }

    /// Dispatch table
    #[inline]
    #[must_use]
    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Identity cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    /// Wrap a native object returned for `riid`
    ///
    /// `None` or a slot without a native pointer is a no-op.
    ///
    /// # Errors
    /// Returns [`WrapError::UnsupportedInterface`] when `riid` belongs to no
    /// family or the family chain is exhausted. The slot keeps its native
    /// pointer; callers must treat this as fatal.
    pub fn wrap_object(
        &self,
        riid: &Iid,
        slot: Option<&mut ObjectSlot>,
    ) -> Result<Option<WrapperHandle>, WrapError> {
        let Some(slot) = slot else {
            return Ok(None);
        };
        if slot.native().is_none() {
            return Ok(None);
        }

        match self.table.lookup(riid) {
            Some(factory) => factory.wrap(riid, slot, &self.cache),
            None => Err(self.no_family(riid)),
        }
    }

    /// Live proxy for the object behind `native`, if any
    #[must_use]
    pub fn get_existing_wrapper(&self, native: &NativePtr) -> Option<WrapperHandle> {
        self.cache.get_existing(native)
    }

    /// Query the object behind `wrapper` for `riid` and return its proxy
    ///
    /// The returned handle carries one new proxy reference. Querying any id
    /// of an object that already has a proxy returns that proxy.
    ///
    /// # Errors
    /// - [`WrapError::NoInterface`] if the object rejects `riid`
    /// - [`WrapError::UnsupportedInterface`] if the object accepts it but no
    ///   family can wrap it; the probe reference is released
    pub fn query_interface(&self, wrapper: &WrapperHandle, riid: &Iid) -> Result<WrapperHandle, WrapError> {
        let native = wrapper
            .native()
            .query(riid)
            .ok_or(WrapError::NoInterface { iid: *riid })?;

        let Some(factory) = self.table.lookup(riid) else {
            native.release();
            return Err(self.no_family(riid));
        };

        factory.wrap_native(riid, native, &self.cache).map_err(|native| {
            native.release();
            factory.unsupported(riid)
        })
    }

    fn no_family(&self, riid: &Iid) -> WrapError {
        tracing::error!(%riid, families = self.table.families().count(), "no wrapper family for interface");
        WrapError::UnsupportedInterface {
            iid: *riid,
            family: None,
        }
    }
}

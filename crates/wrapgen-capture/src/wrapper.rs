//! Capture proxies
//!
//! One [`Wrapper`] type serves every family and version: it records the
//! version it currently wraps and owns exactly one reference on the native
//! object. Its own reference count is explicit (`add_ref`/`release`), the
//! same contract the application sees on the native object.

use crate::identity::IdentityMap;
use crate::native::{NativePtr, ObjectKey};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};
use wrapgen_family::FamilyMember;
use wrapgen_model::Iid;

/// Proxy standing in for one native object
pub struct Wrapper {
    capture_id: u64,
    family: String,
    version: FamilyMember,
    native: NativePtr,
    ref_count: AtomicU32,
    cache: Weak<IdentityMap>,
}

impl Wrapper {
    pub(crate) fn new(
        capture_id: u64,
        family: &str,
        version: FamilyMember,
        native: NativePtr,
        cache: Weak<IdentityMap>,
    ) -> Self {
        Self {
            capture_id,
            family: family.to_string(),
            version,
            native,
            ref_count: AtomicU32::new(1),
            cache,
        }
    }

    /// Unique id assigned at creation
    #[inline]
    #[must_use]
    pub fn capture_id(&self) -> u64 {
        self.capture_id
    }

    /// Family base name
    #[inline]
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Version currently wrapped
    #[inline]
    #[must_use]
    pub fn version(&self) -> &FamilyMember {
        &self.version
    }

    /// Interface id currently wrapped
    #[inline]
    #[must_use]
    pub fn iid(&self) -> Iid {
        self.version.iid
    }

    /// Wrapped native pointer
    #[inline]
    #[must_use]
    pub fn native(&self) -> &NativePtr {
        &self.native
    }

    /// Identity of the wrapped object
    #[inline]
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.native.key()
    }

    /// Current proxy reference count
    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.ref_count.load(Ordering::Acquire)
    }

    /// Add one proxy reference
    pub fn add_ref(&self) -> u32 {
        self.ref_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Drop one proxy reference
    ///
    /// The last release removes the identity entry and releases the native
    /// reference, both under the cache entry lock.
    pub fn release(&self) -> u32 {
        match self.cache.upgrade() {
            Some(cache) => cache.release(self),
            None => {
                let remaining = self.decrement();
                if remaining == Some(0) {
                    self.native.release_held();
                }
                remaining.unwrap_or(0)
            }
        }
    }

    /// Decrement unless already zero; `None` on over-release
    pub(crate) fn decrement(&self) -> Option<u32> {
        let previous = self
            .ref_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        match previous {
            Ok(n) => Some(n - 1),
            Err(_) => {
                tracing::warn!(capture_id = self.capture_id, "release on a destroyed wrapper");
                None
            }
        }
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("capture_id", &self.capture_id)
            .field("family", &self.family)
            .field("version", &self.version.name)
            .field("ref_count", &self.ref_count())
            .field("key", &self.key())
            .finish()
    }
}

/// Shared handle to a proxy
///
/// Cloning the handle does not touch the proxy reference count.
#[derive(Debug, Clone)]
pub struct WrapperHandle(Arc<Wrapper>);

impl WrapperHandle {
    pub(crate) fn new(wrapper: Wrapper) -> Self {
        Self(Arc::new(wrapper))
    }

    /// Check if two handles refer to the same proxy
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn is(&self, wrapper: &Wrapper) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.0), wrapper)
    }
}

impl Deref for WrapperHandle {
    type Target = Wrapper;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for WrapperHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for WrapperHandle {}

//! Wrapper identity cache
//!
//! Provides [`IdentityCache`], the map from native object identity to its
//! single live proxy. Lookup, creation and reference transfer for one object
//! run while holding that object's map entry, as does the final release, so
//! two wraps of one object can never both miss and a dying proxy is never
//! handed out again.

use crate::native::{NativePtr, ObjectKey};
use crate::wrapper::{Wrapper, WrapperHandle};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use wrapgen_family::FamilyMember;

#[derive(Debug)]
pub(crate) struct IdentityMap {
    entries: DashMap<ObjectKey, WrapperHandle>,
    next_capture_id: AtomicU64,
}

impl IdentityMap {
    /// Last-reference bookkeeping for [`Wrapper::release`]
    pub(crate) fn release(&self, wrapper: &Wrapper) -> u32 {
        match self.entries.entry(wrapper.key()) {
            Entry::Occupied(entry) if entry.get().is(wrapper) => {
                let remaining = wrapper.decrement().unwrap_or(0);
                if remaining == 0 {
                    entry.remove();
                    wrapper.native().release_held();
                    tracing::debug!(capture_id = wrapper.capture_id(), "wrapper destroyed");
                }
                remaining
            }
            // Not (or no longer) the registered proxy for this object
            _ => {
                let remaining = wrapper.decrement();
                if remaining == Some(0) {
                    wrapper.native().release_held();
                }
                remaining.unwrap_or(0)
            }
        }
    }
}

/// Native identity → live proxy
#[derive(Debug, Clone)]
pub struct IdentityCache {
    inner: Arc<IdentityMap>,
}

impl IdentityCache {
    /// Create empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(IdentityMap {
                entries: DashMap::new(),
                next_capture_id: AtomicU64::new(1),
            }),
        }
    }

    /// Existing proxy for the object behind `native`, without touching counts
    #[must_use]
    pub fn get_existing(&self, native: &NativePtr) -> Option<WrapperHandle> {
        self.get(native.key())
    }

    /// Existing proxy for an object key
    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<WrapperHandle> {
        self.inner.entries.get(&key).map(|entry| entry.value().clone())
    }

    /// Check if the object has a live proxy
    #[inline]
    #[must_use]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.inner.entries.contains_key(&key)
    }

    /// Number of live proxies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Check if no proxy is live
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Reuse the object's proxy or create one through `promote`
    ///
    /// On a hit, one reference moves from `native` to the proxy. On a miss,
    /// `promote` either yields the version to wrap and the pointer to keep,
    /// or hands `native` back, in which case it is returned as the error.
    pub(crate) fn get_or_promote<F>(
        &self,
        native: NativePtr,
        family: &str,
        promote: F,
    ) -> Result<WrapperHandle, NativePtr>
    where
        F: FnOnce(NativePtr) -> Result<(FamilyMember, NativePtr), NativePtr>,
    {
        match self.inner.entries.entry(native.key()) {
            Entry::Occupied(entry) => {
                let existing = entry.get().clone();
                existing.add_ref();
                native.release();
                tracing::trace!(capture_id = existing.capture_id(), "reusing existing wrapper");
                Ok(existing)
            }
            Entry::Vacant(entry) => {
                let (version, typed) = promote(native)?;
                let capture_id = self.inner.next_capture_id.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(capture_id, %family, version = %version.name, "created wrapper");

                let handle = WrapperHandle::new(Wrapper::new(
                    capture_id,
                    family,
                    version,
                    typed,
                    Arc::downgrade(&self.inner),
                ));
                entry.insert(handle.clone());
                Ok(handle)
            }
        }
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fake;
    use wrapgen_model::Iid;

    fn member(n: u128) -> FamilyMember {
        FamilyMember {
            name: format!("Queue{n}"),
            version: u32::try_from(n).unwrap(),
            iid: Iid::from_u128(n),
        }
    }

    fn adopt(native: NativePtr) -> Result<(FamilyMember, NativePtr), NativePtr> {
        let iid = native.iid();
        let n = iid.as_uuid().as_u128();
        Ok((member(n), native))
    }

    #[test]
    fn miss_creates_and_hit_reuses() {
        let cache = IdentityCache::new();
        let fake = Fake::new(&[]);

        let first = cache.get_or_promote(fake.hand_out(1), "Queue", adopt).unwrap();
        let second = cache
            .get_or_promote(fake.hand_out(1), "Queue", |_| panic!("promotion on a hit"))
            .unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(first.ref_count(), 2);
        assert_eq!(fake.count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_promotion_returns_pointer() {
        let cache = IdentityCache::new();
        let fake = Fake::new(&[]);

        let native = cache.get_or_promote(fake.hand_out(1), "Queue", Err).unwrap_err();
        assert_eq!(native.iid(), Iid::from_u128(1));
        assert!(cache.is_empty());
        assert_eq!(fake.count(), 1);
    }

    #[test]
    fn last_release_evicts_and_releases_native() {
        let cache = IdentityCache::new();
        let fake = Fake::new(&[]);
        let handle = cache.get_or_promote(fake.hand_out(1), "Queue", adopt).unwrap();

        assert!(cache.get_existing(handle.native()).is_some());
        assert_eq!(handle.release(), 0);
        assert!(cache.is_empty());
        assert!(!cache.contains(handle.key()));
        assert_eq!(fake.count(), 0);
    }

    #[test]
    fn rewrap_after_destruction_creates_new_proxy() {
        let cache = IdentityCache::new();
        let fake = Fake::new(&[]);
        let first = cache.get_or_promote(fake.hand_out(1), "Queue", adopt).unwrap();
        first.release();

        let second = cache.get_or_promote(fake.hand_out(1), "Queue", adopt).unwrap();
        assert!(!first.ptr_eq(&second));
        assert!(second.capture_id() > first.capture_id());
    }
}

//! Native object seam
//!
//! [`NativeObject`] is what the capture layer needs from the real API: an
//! interface query and add/release reference counting. [`NativePtr`] is one
//! counted reference to such an object, typed by the interface it was
//! obtained for.

use std::fmt;
use std::sync::Arc;
use wrapgen_model::Iid;

/// Identity of a native object
///
/// Two pointers with the same key refer to the same underlying object, no
/// matter which interface they were obtained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey(usize);

impl ObjectKey {
    /// Raw address value
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A reference-counted native object
pub trait NativeObject: Send + Sync + fmt::Debug {
    /// Capability probe
    ///
    /// Returns `true` if the object implements `iid`. A successful query
    /// hands out one new reference, exactly like `QueryInterface`.
    ///
    /// Called while the capture layer holds an internal lock for this
    /// object. Implementations must not call back into the capture layer
    /// (wrapping, lookup or proxy release); doing so deadlocks.
    fn query_interface(&self, iid: &Iid) -> bool;

    /// Add one reference, returning the new count
    fn add_ref(&self) -> u32;

    /// Drop one reference, returning the new count
    fn release(&self) -> u32;
}

/// One owned reference to a native object
///
/// Not `Clone` and not released on drop: every reference is transferred or
/// released explicitly, so the count a proxy holds is always visible.
pub struct NativePtr {
    object: Arc<dyn NativeObject>,
    iid: Iid,
}

impl NativePtr {
    /// Adopt a reference the caller already owns
    #[must_use]
    pub fn new(object: Arc<dyn NativeObject>, iid: Iid) -> Self {
        Self { object, iid }
    }

    /// Identity of the underlying object
    #[must_use]
    pub fn key(&self) -> ObjectKey {
        ObjectKey(Arc::as_ptr(&self.object).cast::<()>() as usize)
    }

    /// Interface this pointer is typed as
    #[inline]
    #[must_use]
    pub fn iid(&self) -> Iid {
        self.iid
    }

    /// Underlying object
    #[inline]
    #[must_use]
    pub fn object(&self) -> &Arc<dyn NativeObject> {
        &self.object
    }

    /// Probe for `iid`, returning a new owned reference on success
    #[must_use]
    pub fn query(&self, iid: &Iid) -> Option<NativePtr> {
        self.object
            .query_interface(iid)
            .then(|| Self::new(Arc::clone(&self.object), *iid))
    }

    /// Add a reference and return it as a second pointer
    #[must_use]
    pub fn duplicate(&self) -> NativePtr {
        self.object.add_ref();
        Self::new(Arc::clone(&self.object), self.iid)
    }

    /// Reinterpret as `iid` without probing
    #[inline]
    #[must_use]
    pub fn retype(self, iid: Iid) -> Self {
        Self { iid, ..self }
    }

    /// Give the reference back to the object
    pub fn release(self) -> u32 {
        self.object.release()
    }

    /// Release while still held in place; the pointer must not be used again
    pub(crate) fn release_held(&self) -> u32 {
        self.object.release()
    }
}

impl fmt::Debug for NativePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativePtr")
            .field("key", &self.key())
            .field("iid", &self.iid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fake;

    #[test]
    fn key_is_shared_across_interfaces() {
        let fake = Fake::new(&[2]);
        let ptr = fake.hand_out(1);
        let promoted = ptr.query(&Iid::from_u128(2)).unwrap();

        assert_eq!(ptr.key(), promoted.key());
        assert_eq!(promoted.iid(), Iid::from_u128(2));
        assert_eq!(fake.count(), 2);
    }

    #[test]
    fn failed_query_takes_no_reference() {
        let fake = Fake::new(&[]);
        let ptr = fake.hand_out(1);
        assert!(ptr.query(&Iid::from_u128(9)).is_none());
        assert_eq!(fake.count(), 1);
    }

    #[test]
    fn distinct_objects_have_distinct_keys() {
        let a = Fake::new(&[]).hand_out(1);
        let b = Fake::new(&[]).hand_out(1);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn duplicate_and_release_balance() {
        let fake = Fake::new(&[]);
        let ptr = fake.hand_out(1);
        let copy = ptr.duplicate();
        assert_eq!(fake.count(), 2);

        copy.release();
        ptr.release();
        assert_eq!(fake.count(), 0);
    }
}

//! Minimal native object for unit tests

use crate::native::{NativeObject, NativePtr};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use wrapgen_model::Iid;

#[derive(Debug)]
pub(crate) struct Fake {
    supported: Vec<Iid>,
    refs: AtomicU32,
    probes: Mutex<Vec<Iid>>,
}

impl Fake {
    /// Object answering queries for the given `Iid::from_u128` values
    pub(crate) fn new(supported: &[u128]) -> Arc<Self> {
        Arc::new(Self {
            supported: supported.iter().copied().map(Iid::from_u128).collect(),
            refs: AtomicU32::new(0),
            probes: Mutex::new(Vec::new()),
        })
    }

    /// New reference typed as `iid`, as a native API call would return it
    pub(crate) fn hand_out(self: &Arc<Self>, iid: u128) -> NativePtr {
        self.add_ref();
        NativePtr::new(Arc::clone(self) as Arc<dyn NativeObject>, Iid::from_u128(iid))
    }

    pub(crate) fn count(&self) -> u32 {
        self.refs.load(Ordering::SeqCst)
    }

    pub(crate) fn probes(&self) -> Vec<Iid> {
        self.probes.lock().clone()
    }
}

impl NativeObject for Fake {
    fn query_interface(&self, iid: &Iid) -> bool {
        self.probes.lock().push(*iid);
        let supported = self.supported.contains(iid);
        if supported {
            self.add_ref();
        }
        supported
    }

    fn add_ref(&self) -> u32 {
        self.refs.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn release(&self) -> u32 {
        self.refs.fetch_sub(1, Ordering::SeqCst) - 1
    }
}

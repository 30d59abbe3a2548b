//! Testing utilities for the wrapgen workspace
//!
//! Shared fake native objects and interface graph fixtures.

#![allow(missing_docs)]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use wrapgen_capture::{DispatchTable, NativeObject, NativePtr, ObjectSlot, WrapperFactory};
use wrapgen_family::{versioned_name as versioned, GenerationConfig};
use wrapgen_model::{Iid, Interface, InterfaceGraph};

pub const ROOT_IID: Iid = Iid::from_u128(0x1);
pub const OBJECT_IID: Iid = Iid::from_u128(0x2);

/// Newest `Device` version in [`device_graph`]
pub const DEVICE_LEAF: u32 = 5;

pub const fn device_iid(version: u32) -> Iid {
    Iid::from_u128(0x100 + version as u128)
}

pub const fn fence_iid(version: u32) -> Iid {
    Iid::from_u128(0x200 + version as u128)
}

/// `IUnknown <- Object <- {Device..Device5, Fence..Fence1}`
pub fn device_graph() -> InterfaceGraph {
    let mut interfaces = vec![
        Interface::new("IUnknown").with_iid(ROOT_IID),
        Interface::new("Object").with_iid(OBJECT_IID).with_parent("IUnknown"),
    ];

    for version in 0..=DEVICE_LEAF {
        let parent = if version == 0 {
            "Object".to_string()
        } else {
            versioned("Device", version - 1)
        };
        interfaces.push(
            Interface::new(versioned("Device", version))
                .with_iid(device_iid(version))
                .with_parent(parent),
        );
    }

    interfaces.push(Interface::new("Fence").with_iid(fence_iid(0)).with_parent("Object"));
    interfaces.push(Interface::new("Fence1").with_iid(fence_iid(1)).with_parent("Fence"));

    interfaces.into_iter().collect()
}

/// Single family `Base..Base{height}` with ids `0x1000 * (index + 1) + version`
pub fn chain_graph(base: &str, height: u32, index: u128) -> InterfaceGraph {
    (0..=height)
        .map(|version| {
            let mut interface = Interface::new(versioned(base, version))
                .with_iid(Iid::from_u128(0x1000 * (index + 1) + u128::from(version)));
            if version > 0 {
                interface = interface.with_parent(versioned(base, version - 1));
            }
            interface
        })
        .collect()
}

/// Wrapper factory over [`device_graph`]
pub fn device_factory() -> WrapperFactory {
    let table = DispatchTable::generate(&device_graph(), &GenerationConfig::default())
        .expect("device graph is well formed");
    WrapperFactory::new(table)
}

/// Native object with a fixed capability set
///
/// Counts references and records every interface probe.
#[derive(Debug)]
pub struct FakeNative {
    supported: Vec<Iid>,
    refs: AtomicU32,
    probes: Mutex<Vec<Iid>>,
}

impl FakeNative {
    pub fn new(supported: impl IntoIterator<Item = Iid>) -> Arc<Self> {
        Arc::new(Self {
            supported: supported.into_iter().collect(),
            refs: AtomicU32::new(0),
            probes: Mutex::new(Vec::new()),
        })
    }

    /// Device supporting versions `0..=newest`
    pub fn device(newest: u32) -> Arc<Self> {
        Self::new((0..=newest).map(device_iid).chain([OBJECT_IID, ROOT_IID]))
    }

    /// New reference typed as `iid`, as a native call would return it
    pub fn hand_out(self: &Arc<Self>, iid: Iid) -> NativePtr {
        self.add_ref();
        NativePtr::new(Arc::clone(self) as Arc<dyn NativeObject>, iid)
    }

    /// [`hand_out`](Self::hand_out) placed in a wrap slot
    pub fn slot(self: &Arc<Self>, iid: Iid) -> ObjectSlot {
        ObjectSlot::Native(self.hand_out(iid))
    }

    pub fn ref_count(&self) -> u32 {
        self.refs.load(Ordering::SeqCst)
    }

    pub fn probes(&self) -> Vec<Iid> {
        self.probes.lock().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().len()
    }

    pub fn clear_probes(&self) {
        self.probes.lock().clear();
    }
}

impl NativeObject for FakeNative {
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

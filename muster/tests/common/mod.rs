#![allow(dead_code)]

use muster::{BoxError, Consumer, FragmentPayload, Implementor, Producer};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Payloads
// ============================================================================

/// Build a payload from literal groups.
pub fn payload(groups: &[(&'static str, &[&'static str])]) -> FragmentPayload {
    let mut payload = FragmentPayload::new();
    for (key, implementors) in groups {
        payload
            .try_insert(*key, implementors.iter().copied())
            .expect("test groups are unique");
    }
    payload
}

pub fn markup(implementors: &[Implementor]) -> Vec<&str> {
    implementors.iter().map(Implementor::markup).collect()
}

pub fn core_fragment() -> FragmentPayload {
    payload(&[(
        "polars_core",
        &[
            "impl Deref for GroupPositions",
            "impl Deref for Series",
            "impl<K, T> Deref for Logical<K, T>",
        ],
    )])
}

pub fn arrow_fragment() -> FragmentPayload {
    payload(&[
        ("polars_arrow", &["impl Deref for Buffer<T>"]),
        ("polars_compute", &["impl Deref for SumWindow<T>"]),
    ])
}

pub fn utils_fragment() -> FragmentPayload {
    payload(&[("polars_utils", &["impl<T> Deref for UnitVec<T>"])])
}

pub static CORE: Producer = Producer::new("deref/polars_core", core_fragment);
pub static ARROW: Producer = Producer::new("deref/polars_arrow", arrow_fragment);

// ============================================================================
// Test Consumers
// ============================================================================

/// Records the group keys of each delivered payload, one entry per delivery.
#[derive(Clone, Default)]
pub struct KeyLog {
    pub deliveries: Arc<Mutex<Vec<Vec<String>>>>,
}

impl KeyLog {
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.deliveries.lock().unwrap().clone()
    }
}

impl Consumer<FragmentPayload> for KeyLog {
    fn consume(&self, payload: FragmentPayload) -> Result<(), BoxError> {
        let keys = payload.keys().map(ToString::to_string).collect();
        self.deliveries.lock().unwrap().push(keys);
        Ok(())
    }
}

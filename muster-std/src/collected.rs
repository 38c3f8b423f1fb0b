//! Link-time fragment collection via `inventory`.
//!
//! Fragments can be declared anywhere in the dependency graph with
//! [`submit_fragment!`](crate::submit_fragment) and are gathered at runtime by
//! [`load_collected`]. Collection order is whatever the linker produced, so
//! nothing may depend on it; the registry keeps delivery exactly-once either
//! way.

use crate::{producer::Producer, registry::Registry};
use muster_core::{DeliveryError, FragmentPayload};

/// A fragment producer submitted to the link-time collection.
///
/// The producer itself lives in a `static`: its run-once flag is an atomic,
/// and `inventory` entries must be free of interior mutability.
pub struct CollectedFragment {
    producer: &'static Producer<FragmentPayload>,
}

impl CollectedFragment {
    /// Point the collection at a fragment's producer.
    pub const fn new(producer: &'static Producer<FragmentPayload>) -> Self {
        Self { producer }
    }

    /// The underlying run-once producer.
    pub fn producer(&self) -> &'static Producer<FragmentPayload> {
        self.producer
    }
}

inventory::collect!(CollectedFragment);

/// Names of every collected fragment, in collection order.
pub fn collected_names() -> Vec<&'static str> {
    inventory::iter::<CollectedFragment>
        .into_iter()
        .map(|fragment| fragment.producer.name())
        .collect()
}

/// Run every collected producer that has not run yet against `registry`.
///
/// Returns how many fragments this call submitted. Stops at the first
/// consumer error; calling again resumes with the fragments not yet loaded.
pub fn load_collected(registry: &Registry<FragmentPayload>) -> Result<usize, DeliveryError> {
    let mut loaded = 0;
    for fragment in inventory::iter::<CollectedFragment> {
        if fragment.producer.run(registry)? {
            loaded += 1;
        }
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        registry = registry.name(),
        loaded,
        "collected fragments loaded"
    );
    Ok(loaded)
}

/// Declares a fragment in the link-time collection.
///
/// The builder must be a function or non-capturing closure returning a
/// [`FragmentPayload`].
///
/// # Example
/// ```rust,ignore
/// muster_std::submit_fragment!("polars/Deref", || implementors! {
///     "polars_core" => ["impl Deref for Series"],
/// });
/// ```
#[macro_export]
macro_rules! submit_fragment {
    ($name:expr, $build:expr $(,)?) => {
        const _: () = {
            static __MUSTER_PRODUCER: $crate::producer::Producer<
                $crate::muster_core::FragmentPayload,
            > = $crate::producer::Producer::new($name, $build);

            $crate::inventory::submit! {
                $crate::collected::CollectedFragment::new(&__MUSTER_PRODUCER)
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn arrow_fragment() -> FragmentPayload {
        FragmentPayload::from_groups([("polars_arrow", vec!["impl Deref for Buffer<T>"])])
            .unwrap_or_default()
    }

    crate::submit_fragment!("unit/arrow", arrow_fragment);
    crate::submit_fragment!("unit/utils", || {
        FragmentPayload::from_groups([("polars_utils", vec!["impl Deref for UnitVec<T>"])])
            .unwrap_or_default()
    });

    #[test]
    fn test_load_collected_runs_each_once() {
        let names = collected_names();
        assert!(names.contains(&"unit/arrow"));
        assert!(names.contains(&"unit/utils"));

        let registry = Registry::new();
        let first = load_collected(&registry).unwrap();
        assert_eq!(first, 2);
        assert_eq!(load_collected(&registry).unwrap(), 0);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        registry
            .install(move |payload: FragmentPayload| {
                sink.lock().unwrap().extend(payload.keys().map(|k| k.to_string()));
            })
            .unwrap();

        let mut groups = seen.lock().unwrap().clone();
        groups.sort();
        assert_eq!(groups, vec!["polars_arrow", "polars_utils"]);

        // The collection hands out the same static producer every time.
        assert!(
            inventory::iter::<CollectedFragment>
                .into_iter()
                .all(|fragment| fragment.producer().has_run())
        );
    }

    #[test]
    fn test_wraps_static_producer() {
        static DEREF: Producer = Producer::new("unit/deref", arrow_fragment);
        let fragment = CollectedFragment::new(&DEREF);

        assert!(std::ptr::eq(fragment.producer(), &DEREF));
        assert_eq!(fragment.producer().name(), "unit/deref");
        assert!(!fragment.producer().has_run());
    }
}

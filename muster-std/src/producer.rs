//! Fragment producers.
//!
//! A [`Producer`] is one fragment's run-once handoff: it materializes the
//! fragment's embedded payload and submits it to a [`Registry`]. Producers
//! are `const`-constructible so a fragment can live in a `static`.

use crate::registry::Registry;
use muster_core::{DeliveryError, FragmentPayload, Message};
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

/// A run-once fragment producer.
///
/// # Example
///
/// ```rust,ignore
/// static DEREF_POLARS: Producer = Producer::new("polars/Deref", || {
///     implementors! {
///         "polars_core" => ["impl Deref for Series"],
///     }
/// });
///
/// DEREF_POLARS.run(&registry)?;
/// ```
pub struct Producer<P: Message = FragmentPayload> {
    name: &'static str,
    build: fn() -> P,
    ran: AtomicBool,
}

impl<P: Message> Producer<P> {
    /// Create a producer from the function that builds its payload.
    pub const fn new(name: &'static str, build: fn() -> P) -> Self {
        Self {
            name,
            build,
            ran: AtomicBool::new(false),
        }
    }

    /// Fragment name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this producer has already handed its payload over.
    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::Acquire)
    }

    /// Build the payload and submit it, once.
    ///
    /// Returns `Ok(true)` when this call submitted and `Ok(false)` when the
    /// producer had already run. A consumer error raised by an immediate
    /// delivery is passed through to the caller; the payload is not
    /// resubmitted on a later call.
    pub fn run(&self, registry: &Registry<P>) -> Result<bool, DeliveryError> {
        if self.ran.swap(true, Ordering::AcqRel) {
            #[cfg(feature = "tracing")]
            tracing::debug!(fragment = self.name, "fragment already submitted, skipping");
            return Ok(false);
        }
        let payload = (self.build)();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            fragment = self.name,
            registry = registry.name(),
            "submitting fragment"
        );
        registry.submit(payload)?;
        Ok(true)
    }
}

impl<P: Message> fmt::Debug for Producer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("name", &self.name)
            .field("ran", &self.has_run())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn deref_fragment() -> FragmentPayload {
        FragmentPayload::from_groups([(
            "polars_core",
            vec!["impl Deref for Series", "impl Deref for GroupPositions"],
        )])
        .unwrap_or_default()
    }

    #[test]
    fn test_run_submits_once() {
        let producer = Producer::new("deref", deref_fragment);
        let registry = Registry::new();

        assert!(producer.run(&registry).unwrap());
        assert!(producer.has_run());
        assert!(!producer.run(&registry).unwrap());
        assert_eq!(registry.pending_len(), 1);
    }

    #[test]
    fn test_static_producer() {
        static FRAGMENT: Producer = Producer::new("static", || {
            FragmentPayload::from_groups([("polars_io", vec!["impl Deref for Wrapper"])])
                .unwrap_or_default()
        });

        let registry = Registry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        registry
            .install(move |payload: FragmentPayload| sink.lock().unwrap().push(payload))
            .unwrap();

        assert!(FRAGMENT.run(&registry).unwrap());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("polars_io"));
    }

    #[test]
    fn test_consumer_error_reaches_producer_caller() {
        let producer = Producer::new("failing", deref_fragment);
        let registry = Registry::new();
        registry
            .install(|_payload: FragmentPayload| -> Result<(), String> {
                Err("renderer rejected fragment".into())
            })
            .unwrap();

        let err = producer.run(&registry).unwrap_err();
        assert!(matches!(err, DeliveryError::Consumer(_)));
        // Ran counts even though the consumer failed: no resubmission.
        assert!(!producer.run(&registry).unwrap());
        assert_eq!(registry.delivered(), 1);
    }
}

//! Testing utilities for Muster.
//!
//! This module provides consumers that make registry behavior easy to
//! assert on.
//!
//! # Features
//!
//! - [`RecordingConsumer`]: records every payload it receives, in order
//! - [`CountingConsumer`]: counts deliveries
//! - [`FailingConsumer`]: fails on a chosen delivery

use muster_core::{BoxError, Consumer, Message};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

// ============================================================================
// Recording Consumer
// ============================================================================

/// A consumer that records all payloads it receives.
///
/// Useful for verifying delivery order and exactly-once behavior.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingConsumer::<FragmentPayload>::new();
/// registry.install(recorder.clone())?;
///
/// registry.submit(payload)?;
/// assert_eq!(recorder.len(), 1);
/// ```
pub struct RecordingConsumer<P> {
    payloads: Arc<Mutex<Vec<P>>>,
}

impl<P> RecordingConsumer<P> {
    /// Create a new recording consumer.
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of recorded payloads.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Take every recorded payload, leaving the recorder empty.
    pub fn take(&self) -> Vec<P> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<P>> {
        self.payloads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Clone> RecordingConsumer<P> {
    /// Get a clone of the recorded payloads.
    pub fn payloads(&self) -> Vec<P> {
        self.lock().clone()
    }
}

impl<P> Default for RecordingConsumer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for RecordingConsumer<P> {
    fn clone(&self) -> Self {
        Self {
            payloads: self.payloads.clone(),
        }
    }
}

impl<P: Message> Consumer<P> for RecordingConsumer<P> {
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        self.lock().push(payload);
        Ok(())
    }
}

// ============================================================================
// Counting Consumer
// ============================================================================

/// A consumer that counts deliveries and discards the payloads.
#[derive(Clone, Default)]
pub struct CountingConsumer {
    count: Arc<AtomicUsize>,
}

impl CountingConsumer {
    /// Create a new counting consumer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<P: Message> Consumer<P> for CountingConsumer {
    fn consume(&self, _payload: P) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Consumer
// ============================================================================

/// Error produced by [`FailingConsumer`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("injected failure on delivery #{0}")]
pub struct InjectedFailure(pub usize);

/// A consumer that records payloads and fails on one chosen delivery.
///
/// Deliveries are numbered from zero. The failing payload is recorded too,
/// since the consumer did receive it.
pub struct FailingConsumer<P> {
    recorder: RecordingConsumer<P>,
    seen: Arc<AtomicUsize>,
    fail_on: usize,
}

impl<P> FailingConsumer<P> {
    /// Fail on the `fail_on`-th delivery (zero-based).
    pub fn new(fail_on: usize) -> Self {
        Self {
            recorder: RecordingConsumer::new(),
            seen: Arc::new(AtomicUsize::new(0)),
            fail_on,
        }
    }

    /// The recorder holding every payload received so far.
    pub fn recorder(&self) -> &RecordingConsumer<P> {
        &self.recorder
    }
}

impl<P> Clone for FailingConsumer<P> {
    fn clone(&self) -> Self {
        Self {
            recorder: self.recorder.clone(),
            seen: self.seen.clone(),
            fail_on: self.fail_on,
        }
    }
}

impl<P: Message> Consumer<P> for FailingConsumer<P> {
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        let n = self.seen.fetch_add(1, Ordering::SeqCst);
        self.recorder.lock().push(payload);
        if n == self.fail_on {
            return Err(Box::new(InjectedFailure(n)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_consumer_keeps_order() {
        let recorder = RecordingConsumer::new();
        recorder.consume(1u32).unwrap();
        recorder.consume(2u32).unwrap();
        assert_eq!(recorder.payloads(), vec![1, 2]);
        assert_eq!(recorder.take(), vec![1, 2]);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_failing_consumer_fails_once() {
        let consumer = FailingConsumer::new(1);
        assert!(consumer.consume(10u32).is_ok());
        let err = consumer.consume(11u32).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InjectedFailure>(),
            Some(&InjectedFailure(1))
        );
        assert!(consumer.consume(12u32).is_ok());
        assert_eq!(consumer.recorder().payloads(), vec![10, 11, 12]);
    }

    #[test]
    fn test_counting_consumer_reset() {
        let counter = CountingConsumer::new();
        Consumer::<()>::consume(&counter, ()).unwrap();
        assert_eq!(counter.count(), 1);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}

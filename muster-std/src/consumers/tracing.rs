//! Span instrumentation for consumers.

use muster_core::{BoxError, Consumer, Message};

/// A consumer wrapper that runs every delivery inside a `tracing` span.
///
/// Log lines emitted by the inner consumer while it handles a payload are
/// attributed to the span, which carries the wrapper's name.
pub struct TracingConsumer<C> {
    inner: C,
    name: &'static str,
}

impl<C> TracingConsumer<C> {
    /// Create a new `TracingConsumer` wrapper around a consumer.
    pub const fn new(inner: C, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<C: Clone> Clone for TracingConsumer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<P, C> Consumer<P> for TracingConsumer<C>
where
    P: Message,
    C: Consumer<P>,
{
    #[cfg(feature = "tracing")]
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        let span = tracing::info_span!("payload_delivery", consumer = %self.name);
        let _entered = span.enter();
        self.inner.consume(payload)
    }

    #[cfg(not(feature = "tracing"))]
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        let _ = self.name;
        self.inner.consume(payload)
    }
}

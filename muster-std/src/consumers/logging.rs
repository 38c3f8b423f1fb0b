//! Logging consumer for delivery observation.

use muster_core::{BoxError, Consumer, FragmentPayload};

/// A consumer wrapper that logs each delivered fragment, then forwards it.
///
/// Logs the fragment's shape (group count and implementor count) at
/// `debug` when the `tracing` feature is enabled; forwards silently
/// otherwise.
///
/// # Example
///
/// ```rust,ignore
/// registry.install(LoggingConsumer::named("deref-index", index.clone()))?;
/// ```
pub struct LoggingConsumer<C> {
    inner: C,
    name: &'static str,
}

impl<C> LoggingConsumer<C> {
    /// Wrap a consumer with a default name.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            name: "consumer",
        }
    }

    /// Wrap a consumer with a custom name used in log lines.
    pub fn named(name: &'static str, inner: C) -> Self {
        Self { inner, name }
    }

    /// The wrapped consumer.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> Consumer<FragmentPayload> for LoggingConsumer<C>
where
    C: Consumer<FragmentPayload>,
{
    fn consume(&self, payload: FragmentPayload) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            let layout = payload.layout();
            tracing::debug!(
                name = %self.name,
                groups = layout.groups,
                implementors = layout.total(),
                "delivering fragment"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = self.name;
        }

        self.inner.consume(payload)
    }
}

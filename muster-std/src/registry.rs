//! Deferred registry: the convergence point for independently loaded fragments.
//!
//! A [`Registry`] starts out *unready* and buffers whatever is submitted.
//! Installing a consumer makes it *ready* for good: the buffer is flushed to
//! the consumer in submission order and every later submission is delivered
//! straight away.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Registry::<FragmentPayload>::builder()
//!     .name("trait.impl/core/ops/deref/trait.Deref")
//!     .build();
//!
//! // Fragments may arrive before the renderer exists...
//! registry.submit(payload_a)?;
//!
//! // ...and are handed over once it shows up.
//! registry.install(|payload: FragmentPayload| render(payload))?;
//!
//! // From here on, delivery is immediate.
//! registry.submit(payload_b)?;
//! ```

use muster_core::{Consumer, DeliveryError, InstallError, Message};
use std::{
    collections::VecDeque,
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

const DEFAULT_NAME: &str = "registry";

/// Lifecycle phase of a registry.
enum Phase<P: Message> {
    /// No consumer yet; submissions are buffered in arrival order.
    Unready { pending: VecDeque<P> },
    /// A consumer is installed. `queue` only holds payloads that arrived while
    /// another call was already delivering.
    Ready {
        consumer: Arc<dyn Consumer<P>>,
        queue: VecDeque<P>,
        draining: bool,
    },
}

struct State<P: Message> {
    phase: Phase<P>,
    delivered: usize,
}

/// Buffers payloads until a consumer is installed, then forwards them.
///
/// Every submitted payload reaches the consumer exactly once and in arrival
/// order, whether it was buffered first or delivered immediately.
///
/// The consumer is never called with the internal lock held. Only one caller
/// delivers at a time; a submission made while a delivery is running (from
/// another thread, or from inside the consumer itself) is queued behind it and
/// picked up by the caller that is already delivering.
pub struct Registry<P: Message> {
    name: &'static str,
    state: Mutex<State<P>>,
}

impl<P: Message> Registry<P> {
    /// Create an unready registry with default settings.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    /// Start configuring a registry.
    pub fn builder() -> RegistryBuilder<P> {
        RegistryBuilder::new()
    }

    /// Label used in logs and errors.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a consumer has been installed.
    pub fn is_ready(&self) -> bool {
        matches!(self.lock().phase, Phase::Ready { .. })
    }

    /// Payloads accepted but not yet handed to the consumer.
    ///
    /// Before install this is the buffer. After install it is non-zero only
    /// while a delivery is in flight or after a consumer failure.
    pub fn pending_len(&self) -> usize {
        match &self.lock().phase {
            Phase::Unready { pending } => pending.len(),
            Phase::Ready { queue, .. } => queue.len(),
        }
    }

    /// Number of payloads handed to the consumer so far.
    pub fn delivered(&self) -> usize {
        self.lock().delivered
    }

    /// Hand a payload to the registry.
    ///
    /// Unready: the payload is buffered and this returns `Ok(())`.
    /// Ready: the payload is delivered now; a consumer error is returned to
    /// the caller unchanged.
    ///
    /// While another call is already delivering (another thread, or the
    /// consumer submitting from inside itself), `Ok(())` only means the
    /// payload was queued. That caller delivers it; if the consumer fails
    /// first, the error goes to that caller and the payload waits for the
    /// next `submit` or [`drain`](Self::drain).
    pub fn submit(&self, payload: P) -> Result<(), DeliveryError> {
        {
            let mut state = self.lock();
            match &mut state.phase {
                Phase::Unready { pending } => {
                    pending.push_back(payload);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        registry = self.name,
                        pending = pending.len(),
                        "no consumer yet, payload buffered"
                    );
                    return Ok(());
                }
                Phase::Ready { queue, .. } => queue.push_back(payload),
            }
        }
        self.drain()
    }

    /// Install the consumer and flush everything buffered so far.
    ///
    /// Can succeed only once. A second call returns
    /// [`InstallError::AlreadyInstalled`], drops the rejected consumer and
    /// leaves the installed one in place.
    pub fn install<C>(&self, consumer: C) -> Result<(), InstallError>
    where
        C: Consumer<P>,
    {
        {
            let mut state = self.lock();
            let pending = match &mut state.phase {
                Phase::Ready { .. } => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(registry = self.name, "rejected second consumer install");
                    return Err(InstallError::AlreadyInstalled {
                        registry: self.name.to_string(),
                    });
                }
                Phase::Unready { pending } => std::mem::take(pending),
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(
                registry = self.name,
                flushing = pending.len(),
                "consumer installed"
            );
            state.phase = Phase::Ready {
                consumer: Arc::new(consumer),
                queue: pending,
                draining: false,
            };
        }
        self.drain()?;
        Ok(())
    }

    /// Deliver anything still queued.
    ///
    /// Only needed after a consumer failure left payloads behind; `submit`
    /// drains as well. A no-op while unready or while another call is
    /// already delivering.
    pub fn drain(&self) -> Result<(), DeliveryError> {
        let consumer = {
            let mut state = self.lock();
            match &mut state.phase {
                Phase::Unready { .. } => return Ok(()),
                Phase::Ready { draining: true, .. } => return Ok(()),
                Phase::Ready {
                    consumer, draining, ..
                } => {
                    *draining = true;
                    Arc::clone(consumer)
                }
            }
        };

        let mut guard = DrainGuard {
            registry: self,
            armed: true,
        };
        while let Some(payload) = self.next_queued() {
            if let Err(err) = consumer.consume(payload) {
                #[cfg(feature = "tracing")]
                tracing::error!(registry = self.name, error = %err, "consumer failed");
                return Err(DeliveryError::Consumer(err));
            }
        }
        // `next_queued` already released the drain.
        guard.armed = false;
        Ok(())
    }

    /// Pop the next payload to deliver, releasing the drain when empty.
    ///
    /// Popping and releasing happen under one lock so a concurrent submit
    /// either lands before the release and is popped here, or sees the drain
    /// released and delivers itself.
    fn next_queued(&self) -> Option<P> {
        let mut state = self.lock();
        let state = &mut *state;
        let Phase::Ready {
            queue, draining, ..
        } = &mut state.phase
        else {
            return None;
        };
        match queue.pop_front() {
            Some(payload) => {
                state.delivered += 1;
                Some(payload)
            }
            None => {
                *draining = false;
                None
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<P>> {
        // State transitions never panic halfway, so a poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Message> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Message> fmt::Debug for Registry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("ready", &self.is_ready())
            .field("pending", &self.pending_len())
            .field("delivered", &self.delivered())
            .finish()
    }
}

/// Releases the drain flag if delivery stops early (consumer error or panic).
struct DrainGuard<'a, P: Message> {
    registry: &'a Registry<P>,
    armed: bool,
}

impl<P: Message> Drop for DrainGuard<'_, P> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Phase::Ready { draining, .. } = &mut self.registry.lock().phase {
            *draining = false;
        }
    }
}

// ============================================================================
// RegistryBuilder
// ============================================================================

/// Builder for a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry: Registry<FragmentPayload> = Registry::builder()
///     .name("trait.impl/core/ops/deref/trait.Deref")
///     .capacity(64)
///     .build();
/// ```
pub struct RegistryBuilder<P: Message> {
    name: &'static str,
    capacity: usize,
    _payload: PhantomData<fn() -> P>,
}

impl<P: Message> RegistryBuilder<P> {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME,
            capacity: 0,
            _payload: PhantomData,
        }
    }

    /// Set the label used in logs and errors.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Pre-size the pending buffer for the expected number of fragments.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Build an unready registry.
    pub fn build(self) -> Registry<P> {
        Registry {
            name: self.name,
            state: Mutex::new(State {
                phase: Phase::Unready {
                    pending: VecDeque::with_capacity(self.capacity),
                },
                delivered: 0,
            }),
        }
    }
}

impl<P: Message> Default for RegistryBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

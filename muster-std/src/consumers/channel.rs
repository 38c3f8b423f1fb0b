//! Channel consumer bridging a registry to an async `Stream`.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use muster_core::{BoxError, Consumer, Message};
use thiserror::Error;

/// Returned when the receiving side of a channel consumer has been dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("payload stream receiver was dropped")]
pub struct ChannelClosed;

/// The receiving half handed to an async renderer.
pub type PayloadStream<P> = UnboundedReceiver<P>;

/// A consumer that forwards every payload into an unbounded channel.
pub struct ChannelConsumer<P: Message> {
    tx: UnboundedSender<P>,
}

impl<P: Message> ChannelConsumer<P> {
    /// Whether the receiving side is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a channel consumer and the stream it feeds.
///
/// # Example
///
/// ```rust,ignore
/// let (consumer, mut stream) = muster_std::consumers::channel();
/// registry.install(consumer)?;
///
/// while let Some(payload) = stream.next().await {
///     render(payload).await;
/// }
/// ```
pub fn channel<P: Message>() -> (ChannelConsumer<P>, PayloadStream<P>) {
    let (tx, rx) = mpsc::unbounded();
    (ChannelConsumer { tx }, rx)
}

impl<P: Message> Consumer<P> for ChannelConsumer<P> {
    fn consume(&self, payload: P) -> Result<(), BoxError> {
        self.tx
            .unbounded_send(payload)
            .map_err(|_| Box::new(ChannelClosed) as BoxError)
    }
}

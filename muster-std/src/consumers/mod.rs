//! Ready-made consumers.
//!
//! - [`ImplementorIndex`]: merges fragments into one page-wide view
//! - [`ChannelConsumer`]: forwards payloads to an async stream
//! - [`LoggingConsumer`], [`TracingConsumer`]: observation wrappers

pub mod channel;
pub mod index;
pub mod logging;
pub mod tracing;

pub use self::channel::{ChannelClosed, ChannelConsumer, PayloadStream, channel};
pub use self::index::ImplementorIndex;
pub use self::logging::LoggingConsumer;
pub use self::tracing::TracingConsumer;

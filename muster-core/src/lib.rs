//! # muster-core
//!
//! Core types for the Muster deferred fragment registry.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! fragment producers and consumers that do not need the registry itself.
//!
//! # Pieces
//!
//! - [`Message`] - marker for anything a registry can carry
//! - [`Consumer`] - the single subscriber a registry delivers to
//! - [`FragmentPayload`] - one fragment's `GroupKey -> [Implementor]` slice
//!
//! # Error Types
//!
//! - [`MusterError`] - Top-level error type
//! - [`InstallError`] - Consumer installation errors
//! - [`DeliveryError`] - Payload delivery errors
//! - [`PayloadError`] - Payload construction errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod consumer;
mod error;
mod message;
mod payload;

// Re-exports
pub use consumer::{Consumer, IntoConsumeResult};
pub use error::{BoxError, DeliveryError, InstallError, MusterError, PayloadError};
pub use message::Message;
pub use payload::{FragmentLayout, FragmentPayload, GroupKey, Implementor};

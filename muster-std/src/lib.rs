//! # muster-std
//!
//! Standard implementations for the Muster deferred fragment registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], buffering until a consumer is installed
//! - **Producers**: [`Producer`], the run-once fragment handoff
//! - **Collected fragments**: link-time fragment declaration (`inventory` feature)
//! - **Consumers**: [`consumers::ImplementorIndex`], channel, logging and tracing wrappers
//! - **Testing**: recording, counting and failing consumers
//!
//! [`Registry`]: registry::Registry
//! [`Producer`]: producer::Producer

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use muster_core;

// Modules
#[cfg(feature = "inventory")]
pub mod collected;
pub mod consumers;
pub mod producer;
pub mod registry;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;

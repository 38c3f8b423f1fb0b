//! Error types for Muster.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MusterError`] - Top-level error type for all Muster operations
//! - [`InstallError`] - Errors while installing a registry consumer
//! - [`DeliveryError`] - Errors raised while delivering a payload
//! - [`PayloadError`] - Errors while building a payload at runtime

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Muster operations.
#[derive(Error, Debug)]
pub enum MusterError {
    /// Installing a consumer failed.
    #[error("install error: {0}")]
    Install(#[from] InstallError),

    /// Delivering a payload failed.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Building a payload failed.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur when installing a consumer.
#[derive(Error, Debug)]
pub enum InstallError {
    /// A consumer was already installed; the registry keeps the first one.
    #[error("registry `{registry}` already has a consumer installed")]
    AlreadyInstalled {
        /// Name of the registry that rejected the install.
        registry: String,
    },

    /// The consumer was installed but failed on a buffered payload.
    ///
    /// The registry is ready regardless. Payloads buffered behind the failing
    /// one are still queued.
    #[error("flushing pending payloads failed")]
    Flush(#[from] DeliveryError),
}

/// Errors that can occur while delivering payloads to a consumer.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The consumer returned an error for a payload it was handed.
    #[error("consumer failed")]
    Consumer(#[source] BoxError),
}

/// Errors that can occur while building a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The same group key was inserted twice into one payload.
    #[error("duplicate group key in payload: {0}")]
    DuplicateGroup(String),
}

impl From<BoxError> for MusterError {
    fn from(err: BoxError) -> Self {
        MusterError::Custom(err)
    }
}

impl From<BoxError> for DeliveryError {
    fn from(err: BoxError) -> Self {
        DeliveryError::Consumer(err)
    }
}

//! # muster - Deferred Fragment Registration
//!
//! `muster` lets any number of independently loaded data fragments converge on
//! a single consumer, whether or not that consumer exists when a fragment
//! arrives. Fragments are buffered until the consumer is installed, then
//! flushed in arrival order; afterwards they are delivered immediately. Every
//! fragment is delivered exactly once.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use muster::{FragmentPayload, ImplementorIndex, Producer, Registry, implementors};
//!
//! static DEREF: Producer = Producer::new("trait.impl/core/ops/deref/trait.Deref", || {
//!     implementors! {
//!         "polars_core" => ["impl Deref for Series"],
//!     }
//! });
//!
//! let registry = Registry::<FragmentPayload>::new();
//! DEREF.run(&registry)?;            // buffered
//!
//! let index = ImplementorIndex::new();
//! registry.install(index.clone())?; // flushed
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use muster_core::{
    // Error types
    BoxError,
    // Consumer
    Consumer,
    DeliveryError,
    // Payload
    FragmentLayout,
    FragmentPayload,
    GroupKey,
    Implementor,
    InstallError,
    IntoConsumeResult,
    // Message
    Message,
    MusterError,
    PayloadError,
};

pub use muster_std::{
    consumers::{ChannelConsumer, ImplementorIndex, LoggingConsumer, TracingConsumer},
    producer::Producer,
    registry::{Registry, RegistryBuilder},
};

/// Ready-made consumers.
pub mod consumers {
    #![allow(clippy::wildcard_imports)]
    pub use muster_std::consumers::*;
}

/// Link-time fragment collection.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use muster_std::collected::{CollectedFragment, collected_names, load_collected};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use muster_std::testing::*;
}

/// Prelude module - common imports for Muster.
///
/// # Usage
///
/// ```rust,ignore
/// use muster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Consumer, DeliveryError, FragmentPayload, GroupKey, Implementor,
        ImplementorIndex, InstallError, Message, Producer, Registry,
    };
}

#[cfg(feature = "macros")]
pub use muster_macros::{Message, implementors};

#[cfg(feature = "inventory")]
pub use muster_std::submit_fragment;

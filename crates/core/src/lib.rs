// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! evd-core: In-process event dispatch
//!
//! This crate provides:
//! - `EventDispatcher` - local listeners plus the merged, priority-ordered trigger
//! - `SharedListeners` - listeners addressed by (identifier, event name), shared across dispatchers
//! - `Event` - the mutable payload handed to each listener
//! - `ListenerAggregate` - attach and detach batches of listeners
//!
//! Both event names and identifiers accept the wildcard `*`.

pub mod aggregate;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod id;
pub mod key;
pub mod listener;
pub mod registry;
pub mod response;
pub mod shared;

// Re-exports
pub use aggregate::{ListenerAggregate, ListenerHandles};
pub use config::{ConfigError, DispatcherConfig};
pub use dispatcher::EventDispatcher;
pub use error::{EventError, ListenerError};
pub use event::{Event, Params, Target};
pub use key::{Key, WILDCARD};
pub use listener::{Listener, ListenerHandle, ListenerResult, DEFAULT_PRIORITY};
pub use registry::{Entry, PriorityRegistry};
pub use response::Responses;
pub use shared::SharedListeners;

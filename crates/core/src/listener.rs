// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener callbacks and the handles returned when attaching them

use crate::error::ListenerError;
use crate::event::Event;
use crate::id::RegistryId;
use crate::key::Key;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Priority a listener runs at when none is given
pub const DEFAULT_PRIORITY: i32 = 1;

/// Result of a single listener invocation
pub type ListenerResult = Result<Option<Value>, ListenerError>;

type Callback = dyn Fn(&mut Event) -> ListenerResult + Send + Sync;

/// A callback invoked when a matching event is triggered.
///
/// Clones share the same callback and compare equal; separately constructed
/// listeners never do, even when built from identical closures.
#[derive(Clone)]
pub struct Listener(Arc<Callback>);

impl Listener {
    /// Listener that produces no response
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        Self(Arc::new(move |event: &mut Event| {
            f(event);
            Ok(None)
        }))
    }

    /// Listener whose return value is collected into the trigger's responses
    pub fn responding<F, V>(f: F) -> Self
    where
        F: Fn(&mut Event) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self(Arc::new(move |event: &mut Event| Ok(Some(f(event).into()))))
    }

    /// Listener that may fail and abort the rest of the trigger
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&mut Event) -> ListenerResult + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, event: &mut Event) -> ListenerResult {
        (self.0)(event)
    }

    /// Identity comparison
    pub fn same(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Opaque handle identifying one attached listener.
///
/// A handle only means something to the registry that issued it; presenting
/// it anywhere else is a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    pub(crate) registry: RegistryId,
    pub(crate) identifier: Option<Key>,
    pub(crate) event: Key,
    pub(crate) sequence: u64,
}

impl ListenerHandle {
    /// Event name the listener was attached to (`*` for wildcard listeners)
    pub fn event(&self) -> &str {
        self.event.as_str()
    }

    /// Identifier for shared listeners; `None` for local ones
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_ref().map(Key::as_str)
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;

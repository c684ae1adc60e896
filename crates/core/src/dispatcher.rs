// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event dispatcher: local listeners, shared lookups, and the merged trigger
//!
//! A trigger collects six candidate sequences:
//! - local listeners for the event name, then for `*`
//! - shared listeners for (own identifiers, name), (own identifiers, `*`),
//!   (`*`, name) and (`*`, `*`)
//!
//! Higher priority always runs first. At equal priority the sources run in
//! the order listed above, and entries from one source keep their order.

use crate::aggregate::ListenerAggregate;
use crate::config::DispatcherConfig;
use crate::error::EventError;
use crate::event::{Event, Params, Target};
use crate::key::{Key, WILDCARD};
use crate::listener::{Listener, ListenerHandle, DEFAULT_PRIORITY};
use crate::registry::{Entry, PriorityRegistry};
use crate::response::Responses;
use crate::shared::SharedListeners;
use serde_json::Value;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::slice;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type LocalTable = HashMap<Key, PriorityRegistry>;

/// Where a candidate listener came from. Declaration order is the tie-break
/// order at equal priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Source {
    Local,
    LocalWildcard,
    Shared,
    SharedWildcardEvent,
    WildcardIdentifier,
    FullyWildcard,
}

/// Dispatches events to local and shared listeners.
///
/// Cloning yields another handle onto the same listeners and identifiers.
#[derive(Clone)]
pub struct EventDispatcher {
    local: Arc<RwLock<LocalTable>>,
    identifiers: Arc<RwLock<Vec<String>>>,
    shared: Option<SharedListeners>,
    default_priority: i32,
}

impl EventDispatcher {
    /// Dispatcher with only local listeners
    pub fn new() -> Self {
        Self {
            local: Arc::new(RwLock::new(HashMap::new())),
            identifiers: Arc::new(RwLock::new(Vec::new())),
            shared: None,
            default_priority: DEFAULT_PRIORITY,
        }
    }

    /// Dispatcher that also consults `shared` for the given identifiers
    pub fn with_shared<I, S>(shared: SharedListeners, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dispatcher = Self {
            shared: Some(shared),
            ..Self::new()
        };
        dispatcher.set_identifiers(identifiers);
        dispatcher
    }

    /// Dispatcher identified by the type name of its owning component
    pub fn for_type<T: ?Sized>(shared: SharedListeners) -> Self {
        Self::with_shared(shared, [std::any::type_name::<T>()])
    }

    pub fn from_config(config: &DispatcherConfig, shared: Option<SharedListeners>) -> Self {
        let dispatcher = Self {
            shared,
            default_priority: config.default_priority,
            ..Self::new()
        };
        dispatcher.set_identifiers(config.identifiers.iter().cloned());
        dispatcher
    }

    fn read_local(&self) -> RwLockReadGuard<'_, LocalTable> {
        self.local.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_local(&self) -> RwLockWriteGuard<'_, LocalTable> {
        self.local.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn shared(&self) -> Option<&SharedListeners> {
        self.shared.as_ref()
    }

    pub fn default_priority(&self) -> i32 {
        self.default_priority
    }

    // ------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------

    pub fn identifiers(&self) -> Vec<String> {
        self.identifiers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the identifier list
    pub fn set_identifiers<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut current = self.identifiers.write().unwrap_or_else(|e| e.into_inner());
        current.clear();
        extend_unique(&mut current, identifiers);
    }

    /// Append identifiers, skipping ones already present
    pub fn add_identifiers<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut current = self.identifiers.write().unwrap_or_else(|e| e.into_inner());
        extend_unique(&mut current, identifiers);
    }

    fn identifier_keys(&self) -> Vec<Key> {
        self.identifiers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|id| Key::Literal(id.clone()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Attach a local listener at the dispatcher's default priority
    pub fn attach(&self, event: &str, listener: Listener) -> Result<ListenerHandle, EventError> {
        self.attach_with_priority(event, listener, self.default_priority)
    }

    pub fn attach_with_priority(
        &self,
        event: &str,
        listener: Listener,
        priority: i32,
    ) -> Result<ListenerHandle, EventError> {
        let event = Key::event(event)?;
        let mut local = self.write_local();
        let registry = local.entry(event.clone()).or_default();
        let sequence = registry.insert(listener, priority);

        tracing::trace!(%event, priority, sequence, "attached listener");

        Ok(ListenerHandle {
            registry: registry.id(),
            identifier: None,
            event,
            sequence,
        })
    }

    /// Attach every listener of an aggregate
    pub fn attach_aggregate(
        &self,
        aggregate: &mut dyn ListenerAggregate,
        priority: i32,
    ) -> Result<(), EventError> {
        aggregate.attach(self, priority)
    }

    /// Remove a local listener by handle.
    ///
    /// Returns false for handles already detached, handles issued by another
    /// dispatcher, and shared-store handles.
    pub fn detach(&self, handle: &ListenerHandle) -> bool {
        if handle.identifier.is_some() {
            return false;
        }

        let mut local = self.write_local();
        let Some(registry) = local.get_mut(&handle.event) else {
            return false;
        };
        if registry.id() != handle.registry {
            tracing::trace!(event = %handle.event, "ignoring handle from another registry");
            return false;
        }
        let removed = registry.remove(handle.sequence);
        if registry.is_empty() {
            local.remove(&handle.event);
        }
        if removed {
            tracing::trace!(event = %handle.event, "detached listener");
        }
        removed
    }

    /// Remove a local listener by reference, from one event or from all of them
    pub fn detach_listener(&self, listener: &Listener, event: Option<&str>) -> usize {
        let mut local = self.write_local();
        let mut removed = 0;
        for (name, registry) in local.iter_mut() {
            if event.is_some_and(|wanted| wanted != name.as_str()) {
                continue;
            }
            removed += registry.remove_listener(listener);
        }
        local.retain(|_, registry| !registry.is_empty());
        removed
    }

    /// Remove every local listener for one event key. `*` clears only the
    /// wildcard listeners; shared listeners are never touched.
    pub fn clear_listeners(&self, event: &str) {
        let Ok(event) = Key::event(event) else {
            return;
        };
        if self.write_local().remove(&event).is_some() {
            tracing::trace!(%event, "cleared listeners");
        }
    }

    /// Event keys with local listeners, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_local().keys().map(|k| k.to_string()).collect();
        names.sort();
        names
    }

    /// Number of local listeners attached to exactly this event key
    pub fn listener_count(&self, event: &str) -> usize {
        let Ok(event) = Key::event(event) else {
            return 0;
        };
        self.read_local()
            .get(&event)
            .map_or(0, PriorityRegistry::len)
    }

    // ------------------------------------------------------------------
    // Triggering
    // ------------------------------------------------------------------

    /// Trigger an event with no target or params, returning the payload
    pub fn trigger(&self, name: &str) -> Result<Event, EventError> {
        self.trigger_with(name, None, Params::new())
    }

    pub fn trigger_with(
        &self,
        name: &str,
        target: Option<Target>,
        params: Params,
    ) -> Result<Event, EventError> {
        let mut event = Event::new(name).with_params(params);
        event.set_target(target);
        self.dispatch(&mut event, None)?;
        Ok(event)
    }

    /// Trigger a caller-built payload in place
    pub fn trigger_event(&self, event: &mut Event) -> Result<Responses, EventError> {
        self.dispatch(event, None)
    }

    /// Trigger until a listener's response satisfies `until`
    pub fn trigger_until<F>(&self, name: &str, until: F) -> Result<Responses, EventError>
    where
        F: Fn(&Value) -> bool,
    {
        let mut event = Event::new(name);
        let until: &dyn Fn(&Value) -> bool = &until;
        self.dispatch(&mut event, Some(until))
    }

    /// [`trigger_until`](Self::trigger_until) with a target and params, keeping the payload
    pub fn trigger_until_with<F>(
        &self,
        name: &str,
        target: Option<Target>,
        params: Params,
        until: F,
    ) -> Result<(Event, Responses), EventError>
    where
        F: Fn(&Value) -> bool,
    {
        let mut event = Event::new(name).with_params(params);
        event.set_target(target);
        let until: &dyn Fn(&Value) -> bool = &until;
        let responses = self.dispatch(&mut event, Some(until))?;
        Ok((event, responses))
    }

    pub fn trigger_event_until<F>(
        &self,
        event: &mut Event,
        until: F,
    ) -> Result<Responses, EventError>
    where
        F: Fn(&Value) -> bool,
    {
        let until: &dyn Fn(&Value) -> bool = &until;
        self.dispatch(event, Some(until))
    }

    fn dispatch(
        &self,
        event: &mut Event,
        until: Option<&dyn Fn(&Value) -> bool>,
    ) -> Result<Responses, EventError> {
        let key = Key::event(event.name())?;
        let name = key.to_string();
        let listeners = self.merged_listeners(&key);

        tracing::debug!(event = %name, listeners = listeners.len(), "triggering event");

        // A payload always starts dispatch unstopped, even when reused
        event.stop_propagation(false);
        let mut responses = Responses::default();

        for (invoked, listener) in listeners.iter().enumerate() {
            let response = listener
                .call(event)
                .map_err(|source| EventError::ListenerFailed {
                    event: name.clone(),
                    source,
                })?;

            let short_circuit =
                until.is_some_and(|until| until(response.as_ref().unwrap_or(&Value::Null)));
            responses.push(response);

            if event.is_propagation_stopped() {
                tracing::debug!(event = %name, invoked = invoked + 1, "propagation stopped");
                responses.set_stopped(true);
                break;
            }
            if short_circuit {
                tracing::debug!(event = %name, invoked = invoked + 1, "short-circuited");
                responses.set_stopped(true);
                break;
            }
        }

        Ok(responses)
    }

    /// Snapshot and merge every listener that applies to `event`
    fn merged_listeners(&self, event: &Key) -> Vec<Listener> {
        let wildcard = Key::Wildcard;
        let any = slice::from_ref(&wildcard);
        // Triggering `*` consults only the wildcard cells
        let exact: &[Key] = if event.is_wildcard() {
            &[]
        } else {
            slice::from_ref(event)
        };
        let mut candidates: Vec<(Source, Entry)> = Vec::new();

        {
            let local = self.read_local();
            for (source, key) in [(Source::Local, exact), (Source::LocalWildcard, any)] {
                if let Some(registry) = key.first().and_then(|key| local.get(key)) {
                    candidates.extend(registry.snapshot().into_iter().map(|e| (source, e)));
                }
            }
        }

        if let Some(shared) = &self.shared {
            let identifiers = self.identifier_keys();
            let batches = shared.listeners_batch([
                (&identifiers[..], exact),
                (&identifiers[..], any),
                (any, exact),
                (any, any),
            ]);
            let sources = [
                Source::Shared,
                Source::SharedWildcardEvent,
                Source::WildcardIdentifier,
                Source::FullyWildcard,
            ];
            for (source, entries) in sources.into_iter().zip(batches) {
                candidates.extend(entries.into_iter().map(|e| (source, e)));
            }
        }

        // Stable: entries of one source at one priority keep their order
        candidates.sort_by_key(|(source, entry)| (Reverse(entry.priority), *source));
        candidates.into_iter().map(|(_, e)| e.listener).collect()
    }
}

fn extend_unique<I, S>(current: &mut Vec<String>, identifiers: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for identifier in identifiers {
        let identifier = identifier.into();
        // The wildcard identifier is always consulted; listing it would double-count
        if identifier.is_empty() || identifier == WILDCARD || current.contains(&identifier) {
            continue;
        }
        current.push(identifier);
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: usize = self.read_local().values().map(PriorityRegistry::len).sum();
        f.debug_struct("EventDispatcher")
            .field("identifiers", &self.identifiers())
            .field("listeners", &listeners)
            .field("shared", &self.shared.is_some())
            .field("default_priority", &self.default_priority)
            .finish()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

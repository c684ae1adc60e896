// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared listener store
//!
//! Listeners keyed by `(identifier, event name)`, visible to every dispatcher
//! that advertises a matching identifier. Either axis may be the wildcard.

use crate::error::EventError;
use crate::key::Key;
use crate::listener::{Listener, ListenerHandle, DEFAULT_PRIORITY};
use crate::registry::{Entry, PriorityRegistry};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Cells = HashMap<Key, HashMap<Key, PriorityRegistry>>;

/// Store of listeners shared across dispatchers.
///
/// Cloning yields another handle onto the same store.
#[derive(Clone)]
pub struct SharedListeners {
    cells: Arc<RwLock<Cells>>,
}

impl SharedListeners {
    pub fn new() -> Self {
        Self {
            cells: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Cells> {
        self.cells.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cells> {
        self.cells.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Attach a listener at the default priority
    pub fn attach(
        &self,
        identifier: &str,
        event: &str,
        listener: Listener,
    ) -> Result<ListenerHandle, EventError> {
        self.attach_with_priority(identifier, event, listener, DEFAULT_PRIORITY)
    }

    pub fn attach_with_priority(
        &self,
        identifier: &str,
        event: &str,
        listener: Listener,
        priority: i32,
    ) -> Result<ListenerHandle, EventError> {
        let identifier = Key::identifier(identifier)?;
        let event = Key::event(event)?;

        let mut cells = self.write();
        let registry = cells
            .entry(identifier.clone())
            .or_default()
            .entry(event.clone())
            .or_default();
        let sequence = registry.insert(listener, priority);

        tracing::trace!(%identifier, %event, priority, sequence, "attached shared listener");

        Ok(ListenerHandle {
            registry: registry.id(),
            identifier: Some(identifier),
            event,
            sequence,
        })
    }

    /// Remove the listener behind a handle. Unknown or foreign handles are a no-op.
    pub fn detach(&self, handle: &ListenerHandle) -> bool {
        let Some(identifier) = handle.identifier.as_ref() else {
            return false;
        };

        let mut cells = self.write();
        let Some(events) = cells.get_mut(identifier) else {
            return false;
        };
        let Some(registry) = events.get_mut(&handle.event) else {
            return false;
        };
        if registry.id() != handle.registry {
            tracing::trace!(
                %identifier,
                event = %handle.event,
                "ignoring handle from another registry"
            );
            return false;
        }

        let removed = registry.remove(handle.sequence);
        if registry.is_empty() {
            events.remove(&handle.event);
        }
        if events.is_empty() {
            cells.remove(identifier);
        }
        if removed {
            tracing::trace!(%identifier, event = %handle.event, "detached shared listener");
        }
        removed
    }

    /// Remove a listener by reference.
    ///
    /// `None` on either axis means every identifier / every event name.
    /// Returns the number of entries removed.
    pub fn detach_listener(
        &self,
        listener: &Listener,
        identifier: Option<&str>,
        event: Option<&str>,
    ) -> usize {
        let mut cells = self.write();
        let mut removed = 0;

        for (id, events) in cells.iter_mut() {
            if identifier.is_some_and(|wanted| wanted != id.as_str()) {
                continue;
            }
            for (name, registry) in events.iter_mut() {
                if event.is_some_and(|wanted| wanted != name.as_str()) {
                    continue;
                }
                removed += registry.remove_listener(listener);
            }
            events.retain(|_, registry| !registry.is_empty());
        }
        cells.retain(|_, events| !events.is_empty());
        removed
    }

    /// Drop one cell, or every cell of the identifier when `event` is `None`
    pub fn clear_listeners(&self, identifier: &str, event: Option<&str>) {
        let Ok(identifier) = Key::identifier(identifier) else {
            return;
        };
        let mut cells = self.write();

        match event {
            None => {
                cells.remove(&identifier);
            }
            Some(event) => {
                let Ok(event) = Key::event(event) else {
                    return;
                };
                if let Some(events) = cells.get_mut(&identifier) {
                    events.remove(&event);
                    if events.is_empty() {
                        cells.remove(&identifier);
                    }
                }
            }
        }
        tracing::trace!(%identifier, ?event, "cleared shared listeners");
    }

    /// Snapshot the listeners for every `(identifier, event)` pair.
    ///
    /// Cells are concatenated identifier-major in the order given, each in
    /// priority order. Missing cells contribute nothing.
    pub fn listeners(&self, identifiers: &[Key], events: &[Key]) -> Vec<Entry> {
        collect(&self.read(), identifiers, events)
    }

    /// Run several [`listeners`](Self::listeners) lookups against one view of the store
    pub(crate) fn listeners_batch<const N: usize>(
        &self,
        lookups: [(&[Key], &[Key]); N],
    ) -> [Vec<Entry>; N] {
        let cells = self.read();
        lookups.map(|(ids, events)| collect(&cells, ids, events))
    }

    /// Identifiers that currently hold at least one listener, sorted
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().map(|k| k.to_string()).collect();
        ids.sort();
        ids
    }

    /// Event names with listeners under an identifier, sorted
    pub fn event_names(&self, identifier: &str) -> Vec<String> {
        let Ok(identifier) = Key::identifier(identifier) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .read()
            .get(&identifier)
            .map(|events| events.keys().map(|k| k.to_string()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn listener_count(&self, identifier: &str, event: &str) -> usize {
        let (Ok(identifier), Ok(event)) = (Key::identifier(identifier), Key::event(event)) else {
            return 0;
        };
        self.read()
            .get(&identifier)
            .and_then(|events| events.get(&event))
            .map_or(0, PriorityRegistry::len)
    }
}

fn collect(cells: &Cells, identifiers: &[Key], events: &[Key]) -> Vec<Entry> {
    let mut entries = Vec::new();
    for identifier in identifiers {
        let Some(by_event) = cells.get(identifier) else {
            continue;
        };
        for event in events {
            if let Some(registry) = by_event.get(event) {
                entries.extend(registry.snapshot());
            }
        }
    }
    entries
}

impl Default for SharedListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.read();
        let listeners: usize = cells
            .values()
            .flat_map(|events| events.values())
            .map(PriorityRegistry::len)
            .sum();
        f.debug_struct("SharedListeners")
            .field("identifiers", &cells.len())
            .field("listeners", &listeners)
            .finish()
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener aggregates: attach a batch of listeners, detach them in one call

use crate::dispatcher::EventDispatcher;
use crate::error::EventError;
use crate::listener::{Listener, ListenerHandle};

/// A component that registers several listeners on a dispatcher at once
pub trait ListenerAggregate {
    fn attach(&mut self, events: &EventDispatcher, priority: i32) -> Result<(), EventError>;

    fn detach(&mut self, events: &EventDispatcher);
}

/// Handles recorded while attaching, for detaching them together later
#[derive(Clone, Debug, Default)]
pub struct ListenerHandles {
    handles: Vec<ListenerHandle>,
}

impl ListenerHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach through `events` and remember the handle
    pub fn attach(
        &mut self,
        events: &EventDispatcher,
        event: &str,
        listener: Listener,
        priority: i32,
    ) -> Result<(), EventError> {
        let handle = events.attach_with_priority(event, listener, priority)?;
        self.handles.push(handle);
        Ok(())
    }

    /// Detach every recorded handle and forget them, returning how many were still attached
    pub fn detach_all(&mut self, events: &EventDispatcher) -> usize {
        self.handles
            .drain(..)
            .filter(|handle| events.detach(handle))
            .count()
    }

    pub fn handles(&self) -> &[ListenerHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;

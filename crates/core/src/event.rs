// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event payload passed to every listener during a trigger

use serde_json::{Map, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Parameter bag carried by an event
pub type Params = Map<String, Value>;

/// Opaque reference to whatever object an event was triggered on
pub type Target = Arc<dyn Any + Send + Sync>;

/// The mutable record delivered to listeners.
///
/// The dispatcher only reads the name and the propagation flag. Target and
/// params are passed through untouched.
#[derive(Clone, Default)]
pub struct Event {
    name: String,
    target: Option<Target>,
    params: Params,
    stopped: bool,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Downcast the target to a concrete type
    pub fn target_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.target.as_deref()?.downcast_ref::<T>()
    }

    pub fn set_target(&mut self, target: Option<Target>) {
        self.target = target;
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn param_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.params.get_mut(key)
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    /// Halt (or resume) invocation of the remaining listeners
    pub fn stop_propagation(&mut self, stop: bool) {
        self.stopped = stop;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_target", &self.target.is_some())
            .field("params", &self.params)
            .field("stopped", &self.stopped)
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

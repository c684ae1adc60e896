// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Values returned by the listeners of one trigger

use serde_json::Value;

/// Responses collected in invocation order.
///
/// Listeners that return nothing contribute `Value::Null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Responses {
    values: Vec<Value>,
    stopped: bool,
}

impl Responses {
    pub(crate) fn push(&mut self, value: Option<Value>) {
        self.values.push(value.unwrap_or(Value::Null));
    }

    pub(crate) fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    /// Whether dispatch halted before every listener ran
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

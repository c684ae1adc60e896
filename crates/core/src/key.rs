// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event name and identifier keys
//!
//! Both axes of the listener tables use the same reserved token, `*`, to mean
//! "any". Internally the token is never stored as a string; it is parsed into
//! [`Key::Wildcard`] at the API boundary.

use crate::error::EventError;
use std::fmt;

/// Reserved token matching every event name or every identifier
pub const WILDCARD: &str = "*";

/// A table key on either the event-name or the identifier axis
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Wildcard,
    Literal(String),
}

impl Key {
    /// Parse an event name. `*` becomes the wildcard; empty names are rejected.
    pub fn event(name: &str) -> Result<Self, EventError> {
        Self::parse(name).ok_or(EventError::InvalidEventName)
    }

    /// Parse an identifier. `*` becomes the wildcard; empty identifiers are rejected.
    pub fn identifier(identifier: &str) -> Result<Self, EventError> {
        Self::parse(identifier).ok_or(EventError::InvalidIdentifier)
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            WILDCARD => Some(Key::Wildcard),
            literal => Some(Key::Literal(literal.to_string())),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Key::Wildcard)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Key::Wildcard => WILDCARD,
            Key::Literal(s) => s,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;

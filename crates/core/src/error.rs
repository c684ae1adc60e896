// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for listener registration and dispatch

use thiserror::Error;

/// Errors raised by the dispatcher and the shared listener store
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event name must not be empty")]
    InvalidEventName,
    #[error("identifier must not be empty")]
    InvalidIdentifier,
    #[error("listener for '{event}' failed: {source}")]
    ListenerFailed {
        event: String,
        #[source]
        source: ListenerError,
    },
}

/// Error returned by a listener to abort the rest of a trigger
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        ListenerError::Message(message.into())
    }
}

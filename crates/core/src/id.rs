// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of the registry cells that issue listener handles

use std::fmt;
use uuid::Uuid;

/// Random identity of one priority registry.
///
/// Stamped into every handle so a handle can only detach from the registry
/// that issued it, even after that registry was cleared and its cell reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistryId(Uuid);

impl RegistryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Priority-ordered listener table for a single event cell

use crate::id::RegistryId;
use crate::listener::Listener;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// A listener together with its ordering data
#[derive(Clone, Debug)]
pub struct Entry {
    pub(crate) listener: Listener,
    pub(crate) priority: i32,
    pub(crate) sequence: u64,
}

impl Entry {
    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

/// Listeners bucketed by priority.
///
/// Iteration runs from the highest priority to the lowest; within a bucket,
/// entries keep insertion order. Entries are never reordered once inserted.
#[derive(Debug, Default)]
pub struct PriorityRegistry {
    id: RegistryId,
    buckets: BTreeMap<Reverse<i32>, Vec<Entry>>,
    /// sequence -> priority, so removal by handle finds its bucket directly
    index: HashMap<u64, i32>,
    next_sequence: u64,
}

impl PriorityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// Append a listener to the tail of its priority bucket, returning its sequence
    pub fn insert(&mut self, listener: Listener, priority: i32) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.buckets
            .entry(Reverse(priority))
            .or_default()
            .push(Entry {
                listener,
                priority,
                sequence,
            });
        self.index.insert(sequence, priority);
        sequence
    }

    /// Remove the entry with the given sequence. Returns false if it is already gone.
    pub fn remove(&mut self, sequence: u64) -> bool {
        let Some(priority) = self.index.remove(&sequence) else {
            return false;
        };
        let key = Reverse(priority);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        // Buckets are append-only, so sequences within one are ascending
        if let Ok(pos) = bucket.binary_search_by_key(&sequence, |e| e.sequence) {
            bucket.remove(pos);
        }
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        true
    }

    /// Remove every entry holding this listener, returning how many were removed
    pub fn remove_listener(&mut self, listener: &Listener) -> usize {
        let mut removed = Vec::new();
        for bucket in self.buckets.values_mut() {
            bucket.retain(|e| {
                let keep = !e.listener.same(listener);
                if !keep {
                    removed.push(e.sequence);
                }
                keep
            });
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
        for sequence in &removed {
            self.index.remove(sequence);
        }
        removed.len()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, sequence: u64) -> bool {
        self.index.contains_key(&sequence)
    }

    /// Entries from highest to lowest priority, FIFO within a priority
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.values().flatten()
    }

    /// Owned copy of [`iter`](Self::iter), unaffected by later changes to the registry
    pub fn snapshot(&self) -> Vec<Entry> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

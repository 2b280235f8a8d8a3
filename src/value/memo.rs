//! Memoization for pure functions (`shape`, range expansion).

use std::collections::HashMap;

use super::{join_values, Value};

/// Cache key: function family plus the joined, fully evaluated arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    family: &'static str,
    args: String,
}

impl MemoKey {
    /// Build a key for `family` called with `args`.
    pub fn new(family: &'static str, args: &[Value]) -> Self {
        Self {
            family,
            args: join_values(args, "-"),
        }
    }
}

/// Append-only cache of pure function results.
///
/// Entries are never evicted. With a capacity set, the cache stops accepting
/// new entries once full and callers simply recompute, which returns the same
/// result.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: HashMap<MemoKey, Vec<Value>>,
    capacity: Option<usize>,
}

impl MemoCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that holds at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    /// Look up a cached result.
    pub fn get(&self, key: &MemoKey) -> Option<&[Value]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Return the cached result for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        key: MemoKey,
        compute: impl FnOnce() -> Vec<Value>,
    ) -> Vec<Value> {
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }

        let result = compute();
        if self.capacity.is_some_and(|cap| self.entries.len() >= cap) {
            tracing::debug!(family = key.family, "memo cache full, not storing");
        } else {
            self.entries.insert(key, result.clone());
        }
        result
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

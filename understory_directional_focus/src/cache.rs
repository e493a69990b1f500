// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Negative result cache for directional queries.

use core::hash::Hash;

use hashbrown::HashSet;

use crate::types::{Direction, OptionsFingerprint, QueryOptions};

/// Identity of a directional query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey<K> {
    direction: Direction,
    element: K,
    engaged: Option<K>,
    options: OptionsFingerprint<K>,
}

impl<K: Copy> QueryKey<K> {
    /// Build the key for a query from `element` in `direction`.
    pub fn new(
        direction: Direction,
        element: K,
        engaged: Option<K>,
        options: &QueryOptions<K>,
    ) -> Self {
        Self {
            direction,
            element,
            engaged,
            options: options.fingerprint(),
        }
    }
}

/// Set of queries known to yield no result.
///
/// Element handles are only meaningful for the tree state they were taken
/// from, so the cache is never partially invalidated: hosts call
/// [`FailureCache::clear`] after any layout pass or change to the tree's
/// structure, visibility, or focusability.
#[derive(Clone, Debug)]
pub struct FailureCache<K> {
    entries: HashSet<QueryKey<K>>,
}

impl<K> Default for FailureCache<K> {
    fn default() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> FailureCache<K> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` previously failed.
    pub fn contains(&self, key: &QueryKey<K>) -> bool {
        self.entries.contains(key)
    }

    /// Record `key` as failed.
    pub fn insert(&mut self, key: QueryKey<K>) {
        self.entries.insert(key);
    }

    /// Forget every recorded failure.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no failure is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

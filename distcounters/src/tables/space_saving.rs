// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Space-Saving counter table.

use std::hash::Hash;

use crate::estimator::Estimator;
use crate::tables::table::CounterTable;

/// Fixed-capacity counter table with minimum-replacement eviction.
///
/// An unseen key arriving at a full table replaces the minimum entry and
/// inherits its value plus the new weight, so estimates never undercount a
/// tracked key. Tie breaks on the minimum are first-come.
///
/// # Example
///
/// ```
/// # use distcounters::tables::SpaceSaving;
/// let mut table = SpaceSaving::new(2);
/// table.update("apple", 4);
/// table.update("banana", 2);
/// table.update("cherry", 1);
/// // cherry displaced the minimum (banana) and inherited its count
/// assert_eq!(table.query(&"cherry"), 3);
/// assert_eq!(table.query(&"banana"), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SpaceSaving<K> {
    capacity: usize,
    counters: CounterTable<K>,
}

impl<K: Eq + Hash + Clone> SpaceSaving<K> {
    /// Creates a table with `capacity` counters.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            capacity,
            counters: CounterTable::new(),
        }
    }

    /// Number of counters.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of keys currently tracked.
    pub fn num_tracked(&self) -> usize {
        self.counters.len()
    }

    /// Folds one observation of `key` into the table.
    pub fn update(&mut self, key: K, weight: u64) {
        if weight == 0 {
            return;
        }
        if self.counters.add_assign(&key, weight) {
            return;
        }
        if self.counters.len() < self.capacity {
            self.counters.insert(key, weight);
        } else {
            let (slot, min) = self.counters.min_entry().expect("table is non-empty");
            self.counters.replace(slot, key, min + weight);
        }
    }

    /// Returns the stored counter for `key`, or `0` if untracked.
    pub fn query(&self, key: &K) -> u64 {
        self.counters.get(key).unwrap_or(0)
    }
}

impl<K: Eq + Hash + Clone> Estimator for SpaceSaving<K> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        SpaceSaving::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        SpaceSaving::query(self, key)
    }
}

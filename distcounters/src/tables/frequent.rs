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

//! Misra-Gries counter table with a shared decrement offset.

use std::collections::HashMap;
use std::hash::Hash;

use crate::estimator::Estimator;

/// Frequent-items table in the Misra-Gries family.
///
/// Instead of decrementing every counter when the table overflows, a single
/// shared `decrements` offset rises and entries whose stored value falls to
/// the offset are purged. Estimates subtract the offset (saturating at 0),
/// so a key admitted late reads as 0 until it accumulates past the offset.
/// Fully deterministic.
#[derive(Debug, Clone)]
pub struct FrequentCounters<K> {
    capacity: usize,
    decrements: u64,
    counters: HashMap<K, u64>,
}

impl<K: Eq + Hash> FrequentCounters<K> {
    /// Creates a table with `capacity` counters.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            capacity,
            decrements: 0,
            counters: HashMap::with_capacity(capacity),
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

    /// Total decrement offset applied to every estimate.
    pub fn decrements(&self) -> u64 {
        self.decrements
    }

    /// Folds one observation of `key` into the table.
    pub fn update(&mut self, key: K, weight: u64) {
        if weight == 0 {
            return;
        }
        if let Some(counter) = self.counters.get_mut(&key) {
            *counter += weight;
            return;
        }
        if self.counters.len() >= self.capacity {
            self.decrements += 1;
            let cutoff = self.decrements;
            self.counters.retain(|_, value| *value > cutoff);
        }
        if self.counters.len() < self.capacity {
            self.counters.insert(key, weight);
        }
    }

    /// Returns the stored counter minus the decrement offset, or `0`.
    pub fn query(&self, key: &K) -> u64 {
        self.counters
            .get(key)
            .map(|value| value.saturating_sub(self.decrements))
            .unwrap_or(0)
    }
}

impl<K: Eq + Hash> Estimator for FrequentCounters<K> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        FrequentCounters::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        FrequentCounters::query(self, key)
    }
}

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

//! Counter table with randomized admission.

use std::hash::Hash;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimator::Estimator;
use crate::tables::table::CounterTable;

/// Space-Saving variant that admits new keys probabilistically.
///
/// At a full table an unseen key replaces the minimum entry only with
/// probability `1 / (min + 1)`, so entries that have accumulated weight are
/// hard to displace and one-off keys usually bounce. An admitted key
/// inherits the minimum plus its own weight.
#[derive(Debug, Clone)]
pub struct RandomAdmission<K, R = StdRng> {
    capacity: usize,
    counters: CounterTable<K>,
    rng: R,
}

impl<K: Eq + Hash + Clone> RandomAdmission<K, StdRng> {
    /// Creates a table with `capacity` counters, randomized from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, R: Rng> RandomAdmission<K, R> {
    /// Creates a table with an explicit random source.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            capacity,
            counters: CounterTable::new(),
            rng,
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
            return;
        }
        let (slot, min) = self.counters.min_entry().expect("table is non-empty");
        let threshold = 1.0 / (min + 1) as f64;
        if self.rng.random::<f64>() < threshold {
            self.counters.replace(slot, key, min + weight);
        }
    }

    /// Returns the stored counter for `key`, or `0` if untracked.
    pub fn query(&self, key: &K) -> u64 {
        self.counters.get(key).unwrap_or(0)
    }
}

impl<K: Eq + Hash + Clone, R: Rng> Estimator for RandomAdmission<K, R> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        RandomAdmission::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        RandomAdmission::query(self, key)
    }
}

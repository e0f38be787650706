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

//! Counter table fed by a ladder of key-only tiers.

use std::hash::Hash;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimator::Estimator;
use crate::tables::CounterTable;

/// One key-only tier of the ladder.
#[derive(Debug, Clone)]
struct RangeTier<K> {
    capacity: usize,
    keys: Vec<K>,
}

impl<K: Eq + Clone> RangeTier<K> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: Vec::with_capacity(capacity),
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    fn remove(&mut self, key: &K) {
        if let Some(position) = self.keys.iter().position(|tracked| tracked == key) {
            self.keys.remove(position);
        }
    }

    /// Inserts `key`, replacing a random occupant when full. Returns false
    /// if the key was already present.
    fn insert<R: Rng>(&mut self, key: K, rng: &mut R) -> bool {
        if self.contains(&key) {
            return false;
        }
        if self.keys.len() < self.capacity {
            self.keys.push(key);
        } else {
            let slot = rng.random_range(0..self.capacity);
            self.keys[slot] = key;
        }
        true
    }
}

/// Dedicated counters fed by a ladder of capacity-bounded key tiers.
///
/// Unseen keys enter the largest (lowest) tier; a repeated hit promotes a
/// key one tier up, replacing a random occupant when the upper tier is
/// full. A hit on the smallest tier promotes into the dedicated counters
/// with probability `1 / (min + 1)`, inheriting the minimum counter plus
/// the update weight. Tier members carry no counter and estimate as 0.
#[derive(Debug, Clone)]
pub struct RangeCounters<K, R = StdRng> {
    capacity: usize,
    counters: CounterTable<K>,
    tiers: Vec<RangeTier<K>>,
    rng: R,
}

impl<K: Eq + Hash + Clone> RangeCounters<K, StdRng> {
    /// Creates a table with `capacity` dedicated counters and no tiers,
    /// randomized from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, R: Rng> RangeCounters<K, R> {
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
            tiers: Vec::new(),
            rng,
        }
    }

    /// Appends a tier to the bottom of the ladder.
    ///
    /// Without any tier, new keys are dropped once the counters are full.
    ///
    /// # Panics
    ///
    /// Panics unless tier sizes are strictly increasing.
    pub fn add_tier(&mut self, size: usize) {
        assert!(size > 0, "tier size must be at least 1");
        assert!(
            self.tiers.last().is_none_or(|tier| tier.capacity < size),
            "tier sizes must be strictly increasing"
        );
        self.tiers.push(RangeTier::new(size));
    }

    /// Number of dedicated counters.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of keys holding a dedicated counter.
    pub fn num_tracked(&self) -> usize {
        self.counters.len()
    }

    /// Number of tiers in the ladder.
    pub fn num_tiers(&self) -> usize {
        self.tiers.len()
    }

    /// Folds one observation of `key` into the structure.
    pub fn update(&mut self, key: K, weight: u64) {
        if weight == 0 {
            return;
        }
        if self.counters.add_assign(&key, weight) {
            return;
        }
        for tier in 0..self.tiers.len() {
            if self.tiers[tier].contains(&key) {
                self.promote(tier, key, weight);
                return;
            }
        }
        if self.counters.len() < self.capacity {
            self.counters.insert(key, weight);
        } else if let Some(lowest) = self.tiers.last_mut() {
            lowest.insert(key, &mut self.rng);
        }
    }

    /// Promotes a key one step up from the given tier.
    fn promote(&mut self, tier: usize, key: K, weight: u64) {
        if tier > 0 {
            let (upper, lower) = self.tiers.split_at_mut(tier);
            if upper[tier - 1].insert(key.clone(), &mut self.rng) {
                lower[0].remove(&key);
            }
        } else {
            let (slot, min) = self.counters.min_entry().expect("counters are non-empty");
            let threshold = 1.0 / (min + 1) as f64;
            if self.rng.random::<f64>() < threshold {
                self.counters.replace(slot, key.clone(), min + weight);
                self.tiers[0].remove(&key);
            }
        }
    }

    /// Returns the dedicated counter for `key`, or `0`.
    pub fn query(&self, key: &K) -> u64 {
        self.counters.get(key).unwrap_or(0)
    }
}

impl<K: Eq + Hash + Clone, R: Rng> Estimator for RangeCounters<K, R> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        RangeCounters::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        RangeCounters::query(self, key)
    }
}

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

//! Two-tier table with an averaged tail bucket.

use std::hash::Hash;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimator::Estimator;
use crate::tables::CounterTable;

const DEFAULT_TAIL_FRACTION: f64 = 0.1;

/// Counter table backed by an unordered tail bucket.
///
/// Most of the capacity goes to dedicated counters; the rest becomes a tail
/// of bare keys sharing one running total. Tail members estimate as the
/// tail average, and move between tiers probabilistically: a tail key
/// promotes over the minimum dedicated counter with probability weighted by
/// how far the tail average lags that counter, and an unseen key displaces
/// a random tail slot with probability `weight / (tail_avg + 1)`.
///
/// Tail slots store no counter, so a tail slot costs half a counter slot
/// and the tail gets twice its share of the capacity in slots.
#[derive(Debug, Clone)]
pub struct MeanTail<K, R = StdRng> {
    counter_capacity: usize,
    tail_capacity: usize,
    counters: CounterTable<K>,
    tail: Vec<K>,
    tail_total: f64,
    rng: R,
}

impl<K: Eq + Hash + Clone> MeanTail<K, StdRng> {
    /// Creates a table giving one tenth of `capacity` to the tail,
    /// randomized from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if the split leaves either tier empty.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, DEFAULT_TAIL_FRACTION, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, R: Rng> MeanTail<K, R> {
    /// Creates a table with an explicit tail fraction and random source.
    ///
    /// # Panics
    ///
    /// Panics if the split leaves either tier empty.
    pub fn with_rng(capacity: usize, tail_fraction: f64, rng: R) -> Self {
        let counter_capacity = (capacity as f64 * (1.0 - tail_fraction)) as usize;
        let tail_capacity = (capacity as f64 * tail_fraction * 2.0) as usize;
        assert!(
            counter_capacity >= 1 && tail_capacity >= 1,
            "capacity too small for the configured tail fraction"
        );
        Self {
            counter_capacity,
            tail_capacity,
            counters: CounterTable::new(),
            tail: Vec::with_capacity(tail_capacity),
            tail_total: 0.0,
            rng,
        }
    }

    /// Number of dedicated counters.
    pub fn counter_capacity(&self) -> usize {
        self.counter_capacity
    }

    /// Number of tail slots.
    pub fn tail_capacity(&self) -> usize {
        self.tail_capacity
    }

    /// Number of keys holding a dedicated counter.
    pub fn num_tracked(&self) -> usize {
        self.counters.len()
    }

    /// Number of keys in the tail bucket.
    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    fn tail_average(&self) -> f64 {
        debug_assert!(!self.tail.is_empty(), "tail average of an empty tail");
        self.tail_total / self.tail.len() as f64
    }

    /// Folds one observation of `key` into the table.
    pub fn update(&mut self, key: K, weight: u64) {
        if weight == 0 {
            return;
        }
        if self.counters.add_assign(&key, weight) {
            return;
        }
        if let Some(position) = self.tail.iter().position(|tracked| *tracked == key) {
            self.promote_to_counters(position, key, weight);
            return;
        }
        if self.counters.len() < self.counter_capacity {
            self.counters.insert(key, weight);
        } else if self.tail.len() < self.tail_capacity {
            self.tail_total += weight as f64;
            self.tail.push(key);
        } else {
            self.promote_to_tail(key, weight);
        }
    }

    /// Attempts to swap the tail key at `position` with the minimum
    /// dedicated counter.
    ///
    /// The promotion chance shrinks as the minimum counter pulls ahead of
    /// the tail average; a rejected attempt still credits the weight to the
    /// tail total.
    fn promote_to_counters(&mut self, position: usize, key: K, weight: u64) {
        let (slot, min) = self.counters.min_entry().expect("counters are non-empty");
        let average = self.tail_average();
        let divisor = (1.0 + min as f64 - average).max(1.0);
        let threshold = weight as f64 / divisor;
        if self.rng.random::<f64>() < threshold {
            let demoted = self.counters.key_at(slot).clone();
            let promoted_value = (average + weight as f64).round().max(0.0) as u64;
            self.counters.replace(slot, key, promoted_value);
            self.tail.remove(position);
            self.tail.push(demoted);
            self.tail_total += min as f64 - average;
        } else {
            self.tail_total += weight as f64;
        }
    }

    /// Attempts to claim a random tail slot for an unseen key.
    fn promote_to_tail(&mut self, key: K, weight: u64) {
        let average = self.tail_average();
        let threshold = weight as f64 / (average + 1.0);
        if self.rng.random::<f64>() < threshold {
            self.tail_total += weight as f64;
            let slot = self.rng.random_range(0..self.tail.len());
            self.tail[slot] = key;
        }
    }

    /// Returns the dedicated counter, the rounded tail average for tail
    /// members, or `0`.
    pub fn query(&self, key: &K) -> u64 {
        if let Some(value) = self.counters.get(key) {
            return value;
        }
        if self.tail.contains(key) {
            return (self.tail_average().round().max(0.0) as u64).max(1);
        }
        0
    }
}

impl<K: Eq + Hash + Clone, R: Rng> Estimator for MeanTail<K, R> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        MeanTail::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        MeanTail::query(self, key)
    }
}

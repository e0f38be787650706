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

//! Space-Saving with a candidate admission window.

use std::hash::Hash;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimator::Estimator;
use crate::tables::table::CounterTable;

/// Split counter/candidate Space-Saving table.
///
/// New keys first accumulate in a bounded candidate window instead of
/// displacing a dedicated counter directly. When the window overflows, the
/// largest candidate is promoted: it inherits the smallest dedicated
/// counter, and the rest of the window is thinned, each candidate surviving
/// with probability proportional to its share of the window total. The
/// promoted key leaves the window; the key that triggered the overflow is
/// dropped.
///
/// Only dedicated counters answer queries; window members read as 0.
#[derive(Debug, Clone)]
pub struct EffectiveSpaceSaving<K, R = StdRng> {
    counter_capacity: usize,
    candidate_capacity: usize,
    counters: CounterTable<K>,
    candidates: CounterTable<K>,
    rng: R,
}

impl<K: Eq + Hash + Clone> EffectiveSpaceSaving<K, StdRng> {
    /// Creates a table splitting `capacity` between dedicated counters and
    /// the candidate window, randomized from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if the split leaves either side empty.
    pub fn new(capacity: usize, candidate_fraction: f64) -> Self {
        Self::with_rng(capacity, candidate_fraction, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, R: Rng> EffectiveSpaceSaving<K, R> {
    /// Creates a table with an explicit random source.
    ///
    /// # Panics
    ///
    /// Panics if the split leaves either side empty.
    pub fn with_rng(capacity: usize, candidate_fraction: f64, rng: R) -> Self {
        let counter_capacity = (capacity as f64 * (1.0 - candidate_fraction)) as usize;
        let candidate_capacity = (capacity as f64 * candidate_fraction) as usize;
        assert!(
            counter_capacity >= 1 && candidate_capacity >= 1,
            "capacity too small for the candidate split"
        );
        Self {
            counter_capacity,
            candidate_capacity,
            counters: CounterTable::new(),
            candidates: CounterTable::new(),
            rng,
        }
    }

    /// Number of dedicated counters.
    pub fn counter_capacity(&self) -> usize {
        self.counter_capacity
    }

    /// Number of candidate window slots.
    pub fn candidate_capacity(&self) -> usize {
        self.candidate_capacity
    }

    /// Number of keys holding a dedicated counter.
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
        if self.counters.len() < self.counter_capacity {
            self.counters.insert(key, weight);
            return;
        }
        if self.candidates.add_assign(&key, weight) {
            return;
        }
        if self.candidates.len() < self.candidate_capacity {
            self.candidates.insert(key, weight);
            return;
        }
        self.promote_largest_candidate();
    }

    /// Promotes the largest candidate into the counters and thins the rest
    /// of the window proportionally to their share of its total.
    fn promote_largest_candidate(&mut self) {
        let window_total = self.candidates.sum();
        let (candidate_slot, largest) = self.candidates.max_entry().expect("window is non-empty");
        let promoted = self.candidates.key_at(candidate_slot).clone();
        let (counter_slot, min) = self.counters.min_entry().expect("counters are non-empty");
        self.counters.replace(counter_slot, promoted.clone(), largest + min);
        let rng = &mut self.rng;
        self.candidates.retain(|key, value| {
            *key != promoted && rng.random::<f64>() <= value as f64 / window_total as f64
        });
    }

    /// Returns the dedicated counter for `key`, or `0`.
    pub fn query(&self, key: &K) -> u64 {
        self.counters.get(key).unwrap_or(0)
    }
}

impl<K: Eq + Hash + Clone, R: Rng> Estimator for EffectiveSpaceSaving<K, R> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        EffectiveSpaceSaving::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        EffectiveSpaceSaving::query(self, key)
    }
}

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

//! Count-Min sketch implementation.

use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

use xxhash_rust::xxh3::Xxh3;

use crate::estimator::Estimator;

const DEFAULT_SEED: u64 = 9001;
const ROW_SEED_STRIDE: u64 = 0x9e3779b97f4a7c15;

/// Count-Min sketch over `num_hashes` rows of `num_buckets` counters.
///
/// No keys are stored: each update adds its weight to one bucket per row,
/// chosen by a seeded hash, and the estimate is the minimum over the rows.
/// Estimates never undercount; the expected overcount is bounded by
/// [`relative_error`](CountMinSketch::relative_error) times the total
/// weight.
#[derive(Debug, Clone)]
pub struct CountMinSketch<K> {
    num_hashes: usize,
    num_buckets: usize,
    seed: u64,
    table: Vec<u64>,
    total_weight: u64,
    _key: PhantomData<K>,
}

impl<K: Hash> CountMinSketch<K> {
    /// Creates a sketch with the default seed.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` is zero or `num_buckets` is less than 3.
    pub fn new(num_hashes: usize, num_buckets: usize) -> Self {
        Self::with_seed(num_hashes, num_buckets, DEFAULT_SEED)
    }

    /// Creates a sketch with an explicit hash seed.
    ///
    /// Two sketches fed the same stream agree exactly iff they share
    /// dimensions and seed.
    ///
    /// # Panics
    ///
    /// Panics if `num_hashes` is zero or `num_buckets` is less than 3.
    pub fn with_seed(num_hashes: usize, num_buckets: usize, seed: u64) -> Self {
        assert!(num_hashes >= 1, "num_hashes must be at least 1");
        assert!(num_buckets >= 3, "num_buckets must be at least 3");
        Self {
            num_hashes,
            num_buckets,
            seed,
            table: vec![0; num_hashes * num_buckets],
            total_weight: 0,
            _key: PhantomData,
        }
    }

    /// Suggests the number of buckets for a target relative error.
    pub fn suggest_num_buckets(relative_error: f64) -> usize {
        assert!(relative_error > 0.0, "relative_error must be positive");
        (std::f64::consts::E / relative_error).ceil() as usize
    }

    /// Suggests the number of hash rows for a target confidence in `(0, 1)`.
    pub fn suggest_num_hashes(confidence: f64) -> usize {
        assert!(
            (0.0..1.0).contains(&confidence),
            "confidence must be in [0, 1)"
        );
        (1.0 / (1.0 - confidence)).ln().ceil() as usize
    }

    /// Number of hash rows.
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Number of buckets per row.
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// The hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns true if nothing has been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Total weight folded in since creation.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Expected overcount as a fraction of the total weight.
    pub fn relative_error(&self) -> f64 {
        std::f64::consts::E / self.num_buckets as f64
    }

    fn bucket(&self, key: &K, row: usize) -> usize {
        let row_seed = self.seed ^ (row as u64).wrapping_mul(ROW_SEED_STRIDE);
        let mut hasher = Xxh3::with_seed(row_seed);
        key.hash(&mut hasher);
        (hasher.finish() % self.num_buckets as u64) as usize
    }

    /// Folds one observation of `key` into every row.
    pub fn update(&mut self, key: &K, weight: u64) {
        if weight == 0 {
            return;
        }
        self.total_weight += weight;
        for row in 0..self.num_hashes {
            let bucket = self.bucket(key, row);
            self.table[row * self.num_buckets + bucket] += weight;
        }
    }

    /// Returns the minimum bucket value for `key` over all rows.
    pub fn query(&self, key: &K) -> u64 {
        let mut estimate = u64::MAX;
        for row in 0..self.num_hashes {
            let bucket = self.bucket(key, row);
            estimate = estimate.min(self.table[row * self.num_buckets + bucket]);
        }
        estimate
    }
}

impl<K: Hash> Estimator for CountMinSketch<K> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        CountMinSketch::update(self, &key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        CountMinSketch::query(self, key)
    }
}

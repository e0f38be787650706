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

//! Distribution-aware ranked counter implementations.

use std::fmt;
use std::hash::Hash;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::estimator::Estimator;
use crate::ranked::density::log_normal_mass;
use crate::ranked::slots::RankedSlots;
use crate::ranked::stats::LogRankStats;

/// Estimate substituted when the density evaluation is degenerate.
const FALLBACK_ESTIMATE: f64 = 1.0;

mod private {
    // Sealed trait to prevent external implementations of RankModel.
    pub trait Sealed {}
}

/// Rank-distribution model backing a [`RankedCounters`] instance.
///
/// The model folds observed `(rank, weight)` pairs into its state and maps a
/// rank index to an estimated count. Estimates are always finite and
/// non-negative; degenerate evaluations yield a fallback of `1`.
pub trait RankModel: private::Sealed {
    /// Folds `weight` units observed at `rank` into the model.
    fn observe(&mut self, rank: usize, weight: u64);

    /// Estimated count for the slot at `index`.
    fn estimate(&self, index: usize) -> f64;

    /// Total weight folded in since creation.
    fn total_weight(&self) -> u64;
}

fn sanitize(estimate: f64) -> f64 {
    if !estimate.is_finite() {
        FALLBACK_ESTIMATE
    } else {
        estimate.max(0.0)
    }
}

/// Rank model backed by a caller-supplied rank-to-probability function.
///
/// The function is evaluated at ranks `0..=capacity` and is assumed to be
/// monotonically non-increasing; this is not enforced. A function that
/// violates the assumption only suppresses swaps on the affected ranks.
#[derive(Clone)]
pub struct FixedDistribution<F> {
    probability: F,
    total: u64,
}

impl<F> fmt::Debug for FixedDistribution<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedDistribution")
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl<F> private::Sealed for FixedDistribution<F> {}

impl<F: Fn(usize) -> f64> RankModel for FixedDistribution<F> {
    fn observe(&mut self, _rank: usize, weight: u64) {
        self.total += weight;
    }

    fn estimate(&self, index: usize) -> f64 {
        sanitize((self.probability)(index) * self.total as f64)
    }

    fn total_weight(&self) -> u64 {
        self.total
    }
}

/// Rank model fitted online: a log-normal over ranks, parameterized by the
/// running mean and variance of `log(rank + 1)` samples.
#[derive(Debug, Clone, Default)]
pub struct FittedLogNormal {
    stats: LogRankStats,
}

impl private::Sealed for FittedLogNormal {}

impl RankModel for FittedLogNormal {
    fn observe(&mut self, rank: usize, weight: u64) {
        self.stats.observe(((rank + 1) as f64).ln(), weight);
    }

    fn estimate(&self, index: usize) -> f64 {
        let variance = self.stats.variance();
        if self.stats.count() < 2 || variance <= 0.0 || !variance.is_finite() {
            return FALLBACK_ESTIMATE;
        }
        let mu = self.stats.mean();
        let sigma = variance.sqrt();
        let lo = index as f64 + 0.5;
        let hi = index as f64 + 1.5;
        let mass = log_normal_mass(lo, hi, mu, sigma);
        sanitize(mass * self.stats.count() as f64)
    }

    fn total_weight(&self) -> u64 {
        self.stats.count()
    }
}

/// Ranked counter with a caller-supplied rank distribution.
///
/// See [`crate::ranked`] for an overview of the algorithm.
pub type DistCounters<K, F, R = StdRng> = RankedCounters<K, FixedDistribution<F>, R>;

/// Ranked counter that fits its rank distribution online.
///
/// See [`crate::ranked`] for an overview of the algorithm.
pub type AutoDistCounters<K, R = StdRng> = RankedCounters<K, FittedLogNormal, R>;

/// A frequency estimator that keeps a fixed array of keys approximately
/// sorted by frequency and infers each key's count from its rank under a
/// distribution model.
///
/// `capacity` ranked slots are tracked; one extra scratch slot holds a
/// newly-arrived candidate while it bubbles toward the ranked window. The
/// array is never fully sorted: each update nudges the touched key toward
/// its estimated correct rank through randomized adjacent swaps.
#[derive(Debug, Clone)]
pub struct RankedCounters<K, M, R = StdRng> {
    slots: RankedSlots<K>,
    model: M,
    rng: R,
}

impl<K: Eq + Hash + Clone, F: Fn(usize) -> f64> RankedCounters<K, FixedDistribution<F>, StdRng> {
    /// Creates a ranked counter over `capacity` slots with the supplied
    /// rank-to-probability function, randomized from OS entropy.
    ///
    /// The function must be defined for ranks `0..=capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, probability: F) -> Self {
        Self::with_rng(capacity, probability, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, F: Fn(usize) -> f64, R: Rng> RankedCounters<K, FixedDistribution<F>, R> {
    /// Creates a ranked counter with the supplied rank-to-probability
    /// function and an explicit random source.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_rng(capacity: usize, probability: F, rng: R) -> Self {
        Self::with_parts(
            capacity,
            FixedDistribution {
                probability,
                total: 0,
            },
            rng,
        )
    }
}

impl<K: Eq + Hash + Clone> RankedCounters<K, FittedLogNormal, StdRng> {
    /// Creates a self-fitting ranked counter over `capacity` slots,
    /// randomized from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }
}

impl<K: Eq + Hash + Clone, R: Rng> RankedCounters<K, FittedLogNormal, R> {
    /// Creates a self-fitting ranked counter with an explicit random source.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        Self::with_parts(capacity, FittedLogNormal::default(), rng)
    }
}

impl<K: Eq + Hash + Clone, M: RankModel, R: Rng> RankedCounters<K, M, R> {
    fn with_parts(capacity: usize, model: M, rng: R) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        Self {
            slots: RankedSlots::new(capacity),
            model,
            rng,
        }
    }

    /// Number of ranked slots.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of keys currently tracked.
    pub fn num_tracked(&self) -> usize {
        self.slots.num_tracked()
    }

    /// Returns true if no key is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.slots.num_tracked() == 0
    }

    /// Total weight folded in since creation.
    pub fn total_weight(&self) -> u64 {
        self.model.total_weight()
    }

    /// Returns the tracked keys in rank order, most frequent first.
    pub fn tracked_keys(&self) -> Vec<K> {
        self.slots.ranked_keys().cloned().collect()
    }

    /// Folds one observation of `key` into the structure.
    ///
    /// A tracked key has its weight folded into the distribution state at
    /// its current rank and is then nudged upward by the rebalance walk. An
    /// unseen key starts in the candidate slot and must displace ranked
    /// keys to survive; whichever key occupies the candidate slot once the
    /// walk stops is evicted.
    pub fn update(&mut self, key: K, weight: u64) {
        if weight == 0 {
            return;
        }
        match self.slots.rank_of(&key) {
            Some(rank) => {
                self.model.observe(rank, weight);
                if rank > 0 {
                    self.rebalance(rank, weight);
                }
            }
            None => {
                let candidate = self.slots.capacity();
                self.slots.place_candidate(key);
                self.model.observe(candidate, weight);
                self.rebalance(candidate, weight);
                self.slots.take_candidate();
            }
        }
    }

    /// Returns the rank-derived estimate for `key`, or `0` if untracked.
    ///
    /// The estimate reads the model one rank below the key's slot: the mass
    /// at rank 0 is interpreted as the mass between the first and second
    /// order statistic, and the offset keeps the estimate continuous across
    /// that boundary. Tracked keys always estimate at least `1`.
    pub fn query(&self, key: &K) -> u64 {
        match self.slots.rank_of(key) {
            Some(rank) => {
                let estimate = self.model.estimate(rank + 1);
                (estimate.round() as u64).max(1)
            }
            None => 0,
        }
    }

    /// Probability that the key at `index` swaps with its left neighbor
    /// given an update of `weight`.
    ///
    /// Promotion into an empty slot is certain. Otherwise the probability is
    /// `weight` over the estimated count gap, capped at one; a non-positive
    /// gap (including ties) never swaps.
    fn swap_probability(&self, index: usize, weight: u64) -> f64 {
        debug_assert!(index > 0, "rank 0 cannot swap upward");
        if !self.slots.is_occupied(index - 1) {
            return 1.0;
        }
        let current = self.model.estimate(index);
        let above = self.model.estimate(index - 1);
        let difference = above - current;
        if difference <= 0.0 {
            return 0.0;
        }
        (weight as f64 / difference).min(1.0)
    }

    /// Walks the key at `index` toward rank 0, drawing once per step and
    /// swapping while the draw falls below the swap probability.
    ///
    /// Stops at the first rejected swap or at rank 0, so the walk is bounded
    /// by the array length and costs expected O(1) swaps per update under
    /// well-behaved distributions.
    fn rebalance(&mut self, index: usize, weight: u64) {
        let mut curr = index;
        while curr > 0 {
            let probability = self.swap_probability(curr, weight);
            if self.rng.random::<f64>() >= probability {
                break;
            }
            self.slots.swap_with_left(curr);
            curr -= 1;
        }
    }
}

impl<K: Eq + Hash + Clone, M: RankModel, R: Rng> Estimator for RankedCounters<K, M, R> {
    type Key = K;

    fn update(&mut self, key: K, weight: u64) {
        RankedCounters::update(self, key, weight);
    }

    fn query(&self, key: &K) -> u64 {
        RankedCounters::query(self, key)
    }
}

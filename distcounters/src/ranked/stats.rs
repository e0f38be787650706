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

//! Single-pass running statistics over the log-rank signal.

/// Running mean and variance via Welford's online algorithm.
///
/// One sample is one weight unit; folding a weight of `w` at a value is
/// equivalent to `w` scalar updates with that value and uses the batched
/// (Chan et al.) combination so each fold is O(1).
#[derive(Debug, Clone, Default)]
pub(super) struct LogRankStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl LogRankStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `weight` observations of `value` into the statistics.
    pub fn observe(&mut self, value: f64, weight: u64) {
        if weight == 0 {
            return;
        }
        let w = weight as f64;
        let new_count = self.count + weight;
        let delta = value - self.mean;
        self.mean += delta * w / new_count as f64;
        self.m2 += delta * delta * w * self.count as f64 / new_count as f64;
        self.count = new_count;
    }

    /// Total number of weight units folded in.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance, or `0` with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

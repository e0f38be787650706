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

//! The shared update/query contract implemented by every estimator.

/// A fixed-memory streaming frequency estimator.
///
/// An estimator observes a stream of `(key, weight)` events through
/// [`update`](Estimator::update) and answers approximate cumulative-weight
/// queries through [`query`](Estimator::query). Implementations are bounded
/// in memory by a capacity fixed at construction; keys that do not earn a
/// tracked slot are answered with `0`.
///
/// Every implementation treats a weight of `0` as a no-op, and `query` never
/// mutates state. Variants are selected statically at the call site; there is
/// no runtime capability probing.
pub trait Estimator {
    /// The key type this estimator tracks.
    type Key;

    /// Folds one observation of `key` with the given weight into the
    /// estimator.
    ///
    /// Safe to call with a key never seen before or one already tracked.
    fn update(&mut self, key: Self::Key, weight: u64);

    /// Returns the current best estimate of the cumulative weight observed
    /// for `key`, or `0` if the key is not represented in any tracked
    /// structure.
    fn query(&self, key: &Self::Key) -> u64;
}

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

//! Distribution-aware ranked counters.
//!
//! # Overview
//!
//! Most counter-table estimators spend one integer per tracked key. The
//! ranked counters in this module spend only a *slot*: keys are kept in an
//! array ordered approximately by frequency, and a key's count is inferred
//! from its rank under a probability model of the key-frequency
//! distribution. For a tracked key at rank `r` the estimate is the total
//! observed weight times the mass the model assigns to rank `r + 1`; the
//! one-rank offset interprets the mass at rank 0 as the gap between the
//! first and second order statistic.
//!
//! Two variants share the mechanism:
//! * [`DistCounters`] takes the rank-to-probability function from the
//!   caller, for streams whose shape is known up front.
//! * [`AutoDistCounters`] fits a log-normal rank distribution online from
//!   the running mean and variance of `log(rank + 1)` over all updates,
//!   using Welford's single-pass method.
//!
//! The array is never sorted. Each update nudges the touched key toward
//! rank 0 through adjacent swaps, where each step succeeds with probability
//! `min(weight / gap, 1)` against the estimated count gap to the slot
//! above. Large weights can climb several ranks in one update; near-ties
//! move rarely, which keeps roughly equal keys from oscillating. A new key
//! starts in a scratch candidate slot past the ranked window and must
//! displace its way in; whichever key is left in the scratch slot after the
//! walk is evicted. The result is a self-organizing list in the spirit of
//! the classic move-ahead heuristics, with swap acceptance driven by the
//! distribution model instead of a fixed step size.
//!
//! The walk is bounded by the array length and costs expected O(1) swaps
//! per update under well-behaved distributions. Randomness comes from an
//! injected, seedable generator, so runs with equal seeds and equal input
//! are identical.
//!
//! # Background
//!
//! * Counter-table heavy hitters: "Efficient Computation of Frequent and
//!   Top-k Elements in Data Streams", Metwally, Agrawal, Abbadi, 2006.
//! * Self-organizing sequential search: McCabe, 1965; "On self-organizing
//!   sequential search heuristics", Rivest, 1976.
//! * Running variance: "Note on a method for calculating corrected sums of
//!   squares and products", Welford, 1962.
//!
//! # Examples
//!
//! Self-fitting counters need nothing but a capacity:
//!
//! ```
//! # use distcounters::ranked::AutoDistCounters;
//! let mut counters = AutoDistCounters::new(64);
//! for key in ["a", "b", "a", "c", "a"] {
//!     counters.update(key, 1);
//! }
//! assert!(counters.query(&"a") >= 1);
//! assert_eq!(counters.query(&"missing"), 0);
//! ```
//!
//! With a known distribution, supply the rank probabilities directly and
//! seed the random source for reproducible runs:
//!
//! ```
//! # use distcounters::ranked::DistCounters;
//! # use rand::SeedableRng;
//! # use rand::rngs::StdRng;
//! let zipf = |rank: usize| 0.6 / (rank + 1) as f64;
//! let mut counters = DistCounters::with_rng(16, zipf, StdRng::seed_from_u64(7));
//! for key in 0..100u32 {
//!     counters.update(key % 5, 1);
//! }
//! assert!(counters.num_tracked() <= 16);
//! ```

mod density;
mod sketch;
mod slots;
mod stats;

pub use self::sketch::AutoDistCounters;
pub use self::sketch::DistCounters;
pub use self::sketch::FittedLogNormal;
pub use self::sketch::FixedDistribution;
pub use self::sketch::RankModel;
pub use self::sketch::RankedCounters;

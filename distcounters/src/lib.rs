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

//! Fixed-memory streaming frequency estimators.
//!
//! Every estimator in this crate observes a stream of `(key, weight)`
//! events through the [`Estimator`](estimator::Estimator) contract and
//! answers approximate cumulative-weight queries using memory far smaller
//! than the number of distinct keys. Typical uses are cache-admission
//! policies, network heavy-hitter detection, and approximate top-K
//! tracking.
//!
//! The families:
//!
//! * [`ranked`]: distribution-aware ranked counters, which track keys in a
//!   frequency-ordered array and infer counts from rank under an assumed or
//!   online-fitted probability model. This is the centerpiece of the crate.
//! * [`tables`]: classic counter tables (Space-Saving and relatives)
//!   differing in admission and eviction rules.
//! * [`countmin`]: the keyless Count-Min sketch.
//! * [`tiered`]: estimators that split capacity between dedicated counters
//!   and cheaper probationary tiers.
//!
//! Estimators are single-writer and synchronous; callers needing multiple
//! producers must serialize access externally. Variants that draw random
//! numbers take a seedable generator at construction, so equal seeds and
//! equal input reproduce identical state.
//!
//! ```
//! # use distcounters::estimator::Estimator;
//! # use distcounters::ranked::AutoDistCounters;
//! # use distcounters::tables::SpaceSaving;
//! fn churn(estimator: &mut impl Estimator<Key = u32>) {
//!     for key in 0..1000 {
//!         estimator.update(key % 11, 1);
//!     }
//! }
//!
//! let mut ranked = AutoDistCounters::new(16);
//! let mut table = SpaceSaving::new(16);
//! churn(&mut ranked);
//! churn(&mut table);
//! assert!(ranked.query(&3) >= 1);
//! assert!(table.query(&3) >= 1);
//! ```

pub mod countmin;
pub mod estimator;
pub mod ranked;
pub mod tables;
pub mod tiered;

pub use crate::estimator::Estimator;

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

//! Multi-tier estimators.
//!
//! These variants split their capacity between dedicated counters and
//! cheaper low-resolution tiers, so borderline keys can prove themselves
//! before earning a counter:
//!
//! * [`MeanTail`] keeps one unordered tail bucket whose members share a
//!   running average; promotion in either direction is probabilistic,
//!   weighted by how the tail average compares to the minimum counter.
//! * [`RangeCounters`] keeps a ladder of key-only tiers with strictly
//!   increasing sizes; repeated hits walk a key up the ladder and finally
//!   into the counters.
//!
//! Both share the fixed-capacity estimator contract; randomness comes from
//! the generator injected at construction.

mod mean_tail;
mod range_counters;

pub use self::mean_tail::MeanTail;
pub use self::range_counters::RangeCounters;

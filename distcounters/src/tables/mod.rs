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

//! Counter-table estimators.
//!
//! # Overview
//!
//! These variants keep one explicit integer counter per tracked key and
//! differ only in their admission and eviction rules:
//!
//! * [`SpaceSaving`] always replaces the minimum entry, inheriting its
//!   value ("Efficient Computation of Frequent and Top-k Elements in Data
//!   Streams", Metwally, Agrawal, Abbadi, 2006).
//! * [`RandomAdmission`] replaces the minimum entry only with probability
//!   `1 / (min + 1)`, trading guaranteed admission for less churn under
//!   long-tailed streams.
//! * [`FrequentCounters`] is in the Misra-Gries lineage ("Finding repeated
//!   elements", Misra, Gries, 1982), with the repeated decrement expressed
//!   as one shared offset.
//! * [`EffectiveSpaceSaving`] batches new arrivals in a candidate window
//!   and promotes the window's largest key when it overflows.
//!
//! All variants share the fixed-capacity contract: tracked entries never
//! exceed the configured capacity, unseen keys query as 0, and a weight of
//! 0 is a no-op. Variants that draw random numbers take the generator at
//! construction.

mod effective;
mod frequent;
mod random_admission;
mod space_saving;
mod table;

pub(crate) use self::table::CounterTable;

pub use self::effective::EffectiveSpaceSaving;
pub use self::frequent::FrequentCounters;
pub use self::random_admission::RandomAdmission;
pub use self::space_saving::SpaceSaving;

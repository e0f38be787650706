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

use distcounters::tables::EffectiveSpaceSaving;
use distcounters::tables::FrequentCounters;
use distcounters::tables::RandomAdmission;
use distcounters::tables::SpaceSaving;
use googletest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[gtest]
fn space_saving_is_exact_under_capacity() {
    let mut table = SpaceSaving::new(4);
    table.update("a", 3);
    table.update("b", 1);
    table.update("a", 2);
    assert_that!(table.query(&"a"), eq(5));
    assert_that!(table.query(&"b"), eq(1));
    assert_that!(table.query(&"c"), eq(0));
    assert_that!(table.num_tracked(), eq(2));
}

#[gtest]
fn space_saving_eviction_inherits_minimum() {
    let mut table = SpaceSaving::new(2);
    table.update("a", 4);
    table.update("b", 2);
    table.update("c", 1);
    assert_that!(table.query(&"c"), eq(3));
    assert_that!(table.query(&"b"), eq(0));
    assert_that!(table.query(&"a"), eq(4));
    assert_that!(table.num_tracked(), eq(2));
}

#[gtest]
fn space_saving_never_exceeds_capacity() {
    let mut table = SpaceSaving::new(8);
    for key in 0..100u32 {
        table.update(key, 1 + u64::from(key % 3));
        assert_that!(table.num_tracked(), le(8));
    }
    assert_that!(table.num_tracked(), eq(8));
}

#[gtest]
fn space_saving_zero_weight_is_a_noop() {
    let mut table = SpaceSaving::new(2);
    table.update("a", 4);
    table.update("b", 2);
    table.update("c", 0);
    table.update("a", 0);
    assert_that!(table.query(&"a"), eq(4));
    assert_that!(table.query(&"b"), eq(2));
    assert_that!(table.query(&"c"), eq(0));
}

#[test]
#[should_panic(expected = "capacity must be at least 1")]
fn space_saving_zero_capacity_panics() {
    let _ = SpaceSaving::<u64>::new(0);
}

#[gtest]
fn random_admission_is_exact_under_capacity() {
    let mut table = RandomAdmission::with_rng(3, seeded(1));
    table.update("a", 2);
    table.update("b", 7);
    table.update("a", 1);
    assert_that!(table.query(&"a"), eq(3));
    assert_that!(table.query(&"b"), eq(7));
    assert_that!(table.query(&"z"), eq(0));
}

#[gtest]
fn random_admission_eventually_admits_a_persistent_key() {
    let mut table = RandomAdmission::with_rng(2, seeded(2));
    table.update("a", 5);
    table.update("b", 7);
    // each attempt passes with probability 1/(min+1); after 200 attempts the
    // key is admitted and inherits the first minimum ("a")
    for _ in 0..200 {
        table.update("c", 1);
    }
    assert_that!(table.query(&"c"), ge(6));
    assert_that!(table.query(&"a"), eq(0));
    assert_that!(table.query(&"b"), eq(7));
    assert_that!(table.num_tracked(), eq(2));
}

#[gtest]
fn random_admission_zero_weight_is_a_noop() {
    let mut table = RandomAdmission::with_rng(1, seeded(3));
    table.update("a", 2);
    table.update("b", 0);
    assert_that!(table.query(&"a"), eq(2));
    assert_that!(table.query(&"b"), eq(0));
    assert_that!(table.num_tracked(), eq(1));
}

#[gtest]
fn frequent_counters_are_exact_under_capacity() {
    let mut table = FrequentCounters::new(3);
    table.update("a", 5);
    table.update("b", 2);
    table.update("a", 1);
    assert_that!(table.query(&"a"), eq(6));
    assert_that!(table.query(&"b"), eq(2));
    assert_that!(table.query(&"c"), eq(0));
    assert_that!(table.decrements(), eq(0));
}

#[gtest]
fn frequent_counters_purge_on_overflow() {
    let mut table = FrequentCounters::new(3);
    table.update("a", 5);
    table.update("b", 5);
    table.update("c", 1);
    table.update("d", 1);
    // the overflow raised the shared offset, purged "c", and admitted "d"
    assert_that!(table.decrements(), eq(1));
    assert_that!(table.num_tracked(), eq(3));
    assert_that!(table.query(&"a"), eq(4));
    assert_that!(table.query(&"b"), eq(4));
    assert_that!(table.query(&"c"), eq(0));
    // "d" is stored but still below the offset
    assert_that!(table.query(&"d"), eq(0));
    table.update("d", 1);
    assert_that!(table.query(&"d"), eq(1));
}

#[gtest]
fn effective_space_saving_promotes_the_largest_candidate() {
    let mut table = EffectiveSpaceSaving::with_rng(4, 0.5, seeded(4));
    table.update("a", 10);
    table.update("b", 8);
    assert_that!(table.query(&"a"), eq(10));
    assert_that!(table.query(&"b"), eq(8));

    // candidates accumulate without answering queries
    table.update("c", 3);
    table.update("d", 1);
    assert_that!(table.query(&"c"), eq(0));
    assert_that!(table.num_tracked(), eq(2));

    // window overflow: "c" inherits the minimum counter ("b")
    table.update("e", 2);
    assert_that!(table.query(&"c"), eq(11));
    assert_that!(table.query(&"b"), eq(0));
    assert_that!(table.query(&"e"), eq(0));
    assert_that!(table.query(&"a"), eq(10));
    assert_that!(table.num_tracked(), eq(2));
}

#[gtest]
fn effective_space_saving_zero_weight_is_a_noop() {
    let mut table = EffectiveSpaceSaving::with_rng(4, 0.5, seeded(5));
    table.update("a", 1);
    table.update("b", 0);
    assert_that!(table.query(&"a"), eq(1));
    assert_that!(table.num_tracked(), eq(1));
}

#[test]
#[should_panic(expected = "capacity too small for the candidate split")]
fn effective_space_saving_rejects_a_degenerate_split() {
    let _ = EffectiveSpaceSaving::<u64>::new(2, 0.1);
}

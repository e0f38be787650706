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

use distcounters::tiered::MeanTail;
use distcounters::tiered::RangeCounters;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_mean_tail_splits_capacity() {
    let table: MeanTail<u64> = MeanTail::with_rng(10, 0.1, seeded(0));
    assert_eq!(table.counter_capacity(), 9);
    assert_eq!(table.tail_capacity(), 2);
}

#[test]
fn test_mean_tail_counters_fill_first() {
    let mut table = MeanTail::with_rng(10, 0.1, seeded(1));
    for key in 0..9u64 {
        table.update(key, 10);
    }
    for key in 0..9u64 {
        assert_eq!(table.query(&key), 10);
    }
    assert_eq!(table.num_tracked(), 9);
    assert_eq!(table.tail_len(), 0);
}

#[test]
fn test_mean_tail_members_share_the_average() {
    let mut table = MeanTail::with_rng(10, 0.1, seeded(2));
    for key in 0..9u64 {
        table.update(key, 10);
    }
    table.update(100, 4);
    assert_eq!(table.tail_len(), 1);
    assert_eq!(table.query(&100), 4);
    table.update(101, 6);
    assert_eq!(table.tail_len(), 2);
    // both read the rounded tail average
    assert_eq!(table.query(&100), 5);
    assert_eq!(table.query(&101), 5);
    assert_eq!(table.query(&102), 0);
}

#[test]
fn test_mean_tail_heavy_tail_key_promotes() {
    let mut table = MeanTail::with_rng(10, 0.1, seeded(3));
    for key in 0..9u64 {
        table.update(key, 10);
    }
    table.update(100, 4);
    table.update(101, 6);

    // the threshold weight / (1 + min - avg) exceeds one, so the promotion
    // is certain: key 100 inherits the tail average plus its weight and the
    // first minimum counter (key 0) is demoted into the tail
    table.update(100, 1000);
    assert_eq!(table.query(&100), 1005);
    assert_eq!(table.num_tracked(), 9);
    assert_eq!(table.tail_len(), 2);
    // demoted key reads the updated tail average
    assert_eq!(table.query(&0), 8);
}

#[test]
fn test_mean_tail_zero_weight_is_a_noop() {
    let mut table = MeanTail::with_rng(10, 0.1, seeded(4));
    table.update(1u64, 3);
    table.update(1, 0);
    table.update(2, 0);
    assert_eq!(table.query(&1), 3);
    assert_eq!(table.query(&2), 0);
    assert_eq!(table.num_tracked(), 1);
}

#[test]
#[should_panic(expected = "capacity too small for the configured tail fraction")]
fn test_mean_tail_rejects_a_degenerate_split() {
    let _ = MeanTail::<u64>::new(4);
}

#[test]
fn test_range_counters_without_tiers_drop_new_keys() {
    let mut table = RangeCounters::with_rng(2, seeded(5));
    table.update("a", 1);
    table.update("b", 1);
    table.update("c", 1);
    assert_eq!(table.query(&"a"), 1);
    assert_eq!(table.query(&"b"), 1);
    assert_eq!(table.query(&"c"), 0);
    assert_eq!(table.num_tracked(), 2);
}

#[test]
fn test_range_counters_promote_through_the_ladder() {
    let mut table = RangeCounters::with_rng(2, seeded(6));
    table.add_tier(2);
    table.add_tier(4);
    assert_eq!(table.num_tiers(), 2);
    table.update("a", 5);
    table.update("b", 5);

    // first hit lands in the bottom tier, the second walks one tier up;
    // tier members stay invisible to queries
    table.update("c", 1);
    assert_eq!(table.query(&"c"), 0);
    table.update("c", 1);
    assert_eq!(table.query(&"c"), 0);

    // promotion into the counters passes with probability 1/(min+1)
    let mut admitted = false;
    for _ in 0..500 {
        table.update("c", 1);
        if table.query(&"c") > 0 {
            admitted = true;
            break;
        }
    }
    assert!(admitted, "persistent key was never admitted");
    assert_eq!(table.query(&"c"), 6);
    assert_eq!(table.query(&"a"), 0);
    assert_eq!(table.query(&"b"), 5);
    assert_eq!(table.num_tracked(), 2);
}

#[test]
fn test_range_counters_full_tier_replaces_randomly() {
    let mut table = RangeCounters::with_rng(1, seeded(7));
    table.add_tier(1);
    table.update("a", 3);
    table.update("b", 1);
    table.update("c", 1);
    // the single tier slot now holds "c"; nothing leaks into queries
    assert_eq!(table.query(&"a"), 3);
    assert_eq!(table.query(&"b"), 0);
    assert_eq!(table.query(&"c"), 0);
    assert_eq!(table.num_tracked(), 1);
}

#[test]
fn test_range_counters_zero_weight_is_a_noop() {
    let mut table = RangeCounters::with_rng(2, seeded(8));
    table.update("a", 2);
    table.update("a", 0);
    table.update("z", 0);
    assert_eq!(table.query(&"a"), 2);
    assert_eq!(table.query(&"z"), 0);
}

#[test]
#[should_panic(expected = "tier sizes must be strictly increasing")]
fn test_range_counters_reject_a_shrinking_ladder() {
    let mut table: RangeCounters<u64> = RangeCounters::with_rng(2, seeded(9));
    table.add_tier(4);
    table.add_tier(2);
}

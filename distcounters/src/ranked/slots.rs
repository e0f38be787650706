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

//! Rank-ordered key slots with a reverse key-to-rank index.
//!
//! The slot array and the index are only mutated through paired operations,
//! so `index[key] == rank` iff `slots[rank] == key` holds at all times.

use std::collections::HashMap;
use std::hash::Hash;

/// Fixed array of ranked key slots plus one scratch candidate slot.
///
/// Rank 0 is the most-frequent position. The slot at `capacity` is the
/// candidate position used while a new key bubbles into the ranked window;
/// between updates it is always empty. Occupied ranked slots form a prefix
/// of the array.
#[derive(Debug, Clone)]
pub(super) struct RankedSlots<K> {
    slots: Vec<Option<K>>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> RankedSlots<K> {
    /// Creates `capacity` ranked slots plus the candidate slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..=capacity).map(|_| None).collect(),
            index: HashMap::with_capacity(capacity + 1),
        }
    }

    /// Number of ranked slots, excluding the candidate slot.
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of keys currently holding a slot.
    pub fn num_tracked(&self) -> usize {
        self.index.len()
    }

    /// Returns the rank of `key`, if tracked.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns true if the slot at `rank` holds a key.
    pub fn is_occupied(&self, rank: usize) -> bool {
        self.slots[rank].is_some()
    }

    /// Places `key` into the candidate slot.
    ///
    /// # Panics
    ///
    /// Panics if the key is already tracked at some rank; a key may only
    /// ever occupy a single slot.
    pub fn place_candidate(&mut self, key: K) {
        let candidate = self.capacity();
        debug_assert!(self.slots[candidate].is_none(), "candidate slot occupied");
        let previous = self.index.insert(key.clone(), candidate);
        assert!(previous.is_none(), "key already tracked at another rank");
        self.slots[candidate] = Some(key);
    }

    /// Empties the candidate slot, evicting and returning its occupant.
    pub fn take_candidate(&mut self) -> Option<K> {
        let candidate = self.capacity();
        let evicted = self.slots[candidate].take();
        if let Some(key) = evicted.as_ref() {
            self.index.remove(key);
        }
        evicted
    }

    /// Swaps the slot at `rank` with its left neighbor, updating the index
    /// for both positions.
    pub fn swap_with_left(&mut self, rank: usize) {
        debug_assert!(rank >= 1, "rank 0 has no left neighbor");
        self.slots.swap(rank, rank - 1);
        if let Some(key) = self.slots[rank].as_ref() {
            self.index.insert(key.clone(), rank);
        }
        if let Some(key) = self.slots[rank - 1].as_ref() {
            self.index.insert(key.clone(), rank - 1);
        }
    }

    /// Iterates the ranked keys in rank order, skipping empty slots and the
    /// candidate slot.
    pub fn ranked_keys(&self) -> impl Iterator<Item = &K> {
        let capacity = self.capacity();
        self.slots[..capacity].iter().filter_map(|slot| slot.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(slots: &RankedSlots<u32>) {
        for (rank, slot) in slots.slots.iter().enumerate() {
            if let Some(key) = slot {
                assert_eq!(slots.rank_of(key), Some(rank));
            }
        }
        assert_eq!(
            slots.num_tracked(),
            slots.slots.iter().filter(|s| s.is_some()).count()
        );
    }

    #[test]
    fn place_swap_evict_keep_index_in_sync() {
        let mut slots = RankedSlots::new(3);
        assert_eq!(slots.capacity(), 3);
        assert_eq!(slots.num_tracked(), 0);

        slots.place_candidate(7);
        assert_eq!(slots.rank_of(&7), Some(3));
        assert_consistent(&slots);

        slots.swap_with_left(3);
        slots.swap_with_left(2);
        assert_eq!(slots.rank_of(&7), Some(1));
        assert!(!slots.is_occupied(3));
        assert_consistent(&slots);

        slots.place_candidate(9);
        slots.swap_with_left(3);
        assert_eq!(slots.rank_of(&9), Some(2));
        assert_consistent(&slots);

        assert_eq!(slots.take_candidate(), None);
        assert_eq!(slots.num_tracked(), 2);
    }

    #[test]
    fn take_candidate_evicts_occupant() {
        let mut slots = RankedSlots::new(2);
        slots.place_candidate(1);
        assert_eq!(slots.take_candidate(), Some(1));
        assert_eq!(slots.rank_of(&1), None);
        assert_eq!(slots.num_tracked(), 0);
        assert_consistent(&slots);
    }

    #[test]
    fn swap_into_occupied_slot_displaces_neighbor() {
        let mut slots = RankedSlots::new(2);
        slots.place_candidate(1);
        slots.swap_with_left(2);
        slots.swap_with_left(1);
        slots.place_candidate(2);
        slots.swap_with_left(2);
        slots.swap_with_left(1);
        // key 2 displaced key 1 down one rank at each step
        assert_eq!(slots.rank_of(&2), Some(0));
        assert_eq!(slots.rank_of(&1), Some(1));
        assert_consistent(&slots);
    }

    #[test]
    #[should_panic(expected = "key already tracked")]
    fn duplicate_key_fails_fast() {
        let mut slots = RankedSlots::new(3);
        slots.place_candidate(5);
        slots.swap_with_left(3);
        slots.place_candidate(5);
    }
}

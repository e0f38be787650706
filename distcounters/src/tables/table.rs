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

//! Insertion-ordered counter storage shared by the table variants.
//!
//! Entries live in a vector with a reverse key-to-slot index. Minimum and
//! maximum selection scan in insertion order and keep the first hit, so tie
//! breaks are deterministic and equal seeds reproduce identical tables.

use std::collections::HashMap;
use std::hash::Hash;

/// Keyed counter entries with deterministic min/max selection.
#[derive(Debug, Clone)]
pub(crate) struct CounterTable<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> CounterTable<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the counter for `key`, if present.
    pub fn get(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Adds `weight` to an existing counter; returns false if absent.
    pub fn add_assign(&mut self, key: &K, weight: u64) -> bool {
        match self.index.get(key) {
            Some(&slot) => {
                self.entries[slot].1 += weight;
                true
            }
            None => false,
        }
    }

    /// Appends a new entry.
    pub fn insert(&mut self, key: K, value: u64) {
        debug_assert!(!self.index.contains_key(&key), "key already present");
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Slot and value of the first minimum entry.
    pub fn min_entry(&self) -> Option<(usize, u64)> {
        self.position_by(|value, best| value < best)
    }

    /// Slot and value of the first maximum entry.
    pub fn max_entry(&self) -> Option<(usize, u64)> {
        self.position_by(|value, best| value > best)
    }

    fn position_by(&self, better: impl Fn(u64, u64) -> bool) -> Option<(usize, u64)> {
        let mut found: Option<(usize, u64)> = None;
        for (slot, (_, value)) in self.entries.iter().enumerate() {
            let replace = match found {
                None => true,
                Some((_, best)) => better(*value, best),
            };
            if replace {
                found = Some((slot, *value));
            }
        }
        found
    }

    pub fn key_at(&self, slot: usize) -> &K {
        &self.entries[slot].0
    }

    /// Replaces the entry at `slot` with a new key and value, evicting the
    /// previous occupant from the index.
    pub fn replace(&mut self, slot: usize, key: K, value: u64) {
        let (old_key, _) = &self.entries[slot];
        self.index.remove(old_key);
        self.index.insert(key.clone(), slot);
        self.entries[slot] = (key, value);
    }

    /// Sum of all counter values.
    pub fn sum(&self) -> u64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    /// Keeps only the entries the predicate accepts, in insertion order,
    /// then rebuilds the index.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, u64) -> bool) {
        self.entries.retain(|(key, value)| keep(key, *value));
        self.index.clear();
        for (slot, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(key.clone(), slot);
        }
    }
}

//! Group-and-sum aggregation.
//!
//! [`GroupTotals`] remembers the order in which keys were first seen. The
//! ranker relies on that order to break ties deterministically, so a plain
//! `HashMap` is not enough here.

use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered mapping from group key to accumulated value.
#[derive(Debug, Clone)]
pub struct GroupTotals<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> GroupTotals<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add `value` to the total for `key`, creating it at zero if absent.
    pub fn add(&mut self, key: K, value: u64) {
        match self.index.get(&key) {
            Some(&pos) => {
                let total = &mut self.entries[pos].1;
                *total = total.saturating_add(value);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every group's total.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, v)| acc.saturating_add(*v))
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[(K, u64)] {
        &self.entries
    }
}

impl<K: Clone + Eq + Hash> Default for GroupTotals<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Group `items` by `key_fn` and sum `value_fn` within each group.
///
/// Each item is visited exactly once. Both closures must be total; they
/// receive every item and should fall back to a default rather than fail.
pub fn aggregate_sum<T, K, I, F, G>(items: I, mut key_fn: F, mut value_fn: G) -> GroupTotals<K>
where
    I: IntoIterator<Item = T>,
    K: Clone + Eq + Hash,
    F: FnMut(&T) -> K,
    G: FnMut(&T) -> u64,
{
    let mut totals = GroupTotals::new();
    for item in items {
        let key = key_fn(&item);
        let value = value_fn(&item);
        totals.add(key, value);
    }
    totals
}

/// Count items per group.
pub fn count_by<T, K, I, F>(items: I, key_fn: F) -> GroupTotals<K>
where
    I: IntoIterator<Item = T>,
    K: Clone + Eq + Hash,
    F: FnMut(&T) -> K,
{
    aggregate_sum(items, key_fn, |_| 1)
}

//! Top-N ranking over aggregated groups.
//!
//! Sorting is stable: groups with equal totals keep the order in which
//! their keys were first inserted, so `top_n(m, n)` is always a prefix of
//! `top_n(m, n + k)`.

use std::hash::Hash;

use crate::aggregate::GroupTotals;

/// All groups, highest total first, ties in first-seen order.
pub fn rank_all<K: Clone + Eq + Hash>(totals: &GroupTotals<K>) -> Vec<(K, u64)> {
    let mut ranked = totals.entries().to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// The `n` highest-valued groups in descending order.
///
/// Returns fewer than `n` entries when there are fewer groups, and nothing
/// when `n` is zero.
pub fn top_n<K: Clone + Eq + Hash>(totals: &GroupTotals<K>, n: usize) -> Vec<(K, u64)> {
    if n == 0 {
        return Vec::new();
    }
    let mut ranked = rank_all(totals);
    ranked.truncate(n);
    ranked
}

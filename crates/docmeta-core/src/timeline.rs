//! Calendar-day bucketing.
//!
//! The day key is the first 10 characters of an ISO-8601 timestamp
//! (`YYYY-MM-DD`). No date parsing or timezone conversion happens here; a
//! malformed timestamp produces a malformed bucket rather than an error.

use std::collections::BTreeMap;

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
pub const DAY_KEY_LEN: usize = 10;

/// Calendar-day portion of a timestamp.
///
/// Slices on character boundaries, so non-ASCII input never panics.
pub fn day_key(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(DAY_KEY_LEN) {
        Some((end, _)) => &timestamp[..end],
        None => timestamp,
    }
}

/// Count items per calendar day, sorted ascending by day.
///
/// Items whose timestamp is absent or empty are skipped entirely.
pub fn bucket_by_day<T, F>(items: &[T], timestamp_fn: F) -> Vec<(String, u64)>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for item in items {
        let Some(ts) = timestamp_fn(item).filter(|ts| !ts.is_empty()) else {
            continue;
        };
        *buckets.entry(day_key(ts).to_string()).or_insert(0) += 1;
    }
    buckets.into_iter().collect()
}

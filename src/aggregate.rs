//! Grouping and reduction primitives the analyzer's reports are built from.

use std::collections::BTreeMap;

/// Partition `items` into buckets keyed by `key_fn`.
///
/// Single pass. Every item lands in exactly one bucket and each bucket keeps the
/// input order of its members. Buckets iterate in ascending key order. `key_fn`
/// must be pure.
pub fn group_by<'a, T, K, F>(items: &'a [T], key_fn: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut buckets: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();

    for item in items {
        buckets.entry(key_fn(item)).or_default().push(item);
    }

    buckets
}

/// Sum in iteration order. 0.0 for empty input.
pub fn sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

/// Integer sum, used for quantities.
pub fn sum_u64<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().fold(0u64, |acc, v| acc.saturating_add(v))
}

pub fn count<I>(values: I) -> usize
where
    I: IntoIterator,
{
    values.into_iter().count()
}

/// `total / count`, or 0.0 when `count` is zero.
pub fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Largest value, or `default` for empty input.
pub fn max_or<I>(values: I, default: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().reduce(f64::max).unwrap_or(default)
}

/// Smallest value, or `default` for empty input.
pub fn min_or<I>(values: I, default: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().reduce(f64::min).unwrap_or(default)
}

#[cfg(test)]
mod tests;

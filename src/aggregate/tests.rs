use super::*;

#[derive(Debug, PartialEq)]
struct Item {
    id: u32,
    tag: &'static str,
}

fn items() -> Vec<Item> {
    vec![
        Item { id: 1, tag: "b" },
        Item { id: 2, tag: "a" },
        Item { id: 3, tag: "b" },
        Item { id: 4, tag: "c" },
        Item { id: 5, tag: "a" },
        Item { id: 6, tag: "b" },
    ]
}

#[test]
fn test_group_by_partitions_every_item_once() {
    let items = items();
    let groups = group_by(&items, |i| i.tag);

    assert_eq!(groups.len(), 3);
    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, items.len());

    for (tag, members) in &groups {
        assert!(members.iter().all(|m| m.tag == *tag));
    }
}

#[test]
fn test_group_by_preserves_input_order_within_bucket() {
    let items = items();
    let groups = group_by(&items, |i| i.tag);

    let ids: Vec<u32> = groups["b"].iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3, 6]);
    let ids: Vec<u32> = groups["a"].iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2, 5]);
}

#[test]
fn test_group_by_iterates_keys_ascending() {
    let items = items();
    let keys: Vec<&str> = group_by(&items, |i| i.tag).into_keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_group_by_derived_key() {
    let items = items();
    let groups = group_by(&items, |i| i.id % 2 == 0);
    assert_eq!(groups[&true].len(), 3);
    assert_eq!(groups[&false].len(), 3);
}

#[test]
fn test_group_by_empty_input() {
    let items: Vec<Item> = Vec::new();
    assert!(group_by(&items, |i| i.tag).is_empty());
}

#[test]
fn test_reductions_on_values() {
    let values = [3.5, 1.25, 10.0];

    assert_eq!(sum(values), 14.75);
    assert_eq!(count(values), 3);
    assert_eq!(max_or(values, 0.0), 10.0);
    assert_eq!(min_or(values, 0.0), 1.25);
    assert_eq!(sum_u64([2, 3, 5]), 10);
}

#[test]
fn test_reductions_on_empty_input_use_defaults() {
    let empty: [f64; 0] = [];

    assert_eq!(sum(empty), 0.0);
    assert_eq!(count(empty), 0);
    assert_eq!(sum_u64(std::iter::empty()), 0);
    assert_eq!(max_or(empty, 0.0), 0.0);
    assert_eq!(min_or(empty, 0.0), 0.0);
}

#[test]
fn test_average_guards_zero_count() {
    assert_eq!(average(0.0, 0), 0.0);
    assert_eq!(average(100.0, 0), 0.0);
    assert_eq!(average(100.0, 4), 25.0);
}

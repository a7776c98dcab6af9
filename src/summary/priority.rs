//! Ranking and stable grouping used to order summary items.

use crate::model::LogType;

/// Rank given to values missing from a priority list; sorts after every listed value.
pub const NOT_RANKED: usize = usize::MAX;

/// Evaluation names whose diagnostics are reported first, in this order.
const EVALUATION_PRIORITY: [&str; 2] = ["license", "version"];

/// Errors first, then warnings, then anything else.
#[must_use]
pub const fn log_type_rank(log_type: &LogType) -> usize {
    match log_type {
        LogType::Error => 0,
        LogType::Warning => 1,
        LogType::Info | LogType::Other(_) => NOT_RANKED,
    }
}

/// Position of the evaluation name in the priority list, or [`NOT_RANKED`].
#[must_use]
pub fn evaluation_rank(name: Option<&str>) -> usize {
    name.and_then(|name| EVALUATION_PRIORITY.iter().position(|candidate| *candidate == name))
        .unwrap_or(NOT_RANKED)
}

/// Items that share a key.
#[derive(Debug)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

/// Partition `items` by key.
///
/// Groups appear in the order their key was first seen and each group keeps the input order of
/// its items. Keys are compared linearly, which is fine for the handful of distinct log types
/// and rule names a tree produces.
pub fn group_by<K, T>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<Group<K, T>>
where
    K: PartialEq,
{
    let mut groups: Vec<Group<K, T>> = Vec::new();
    for item in items {
        let item_key = key(&item);
        match groups.iter_mut().find(|group| group.key == item_key) {
            Some(group) => group.items.push(item),
            None => groups.push(Group {
                key: item_key,
                items: vec![item],
            }),
        }
    }
    groups
}

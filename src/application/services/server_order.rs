//! Ordering servers by a saved id list.

use std::collections::HashMap;

use crate::domain::entities::{Server, ServerId};

/// Orders `servers` by `saved`.
///
/// Servers absent from `saved` keep their natural order after the saved ones.
/// Saved ids that no longer match a server are ignored.
#[must_use]
pub fn apply_saved_order(servers: Vec<Server>, saved: &[ServerId]) -> Vec<Server> {
    let rank: HashMap<&ServerId, usize> = saved
        .iter()
        .enumerate()
        .map(|(i, id)| (id, i))
        .rev()
        .collect();

    let mut indexed: Vec<(Option<usize>, Server)> = servers
        .into_iter()
        .map(|server| (rank.get(server.id()).copied(), server))
        .collect();

    // Stable: unranked servers keep their relative order at the end.
    indexed.sort_by_key(|(rank, _)| rank.unwrap_or(usize::MAX));
    indexed.into_iter().map(|(_, server)| server).collect()
}

/// Moves the item at `from` to `to`, clamping `to` to the list bounds.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

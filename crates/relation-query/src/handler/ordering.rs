//! Ordering results by relation list position.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::repository::{ContentId, Location};
use crate::search::SortDirection;

/// Sort `locations` by the position of their content in `relation_ids`.
///
/// Locations of the same content compare equal and keep their relative
/// order. When an id occurs more than once in the list, its last position
/// counts. Locations whose content is not in the list sort after all others
/// in ascending order.
pub fn sort_by_relation_order(
    relation_ids: &[ContentId],
    locations: &mut [Location],
    direction: SortDirection,
) {
    let ranks: HashMap<ContentId, usize> = relation_ids
        .iter()
        .enumerate()
        .map(|(rank, id)| (*id, rank))
        .collect();
    let rank = |location: &Location| ranks.get(&location.content_id).copied().unwrap_or(usize::MAX);

    locations.sort_by(|a, b| {
        if a.content_id == b.content_id {
            return Ordering::Equal;
        }

        match direction {
            SortDirection::Asc => rank(a).cmp(&rank(b)),
            SortDirection::Desc => rank(b).cmp(&rank(a)),
        }
    });
}

//! Which of today's groups the page shows.

use crate::model::GroupId;

/// Keeps `previous` while it is still among `groups`, otherwise falls back to the smallest id.
/// Returns `None` when there are no groups.
pub fn select_active_group(groups: &[GroupId], previous: Option<GroupId>) -> Option<GroupId> {
    match previous {
        Some(id) if groups.contains(&id) => Some(id),
        _ => groups.iter().min().copied(),
    }
}

//! Player state visible to the dispatch core.

use ashen_proto::{AreaId, PlayerId};

/// Snapshot of the gameplay attributes the dispatch core reads.
///
/// Gameplay systems own and mutate the live state; handlers only ever see
/// a copy taken at the start of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    /// Stable player identifier.
    pub player_id: PlayerId,
    /// Area the player is currently in.
    pub area: AreaId,
}

impl PlayerState {
    /// Create a state snapshot.
    pub fn new(player_id: PlayerId, area: AreaId) -> Self {
        Self { player_id, area }
    }

    /// Whether the player's current area is one of `areas`.
    pub fn in_any_area(&self, areas: &[AreaId]) -> bool {
        areas.contains(&self.area)
    }
}

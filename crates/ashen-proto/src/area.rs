//! In-game area identifiers.
//!
//! Every connected player is in exactly one [`AreaId`] at a time. Handlers
//! use areas to scope server pushes: a notification raised in one zone is
//! delivered only to players whose current area is in that notification's
//! allow-list.

use serde::{Deserialize, Serialize};

/// Enumerated identifier for one in-game zone.
///
/// The set is closed: clients and server must agree on the discriminants,
/// so variants are only ever appended, never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaId {
    // --- Dragonspire ---
    /// Foot of the Dragonspire climb.
    DragonspireApproach,
    /// Upper Dragonspire plateau.
    DragonspireSummit,
    /// The Great Belfry at the peak.
    GreatBelfry,
    /// Walkway overlooking the belfry.
    BelfryOverlook,
    /// Roost on the eastern cliff face.
    WyvernRoost,
    /// Arena before the storm drake.
    StormdrakeArena,
    /// Mausoleum interior beneath the summit.
    DrakeMausoleum,
    /// Lift connecting the mausoleum to the summit.
    MausoleumLift,

    // --- Elsewhere ---
    /// Starting keep.
    EmberfallKeep,
    /// Crypt beneath the keep.
    SunkenCrypt,
    /// The ruined capital.
    AshenCapital,
    /// Moorland between the capital and the spire.
    WitheredMoor,
    /// Lowest depths of the world.
    CinderDepths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_equality_and_hash() {
        use std::collections::HashSet;
        let set: HashSet<AreaId> = [AreaId::GreatBelfry, AreaId::GreatBelfry, AreaId::WyvernRoost]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&AreaId::GreatBelfry));
        assert!(!set.contains(&AreaId::AshenCapital));
    }
}

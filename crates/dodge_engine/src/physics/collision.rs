//! Pairwise collision rules
//!
//! Overlap is a symmetric axis-aligned proximity test on world positions.
//! Outcomes come from a closed rule table over [`EntityKind`] pairs, so a
//! new kind forces this table to be revisited.

use crate::foundation::math::Vec3;
use crate::scene::render_item::EntityKind;

/// Default overlap half-extent on each axis, in world units
pub const DEFAULT_COLLISION_EXTENT: f32 = 0.25;

/// What overlapping asteroids do to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidPairRule {
    /// Asteroids pass through each other
    #[default]
    Ignore,
    /// An asteroid overlapping another stops advancing
    HoldPosition,
}

/// Tunable collision behavior
#[derive(Debug, Clone, Copy)]
pub struct CollisionRules {
    /// Half-extent of the per-axis proximity test
    pub extent: f32,
    /// Behavior of asteroid/asteroid overlap
    pub asteroid_pair: AsteroidPairRule,
}

impl Default for CollisionRules {
    fn default() -> Self {
        Self {
            extent: DEFAULT_COLLISION_EXTENT,
            asteroid_pair: AsteroidPairRule::default(),
        }
    }
}

/// Effect of a colliding pair, applied exactly once per overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// The session ends and the collection is cleared
    GameOver,
    /// Both items are removed
    MutualRemoval,
    /// The first item of the pair stops advancing
    HoldPosition,
}

/// Per-axis proximity test: positions within `extent` on all three axes
pub fn proximity_overlap(a: Vec3, b: Vec3, extent: f32) -> bool {
    (a.x - b.x).abs() <= extent && (a.y - b.y).abs() <= extent && (a.z - b.z).abs() <= extent
}

/// Look up the effect for a pair of kinds, in iteration order `(a, b)`
pub fn pair_outcome(
    a: EntityKind,
    b: EntityKind,
    rules: &CollisionRules,
) -> Option<PairOutcome> {
    use EntityKind::{Asteroid, Player, Projectile};

    match (a, b) {
        (Asteroid, Player) | (Player, Asteroid) => Some(PairOutcome::GameOver),
        (Asteroid, Projectile) | (Projectile, Asteroid) => Some(PairOutcome::MutualRemoval),
        (Asteroid, Asteroid) => match rules.asteroid_pair {
            AsteroidPairRule::Ignore => None,
            AsteroidPairRule::HoldPosition => Some(PairOutcome::HoldPosition),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proximity_is_inclusive_on_the_boundary() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        assert!(proximity_overlap(a, Vec3::new(0.25, 0.0, 0.0), 0.25));
        assert!(!proximity_overlap(a, Vec3::new(0.26, 0.0, 0.0), 0.25));
    }

    #[test]
    fn test_proximity_requires_all_axes() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        assert!(!proximity_overlap(a, Vec3::new(0.1, 5.0, 0.1), 0.25));
        assert!(proximity_overlap(a, Vec3::new(0.1, 0.2, -0.2), 0.25));
    }

    #[test]
    fn test_rule_table_is_symmetric() {
        let rules = CollisionRules::default();
        assert_eq!(
            pair_outcome(EntityKind::Asteroid, EntityKind::Player, &rules),
            Some(PairOutcome::GameOver)
        );
        assert_eq!(
            pair_outcome(EntityKind::Player, EntityKind::Asteroid, &rules),
            Some(PairOutcome::GameOver)
        );
        assert_eq!(
            pair_outcome(EntityKind::Asteroid, EntityKind::Projectile, &rules),
            Some(PairOutcome::MutualRemoval)
        );
        assert_eq!(
            pair_outcome(EntityKind::Projectile, EntityKind::Asteroid, &rules),
            Some(PairOutcome::MutualRemoval)
        );
    }

    #[test]
    fn test_uninvolved_pairs_are_no_ops() {
        let rules = CollisionRules::default();
        assert_eq!(pair_outcome(EntityKind::Box, EntityKind::Player, &rules), None);
        assert_eq!(
            pair_outcome(EntityKind::Projectile, EntityKind::Player, &rules),
            None
        );
        assert_eq!(
            pair_outcome(EntityKind::Asteroid, EntityKind::Asteroid, &rules),
            None
        );
    }

    #[test]
    fn test_asteroid_pair_rule_is_configurable() {
        let rules = CollisionRules {
            asteroid_pair: AsteroidPairRule::HoldPosition,
            ..CollisionRules::default()
        };
        assert_eq!(
            pair_outcome(EntityKind::Asteroid, EntityKind::Asteroid, &rules),
            Some(PairOutcome::HoldPosition)
        );
    }
}

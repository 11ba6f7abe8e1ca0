//! Collision rules and the per-frame update pass

pub mod collision;
pub mod step;

pub use collision::{AsteroidPairRule, CollisionRules, PairOutcome};
pub use step::{step, StepEvents};

//! The per-frame update and collision pass
//!
//! One call to [`step`] advances every live item, resolves pairwise
//! collisions against the items after it in iteration order, ticks
//! projectile lifetimes, and compacts the collection. The pass is
//! single-threaded and infallible; all effects are applied through
//! mark-for-removal so indices stay valid while the collection is walked.

use log::{debug, info};

use crate::foundation::math::{translated, Vec3};
use crate::physics::collision::{pair_outcome, proximity_overlap, CollisionRules, PairOutcome};
use crate::scene::render_item::{EntityKind, ItemFlags};
use crate::scene::world::SceneWorld;

/// Summary of one update pass, for logging and assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// Overlapping pairs that triggered a rule effect
    pub collisions: usize,
    /// Items dropped by the end-of-frame compaction
    pub removed: usize,
    /// Projectiles whose lifetime expired this frame
    pub expired: usize,
    /// Whether this pass ended the session
    pub game_over: bool,
}

/// Advance the world by one frame.
///
/// Overlap is tested on pre-advance positions; the advanced transform is
/// written back afterwards unless the item was removed this frame or holds
/// position. The first matching pair in iteration order wins and applies
/// its effect exactly once.
pub fn step(world: &mut SceneWorld, rules: &CollisionRules) -> StepEvents {
    let mut events = StepEvents::default();

    let count = world.len();
    for i in 0..count {
        if !world.items()[i].is_live() {
            continue;
        }

        let kind = world.items()[i].kind;
        let position = world.items()[i].position();
        let advanced = translated(
            &world.items()[i].world,
            Vec3::new(0.0, 0.0, kind.step_along_view_axis()),
        );

        let mut removed_self = false;
        for j in (i + 1)..count {
            let other = &world.items()[j];
            if !other.is_live() {
                continue;
            }
            if !proximity_overlap(position, other.position(), rules.extent) {
                continue;
            }

            let Some(outcome) = pair_outcome(kind, other.kind, rules) else {
                continue;
            };

            events.collisions += 1;
            match outcome {
                PairOutcome::GameOver => {
                    info!(
                        "player/asteroid impact (ids {} and {}): game over",
                        world.items()[i].id,
                        world.items()[j].id
                    );
                    events.removed += world.opaque_items().count();
                    events.game_over = true;
                    world.set_game_over();
                    world.clear();
                    return events;
                }
                PairOutcome::MutualRemoval => {
                    debug!(
                        "projectile/asteroid impact: removing ids {} and {}",
                        world.items()[i].id,
                        world.items()[j].id
                    );
                    world.items_mut()[i].mark_removed();
                    world.items_mut()[j].mark_removed();
                    removed_self = true;
                }
                PairOutcome::HoldPosition => {
                    debug!("asteroid id {} holds position", world.items()[i].id);
                    world.items_mut()[i].flags.insert(ItemFlags::HOLD_POSITION);
                }
            }
            // First match in iteration order wins; one effect per item per frame.
            break;
        }

        let item = &mut world.items_mut()[i];
        if !removed_self && !item.holds_position() {
            item.world = advanced;
        }
    }

    for item in world.items_mut() {
        if !item.is_live() || item.kind != EntityKind::Projectile {
            continue;
        }
        if let Some(lifetime) = item.lifetime.as_mut() {
            if lifetime.tick() {
                debug!("projectile id {} expired", item.id);
                item.mark_removed();
                events.expired += 1;
            }
        }
    }

    events.removed += world.compact();
    events
}

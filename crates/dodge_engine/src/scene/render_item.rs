//! Render items: the drawable game entities
//!
//! A render item couples a world transform with the mesh range it draws and
//! the dedicated constant buffer the feed writes each frame. Behavior varies
//! only by [`EntityKind`], a closed enum so the collision rule table stays
//! exhaustive.

use bitflags::bitflags;

use crate::foundation::math::{translation_of, Mat4, Vec3};
use crate::render::constants::ObjectConstants;
use crate::render::mesh::{MeshKey, Submesh};
use crate::render::upload::UploadBuffer;

/// Stable identifier for a render item, never reused within a session
pub type EntityId = u32;

/// Closed set of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Static scenery box
    Box,
    /// The player ship (drawn as a pyramid)
    Player,
    /// Incoming asteroid (drawn as a sphere)
    Asteroid,
    /// Fired projectile (drawn as a thin cylinder)
    Projectile,
}

impl EntityKind {
    /// Per-frame displacement along the view axis.
    ///
    /// Asteroids drift toward the camera, projectiles fly away from it,
    /// everything else stays put. The step is per frame, not per second.
    pub fn step_along_view_axis(self) -> f32 {
        match self {
            EntityKind::Asteroid => -0.01,
            EntityKind::Projectile => 0.01,
            EntityKind::Box | EntityKind::Player => 0.0,
        }
    }
}

bitflags! {
    /// Per-item state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ItemFlags: u32 {
        /// Marked for deletion; dropped at the end-of-frame compaction
        const REMOVED = 1 << 0;
        /// Position write-back suppressed for this item
        const HOLD_POSITION = 1 << 1;
    }
}

/// Remaining lifetime in frames, used by projectiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLifetime {
    remaining: u32,
}

impl FrameLifetime {
    /// Create a lifetime of `frames` frames
    pub fn new(frames: u32) -> Self {
        Self { remaining: frames }
    }

    /// Count down one frame; returns true once the lifetime is spent
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Frames left before expiry
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// A single drawable game entity
pub struct RenderItem {
    /// Stable identifier
    pub id: EntityId,
    /// Entity kind driving movement and collision rules
    pub kind: EntityKind,
    /// World transform
    pub world: Mat4,
    /// Index into the per-entity constant buffer sequence; assigned at spawn
    /// and stable for the item's lifetime
    pub cb_index: u32,
    /// Shared geometry this item draws from
    pub geometry: MeshKey,
    /// Index range within the shared geometry
    pub submesh: Submesh,
    /// Remaining lifetime, projectiles only
    pub lifetime: Option<FrameLifetime>,
    /// State bits
    pub flags: ItemFlags,
    /// Dedicated upload-visible constant buffer, rewritten every frame
    pub object_cb: UploadBuffer<ObjectConstants>,
}

impl RenderItem {
    /// World-space position (the transform's translation component)
    pub fn position(&self) -> Vec3 {
        translation_of(&self.world)
    }

    /// Whether the item is still live this frame
    pub fn is_live(&self) -> bool {
        !self.flags.contains(ItemFlags::REMOVED)
    }

    /// Mark the item for removal at the next compaction
    pub fn mark_removed(&mut self) {
        self.flags.insert(ItemFlags::REMOVED);
    }

    /// Whether position write-back is suppressed
    pub fn holds_position(&self) -> bool {
        self.flags.contains(ItemFlags::HOLD_POSITION)
    }
}

impl std::fmt::Debug for RenderItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderItem")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("position", &self.position())
            .field("cb_index", &self.cb_index)
            .field("flags", &self.flags)
            .finish()
    }
}

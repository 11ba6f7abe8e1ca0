//! # Dodge Engine
//!
//! Simulation core for a minimal real-time 3D dodging game: a player ship
//! holds its ground while asteroids drift toward the camera and projectiles
//! fly out to meet them.
//!
//! The crate owns the game-side half of the frame:
//!
//! - **Scene**: an ordered collection of render items, each with a world
//!   transform, a shared mesh range, and a dedicated constant buffer.
//! - **Physics**: the per-frame update pass that advances items, resolves
//!   pairwise collisions from a closed rule table, and compacts removals.
//! - **Render plumbing**: the write-through constant buffer feed and the
//!   backend seam the actual rendering pipeline plugs into.
//!
//! Everything runs on one thread; a frame is update → feed → draw →
//! present, with `present` blocking until the frame is consumed.
//!
//! ## Quick Start
//!
//! ```rust
//! use dodge_engine::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut library = MeshLibrary::new();
//! let geometry = library.register(MeshGeometry::concatenated(
//!     "shapes",
//!     &[
//!         (ShapeKind::Box, ShapeCounts { vertices: 24, indices: 36 }),
//!         (ShapeKind::Sphere, ShapeCounts { vertices: 441, indices: 2280 }),
//!         (ShapeKind::Pyramid, ShapeCounts { vertices: 16, indices: 18 }),
//!         (ShapeKind::Cylinder, ShapeCounts { vertices: 1002, indices: 5700 }),
//!     ],
//! ));
//!
//! let spawner = Spawner::new(&library, geometry, SpawnTuning::default())?;
//! let mut world = SceneWorld::new();
//! let mut rng = StdRng::seed_from_u64(1);
//! spawner.spawn_player(&mut world);
//! spawner.spawn_asteroid(&mut world, &mut rng);
//!
//! let events = dodge_engine::physics::step(&mut world, &CollisionRules::default());
//! assert!(!events.game_over);
//! # Ok::<(), dodge_engine::scene::SpawnError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{ConfigError, GameConfig};
    pub use crate::foundation::{
        math::{Mat4, Mat4Ext, Vec3},
        time::Timer,
    };
    pub use crate::input::{InputState, KeyCode};
    pub use crate::physics::{step, AsteroidPairRule, CollisionRules, StepEvents};
    pub use crate::render::{
        draw_render_items, upload_object_constants, FrameFeed, FreeCamera, HeadlessBackend,
        MeshGeometry, MeshLibrary, RenderBackend, ShapeCounts, ShapeKind, Viewport,
    };
    pub use crate::scene::{
        EntityId, EntityKind, FrameLifetime, RenderItem, SceneWorld, SpawnTuning, Spawner,
    };
}

//! Spawn builders, one per entity kind
//!
//! A [`Spawner`] resolves the shared geometry's submesh ranges once, up
//! front; afterwards every spawn is infallible. Asteroid placement draws
//! from the caller's RNG, which is created once per process and threaded
//! through, so successive spawns see successive values.

use rand::Rng;
use thiserror::Error;

use crate::foundation::math::{translated, Mat4, Vec3};
use crate::render::mesh::{MeshKey, MeshLibrary, ShapeKind, Submesh};
use crate::scene::render_item::{EntityId, EntityKind, FrameLifetime};
use crate::scene::world::SceneWorld;

/// Errors raised while resolving spawn geometry
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The geometry key is not present in the library
    #[error("geometry is not registered in the mesh library")]
    UnknownGeometry,

    /// The geometry lacks a submesh for a required shape
    #[error("geometry {geometry:?} has no submesh for {shape:?}")]
    MissingSubmesh {
        /// Name of the geometry that was searched
        geometry: String,
        /// The shape that was missing
        shape: ShapeKind,
    },
}

/// Placement and lifetime tuning for spawned items
#[derive(Debug, Clone, Copy)]
pub struct SpawnTuning {
    /// Frames a projectile lives before it despawns
    pub projectile_lifetime_frames: u32,
    /// Asteroids start within this half-extent on X and Y
    pub asteroid_spread: f32,
    /// Nearest Z an asteroid may start at
    pub asteroid_near: f32,
    /// Farthest Z an asteroid may start at
    pub asteroid_far: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            projectile_lifetime_frames: 200,
            asteroid_spread: 2.0,
            asteroid_near: 6.0,
            asteroid_far: 12.0,
        }
    }
}

/// Factory for render items backed by one shared geometry
#[derive(Debug, Clone)]
pub struct Spawner {
    geometry: MeshKey,
    box_mesh: Submesh,
    pyramid_mesh: Submesh,
    sphere_mesh: Submesh,
    cylinder_mesh: Submesh,
    tuning: SpawnTuning,
}

impl Spawner {
    /// Resolve the four shape ranges from `geometry`.
    ///
    /// Fails up front if any required submesh is missing, so the per-frame
    /// spawn paths never have to.
    pub fn new(
        library: &MeshLibrary,
        geometry: MeshKey,
        tuning: SpawnTuning,
    ) -> Result<Self, SpawnError> {
        let geo = library.get(geometry).ok_or(SpawnError::UnknownGeometry)?;

        let submesh = |shape: ShapeKind| {
            geo.submesh(shape).ok_or_else(|| SpawnError::MissingSubmesh {
                geometry: geo.name.clone(),
                shape,
            })
        };

        Ok(Self {
            geometry,
            box_mesh: submesh(ShapeKind::Box)?,
            pyramid_mesh: submesh(ShapeKind::Pyramid)?,
            sphere_mesh: submesh(ShapeKind::Sphere)?,
            cylinder_mesh: submesh(ShapeKind::Cylinder)?,
            tuning,
        })
    }

    /// Spawn a static scenery box at the origin
    pub fn spawn_box(&self, world: &mut SceneWorld) -> EntityId {
        world.insert(
            EntityKind::Box,
            Mat4::identity(),
            self.geometry,
            self.box_mesh,
            None,
        )
    }

    /// Spawn the player ship at the origin
    pub fn spawn_player(&self, world: &mut SceneWorld) -> EntityId {
        world.insert(
            EntityKind::Player,
            Mat4::identity(),
            self.geometry,
            self.pyramid_mesh,
            None,
        )
    }

    /// Spawn a projectile at the player's position.
    ///
    /// The projectile advances away from the camera each frame and expires
    /// after the configured number of frames.
    pub fn spawn_projectile(&self, world: &mut SceneWorld, origin: Vec3) -> EntityId {
        world.insert(
            EntityKind::Projectile,
            translated(&Mat4::identity(), origin),
            self.geometry,
            self.cylinder_mesh,
            Some(FrameLifetime::new(self.tuning.projectile_lifetime_frames)),
        )
    }

    /// Spawn an asteroid at a randomized position in front of the camera
    pub fn spawn_asteroid(&self, world: &mut SceneWorld, rng: &mut impl Rng) -> EntityId {
        let spread = self.tuning.asteroid_spread;
        let offset = Vec3::new(
            rng.gen_range(-spread..=spread),
            rng.gen_range(-spread..=spread),
            rng.gen_range(self.tuning.asteroid_near..=self.tuning.asteroid_far),
        );
        world.insert(
            EntityKind::Asteroid,
            translated(&Mat4::identity(), offset),
            self.geometry,
            self.sphere_mesh,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::{MeshGeometry, ShapeCounts};
    use crate::scene::render_item::RenderItem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counts(vertices: u32, indices: u32) -> ShapeCounts {
        ShapeCounts { vertices, indices }
    }

    fn full_library() -> (MeshLibrary, MeshKey) {
        let mut library = MeshLibrary::new();
        let key = library.register(MeshGeometry::concatenated(
            "shapes",
            &[
                (ShapeKind::Box, counts(24, 36)),
                (ShapeKind::Sphere, counts(441, 2280)),
                (ShapeKind::Pyramid, counts(16, 18)),
                (ShapeKind::Cylinder, counts(1002, 5700)),
            ],
        ));
        (library, key)
    }

    #[test]
    fn test_spawner_requires_all_shapes() {
        let mut library = MeshLibrary::new();
        let key = library.register(MeshGeometry::concatenated(
            "partial",
            &[(ShapeKind::Box, counts(24, 36))],
        ));

        let err = Spawner::new(&library, key, SpawnTuning::default()).unwrap_err();
        assert!(matches!(err, SpawnError::MissingSubmesh { .. }));
    }

    #[test]
    fn test_spawns_attach_the_expected_submesh() {
        let (library, key) = full_library();
        let spawner = Spawner::new(&library, key, SpawnTuning::default()).unwrap();
        let geo = library.get(key).unwrap();

        let mut world = SceneWorld::new();
        spawner.spawn_player(&mut world);
        spawner.spawn_box(&mut world);
        spawner.spawn_projectile(&mut world, Vec3::zeros());

        assert_eq!(
            world.items()[0].submesh,
            geo.submesh(ShapeKind::Pyramid).unwrap()
        );
        assert_eq!(world.items()[1].submesh, geo.submesh(ShapeKind::Box).unwrap());
        assert_eq!(
            world.items()[2].submesh,
            geo.submesh(ShapeKind::Cylinder).unwrap()
        );
    }

    #[test]
    fn test_projectile_starts_at_the_given_origin_with_lifetime() {
        let (library, key) = full_library();
        let tuning = SpawnTuning {
            projectile_lifetime_frames: 42,
            ..SpawnTuning::default()
        };
        let spawner = Spawner::new(&library, key, tuning).unwrap();

        let mut world = SceneWorld::new();
        spawner.spawn_projectile(&mut world, Vec3::new(1.0, -2.0, 0.5));

        let item = &world.items()[0];
        assert_eq!(item.position(), Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(item.lifetime.map(|l| l.remaining()), Some(42));
    }

    #[test]
    fn test_asteroid_spawns_vary_without_reseeding() {
        let (library, key) = full_library();
        let spawner = Spawner::new(&library, key, SpawnTuning::default()).unwrap();

        let mut world = SceneWorld::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            spawner.spawn_asteroid(&mut world, &mut rng);
        }

        let positions: Vec<_> = world.items().iter().map(RenderItem::position).collect();
        let first = positions[0];
        assert!(
            positions.iter().any(|p| (p - first).norm() > 1e-3),
            "successive spawns must draw successive random values"
        );

        let tuning = SpawnTuning::default();
        for p in &positions {
            assert!(p.x.abs() <= tuning.asteroid_spread);
            assert!(p.y.abs() <= tuning.asteroid_spread);
            assert!(p.z >= tuning.asteroid_near && p.z <= tuning.asteroid_far);
        }
    }

    #[test]
    fn test_spawning_n_asteroids_yields_increasing_cb_indices() {
        let (library, key) = full_library();
        let spawner = Spawner::new(&library, key, SpawnTuning::default()).unwrap();

        let mut world = SceneWorld::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            spawner.spawn_asteroid(&mut world, &mut rng);
        }

        let indices: Vec<u32> = world.items().iter().map(|i| i.cb_index).collect();
        assert_eq!(indices.len(), 16);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }
}

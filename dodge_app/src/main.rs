//! BoxDodge demo session
//!
//! Runs the full frame loop headlessly: polled input feeds the free-look
//! camera, the update pass advances asteroids and projectiles, and every
//! frame the constant-buffer feed is rewritten and submitted to the
//! backend. A scripted input track stands in for the OS key polling layer,
//! which lives outside this workspace along with the window and device.

use std::error::Error;

use dodge_engine::prelude::*;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Shape layout of the one concatenated geometry the session draws from.
///
/// Vertex and index counts match the tessellation the mesh generator
/// produces for each primitive; generation itself happens outside the
/// engine.
fn register_shape_geometry(library: &mut MeshLibrary) -> dodge_engine::render::MeshKey {
    library.register(MeshGeometry::concatenated(
        "shapeGeo",
        &[
            (ShapeKind::Box, ShapeCounts { vertices: 24, indices: 36 }),
            (ShapeKind::Sphere, ShapeCounts { vertices: 401, indices: 2280 }),
            (ShapeKind::Pyramid, ShapeCounts { vertices: 16, indices: 18 }),
            (ShapeKind::Cylinder, ShapeCounts { vertices: 86, indices: 240 }),
        ],
    ))
}

struct DodgeApp {
    config: GameConfig,
    world: SceneWorld,
    spawner: Spawner,
    rules: CollisionRules,
    camera: FreeCamera,
    viewport: Viewport,
    feed: FrameFeed,
    backend: HeadlessBackend,
    input: InputState,
    timer: Timer,
}

impl DodgeApp {
    fn new(config: GameConfig, mut rng: StdRng) -> Result<Self, Box<dyn Error>> {
        let mut library = MeshLibrary::new();
        let geometry = register_shape_geometry(&mut library);
        let spawner = Spawner::new(&library, geometry, config.spawn_tuning())?;

        let mut world = SceneWorld::new();
        spawner.spawn_box(&mut world);
        spawner.spawn_player(&mut world);
        for _ in 0..config.gameplay.asteroid_count {
            spawner.spawn_asteroid(&mut world, &mut rng);
        }
        info!(
            "session start: {} item(s), {} asteroid(s)",
            world.len(),
            config.gameplay.asteroid_count
        );

        Ok(Self {
            rules: config.collision_rules(),
            viewport: config.viewport(),
            config,
            world,
            spawner,
            camera: FreeCamera::default(),
            feed: FrameFeed::new(),
            backend: HeadlessBackend::new(),
            input: InputState::new(),
            timer: Timer::new(),
        })
    }

    /// Map the polled key state onto the camera accumulators
    fn camera_inputs(&mut self) {
        let turn = self.config.camera.turn_speed;
        let mut swift = self.config.camera.move_speed;
        if self.input.is_down(KeyCode::Shift) {
            swift *= self.config.camera.sprint_multiplier;
        }

        if self.input.is_down(KeyCode::Z) {
            self.camera.walk(swift);
        }
        if self.input.is_down(KeyCode::S) {
            self.camera.walk(-swift);
        }
        if self.input.is_down(KeyCode::Q) {
            self.camera.strafe(-swift);
        }
        if self.input.is_down(KeyCode::D) {
            self.camera.strafe(swift);
        }

        if self.input.is_down(KeyCode::ArrowUp) {
            self.camera.turn(0.0, -turn);
        }
        if self.input.is_down(KeyCode::ArrowDown) {
            self.camera.turn(0.0, turn);
        }
        if self.input.is_down(KeyCode::ArrowLeft) {
            self.camera.turn(-turn, 0.0);
        }
        if self.input.is_down(KeyCode::ArrowRight) {
            self.camera.turn(turn, 0.0);
        }
    }

    /// Fire a projectile from the player's position while Space is held
    fn fire_inputs(&mut self) {
        if !self.input.is_down(KeyCode::Space) {
            return;
        }
        let origin = self
            .world
            .first_of_kind(EntityKind::Player)
            .map(RenderItem::position);
        if let Some(origin) = origin {
            self.spawner.spawn_projectile(&mut self.world, origin);
        }
    }

    /// Run one frame; returns false once the session is over
    fn frame(&mut self) -> Result<bool, Box<dyn Error>> {
        self.timer.update();

        self.camera_inputs();
        self.camera.apply_movement();
        self.fire_inputs();

        let events = dodge_engine::physics::step(&mut self.world, &self.rules);
        if events != StepEvents::default() {
            debug!("frame {}: {:?}", self.timer.frame_count(), events);
        }

        upload_object_constants(&mut self.world);
        self.feed
            .upload_pass_constants(&self.camera, &self.viewport, &self.timer);

        self.backend.begin_frame()?;
        draw_render_items(&mut self.backend, &self.world)?;
        self.backend.present()?;

        Ok(!self.world.game_over())
    }
}

/// Stand-in for the OS key polling layer: a fixed input track that fires a
/// projectile burst every 90 frames and weaves the camera side to side.
fn scripted_input(frame: u64, input: &mut InputState) {
    input.clear();

    if frame % 90 == 0 {
        input.press(KeyCode::Space);
    }

    match (frame / 120) % 4 {
        0 => input.press(KeyCode::Q),
        2 => input.press(KeyCode::D),
        _ => {}
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GameConfig::load_or_default("boxdodge.toml")?;

    // One RNG for the whole process; spawners draw successive values from it.
    let rng = StdRng::from_entropy();
    let mut app = DodgeApp::new(config, rng)?;

    let frame_limit = app.config.gameplay.frame_limit;
    let mut frame = 0u64;
    while frame < frame_limit {
        scripted_input(frame, &mut app.input);
        if !app.frame()? {
            break;
        }
        frame += 1;
    }

    if app.world.game_over() {
        info!(
            "game over after {} frame(s), {} draw(s) submitted",
            app.timer.frame_count(),
            app.backend.draws_total()
        );
    } else {
        info!(
            "session survived {} frame(s) ({:.1} fps average), {} item(s) remaining",
            app.timer.frame_count(),
            app.timer.average_fps(),
            app.world.opaque_items().count()
        );
    }

    Ok(())
}

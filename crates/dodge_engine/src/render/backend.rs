//! Backend seam between the simulation and the rendering pipeline
//!
//! The device, swap chain, and pipeline state live on the other side of
//! [`RenderBackend`]; the engine only submits indexed draws with the bytes
//! of each item's constant buffer. `present` is a synchronous
//! fence-and-flush: it returns once the frame has been fully consumed, so
//! there is never more than one frame in flight.

use log::{debug, trace};
use thiserror::Error;

use crate::scene::world::SceneWorld;

/// Errors surfaced by a rendering backend
#[derive(Debug, Error)]
pub enum RenderError {
    /// A draw was submitted outside a begin/present bracket
    #[error("draw submitted outside an active frame")]
    NoActiveFrame,

    /// The backend rejected a submission
    #[error("backend submission failed: {0}")]
    Submission(String),
}

/// One indexed draw, referencing ranges in the shared geometry buffers
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    /// Number of indices to draw
    pub index_count: u32,
    /// First index within the shared index buffer
    pub start_index: u32,
    /// Vertex offset added to every index
    pub base_vertex: i32,
    /// The item's constant buffer contents, padding included
    pub object_constants: &'a [u8],
}

/// Consumer of per-frame draw submissions
pub trait RenderBackend {
    /// Start a new frame
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// Submit one indexed draw
    fn draw_indexed(&mut self, call: &DrawCall<'_>) -> Result<(), RenderError>;

    /// Finish the frame, blocking until it has been consumed
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Backend that consumes submissions without a device
///
/// Used by the app when no window system is available and by tests; it
/// validates the begin/draw/present bracketing and keeps counters.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    in_frame: bool,
    frames_presented: u64,
    draws_this_frame: u64,
    draws_total: u64,
}

impl HeadlessBackend {
    /// Create an idle backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Draws submitted in the current (or last) frame
    pub fn draws_this_frame(&self) -> u64 {
        self.draws_this_frame
    }

    /// Draws submitted across all frames
    pub fn draws_total(&self) -> u64 {
        self.draws_total
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.in_frame = true;
        self.draws_this_frame = 0;
        Ok(())
    }

    fn draw_indexed(&mut self, call: &DrawCall<'_>) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoActiveFrame);
        }
        trace!(
            "draw_indexed count={} start={} base={}",
            call.index_count,
            call.start_index,
            call.base_vertex
        );
        self.draws_this_frame += 1;
        self.draws_total += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoActiveFrame);
        }
        self.in_frame = false;
        self.frames_presented += 1;
        debug!(
            "frame {} presented with {} draw(s)",
            self.frames_presented, self.draws_this_frame
        );
        Ok(())
    }
}

/// Submit one draw per live item, in insertion order
pub fn draw_render_items(
    backend: &mut dyn RenderBackend,
    world: &SceneWorld,
) -> Result<(), RenderError> {
    for item in world.opaque_items() {
        let call = DrawCall {
            index_count: item.submesh.index_count,
            start_index: item.submesh.start_index,
            base_vertex: item.submesh.base_vertex,
            object_constants: item.object_cb.element_bytes(0),
        };
        backend.draw_indexed(&call)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;
    use crate::render::mesh::{MeshGeometry, MeshLibrary, ShapeCounts, ShapeKind};
    use crate::scene::render_item::EntityKind;

    fn world_with_two_items() -> SceneWorld {
        let mut library = MeshLibrary::new();
        let key = library.register(MeshGeometry::concatenated(
            "shapes",
            &[(ShapeKind::Box, ShapeCounts { vertices: 8, indices: 36 })],
        ));
        let submesh = library
            .get(key)
            .and_then(|g| g.submesh(ShapeKind::Box))
            .unwrap();

        let mut world = SceneWorld::new();
        world.insert(EntityKind::Box, Mat4::identity(), key, submesh, None);
        world.insert(EntityKind::Player, Mat4::identity(), key, submesh, None);
        world
    }

    #[test]
    fn test_draw_outside_frame_is_rejected() {
        let mut backend = HeadlessBackend::new();
        let call = DrawCall {
            index_count: 3,
            start_index: 0,
            base_vertex: 0,
            object_constants: &[],
        };
        assert!(matches!(
            backend.draw_indexed(&call),
            Err(RenderError::NoActiveFrame)
        ));
    }

    #[test]
    fn test_one_draw_per_live_item() {
        let world = world_with_two_items();
        let mut backend = HeadlessBackend::new();

        backend.begin_frame().unwrap();
        draw_render_items(&mut backend, &world).unwrap();
        backend.present().unwrap();

        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(backend.draws_this_frame(), 2);
    }

    #[test]
    fn test_marked_items_are_not_drawn() {
        let mut world = world_with_two_items();
        world.items_mut()[0].mark_removed();

        let mut backend = HeadlessBackend::new();
        backend.begin_frame().unwrap();
        draw_render_items(&mut backend, &world).unwrap();
        backend.present().unwrap();

        assert_eq!(backend.draws_total(), 1);
    }
}

//! Per-frame constant buffer feed
//!
//! Write-through upload of simulation state into GPU-visible buffers: every
//! render item's dedicated object block is rewritten every frame whether or
//! not its transform changed, and the single pass block is recomputed from
//! the camera, viewport, and timer.

use crate::foundation::math::{to_shader_array, Mat4};
use crate::foundation::time::Timer;
use crate::render::camera::{FreeCamera, Viewport};
use crate::render::constants::{ObjectConstants, PassConstants};
use crate::render::upload::UploadBuffer;
use crate::scene::world::SceneWorld;

/// Rewrite every item's object constant buffer from its world transform
pub fn upload_object_constants(world: &mut SceneWorld) {
    for item in world.items_mut() {
        let constants = ObjectConstants::from_world(&item.world);
        item.object_cb.copy_data(0, &constants);
    }
}

/// Owner of the per-pass constant buffer
#[derive(Debug)]
pub struct FrameFeed {
    pass_cb: UploadBuffer<PassConstants>,
}

impl Default for FrameFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFeed {
    /// Allocate the pass constant buffer
    pub fn new() -> Self {
        Self {
            pass_cb: UploadBuffer::<PassConstants>::new(1, true),
        }
    }

    /// Recompute and rewrite the full pass block for this frame
    pub fn upload_pass_constants(
        &mut self,
        camera: &FreeCamera,
        viewport: &Viewport,
        timer: &Timer,
    ) {
        let view = camera.view_matrix();
        let proj = viewport.projection_matrix();
        let view_proj = proj * view;

        let inverse = |m: &Mat4| m.try_inverse().unwrap_or_else(Mat4::identity);

        let constants = PassConstants {
            view: to_shader_array(&view),
            inv_view: to_shader_array(&inverse(&view)),
            proj: to_shader_array(&proj),
            inv_proj: to_shader_array(&inverse(&proj)),
            view_proj: to_shader_array(&view_proj),
            inv_view_proj: to_shader_array(&inverse(&view_proj)),
            eye_pos_w: [camera.position.x, camera.position.y, camera.position.z],
            cb_per_pass_pad1: 0.0,
            render_target_size: [viewport.width as f32, viewport.height as f32],
            inv_render_target_size: [
                1.0 / viewport.width as f32,
                1.0 / viewport.height as f32,
            ],
            near_z: viewport.near_z,
            far_z: viewport.far_z,
            total_time: timer.total_time(),
            delta_time: timer.delta_time(),
        };

        self.pass_cb.copy_data(0, &constants);
    }

    /// Read the current pass block back out of the buffer
    pub fn pass_constants(&self) -> PassConstants {
        self.pass_cb
            .read(0)
            .unwrap_or_else(PassConstants::default)
    }

    /// Raw bytes of the pass buffer for backend consumption
    pub fn pass_bytes(&self) -> &[u8] {
        self.pass_cb.element_bytes(0)
    }
}

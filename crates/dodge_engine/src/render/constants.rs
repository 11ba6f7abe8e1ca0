//! Constant buffer layouts
//!
//! Plain-old-data blocks copied verbatim into upload buffers each frame.
//! Field order and padding match the shader-side cbuffer declarations, so
//! these structs must stay `#[repr(C)]`.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{to_shader_array, Mat4};

/// Per-object constants, one dedicated buffer per render item
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    /// Transposed object transform; the view-projection factors are applied
    /// from the pass constants on the shader side.
    pub world_view_proj: [[f32; 4]; 4],
}

impl ObjectConstants {
    /// Build the block from an object's world transform
    pub fn from_world(world: &Mat4) -> Self {
        Self {
            world_view_proj: to_shader_array(world),
        }
    }
}

impl Default for ObjectConstants {
    fn default() -> Self {
        Self::from_world(&Mat4::identity())
    }
}

/// Per-pass constants, rewritten once per frame
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PassConstants {
    /// Transposed view matrix
    pub view: [[f32; 4]; 4],
    /// Transposed inverse view matrix
    pub inv_view: [[f32; 4]; 4],
    /// Transposed projection matrix
    pub proj: [[f32; 4]; 4],
    /// Transposed inverse projection matrix
    pub inv_proj: [[f32; 4]; 4],
    /// Transposed view-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// Transposed inverse view-projection matrix
    pub inv_view_proj: [[f32; 4]; 4],
    /// Camera position in world space
    pub eye_pos_w: [f32; 3],
    /// Padding to keep the following float2 pair aligned
    pub cb_per_pass_pad1: f32,
    /// Render target size in pixels
    pub render_target_size: [f32; 2],
    /// Reciprocal render target size
    pub inv_render_target_size: [f32; 2],
    /// Near clip distance
    pub near_z: f32,
    /// Far clip distance
    pub far_z: f32,
    /// Seconds since the app started
    pub total_time: f32,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

impl Default for PassConstants {
    fn default() -> Self {
        let identity = to_shader_array(&Mat4::identity());
        Self {
            view: identity,
            inv_view: identity,
            proj: identity,
            inv_proj: identity,
            view_proj: identity,
            inv_view_proj: identity,
            eye_pos_w: [0.0; 3],
            cb_per_pass_pad1: 0.0,
            render_target_size: [0.0; 2],
            inv_render_target_size: [0.0; 2],
            near_z: 0.0,
            far_z: 0.0,
            total_time: 0.0,
            delta_time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{translated, Vec3};

    #[test]
    fn test_object_constants_carry_transposed_world() {
        let world = translated(&Mat4::identity(), Vec3::new(1.0, 2.0, 3.0));
        let constants = ObjectConstants::from_world(&world);
        assert_eq!(constants.world_view_proj[0][3], 1.0);
        assert_eq!(constants.world_view_proj[1][3], 2.0);
        assert_eq!(constants.world_view_proj[2][3], 3.0);
    }

    #[test]
    fn test_pass_constants_are_pod() {
        // The pass block must have a stable byte size for the upload path
        let expected = 6 * 64 + 4 * 4 + 2 * 8 + 4 * 4;
        assert_eq!(std::mem::size_of::<PassConstants>(), expected);
        let constants = PassConstants::default();
        let bytes = bytemuck::bytes_of(&constants);
        assert_eq!(bytes.len(), expected);
    }
}

//! Free-look camera and viewport
//!
//! Movement is accumulated over a frame (strafe/walk deltas plus yaw/pitch
//! turns) and consumed by [`FreeCamera::apply_movement`]; view and
//! projection construction delegate to the standard helpers in
//! [`crate::foundation::math`].

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

const DEFAULT_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const DEFAULT_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Yaw/pitch free-look camera
#[derive(Debug, Clone)]
pub struct FreeCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Rotation around the world Y axis, radians
    pub yaw: f32,
    /// Rotation around the camera X axis, radians
    pub pitch: f32,
    move_left_right: f32,
    move_back_forward: f32,
}

impl FreeCamera {
    /// Create a camera at `position` looking down +Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            move_left_right: 0.0,
            move_back_forward: 0.0,
        }
    }

    /// Accumulate sideways movement for this frame
    pub fn strafe(&mut self, amount: f32) {
        self.move_left_right += amount;
    }

    /// Accumulate forward/backward movement for this frame
    pub fn walk(&mut self, amount: f32) {
        self.move_back_forward += amount;
    }

    /// Accumulate a turn
    pub fn turn(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
    }

    /// Consume the accumulated movement, displacing the camera along its
    /// yaw-rotated right and forward axes. Called once per frame.
    pub fn apply_movement(&mut self) {
        let yaw_rotation = Mat4::from_axis_angle(&Vec3::y_axis(), self.yaw);
        let right = yaw_rotation.transform_vector(&DEFAULT_RIGHT);
        let forward = yaw_rotation.transform_vector(&DEFAULT_FORWARD);

        self.position += self.move_left_right * right + self.move_back_forward * forward;
        self.move_left_right = 0.0;
        self.move_back_forward = 0.0;
    }

    /// Direction the camera looks along
    pub fn look_direction(&self) -> Vec3 {
        let rotation = Mat4::from_axis_angle(&Vec3::y_axis(), self.yaw)
            * Mat4::from_axis_angle(&Vec3::x_axis(), self.pitch);
        rotation.transform_vector(&DEFAULT_FORWARD).normalize()
    }

    /// View matrix for the current position and orientation
    pub fn view_matrix(&self) -> Mat4 {
        let target = self.position + self.look_direction();
        Mat4::look_at(self.position, target, WORLD_UP)
    }
}

impl Default for FreeCamera {
    fn default() -> Self {
        // The session starts four units behind the origin
        Self::new(Vec3::new(0.0, 0.0, -4.0))
    }
}

/// Render target dimensions and projection parameters
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Render target width in pixels
    pub width: u32,
    /// Render target height in pixels
    pub height: u32,
    /// Vertical field of view, radians
    pub fov_y: f32,
    /// Near clip distance
    pub near_z: f32,
    /// Far clip distance
    pub far_z: f32,
}

impl Viewport {
    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Perspective projection for this viewport
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect(), self.near_z, self.far_z)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_y: std::f32::consts::PI * 0.25,
            near_z: 1.0,
            far_z: 1000.0,
        }
    }
}

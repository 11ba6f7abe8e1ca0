//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the handful of matrix helpers the
//! simulation and constant-buffer feed need.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Extract the world-space position encoded in a transform's translation
/// column.
pub fn translation_of(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Apply a world-space translation to an existing transform.
///
/// The offset composes after the transform, so the result's position is the
/// input's position plus `offset` regardless of the input's rotation.
pub fn translated(m: &Mat4, offset: Vec3) -> Mat4 {
    Mat4::new_translation(&offset) * m
}

/// Column-major `[[f32; 4]; 4]` form of a matrix, transposed first.
///
/// Constant buffers are uploaded transposed so the shader side can consume
/// them without a per-vertex transpose.
pub fn to_shader_array(m: &Mat4) -> [[f32; 4]; 4] {
    m.transpose().into()
}

/// Extension trait for [`Mat4`] with standard view/projection constructors
pub trait Mat4Ext {
    /// Create a left-handed perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a left-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Left-handed, depth mapped to [0, 1]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = up.cross(&forward).normalize();
        let camera_up = forward.cross(&right);

        Mat4::new(
            right.x, right.y, right.z, -right.dot(&eye),
            camera_up.x, camera_up.y, camera_up.z, -camera_up.dot(&eye),
            forward.x, forward.y, forward.z, -forward.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_roundtrip() {
        let m = translated(&Mat4::identity(), Vec3::new(1.0, -2.0, 3.5));
        assert_relative_eq!(translation_of(&m), Vec3::new(1.0, -2.0, 3.5));
    }

    #[test]
    fn test_translated_ignores_rotation() {
        // A transform with rotation still moves along the world axis
        let rotated = Mat4::from_axis_angle(&Vec3::y_axis(), 1.2);
        let m = translated(&rotated, Vec3::new(0.0, 0.0, -0.01));
        assert_relative_eq!(translation_of(&m).z, -0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_shader_array_is_transposed() {
        let m = translated(&Mat4::identity(), Vec3::new(4.0, 5.0, 6.0));
        let arr = to_shader_array(&m);
        // nalgebra keeps translation in the last column; the transposed
        // array therefore carries it in the last row's first elements.
        assert_eq!(arr[0][3], 4.0);
        assert_eq!(arr[1][3], 5.0);
        assert_eq!(arr[2][3], 6.0);
    }

    #[test]
    fn test_look_at_centers_target() {
        let view = Mat4::look_at(
            Vec3::new(0.0, 0.0, -4.0),
            Vec3::zeros(),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let p = view.transform_point(&nalgebra::Point3::origin());
        // The target sits on the view axis, 4 units ahead
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_depth_range() {
        let proj = Mat4::perspective(deg_to_rad(45.0), 16.0 / 9.0, 1.0, 1000.0);
        let near = proj.transform_point(&nalgebra::Point3::new(0.0, 0.0, 1.0));
        let far = proj.transform_point(&nalgebra::Point3::new(0.0, 0.0, 1000.0));
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }
}

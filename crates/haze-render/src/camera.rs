//! Viewer camera for the surface pass.
//!
//! Uses the OpenGL clip convention (`-w <= z <= w`) so camera and light
//! passes share one rasterizer depth mapping.

use glam::{Mat4, Quat, Vec3};

/// A perspective camera that generates view and projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl Camera {
    /// Perspective camera posed by yaw/pitch in degrees.
    ///
    /// Yaw -90° with zero pitch looks down -Z; positive pitch looks up.
    pub fn from_yaw_pitch(
        position: Vec3,
        yaw_degrees: f32,
        pitch_degrees: f32,
        fov_y: f32,
        aspect_ratio: f32,
    ) -> Self {
        let pitch = pitch_degrees.clamp(-89.9, 89.9).to_radians();
        let yaw = yaw_degrees.to_radians();
        let rotation = Quat::from_rotation_y(-(yaw + std::f32::consts::FRAC_PI_2))
            * Quat::from_rotation_x(pitch);
        Self {
            position,
            rotation,
            fov_y,
            aspect_ratio,
            ..Self::default()
        }
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation);
        let translation_matrix = Mat4::from_translation(self.position);
        (translation_matrix * rotation_matrix).inverse()
    }

    /// Compute the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.3, 7.0),
            rotation: Quat::IDENTITY,
            fov_y: 70.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

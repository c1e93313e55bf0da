//! Spotlight description and its light-space (shadow) transform.
//!
//! The spotlight's beam is a soft cone around the axis from the light to a
//! target point. The same target drives the light-space view, so the depth map
//! always covers the beam.

use glam::{Mat4, Vec3};

use crate::math::smoothstep;

/// CPU-side spotlight descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    /// World-space position.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Direct light multiplier.
    pub power: f32,
    /// Cosine of the half-angle inside which the beam is at full intensity.
    pub cone_inner_cos: f32,
    /// Cosine of the half-angle outside which the beam is zero.
    pub cone_outer_cos: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.99, 0.0),
            color: Vec3::new(1.0, 0.9, 0.7),
            power: 4.5,
            cone_inner_cos: 0.970,
            cone_outer_cos: 0.95,
        }
    }
}

impl SpotLight {
    /// Unit cone axis from the light toward `target`.
    ///
    /// A target coincident with the light points the cone straight down.
    pub fn cone_axis(&self, target: Vec3) -> Vec3 {
        (target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y)
    }

    /// Angular falloff at `point` for a cone around `axis`, in `[0, 1]`.
    ///
    /// Zero outside the outer cone, one inside the inner cone, smooth in between.
    pub fn cone_falloff(&self, point: Vec3, axis: Vec3) -> f32 {
        let dir_from_light = (point - self.position).normalize_or_zero();
        smoothstep(
            self.cone_outer_cos,
            self.cone_inner_cos,
            dir_from_light.dot(axis),
        )
    }
}

/// Distance attenuation `1 / (1 + 0.1 d + 0.05 d²)`.
///
/// Equals 1 at the light and never reaches zero.
pub fn attenuation(distance: f32) -> f32 {
    1.0 / (1.0 + 0.1 * distance + 0.05 * distance * distance)
}

/// Cone target orbiting the room centre on the floor plane.
pub fn orbit_target(time_s: f32, speed: f32, radius: f32) -> Vec3 {
    let angle = time_s * speed;
    Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius)
}

/// Perspective frustum used for the light's depth map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightFrustum {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
}

impl Default for LightFrustum {
    fn default() -> Self {
        Self {
            fov_y: 45.0_f32.to_radians(),
            near: 0.1,
            far: 50.0,
        }
    }
}

/// Light-space view-projection, recomputed every frame as the target moves.
///
/// Uses the OpenGL clip convention (`-w <= z <= w`), so a projected point's
/// depth in `[0, 1]` is `ndc.z * 0.5 + 0.5`. The depth capture and the
/// visibility test both read this one value, keeping their near/far ranges
/// identical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSpaceTransform {
    view_proj: Mat4,
}

impl LightSpaceTransform {
    /// Look from `position` toward `target` through `frustum`.
    pub fn look_at(position: Vec3, target: Vec3, frustum: LightFrustum) -> Self {
        let dir = (target - position).try_normalize().unwrap_or(Vec3::NEG_Y);
        let up = if dir.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
        let view = Mat4::look_to_rh(position, dir, up);
        let proj = Mat4::perspective_rh_gl(frustum.fov_y, 1.0, frustum.near, frustum.far);
        Self {
            view_proj: proj * view,
        }
    }

    /// The combined projection × view matrix.
    pub fn matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Project a world point to normalized device coordinates.
    ///
    /// Returns `None` for points on or behind the light's eye plane.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

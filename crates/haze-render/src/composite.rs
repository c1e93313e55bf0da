//! Per-pixel surface lighting, fog compositing and debug visualizations.

use std::fmt;
use std::str::FromStr;

use glam::{Vec2, Vec3};
use haze_lighting::math::smoothstep;
use haze_lighting::{MediumParams, Occlusion, ScatteringContext, SpotLight, sample_offset};

use crate::error::RenderError;
use crate::frame::FrameSnapshot;
use crate::gbuffer::SurfaceSample;
use crate::mesh::Material;

/// Constant ambient term added to the medium's ambient floor on surfaces.
pub const BASE_AMBIENT: f32 = 0.1;

/// View distance mapped to the hot end of the depth heatmap.
pub const DEFAULT_HEATMAP_RANGE: f32 = 15.0;

/// What the composite writes to the color buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualizationMode {
    /// Lit surfaces through the fog.
    #[default]
    Normal,
    /// Grey ramp of the view-ray transmittance.
    TransmissionMap,
    /// Blue-to-red ramp of view distance.
    DepthHeatmap,
}

impl VisualizationMode {
    /// The next mode in the Normal → TransmissionMap → DepthHeatmap cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::TransmissionMap,
            Self::TransmissionMap => Self::DepthHeatmap,
            Self::DepthHeatmap => Self::Normal,
        }
    }
}

impl FromStr for VisualizationMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "0" => Ok(Self::Normal),
            "transmission" | "transmission_map" | "1" => Ok(Self::TransmissionMap),
            "depth" | "depth_heatmap" | "heatmap" | "2" => Ok(Self::DepthHeatmap),
            _ => Err(RenderError::UnknownVisualization(s.to_string())),
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::TransmissionMap => "transmission",
            Self::DepthHeatmap => "depth",
        })
    }
}

/// Lambert diffuse plus ambient for a lit surface.
///
/// The ambient term is `(BASE_AMBIENT + ambient_floor) * albedo`, so raising the
/// fog's ambient floor also lifts surfaces.
pub fn surface_response(
    albedo: Vec3,
    normal: Vec3,
    position: Vec3,
    light: &SpotLight,
    ambient_floor: f32,
) -> Vec3 {
    let ambient = (BASE_AMBIENT + ambient_floor) * albedo;
    let to_light = (light.position - position).normalize_or_zero();
    let diffuse = normal.dot(to_light).max(0.0) * light.color * albedo;
    ambient + diffuse
}

/// Four-color ramp over `t` in `[0, 1]`: half-intensity blue, blue, red, half-intensity red.
///
/// Green peaks at the midpoint. `t = 0` is `(0, 0, 0.5)` and `t = 1` is `(0.5, 0, 0)`.
pub fn heatmap(t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    (Vec3::splat(1.5) - (Vec3::splat(4.0 * t) + Vec3::new(-3.0, -2.0, -1.0)).abs())
        .clamp(Vec3::ZERO, Vec3::ONE)
}

/// Grey level shown for a view-ray transmittance.
pub fn transmission_view(transmittance: f32) -> Vec3 {
    Vec3::splat(smoothstep(0.4, 1.0, transmittance))
}

/// One pixel's composite inputs, kept so every visualization can be resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Composite {
    /// `surface * transmittance + fog`.
    pub color: Vec3,
    pub surface: Vec3,
    pub fog: Vec3,
    /// `exp(-ray_length * extinction)`.
    pub transmittance: f32,
    pub ray_length: f32,
}

impl Composite {
    /// Color written for `mode`.
    pub fn resolve(&self, mode: VisualizationMode, heatmap_range: f32) -> Vec3 {
        match mode {
            VisualizationMode::Normal => self.color,
            VisualizationMode::TransmissionMap => transmission_view(self.transmittance),
            VisualizationMode::DepthHeatmap => {
                let range = if heatmap_range > 0.0 {
                    heatmap_range
                } else {
                    DEFAULT_HEATMAP_RANGE
                };
                heatmap(self.ray_length / range)
            }
        }
    }
}

/// Attenuate `surface` over `ray_length` through `medium` and add the in-scattered `fog`.
pub fn composite_surface(
    surface: Vec3,
    fog: Vec3,
    ray_length: f32,
    medium: &MediumParams,
) -> Composite {
    let transmittance = medium.transmittance(ray_length);
    Composite {
        color: surface * transmittance + fog,
        surface,
        fog,
        transmittance,
        ray_length,
    }
}

/// Final color of one pixel whose nearest surface is `sample`.
///
/// Emissive surfaces are written unchanged in every mode.
pub fn shade_pixel<O: Occlusion>(
    snapshot: &FrameSnapshot,
    ctx: &ScatteringContext<'_, O>,
    sample: &SurfaceSample,
    frag_coord: Vec2,
) -> Vec3 {
    let albedo = match sample.material {
        Material::Emissive { color } => return color,
        Material::Lit { albedo } => albedo,
    };

    let medium = ctx.medium();
    let to_surface = sample.position - snapshot.view_position;
    let ray_length = to_surface.length();
    let ray_dir = to_surface.normalize_or_zero();

    let offset = sample_offset(medium.dithering, frag_coord);
    let fog = ctx.radiance(snapshot.view_position, ray_dir, ray_length, offset);
    let surface = surface_response(
        albedo,
        sample.normal,
        sample.position,
        &snapshot.light,
        medium.ambient_floor,
    );

    composite_surface(surface, fog, ray_length, medium)
        .resolve(snapshot.mode, snapshot.heatmap_range)
}

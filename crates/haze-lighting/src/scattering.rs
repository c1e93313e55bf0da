//! Single-scattering ray march through a homogeneous medium lit by the spotlight.
//!
//! The view segment is split into `N` equal steps. Each step adds the light
//! scattered toward the viewer at one sample inside it, weighted by the
//! transmittance of all strictly earlier steps (Beer–Lambert), then applies
//! its own extinction. This is a midpoint-rule (or jittered) Riemann sum of
//! the in-scattering integral.

use glam::{Vec2, Vec3};

use crate::math::fract;
use crate::medium::MediumParams;
use crate::spot::{SpotLight, attenuation};

/// Binary-ish light visibility at a world point, `0.0` (occluded) to `1.0` (lit).
pub trait Occlusion {
    /// Visibility of `world` from the light.
    fn visibility(&self, world: Vec3) -> f32;
}

/// Occlusion that never blocks light.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unoccluded;

impl Occlusion for Unoccluded {
    fn visibility(&self, _world: Vec3) -> f32 {
        1.0
    }
}

/// Interleaved gradient noise of a fragment coordinate, in `[0, 1)`.
///
/// Deterministic: the same coordinate always yields the same value.
pub fn interleaved_gradient_noise(frag_coord: Vec2) -> f32 {
    const MAGIC: Vec3 = Vec3::new(0.067_110_56, 0.005_837_15, 52.982_918_9);
    fract(MAGIC.z * fract(frag_coord.dot(Vec2::new(MAGIC.x, MAGIC.y))))
}

/// Sub-step sample offset in `[0, 1)`: the step midpoint when dithering is
/// off, per-pixel noise when it is on.
pub fn sample_offset(dithering: bool, frag_coord: Vec2) -> f32 {
    if dithering {
        interleaved_gradient_noise(frag_coord)
    } else {
        0.5
    }
}

/// Accumulators of one march, local to a single pixel evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchState {
    /// Position of the most recent sample (the ray start before any step).
    pub position: Vec3,
    /// In-scattered radiance gathered so far.
    pub radiance: Vec3,
    /// Transmittance through every step taken so far.
    pub transmittance: f32,
}

impl MarchState {
    fn start(origin: Vec3) -> Self {
        Self {
            position: origin,
            radiance: Vec3::ZERO,
            transmittance: 1.0,
        }
    }
}

/// Read-only inputs shared by every march of a frame.
#[derive(Clone, Copy, Debug)]
pub struct ScatteringContext<'a, O> {
    medium: &'a MediumParams,
    light: &'a SpotLight,
    cone_axis: Vec3,
    occlusion: &'a O,
}

impl<'a, O: Occlusion> ScatteringContext<'a, O> {
    /// Bind the medium, the spotlight aimed at `cone_target`, and an occlusion source.
    pub fn new(
        medium: &'a MediumParams,
        light: &'a SpotLight,
        cone_target: Vec3,
        occlusion: &'a O,
    ) -> Self {
        Self {
            medium,
            light,
            cone_axis: light.cone_axis(cone_target),
            occlusion,
        }
    }

    /// The medium this context marches through.
    pub fn medium(&self) -> &MediumParams {
        self.medium
    }

    /// Light scattered toward the viewer per unit density at `point`:
    /// the uniform ambient floor plus the shadowed, attenuated cone term.
    pub fn in_scattered(&self, point: Vec3) -> Vec3 {
        let ambient = self.light.color * self.medium.ambient_floor;

        let falloff = self.light.cone_falloff(point, self.cone_axis);
        if falloff <= 0.0 {
            return ambient;
        }
        let visibility = self.occlusion.visibility(point);
        let distance = (self.light.position - point).length();
        let direct =
            self.light.color * self.light.power * attenuation(distance) * falloff * visibility;
        ambient + direct
    }

    /// March `ray_len` units from `ray_start` along unit `ray_dir`.
    ///
    /// `offset` places each sample inside its step (`0.5` = midpoint). A
    /// negative or non-finite length marches nothing and returns zero
    /// radiance with full transmittance.
    pub fn march(&self, ray_start: Vec3, ray_dir: Vec3, ray_len: f32, offset: f32) -> MarchState {
        let mut state = MarchState::start(ray_start);
        let ray_len = if ray_len.is_finite() { ray_len.max(0.0) } else { 0.0 };
        if ray_len == 0.0 {
            return state;
        }

        let samples = self.medium.effective_samples();
        let step_size = ray_len / samples as f32;
        let scattering = self.medium.density * step_size;
        let step_transmittance = (-scattering).exp();

        for i in 0..samples {
            let t = step_size * (i as f32 + offset);
            state.position = ray_start + ray_dir * t;
            state.radiance +=
                self.in_scattered(state.position) * scattering * state.transmittance;
            state.transmittance *= step_transmittance;
        }
        state
    }

    /// Accumulated in-scattered radiance along the ray.
    pub fn radiance(&self, ray_start: Vec3, ray_dir: Vec3, ray_len: f32, offset: f32) -> Vec3 {
        self.march(ray_start, ray_dir, ray_len, offset).radiance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_medium(samples: u32) -> MediumParams {
        MediumParams {
            density: 1.0,
            extinction: 0.1,
            ambient_floor: 0.02,
            sample_count: samples,
            dithering: false,
            shadow_bias: 0.005,
        }
    }

    fn dark_light() -> SpotLight {
        SpotLight {
            power: 0.0,
            ..SpotLight::default()
        }
    }

    /// Every other point in space is occluded; used to prove the visibility term is applied.
    struct Blocked;

    impl Occlusion for Blocked {
        fn visibility(&self, _world: Vec3) -> f32 {
            0.0
        }
    }

    #[test]
    fn test_transmittance_matches_beer_lambert() {
        let light = SpotLight::default();
        for &(density, length) in &[(1.0_f32, 5.0_f32), (0.3, 2.0), (2.5, 0.7)] {
            for &samples in &[8_u32, 256] {
                let medium = MediumParams {
                    density,
                    ..reference_medium(samples)
                };
                let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
                let state = ctx.march(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, length, 0.5);
                let expected = (-density * length).exp();
                assert!(
                    (state.transmittance - expected).abs() < 1e-4,
                    "d={density} L={length} N={samples}: {} vs {expected}",
                    state.transmittance
                );
            }
        }
    }

    #[test]
    fn test_ambient_radiance_converges_with_sample_count() {
        let light = dark_light();
        let exact = light.color * 0.02 * (1.0 - (-5.0_f32).exp());

        let error = |samples: u32| {
            let medium = reference_medium(samples);
            let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
            let radiance = ctx.radiance(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, 5.0, 0.5);
            ((radiance - exact).length() / exact.length()).abs()
        };

        let coarse = error(8);
        let fine = error(256);
        assert!(fine < coarse);
        assert!(fine < 0.02, "relative error at N=256: {fine}");
    }

    #[test]
    fn test_zero_length_ray_contributes_nothing() {
        let medium = reference_medium(64);
        let light = SpotLight::default();
        let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
        for len in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let state = ctx.march(Vec3::ONE, Vec3::NEG_Y, len, 0.5);
            assert_eq!(state.radiance, Vec3::ZERO);
            assert_eq!(state.transmittance, 1.0);
        }
    }

    #[test]
    fn test_zero_sample_count_marches_once() {
        let light = dark_light();
        let medium = reference_medium(0);
        let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
        let state = ctx.march(Vec3::ZERO, Vec3::X, 2.0, 0.5);
        assert!(state.radiance.is_finite());
        assert!((state.transmittance - (-2.0_f32).exp()).abs() < 1e-6);
        assert!((state.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_dithering_disabled_is_pixel_independent() {
        let medium = reference_medium(64);
        let light = SpotLight::default();
        let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
        let start = Vec3::new(0.0, 1.3, 3.0);
        let dir = (Vec3::new(0.0, 0.2, 0.0) - start).normalize();

        let a = ctx.radiance(start, dir, 4.0, sample_offset(false, Vec2::new(10.5, 20.5)));
        let b = ctx.radiance(start, dir, 4.0, sample_offset(false, Vec2::new(611.5, 3.5)));
        assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
    }

    #[test]
    fn test_dither_offset_is_deterministic_and_in_range() {
        for y in 0..32 {
            for x in 0..32 {
                let frag = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let first = sample_offset(true, frag);
                let second = sample_offset(true, frag);
                assert_eq!(first.to_bits(), second.to_bits());
                assert!((0.0..1.0).contains(&first));
            }
        }
    }

    #[test]
    fn test_dither_offset_varies_between_pixels() {
        let a = interleaved_gradient_noise(Vec2::new(0.5, 0.5));
        let b = interleaved_gradient_noise(Vec2::new(1.5, 0.5));
        let c = interleaved_gradient_noise(Vec2::new(0.5, 1.5));
        assert!(a != b && a != c);
    }

    #[test]
    fn test_direct_term_adds_to_ambient_on_cone_axis() {
        let light = SpotLight::default();
        let medium = reference_medium(64);
        let axis = Vec3::NEG_Y;

        let lit = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded)
            .radiance(light.position, axis, 5.0, 0.5);

        let dark = dark_light();
        let ambient_only = ScatteringContext::new(&medium, &dark, Vec3::ZERO, &Unoccluded)
            .radiance(dark.position, axis, 5.0, 0.5);

        assert!(lit.x > ambient_only.x && lit.y > ambient_only.y && lit.z > ambient_only.z);
        assert!(ambient_only.min_element() > 0.0);
    }

    #[test]
    fn test_occlusion_removes_direct_term() {
        let light = SpotLight::default();
        let medium = reference_medium(32);
        let blocked = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Blocked)
            .radiance(light.position, Vec3::NEG_Y, 2.0, 0.5);

        let dark = dark_light();
        let ambient_only = ScatteringContext::new(&medium, &dark, Vec3::ZERO, &Unoccluded)
            .radiance(dark.position, Vec3::NEG_Y, 2.0, 0.5);
        assert!((blocked - ambient_only).length() < 1e-6);
    }

    #[test]
    fn test_ambient_floor_monotonic_fog() {
        let light = SpotLight::default();
        let start = Vec3::new(0.0, 1.3, 7.0);
        let mut prev = Vec3::splat(-1.0);
        for step in 0..6 {
            let medium = MediumParams {
                ambient_floor: step as f32 * 0.01,
                ..reference_medium(32)
            };
            let radiance = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded)
                .radiance(start, Vec3::NEG_Z, 6.0, 0.5);
            assert!(radiance.cmpgt(prev).all());
            prev = radiance;
        }
    }

    #[test]
    fn test_in_scattered_outside_cone_is_ambient_only() {
        let light = SpotLight::default();
        let medium = reference_medium(1);
        let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Blocked);
        let outside = Vec3::new(1.9, 0.1, 1.9);
        assert_eq!(ctx.in_scattered(outside), light.color * 0.02);
    }
}

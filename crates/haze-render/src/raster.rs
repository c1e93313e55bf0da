//! Scanline-free triangle rasterizer shared by the light and camera passes.
//!
//! Triangles arrive in GL clip space. They are clipped against the near plane,
//! mapped to a y-up pixel grid (row 0 at the bottom), optionally back-face
//! culled, and depth tested with LESS. Attributes are interpolated
//! perspective-correctly at pixel centres.

use glam::{Vec2, Vec3, Vec4};

/// A transformed vertex with the attributes the passes interpolate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClipVertex {
    /// Clip-space position (`-w <= z <= w` inside the frustum).
    pub clip: Vec4,
    /// World-space position.
    pub world: Vec3,
    /// World-space normal (not renormalized by the rasterizer).
    pub normal: Vec3,
}

impl ClipVertex {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            clip: self.clip.lerp(other.clip, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }

    /// Signed distance to the near plane in clip space; negative is clipped.
    fn near_distance(&self) -> f32 {
        self.clip.z + self.clip.w
    }
}

/// Which triangles are discarded before rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Draw both windings.
    None,
    /// Discard triangles wound clockwise on screen.
    #[default]
    Back,
}

impl CullMode {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Back } else { Self::None }
    }
}

/// A fragment that passed the depth test.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    /// Row-major index into the target (`y * width + x`).
    pub index: usize,
    pub x: u32,
    pub y: u32,
    /// Window-space depth in `[0, 1]`.
    pub depth: f32,
    pub world: Vec3,
    pub normal: Vec3,
}

struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    inv_w: f32,
}

/// Rasterizes into caller-owned depth storage of `width * height` texels.
#[derive(Clone, Copy, Debug)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    cull: CullMode,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, cull: CullMode) -> Self {
        Self {
            width,
            height,
            cull,
        }
    }

    /// Rasterize one triangle, calling `on_fragment` for every depth write.
    ///
    /// Returns the number of fragments written. `depth` must hold at least
    /// `width * height` values.
    pub fn draw_triangle(
        &self,
        tri: &[ClipVertex; 3],
        depth: &mut [f32],
        mut on_fragment: impl FnMut(&Fragment),
    ) -> usize {
        if tri.iter().any(|v| !v.clip.is_finite()) {
            return 0;
        }
        let (poly, len) = clip_near(tri);
        let mut written = 0;
        for k in 1..len.saturating_sub(1) {
            written += self.draw_clipped([poly[0], poly[k], poly[k + 1]], depth, &mut on_fragment);
        }
        written
    }

    fn to_screen(&self, v: &ClipVertex) -> Option<ScreenVertex> {
        if v.clip.w <= f32::EPSILON {
            return None;
        }
        let inv_w = 1.0 / v.clip.w;
        let ndc = v.clip.truncate() * inv_w;
        Some(ScreenVertex {
            pos: Vec2::new(
                (ndc.x * 0.5 + 0.5) * self.width as f32,
                (ndc.y * 0.5 + 0.5) * self.height as f32,
            ),
            depth: ndc.z * 0.5 + 0.5,
            inv_w,
        })
    }

    fn draw_clipped(
        &self,
        mut tri: [ClipVertex; 3],
        depth: &mut [f32],
        on_fragment: &mut impl FnMut(&Fragment),
    ) -> usize {
        let (Some(s0), Some(mut s1), Some(mut s2)) = (
            self.to_screen(&tri[0]),
            self.to_screen(&tri[1]),
            self.to_screen(&tri[2]),
        ) else {
            return 0;
        };

        let mut area = edge(s0.pos, s1.pos, s2.pos);
        if area == 0.0 || !area.is_finite() {
            return 0;
        }
        if area < 0.0 {
            if self.cull == CullMode::Back {
                return 0;
            }
            std::mem::swap(&mut s1, &mut s2);
            tri.swap(1, 2);
            area = -area;
        }

        let min = s0.pos.min(s1.pos).min(s2.pos);
        let max = s0.pos.max(s1.pos).max(s2.pos);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        let inv_area = 1.0 / area;
        let mut written = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let b0 = edge(s1.pos, s2.pos, p) * inv_area;
                let b1 = edge(s2.pos, s0.pos, p) * inv_area;
                let b2 = edge(s0.pos, s1.pos, p) * inv_area;
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                let z = b0 * s0.depth + b1 * s1.depth + b2 * s2.depth;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }
                let index = (y * self.width + x) as usize;
                if z >= depth[index] {
                    continue;
                }
                depth[index] = z;

                let w0 = b0 * s0.inv_w;
                let w1 = b1 * s1.inv_w;
                let w2 = b2 * s2.inv_w;
                let norm = 1.0 / (w0 + w1 + w2);
                let (w0, w1, w2) = (w0 * norm, w1 * norm, w2 * norm);

                on_fragment(&Fragment {
                    index,
                    x,
                    y,
                    depth: z,
                    world: tri[0].world * w0 + tri[1].world * w1 + tri[2].world * w2,
                    normal: tri[0].normal * w0 + tri[1].normal * w1 + tri[2].normal * w2,
                });
                written += 1;
            }
        }
        written
    }
}

/// Twice the signed area of `a b c`; positive when counter-clockwise (y up).
fn edge(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Clip a triangle against `z >= -w`, yielding a polygon of up to four vertices.
fn clip_near(tri: &[ClipVertex; 3]) -> ([ClipVertex; 4], usize) {
    let mut out = [ClipVertex::default(); 4];
    let mut len = 0;
    for i in 0..3 {
        let a = &tri[i];
        let b = &tri[(i + 1) % 3];
        let da = a.near_distance();
        let db = b.near_distance();
        if da >= 0.0 {
            out[len] = *a;
            len += 1;
        }
        if (da >= 0.0) != (db >= 0.0) {
            out[len] = a.lerp(b, da / (da - db));
            len += 1;
        }
    }
    (out, len)
}

//! The demo room: a 4×2×4 box with a skylight window and five cubes.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use haze_render::{Material, Mesh, Scene};

const ROOM_HALF: f32 = 2.0;
const ROOM_HEIGHT: f32 = 2.0;
const WINDOW_HALF: f32 = 0.5;
const SKY_HEIGHT: f32 = 1.99;

const FLOOR_ALBEDO: Vec3 = Vec3::new(0.35, 0.35, 0.4);
const WALL_ALBEDO: Vec3 = Vec3::new(0.4, 0.4, 0.45);

/// Floor-plane position, edge length and albedo of one cube.
struct CubePlacement {
    x: f32,
    z: f32,
    size: f32,
    albedo: Vec3,
}

const CUBES: [CubePlacement; 5] = [
    CubePlacement {
        x: -1.0,
        z: -1.0,
        size: 0.5,
        albedo: Vec3::new(0.7, 0.4, 0.3),
    },
    CubePlacement {
        x: 1.2,
        z: 0.5,
        size: 0.5,
        albedo: Vec3::new(0.3, 0.7, 0.4),
    },
    CubePlacement {
        x: -0.5,
        z: 0.8,
        size: 0.4,
        albedo: Vec3::new(0.5, 0.5, 0.8),
    },
    CubePlacement {
        x: 0.7,
        z: -1.2,
        size: 0.4,
        albedo: Vec3::new(0.9, 0.9, 0.5),
    },
    CubePlacement {
        x: 0.2,
        z: -0.2,
        size: 0.5,
        albedo: Vec3::new(0.6, 0.4, 0.8),
    },
];

/// Build the room. The sky patch glows with `sky_color`.
pub fn build_room(sky_color: Vec3) -> Scene {
    let (h, top, w) = (ROOM_HALF, ROOM_HEIGHT, WINDOW_HALF);
    let v = Vec3::new;

    let mut floor = Mesh::quad(
        v(-h, 0.0, -h),
        v(h, 0.0, -h),
        v(h, 0.0, h),
        v(-h, 0.0, h),
        Vec3::Y,
    );
    // Ceiling: four panels framing the window opening.
    for (a, b, c, d) in [
        (v(-h, top, w), v(h, top, w), v(h, top, h), v(-h, top, h)),
        (v(-h, top, -h), v(h, top, -h), v(h, top, -w), v(-h, top, -w)),
        (v(-h, top, -w), v(-h, top, w), v(-w, top, w), v(-w, top, -w)),
        (v(w, top, -w), v(w, top, w), v(h, top, w), v(h, top, -w)),
    ] {
        floor.append(Mesh::quad(a, b, c, d, Vec3::NEG_Y));
    }

    let mut walls = Mesh::quad(
        v(-h, 0.0, h),
        v(h, 0.0, h),
        v(h, top, h),
        v(-h, top, h),
        Vec3::NEG_Z,
    );
    walls.append(Mesh::quad(
        v(-h, 0.0, -h),
        v(-h, 0.0, h),
        v(-h, top, h),
        v(-h, top, -h),
        Vec3::X,
    ));
    walls.append(Mesh::quad(
        v(h, 0.0, h),
        v(h, 0.0, -h),
        v(h, top, -h),
        v(h, top, h),
        Vec3::NEG_X,
    ));

    let sky = Mesh::quad(
        v(-w, SKY_HEIGHT, -w),
        v(w, SKY_HEIGHT, -w),
        v(w, SKY_HEIGHT, w),
        v(-w, SKY_HEIGHT, w),
        Vec3::NEG_Y,
    );

    let mut scene = Scene::new();
    scene.push(
        Arc::new(floor),
        Mat4::IDENTITY,
        Material::Lit {
            albedo: FLOOR_ALBEDO,
        },
    );
    scene.push(
        Arc::new(walls),
        Mat4::IDENTITY,
        Material::Lit {
            albedo: WALL_ALBEDO,
        },
    );
    scene.push(
        Arc::new(sky),
        Mat4::IDENTITY,
        Material::Emissive { color: sky_color },
    );

    let cube = Arc::new(Mesh::cube());
    for placement in &CUBES {
        let model = Mat4::from_translation(v(placement.x, placement.size / 2.0, placement.z))
            * Mat4::from_scale(Vec3::splat(placement.size));
        scene.push(
            cube.clone(),
            model,
            Material::Lit {
                albedo: placement.albedo,
            },
        );
    }
    scene
}

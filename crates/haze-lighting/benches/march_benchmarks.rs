use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Vec2, Vec3};
use haze_lighting::*;

fn bench_march_unoccluded(c: &mut Criterion) {
    let medium = MediumParams::default();
    let light = SpotLight::default();
    let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &Unoccluded);
    let start = black_box(Vec3::new(0.0, 1.3, 7.0));
    let dir = black_box(Vec3::new(0.0, -0.2, -1.0).normalize());
    c.bench_function("march_64_unoccluded", |bencher| {
        bencher.iter(|| black_box(ctx.radiance(start, dir, 8.0, 0.5)))
    });
}

fn bench_march_shadowed(c: &mut Criterion) {
    let medium = MediumParams::default();
    let light = SpotLight::default();
    let transform =
        LightSpaceTransform::look_at(light.position, Vec3::ZERO, LightFrustum::default());
    let map = ShadowMap::new(1024).unwrap();
    let sampler = ShadowSampler::new(&map, &transform, medium.shadow_bias);
    let ctx = ScatteringContext::new(&medium, &light, Vec3::ZERO, &sampler);
    let start = black_box(Vec3::new(0.0, 1.3, 7.0));
    let dir = black_box((Vec3::new(0.0, 0.2, 0.0) - start).normalize());
    c.bench_function("march_64_shadowed", |bencher| {
        bencher.iter(|| black_box(ctx.radiance(start, dir, 7.2, 0.5)))
    });
}

fn bench_interleaved_gradient_noise(c: &mut Criterion) {
    let frag = black_box(Vec2::new(317.5, 211.5));
    c.bench_function("interleaved_gradient_noise", |bencher| {
        bencher.iter(|| black_box(interleaved_gradient_noise(frag)))
    });
}

criterion_group!(
    benches,
    bench_march_unoccluded,
    bench_march_shadowed,
    bench_interleaved_gradient_noise
);
criterion_main!(benches);

//! Benchmark for the dispersion draw and sync codec.

use bevy::prelude::*;
use bevy_muzzleloader::sync::{decode_fire_geometry, encode_fire_geometry};
use bevy_muzzleloader::systems::dispersion;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_dispersion(c: &mut Criterion) {
    let base_std = 0.4_f32.to_radians();

    c.bench_function("Dispersion Std", |b| {
        b.iter(|| dispersion::dispersion_std(0.35, base_std, 3.0));
    });

    c.bench_function("Perturb Direction", |b| {
        let mut rng = StdRng::seed_from_u64(12345);
        let direction = Vec3::NEG_Z;

        b.iter(|| dispersion::perturb_direction(direction, base_std, &mut rng));
    });
}

fn benchmark_fire_geometry_codec(c: &mut Criterion) {
    let origin = Vec3::new(102.5, 64.0, -903.25);
    let direction = Vec3::new(-0.5, 0.125, 0.866);
    let payload = encode_fire_geometry(origin, direction);

    c.bench_function("Encode Fire Geometry", |b| {
        b.iter(|| encode_fire_geometry(origin, direction));
    });

    c.bench_function("Decode Fire Geometry", |b| {
        b.iter(|| decode_fire_geometry(&payload));
    });
}

criterion_group!(benches, benchmark_dispersion, benchmark_fire_geometry_codec);
criterion_main!(benches);

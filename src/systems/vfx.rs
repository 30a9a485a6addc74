//! VFX system - pooled muzzle-smoke bursts.
//!
//! Cosmetic only. A burst is the same whether it comes from the local fire
//! mirror or from a decoded peer payload: both paths feed
//! [`crate::events::SmokeBurstEvent`] and end up here.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::components::SmokeParticle;
use crate::events::SmokeBurstEvent;
use crate::resources::{MuzzleloaderAssets, MuzzleloaderConfig, ShotRng, SmokePool};
use crate::systems::state::TICKS_PER_SECOND;

/// Particle lifetime (seconds).
const SMOKE_LIFETIME: f32 = 0.8;

/// Per-tick outward speed factor at the muzzle end of the cone.
const SMOKE_SPEED: f32 = 0.1;

const SMOKE_SCALE: f32 = 0.08;

/// Position and per-tick velocity of one burst particle at sample `t`.
///
/// Particles sit along the firing ray at distance `0.5 + t` with outward
/// velocity falling off as `1 - t`: near particles drift fast, far ones
/// hang, producing a dissipating cone. Pure and shared so the authoritative
/// and presentation sides derive identical burst geometry.
pub fn smoke_particle(origin: Vec3, direction: Vec3, t: f32) -> (Vec3, Vec3) {
    let position = origin + direction * (0.5 + t);
    let velocity = direction * SMOKE_SPEED * (1.0 - t);
    (position, velocity)
}

/// Spawn the particles for each requested burst, reusing pooled entities.
pub fn spawn_smoke_bursts(
    mut commands: Commands,
    mut bursts: MessageReader<SmokeBurstEvent>,
    config: Res<MuzzleloaderConfig>,
    assets: Res<MuzzleloaderAssets>,
    mut pool: ResMut<SmokePool>,
    mut rng: ResMut<ShotRng>,
) {
    for burst in bursts.read() {
        for _ in 0..config.smoke_particle_count {
            let t: f32 = rng.0.random();
            let (position, velocity) = smoke_particle(burst.origin, burst.direction, t);
            let bundle = (
                Mesh3d(assets.smoke_mesh.clone()),
                MeshMaterial3d(assets.smoke_material.clone()),
                Transform::from_translation(position).with_scale(Vec3::splat(SMOKE_SCALE)),
                Visibility::Visible,
                SmokeParticle {
                    lifetime: SMOKE_LIFETIME,
                    // Stored per second for frame-rate-independent drift.
                    velocity: velocity * TICKS_PER_SECOND,
                },
            );
            if let Some(entity) = pool.get() {
                commands.entity(entity).insert(bundle);
            } else {
                commands.spawn(bundle);
            }
        }
    }
}

/// Drift particles and return expired ones to the pool.
pub fn update_smoke_particles(
    time: Res<Time>,
    mut pool: ResMut<SmokePool>,
    mut particles: Query<(Entity, &mut SmokeParticle, &mut Transform, &mut Visibility)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut visibility) in particles.iter_mut() {
        // Hidden particles are already back in the pool; releasing them
        // again would hand the same entity out twice.
        if *visibility == Visibility::Hidden {
            continue;
        }
        particle.lifetime -= dt;
        if particle.lifetime <= 0.0 {
            *visibility = Visibility::Hidden;
            pool.release(entity);
            continue;
        }
        transform.translation += particle.velocity * dt;
    }
}

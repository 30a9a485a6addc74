//! Global resources for the muzzleloader system.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which half of the simulation this app instance runs.
///
/// The authoritative side owns every gameplay-affecting transition: ammo
/// consumption, projectile spawning, durability. The presentation side only
/// mirrors the use/release signal into local flag updates and cosmetic
/// effects, and never blocks on the authoritative side.
#[derive(Resource, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum NetworkSide {
    /// Authoritative simulation (server, or single-player host)
    #[default]
    Simulation,
    /// Non-authoritative mirror (client rendering its own player's actions)
    Presentation,
}

/// Injected tuning for the weapon state machine and ballistics.
///
/// All timing is in fixed-update ticks at 20 ticks per second, matching the
/// tick units the state machine counts in. Replaces what would otherwise be
/// scattered global constants, so hosts can retune without recompiling.
///
/// # Example
/// ```
/// use bevy_muzzleloader::resources::MuzzleloaderConfig;
///
/// let config = MuzzleloaderConfig {
///     reload_duration_ticks: 40, // slower reload variant
///     ..Default::default()
/// };
/// assert_eq!(config.aim_duration_ticks, 20);
/// ```
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct MuzzleloaderConfig {
    /// Ticks of continuous use before loading can complete
    pub reload_duration_ticks: u32,
    /// Ticks of aim needed to reach full accuracy
    pub aim_duration_ticks: u32,
    /// Use-duration reported to the host's countdown (effectively unbounded;
    /// the real limit is the player releasing the button)
    pub use_duration_ticks: u32,
    /// Durability damage at which the weapon breaks
    pub max_damage: u32,
    /// Projectile muzzle velocity (units per tick)
    pub muzzle_velocity: f32,
    /// Angular standard deviation of a fully-aimed shot (radians)
    pub base_dispersion_std: f32,
    /// Snap-fire dispersion penalty: a `t = 0` shot is this many times
    /// less accurate than a fully-aimed one
    pub dispersion_multiplier: f32,
    /// Particles per cosmetic muzzle-smoke burst
    pub smoke_particle_count: u32,
}

impl Default for MuzzleloaderConfig {
    /// Default tuning: 1.5 s reload, 1 s aim, 250 durability,
    /// 0.4° base dispersion with a 3x snap-fire penalty.
    fn default() -> Self {
        Self {
            reload_duration_ticks: 30,
            aim_duration_ticks: 20,
            use_duration_ticks: 72000,
            max_damage: 250,
            muzzle_velocity: 11.0,
            base_dispersion_std: 0.4 * std::f32::consts::PI / 180.0,
            dispersion_multiplier: 3.0,
            smoke_particle_count: 10,
        }
    }
}

/// RNG used for the per-shot dispersion draw and smoke scatter.
///
/// Seeded from the OS by default; tests reseed it for determinism.
#[derive(Resource)]
pub struct ShotRng(pub StdRng);

impl FromWorld for ShotRng {
    fn from_world(_world: &mut World) -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl ShotRng {
    /// Reseeds the generator, making subsequent draws deterministic.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = StdRng::seed_from_u64(seed);
    }
}

/// Pool of hidden smoke-particle entities available for reuse.
///
/// Bursts are short-lived and frequent, so expired particles are hidden and
/// recycled instead of despawned.
#[derive(Resource, Default)]
pub struct SmokePool {
    available: Vec<Entity>,
}

impl SmokePool {
    /// Takes a pooled entity if one is available.
    pub fn get(&mut self) -> Option<Entity> {
        self.available.pop()
    }

    /// Returns an expired particle entity to the pool.
    pub fn release(&mut self, entity: Entity) {
        self.available.push(entity);
    }
}

/// Mesh and material handles shared by all smoke particles.
#[derive(Resource, Default)]
pub struct MuzzleloaderAssets {
    pub smoke_mesh: Handle<Mesh>,
    pub smoke_material: Handle<StandardMaterial>,
}

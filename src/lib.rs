//! # Bevy Muzzleloader
//!
//! Muzzle-loaded firearm mechanic for Bevy 0.18.
//!
//! ## Features
//! - Multi-stage load/aim/fire state machine per weapon stack
//! - Accuracy dispersion tied to aim duration (snap-fire penalty)
//! - Ammo resolution and consumption with exemption support
//! - Dual-wield fast path for alternating two readied weapons
//! - Authoritative/presentation split with synchronized fire effects
//! - 24-byte fire-geometry wire codec for bystander clients
//! - Pooled cosmetic muzzle-smoke bursts
//!
//! ## Quick Start
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_muzzleloader::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(MuzzleloaderPluginGroup)
//!         .run();
//! }
//! ```
//!
//! The host supplies input by writing [`events::TriggerPressEvent`] /
//! [`events::TriggerReleaseEvent`] and consumes the outgoing sound,
//! durability, and fire messages. Weapon state lives in the two persisted
//! flags on each [`types::ItemStack`]; everything else is re-derived from
//! the current use-session every fixed tick.

pub mod components;
pub mod events;
pub mod resources;
pub mod sync;
pub mod systems;
pub mod types;

#[cfg(feature = "netcode")]
pub mod network;

pub mod prelude {
    pub use crate::components::*;
    pub use crate::events::*;
    pub use crate::resources::*;
    pub use crate::sync::*;
    pub use crate::types::*;
    pub use crate::MuzzleloaderPluginGroup;
    pub use crate::{MuzzleloaderCorePlugin, MuzzleloaderDebugPlugin, MuzzleloaderVfxPlugin};
}

use bevy::prelude::*;

use crate::resources::NetworkSide;

/// Plugin group bundling all muzzleloader subsystems.
///
/// Adds the core state machine, the cosmetic VFX, and debug visualization.
/// Defaults to the authoritative side; a presentation-side app adds
/// [`MuzzleloaderCorePlugin`] with [`NetworkSide::Presentation`] instead.
#[derive(Default)]
pub struct MuzzleloaderPluginGroup;

impl PluginGroup for MuzzleloaderPluginGroup {
    fn build(self) -> bevy::app::PluginGroupBuilder {
        bevy::app::PluginGroupBuilder::start::<Self>()
            .add(MuzzleloaderCorePlugin::default())
            .add(MuzzleloaderVfxPlugin)
            .add(MuzzleloaderDebugPlugin)
    }
}

/// Core plugin: the weapon state machine and fire dispatch.
///
/// Scheduled in `FixedUpdate` so exactly one transition per weapon happens
/// per tick, in press → tick → release order.
///
/// # Systems
/// - `begin_use` - evaluates trigger presses into use-sessions
/// - `tick_use_sessions` - loading cues and the loading-completion check
/// - `release_use` - fire/aim/abort resolution
#[derive(Default)]
pub struct MuzzleloaderCorePlugin {
    /// Which side of the simulation this app instance runs.
    pub side: NetworkSide,
}

impl Plugin for MuzzleloaderCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.side)
            .register_type::<components::Inventory>()
            .register_type::<components::LookAngles>()
            .register_type::<components::EyeHeight>()
            .register_type::<components::ActorMotion>()
            .register_type::<components::ActorFlags>()
            .register_type::<components::UseSession>()
            .register_type::<components::MusketBall>()
            .register_type::<resources::MuzzleloaderConfig>()
            .init_resource::<resources::MuzzleloaderConfig>()
            .init_resource::<resources::ShotRng>()
            .add_message::<events::TriggerPressEvent>()
            .add_message::<events::TriggerReleaseEvent>()
            .add_message::<events::FireEvent>()
            .add_message::<events::SmokeBurstEvent>()
            .add_message::<events::SoundCueEvent>()
            .add_message::<events::ItemDamagedEvent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::fire::begin_use,
                    systems::fire::tick_use_sessions,
                    systems::fire::release_use,
                )
                    .chain(),
            );
    }
}

/// VFX plugin: pooled muzzle-smoke bursts.
pub struct MuzzleloaderVfxPlugin;

impl Plugin for MuzzleloaderVfxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<resources::SmokePool>()
            .init_resource::<resources::MuzzleloaderAssets>()
            .add_systems(Startup, setup_smoke_assets)
            .add_systems(
                Update,
                (
                    systems::vfx::spawn_smoke_bursts,
                    systems::vfx::update_smoke_particles,
                ),
            );
    }
}

/// Setup the shared smoke-particle assets.
fn setup_smoke_assets(
    mut assets: ResMut<resources::MuzzleloaderAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    assets.smoke_mesh = meshes.add(Sphere::new(1.0));
    assets.smoke_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.85, 0.85, 0.82, 0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
}

/// Debug plugin for fired-projectile visualization.
pub struct MuzzleloaderDebugPlugin;

impl Plugin for MuzzleloaderDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, systems::debug::draw_musket_ball_debug);
    }
}

//! Events for the muzzleloader system.
//!
//! Note: In Bevy 0.18, buffered events use the `Message` trait instead of `Event`.
//!
//! The trigger press/release messages are the host-facing half of the engine
//! contract: input glue writes them, the state-machine systems consume them.
//! Everything else flows outward to the host (sounds, durability) or between
//! the two simulation sides (fire geometry).

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::types::{Hand, SoundCue};

/// The actor pressed the use button on a held weapon.
///
/// Begin-use may be rejected (no ammo, eyes submerged); rejection is silent
/// and the host is expected to allow a retry on the next input.
#[derive(Message, Clone, Copy)]
pub struct TriggerPressEvent {
    /// Acting entity
    pub actor: Entity,
    /// Hand that was activated
    pub hand: Hand,
}

/// The actor released the use button.
///
/// Depending on weapon state this either fires, cocks the weapon, or aborts
/// the loading cycle.
#[derive(Message, Clone, Copy)]
pub struct TriggerReleaseEvent {
    /// Acting entity
    pub actor: Entity,
}

/// An authoritative fire transition occurred.
///
/// Carries both the cosmetic geometry (origin + un-perturbed facing, the
/// pair that goes on the wire for bystander clients) and the dispersed
/// projectile velocity.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_muzzleloader::events::FireEvent;
///
/// let event = FireEvent::new(Vec3::new(0.0, 1.6, 0.0), Vec3::Z)
///     .with_shooter(Entity::PLACEHOLDER);
/// ```
#[derive(Message, Clone)]
pub struct FireEvent {
    /// Firing point in world space
    pub origin: Vec3,
    /// Facing direction at the moment of fire (normalized, pre-dispersion)
    pub direction: Vec3,
    /// Projectile velocity after dispersion and shooter-motion addition
    pub velocity: Vec3,
    /// Shooter entity (for attribution)
    pub shooter: Option<Entity>,
}

impl FireEvent {
    /// Creates a fire event with the given geometry and no projectile
    /// velocity or shooter.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            velocity: Vec3::ZERO,
            shooter: None,
        }
    }

    /// Sets the dispersed projectile velocity.
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the shooter entity for attribution.
    pub fn with_shooter(mut self, shooter: Entity) -> Self {
        self.shooter = Some(shooter);
        self
    }
}

/// Request for a cosmetic muzzle-smoke burst.
///
/// Written either locally (the firing client mirroring its own shot) or by
/// the netcode receiver after decoding a fire-geometry payload from a peer.
/// Gameplay-inert by construction: the VFX system is its only consumer.
#[derive(Message, Clone, Copy)]
pub struct SmokeBurstEvent {
    /// Firing point in world space
    pub origin: Vec3,
    /// Facing direction (normalized)
    pub direction: Vec3,
}

/// A named sound cue at a world position.
///
/// The host's audio glue resolves the cue to an actual sound asset; volumes
/// and pitches are chosen here so both sides stay consistent.
#[derive(Message, Clone, Copy)]
pub struct SoundCueEvent {
    /// Which cue to play
    pub cue: SoundCue,
    /// Emission point
    pub position: Vec3,
    /// Linear volume
    pub volume: f32,
    /// Playback pitch
    pub pitch: f32,
}

impl SoundCueEvent {
    /// Loading-cycle cue (the three stage cues and the ready click).
    pub fn loading(cue: SoundCue, position: Vec3) -> Self {
        Self {
            cue,
            position,
            volume: 0.5,
            pitch: 1.0,
        }
    }

    /// Discharge report.
    pub fn fire(position: Vec3) -> Self {
        Self {
            cue: SoundCue::Fire,
            position,
            volume: 1.5,
            pitch: 1.0,
        }
    }
}

/// One unit of durability damage was applied to a held weapon.
///
/// The host plays the break animation and handles actual breakage; the
/// state machine issues exactly one of these per fire.
#[derive(Message, Clone, Copy)]
pub struct ItemDamagedEvent {
    /// Actor whose item was damaged
    pub actor: Entity,
    /// Hand holding the damaged item
    pub hand: Hand,
    /// Whether the damage exhausted the item's durability
    pub broken: bool,
}

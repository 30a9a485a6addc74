//! Core components for the muzzleloader system.

use bevy::prelude::*;

use crate::types::{Hand, ItemStack};

/// An actor's held items and general inventory.
///
/// Ammo resolution searches strictly in this order: off-hand, main-hand,
/// then `slots` by index (see [`crate::systems::ammo::find_ammo`]).
///
/// # Example
/// ```
/// use bevy_muzzleloader::components::Inventory;
/// use bevy_muzzleloader::types::{Hand, ItemKind, ItemStack};
///
/// let inventory = Inventory {
///     main_hand: Some(ItemStack::new(ItemKind::Musket, 1)),
///     off_hand: None,
///     slots: vec![ItemStack::new(ItemKind::Cartridge, 8)],
/// };
/// assert!(inventory.held(Hand::Main).is_some());
/// ```
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Inventory {
    /// Item held in the main hand
    pub main_hand: Option<ItemStack>,
    /// Item held in the off hand
    pub off_hand: Option<ItemStack>,
    /// General inventory slots, searched in index order
    pub slots: Vec<ItemStack>,
}

impl Inventory {
    /// The stack held in the given hand, if any.
    pub fn held(&self, hand: Hand) -> Option<&ItemStack> {
        match hand {
            Hand::Main => self.main_hand.as_ref(),
            Hand::Off => self.off_hand.as_ref(),
        }
    }

    /// Mutable access to the stack held in the given hand.
    pub fn held_mut(&mut self, hand: Hand) -> Option<&mut ItemStack> {
        match hand {
            Hand::Main => self.main_hand.as_mut(),
            Hand::Off => self.off_hand.as_mut(),
        }
    }
}

/// View angles of an actor, in radians.
///
/// Pitch is positive looking down, yaw rotates around the vertical axis,
/// matching the angle convention used by
/// [`crate::systems::dispersion::direction_from_angles`].
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct LookAngles {
    /// Pitch (radians, positive down)
    pub pitch: f32,
    /// Yaw (radians)
    pub yaw: f32,
}

/// Height of the actor's eyes above its transform origin.
#[derive(Component, Reflect, Clone, Copy)]
#[reflect(Component)]
pub struct EyeHeight(pub f32);

impl Default for EyeHeight {
    fn default() -> Self {
        Self(1.62)
    }
}

/// An actor's own motion, imparted to fired projectiles.
///
/// Horizontal motion is always added to the projectile velocity; vertical
/// motion only when the actor is airborne.
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct ActorMotion {
    /// Current velocity (units per tick)
    pub velocity: Vec3,
    /// Whether the actor is standing on solid ground
    pub on_ground: bool,
}

/// Capability flags consulted by the state machine.
///
/// # Fields
/// * `eyes_submerged` - eyes below a fluid surface the weapon cannot fire in
/// * `ammo_exempt` - bypasses ammo cost and the submersion check
///   (e.g. a creative/sandbox mode)
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct ActorFlags {
    /// Eyes below a fluid surface
    pub eyes_submerged: bool,
    /// Exempt from ammo consumption
    pub ammo_exempt: bool,
}

/// Ephemeral use-session, present only while the action button is held.
///
/// Inserted by the begin-use transition and removed on release. Elapsed
/// ticks are counted by the fixed-tick driver; `loading_stage` tracks which
/// of the three progressive loading cues have fired and only ever increases
/// within one session.
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct UseSession {
    /// Hand the session is bound to (may differ from the activating hand,
    /// see the dual-wield fast path)
    pub hand: Hand,
    /// Ticks since use began
    pub elapsed_ticks: u32,
    /// Loading cue progress, 0..=3
    pub loading_stage: u8,
}

impl UseSession {
    /// Starts a fresh session on the given hand. Loading-stage progress
    /// from any previous session is discarded, not resumed.
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            elapsed_ticks: 0,
            loading_stage: 0,
        }
    }
}

/// A fired musket ball, spawned by the authoritative fire transition.
///
/// Flight and collision are the host's concern; this component only carries
/// the spawn parameters and the shooter's identity for attribution.
#[derive(Component, Reflect, Default, Clone, Copy)]
#[reflect(Component)]
pub struct MusketBall {
    /// Initial velocity (units per tick)
    pub velocity: Vec3,
    /// Actor that fired the shot (kill credit)
    pub shooter: Option<Entity>,
}

/// One transient particle of a cosmetic muzzle-smoke burst.
///
/// Purely presentational; carries no gameplay effect.
#[derive(Component, Default, Clone, Copy)]
pub struct SmokeParticle {
    /// Lifetime remaining (seconds)
    pub lifetime: f32,
    /// Drift velocity (units per second)
    pub velocity: Vec3,
}

//! Common types and enums for the muzzleloader system.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which hand an item is held in.
///
/// Hand selection matters in three places: the firing point is offset to the
/// opposite side for the off-hand, ammo resolution searches the off-hand
/// first, and the dual-wield fast path redirects a main-hand activation to a
/// readied off-hand weapon.
///
/// # Example
/// ```
/// use bevy_muzzleloader::types::Hand;
///
/// let hand = Hand::Main;
/// assert_eq!(hand.opposite(), Hand::Off);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum Hand {
    /// Primary hand
    #[default]
    Main,
    /// Secondary hand
    Off,
}

impl Hand {
    /// Returns the other hand.
    pub fn opposite(self) -> Hand {
        match self {
            Hand::Main => Hand::Off,
            Hand::Off => Hand::Main,
        }
    }
}

/// Kind of item occupying an inventory slot.
///
/// The state machine only cares about three categories: the weapon itself,
/// its ammunition, and everything else.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum ItemKind {
    /// The muzzle-loaded weapon
    Musket,
    /// One unit of ammunition per item
    Cartridge,
    /// Any unrelated item
    #[default]
    Other,
}

/// The persisted per-stack weapon state: two single-byte flags.
///
/// This is the only piece of weapon state that survives beyond a use-session.
/// Everything else (loading stage, elapsed use time) is transient and
/// re-derived every tick. Flags serialize as bytes under the keys `loaded`
/// and `ready`; a missing key reads back as `0`.
///
/// The transition logic maintains `ready ⇒ loaded`: `ready` is only ever set
/// while `loaded` is set, and both are cleared together on fire.
///
/// # Example
/// ```
/// use bevy_muzzleloader::types::StackTag;
///
/// let mut tag = StackTag::default();
/// assert!(!tag.is_loaded());
/// tag.set_loaded(true);
/// tag.set_ready(true);
/// assert!(tag.is_ready());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect, Serialize, Deserialize)]
pub struct StackTag {
    /// 1 once a cartridge has been consumed and the action is primed
    #[serde(default)]
    loaded: u8,
    /// 1 once the aim stage has been reached while loaded
    #[serde(default)]
    ready: u8,
}

impl StackTag {
    /// Whether a cartridge has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded == 1
    }

    /// Whether the weapon is cocked and will discharge on the next release.
    pub fn is_ready(&self) -> bool {
        self.ready == 1
    }

    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded as u8;
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready as u8;
    }
}

/// One stack of items: a kind, a count, and accumulated durability damage.
///
/// Weapon stacks additionally carry a [`StackTag`] holding the persisted
/// loaded/ready flags. The tag is created with the stack and destroyed with
/// it; there is no explicit teardown.
///
/// # Example
/// ```
/// use bevy_muzzleloader::types::{ItemKind, ItemStack};
///
/// let musket = ItemStack::new(ItemKind::Musket, 1);
/// let cartridges = ItemStack::new(ItemKind::Cartridge, 16);
/// assert_eq!(cartridges.count, 16);
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Default, Reflect)]
pub struct ItemStack {
    /// What the stack holds
    pub kind: ItemKind,
    /// Number of items in the stack
    pub count: u32,
    /// Durability damage taken so far
    pub damage: u32,
    /// Persisted weapon flags (meaningful only for weapon stacks)
    pub tag: StackTag,
}

impl ItemStack {
    /// Creates a fresh stack with no damage and default flags.
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self {
            kind,
            count,
            damage: 0,
            tag: StackTag::default(),
        }
    }

    /// Applies durability damage.
    ///
    /// Returns `true` when the accumulated damage reaches `max_damage`,
    /// i.e. the item has broken. Breakage itself is the host's concern;
    /// the state machine only reports it.
    pub fn damage_item(&mut self, amount: u32, max_damage: u32) -> bool {
        self.damage += amount;
        self.damage >= max_damage
    }
}

/// Generic use-action pose reported to the host's animation layer.
///
/// # Variants
/// * `Aim` - weapon raised to the shoulder (ready to fire)
/// * `Idle` - no special pose (loaded but not yet aimed)
/// * `Load` - two-handed loading/blocking pose (reloading)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum UsePose {
    /// Raised/aiming pose
    Aim,
    /// No use pose
    Idle,
    /// Blocking/loading pose
    Load,
}

/// Sound cues emitted by the state machine.
///
/// Asset lookup is the host's concern; the state machine only names the cue.
/// The three `Load` cues fire once each, in order, during a loading session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
pub enum SoundCue {
    /// First loading stage (powder poured)
    Load0,
    /// Second loading stage (ball rammed)
    Load1,
    /// Third loading stage (ramrod withdrawn)
    Load2,
    /// Loading finished, weapon primed
    Ready,
    /// Discharge
    Fire,
}

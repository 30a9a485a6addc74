//! Weapon state machine - the load/aim/fire transition logic.
//!
//! Pure functions over inventory and stack-tag data; the fixed-tick systems
//! in [`crate::systems::fire`] drive them and translate outcomes into
//! messages. States are not stored anywhere: the two persisted flags plus
//! the transient use-session fully determine them.
//!
//! ```text
//! Unloaded -> Loading -> Loaded -> Ready -> (fire) -> Unloaded
//!                 \________release_________/
//! ```
//!
//! Releasing before `Loaded` aborts the cycle; partial loading-stage
//! progress is discarded (it is never persisted) and no ammo is lost, since
//! ammo is only consumed at the loading-completion transition.

use crate::components::Inventory;
use crate::systems::ammo;
use crate::types::{Hand, ItemKind, ItemStack, SoundCue, StackTag, UsePose};

/// Fixed-update rate the tick counts assume.
pub const TICKS_PER_SECOND: f32 = 20.0;

/// Outcome of a begin-use attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BeginUse {
    /// A use-session starts on this hand. May differ from the activating
    /// hand: activating the main hand while both hands hold readied weapons
    /// redirects the session to the off hand, so a pre-readied off-hand
    /// weapon fires on the next release instead of restarting its cycle.
    Started(Hand),
    /// Action rejected; no state changes, retry on next input.
    Rejected,
}

/// Outcome of releasing the use button.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ReleaseOutcome {
    /// The weapon discharges. `aim_progress` is the elapsed aim time over
    /// the configured aim duration, clamped to `[0, 1]`; it feeds the
    /// dispersion model.
    Fired { aim_progress: f32 },
    /// The weapon was loaded but not cocked: it is now cocked, and the next
    /// release fires.
    Aimed,
    /// Nothing to do; an unloaded weapon reverts to idle.
    Nothing,
}

/// Evaluates whether a use-session may begin on the given hand.
///
/// Permitted when the weapon is already loaded, or ammo is resolvable, or
/// the actor is ammo-exempt. Rejected when the held item is not a weapon or
/// the actor's eyes are submerged (unless exempt).
pub fn try_begin_use(
    inventory: &Inventory,
    eyes_submerged: bool,
    ammo_exempt: bool,
    hand: Hand,
) -> BeginUse {
    let Some(stack) = inventory.held(hand) else {
        return BeginUse::Rejected;
    };
    if stack.kind != ItemKind::Musket {
        return BeginUse::Rejected;
    }
    if eyes_submerged && !ammo_exempt {
        return BeginUse::Rejected;
    }

    // Dual-wield fast path: two readied weapons alternate without re-aiming.
    if hand == Hand::Main {
        if let Some(off) = inventory.held(Hand::Off) {
            if off.kind == ItemKind::Musket && off.tag.is_ready() && stack.tag.is_ready() {
                return BeginUse::Started(Hand::Off);
            }
        }
    }

    let have_ammo = ammo::find_ammo(inventory).is_some() || ammo_exempt;
    if stack.tag.is_loaded() || have_ammo {
        BeginUse::Started(hand)
    } else {
        BeginUse::Rejected
    }
}

/// Advances the progressive loading cues for one tick.
///
/// Stage thresholds are 0.2 s, 0.5 s and 1.0 s of continuous use. The stage
/// only ever increases within a session, so each cue fires at most once.
/// Returns the cue to play when a threshold is crossed.
pub fn advance_loading_stage(stage: &mut u8, elapsed_ticks: u32) -> Option<SoundCue> {
    let using_seconds = elapsed_ticks as f32 / TICKS_PER_SECOND;
    match *stage {
        0 if using_seconds > 0.2 => {
            *stage = 1;
            Some(SoundCue::Load0)
        }
        1 if using_seconds > 0.5 => {
            *stage = 2;
            Some(SoundCue::Load1)
        }
        2 if using_seconds > 1.0 => {
            *stage = 3;
            Some(SoundCue::Load2)
        }
        _ => None,
    }
}

/// Attempts the loading-completion transition.
///
/// Once the session has run `reload_duration_ticks` and the weapon is
/// neither loaded nor ready, resolves and consumes one cartridge (atomically
/// with setting the flag) and reports the ready cue. Exempt actors skip the
/// consumption. With no ammo available the transition is deferred: this is
/// simply called again next tick.
pub fn try_complete_load(
    inventory: &mut Inventory,
    hand: Hand,
    elapsed_ticks: u32,
    ammo_exempt: bool,
    reload_duration_ticks: u32,
) -> Option<SoundCue> {
    {
        let stack = inventory.held(hand)?;
        // The held stack may have been swapped since begin-use.
        if stack.kind != ItemKind::Musket
            || elapsed_ticks < reload_duration_ticks
            || stack.tag.is_ready()
            || stack.tag.is_loaded()
        {
            return None;
        }
    }

    if !ammo_exempt {
        let slot = ammo::find_ammo(inventory)?;
        ammo::consume_ammo(inventory, slot);
    }

    if let Some(stack) = inventory.held_mut(hand) {
        stack.tag.set_loaded(true);
    }
    Some(SoundCue::Ready)
}

/// Resolves a use-release against the weapon's flags.
///
/// Ready weapons fire, clearing both flags together. Loaded-but-not-ready
/// weapons cock instead (the aim transition). Anything else is a no-op
/// abort back to idle.
pub fn release_use(tag: &mut StackTag, elapsed_ticks: u32, aim_duration_ticks: u32) -> ReleaseOutcome {
    if tag.is_ready() {
        let aim_progress = (elapsed_ticks as f32 / aim_duration_ticks as f32).min(1.0);
        tag.set_ready(false);
        tag.set_loaded(false);
        ReleaseOutcome::Fired { aim_progress }
    } else if tag.is_loaded() {
        tag.set_ready(true);
        ReleaseOutcome::Aimed
    } else {
        ReleaseOutcome::Nothing
    }
}

/// How long the host's use-countdown may run for this weapon.
///
/// Always the configured (effectively unbounded) window, regardless of the
/// weapon's flags: the cycle is ended by the player releasing the button,
/// never by countdown expiry.
pub fn use_duration_ticks(_tag: &StackTag, config: &crate::resources::MuzzleloaderConfig) -> u32 {
    config.use_duration_ticks
}

/// The generic use-action pose for the host's animation layer.
pub fn use_pose(tag: &StackTag) -> UsePose {
    if tag.is_ready() {
        UsePose::Aim
    } else if tag.is_loaded() {
        UsePose::Idle
    } else {
        UsePose::Load
    }
}

/// Whether switching held stacks should retrigger the equip animation.
///
/// Only an inventory slot change does; flag flips on the same stack (loading
/// completing, cocking) must not visually re-equip the weapon.
pub fn should_cause_reequip(_old: &ItemStack, _new: &ItemStack, slot_changed: bool) -> bool {
    slot_changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::MuzzleloaderConfig;

    fn musket() -> ItemStack {
        ItemStack::new(ItemKind::Musket, 1)
    }

    fn readied_musket() -> ItemStack {
        let mut stack = musket();
        stack.tag.set_loaded(true);
        stack.tag.set_ready(true);
        stack
    }

    fn inventory_with_ammo(count: u32) -> Inventory {
        Inventory {
            main_hand: Some(musket()),
            off_hand: None,
            slots: vec![ItemStack::new(ItemKind::Cartridge, count)],
        }
    }

    /// Drives a full use-session for `ticks` ticks and returns the cues
    /// emitted, in order. Mirrors what the fixed-tick driver does.
    fn run_session(
        inventory: &mut Inventory,
        hand: Hand,
        ticks: u32,
        ammo_exempt: bool,
    ) -> Vec<SoundCue> {
        let config = MuzzleloaderConfig::default();
        let mut cues = Vec::new();
        let mut stage = 0u8;
        for elapsed in 1..=ticks {
            let loaded = inventory.held(hand).is_some_and(|s| s.tag.is_loaded());
            if !loaded {
                if let Some(cue) = advance_loading_stage(&mut stage, elapsed) {
                    cues.push(cue);
                }
            }
            if let Some(cue) = try_complete_load(
                inventory,
                hand,
                elapsed,
                ammo_exempt,
                config.reload_duration_ticks,
            ) {
                cues.push(cue);
            }
        }
        cues
    }

    #[test]
    fn test_begin_use_rejected_without_ammo() {
        // Scenario D: no ammo, not exempt -> rejected, no state change.
        let inventory = Inventory {
            main_hand: Some(musket()),
            off_hand: None,
            slots: vec![],
        };
        assert_eq!(
            try_begin_use(&inventory, false, false, Hand::Main),
            BeginUse::Rejected
        );
        assert!(!inventory.main_hand.unwrap().tag.is_loaded());
    }

    #[test]
    fn test_begin_use_exempt_needs_no_ammo() {
        let inventory = Inventory {
            main_hand: Some(musket()),
            off_hand: None,
            slots: vec![],
        };
        assert_eq!(
            try_begin_use(&inventory, false, true, Hand::Main),
            BeginUse::Started(Hand::Main)
        );
    }

    #[test]
    fn test_begin_use_rejected_when_submerged() {
        let inventory = inventory_with_ammo(8);
        assert_eq!(
            try_begin_use(&inventory, true, false, Hand::Main),
            BeginUse::Rejected
        );
        // Exemption also bypasses the submersion check.
        assert_eq!(
            try_begin_use(&inventory, true, true, Hand::Main),
            BeginUse::Started(Hand::Main)
        );
    }

    #[test]
    fn test_begin_use_loaded_weapon_needs_no_ammo() {
        let mut inventory = Inventory {
            main_hand: Some(musket()),
            off_hand: None,
            slots: vec![],
        };
        inventory.main_hand.as_mut().unwrap().tag.set_loaded(true);
        assert_eq!(
            try_begin_use(&inventory, false, false, Hand::Main),
            BeginUse::Started(Hand::Main)
        );
    }

    #[test]
    fn test_dual_wield_redirects_to_off_hand() {
        // Scenario E: both hands readied, main-hand activation fires the
        // off-hand weapon's cycle.
        let inventory = Inventory {
            main_hand: Some(readied_musket()),
            off_hand: Some(readied_musket()),
            slots: vec![],
        };
        assert_eq!(
            try_begin_use(&inventory, false, false, Hand::Main),
            BeginUse::Started(Hand::Off)
        );
        // No redirect when the off-hand weapon is not readied.
        let inventory = Inventory {
            main_hand: Some(readied_musket()),
            off_hand: Some(musket()),
            slots: vec![],
        };
        assert_eq!(
            try_begin_use(&inventory, false, false, Hand::Main),
            BeginUse::Started(Hand::Main)
        );
    }

    #[test]
    fn test_loading_stage_is_monotonic() {
        let mut stage = 0u8;
        let mut seen = Vec::new();
        for elapsed in 1..=40 {
            let before = stage;
            if let Some(cue) = advance_loading_stage(&mut stage, elapsed) {
                seen.push((elapsed, cue));
            }
            assert!(stage >= before);
        }
        // Thresholds: > 0.2 s at tick 5, > 0.5 s at tick 11, > 1.0 s at tick 21.
        assert_eq!(
            seen,
            vec![
                (5, SoundCue::Load0),
                (11, SoundCue::Load1),
                (21, SoundCue::Load2),
            ]
        );
    }

    #[test]
    fn test_full_load_consumes_one_cartridge() {
        // Scenario A: one session held past the reload duration loads the
        // weapon, consumes exactly one cartridge, and fires all three stage
        // cues in order.
        let mut inventory = inventory_with_ammo(3);
        let cues = run_session(&mut inventory, Hand::Main, 30, false);
        assert_eq!(
            cues,
            vec![
                SoundCue::Load0,
                SoundCue::Load1,
                SoundCue::Load2,
                SoundCue::Ready,
            ]
        );
        assert!(inventory.main_hand.unwrap().tag.is_loaded());
        assert_eq!(inventory.slots[0].count, 2);
    }

    #[test]
    fn test_load_deferred_until_ammo_appears() {
        let mut inventory = Inventory {
            main_hand: Some(musket()),
            off_hand: None,
            slots: vec![],
        };
        // Held well past the reload duration with no ammo: deferred forever.
        let cues = run_session(&mut inventory, Hand::Main, 60, false);
        assert!(!cues.contains(&SoundCue::Ready));
        assert!(!inventory.main_hand.unwrap().tag.is_loaded());

        // Ammo arrives mid-session: the deferred transition completes on the
        // next tick.
        inventory.slots.push(ItemStack::new(ItemKind::Cartridge, 1));
        let cue = try_complete_load(&mut inventory, Hand::Main, 61, false, 30);
        assert_eq!(cue, Some(SoundCue::Ready));
        assert!(inventory.slots.is_empty());
    }

    #[test]
    fn test_load_skipped_when_hand_no_longer_holds_weapon() {
        // The host swapped the held stack mid-session without a release;
        // a cartridge must never end up tagged as loaded.
        let mut inventory = Inventory {
            main_hand: Some(ItemStack::new(ItemKind::Cartridge, 4)),
            off_hand: None,
            slots: vec![ItemStack::new(ItemKind::Cartridge, 4)],
        };
        let cue = try_complete_load(&mut inventory, Hand::Main, 60, false, 30);
        assert_eq!(cue, None);
        assert!(!inventory.main_hand.unwrap().tag.is_loaded());
        assert_eq!(inventory.slots[0].count, 4, "no ammo consumed");
    }

    #[test]
    fn test_exempt_load_consumes_nothing() {
        let mut inventory = inventory_with_ammo(3);
        run_session(&mut inventory, Hand::Main, 30, true);
        assert!(inventory.main_hand.unwrap().tag.is_loaded());
        assert_eq!(inventory.slots[0].count, 3);
    }

    #[test]
    fn test_load_happens_once_per_cycle() {
        let mut inventory = inventory_with_ammo(5);
        run_session(&mut inventory, Hand::Main, 120, false);
        // Loading completed at tick 30; the remaining 90 ticks must not
        // consume again.
        assert_eq!(inventory.slots[0].count, 4);
    }

    #[test]
    fn test_release_aims_then_fires() {
        // Scenario B: first release past the aim transition cocks the
        // weapon without firing.
        let mut tag = StackTag::default();
        tag.set_loaded(true);
        assert_eq!(release_use(&mut tag, 35, 20), ReleaseOutcome::Aimed);
        assert!(tag.is_loaded());
        assert!(tag.is_ready());

        // Scenario C: second release at full aim fires with aim_progress 1
        // and clears both flags together.
        assert_eq!(
            release_use(&mut tag, 25, 20),
            ReleaseOutcome::Fired { aim_progress: 1.0 }
        );
        assert!(!tag.is_loaded());
        assert!(!tag.is_ready());
    }

    #[test]
    fn test_snap_release_reports_partial_aim() {
        let mut tag = StackTag::default();
        tag.set_loaded(true);
        tag.set_ready(true);
        assert_eq!(
            release_use(&mut tag, 5, 20),
            ReleaseOutcome::Fired { aim_progress: 0.25 }
        );
    }

    #[test]
    fn test_release_unloaded_is_noop() {
        let mut tag = StackTag::default();
        assert_eq!(release_use(&mut tag, 10, 20), ReleaseOutcome::Nothing);
        assert_eq!(tag, StackTag::default());
    }

    #[test]
    fn test_ready_never_set_without_loaded() {
        // Walk every transition from every flag state; ready=true with
        // loaded=false must be unreachable.
        for (loaded, ready) in [(false, false), (true, false), (true, true)] {
            let mut tag = StackTag::default();
            tag.set_loaded(loaded);
            tag.set_ready(ready);
            for elapsed in [0, 10, 25, 100] {
                let mut copy = tag;
                release_use(&mut copy, elapsed, 20);
                assert!(!copy.is_ready() || copy.is_loaded());
            }
        }
    }

    #[test]
    fn test_use_duration_ignores_state() {
        let config = MuzzleloaderConfig::default();
        let mut tag = StackTag::default();
        assert_eq!(use_duration_ticks(&tag, &config), 72000);
        tag.set_loaded(true);
        tag.set_ready(true);
        assert_eq!(use_duration_ticks(&tag, &config), 72000);
    }

    #[test]
    fn test_use_pose_mapping() {
        let mut tag = StackTag::default();
        assert_eq!(use_pose(&tag), UsePose::Load);
        tag.set_loaded(true);
        assert_eq!(use_pose(&tag), UsePose::Idle);
        tag.set_ready(true);
        assert_eq!(use_pose(&tag), UsePose::Aim);
    }

    #[test]
    fn test_reequip_only_on_slot_change() {
        let old = musket();
        let mut new = musket();
        new.tag.set_loaded(true);
        assert!(!should_cause_reequip(&old, &new, false));
        assert!(should_cause_reequip(&old, &new, true));
    }

    #[test]
    fn test_stack_tag_persistence_round_trip() {
        let mut tag = StackTag::default();
        tag.set_loaded(true);
        let bytes = bincode::serialize(&tag).unwrap();
        let back: StackTag = bincode::deserialize(&bytes).unwrap();
        assert_eq!(tag, back);
        assert!(back.is_loaded());
        assert!(!back.is_ready());
    }
}

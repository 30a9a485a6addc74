//! Fire dispatcher - fixed-tick systems driving the weapon state machine.
//!
//! Thin adapters between the host-facing trigger messages and the pure
//! transition functions in [`crate::systems::state`]. One transition per
//! weapon per tick; a given actor's inventory is only touched here, so no
//! locking is needed beyond the schedule ordering.
//!
//! The authoritative and presentation sides run the same systems; the
//! [`NetworkSide`] resource gates the parts the presentation side must only
//! mirror (ammo-gated cues, projectile spawning, durability).

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::components::{
    ActorFlags, ActorMotion, EyeHeight, Inventory, LookAngles, MusketBall, UseSession,
};
use crate::events::{
    FireEvent, ItemDamagedEvent, SmokeBurstEvent, SoundCueEvent, TriggerPressEvent,
    TriggerReleaseEvent,
};
use crate::resources::{MuzzleloaderConfig, NetworkSide, ShotRng};
use crate::systems::{dispersion, state};
use crate::types::ItemKind;

/// Begin-use transition: starts a use-session when permitted.
///
/// Rejection is silent towards the host; the weapon simply does not raise.
pub fn begin_use(
    mut presses: MessageReader<TriggerPressEvent>,
    mut commands: Commands,
    actors: Query<(&Inventory, &ActorFlags)>,
) {
    for press in presses.read() {
        let Ok((inventory, flags)) = actors.get(press.actor) else {
            continue;
        };
        match state::try_begin_use(inventory, flags.eyes_submerged, flags.ammo_exempt, press.hand)
        {
            state::BeginUse::Started(hand) => {
                // Restarting always resets the loading-stage progress.
                commands.entity(press.actor).insert(UseSession::new(hand));
            }
            state::BeginUse::Rejected => {
                debug!(actor = ?press.actor, hand = ?press.hand, "begin-use rejected");
            }
        }
    }
}

/// Per-tick use progression: stage cues and the loading-completion check.
///
/// The progressive loading cues are authoritative-only; the presentation
/// side mirrors the completion transition against its own inventory copy so
/// its local flags track the authoritative ones.
pub fn tick_use_sessions(
    side: Res<NetworkSide>,
    config: Res<MuzzleloaderConfig>,
    mut cues: MessageWriter<SoundCueEvent>,
    mut sessions: Query<(&mut UseSession, &mut Inventory, &ActorFlags, &Transform)>,
) {
    for (mut session, mut inventory, flags, transform) in sessions.iter_mut() {
        let session = &mut *session;
        session.elapsed_ticks += 1;

        let loaded = inventory
            .held(session.hand)
            .is_some_and(|stack| stack.tag.is_loaded());
        if *side == NetworkSide::Simulation && !loaded {
            if let Some(cue) =
                state::advance_loading_stage(&mut session.loading_stage, session.elapsed_ticks)
            {
                cues.write(SoundCueEvent::loading(cue, transform.translation));
            }
        }

        let hand = session.hand;
        if let Some(cue) = state::try_complete_load(
            &mut inventory,
            hand,
            session.elapsed_ticks,
            flags.ammo_exempt,
            config.reload_duration_ticks,
        ) {
            cues.write(SoundCueEvent::loading(cue, transform.translation));
        }
    }
}

/// Release transition: fire, cock, or abort.
///
/// On fire, the authoritative side spawns the projectile (with the
/// dispersion draw and the shooter's motion folded into its velocity) and
/// announces the event; the presentation side only mirrors the flag clear
/// and requests its local cosmetic burst. Both sides report the fire sound.
#[allow(clippy::too_many_arguments)]
pub fn release_use(
    mut releases: MessageReader<TriggerReleaseEvent>,
    mut commands: Commands,
    side: Res<NetworkSide>,
    config: Res<MuzzleloaderConfig>,
    mut rng: ResMut<ShotRng>,
    mut fires: MessageWriter<FireEvent>,
    mut bursts: MessageWriter<SmokeBurstEvent>,
    mut cues: MessageWriter<SoundCueEvent>,
    mut damage: MessageWriter<ItemDamagedEvent>,
    mut actors: Query<(
        &mut Inventory,
        &Transform,
        &EyeHeight,
        &LookAngles,
        &ActorMotion,
        &UseSession,
    )>,
) {
    for release in releases.read() {
        // Releasing without an active session is a no-op.
        let Ok((mut inventory, transform, eye_height, look, motion, session)) =
            actors.get_mut(release.actor)
        else {
            continue;
        };
        let hand = session.hand;
        let elapsed_ticks = session.elapsed_ticks;
        commands.entity(release.actor).remove::<UseSession>();

        let Some(stack) = inventory.held_mut(hand) else {
            continue;
        };
        // The held stack may have been swapped since begin-use.
        if stack.kind != ItemKind::Musket {
            continue;
        }
        match state::release_use(&mut stack.tag, elapsed_ticks, config.aim_duration_ticks) {
            state::ReleaseOutcome::Fired { aim_progress } => {
                let eye = transform.translation + Vec3::Y * eye_height.0;
                let origin = dispersion::firing_point(eye, look.pitch, look.yaw, hand);
                let facing = dispersion::direction_from_angles(look.pitch, look.yaw);

                if *side == NetworkSide::Simulation {
                    let std = dispersion::dispersion_std(
                        aim_progress,
                        config.base_dispersion_std,
                        config.dispersion_multiplier,
                    );
                    let shot_direction = dispersion::perturb_direction(facing, std, &mut rng.0);

                    let mut velocity = shot_direction * config.muzzle_velocity;
                    velocity.x += motion.velocity.x;
                    velocity.z += motion.velocity.z;
                    // Grounded actors don't impart their vertical motion.
                    if !motion.on_ground {
                        velocity.y += motion.velocity.y;
                    }

                    commands.spawn((
                        MusketBall {
                            velocity,
                            shooter: Some(release.actor),
                        },
                        Transform::from_translation(origin),
                    ));
                    fires.write(
                        FireEvent::new(origin, facing)
                            .with_velocity(velocity)
                            .with_shooter(release.actor),
                    );

                    let broken = stack.damage_item(1, config.max_damage);
                    damage.write(ItemDamagedEvent {
                        actor: release.actor,
                        hand,
                        broken,
                    });
                } else {
                    bursts.write(SmokeBurstEvent {
                        origin,
                        direction: facing,
                    });
                }
                cues.write(SoundCueEvent::fire(transform.translation));
            }
            state::ReleaseOutcome::Aimed | state::ReleaseOutcome::Nothing => {}
        }
    }
}

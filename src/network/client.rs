use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_renet2::netcode::NetcodeClientPlugin;
use bevy_renet2::prelude::*;

use crate::events::SmokeBurstEvent;
use crate::network::protocol::Channel;
use crate::sync::decode_fire_geometry;

pub struct MuzzleloaderClientPlugin;

impl Plugin for MuzzleloaderClientPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RenetClientPlugin);
        app.add_plugins(NetcodeClientPlugin);

        app.add_systems(Update, receive_fire_geometry);
    }
}

/// Replay peer fire events as local cosmetic bursts.
///
/// A payload that does not decode is skipped, never fatal: the peer may
/// speak a different protocol version.
fn receive_fire_geometry(
    mut client: ResMut<RenetClient>,
    mut bursts: MessageWriter<SmokeBurstEvent>,
) {
    if !client.is_connected() {
        return;
    }

    while let Some(message) = client.receive_message(Channel::FireFx.id()) {
        match decode_fire_geometry(&message) {
            Some((origin, direction)) => {
                bursts.write(SmokeBurstEvent { origin, direction });
            }
            None => {
                warn!("Skipping malformed fire-geometry payload ({} bytes)", message.len());
            }
        }
    }
}

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_renet2::netcode::NetcodeServerPlugin;
use bevy_renet2::prelude::*;

use crate::events::FireEvent;
use crate::network::protocol::Channel;
use crate::sync::encode_fire_geometry;

pub struct MuzzleloaderServerPlugin;

impl Plugin for MuzzleloaderServerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RenetServerPlugin);
        app.add_plugins(NetcodeServerPlugin);

        app.add_systems(Update, (server_connection_events, broadcast_fire_geometry));
    }
}

/// Marks an actor entity as controlled by a connected client.
///
/// The host's connection glue attaches this when it binds a client to its
/// player entity; fires from actors without it (NPCs, server-side scripts)
/// are broadcast to everyone.
#[derive(Component)]
pub struct ControlledBy(pub u64);

fn server_connection_events(mut server_events: MessageReader<ServerEvent>) {
    for event in server_events.read() {
        match event {
            ServerEvent::ClientConnected { client_id } => {
                info!("Client {client_id} connected");
            }
            ServerEvent::ClientDisconnected { client_id, reason } => {
                info!("Client {client_id} disconnected: {reason}");
            }
        }
    }
}

/// Client whose local burst already played and must not receive the echo.
fn fire_broadcast_exclusion(
    shooter: Option<Entity>,
    owners: &Query<&ControlledBy>,
) -> Option<u64> {
    shooter
        .and_then(|actor| owners.get(actor).ok())
        .map(|owner| owner.0)
}

/// Announce each authoritative fire to every observer.
///
/// Only the 24-byte geometry goes out; receivers replay the cosmetic burst
/// from it without touching any weapon state. The shooter's own client is
/// skipped: it mirrored the burst locally at release time.
fn broadcast_fire_geometry(
    mut server: ResMut<RenetServer>,
    mut fires: MessageReader<FireEvent>,
    owners: Query<&ControlledBy>,
) {
    for fire in fires.read() {
        let payload = encode_fire_geometry(fire.origin, fire.direction).to_vec();
        match fire_broadcast_exclusion(fire.shooter, &owners) {
            Some(client_id) => {
                server.broadcast_message_except(client_id, Channel::FireFx.id(), payload);
            }
            None => server.broadcast_message(Channel::FireFx.id(), payload),
        }
    }
}

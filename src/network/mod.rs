use bevy::prelude::*;

pub mod client;
pub mod protocol;
pub mod server;

pub struct MuzzleloaderNetworkPlugin;

impl Plugin for MuzzleloaderNetworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(server::MuzzleloaderServerPlugin);
        app.add_plugins(client::MuzzleloaderClientPlugin);
    }
}

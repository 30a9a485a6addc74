use renet2::{ChannelConfig, SendType};

pub const PROTOCOL_ID: u64 = 11;

/// Channels used by the muzzleloader netcode.
///
/// Fire-geometry payloads are fire-and-forget: a dropped burst is invisible
/// a moment later, so they ride an unreliable channel. The only ordering
/// guarantee observers get is "payload arrives after the authoritative fire
/// event", which unreliable delivery preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    FireFx,
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> u8 {
        match channel {
            Channel::FireFx => 0,
        }
    }
}

impl Channel {
    pub fn id(&self) -> u8 {
        (*self).into()
    }

    pub fn config() -> Vec<ChannelConfig> {
        vec![ChannelConfig {
            channel_id: Channel::FireFx.id(),
            max_memory_usage_bytes: 5 * 1024 * 1024,
            send_type: SendType::Unreliable,
        }]
    }
}

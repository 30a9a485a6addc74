//! Fire-geometry sync codec.
//!
//! When the authoritative side fires, observers that cannot evaluate the
//! state machine themselves (bystander clients) receive just enough geometry
//! to replay the cosmetic burst: six little-endian `f32`s, origin then
//! direction, 24 bytes total. There is no version field; producer and
//! consumer must agree on this exact layout.

use bevy::prelude::*;

/// Size of the fire-geometry payload in bytes.
pub const FIRE_GEOMETRY_BYTES: usize = 24;

/// Encodes a fire-geometry pair into the fixed wire layout.
pub fn encode_fire_geometry(origin: Vec3, direction: Vec3) -> [u8; FIRE_GEOMETRY_BYTES] {
    let mut payload = [0u8; FIRE_GEOMETRY_BYTES];
    let floats = [
        origin.x, origin.y, origin.z,
        direction.x, direction.y, direction.z,
    ];
    for (chunk, value) in payload.chunks_exact_mut(4).zip(floats) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    payload
}

/// Decodes a fire-geometry payload.
///
/// Returns `None` for anything that is not exactly 24 bytes — a peer
/// speaking a different protocol version must degrade to a skipped burst,
/// never a crash.
pub fn decode_fire_geometry(payload: &[u8]) -> Option<(Vec3, Vec3)> {
    if payload.len() != FIRE_GEOMETRY_BYTES {
        return None;
    }
    let mut floats = [0f32; 6];
    for (value, chunk) in floats.iter_mut().zip(payload.chunks_exact(4)) {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(chunk);
        *value = f32::from_le_bytes(bytes);
    }
    Some((
        Vec3::new(floats[0], floats[1], floats[2]),
        Vec3::new(floats[3], floats[4], floats[5]),
    ))
}

//! Dispersion model - aim-dependent spread and shared firing geometry.
//!
//! Everything here is pure: the same formulas run on the authoritative side
//! (to aim the real projectile) and on the presentation side (to place the
//! cosmetic burst), which is what keeps the two sides' visuals symmetric.

use bevy::prelude::*;
use rand::Rng;
use rand_distr::StandardNormal;

/// Gaussian magnitude cap, in standard deviations. Bounds the worst-case
/// spread of a single shot.
const MAX_DEVIATIONS: f32 = 4.0;

/// Sideways/downward offset of the firing point from the eye, approximating
/// a weapon held at the shoulder rather than exactly at the eye.
const MUZZLE_OFFSET: f32 = 0.1;

/// Effective angular standard deviation for a shot at the given aim progress.
///
/// A snap-fire (`t = 0`) is `snap_multiplier` times less accurate than a
/// fully-aimed shot (`t >= 1`), interpolated linearly in between. Sustained
/// aim is rewarded without ever dropping below `base_std`.
///
/// # Example
/// ```
/// use bevy_muzzleloader::systems::dispersion::dispersion_std;
///
/// let base = 0.4_f32.to_radians();
/// assert_eq!(dispersion_std(1.0, base, 3.0), base);
/// assert_eq!(dispersion_std(0.0, base, 3.0), base * 3.0);
/// ```
pub fn dispersion_std(aim_progress: f32, base_std: f32, snap_multiplier: f32) -> f32 {
    let t = aim_progress.clamp(0.0, 1.0);
    if t < 1.0 {
        base_std * (t + (1.0 - t) * snap_multiplier)
    } else {
        base_std
    }
}

/// Unit direction vector for a pitch/yaw pair (radians, pitch positive down).
///
/// `(0, 0)` faces +Z; yaw rotates toward -X; pitch `π/2` faces straight down.
pub fn direction_from_angles(pitch: f32, yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(-sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
}

/// The muzzle position for a shot from the given eye position and view.
///
/// Offset sideways (sign flipped for the off hand) and slightly downward
/// from the eye, so shots visually leave the shoulder/hip line.
pub fn firing_point(eye: Vec3, pitch: f32, yaw: f32, hand: crate::types::Hand) -> Vec3 {
    let mut side = direction_from_angles(0.0, yaw + std::f32::consts::FRAC_PI_2);
    if hand == crate::types::Hand::Off {
        side = -side;
    }
    let down = direction_from_angles(pitch + std::f32::consts::FRAC_PI_2, yaw);
    eye + (side + down) * MUZZLE_OFFSET
}

/// Applies the dispersion draw to a facing vector.
///
/// Draws a uniform angle and a half-Gaussian magnitude clamped at
/// [`MAX_DEVIATIONS`], then rotates by `std * magnitude * sin(angle)` on the
/// pitch axis and `std * magnitude * cos(angle)` on the yaw axis. The result
/// is an isotropic 2D-Gaussian cone around true aim: shots cluster near the
/// center with rare wide outliers, not a uniform cone.
pub fn perturb_direction(direction: Vec3, std: f32, rng: &mut impl Rng) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let gaussian: f32 = rng.sample(StandardNormal);
    let magnitude = gaussian.abs().min(MAX_DEVIATIONS);

    let pitch_rotation = Quat::from_rotation_x(std * magnitude * angle.sin());
    let yaw_rotation = Quat::from_rotation_y(std * magnitude * angle.cos());
    yaw_rotation * (pitch_rotation * direction)
}

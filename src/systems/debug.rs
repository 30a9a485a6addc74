//! Debug visualization for fired musket balls.

use bevy::prelude::*;

use crate::components::MusketBall;

/// Draw a gizmo ray along each musket ball's velocity.
pub fn draw_musket_ball_debug(mut gizmos: Gizmos, balls: Query<(&Transform, &MusketBall)>) {
    for (transform, ball) in balls.iter() {
        gizmos.ray(
            transform.translation,
            ball.velocity.normalize_or_zero() * 2.0,
            Color::srgb(1.0, 0.8, 0.2),
        );
    }
}

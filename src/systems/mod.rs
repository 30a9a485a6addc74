//! Systems and pure logic for the muzzleloader plugin.

pub mod ammo;
pub mod debug;
pub mod dispersion;
pub mod fire;
pub mod state;
pub mod vfx;

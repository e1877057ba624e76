//! Spaceship Battle - a gaze-aimed arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (calibration, aim, actors, population)
//! - `platform`: Sensor/render collaborator seams and the outer frame loop
//! - `config`: Immutable startup configuration
//! - `error`: Crate error type

pub mod config;
pub mod error;
pub mod platform;
pub mod sim;

pub use config::{BoundsPolicy, GameConfig};
pub use error::GameError;

use glam::Vec2;

/// Game configuration defaults
pub mod consts {
    /// Window dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Side length of a bullet square (pixels)
    pub const BULLET_WIDTH: f32 = 5.0;
    /// Integer bullet speed before scaling by the unit aim velocity
    pub const BASE_BULLET_SPEED: i32 = 10;

    /// Minimum number of non-player ships kept alive
    pub const MINIMUM_SHIPS: usize = 5;
    /// Hostile count rolled at startup (inclusive range)
    pub const INITIAL_HOSTILES_MIN: usize = 3;
    pub const INITIAL_HOSTILES_MAX: usize = 10;

    /// Delay between frames (milliseconds)
    pub const FRAME_DELAY_MS: u64 = 100;

    /// Hostile descent speed (pixels per frame)
    pub const HOSTILE_SPEED: f32 = 4.0;
    /// Maximum sideways drift of a hostile (pixels per frame)
    pub const HOSTILE_MAX_DRIFT: f32 = 1.5;
    /// Ally sweep speed for a standard fighter (pixels per frame)
    pub const ALLY_SPEED: f32 = 6.0;

    /// Frames a shield stays up once activated
    pub const SHIELD_FRAMES: u32 = 50;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a screen-space offset (y down) to math space (y up)
#[inline]
pub fn screen_to_math(offset: Vec2) -> Vec2 {
    Vec2::new(offset.x, -offset.y)
}

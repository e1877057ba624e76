//! Startup configuration
//!
//! Built once before the first frame and never mutated afterwards. Can be
//! loaded from a JSON file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// How actors decide they have left the playable window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundsPolicy {
    /// Only `x > width` or `y > height` count as off-screen. Bullets fired
    /// into quadrants 2 and 3 leave through the left edge and are never
    /// culled, so the player's bullet list keeps growing while aiming there.
    #[default]
    UpperOnly,
    /// Any edge of the window counts
    Symmetric,
}

impl BoundsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundsPolicy::UpperOnly => "upper-only",
            BoundsPolicy::Symmetric => "symmetric",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upper-only" | "upper" => Some(BoundsPolicy::UpperOnly),
            "symmetric" | "all" => Some(BoundsPolicy::Symmetric),
            _ => None,
        }
    }

    /// Whether `pos` lies outside a window of size `bounds`
    pub fn is_outside(&self, pos: Vec2, bounds: Vec2) -> bool {
        let past_upper = pos.x > bounds.x || pos.y > bounds.y;
        match self {
            BoundsPolicy::UpperOnly => past_upper,
            BoundsPolicy::Symmetric => past_upper || pos.x < 0.0 || pos.y < 0.0,
        }
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Bullets ===
    /// Side length of the square drawn for each bullet
    pub bullet_width: f32,
    /// Integer speed scaled by the unit aim velocity at spawn
    pub base_bullet_speed: i32,

    // === Population ===
    /// Minimum live non-player ships
    pub min_ships: usize,
    pub initial_hostiles_min: usize,
    pub initial_hostiles_max: usize,
    pub hostile_speed: f32,
    pub ally_speed: f32,

    // === Player ===
    pub shield_frames: u32,

    // === Loop ===
    pub frame_delay_ms: u64,
    pub bounds_policy: BoundsPolicy,
    /// Seed for spawn positions and the initial hostile roll
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            bullet_width: BULLET_WIDTH,
            base_bullet_speed: BASE_BULLET_SPEED,

            min_ships: MINIMUM_SHIPS,
            initial_hostiles_min: INITIAL_HOSTILES_MIN,
            initial_hostiles_max: INITIAL_HOSTILES_MAX,
            hostile_speed: HOSTILE_SPEED,
            ally_speed: ALLY_SPEED,

            shield_frames: SHIELD_FRAMES,

            frame_delay_ms: FRAME_DELAY_MS,
            bounds_policy: BoundsPolicy::UpperOnly,
            seed: 0x5eed_ba77_1e00,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.window_width > 0.0 && self.window_height > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "window must be non-empty, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.min_ships == 0 {
            return Err(GameError::InvalidConfig("min_ships must be at least 1".into()));
        }
        if self.initial_hostiles_min > self.initial_hostiles_max {
            return Err(GameError::InvalidConfig(format!(
                "initial hostile range {}..={} is inverted",
                self.initial_hostiles_min, self.initial_hostiles_max
            )));
        }
        // Below 2 a diagonal aim truncates to a zero velocity and the bullet
        // never moves
        if self.base_bullet_speed < 2 {
            return Err(GameError::InvalidConfig(format!(
                "base_bullet_speed must be at least 2, got {}",
                self.base_bullet_speed
            )));
        }
        if !(self.hostile_speed > 0.0 && self.ally_speed > 0.0) {
            return Err(GameError::InvalidConfig("ship speeds must be positive".into()));
        }
        Ok(())
    }

    /// Window size as a vector
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }

    /// Screen center, where the player ship sits
    pub fn center(&self) -> Vec2 {
        self.bounds() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "window_width": 1024, "bounds_policy": "Symmetric" }"#)
                .unwrap();
        assert_eq!(config.window_width, 1024.0);
        assert_eq!(config.window_height, WINDOW_HEIGHT);
        assert_eq!(config.bounds_policy, BoundsPolicy::Symmetric);
        assert_eq!(config.min_ships, MINIMUM_SHIPS);
    }

    #[test]
    fn test_rejects_inverted_hostile_range() {
        let err = GameConfig::from_json_str(
            r#"{ "initial_hostiles_min": 8, "initial_hostiles_max": 2 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_window() {
        let err = GameConfig::from_json_str(r#"{ "window_height": 0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_stalling_bullet_speed() {
        let err = GameConfig::from_json_str(r#"{ "base_bullet_speed": 1 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert!(GameConfig::from_json_str(r#"{ "base_bullet_speed": 2 }"#).is_ok());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::ConfigIo { .. }));
    }

    #[test]
    fn test_bounds_policy() {
        let bounds = Vec2::new(800.0, 600.0);
        let off_left = Vec2::new(-5.0, 300.0);
        let off_right = Vec2::new(805.0, 300.0);
        assert!(!BoundsPolicy::UpperOnly.is_outside(off_left, bounds));
        assert!(BoundsPolicy::Symmetric.is_outside(off_left, bounds));
        assert!(BoundsPolicy::UpperOnly.is_outside(off_right, bounds));
        assert!(BoundsPolicy::Symmetric.is_outside(off_right, bounds));
        assert_eq!(BoundsPolicy::from_str("Symmetric"), Some(BoundsPolicy::Symmetric));
        assert_eq!(BoundsPolicy::UpperOnly.as_str(), "upper-only");
    }
}

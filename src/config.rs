//! Tunable physics parameters
//!
//! Loaded from JSON where any subset of fields may be given; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

/// Lowest and highest control sensitivity applied to movement
pub const MIN_SENSITIVITY: f32 = 0.5;
pub const MAX_SENSITIVITY: f32 = 2.0;

/// Physics and playfield configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal player speed (pixels/tick)
    pub player_speed: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_force: f32,
    /// Reference barrel speed, informational
    pub barrel_speed: f32,
    /// Nominal tick rate of the host loop
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 375.0,
            canvas_height: 667.0,
            gravity: 0.8,
            player_speed: 5.0,
            jump_force: -15.0,
            barrel_speed: 3.0,
            fps: 60,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Copy with movement scaled by control sensitivity
    pub fn scaled_by(&self, sensitivity: f32) -> Self {
        let factor = if sensitivity.is_finite() && sensitivity > 0.0 {
            sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
        } else {
            log::warn!("Ignoring invalid control sensitivity {}", sensitivity);
            1.0
        };
        Self {
            player_speed: self.player_speed * factor,
            jump_force: self.jump_force * factor,
            ..*self
        }
    }

    /// Nominal milliseconds per tick
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }
}

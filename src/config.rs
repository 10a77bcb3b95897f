//! Game tunables.
//!
//! Defaults match the arcade feel; a JSON file can override any subset of
//! them (missing fields keep their defaults).

use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Screen;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen size in pixels
    pub screen_width: f32,
    pub screen_height: f32,
    /// Target frame rate of the host loop
    pub fps: u32,
    /// Lives restored on every (re)start
    pub total_lives: u32,
    /// Max player bullets on screen before firing is refused
    pub player_bullet_limit: usize,
    /// Flip charges per run
    pub total_flips: u32,
    /// Ticks per flip animation phase (four phases per flip)
    pub flip_frame_rate: u32,
    /// Double shots granted by the red-wave bonus
    pub double_bullet_shots: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 256.0,
            screen_height: 256.0,
            fps: 30,
            total_lives: 3,
            player_bullet_limit: 5,
            total_flips: 6,
            flip_frame_rate: 20,
            double_bullet_shots: 10,
        }
    }
}

impl GameConfig {
    pub fn screen(&self) -> Screen {
        Screen::new(self.screen_width, self.screen_height)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> io::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> io::Result<()> {
        let invalid = |msg: &str| Err(io::Error::new(io::ErrorKind::InvalidInput, msg.to_string()));

        if self.fps == 0 {
            return invalid("fps must be at least 1");
        }
        if self.flip_frame_rate == 0 {
            return invalid("flip_frame_rate must be at least 1");
        }
        if self.double_bullet_shots == 0 {
            return invalid("double_bullet_shots must be at least 1");
        }
        // The formation generator places 24px cells inside the top-left quadrant.
        if self.screen_width < 96.0 || self.screen_height < 96.0 {
            return invalid("screen must be at least 96x96");
        }
        Ok(())
    }
}

//! Round options
//!
//! Every constant the game's prototypes used to hard-code (slot count, spawn
//! pacing, scroll speed, off-screen policy) lives here. Options are plain serde
//! data so a host can ship them as JSON next to the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Tunable parameters for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    // === Screen ===
    /// Screen width in pixels; groups spawn at this x
    pub screen_width: i32,
    /// Screen height in pixels
    pub screen_height: i32,
    /// Y of the ground line groups rest on
    pub ground_y: i32,

    // === Spawning ===
    /// Number of on-screen slots (and so the most groups awaiting judgment)
    pub queue_capacity: usize,
    /// Spawns are only considered on ticks that are multiples of this
    pub spawn_interval: u64,
    /// Minimum ticks between two spawns at level 1
    pub min_spawn_distance: u64,
    /// Ticks shaved off the minimum spawn distance per level
    pub spawn_distance_step: u64,
    /// A permitted spawn happens with probability 1 / this
    pub spawn_probability_denominator: u32,

    // === Difficulty ===
    /// Scroll speed at level 1 (pixels per tick)
    pub base_speed: i32,
    /// Extra scroll speed per level
    pub speed_step: i32,
    /// Scroll speed cap
    pub max_speed: i32,
    /// Score needed per level
    pub level_score_step: i64,

    // === Rules ===
    /// Whether the pause toggle is honoured
    pub pause_enabled: bool,
    /// End the round when a group scrolls away unanswered
    pub strict_offscreen_failure: bool,
    /// Score moved by judging a group worth 0 fu
    pub score_floor: i64,

    /// RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            ground_y: 400,

            queue_capacity: 3,
            spawn_interval: 10,
            min_spawn_distance: 50,
            spawn_distance_step: 5,
            spawn_probability_denominator: 10,

            base_speed: 6,
            speed_step: 1,
            max_speed: 14,
            level_score_step: 20,

            pause_enabled: true,
            strict_offscreen_failure: false,
            score_floor: 1,

            seed: None,
        }
    }
}

impl GameOptions {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidConfig(format!("malformed options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let json = fs::read_to_string(path)
            .map_err(|e| GameError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let options = Self::from_json(&json)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Reject options the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));

        if self.queue_capacity == 0 {
            return fail("queue_capacity must be at least 1");
        }
        if self.spawn_interval == 0 {
            return fail("spawn_interval must be at least 1");
        }
        if self.spawn_probability_denominator == 0 {
            return fail("spawn_probability_denominator must be at least 1");
        }
        if self.base_speed <= 0 {
            return fail("base_speed must be positive");
        }
        if self.max_speed < self.base_speed {
            return fail("max_speed must not be below base_speed");
        }
        if self.level_score_step <= 0 {
            return fail("level_score_step must be positive");
        }
        if self.score_floor < 1 {
            return fail("score_floor must be at least 1");
        }
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return fail("screen dimensions must be positive");
        }
        Ok(())
    }

    /// Level reached at a score (levels start at 1)
    pub fn level_for_score(&self, score: i64) -> u32 {
        let level = 1 + score.max(0) / self.level_score_step;
        level.min(u32::MAX as i64) as u32
    }

    /// Scroll speed for a level
    pub fn speed_for_level(&self, level: u32) -> i32 {
        let extra = (level.saturating_sub(1) as i64) * self.speed_step as i64;
        (self.base_speed as i64 + extra).min(self.max_speed as i64) as i32
    }

    /// Minimum ticks between spawns for a level
    pub fn min_spawn_distance_for_level(&self, level: u32) -> u64 {
        let shaved = (level.saturating_sub(1) as u64).saturating_mul(self.spawn_distance_step);
        self.min_spawn_distance
            .saturating_sub(shaved)
            .max(self.spawn_interval)
    }
}

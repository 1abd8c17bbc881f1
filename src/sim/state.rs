//! Round state
//!
//! Everything a round owns: mode, score, difficulty, the slot track and the
//! answer queue. Transitions that more than one mode needs (starting a round,
//! ending one) live here; the per-tick flow is in `tick`.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generator::TileGroupGenerator;
use super::group::GroupKind;
use super::queue::{AnswerQueue, Judgment};
use super::track::{Ground, Slot, SpawnTrack};
use crate::assets::AssetSet;
use crate::error::GameError;
use crate::highscores::HighScores;
use crate::settings::GameOptions;

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the player to start
    Title,
    /// Groups are scrolling and can be judged
    Playing,
    Paused,
    /// Round ended; waiting for restart or return to title
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    ModeChanged { from: GameMode, to: GameMode },
    Spawned {
        slot: usize,
        kind: GroupKind,
        displayed_value: u8,
    },
    Judged(Judgment),
    /// A group left the screen without a judgment
    Expired { slot: usize },
    LevelUp { level: u32 },
    NewHighScore { score: i64 },
}

/// Complete state of a play session
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub options: GameOptions,
    pub assets: Arc<AssetSet>,
    pub mode: GameMode,
    /// Playing ticks elapsed this round
    pub tick: u64,
    pub score: i64,
    /// Best score across rounds this process
    pub high_score: i64,
    pub level: u32,
    /// Scroll speed in pixels per tick
    pub speed: i32,
    pub track: SpawnTrack,
    pub queue: AnswerQueue,
    pub ground: Ground,
    pub high_scores: HighScores,
    /// Rounds started this session
    pub rounds_played: u32,
    pub judgments: u32,
    pub correct_judgments: u32,
    pub(crate) rng: Pcg32,
}

impl RoundState {
    /// Create a session at the title screen.
    ///
    /// The RNG is seeded once here, from `options.seed` when given.
    pub fn new(options: GameOptions, assets: Arc<AssetSet>) -> Result<Self, GameError> {
        options.validate()?;

        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let generator = TileGroupGenerator::new(Arc::clone(&assets));
        let track = SpawnTrack::new(&options, generator);
        log::info!(
            "New session: seed {}, {} slots, strict off-screen failure: {}",
            seed,
            track.capacity(),
            options.strict_offscreen_failure
        );

        Ok(Self {
            seed,
            mode: GameMode::Title,
            tick: 0,
            score: 0,
            high_score: 0,
            level: 1,
            speed: options.speed_for_level(1),
            queue: AnswerQueue::new(),
            ground: Ground::new(options.ground_y),
            high_scores: HighScores::new(),
            rounds_played: 0,
            judgments: 0,
            correct_judgments: 0,
            rng: Pcg32::seed_from_u64(seed),
            track,
            options,
            assets,
        })
    }

    /// Reset the round and start playing
    pub fn start_round(&mut self, events: &mut Vec<RoundEvent>) {
        self.tick = 0;
        self.score = 0;
        self.level = 1;
        self.speed = self.options.speed_for_level(1);
        self.judgments = 0;
        self.correct_judgments = 0;
        self.track.reset();
        self.queue.clear();
        self.ground = Ground::new(self.options.ground_y);
        self.rounds_played += 1;

        log::info!("Round {} started", self.rounds_played);
        self.set_mode(GameMode::Playing, events);
    }

    /// Fold the round's score into the session records
    pub fn record_score(&mut self, events: &mut Vec<RoundEvent>) {
        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(RoundEvent::NewHighScore { score: self.score });
        }
        if let Some(rank) = self
            .high_scores
            .add_score(self.score, self.level, self.rounds_played)
        {
            log::info!("Round {} ranked #{} with {}", self.rounds_played, rank, self.score);
        }
    }

    /// End the round
    pub fn game_over(&mut self, events: &mut Vec<RoundEvent>) {
        log::info!(
            "Round {} over at tick {}: score {}, {}/{} correct",
            self.rounds_played,
            self.tick,
            self.score,
            self.correct_judgments,
            self.judgments
        );
        self.record_score(events);
        self.set_mode(GameMode::GameOver, events);
    }

    pub fn set_mode(&mut self, mode: GameMode, events: &mut Vec<RoundEvent>) {
        if self.mode == mode {
            return;
        }
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        events.push(RoundEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
    }

    /// Raise level and speed to match the score. Neither ever goes down.
    pub fn update_difficulty(&mut self, events: &mut Vec<RoundEvent>) {
        let level = self.options.level_for_score(self.score);
        if level > self.level {
            self.level = level;
            log::info!("Level {} reached", level);
            events.push(RoundEvent::LevelUp { level });
        }
        self.speed = self.speed.max(self.options.speed_for_level(self.level));
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            mode: self.mode,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            screen_width: self.options.screen_width,
            ground: self.ground,
            slots: self.track.slots(),
            next_to_judge: self.queue.head(),
        }
    }
}

/// What the renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub mode: GameMode,
    pub score: i64,
    pub high_score: i64,
    pub level: u32,
    pub screen_width: i32,
    pub ground: Ground,
    pub slots: &'a [Slot],
    /// Slot the next Accept/Reject applies to
    pub next_to_judge: Option<usize>,
}

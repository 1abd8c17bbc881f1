//! Scrolling slots that carry tile groups across the screen
//!
//! The track owns a fixed number of slots. Each slot cycles hide -> show with a
//! freshly generated group, scrolls left, and is recycled once it leaves the
//! screen.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::TileGroupGenerator;
use super::group::TileGroup;
use crate::assets::ImageHandle;
use crate::error::GameError;
use crate::settings::GameOptions;

/// A slot whose x falls below this has left the screen
pub const OFFSCREEN_X: i32 = -50;
/// Height reserved for a group above the ground line
pub const GROUP_HEIGHT: i32 = 99;
/// Width of one ground sprite; the strip wraps by this much
pub const GROUND_TILE_WIDTH: i32 = 50;
/// Ground strip sits this far above the ground line
pub const GROUND_OFFSET: i32 = 30;

/// One on-screen position that can hold a group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slot {
    pub position: IVec2,
    pub visible: bool,
    pub occupant: Option<TileGroup>,
    /// Judged by the player
    pub answered: bool,
    /// Correct/incorrect marker drawn in place of the group once judged
    pub marker: Option<ImageHandle>,
}

impl Slot {
    fn show(&mut self, group: TileGroup, position: IVec2) {
        self.position = position;
        self.occupant = Some(group);
        self.visible = true;
        self.answered = false;
        self.marker = None;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.occupant = None;
        self.marker = None;
    }

    pub fn is_out_of_screen(&self) -> bool {
        self.position.x < OFFSCREEN_X
    }

    /// Visible and still waiting for a judgment
    pub fn is_pending(&self) -> bool {
        self.visible && !self.answered && self.occupant.is_some()
    }
}

/// Scrolling ground strip under the groups
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Ground {
    pub x: i32,
    pub y: i32,
}

impl Ground {
    pub fn new(ground_y: i32) -> Self {
        Self {
            x: 0,
            y: ground_y - GROUND_OFFSET,
        }
    }

    pub fn advance(&mut self, speed: i32) {
        self.x -= speed;
        if self.x < -GROUND_TILE_WIDTH {
            self.x = self.x.rem_euclid(GROUND_TILE_WIDTH) - GROUND_TILE_WIDTH;
        }
    }
}

/// Fixed-capacity slot array plus the spawn gate
#[derive(Debug, Clone)]
pub struct SpawnTrack {
    slots: Vec<Slot>,
    generator: TileGroupGenerator,
    last_spawn_tick: u64,
    spawn_interval: u64,
    probability_denominator: u32,
    spawn_position: IVec2,
}

impl SpawnTrack {
    pub fn new(options: &GameOptions, generator: TileGroupGenerator) -> Self {
        Self {
            slots: vec![Slot::default(); options.queue_capacity],
            generator,
            last_spawn_tick: 0,
            spawn_interval: options.spawn_interval,
            probability_denominator: options.spawn_probability_denominator,
            spawn_position: IVec2::new(options.screen_width, options.ground_y - GROUP_HEIGHT),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn last_spawn_tick(&self) -> u64 {
        self.last_spawn_tick
    }

    /// Hide every slot and forget spawn history
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.hide();
        }
        self.last_spawn_tick = 0;
    }

    /// Scroll every visible slot left by `speed`.
    ///
    /// Slots that cross the off-screen threshold are recycled. Returns the
    /// indices of those that left without being judged.
    pub fn advance(&mut self, speed: i32) -> Vec<usize> {
        let mut expired = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.visible {
                continue;
            }
            slot.position.x -= speed;
            if slot.is_out_of_screen() {
                if slot.is_pending() {
                    expired.push(index);
                }
                slot.hide();
            }
        }
        expired
    }

    /// Spawn at most one group this tick.
    ///
    /// Hidden slots are tried in index order. Each one needs enough ticks
    /// since the last spawn, a tick on the spawn interval, and its own
    /// 1-in-`denominator` draw; the first slot whose draw succeeds receives
    /// the group. Returns the slot index on spawn.
    pub fn try_spawn(
        &mut self,
        tick: u64,
        min_distance: u64,
        rng: &mut impl Rng,
    ) -> Result<Option<usize>, GameError> {
        let far_enough = tick.saturating_sub(self.last_spawn_tick) > min_distance;
        let on_interval = tick % self.spawn_interval == 0;
        if !far_enough || !on_interval {
            return Ok(None);
        }

        let mut chosen = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.visible {
                continue;
            }
            if rng.random_range(0..self.probability_denominator) == 0 {
                chosen = Some(index);
                break;
            }
        }
        let Some(index) = chosen else {
            return Ok(None);
        };

        let group = self.generator.generate(rng)?;
        log::debug!(
            "Tick {}: spawned {} (fu {}, shown {}) in slot {}",
            tick,
            group.kind.name(),
            group.true_value,
            group.displayed_value,
            index
        );
        self.slots[index].show(group, self.spawn_position);
        self.last_spawn_tick = tick;
        Ok(Some(index))
    }
}

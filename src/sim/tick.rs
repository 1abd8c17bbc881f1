//! Per-tick round controller
//!
//! Advances the round by one frame: mode transitions, scrolling, spawning and
//! the player's judgment of the oldest group on screen.

use super::state::{GameMode, RoundEvent, RoundState};
use crate::error::GameError;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Claim shown is the true fu (also starts a round)
    pub accept: bool,
    /// Claim shown is wrong
    pub reject: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Back to title from pause or game over
    pub cancel: bool,
    /// Start / restart
    pub confirm: bool,
}

impl TickInput {
    fn starts_round(&self) -> bool {
        self.accept || self.confirm
    }
}

impl RoundState {
    /// Advance one frame; see [`tick`]
    pub fn update(&mut self, input: &TickInput) -> Vec<RoundEvent> {
        tick(self, input)
    }
}

/// Advance the round by one tick and report what happened
pub fn tick(state: &mut RoundState, input: &TickInput) -> Vec<RoundEvent> {
    let mut events = Vec::new();

    match state.mode {
        GameMode::Title => {
            if input.starts_round() {
                state.start_round(&mut events);
            }
        }
        GameMode::Paused => {
            if input.toggle_pause {
                state.set_mode(GameMode::Playing, &mut events);
            } else if input.cancel {
                log::info!("Round {} abandoned", state.rounds_played);
                state.record_score(&mut events);
                state.set_mode(GameMode::Title, &mut events);
            }
        }
        GameMode::GameOver => {
            if input.starts_round() {
                state.start_round(&mut events);
            } else if input.cancel {
                state.set_mode(GameMode::Title, &mut events);
            }
        }
        GameMode::Playing => {
            if input.toggle_pause && state.options.pause_enabled {
                state.set_mode(GameMode::Paused, &mut events);
            } else {
                play(state, input, &mut events);
            }
        }
    }

    events
}

/// One Playing tick
fn play(state: &mut RoundState, input: &TickInput, events: &mut Vec<RoundEvent>) {
    state.tick += 1;
    state.update_difficulty(events);

    // Scroll
    let expired = state.track.advance(state.speed);
    state.ground.advance(state.speed);
    for slot in expired {
        if !state.queue.remove(slot) {
            log::error!("Slot {} expired but was not queued", slot);
        }
        events.push(RoundEvent::Expired { slot });
        if state.options.strict_offscreen_failure {
            log::info!("Slot {} left the screen unanswered", slot);
            state.game_over(events);
            return;
        }
    }

    // Spawn
    let min_distance = state.options.min_spawn_distance_for_level(state.level);
    match state.track.try_spawn(state.tick, min_distance, &mut state.rng) {
        Ok(Some(slot)) => {
            state.queue.enqueue(slot);
            if let Some(group) = &state.track.slots()[slot].occupant {
                events.push(RoundEvent::Spawned {
                    slot,
                    kind: group.kind,
                    displayed_value: group.displayed_value,
                });
            }
        }
        Ok(None) => {}
        Err(e) => log::error!("Spawn failed: {}", e),
    }

    // Judge
    if input.accept || input.reject {
        judge(state, input.accept, events);
    }
}

fn judge(state: &mut RoundState, player_accepts: bool, events: &mut Vec<RoundEvent>) {
    let floor = state.options.score_floor;
    match state
        .queue
        .resolve_head(state.track.slots_mut(), player_accepts, floor)
    {
        Ok(judgment) => {
            state.score += judgment.score_delta;
            state.judgments += 1;
            if judgment.player_was_right {
                state.correct_judgments += 1;
            }
            let marker = state.assets.marker(judgment.player_was_right);
            if let Some(slot) = state.track.slots_mut().get_mut(judgment.slot) {
                slot.marker = Some(marker);
            }
            log::debug!(
                "Judged slot {}: fu {} shown {}, {} ({:+})",
                judgment.slot,
                judgment.true_value,
                judgment.displayed_value,
                if judgment.player_was_right { "right" } else { "wrong" },
                judgment.score_delta
            );
            events.push(RoundEvent::Judged(judgment));
        }
        // Judging with nothing on screen is how a round ends
        Err(GameError::EmptyQueue) => state.game_over(events),
        Err(e) => log::error!("Judgment failed: {}", e),
    }
}

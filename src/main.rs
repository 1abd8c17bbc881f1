//! Fu Quiz headless entry point
//!
//! Runs the simulation without a window: a scripted player starts rounds and
//! judges groups with imperfect accuracy, while draw calls go to the log.
//!
//! Usage: `fu-quiz [options.json] [manifest.json]`

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use fu_quiz::assets::{AssetSet, ImageHandle, ManifestAssets};
use fu_quiz::platform::{Key, PressedKeys};
use fu_quiz::renderer::{self, Color, Renderer};
use fu_quiz::settings::GameOptions;
use fu_quiz::sim::{GameMode, RoundEvent, RoundState, TickInput};
use fu_quiz::GameError;

/// One minute at 60 frames per second
const DEMO_TICKS: u32 = 60 * 60;
/// Chance the scripted player judges a group correctly
const PLAYER_ACCURACY: f64 = 0.8;
/// The scripted player answers once the oldest group scrolls past this x
const ANSWER_X: i32 = 200;
/// Frames between logged draw passes
const DRAW_EVERY: u32 = 600;

/// Renderer that writes draw calls to the log
struct LogRenderer;

impl Renderer for LogRenderer {
    fn draw_image(&mut self, handle: ImageHandle, x: i32, y: i32) {
        log::trace!("image {} at ({}, {})", handle.id, x, y);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, _color: Color) {
        log::debug!("text {:?} at ({}, {})", text, x, y);
    }
}

/// Decide which keys the scripted player presses this frame
fn scripted_keys(state: &RoundState, rng: &mut Pcg32, keys: &mut PressedKeys) {
    keys.clear();
    match state.mode {
        GameMode::Title | GameMode::GameOver => keys.press(Key::Confirm),
        GameMode::Paused => keys.press(Key::TogglePause),
        GameMode::Playing => {
            let Some(head) = state.queue.head() else {
                return;
            };
            let slot = &state.track.slots()[head];
            let Some(group) = &slot.occupant else {
                return;
            };
            if slot.position.x > ANSWER_X {
                return;
            }
            let knows = rng.random_bool(PLAYER_ACCURACY);
            let accepts = group.claim_is_correct() == knows;
            keys.press(if accepts { Key::Accept } else { Key::Reject });
        }
    }
}

fn run(options: GameOptions, mut provider: ManifestAssets) -> Result<(), GameError> {
    let assets = Arc::new(AssetSet::load(&mut provider)?);
    let mut state = RoundState::new(options, Arc::clone(&assets))?;
    let mut player_rng = Pcg32::seed_from_u64(state.seed ^ 0x5eed);
    let mut keys = PressedKeys::new();
    let mut sink = LogRenderer;

    for frame in 0..DEMO_TICKS {
        scripted_keys(&state, &mut player_rng, &mut keys);
        let input = TickInput::sample(&keys);

        for event in state.update(&input) {
            match event {
                RoundEvent::Spawned {
                    slot,
                    kind,
                    displayed_value,
                } => log::trace!(
                    "slot {}: kind {} claims {} fu",
                    slot,
                    kind.code(),
                    displayed_value
                ),
                RoundEvent::Judged(judgment) => log::debug!("{:?}", judgment),
                RoundEvent::NewHighScore { score } => log::info!("New high score: {}", score),
                _ => {}
            }
        }

        if frame % DRAW_EVERY == 0 {
            renderer::draw(&state.snapshot(), &assets, &mut sink);
        }
    }

    // Close out a round still in progress so it reaches the leaderboard
    if matches!(state.mode, GameMode::Playing | GameMode::Paused) {
        state.game_over(&mut Vec::new());
    }

    println!("\nRounds played: {}", state.rounds_played);
    println!("High score:    {}", state.high_score);
    if let Some(best) = state.high_scores.top_score() {
        println!("Best round:    {}", best);
    }
    for (i, entry) in state.high_scores.entries.iter().enumerate() {
        println!(
            "  #{:<2} {:>5} (level {}, round {})",
            i + 1,
            entry.score,
            entry.level,
            entry.round
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Fu Quiz (headless) starting...");

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => GameOptions::load(Path::new(&path)),
        None => Ok(GameOptions::default()),
    };
    let provider = match args.next() {
        Some(path) => ManifestAssets::load(Path::new(&path)).map_err(GameError::from),
        None => Ok(ManifestAssets::builtin()),
    };

    match options.and_then(|options| run(options, provider?)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

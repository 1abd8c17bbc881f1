//! Fu Quiz - an arcade quiz on mahjong tile-group fu
//!
//! Tile groups scroll across the screen, each showing a claimed fu value; the
//! player accepts or rejects the claim for the oldest group on screen.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (group generation, spawning, judgment, game modes)
//! - `assets`: Sprite handles resolved once at startup
//! - `renderer`: Draw-call boundary to the host's renderer
//! - `platform`: Input abstraction
//! - `settings`: Tunable round options

pub mod assets;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetProvider, AssetSet, ImageHandle, ManifestAssets};
pub use error::GameError;
pub use highscores::HighScores;
pub use settings::GameOptions;

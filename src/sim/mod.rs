//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, driven by the host
//! - Seeded RNG only, seeded once per session
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod generator;
pub mod group;
pub mod queue;
pub mod state;
pub mod tick;
pub mod tile;
pub mod track;

pub use generator::TileGroupGenerator;
pub use group::{ComposedImage, DISPLAYED_FU_CHOICES, GroupKind, ImagePart, TileGroup, Wait, fu_for};
pub use queue::{AnswerQueue, Judgment};
pub use state::{GameMode, RenderSnapshot, RoundEvent, RoundState};
pub use tick::{TickInput, tick};
pub use tile::{Orientation, Suit, Tile};
pub use track::{GROUND_TILE_WIDTH, GROUP_HEIGHT, Ground, OFFSCREEN_X, Slot, SpawnTrack};

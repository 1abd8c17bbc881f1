//! Procedural tile group generation
//!
//! Builds a random valid group, scores it, draws an independent claimed fu and
//! lays out its sprites. All randomness comes from the caller's RNG so a seeded
//! round replays identically.

use std::sync::Arc;

use rand::Rng;

use super::group::{ComposedImage, GroupKind, TileGroup, Wait, fu_for, random_displayed_fu};
use super::tile::{Orientation, Suit, Tile};
use crate::assets::AssetSet;
use crate::error::GameError;

/// Index of the rotated tile in an open triplet or quad
const CLAIMED_TILE_INDEX: usize = 1;

/// Generates tile groups against a loaded sprite set
#[derive(Debug, Clone)]
pub struct TileGroupGenerator {
    assets: Arc<AssetSet>,
}

impl TileGroupGenerator {
    pub fn new(assets: Arc<AssetSet>) -> Self {
        Self { assets }
    }

    /// Generate a group of a uniformly random kind
    pub fn generate(&self, rng: &mut impl Rng) -> Result<TileGroup, GameError> {
        let code = rng.random_range(1..=GroupKind::ALL.len() as u8);
        self.generate_kind_code(code, rng)
    }

    /// Generate a group from a raw kind code (1..=7)
    pub fn generate_kind_code(&self, code: u8, rng: &mut impl Rng) -> Result<TileGroup, GameError> {
        let kind = GroupKind::from_code(code)?;
        self.generate_kind(kind, rng)
    }

    /// Generate a group of a specific kind
    pub fn generate_kind(&self, kind: GroupKind, rng: &mut impl Rng) -> Result<TileGroup, GameError> {
        let tiles = build_tiles(kind, rng);
        let true_value = fu_for(kind, &tiles);
        let wait = match kind {
            GroupKind::IncompleteRun => Wait::classify(&tiles),
            _ => None,
        };

        let handles = tiles
            .iter()
            .map(|tile| self.assets.tile(tile))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TileGroup {
            kind,
            tiles,
            true_value,
            displayed_value: random_displayed_fu(rng),
            wait,
            composed_image: ComposedImage::compose(&handles),
        })
    }
}

/// Lay out the tiles for a group of the given kind
pub fn build_tiles(kind: GroupKind, rng: &mut impl Rng) -> Vec<Tile> {
    match kind {
        GroupKind::Run => random_run(rng),
        GroupKind::ConcealedTriplet
        | GroupKind::OpenTriplet
        | GroupKind::ConcealedQuad
        | GroupKind::OpenQuad => {
            let tile = Tile::random(rng);
            let mut tiles = vec![tile; kind.tile_count()];
            if kind.is_open() {
                tiles[CLAIMED_TILE_INDEX] = tile.with_orientation(Orientation::Horizontal);
            }
            tiles
        }
        GroupKind::Pair => vec![Tile::random(rng); 2],
        GroupKind::IncompleteRun => {
            let mut tiles = random_run(rng);
            // Drop an end tile, never the middle one
            let removed = if rng.random_bool(0.5) { 0 } else { tiles.len() - 1 };
            tiles.remove(removed);
            tiles
        }
    }
}

/// Three consecutive face-up tiles of a number suit
fn random_run(rng: &mut impl Rng) -> Vec<Tile> {
    let suit = Suit::NUMBERED[rng.random_range(0..Suit::NUMBERED.len())];
    let start = rng.random_range(1..=7u8);
    (start..start + 3).map(|rank| Tile::upright(suit, rank)).collect()
}

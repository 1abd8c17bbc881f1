//! Mahjong tiles
//!
//! A tile is identified by suit and rank; orientation only changes how it is drawn.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tile suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Manzu
    Characters,
    /// Pinzu
    Circles,
    /// Souzu
    Bamboo,
    /// Winds (ranks 1-4) and dragons (ranks 5-7)
    Honor,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Honor, Suit::Characters, Suit::Bamboo, Suit::Circles];
    pub const NUMBERED: [Suit; 3] = [Suit::Characters, Suit::Bamboo, Suit::Circles];

    /// Highest valid rank for this suit
    pub fn max_rank(&self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => 9,
        }
    }

    /// Directory name used by the tile sprite set
    pub fn asset_dir(&self) -> &'static str {
        match self {
            Suit::Characters => "manzu",
            Suit::Circles => "pinzu",
            Suit::Bamboo => "sozu",
            Suit::Honor => "zi",
        }
    }
}

/// How a tile lies on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    /// Rotated: the tile was claimed from another player
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

/// A single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub suit: Suit,
    pub rank: u8,
    pub orientation: Orientation,
}

impl Tile {
    pub fn new(suit: Suit, rank: u8, orientation: Orientation) -> Self {
        debug_assert!((1..=suit.max_rank()).contains(&rank));
        Self {
            suit,
            rank,
            orientation,
        }
    }

    /// Face-up tile
    pub fn upright(suit: Suit, rank: u8) -> Self {
        Self::new(suit, rank, Orientation::Vertical)
    }

    /// Uniform suit, then uniform rank within that suit
    pub fn random(rng: &mut impl Rng) -> Self {
        let suit = Suit::ALL[rng.random_range(0..Suit::ALL.len())];
        let rank = rng.random_range(1..=suit.max_rank());
        Self::upright(suit, rank)
    }

    /// Same tile, different orientation
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    pub fn is_honor(&self) -> bool {
        self.suit == Suit::Honor
    }

    /// Honors and 1/9 number tiles
    pub fn is_terminal_or_honor(&self) -> bool {
        self.is_honor() || self.rank == 1 || self.rank == 9
    }

    /// Logical path of this tile's sprite
    pub fn asset_path(&self) -> String {
        format!(
            "images/pai/{}/{}/{}.png",
            self.suit.asset_dir(),
            self.orientation.as_str(),
            self.rank
        )
    }

    /// Every (suit, rank, orientation) combination that has a sprite
    pub fn all_faces() -> impl Iterator<Item = Tile> {
        Suit::ALL.into_iter().flat_map(|suit| {
            (1..=suit.max_rank()).flat_map(move |rank| {
                [Orientation::Vertical, Orientation::Horizontal]
                    .into_iter()
                    .map(move |orientation| Tile::new(suit, rank, orientation))
            })
        })
    }
}

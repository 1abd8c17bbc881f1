//! Tile groups (taatsu) and their fu
//!
//! The true fu of a group is derived from its structure alone; the displayed
//! fu is an independent draw that may or may not match it.

use glam::{IVec2, UVec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::assets::ImageHandle;
use crate::error::GameError;

/// Every value the displayed fu can take
pub const DISPLAYED_FU_CHOICES: [u8; 6] = [0, 2, 4, 8, 16, 32];

/// Structural kind of a tile group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GroupKind {
    /// Three consecutive number tiles (shuntsu)
    Run = 1,
    /// Anko
    ConcealedTriplet = 2,
    /// Minko
    OpenTriplet = 3,
    /// Ankan
    ConcealedQuad = 4,
    /// Minkan
    OpenQuad = 5,
    /// Head
    Pair = 6,
    /// A run missing one end tile (machi)
    IncompleteRun = 7,
}

impl GroupKind {
    pub const ALL: [GroupKind; 7] = [
        GroupKind::Run,
        GroupKind::ConcealedTriplet,
        GroupKind::OpenTriplet,
        GroupKind::ConcealedQuad,
        GroupKind::OpenQuad,
        GroupKind::Pair,
        GroupKind::IncompleteRun,
    ];

    /// Decode a kind code (1..=7)
    pub fn from_code(code: u8) -> Result<Self, GameError> {
        Self::ALL
            .into_iter()
            .find(|kind| *kind as u8 == code)
            .ok_or(GameError::InvalidGroupKind(code))
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether one tile was claimed from another player
    pub fn is_open(&self) -> bool {
        matches!(self, GroupKind::OpenTriplet | GroupKind::OpenQuad)
    }

    /// Number of tiles in a group of this kind
    pub fn tile_count(&self) -> usize {
        match self {
            GroupKind::Pair | GroupKind::IncompleteRun => 2,
            GroupKind::Run | GroupKind::ConcealedTriplet | GroupKind::OpenTriplet => 3,
            GroupKind::ConcealedQuad | GroupKind::OpenQuad => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Run => "run",
            GroupKind::ConcealedTriplet => "concealed triplet",
            GroupKind::OpenTriplet => "open triplet",
            GroupKind::ConcealedQuad => "concealed quad",
            GroupKind::OpenQuad => "open quad",
            GroupKind::Pair => "pair",
            GroupKind::IncompleteRun => "incomplete run",
        }
    }
}

/// Shape of the wait left by an incomplete run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wait {
    /// Two-sided (ryanmen)
    OpenEnded,
    /// One-sided 1-2 or 8-9 (penchan)
    Edge,
}

impl Wait {
    /// Classify two consecutive tiles left after removing an end of a run.
    ///
    /// Removing the low end leaves an edge only when the remaining high tile
    /// is a 9; removing the high end leaves an edge only when the remaining
    /// low tile is a 1. Both cases reduce to the tiles being 1-2 or 8-9.
    pub fn classify(tiles: &[Tile]) -> Option<Wait> {
        match tiles {
            [low, high] if high.rank == low.rank + 1 => {
                if low.rank == 1 || high.rank == 9 {
                    Some(Wait::Edge)
                } else {
                    Some(Wait::OpenEnded)
                }
            }
            _ => None,
        }
    }
}

/// Fu earned by a group of the given kind made of these tiles.
///
/// Pure: the same structure always yields the same value.
pub fn fu_for(kind: GroupKind, tiles: &[Tile]) -> u8 {
    let Some(first) = tiles.first() else {
        return 0;
    };
    let yaochu = first.is_terminal_or_honor();

    match (kind, yaochu) {
        (GroupKind::Run, _) => 0,
        (GroupKind::ConcealedTriplet, true) => 8,
        (GroupKind::ConcealedTriplet, false) => 4,
        (GroupKind::OpenTriplet, true) => 4,
        (GroupKind::OpenTriplet, false) => 2,
        (GroupKind::ConcealedQuad, true) => 32,
        (GroupKind::ConcealedQuad, false) => 16,
        (GroupKind::OpenQuad, true) => 16,
        (GroupKind::OpenQuad, false) => 8,
        // Only honor pairs score here; seat/round winds are not modelled
        (GroupKind::Pair, _) if first.is_honor() => 2,
        (GroupKind::Pair, _) => 0,
        (GroupKind::IncompleteRun, _) => match Wait::classify(tiles) {
            Some(Wait::Edge) => 2,
            _ => 0,
        },
    }
}

/// Draw a claimed fu value: 2^k for k in 0..=5, with 1 shown as 0
pub fn random_displayed_fu(rng: &mut impl Rng) -> u8 {
    let k = rng.random_range(0..=5u32);
    match 1u8 << k {
        1 => 0,
        fu => fu,
    }
}

/// One sprite within a composed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePart {
    pub handle: ImageHandle,
    /// Top-left corner relative to the composed image
    pub offset: IVec2,
}

/// Tile sprites laid out left-to-right, bottom-aligned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComposedImage {
    pub parts: Vec<ImagePart>,
    pub size: UVec2,
}

impl ComposedImage {
    pub fn compose(handles: &[ImageHandle]) -> Self {
        let width: u32 = handles.iter().map(|h| h.size.x).sum();
        let height = handles.iter().map(|h| h.size.y).max().unwrap_or(0);

        let mut x = 0i32;
        let parts = handles
            .iter()
            .map(|&handle| {
                // Shorter (rotated) tiles sit flush with the bottom edge
                let offset = IVec2::new(x, (height - handle.size.y) as i32);
                x += handle.size.x as i32;
                ImagePart { handle, offset }
            })
            .collect();

        Self {
            parts,
            size: UVec2::new(width, height),
        }
    }
}

/// A generated tile group with its true and claimed fu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGroup {
    pub kind: GroupKind,
    pub tiles: Vec<Tile>,
    /// Fu the group actually earns
    pub true_value: u8,
    /// Fu shown to the player
    pub displayed_value: u8,
    /// Wait shape, for incomplete runs only
    pub wait: Option<Wait>,
    pub composed_image: ComposedImage,
}

impl TileGroup {
    /// Whether the displayed fu is the true fu
    pub fn claim_is_correct(&self) -> bool {
        self.displayed_value == self.true_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::{Orientation, Suit};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn handle(id: u32, w: u32, h: u32) -> ImageHandle {
        ImageHandle {
            id,
            size: UVec2::new(w, h),
        }
    }

    #[test]
    fn test_kind_codes() {
        for kind in GroupKind::ALL {
            assert_eq!(GroupKind::from_code(kind.code()).unwrap(), kind);
        }
        assert!(matches!(
            GroupKind::from_code(0),
            Err(GameError::InvalidGroupKind(0))
        ));
        assert!(matches!(
            GroupKind::from_code(8),
            Err(GameError::InvalidGroupKind(8))
        ));
    }

    #[test]
    fn test_triplet_and_quad_fu() {
        let dragon = [Tile::upright(Suit::Honor, 5); 4];
        let simple = [Tile::upright(Suit::Circles, 5); 4];

        assert_eq!(fu_for(GroupKind::ConcealedTriplet, &dragon[..3]), 8);
        assert_eq!(fu_for(GroupKind::ConcealedTriplet, &simple[..3]), 4);
        assert_eq!(fu_for(GroupKind::OpenTriplet, &dragon[..3]), 4);
        assert_eq!(fu_for(GroupKind::OpenTriplet, &simple[..3]), 2);
        assert_eq!(fu_for(GroupKind::ConcealedQuad, &dragon), 32);
        assert_eq!(fu_for(GroupKind::ConcealedQuad, &simple), 16);
        assert_eq!(fu_for(GroupKind::OpenQuad, &dragon), 16);
        assert_eq!(fu_for(GroupKind::OpenQuad, &simple), 8);
    }

    #[test]
    fn test_terminal_quad_fu() {
        let nines = [Tile::upright(Suit::Bamboo, 9); 4];
        assert_eq!(fu_for(GroupKind::ConcealedQuad, &nines), 32);
    }

    #[test]
    fn test_pair_fu() {
        let wind = [Tile::upright(Suit::Honor, 1); 2];
        let terminal = [Tile::upright(Suit::Characters, 9); 2];
        assert_eq!(fu_for(GroupKind::Pair, &wind), 2);
        assert_eq!(fu_for(GroupKind::Pair, &terminal), 0);
    }

    #[test]
    fn test_wait_classification() {
        let pair = |a: u8| [Tile::upright(Suit::Circles, a), Tile::upright(Suit::Circles, a + 1)];

        assert_eq!(Wait::classify(&pair(1)), Some(Wait::Edge));
        assert_eq!(Wait::classify(&pair(8)), Some(Wait::Edge));
        assert_eq!(Wait::classify(&pair(2)), Some(Wait::OpenEnded));
        assert_eq!(Wait::classify(&pair(7)), Some(Wait::OpenEnded));

        assert_eq!(fu_for(GroupKind::IncompleteRun, &pair(8)), 2);
        assert_eq!(fu_for(GroupKind::IncompleteRun, &pair(4)), 0);
    }

    #[test]
    fn test_compose_bottom_aligned() {
        let image = ComposedImage::compose(&[handle(0, 36, 48), handle(1, 48, 36), handle(2, 36, 48)]);

        assert_eq!(image.size, UVec2::new(120, 48));
        assert_eq!(image.parts[0].offset, IVec2::new(0, 0));
        assert_eq!(image.parts[1].offset, IVec2::new(36, 12));
        assert_eq!(image.parts[2].offset, IVec2::new(84, 0));
        for part in &image.parts {
            assert_eq!(part.offset.y as u32 + part.handle.size.y, image.size.y);
        }
    }

    #[test]
    fn test_compose_empty() {
        let image = ComposedImage::compose(&[]);
        assert!(image.parts.is_empty());
        assert_eq!(image.size, UVec2::ZERO);
    }

    proptest! {
        #[test]
        fn displayed_fu_in_pool(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let fu = random_displayed_fu(&mut rng);
            prop_assert!(DISPLAYED_FU_CHOICES.contains(&fu));
        }

        #[test]
        fn run_fu_is_zero(start in 1u8..=7, suit_index in 0usize..3) {
            let suit = Suit::NUMBERED[suit_index];
            let tiles: Vec<Tile> = (start..start + 3).map(|r| Tile::upright(suit, r)).collect();
            prop_assert_eq!(fu_for(GroupKind::Run, &tiles), 0);
        }

        #[test]
        fn fu_ignores_orientation(rank in 1u8..=9, kind_code in 2u8..=5) {
            let kind = GroupKind::from_code(kind_code).unwrap();
            let upright = vec![Tile::upright(Suit::Characters, rank); kind.tile_count()];
            let mut rotated = upright.clone();
            rotated[1] = rotated[1].with_orientation(Orientation::Horizontal);
            prop_assert_eq!(fu_for(kind, &upright), fu_for(kind, &rotated));
        }
    }
}

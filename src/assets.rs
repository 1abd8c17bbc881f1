//! Sprite assets
//!
//! Image decoding lives with the host. The core only needs opaque handles and
//! their pixel sizes, resolved once at startup through an [`AssetProvider`] and
//! kept in an [`AssetSet`] that is shared read-only for the rest of the process.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use glam::UVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::GameError;
use crate::sim::tile::{Orientation, Tile};

/// Logical path of the marker shown after a right answer
pub const CORRECT_MARKER_PATH: &str = "images/correct.png";
/// Logical path of the marker shown after a wrong answer
pub const INCORRECT_MARKER_PATH: &str = "images/incorrect.png";
/// Logical path of the ground strip sprite
pub const GROUND_PATH: &str = "images/tenbou.png";

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Opaque reference to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    pub id: u32,
    /// Pixel size (width, height)
    pub size: UVec2,
}

/// Errors raised while resolving assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to parse asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("unsupported asset manifest version {found} (expected {supported})")]
    UnsupportedManifestVersion { found: u32, supported: u32 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host capability: resolve a logical asset path to an image
pub trait AssetProvider {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, AssetError>;
}

/// Every sprite the game draws, loaded once at startup
#[derive(Debug, Clone)]
pub struct AssetSet {
    tiles: HashMap<Tile, ImageHandle>,
    pub correct: ImageHandle,
    pub incorrect: ImageHandle,
    pub ground: ImageHandle,
}

impl AssetSet {
    /// Load the full tile set plus markers and ground.
    ///
    /// Any missing sprite is fatal: the game cannot render without its tiles.
    pub fn load(provider: &mut impl AssetProvider) -> Result<Self, AssetError> {
        let mut tiles = HashMap::new();
        for tile in Tile::all_faces() {
            let handle = provider.load_image(&tile.asset_path())?;
            tiles.insert(tile, handle);
        }

        let set = Self {
            tiles,
            correct: provider.load_image(CORRECT_MARKER_PATH)?,
            incorrect: provider.load_image(INCORRECT_MARKER_PATH)?,
            ground: provider.load_image(GROUND_PATH)?,
        };
        log::info!("Loaded {} tile sprites", set.tiles.len());
        Ok(set)
    }

    /// Sprite for a tile in its orientation
    pub fn tile(&self, tile: &Tile) -> Result<ImageHandle, GameError> {
        self.tiles
            .get(tile)
            .copied()
            .ok_or_else(|| GameError::MissingAsset(tile.asset_path()))
    }

    /// Marker shown on a judged group
    pub fn marker(&self, player_was_right: bool) -> ImageHandle {
        if player_was_right {
            self.correct
        } else {
            self.incorrect
        }
    }
}

/// On-disk description of available images: logical path -> [width, height]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub version: u32,
    pub images: BTreeMap<String, [u32; 2]>,
}

/// Asset provider backed by a manifest instead of decoded image files.
///
/// Used by the headless driver and tests; a graphical host supplies its own
/// provider that decodes real sprites.
#[derive(Debug, Clone)]
pub struct ManifestAssets {
    manifest: AssetManifest,
}

impl ManifestAssets {
    pub fn new(manifest: AssetManifest) -> Result<Self, AssetError> {
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            return Err(AssetError::UnsupportedManifestVersion {
                found: manifest.version,
                supported: SUPPORTED_MANIFEST_VERSION,
            });
        }
        Ok(Self { manifest })
    }

    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Built-in manifest with the default tile set dimensions
    pub fn builtin() -> Self {
        let mut images = BTreeMap::new();
        for tile in Tile::all_faces() {
            let size = match tile.orientation {
                Orientation::Vertical => [36, 48],
                Orientation::Horizontal => [48, 36],
            };
            images.insert(tile.asset_path(), size);
        }
        images.insert(CORRECT_MARKER_PATH.to_string(), [64, 64]);
        images.insert(INCORRECT_MARKER_PATH.to_string(), [64, 64]);
        images.insert(GROUND_PATH.to_string(), [50, 30]);

        Self {
            manifest: AssetManifest {
                version: SUPPORTED_MANIFEST_VERSION,
                images,
            },
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }
}

impl AssetProvider for ManifestAssets {
    fn load_image(&mut self, path: &str) -> Result<ImageHandle, AssetError> {
        // Ids follow manifest order so the same path always maps to the same handle
        self.manifest
            .images
            .iter()
            .enumerate()
            .find(|(_, (p, _))| p.as_str() == path)
            .map(|(index, (_, &[w, h]))| ImageHandle {
                id: index as u32,
                size: UVec2::new(w, h),
            })
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::Suit;

    #[test]
    fn test_builtin_set_loads() {
        let set = AssetSet::load(&mut ManifestAssets::builtin()).unwrap();
        let tile = Tile::new(Suit::Honor, 7, Orientation::Horizontal);
        assert_eq!(set.tile(&tile).unwrap().size, UVec2::new(48, 36));
        assert_ne!(set.marker(true), set.marker(false));
    }

    #[test]
    fn test_missing_sprite_is_fatal() {
        let mut manifest = ManifestAssets::builtin().manifest().clone();
        manifest.images.remove("images/pai/sozu/vertical/5.png");
        let mut provider = ManifestAssets::new(manifest).unwrap();

        match AssetSet::load(&mut provider) {
            Err(AssetError::NotFound(path)) => {
                assert_eq!(path, "images/pai/sozu/vertical/5.png")
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_manifest_version_checked() {
        let json = r#"{ "version": 2, "images": {} }"#;
        assert!(matches!(
            ManifestAssets::from_json(json),
            Err(AssetError::UnsupportedManifestVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_manifest_from_json() {
        let json = r#"{ "version": 1, "images": { "images/correct.png": [10, 20] } }"#;
        let mut provider = ManifestAssets::from_json(json).unwrap();
        let handle = provider.load_image(CORRECT_MARKER_PATH).unwrap();
        assert_eq!(handle.size, UVec2::new(10, 20));
        assert!(provider.load_image(GROUND_PATH).is_err());
    }

    #[test]
    fn test_manifest_file_load() {
        let path = std::env::temp_dir().join(format!("fu-quiz-manifest-{}.json", std::process::id()));
        let json = serde_json::to_string(ManifestAssets::builtin().manifest()).unwrap();
        fs::write(&path, json).unwrap();

        let loaded = ManifestAssets::load(&path);
        fs::remove_file(&path).unwrap();
        let mut provider = loaded.unwrap();
        assert!(AssetSet::load(&mut provider).is_ok());

        let missing = path.with_file_name("fu-quiz-no-such-manifest.json");
        assert!(matches!(
            ManifestAssets::load(&missing),
            Err(AssetError::Io { .. })
        ));
    }
}

//! Content factory for loading wheel content from a data directory.

use std::path::{Path, PathBuf};

use wheel_core::{Character, EquipConfig, ItemSet};

use crate::loaders::{AssetCatalog, AssetLoader, CharacterLoader, ConfigLoader, ItemSetLoader, LoadResult};

/// Content factory that loads all wheel content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── assets.ron
/// ├── item_sets.ron
/// └── characters/
///     ├── player.ron
///     └── maid.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load equip configuration from `config.toml`, falling back to defaults
    /// when the file doesn't exist.
    pub fn load_config(&self) -> LoadResult<EquipConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(EquipConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the asset catalog from `assets.ron`.
    pub fn load_assets(&self) -> LoadResult<AssetCatalog> {
        let path = self.data_dir.join("assets.ron");
        AssetLoader::load(&path)
    }

    /// Load custom item sets from `item_sets.ron`; a missing file means no sets.
    pub fn load_item_sets(&self) -> LoadResult<Vec<ItemSet>> {
        let path = self.data_dir.join("item_sets.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        ItemSetLoader::load(&path)
    }

    /// Load a character from `characters/{name}.ron`.
    pub fn load_character(&self, name: &str) -> LoadResult<Character> {
        let path = self.data_dir.join("characters").join(format!("{}.ron", name));
        CharacterLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

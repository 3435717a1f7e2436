//! Equip configuration loader.

use std::path::Path;

use wheel_core::EquipConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for equip configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EquipConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<EquipConfig> {
        let config: EquipConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.max_item_sets == 0 {
            anyhow::bail!("max_item_sets must be at least 1");
        }
        Ok(config)
    }
}

//! Content loaders for reading wheel data from files.
//!
//! Asset catalogs, item sets and characters are RON; equip configuration is
//! TOML.

pub mod assets;
pub mod character;
pub mod config;
pub mod factory;
pub mod item_sets;

pub use assets::{AssetCatalog, AssetLoader, TypeOptions};
pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item_sets::{ItemSetDefinition, ItemSetLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

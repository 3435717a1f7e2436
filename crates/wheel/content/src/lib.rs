//! Built-in item sets and data-driven content loaders.
//!
//! This crate houses the preset item sets shipped with the wheel and provides
//! loaders for RON/TOML data files:
//! - Asset catalogs (groups, assets and their selectable types)
//! - Custom item sets
//! - Characters
//! - Equip configuration
//!
//! Content is consumed by host oracles and the CLI; `wheel-core` never reads
//! files itself.

pub mod callbacks;
pub mod presets;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use callbacks::{color_items, copy_hair_color, statue_copy_colors};
pub use presets::{PresetError, PresetKind, build_item_sets};

#[cfg(feature = "loaders")]
pub use loaders::{
    AssetCatalog, AssetLoader, CharacterLoader, ConfigLoader, ContentFactory, ItemSetDefinition,
    ItemSetLoader, TypeOptions,
};

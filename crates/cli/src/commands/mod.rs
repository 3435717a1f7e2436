//! Command implementations for the wheel CLI
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod equip;
mod options;
mod presets;
mod sort;

pub use equip::Equip;
pub use options::Options;
pub use presets::Presets;
pub use sort::Sort;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use wheel_content::{CharacterLoader, ContentFactory};
use wheel_core::Character;
use wheel_sandbox::{PermissionRules, Sandbox};

use crate::config::CliConfig;

/// Arguments shared by every command that loads content.
#[derive(Args, Clone, Debug)]
pub struct ContentArgs {
    /// Character name under `characters/`, or a path to a character RON file
    #[arg(short, long, value_name = "CHARACTER", default_value = "player")]
    character: String,

    /// Custom data directory (defaults to WHEEL_DATA_DIR, then the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

/// A character together with the file it was read from.
pub struct LoadedCharacter {
    pub character: Character,
    pub path: PathBuf,
}

impl ContentArgs {
    pub fn factory(&self, config: &CliConfig) -> ContentFactory {
        config.factory(self.data_dir.clone())
    }

    pub fn sandbox(&self, config: &CliConfig, rules: PermissionRules) -> Result<Sandbox> {
        let factory = self.factory(config);
        Sandbox::load(&factory, rules).with_context(|| {
            format!(
                "Failed to load wheel content from {}",
                factory.data_dir().display()
            )
        })
    }

    pub fn character(&self, config: &CliConfig) -> Result<LoadedCharacter> {
        let path = character_path(&self.factory(config), &self.character);
        let character = CharacterLoader::load(&path)
            .with_context(|| format!("Failed to load character: {}", path.display()))?;
        Ok(LoadedCharacter { character, path })
    }
}

fn character_path(factory: &ContentFactory, name: &str) -> PathBuf {
    let candidate = Path::new(name);
    if candidate.extension().is_some_and(|ext| ext == "ron") || candidate.components().count() > 1 {
        candidate.to_path_buf()
    } else {
        factory
            .data_dir()
            .join("characters")
            .join(format!("{}.ron", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_resolve_under_characters() {
        let factory = ContentFactory::new("/data");
        assert_eq!(
            character_path(&factory, "doll"),
            PathBuf::from("/data/characters/doll.ron")
        );
    }

    #[test]
    fn paths_are_taken_as_is() {
        let factory = ContentFactory::new("/data");
        assert_eq!(
            character_path(&factory, "saves/alice.ron"),
            PathBuf::from("saves/alice.ron")
        );
        assert_eq!(
            character_path(&factory, "alice.ron"),
            PathBuf::from("alice.ron")
        );
    }
}

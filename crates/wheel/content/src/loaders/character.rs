//! Character loader.

use std::path::Path;

use wheel_core::Character;

use crate::loaders::{LoadResult, read_file};

/// Loader for characters from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character from a RON file.
    pub fn load(path: &Path) -> LoadResult<Character> {
        let content = read_file(path)?;
        let character: Character = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))?;
        Ok(character)
    }

    /// Write a character back to a RON file.
    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(character, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize character: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{CharacterKind, WornItem};

    #[test]
    fn saved_characters_load_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("alice.ron");
        let mut character = Character::player(1, "Alice", 4242);
        character
            .appearance
            .set(WornItem::new("HairFront", "HairFront1").with_color(["#FF0000"]));

        CharacterLoader::save(&path, &character).expect("save");
        let loaded = CharacterLoader::load(&path).expect("load");

        assert_eq!(loaded, character);
    }

    #[test]
    fn minimal_character_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("npc.ron");
        std::fs::write(&path, r#"(id: 7, name: "Maid", kind: Simple)"#).expect("write");

        let loaded = CharacterLoader::load(&path).expect("load");

        assert_eq!(loaded.kind, CharacterKind::Simple);
        assert!(loaded.appearance.is_empty());
        assert!(loaded.settings.block_body_cosplay);
    }
}

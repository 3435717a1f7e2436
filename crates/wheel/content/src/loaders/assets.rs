//! Asset catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wheel_core::{AssetDefinition, AssetName, GroupDefinition, GroupName};

use crate::loaders::{LoadResult, read_file};

/// Selectable types of one extended asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOptions {
    pub group: GroupName,
    pub asset: AssetName,
    /// Type names in declaration order; the first one is the default.
    pub options: Vec<String>,
}

/// Asset catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub groups: Vec<GroupDefinition>,
    pub assets: Vec<AssetDefinition>,
    #[serde(default)]
    pub types: Vec<TypeOptions>,
}

impl AssetCatalog {
    /// Checks that every asset and type table refers to a declared group and asset.
    pub fn validate(&self) -> LoadResult<()> {
        let groups: BTreeSet<&GroupName> = self.groups.iter().map(|group| &group.name).collect();
        if groups.len() != self.groups.len() {
            anyhow::bail!("Asset catalog declares a group twice");
        }

        let mut assets = BTreeSet::new();
        for asset in &self.assets {
            if !groups.contains(&asset.group) {
                anyhow::bail!("Asset {} refers to unknown group {}", asset.name, asset.group);
            }
            if !assets.insert((&asset.group, &asset.name)) {
                anyhow::bail!("Asset {}/{} is declared twice", asset.group, asset.name);
            }
        }
        for table in &self.types {
            if !assets.contains(&(&table.group, &table.asset)) {
                anyhow::bail!("Type table refers to unknown asset {}/{}", table.group, table.asset);
            }
        }
        Ok(())
    }
}

/// Loader for asset catalogs from RON files.
pub struct AssetLoader;

impl AssetLoader {
    /// Load and validate an asset catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<AssetCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate an asset catalog from a RON string.
    pub fn parse(content: &str) -> LoadResult<AssetCatalog> {
        let catalog: AssetCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse asset catalog RON: {}", e))?;
        catalog.validate()?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{AssetFlags, GroupCategory};

    #[test]
    fn catalog_parses_flags_and_types() {
        let catalog = AssetLoader::parse(
            r#"(
                groups: [(name: "ItemArms", category: Item, allow_none: true)],
                assets: [(
                    group: "ItemArms",
                    name: "Rope",
                    description: "Hemp Rope",
                    flags: "ALLOW_LOCK | ENCLOSE",
                    archetype: Some(Typed),
                )],
                types: [(group: "ItemArms", asset: "Rope", options: ["typed=0", "typed=1"])],
            )"#,
        )
        .expect("catalog");

        assert_eq!(catalog.groups[0].category, GroupCategory::Item);
        let rope = &catalog.assets[0];
        assert!(rope.flags.contains(AssetFlags::ALLOW_LOCK | AssetFlags::ENCLOSE));
        assert_eq!(catalog.types[0].options.len(), 2);
    }

    #[test]
    fn assets_in_unknown_groups_are_rejected() {
        let err = AssetLoader::parse(
            r#"(groups: [], assets: [(group: "ItemArms", name: "Rope", description: "Rope")])"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("unknown group"));
    }
}

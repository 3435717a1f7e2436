//! Custom item set loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wheel_core::{
    ActiveHooks, EquipConfig, ItemSet, ItemSetError, LockFlag, StripLevel, WheelItem, WheelSets,
};

use crate::loaders::{LoadResult, read_file};

fn default_level() -> u8 {
    StripLevel::Underwear.as_u8()
}

fn default_weight() -> u8 {
    EquipConfig::MIN_WEIGHT
}

/// Serialized form of a custom item set.
///
/// Levels are stored as raw ordinals; out-of-range values fall back to
/// `Underwear` when the set is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSetDefinition {
    pub name: String,
    pub items: Vec<WheelItem>,
    #[serde(default = "default_level")]
    pub strip_level: u8,
    #[serde(default = "default_level")]
    pub equip_level: u8,
    /// `None` enables the default flags.
    #[serde(default)]
    pub flags: Option<Vec<LockFlag>>,
    #[serde(default)]
    pub hidden: bool,
    /// Wheel weight, clamped when the set is built.
    #[serde(default = "default_weight")]
    pub weight: u8,
    /// Conditional hooks enabled for the set, keyed by `"{owner}-{kind}-{name}"`.
    #[serde(default)]
    pub hooks: ActiveHooks,
}

impl ItemSetDefinition {
    /// Builds the custom item set described by this definition.
    pub fn build(self) -> Result<ItemSet, ItemSetError> {
        let mut set = ItemSet::new(self.name, self.items)?
            .with_raw_levels(self.strip_level, self.equip_level)
            .with_hidden(self.hidden)
            .with_weight(self.weight)
            .with_hooks(self.hooks);
        if let Some(flags) = self.flags {
            set = set.with_flags(flags);
        }
        Ok(set)
    }
}

impl From<&ItemSet> for ItemSetDefinition {
    fn from(set: &ItemSet) -> Self {
        Self {
            name: set.name().to_owned(),
            items: set.items().to_vec(),
            strip_level: set.strip_level().as_u8(),
            equip_level: set.equip_level().as_u8(),
            flags: Some(set.flags().iter().copied().collect()),
            hidden: set.is_hidden(),
            weight: set.weight(),
            hooks: set.hooks().clone(),
        }
    }
}

/// Loader for custom item sets from RON files.
pub struct ItemSetLoader;

impl ItemSetLoader {
    /// Load custom item sets from a RON file containing a list of definitions.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemSet>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse custom item sets from a RON string.
    pub fn parse(content: &str) -> LoadResult<Vec<ItemSet>> {
        let definitions: Vec<ItemSetDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item sets RON: {}", e))?;
        definitions
            .into_iter()
            .map(|definition| {
                let name = definition.name.clone();
                definition
                    .build()
                    .map_err(|e| anyhow::anyhow!("Invalid item set '{}': {}", name, e))
            })
            .collect()
    }

    /// Load custom item sets into the free slots of `slots`.
    pub fn load_into(path: &Path, slots: &mut WheelSets) -> LoadResult<usize> {
        let sets = Self::load(path)?;
        let count = sets.len();
        for set in sets {
            let name = set.name().to_owned();
            slots
                .insert(set)
                .map_err(|e| anyhow::anyhow!("Cannot store item set '{}': {}", name, e))?;
        }
        Ok(count)
    }

    /// Write item sets to a RON file.
    pub fn save<'a, I>(path: &Path, sets: I) -> LoadResult<()>
    where
        I: IntoIterator<Item = &'a ItemSet>,
    {
        let definitions: Vec<ItemSetDefinition> = sets.into_iter().map(Into::into).collect();
        let content = ron::ser::to_string_pretty(&definitions, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize item sets: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETS: &str = r##"[
        (
            name: "Rope Bunny",
            items: [
                (name: "HempRope", group: "ItemArms", type_name: Some("typed=1")),
                (name: "Dress", group: "Cloth", color: Some(["#FFFFFF"])),
            ],
            strip_level: 1,
            equip_level: 9,
            flags: Some([Exclusive, Timer(seconds: 300), Timer(seconds: 120)]),
            weight: 12,
            hooks: {
                "addon-afterItemEquip-Stamp": (
                    target_groups: Some(["ItemArms"]),
                    values: {"label": "rope"},
                ),
            },
        ),
    ]"##;

    #[test]
    fn definitions_build_custom_sets() {
        let sets = ItemSetLoader::parse(SETS).expect("sets");

        let set = &sets[0];
        assert_eq!(set.name(), "Rope Bunny");
        assert!(set.is_custom());
        assert_eq!(set.strip_level(), StripLevel::Clothes);
        assert_eq!(set.equip_level(), StripLevel::Underwear);
        // Non-standard timers are dropped
        assert_eq!(set.flags().len(), 2);
        assert_eq!(set.items()[0].type_name.as_deref(), Some("typed=1"));
        assert_eq!(set.weight(), EquipConfig::MAX_WEIGHT);
        let kwargs = set
            .hooks()
            .get("addon-afterItemEquip-Stamp")
            .expect("active hook");
        assert!(kwargs
            .target_groups
            .as_ref()
            .is_some_and(|groups| groups.len() == 1));
        assert_eq!(
            kwargs.values.get("label"),
            Some(&wheel_core::PropertyValue::Text("rope".into()))
        );
    }

    #[test]
    fn weight_and_hooks_are_optional() {
        let content = r#"[(name: "Plain", items: [(name: "HempRope", group: "ItemArms")])]"#;

        let sets = ItemSetLoader::parse(content).expect("sets");
        assert_eq!(sets[0].weight(), 1);
        assert!(sets[0].hooks().is_empty());
    }

    #[test]
    fn item_lists_must_be_sequences() {
        let content = r#"[(name: "Broken", items: (name: "HempRope", group: "ItemArms"))]"#;

        assert!(ItemSetLoader::parse(content).is_err());
    }

    #[test]
    fn empty_names_are_rejected() {
        let content = r#"[(name: " ", items: [])]"#;

        let err = ItemSetLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("Invalid item set"));
    }

    #[test]
    fn saved_sets_fill_free_slots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sets.ron");
        let sets = ItemSetLoader::parse(SETS).expect("sets");
        ItemSetLoader::save(&path, &sets).expect("save");

        let mut slots = WheelSets::new(2);
        assert_eq!(ItemSetLoader::load_into(&path, &mut slots).expect("load"), 1);
        assert_eq!(slots.get(0).map(ItemSet::name), Some("Rope Bunny"));
        assert!(ItemSetLoader::load_into(&path, &mut slots).is_err());
    }
}

//! [`wheel_core::AssetOracle`] backed by an in-memory catalog.
use std::collections::HashMap;

use wheel_content::AssetCatalog;
use wheel_core::{
    AssetDefinition, AssetName, AssetOracle, Character, CraftedItem, Effect, ExtendedArchetype,
    GroupDefinition, GroupName, ItemProperty, OracleError,
};

/// Crafted names longer than this are truncated.
const MAX_CRAFT_NAME: usize = 30;
const MAX_CRAFT_DESCRIPTION: usize = 100;

/// AssetOracle implementation with static group, asset and type tables
pub struct AssetOracleImpl {
    groups: HashMap<GroupName, GroupDefinition>,
    assets: HashMap<(GroupName, AssetName), AssetDefinition>,
    types: HashMap<(GroupName, AssetName), Vec<String>>,
}

impl AssetOracleImpl {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            assets: HashMap::new(),
            types: HashMap::new(),
        }
    }

    /// Builds the oracle from a loaded catalog.
    pub fn from_catalog(catalog: AssetCatalog) -> Self {
        let mut oracle = Self::new();
        for group in catalog.groups {
            oracle.add_group(group);
        }
        for asset in catalog.assets {
            oracle.add_asset(asset);
        }
        for table in catalog.types {
            oracle.set_type_options(table.group, table.asset, table.options);
        }
        oracle
    }

    pub fn add_group(&mut self, group: GroupDefinition) {
        self.groups.insert(group.name.clone(), group);
    }

    pub fn add_asset(&mut self, asset: AssetDefinition) {
        self.assets
            .insert((asset.group.clone(), asset.name.clone()), asset);
    }

    pub fn set_type_options(&mut self, group: GroupName, asset: AssetName, options: Vec<String>) {
        self.types.insert((group, asset), options);
    }

    /// All asset definitions, in no particular order.
    pub fn all_assets(&self) -> impl Iterator<Item = &AssetDefinition> {
        self.assets.values()
    }

    fn options(&self, asset: &AssetDefinition) -> Option<&Vec<String>> {
        self.types
            .get(&(asset.group.clone(), asset.name.clone()))
            .filter(|options| !options.is_empty())
    }

    /// Resolves `type_name` against the asset's type table.
    ///
    /// `None` selects the first declared option; assets without a table
    /// accept anything.
    pub(crate) fn resolve_type(
        &self,
        asset: &AssetDefinition,
        type_name: Option<&str>,
    ) -> Result<Option<String>, OracleError> {
        let Some(options) = self.options(asset) else {
            return Ok(type_name.map(str::to_owned));
        };
        match type_name {
            None => Ok(options.first().cloned()),
            Some(name) if options.iter().any(|option| option == name) => Ok(Some(name.to_owned())),
            Some(name) => Err(OracleError::InvalidType {
                group: asset.group.clone(),
                name: asset.name.clone(),
                type_name: name.to_owned(),
            }),
        }
    }
}

impl Default for AssetOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

/// Vibrating types are written `vibrating=<level>`; level 0 is off.
fn vibration_level(type_name: &str) -> Option<u32> {
    type_name.strip_prefix("vibrating=")?.parse().ok()
}

fn truncate(text: &mut String, max: usize) {
    if let Some((index, _)) = text.char_indices().nth(max) {
        text.truncate(index);
    }
}

impl AssetOracle for AssetOracleImpl {
    fn group(&self, group: &GroupName) -> Option<GroupDefinition> {
        self.groups.get(group).cloned()
    }

    fn asset(&self, group: &GroupName, name: &AssetName) -> Option<AssetDefinition> {
        self.assets.get(&(group.clone(), name.clone())).cloned()
    }

    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn baseline_property(
        &self,
        asset: &AssetDefinition,
        _character: &Character,
        type_name: Option<&str>,
    ) -> Result<ItemProperty, OracleError> {
        // Bad types surface when the type setter runs; the graph only needs blocks
        let type_name = self.resolve_type(asset, type_name).or_else(|err| {
            tracing::debug!(%err, "falling back to the default type");
            self.resolve_type(asset, None)
        })?;
        let mut property = ItemProperty::default();
        if asset.encloses() {
            property.add_effect(Effect::Enclose);
        }
        if asset.archetype == Some(ExtendedArchetype::Vibrating)
            && type_name
                .as_deref()
                .and_then(vibration_level)
                .is_some_and(|level| level > 0)
        {
            property.add_effect(Effect::Vibrating);
        }
        property.type_name = type_name;
        Ok(property)
    }

    fn type_options(&self, asset: &AssetDefinition) -> Vec<String> {
        self.options(asset).cloned().unwrap_or_default()
    }

    fn validate_craft(&self, craft: &mut CraftedItem, asset: &AssetDefinition) {
        craft.name = craft.name.trim().to_owned();
        if craft.name.is_empty() {
            craft.name = asset.description.clone();
        }
        truncate(&mut craft.name, MAX_CRAFT_NAME);
        truncate(&mut craft.description, MAX_CRAFT_DESCRIPTION);
    }
}

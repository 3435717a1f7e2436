//! Rule-based [`wheel_core::PermissionOracle`].
use std::collections::HashSet;
use std::sync::Arc;

use wheel_core::{
    AssetDefinition, AssetName, AssetOracle, Character, GroupName, PermissionOracle,
};

use super::AssetOracleImpl;

/// Static rules consulted by [`PermissionOracleImpl`].
#[derive(Clone, Debug, Default)]
pub struct PermissionRules {
    /// Assets on every character's blocked or limited list.
    pub blocked_assets: HashSet<(GroupName, AssetName)>,
    /// Groups locked down through owner rules.
    pub owner_rule_groups: HashSet<GroupName>,
    /// Asset categories the current room bans.
    pub banned_categories: HashSet<String>,
    /// Assets whose prerequisites are never met.
    pub unmet_prerequisites: HashSet<(GroupName, AssetName)>,
    pub key_use_blocked: bool,
    pub keys_deposited: bool,
    /// Appearance rule overriding the player's "block body cosplay" setting.
    pub cosplay_override: bool,
}

impl PermissionRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_asset(mut self, group: impl Into<GroupName>, asset: impl Into<AssetName>) -> Self {
        self.blocked_assets.insert((group.into(), asset.into()));
        self
    }

    pub fn owner_rule(mut self, group: impl Into<GroupName>) -> Self {
        self.owner_rule_groups.insert(group.into());
        self
    }

    pub fn ban_category(mut self, category: impl Into<String>) -> Self {
        self.banned_categories.insert(category.into());
        self
    }
}

/// PermissionOracle that derives blocked groups from what the character wears.
pub struct PermissionOracleImpl {
    assets: Arc<AssetOracleImpl>,
    rules: PermissionRules,
}

impl PermissionOracleImpl {
    pub fn new(assets: Arc<AssetOracleImpl>, rules: PermissionRules) -> Self {
        Self { assets, rules }
    }

    pub fn rules(&self) -> &PermissionRules {
        &self.rules
    }

    fn key(asset: &AssetDefinition) -> (GroupName, AssetName) {
        (asset.group.clone(), asset.name.clone())
    }
}

impl PermissionOracle for PermissionOracleImpl {
    fn blocked_or_limited(&self, _character: &Character, asset: &AssetDefinition) -> bool {
        self.rules.blocked_assets.contains(&Self::key(asset))
    }

    fn prerequisites_allow(&self, _character: &Character, asset: &AssetDefinition) -> bool {
        !self.rules.unmet_prerequisites.contains(&Self::key(asset))
    }

    /// A group is blocked when any other worn item blocks it, through its
    /// asset or through its current property.
    fn group_blocked(&self, character: &Character, group: &GroupName) -> bool {
        character
            .appearance
            .iter()
            .filter(|item| &item.group != group)
            .any(|item| {
                item.property.block.contains(group)
                    || self
                        .assets
                        .asset(&item.group, &item.asset)
                        .is_some_and(|asset| asset.block.contains(group))
            })
    }

    fn group_blocked_by_owner_rule(&self, _character: &Character, group: &GroupName) -> bool {
        self.rules.owner_rule_groups.contains(group)
    }

    fn room_allows(&self, asset: &AssetDefinition) -> bool {
        !asset
            .categories
            .iter()
            .any(|category| self.rules.banned_categories.contains(category))
    }

    fn key_use_blocked(&self, character: &Character) -> bool {
        character.is_player() && self.rules.key_use_blocked
    }

    fn key_deposited(&self, _character: &Character) -> bool {
        self.rules.keys_deposited
    }

    fn appearance_rule_allows_cosplay(&self, _character: &Character) -> bool {
        self.rules.cosplay_override
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{GroupCategory, GroupDefinition, WornItem};

    fn oracle(rules: PermissionRules) -> PermissionOracleImpl {
        let mut assets = AssetOracleImpl::new();
        for group in ["ItemHood", "ItemHead", "ItemEars"] {
            assets.add_group(GroupDefinition::new(group, GroupCategory::Item));
        }
        assets.add_asset(AssetDefinition::new("ItemHood", "DroneMask").with_block(["ItemHead"]));
        assets.add_asset(AssetDefinition::new("ItemHead", "Blindfold"));
        PermissionOracleImpl::new(Arc::new(assets), rules)
    }

    #[test]
    fn worn_items_block_other_groups() {
        let oracle = oracle(PermissionRules::new());
        let mut character = Character::default();
        character.appearance.set(WornItem::new("ItemHood", "DroneMask"));

        assert!(oracle.group_blocked(&character, &"ItemHead".into()));
        assert!(!oracle.group_blocked(&character, &"ItemHood".into()));
        assert!(!oracle.group_blocked(&character, &"ItemEars".into()));

        let mut visor = WornItem::new("ItemHead", "Blindfold");
        visor.property.block.push("ItemEars".into());
        character.appearance.set(visor);
        assert!(oracle.group_blocked(&character, &"ItemEars".into()));
    }

    #[test]
    fn static_rules_apply() {
        let oracle = oracle(
            PermissionRules::new()
                .block_asset("ItemHead", "Blindfold")
                .owner_rule("ItemEars")
                .ban_category("SciFi"),
        );
        let character = Character::default();
        let blindfold = AssetDefinition::new("ItemHead", "Blindfold");
        let mut mask = AssetDefinition::new("ItemHood", "DroneMask");
        mask.categories.push("SciFi".into());

        assert!(oracle.blocked_or_limited(&character, &blindfold));
        assert!(oracle.room_allows(&blindfold));
        assert!(!oracle.room_allows(&mask));
        assert!(oracle.group_blocked_by_owner_rule(&character, &"ItemEars".into()));
        assert!(oracle.prerequisites_allow(&character, &mask));
    }
}

//! The removal and equip passes of an equip call.
use std::collections::BTreeSet;

use crate::config::EquipConfig;
use crate::env::{AssetName, GroupName, HostEnv, item_set_type};
use crate::hooks::{HookKind, HookLog, HookRunner, ItemDraft, ValidateEvent};
use crate::item::{ItemCallback, WheelItem};
use crate::lock::KeyCache;
use crate::state::{Character, ItemProperty, WornItem};

use super::{EquipError, EquipFailure, EquipFailureRecord};

/// Entry of the removal pass: a worn blocker or an item of the new batch.
#[derive(Clone, Copy, Debug)]
pub(crate) enum RemovalEntry<'i> {
    Blocker(&'i WornItem),
    Item(usize, &'i WheelItem),
}

impl RemovalEntry<'_> {
    fn group(&self) -> &GroupName {
        match self {
            Self::Blocker(item) => &item.group,
            Self::Item(_, item) => &item.group,
        }
    }

    fn asset_name(&self) -> &AssetName {
        match self {
            Self::Blocker(item) => &item.asset,
            Self::Item(_, item) => &item.name,
        }
    }
}

/// Mutable bookkeeping shared by both passes.
pub(crate) struct EquipState<'c> {
    pub character: &'c mut Character,
    pub keys: KeyCache,
    pub failures: EquipFailureRecord,
    /// Groups whose removal or validation failed; skipped by the equip pass.
    pub failed_groups: BTreeSet<GroupName>,
    /// Indices of items whose equip predicate returned false.
    pub suppressed: BTreeSet<usize>,
    pub removed: Vec<WornItem>,
    pub equipped: Vec<GroupName>,
    pub hook_log: HookLog,
}

impl<'c> EquipState<'c> {
    pub fn new(character: &'c mut Character, keys: KeyCache, hook_log: HookLog) -> Self {
        Self {
            character,
            keys,
            failures: EquipFailureRecord::default(),
            failed_groups: BTreeSet::new(),
            suppressed: BTreeSet::new(),
            removed: Vec::new(),
            equipped: Vec::new(),
            hook_log,
        }
    }

    fn fail(
        &mut self,
        group: &GroupName,
        asset: &AssetName,
        description: &str,
        reasons: Vec<EquipFailure>,
    ) {
        tracing::debug!(%group, %asset, ?reasons, "item failed");
        self.failures.record(group, asset, description, reasons);
        self.failed_groups.insert(group.clone());
    }
}

/// Frees the slots of worn blockers and of the new items.
///
/// Every entry goes through the unequip validators, occupied slot or not, so
/// an item never lands in a group a failed blocker still covers.
pub(crate) struct RemovalPhase<'a, 'e> {
    pub env: &'a HostEnv<'e>,
    pub hooks: &'a HookRunner<'a, 'e>,
}

impl RemovalPhase<'_, '_> {
    pub fn run(
        &self,
        entries: &[RemovalEntry<'_>],
        state: &mut EquipState<'_>,
    ) -> Result<(), EquipError> {
        let assets = self.env.assets()?;
        self.env.permissions()?;

        for entry in entries {
            let group = entry.group();
            let asset_name = entry.asset_name();
            let Some(asset) = assets.asset(group, asset_name) else {
                state.fail(group, asset_name, asset_name.as_str(), vec![EquipFailure::UnknownAsset]);
                continue;
            };

            if let RemovalEntry::Item(index, item) = entry {
                let equip = item
                    .equip
                    .as_ref()
                    .is_none_or(|predicate| predicate.evaluate(state.character, self.env));
                if !equip {
                    tracing::debug!(%group, asset = %asset_name, "item suppressed by its equip predicate");
                    state.suppressed.insert(*index);
                    continue;
                }
            }

            let character: &Character = state.character;
            let old_item = character.worn(group);
            let occupied = old_item.is_some();
            let mut event = ValidateEvent {
                group,
                old_item,
                new_asset: matches!(entry, RemovalEntry::Item(..)).then_some(&asset),
                keys: &mut state.keys,
            };
            let reasons = self.hooks.validate(
                HookKind::ValidateItemUnequip,
                character,
                &mut event,
                &mut state.hook_log,
            );

            if !reasons.is_empty() {
                state.fail(group, asset_name, &asset.description, reasons);
                continue;
            }
            if !occupied {
                continue;
            }

            if let Some(removed) = state.character.appearance.remove(group) {
                tracing::debug!(%group, asset = %removed.asset, "removed worn item");
                state.removed.push(removed);
            }
        }
        Ok(())
    }
}

/// Equips the new items in list order.
pub(crate) struct EquipPhase<'a, 'e> {
    pub env: &'a HostEnv<'e>,
    pub config: &'a EquipConfig,
    pub global_callback: Option<&'a ItemCallback>,
    pub hooks: &'a HookRunner<'a, 'e>,
}

impl EquipPhase<'_, '_> {
    pub fn run(&self, items: &[WheelItem], state: &mut EquipState<'_>) -> Result<(), EquipError> {
        let assets = self.env.assets()?;
        let types = self.env.types()?;
        let session = self.env.session()?;

        for (index, item) in items.iter().enumerate() {
            if state.suppressed.contains(&index) || state.failed_groups.contains(&item.group) {
                continue;
            }
            let Some(asset) = assets.asset(&item.group, &item.name) else {
                continue;
            };

            let character: &Character = state.character;
            let mut event = ValidateEvent {
                group: &item.group,
                old_item: character.worn(&item.group),
                new_asset: Some(&asset),
                keys: &mut state.keys,
            };
            let reasons = self.hooks.validate(
                HookKind::ValidateItemEquip,
                character,
                &mut event,
                &mut state.hook_log,
            );
            if !reasons.is_empty() {
                state.fail(&item.group, &item.name, &asset.description, reasons);
                continue;
            }

            let mut draft = ItemDraft::new(item, &asset);
            self.hooks
                .before_item(state.character, item, &mut draft, &mut state.hook_log);

            let is_item_group = assets.group(&asset.group).is_some_and(|group| group.is_item());
            let mut worn = WornItem {
                group: item.group.clone(),
                asset: item.name.clone(),
                color: draft.color,
                difficulty: asset.difficulty + state.character.bondage_skill + draft.difficulty_modifier,
                property: ItemProperty::default(),
                craft: None,
            };
            if is_item_group && !asset.is_lock() {
                worn.craft = draft.craft;
            }

            let mut reasons = Vec::new();
            if let Err(err) =
                item_set_type(types, &asset, &mut worn, draft.type_name.as_deref(), state.character)
            {
                tracing::warn!(group = %item.group, asset = %item.name, %err, "failed to set item type");
                reasons.push(EquipFailure::TypeRejected {
                    type_name: draft.type_name.clone().unwrap_or_default(),
                    reason: err.to_string(),
                });
            }
            worn.property.merge(&draft.property);
            state.character.appearance.set(worn);

            // Callbacks see the character without the item they're editing
            if let Some((position, mut worn)) = state.character.appearance.detach(&item.group) {
                let callbacks = item.callback.iter().chain(self.global_callback);
                for callback in callbacks {
                    if let Err(err) = callback.call(&mut worn, state.character, self.env) {
                        tracing::warn!(group = %item.group, asset = %item.name, %err, "item callback failed");
                        reasons.push(EquipFailure::Callback {
                            reason: err.to_string(),
                        });
                    }
                }
                state.character.appearance.reattach(position, worn);
            }

            if !reasons.is_empty() {
                state.failures.record(&item.group, &item.name, &asset.description, reasons);
            }
            let character: &Character = state.character;
            if let Some(worn) = character.worn(&item.group) {
                self.hooks.after_item(character, worn, &mut state.hook_log);
            }
            tracing::debug!(group = %item.group, asset = %item.name, "equipped item");
            state.equipped.push(item.group.clone());

            if self.config.strict_refresh {
                session.refresh(state.character, false);
            }
        }
        Ok(())
    }
}

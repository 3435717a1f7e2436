use std::fmt;
use std::sync::Arc;

use crate::env::{AssetDefinition, GroupName, HostEnv};
use crate::equip::EquipFailure;
use crate::item::{CallbackResult, WheelItem};
use crate::lock::KeyCache;
use crate::state::{Character, CraftedItem, ItemProperty, WornItem};

use super::{HookKind, HookKwargs};

/// What every listener sees.
pub struct HookContext<'a, 'e> {
    /// Name of the item set being equipped.
    pub label: &'a str,
    pub character: &'a Character,
    pub env: &'a HostEnv<'e>,
    /// Arguments the item set activated this hook with.
    pub kwargs: Option<&'a HookKwargs>,
}

/// Slot under validation.
pub struct ValidateEvent<'a> {
    pub group: &'a GroupName,
    /// Item currently worn in `group`.
    pub old_item: Option<&'a WornItem>,
    /// `None` for worn blockers, which are only removed.
    pub new_asset: Option<&'a AssetDefinition>,
    pub keys: &'a mut KeyCache,
}

/// Editable description of a new item before it's created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub color: Vec<String>,
    pub type_name: Option<String>,
    /// Merged over the properties the type produces.
    pub property: ItemProperty,
    /// Dropped for non-item groups and locks.
    pub craft: Option<CraftedItem>,
    /// Added to the asset difficulty and the character's bondage skill.
    pub difficulty_modifier: i32,
}

impl ItemDraft {
    pub(crate) fn new(item: &WheelItem, asset: &AssetDefinition) -> Self {
        Self {
            color: item
                .color
                .clone()
                .unwrap_or_else(|| asset.default_color.clone()),
            type_name: item.type_name.clone(),
            property: item.property.clone(),
            craft: item.craft.clone(),
            difficulty_modifier: 0,
        }
    }
}

type OutfitFn = dyn Fn(&HookContext<'_, '_>, &[WheelItem]) -> CallbackResult + Send + Sync;
type ValidateFn = dyn Fn(&HookContext<'_, '_>, &mut ValidateEvent<'_>) -> CallbackResult<Option<EquipFailure>>
    + Send
    + Sync;
type BeforeItemFn =
    dyn Fn(&HookContext<'_, '_>, &WheelItem, &mut ItemDraft) -> CallbackResult + Send + Sync;
type AfterItemFn = dyn Fn(&HookContext<'_, '_>, &WornItem) -> CallbackResult + Send + Sync;
type AfterOutfitFn = dyn Fn(&HookContext<'_, '_>, &[GroupName]) -> CallbackResult + Send + Sync;

/// A hook listener; the variant decides when it runs.
#[derive(Clone)]
pub enum Listener {
    BeforeOutfitEquip(Arc<OutfitFn>),
    /// Returns the reason the slot can't be freed, if any.
    ValidateItemUnequip(Arc<ValidateFn>),
    /// Returns the reason the new item can't be equipped, if any.
    ValidateItemEquip(Arc<ValidateFn>),
    BeforeItemEquip(Arc<BeforeItemFn>),
    AfterItemEquip(Arc<AfterItemFn>),
    /// Receives the groups that got a new item.
    AfterOutfitEquip(Arc<AfterOutfitFn>),
}

impl Listener {
    pub fn before_outfit<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &[WheelItem]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::BeforeOutfitEquip(Arc::new(listener))
    }

    pub fn validate_unequip<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &mut ValidateEvent<'_>) -> CallbackResult<Option<EquipFailure>>
            + Send
            + Sync
            + 'static,
    {
        Self::ValidateItemUnequip(Arc::new(listener))
    }

    pub fn validate_equip<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &mut ValidateEvent<'_>) -> CallbackResult<Option<EquipFailure>>
            + Send
            + Sync
            + 'static,
    {
        Self::ValidateItemEquip(Arc::new(listener))
    }

    pub fn before_item<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &WheelItem, &mut ItemDraft) -> CallbackResult
            + Send
            + Sync
            + 'static,
    {
        Self::BeforeItemEquip(Arc::new(listener))
    }

    pub fn after_item<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &WornItem) -> CallbackResult + Send + Sync + 'static,
    {
        Self::AfterItemEquip(Arc::new(listener))
    }

    pub fn after_outfit<F>(listener: F) -> Self
    where
        F: Fn(&HookContext<'_, '_>, &[GroupName]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::AfterOutfitEquip(Arc::new(listener))
    }

    pub fn kind(&self) -> HookKind {
        match self {
            Self::BeforeOutfitEquip(_) => HookKind::BeforeOutfitEquip,
            Self::ValidateItemUnequip(_) => HookKind::ValidateItemUnequip,
            Self::ValidateItemEquip(_) => HookKind::ValidateItemEquip,
            Self::BeforeItemEquip(_) => HookKind::BeforeItemEquip,
            Self::AfterItemEquip(_) => HookKind::AfterItemEquip,
            Self::AfterOutfitEquip(_) => HookKind::AfterOutfitEquip,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({}, ..)", self.kind())
    }
}

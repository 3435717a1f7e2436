//! Worn items and the property bags attached to them.
use std::collections::BTreeMap;

use crate::env::{AssetName, GroupName};

/// Effects an item can impose on its wearer.
///
/// Only `Lock` and `Enclose` drive equip decisions; the rest are carried
/// through so hosts can round-trip their own data.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    Lock,
    Enclose,
    Freeze,
    Leash,
    BlindNormal,
    GagNormal,
    Vibrating,
}

/// Free-form property value for host-specific fields such as `OverridePriority`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

/// State of a lock attached to an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockState {
    /// Asset name of the lock (e.g. `MetalPadlock`).
    pub lock: AssetName,
    /// Member number of whoever placed the lock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub member_number: Option<u32>,
    /// Member numbers allowed to open a high-security lock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub authorized: Vec<u32>,
    /// Host time (ms) at which a timer lock opens.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remove_timer: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub password: Option<String>,
    /// Whether the item is removed together with the lock once the timer runs out.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remove_item: bool,
}

impl LockState {
    pub fn new(lock: impl Into<AssetName>) -> Self {
        Self {
            lock: lock.into(),
            ..Self::default()
        }
    }

    pub fn with_member_number(mut self, member_number: u32) -> Self {
        self.member_number = Some(member_number);
        self
    }

    pub fn with_authorized<I: IntoIterator<Item = u32>>(mut self, members: I) -> Self {
        self.authorized = members.into_iter().collect();
        self
    }
}

/// Item properties, both as resolved from an asset's baseline and as stored on
/// a worn item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemProperty {
    /// Selected extended-item type, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_name: Option<String>,
    /// Groups blocked in addition to the asset's static block list.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Vec<GroupName>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lock: Option<LockState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra: BTreeMap<String, PropertyValue>,
}

impl ItemProperty {
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn add_effect(&mut self, effect: Effect) {
        if !self.has_effect(effect) {
            self.effects.push(effect);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_name.is_none()
            && self.block.is_empty()
            && self.effects.is_empty()
            && self.lock.is_none()
            && self.extra.is_empty()
    }

    /// Merges `other` into `self`.
    ///
    /// Scalars from `other` win when set; lists are unioned in order.
    pub fn merge(&mut self, other: &ItemProperty) {
        if other.type_name.is_some() {
            self.type_name.clone_from(&other.type_name);
        }
        for group in &other.block {
            if !self.block.contains(group) {
                self.block.push(group.clone());
            }
        }
        for effect in &other.effects {
            self.add_effect(*effect);
        }
        if other.lock.is_some() {
            self.lock.clone_from(&other.lock);
        }
        self.extra
            .extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Special property of a crafted item.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CraftProperty {
    #[default]
    Normal,
    /// Restraint that looks locked but bypasses regular lock rules.
    Decoy,
    Secure,
    Large,
    Small,
    Thin,
    Thick,
    Puzzling,
    Arousing,
    Comfy,
    Painful,
}

/// Crafted metadata attached to an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftedItem {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub property: CraftProperty,
}

impl CraftedItem {
    pub fn new(name: impl Into<String>, property: CraftProperty) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            property,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An item currently worn by a character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WornItem {
    pub group: GroupName,
    pub asset: AssetName,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub property: ItemProperty,
    #[cfg_attr(feature = "serde", serde(default))]
    pub craft: Option<CraftedItem>,
}

impl WornItem {
    pub fn new(group: impl Into<GroupName>, asset: impl Into<AssetName>) -> Self {
        Self {
            group: group.into(),
            asset: asset.into(),
            ..Self::default()
        }
    }

    pub fn with_color<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_craft(mut self, craft: CraftedItem) -> Self {
        self.craft = Some(craft);
        self
    }

    /// Attaches `lock` and the `Lock` effect.
    pub fn with_lock(mut self, lock: LockState) -> Self {
        self.attach_lock(lock);
        self
    }

    pub fn attach_lock(&mut self, lock: LockState) {
        self.property.lock = Some(lock);
        self.property.add_effect(Effect::Lock);
    }

    pub fn lock(&self) -> Option<&LockState> {
        self.property.lock.as_ref()
    }

    pub fn has_effect(&self, effect: Effect) -> bool {
        self.property.has_effect(effect)
    }

    pub fn is_decoy(&self) -> bool {
        self.craft
            .as_ref()
            .is_some_and(|craft| craft.property == CraftProperty::Decoy)
    }
}

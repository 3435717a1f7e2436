use crate::env::{AssetName, GroupName};
use crate::graph::GraphItem;
use crate::state::{CraftedItem, ItemProperty};

use super::{EquipPredicate, ItemCallback};

/// A wearable item as declared by an item set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelItem {
    pub name: AssetName,
    pub group: GroupName,
    /// Per-layer colors; the asset's default color is used when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub craft: Option<CraftedItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub property: ItemProperty,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub equip: Option<EquipPredicate>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub callback: Option<ItemCallback>,
}

impl WheelItem {
    pub fn new(group: impl Into<GroupName>, name: impl Into<AssetName>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            ..Self::default()
        }
    }

    pub fn with_color<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_craft(mut self, craft: CraftedItem) -> Self {
        self.craft = Some(craft);
        self
    }

    pub fn with_property(mut self, property: ItemProperty) -> Self {
        self.property = property;
        self
    }

    pub fn with_equip(mut self, predicate: EquipPredicate) -> Self {
        self.equip = Some(predicate);
        self
    }

    pub fn with_callback(mut self, callback: ItemCallback) -> Self {
        self.callback = Some(callback);
        self
    }
}

impl GraphItem for WheelItem {
    fn group(&self) -> &GroupName {
        &self.group
    }

    fn asset_name(&self) -> &AssetName {
        &self.name
    }

    fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

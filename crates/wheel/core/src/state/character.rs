//! Characters and their worn-item lists.
use crate::env::{AssetName, GroupName};

use super::WornItem;

/// Kind of character an operation acts on.
///
/// Only `Player` and `Simple` characters may be stripped or equipped; `Online`
/// characters belong to other clients.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterKind {
    #[default]
    Player,
    /// Local preview or NPC character without online state.
    Simple,
    Online,
}

/// Settings the character shares with other players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedSettings {
    /// Disallow others from changing body cosplay items (ears, tails, wings, ...).
    #[cfg_attr(feature = "serde", serde(default = "default_block_body_cosplay"))]
    pub block_body_cosplay: bool,
}

#[cfg(feature = "serde")]
fn default_block_body_cosplay() -> bool {
    true
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self {
            block_body_cosplay: true,
        }
    }
}

/// Ordered list of worn items with at most one item per group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Appearance(Vec<WornItem>);

impl Appearance {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WornItem> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[WornItem] {
        &self.0
    }

    pub fn position(&self, group: &GroupName) -> Option<usize> {
        self.0.iter().position(|item| &item.group == group)
    }

    pub fn get(&self, group: &GroupName) -> Option<&WornItem> {
        self.0.iter().find(|item| &item.group == group)
    }

    pub fn get_mut(&mut self, group: &GroupName) -> Option<&mut WornItem> {
        self.0.iter_mut().find(|item| &item.group == group)
    }

    pub fn contains(&self, group: &GroupName) -> bool {
        self.position(group).is_some()
    }

    /// Removes and returns the item worn in `group`.
    pub fn remove(&mut self, group: &GroupName) -> Option<WornItem> {
        let index = self.position(group)?;
        Some(self.0.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> WornItem {
        self.0.remove(index)
    }

    /// Wears `item`, replacing whatever occupied its group in place.
    ///
    /// Returns the replaced item, if any.
    pub fn set(&mut self, item: WornItem) -> Option<WornItem> {
        match self.position(&item.group) {
            Some(index) => Some(std::mem::replace(&mut self.0[index], item)),
            None => {
                self.0.push(item);
                None
            }
        }
    }

    /// Takes the item in `group` out of the list together with its index.
    ///
    /// Pair with [`Appearance::reattach`] to run code that needs both the
    /// item and the rest of the character.
    pub fn detach(&mut self, group: &GroupName) -> Option<(usize, WornItem)> {
        let index = self.position(group)?;
        Some((index, self.0.remove(index)))
    }

    pub fn reattach(&mut self, index: usize, item: WornItem) {
        let index = index.min(self.0.len());
        self.0.insert(index, item);
    }
}

impl<'a> IntoIterator for &'a Appearance {
    type Item = &'a WornItem;
    type IntoIter = std::slice::Iter<'a, WornItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<WornItem> for Appearance {
    fn from_iter<T: IntoIterator<Item = WornItem>>(iter: T) -> Self {
        let mut appearance = Appearance::new();
        for item in iter {
            appearance.set(item);
        }
        appearance
    }
}

/// A character whose appearance the engine edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    /// Session-local identifier.
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub member_number: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: CharacterKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub appearance: Appearance,
    /// Owned assets, including lock keys such as `MetalPadlockKey`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<AssetName>,
    /// Bondage skill level, added to the difficulty of equipped items.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bondage_skill: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: SharedSettings,
}

impl Character {
    pub fn new(id: u32, name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn player(id: u32, name: impl Into<String>, member_number: u32) -> Self {
        Self {
            member_number,
            ..Self::new(id, name, CharacterKind::Player)
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == CharacterKind::Player
    }

    pub fn is_simple(&self) -> bool {
        self.kind == CharacterKind::Simple
    }

    pub fn worn(&self, group: &GroupName) -> Option<&WornItem> {
        self.appearance.get(group)
    }

    pub fn owns(&self, asset: &str) -> bool {
        self.inventory.iter().any(|owned| owned.as_str() == asset)
    }
}

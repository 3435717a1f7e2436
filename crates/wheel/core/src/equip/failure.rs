//! Per-item equip failures.
//!
//! Failures are data: they are collected while an equip runs and handed back
//! in the report, never returned as `Err`.
use std::collections::BTreeMap;
use std::fmt;

use crate::env::{AssetName, GroupName};

/// Reason an item couldn't be removed or equipped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipFailure {
    /// The host doesn't know the asset.
    UnknownAsset,
    /// The worn item is locked and the lock can't be opened.
    LockedItem,
    /// The new item is on the character's blocked or limited list.
    BlockedOrLimited,
    /// The current room disallows the new item's categories.
    RoomDisallowed,
    /// The new item's prerequisites aren't met.
    Prerequisites,
    /// The target group is blocked (e.g. covered by another item).
    GroupBlocked,
    GroupBlockedByOwnerRule,
    /// The host rejected the item's type.
    TypeRejected { type_name: String, reason: String },
    /// An item or global callback failed after the item was equipped.
    Callback { reason: String },
    /// A registered validator hook refused the item.
    Rejected { reason: String },
}

impl fmt::Display for EquipFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAsset => f.write_str("Unknown asset"),
            Self::LockedItem => f.write_str("Locked item equipped"),
            Self::BlockedOrLimited => f.write_str("Blocked or limited item"),
            Self::RoomDisallowed => f.write_str("Item category disallowed in room"),
            Self::Prerequisites => f.write_str("Prerequisites not met"),
            Self::GroupBlocked => f.write_str("Group is blocked"),
            Self::GroupBlockedByOwnerRule => f.write_str("Group is blocked by an owner rule"),
            Self::TypeRejected { type_name, reason } => {
                write!(f, "Type '{type_name}' rejected: {reason}")
            }
            Self::Callback { reason } => write!(f, "Callback failed: {reason}"),
            Self::Rejected { reason } => write!(f, "Rejected: {reason}"),
        }
    }
}

/// Failures recorded against a single item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailureEntry {
    pub group: GroupName,
    pub asset: AssetName,
    /// Human-readable item name; the asset name when the asset is unknown.
    pub description: String,
    pub reasons: Vec<EquipFailure>,
}

/// Failures of one equip call keyed by `"{group}/{asset}"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EquipFailureRecord {
    entries: BTreeMap<String, FailureEntry>,
}

impl EquipFailureRecord {
    pub fn key(group: &GroupName, asset: &AssetName) -> String {
        format!("{group}/{asset}")
    }

    /// Appends `reasons` to the entry of `group`/`asset`.
    pub fn record<I>(&mut self, group: &GroupName, asset: &AssetName, description: &str, reasons: I)
    where
        I: IntoIterator<Item = EquipFailure>,
    {
        let entry = self
            .entries
            .entry(Self::key(group, asset))
            .or_insert_with(|| FailureEntry {
                group: group.clone(),
                asset: asset.clone(),
                description: description.to_owned(),
                reasons: Vec::new(),
            });
        entry.reasons.extend(reasons);
    }

    pub fn get(&self, group: &GroupName, asset: &AssetName) -> Option<&FailureEntry> {
        self.entries.get(&Self::key(group, asset))
    }

    /// Whether any failure was recorded for an item in `group`.
    pub fn contains_group(&self, group: &GroupName) -> bool {
        self.entries.values().any(|entry| &entry.group == group)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FailureEntry)> {
        self.entries.iter()
    }
}

impl fmt::Display for EquipFailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.values().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} ({}): ", entry.description, entry.group)?;
            for (i, reason) in entry.reasons.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{reason}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate_per_item() {
        let mut record = EquipFailureRecord::default();
        let group = GroupName::from("ItemArms");
        let asset = AssetName::from("Rope");

        record.record(&group, &asset, "Hemp Rope", [EquipFailure::LockedItem]);
        record.record(&group, &asset, "Hemp Rope", [EquipFailure::GroupBlocked]);

        assert_eq!(record.len(), 1);
        assert!(record.contains_group(&group));
        let entry = record.get(&group, &asset).expect("entry");
        assert_eq!(entry.reasons, vec![EquipFailure::LockedItem, EquipFailure::GroupBlocked]);
        assert_eq!(
            record.to_string(),
            "Hemp Rope (ItemArms): Locked item equipped, Group is blocked"
        );
    }
}

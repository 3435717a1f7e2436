use crate::config::EquipConfig;

use super::{ItemSet, ItemSetError, WheelOption};

/// Fixed-capacity slots for user-authored item sets.
///
/// Deleting a set leaves an empty slot behind so the option IDs of the other
/// sets stay stable.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelSets {
    slots: Vec<Option<ItemSet>>,
}

impl WheelSets {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn from_config(config: &EquipConfig) -> Self {
        Self::new(config.max_item_sets)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&ItemSet> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemSet)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|set| (index, set)))
    }

    /// Whether `name` is non-empty and unused by any slot other than `selected`.
    pub fn is_name_available(&self, name: &str, selected: Option<usize>) -> bool {
        !name.trim().is_empty()
            && self
                .iter()
                .all(|(index, set)| Some(index) == selected || set.name() != name)
    }

    /// Stores `set` in the first empty slot and returns its index.
    ///
    /// # Errors
    ///
    /// Fails when the name is taken, the set is built-in, or every slot is used.
    pub fn insert(&mut self, set: ItemSet) -> Result<usize, ItemSetError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(ItemSetError::Full {
                capacity: self.capacity(),
            })?;
        self.set(index, set)?;
        Ok(index)
    }

    /// Stores `set` at `index`, returning the set it replaced.
    ///
    /// # Errors
    ///
    /// Fails when the index is out of range, the name is taken by another
    /// slot, or the set is built-in.
    pub fn set(&mut self, index: usize, set: ItemSet) -> Result<Option<ItemSet>, ItemSetError> {
        if index >= self.capacity() {
            return Err(ItemSetError::SlotOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        if !set.is_custom() {
            return Err(ItemSetError::NotCustom(set.name().to_owned()));
        }
        if !self.is_name_available(set.name(), Some(index)) {
            return Err(ItemSetError::DuplicateName(set.name().to_owned()));
        }
        Ok(self.slots[index].replace(set))
    }

    /// Deletes the set at `index`, leaving the slot empty.
    pub fn remove(&mut self, index: usize) -> Option<ItemSet> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Wheel options of every stored set.
    pub fn to_options(&self) -> Vec<WheelOption> {
        self.iter()
            .flat_map(|(index, set)| set.to_options(index))
            .collect()
    }
}

impl Default for WheelSets {
    fn default() -> Self {
        Self::new(EquipConfig::DEFAULT_MAX_ITEM_SETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::WheelItem;

    fn set(name: &str) -> ItemSet {
        ItemSet::new(name, vec![WheelItem::new("ItemArms", "Rope")]).expect("valid")
    }

    #[test]
    fn insert_fills_first_free_slot() {
        let mut sets = WheelSets::new(3);
        assert_eq!(sets.insert(set("a")), Ok(0));
        assert_eq!(sets.insert(set("b")), Ok(1));

        assert!(sets.remove(0).is_some());
        assert!(sets.get(0).is_none());
        assert_eq!(sets.len(), 1);
        assert_eq!(sets.insert(set("c")), Ok(0));
    }

    #[test]
    fn full_and_duplicate_sets_are_rejected() {
        let mut sets = WheelSets::new(1);
        sets.insert(set("a")).expect("free slot");

        assert_eq!(sets.insert(set("b")), Err(ItemSetError::Full { capacity: 1 }));
        assert!(matches!(
            sets.set(0, set("a").builtin()),
            Err(ItemSetError::NotCustom(_))
        ));
        assert!(matches!(
            sets.set(3, set("c")),
            Err(ItemSetError::SlotOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn name_availability_ignores_the_selected_slot() {
        let mut sets = WheelSets::default();
        sets.insert(set("Maid")).expect("free slot");
        sets.insert(set("Statue")).expect("free slot");

        assert!(sets.is_name_available("Maid", Some(0)));
        assert!(!sets.is_name_available("Maid", Some(1)));
        assert!(!sets.is_name_available("Maid", None));
        assert!(!sets.is_name_available("", None));
        assert!(matches!(
            sets.set(1, set("Maid")),
            Err(ItemSetError::DuplicateName(_))
        ));
    }

    #[test]
    fn options_cover_all_slots() {
        let mut sets = WheelSets::default();
        sets.insert(set("a")).expect("free slot");
        sets.insert(set("b")).expect("free slot");

        let options = sets.to_options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[4].id, 512 + 16);
    }
}

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::EquipConfig;
use crate::env::{HostEnv, OracleError};
use crate::equip::{EquipError, EquipReport, EquipRequest, fortune_wheel_equip};
use crate::graph::validate_item_list;
use crate::hooks::{ActiveHooks, WheelHooks};
use crate::state::Character;
use crate::strip::{StripLevel, strip_condition};

use super::{ItemSetError, LockFlag, PreRunCallback, WheelItem};

/// A named, ordered collection of items equipped together.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSet {
    name: String,
    items: Vec<WheelItem>,
    strip_level: StripLevel,
    equip_level: StripLevel,
    flags: BTreeSet<LockFlag>,
    custom: bool,
    hidden: bool,
    weight: u8,
    hooks: ActiveHooks,
    pre_run: Option<PreRunCallback>,
}

/// Entry of the wheel created for one flag of an item set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WheelOption {
    pub id: u32,
    pub description: String,
    /// Whether the option starts out enabled on the wheel.
    pub default: bool,
    pub custom: bool,
    pub flag: LockFlag,
    /// How many slots the option takes on the wheel.
    pub weight: u8,
}

impl ItemSet {
    /// Creates a custom item set with default levels and flags.
    ///
    /// # Errors
    ///
    /// Fails on empty names and malformed item lists.
    pub fn new(name: impl Into<String>, items: Vec<WheelItem>) -> Result<Self, ItemSetError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ItemSetError::EmptyName);
        }
        validate_item_list(&items)?;
        Ok(Self {
            name,
            items,
            strip_level: StripLevel::Underwear,
            equip_level: StripLevel::Underwear,
            flags: LockFlag::ENABLED_BY_DEFAULT.into_iter().collect(),
            custom: true,
            hidden: false,
            weight: EquipConfig::MIN_WEIGHT,
            hooks: ActiveHooks::default(),
            pre_run: None,
        })
    }

    pub fn with_levels(mut self, strip_level: StripLevel, equip_level: StripLevel) -> Self {
        self.strip_level = strip_level;
        self.equip_level = equip_level;
        self
    }

    /// Sets levels from raw ordinals, falling back to `Underwear` on invalid values.
    pub fn with_raw_levels(self, strip_level: u8, equip_level: u8) -> Self {
        let parse = |raw: u8| {
            StripLevel::try_from(raw).unwrap_or_else(|err| {
                tracing::warn!(set = %self.name, %err, "falling back to underwear strip level");
                StripLevel::Underwear
            })
        };
        let (strip, equip) = (parse(strip_level), parse(equip_level));
        self.with_levels(strip, equip)
    }

    /// Replaces the flags, silently dropping non-standard ones.
    pub fn with_flags<I: IntoIterator<Item = LockFlag>>(mut self, flags: I) -> Self {
        self.flags = flags.into_iter().filter(LockFlag::is_known).collect();
        self
    }

    /// Marks the set as built-in (not user editable).
    pub fn builtin(mut self) -> Self {
        self.custom = false;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_pre_run(mut self, pre_run: PreRunCallback) -> Self {
        self.pre_run = Some(pre_run);
        self
    }

    /// Sets the wheel weight, clamped to the configured bounds.
    pub fn with_weight(mut self, weight: u8) -> Self {
        self.weight = weight.clamp(EquipConfig::MIN_WEIGHT, EquipConfig::MAX_WEIGHT);
        self
    }

    /// Conditional hooks this set enables, with their arguments.
    pub fn with_hooks(mut self, hooks: ActiveHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    pub fn strip_level(&self) -> StripLevel {
        self.strip_level
    }

    pub fn equip_level(&self) -> StripLevel {
        self.equip_level
    }

    pub fn flags(&self) -> &BTreeSet<LockFlag> {
        &self.flags
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn pre_run(&self) -> Option<&PreRunCallback> {
        self.pre_run.as_ref()
    }

    pub fn weight(&self) -> u8 {
        self.weight
    }

    pub fn hooks(&self) -> &ActiveHooks {
        &self.hooks
    }

    /// Items that survive the set's equip level on `character`.
    ///
    /// `Appearance` items are kept only if the equip level would strip them;
    /// everything else, including assets unknown to the host, is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if a required oracle is missing.
    pub fn equip_items(
        &self,
        character: &Character,
        env: &HostEnv<'_>,
    ) -> Result<Vec<WheelItem>, OracleError> {
        let condition = strip_condition(self.equip_level, character, env)?;
        let assets = env.assets()?;
        Ok(self
            .items
            .iter()
            .filter(|item| {
                let Some(asset) = assets.asset(&item.group, &item.name) else {
                    return true;
                };
                match assets.group(&asset.group) {
                    Some(group) if group.is_appearance() => condition.matches(&group, &asset),
                    _ => true,
                }
            })
            .cloned()
            .collect())
    }

    /// Equips this set on `character`, locking items according to `flag`.
    ///
    /// # Errors
    ///
    /// See [`fortune_wheel_equip`].
    pub fn equip(
        &self,
        character: &mut Character,
        env: &HostEnv<'_>,
        flag: Option<LockFlag>,
        config: &EquipConfig,
        hooks: &Arc<WheelHooks>,
    ) -> Result<EquipReport, EquipError> {
        let items = self.equip_items(character, env)?;
        let mut request = EquipRequest::new(self.name.clone(), items, self.strip_level)
            .with_config(config.clone())
            .with_hooks(Arc::clone(hooks))
            .with_active_hooks(self.hooks.clone());
        if let Some(flag) = flag {
            request = request.with_global_callback(flag.into_callback());
        }
        if let Some(pre_run) = &self.pre_run {
            request = request.with_pre_run(pre_run.clone());
        }
        fortune_wheel_equip(request, character, env)
    }

    /// Wheel options for every flag of this set.
    ///
    /// `index` is the preset index for built-in sets and the slot index for
    /// custom ones. Indices whose IDs don't fit in a `u32` get no options.
    pub fn to_options(&self, index: usize) -> Vec<WheelOption> {
        let base = if self.custom {
            EquipConfig::CUSTOM_OPTION_BASE
        } else {
            EquipConfig::BUILTIN_OPTION_BASE
        };
        let stride = EquipConfig::MAX_FLAGS as u32;
        let Some(start) = u32::try_from(index)
            .ok()
            .and_then(|index| index.checked_mul(stride))
            .and_then(|offset| offset.checked_add(base))
            .filter(|start| start.checked_add(stride).is_some())
        else {
            tracing::warn!(set = %self.name, index, "item set index out of range for option ids");
            return Vec::new();
        };

        self.flags
            .iter()
            .filter_map(|flag| {
                let ordinal = flag.ordinal()?;
                let description = match flag {
                    LockFlag::Exclusive => self.name.clone(),
                    other => format!("{}: {other}", self.name),
                };
                Some(WheelOption {
                    id: start + ordinal,
                    description,
                    default: flag.is_default_option(),
                    custom: self.custom,
                    flag: *flag,
                    weight: self.weight,
                })
            })
            .collect()
    }
}

/// Expands enabled option IDs into wheel slots, repeating each ID by its
/// option's weight. IDs without an option keep a single slot.
pub fn weighted_option_ids(options: &[WheelOption], enabled: &[u32]) -> Vec<u32> {
    enabled
        .iter()
        .flat_map(|id| {
            let weight = options
                .iter()
                .find(|option| option.id == *id)
                .map_or(1, |option| option.weight.max(1));
            std::iter::repeat_n(*id, usize::from(weight))
        })
        .collect()
}

use std::collections::{BTreeMap, BTreeSet};

use crate::env::{GroupName, HostEnv};
use crate::equip::EquipFailure;
use crate::item::{CallbackResult, WheelItem};
use crate::state::{Character, PropertyValue, WornItem};

use super::{
    HookContext, HookError, HookKind, HookLog, HookLogEntry, HookOutcome, ItemDraft, Listener,
    SkipReason, ValidateEvent, builtin,
};

/// Arguments an item set activates a hook with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HookKwargs {
    /// Limits item-level hooks to these groups.
    pub target_groups: Option<BTreeSet<GroupName>>,
    pub values: BTreeMap<String, PropertyValue>,
}

impl HookKwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.target_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

/// Hooks activated by an item set, keyed by `"{owner}-{kind}-{name}"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActiveHooks {
    entries: BTreeMap<String, HookKwargs>,
}

impl ActiveHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(owner: &str, kind: HookKind, name: &str) -> String {
        format!("{owner}-{kind}-{name}")
    }

    pub fn activate(mut self, owner: &str, kind: HookKind, name: &str, kwargs: HookKwargs) -> Self {
        self.entries.insert(Self::key(owner, kind, name), kwargs);
        self
    }

    pub fn get(&self, key: &str) -> Option<&HookKwargs> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A listener with its identity.
#[derive(Clone, Debug)]
pub struct HookRegistration {
    pub owner: String,
    pub name: String,
    pub description: String,
    /// Runs only when the item set activates it.
    pub conditional: bool,
    /// Lower values run first; ties keep registration order.
    pub priority: i32,
    pub listener: Listener,
}

impl HookRegistration {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, listener: Listener) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            description: String::new(),
            conditional: false,
            priority: 0,
            listener,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn conditional(mut self) -> Self {
        self.conditional = true;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn kind(&self) -> HookKind {
        self.listener.kind()
    }

    pub fn key(&self) -> String {
        ActiveHooks::key(&self.owner, self.kind(), &self.name)
    }

    fn log_entry(&self, group: Option<&GroupName>, outcome: HookOutcome) -> HookLogEntry {
        HookLogEntry {
            owner: self.owner.clone(),
            kind: self.kind(),
            name: self.name.clone(),
            group: group.cloned(),
            outcome,
        }
    }
}

/// Registry of hook listeners, grouped by kind.
#[derive(Clone, Debug, Default)]
pub struct WheelHooks {
    hooks: BTreeMap<HookKind, Vec<HookRegistration>>,
}

impl WheelHooks {
    /// An empty registry; equips run without any checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in validators.
    pub fn builtin() -> Self {
        let mut hooks = Self::new();
        for registration in builtin::registrations() {
            hooks.insert(registration);
        }
        hooks
    }

    /// # Errors
    ///
    /// Fails on empty owners or names and on a second hook with the same
    /// owner, kind and name.
    pub fn register(&mut self, registration: HookRegistration) -> Result<(), HookError> {
        if registration.owner.trim().is_empty() || registration.name.trim().is_empty() {
            return Err(HookError::EmptyName);
        }
        let duplicate = self.get(registration.kind()).iter().any(|existing| {
            existing.owner == registration.owner && existing.name == registration.name
        });
        if duplicate {
            return Err(HookError::Duplicate {
                key: registration.key(),
            });
        }
        tracing::debug!(hook = %registration.key(), "registered hook");
        self.insert(registration);
        Ok(())
    }

    pub fn unregister(&mut self, owner: &str, kind: HookKind, name: &str) -> Option<HookRegistration> {
        let hooks = self.hooks.get_mut(&kind)?;
        let index = hooks
            .iter()
            .position(|hook| hook.owner == owner && hook.name == name)?;
        Some(hooks.remove(index))
    }

    /// Hooks of `kind` in run order.
    pub fn get(&self, kind: HookKind) -> &[HookRegistration] {
        self.hooks.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, registration: HookRegistration) {
        let hooks = self.hooks.entry(registration.kind()).or_default();
        hooks.push(registration);
        hooks.sort_by_key(|hook| hook.priority);
    }
}

/// Runs the hooks of one equip call and logs every invocation.
pub(crate) struct HookRunner<'a, 'e> {
    pub hooks: &'a WheelHooks,
    pub active: &'a ActiveHooks,
    pub label: &'a str,
    pub env: &'a HostEnv<'e>,
}

impl<'a> HookRunner<'a, '_> {
    /// Hooks of `kind` that apply to `group`, with their kwargs.
    fn enabled(
        &self,
        kind: HookKind,
        group: Option<&GroupName>,
        log: &mut HookLog,
    ) -> Vec<(&'a HookRegistration, Option<&'a HookKwargs>)> {
        let mut enabled = Vec::new();
        for registration in self.hooks.get(kind) {
            let kwargs = self.active.get(&registration.key());
            let targets = kwargs.and_then(|kwargs| kwargs.target_groups.as_ref());
            let skip = if registration.conditional && kwargs.is_none() {
                Some(SkipReason::Disabled)
            } else if let (Some(group), Some(targets)) = (group, targets) {
                (!targets.contains(group)).then_some(SkipReason::TargetGroupMismatch)
            } else {
                None
            };
            match skip {
                Some(reason) => {
                    log.push(registration.log_entry(group, HookOutcome::Skipped(reason)));
                }
                None => enabled.push((registration, kwargs)),
            }
        }
        enabled
    }

    fn finish<T>(
        registration: &HookRegistration,
        group: Option<&GroupName>,
        result: CallbackResult<T>,
        log: &mut HookLog,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                log.push(registration.log_entry(group, HookOutcome::Success));
                Some(value)
            }
            Err(err) => {
                tracing::warn!(hook = %registration.key(), group = ?group, %err, "hook listener failed");
                log.push(registration.log_entry(group, HookOutcome::Failed(err.to_string())));
                None
            }
        }
    }

    /// Runs the validators of `kind` and collects their failures.
    pub fn validate(
        &self,
        kind: HookKind,
        character: &Character,
        event: &mut ValidateEvent<'_>,
        log: &mut HookLog,
    ) -> Vec<EquipFailure> {
        let group = event.group;
        let mut reasons = Vec::new();
        for (registration, kwargs) in self.enabled(kind, Some(group), log) {
            let (Listener::ValidateItemUnequip(listener) | Listener::ValidateItemEquip(listener)) =
                &registration.listener
            else {
                continue;
            };
            let context = HookContext {
                label: self.label,
                character,
                env: self.env,
                kwargs,
            };
            let result = listener(&context, &mut *event);
            if let Some(Some(reason)) = Self::finish(registration, Some(group), result, log) {
                reasons.push(reason);
            }
        }
        reasons
    }

    pub fn before_outfit(&self, character: &Character, items: &[WheelItem], log: &mut HookLog) {
        for (registration, kwargs) in self.enabled(HookKind::BeforeOutfitEquip, None, log) {
            let Listener::BeforeOutfitEquip(listener) = &registration.listener else {
                continue;
            };
            let context = HookContext {
                label: self.label,
                character,
                env: self.env,
                kwargs,
            };
            Self::finish(registration, None, listener(&context, items), log);
        }
    }

    pub fn before_item(
        &self,
        character: &Character,
        item: &WheelItem,
        draft: &mut ItemDraft,
        log: &mut HookLog,
    ) {
        let group = Some(&item.group);
        for (registration, kwargs) in self.enabled(HookKind::BeforeItemEquip, group, log) {
            let Listener::BeforeItemEquip(listener) = &registration.listener else {
                continue;
            };
            let context = HookContext {
                label: self.label,
                character,
                env: self.env,
                kwargs,
            };
            Self::finish(registration, group, listener(&context, item, draft), log);
        }
    }

    pub fn after_item(&self, character: &Character, worn: &WornItem, log: &mut HookLog) {
        let group = Some(&worn.group);
        for (registration, kwargs) in self.enabled(HookKind::AfterItemEquip, group, log) {
            let Listener::AfterItemEquip(listener) = &registration.listener else {
                continue;
            };
            let context = HookContext {
                label: self.label,
                character,
                env: self.env,
                kwargs,
            };
            Self::finish(registration, group, listener(&context, worn), log);
        }
    }

    pub fn after_outfit(&self, character: &Character, equipped: &[GroupName], log: &mut HookLog) {
        for (registration, kwargs) in self.enabled(HookKind::AfterOutfitEquip, None, log) {
            let Listener::AfterOutfitEquip(listener) = &registration.listener else {
                continue;
            };
            let context = HookContext {
                label: self.label,
                character,
                env: self.env,
                kwargs,
            };
            Self::finish(registration, None, listener(&context, equipped), log);
        }
    }
}

//! Equip orchestrator.
//!
//! [`fortune_wheel_equip`] replaces part of a character's appearance with a
//! batch of items: it strips clothing, frees the slots that worn blockers and
//! the new items need, equips the new items and runs their callbacks. Problems
//! with single items are collected in the returned [`EquipReport`]; only
//! malformed input, broken host data and missing oracles abort the call.
mod error;
mod failure;
mod phase;

pub use error::EquipError;
pub use failure::{EquipFailure, EquipFailureRecord, FailureEntry};

use std::sync::Arc;

use phase::{EquipPhase, EquipState, RemovalEntry, RemovalPhase};

use crate::config::EquipConfig;
use crate::env::{GroupName, HostEnv};
use crate::graph::{block_superset, validate_item_list};
use crate::hooks::{ActiveHooks, HookLog, HookRunner, WheelHooks};
use crate::item::{ItemCallback, PreRunCallback, WheelItem};
use crate::lock::{KeyCache, blocked_by_enclose};
use crate::state::{Character, WornItem};
use crate::strip::{StripLevel, character_strip, validate_character};

/// Arguments of a single equip call.
#[derive(Clone, Debug)]
pub struct EquipRequest {
    /// Name of the item set, used in logs and the report.
    pub label: String,
    pub items: Vec<WheelItem>,
    pub strip_level: StripLevel,
    /// Runs after every item's own callback.
    pub global_callback: Option<ItemCallback>,
    /// May replace the item list after stripping.
    pub pre_run: Option<PreRunCallback>,
    pub config: EquipConfig,
    /// Listeners consulted by both passes.
    pub hooks: Arc<WheelHooks>,
    /// Conditional hooks enabled for this call and their arguments.
    pub active_hooks: ActiveHooks,
}

impl EquipRequest {
    pub fn new(label: impl Into<String>, items: Vec<WheelItem>, strip_level: StripLevel) -> Self {
        Self {
            label: label.into(),
            items,
            strip_level,
            global_callback: None,
            pre_run: None,
            config: EquipConfig::default(),
            hooks: Arc::new(WheelHooks::builtin()),
            active_hooks: ActiveHooks::default(),
        }
    }

    pub fn with_global_callback(mut self, callback: ItemCallback) -> Self {
        self.global_callback = Some(callback);
        self
    }

    pub fn with_pre_run(mut self, pre_run: PreRunCallback) -> Self {
        self.pre_run = Some(pre_run);
        self
    }

    pub fn with_config(mut self, config: EquipConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<WheelHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_active_hooks(mut self, active_hooks: ActiveHooks) -> Self {
        self.active_hooks = active_hooks;
        self
    }
}

/// Outcome of an equip call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EquipReport {
    pub label: String,
    /// Clothing removed by the strip pass.
    pub stripped: Vec<WornItem>,
    /// Worn items removed to make room, in removal order.
    pub removed: Vec<WornItem>,
    /// Groups that received a new item, in equip order.
    pub equipped: Vec<GroupName>,
    /// Groups of items skipped because their equip predicate returned false.
    pub suppressed: Vec<GroupName>,
    pub failures: EquipFailureRecord,
    /// Every hook invocation, including skipped and failed listeners.
    pub hooks: HookLog,
    /// Nothing happened: the character is enclosed by an item it can't unlock.
    pub aborted_enclosed: bool,
}

impl EquipReport {
    /// Whether every item was handled without failures.
    pub fn is_complete(&self) -> bool {
        !self.aborted_enclosed && self.failures.is_empty()
    }
}

/// Equips `request.items` on `character`.
///
/// Steps, in order: validate the item list, abort if the character is locked
/// inside an enclosing item, strip clothing, run the pre-run callback and the
/// outfit hooks, find worn items blocking the batch, validate and remove
/// blockers and occupants of the target slots, equip the batch, refresh the
/// character.
///
/// # Errors
///
/// Malformed item lists and online characters fail before anything changes.
/// Cyclic block declarations, pre-run failures and missing oracles abort the
/// call where they are detected.
pub fn fortune_wheel_equip(
    request: EquipRequest,
    character: &mut Character,
    env: &HostEnv<'_>,
) -> Result<EquipReport, EquipError> {
    let EquipRequest {
        label,
        items,
        strip_level,
        global_callback,
        pre_run,
        config,
        hooks,
        active_hooks,
    } = request;

    validate_item_list(&items)?;
    validate_character(character)?;

    let mut keys = KeyCache::new();
    if config.abort_when_enclosed && blocked_by_enclose(character, env, &mut keys)? {
        tracing::info!(set = %label, "cannot equip: enclosing item can't be unlocked");
        return Ok(EquipReport {
            label,
            aborted_enclosed: true,
            ..EquipReport::default()
        });
    }

    let stripped = character_strip(strip_level, character, env)?;

    let items = match &pre_run {
        Some(pre_run) => {
            let items = pre_run.call(items, character, env).map_err(EquipError::PreRun)?;
            validate_item_list(&items)?;
            items
        }
        None => items,
    };

    let runner = HookRunner {
        hooks: &hooks,
        active: &active_hooks,
        label: &label,
        env,
    };
    let mut hook_log = HookLog::default();
    runner.before_outfit(character, &items, &mut hook_log);

    // Unknown assets are reported per item by the removal pass
    let assets = env.assets()?;
    let known_items: Vec<&WheelItem> = items
        .iter()
        .filter(|item| assets.asset(&item.group, &item.name).is_some())
        .collect();
    let current: Vec<WornItem> = character
        .appearance
        .iter()
        .filter(|item| assets.asset(&item.group, &item.asset).is_some())
        .cloned()
        .collect();
    let blockers = block_superset(&known_items, &current, character, env)?;

    let entries: Vec<RemovalEntry<'_>> = blockers
        .iter()
        .map(RemovalEntry::Blocker)
        .chain(items.iter().enumerate().map(|(i, item)| RemovalEntry::Item(i, item)))
        .collect();

    let mut state = EquipState::new(character, keys, hook_log);
    RemovalPhase {
        env,
        hooks: &runner,
    }
    .run(&entries, &mut state)?;
    EquipPhase {
        env,
        config: &config,
        global_callback: global_callback.as_ref(),
        hooks: &runner,
    }
    .run(&items, &mut state)?;
    runner.after_outfit(state.character, &state.equipped, &mut state.hook_log);

    let suppressed = state
        .suppressed
        .iter()
        .filter_map(|index| items.get(*index).map(|item| item.group.clone()))
        .collect();
    let EquipState {
        character,
        failures,
        removed,
        equipped,
        hook_log,
        ..
    } = state;

    let session = env.session()?;
    if character.is_player() {
        session.refresh(character, true);
        session.sync_chat_room(character);
        if !failures.is_empty() {
            tracing::warn!(
                set = %label,
                count = failures.len(),
                details = %failures,
                "failed to equip some wheel of fortune items"
            );
        }
    } else {
        session.refresh(character, false);
    }

    tracing::info!(
        set = %label,
        stripped = stripped.len(),
        removed = removed.len(),
        equipped = equipped.len(),
        failed = failures.len(),
        "equipped item set"
    );
    Ok(EquipReport {
        label,
        stripped,
        removed,
        equipped,
        suppressed,
        failures,
        hooks: hook_log,
        aborted_enclosed: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AssetDefinition, AssetFlags, AssetName, GroupCategory, GroupDefinition};
    use crate::graph::items_arg_sort;
    use crate::hooks::{HookKind, HookKwargs, HookOutcome, HookRegistration, Listener, SkipReason};
    use crate::item::{CallbackError, EquipPredicate};
    use crate::lock::LOCK_GROUP;
    use crate::state::{CharacterKind, CraftProperty, CraftedItem, LockState, PropertyValue};
    use crate::testing::FakeHost;

    fn host() -> FakeHost {
        FakeHost::new()
            .with_group(GroupDefinition::new("G1", GroupCategory::Item))
            .with_group(GroupDefinition::new("G2", GroupCategory::Item))
            .with_group(GroupDefinition::new("G3", GroupCategory::Item))
            .with_group(GroupDefinition::new("G4", GroupCategory::Item))
            .with_group(GroupDefinition::new("Cloth", GroupCategory::Appearance))
            .with_group(GroupDefinition::new(LOCK_GROUP, GroupCategory::Item))
            .with_asset(AssetDefinition::new("G1", "Hood").with_block(["G2"]))
            .with_asset(
                AssetDefinition::new("G2", "Gag")
                    .with_default_color(["#000000"])
                    .with_description("Ball Gag"),
            )
            .with_asset(AssetDefinition::new("G3", "OldCuffs").with_flags(AssetFlags::ALLOW_LOCK))
            .with_asset(AssetDefinition::new("G3", "NewCuffs"))
            .with_asset(
                AssetDefinition::new("G4", "OldBelt")
                    .with_flags(AssetFlags::ALLOW_LOCK)
                    .with_description("Old Belt"),
            )
            .with_asset(AssetDefinition::new("G4", "NewBelt"))
            .with_asset(AssetDefinition::new("Cloth", "Dress"))
            .with_asset(AssetDefinition::new(LOCK_GROUP, "SafewordPadlock"))
            .with_asset(AssetDefinition::new(LOCK_GROUP, "HighSecurityPadlock"))
    }

    fn set_a() -> Vec<WheelItem> {
        vec![WheelItem::new("G1", "Hood"), WheelItem::new("G2", "Gag")]
    }

    fn worn(character: &Character, group: &str) -> Option<String> {
        character
            .worn(&GroupName::from(group))
            .map(|item| item.asset.to_string())
    }

    #[test]
    fn equips_blocking_chain_on_empty_character() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let graph = items_arg_sort::<_, WornItem>(&set_a(), &character, &[], &env).expect("graph");
        assert_eq!(graph.sort_priority(&"G1".into()), Some(1));
        assert_eq!(graph.sort_priority(&"G2".into()), Some(0));

        let request = EquipRequest::new("A", set_a(), StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert!(report.is_complete());
        assert_eq!(worn(&character, "G1").as_deref(), Some("Hood"));
        assert_eq!(worn(&character, "G2").as_deref(), Some("Gag"));
        let gag = character.worn(&"G2".into()).expect("gag");
        assert_eq!(gag.color, vec!["#000000".to_owned()]);
    }

    #[test]
    fn equipping_twice_is_idempotent() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(WornItem::new("Cloth", "Dress"));

        let request = EquipRequest::new("A", set_a(), StripLevel::None);
        fortune_wheel_equip(request.clone(), &mut character, &env).expect("first");
        let first = character.appearance.clone();
        fortune_wheel_equip(request, &mut character, &env).expect("second");

        assert_eq!(character.appearance, first);
        assert_eq!(character.appearance.len(), 3);
    }

    #[test]
    fn safeword_locked_item_is_replaced() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character
            .appearance
            .set(WornItem::new("G3", "OldCuffs").with_lock(LockState::new("SafewordPadlock")));

        let request = EquipRequest::new("cuffs", vec![WheelItem::new("G3", "NewCuffs")], StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G3").as_deref(), Some("NewCuffs"));
        assert!(!report.failures.contains_group(&"G3".into()));
        assert_eq!(report.removed.len(), 1);
    }

    #[test]
    fn high_security_lock_without_authorization_keeps_old_item() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(
            WornItem::new("G4", "OldBelt")
                .with_lock(LockState::new("HighSecurityPadlock").with_authorized([5])),
        );

        let request = EquipRequest::new("belt", vec![WheelItem::new("G4", "NewBelt")], StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G4").as_deref(), Some("OldBelt"));
        let entry = report
            .failures
            .get(&"G4".into(), &AssetName::from("NewBelt"))
            .expect("failure entry");
        assert!(entry.reasons.contains(&EquipFailure::LockedItem));
        assert!(report.equipped.is_empty());
    }

    #[test]
    fn locked_blockers_keep_the_groups_they_cover_empty() {
        let mut host = host();
        host.blocks_from_worn = true;
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(
            WornItem::new("G1", "Hood")
                .with_lock(LockState::new("HighSecurityPadlock").with_authorized([5])),
        );

        let request = EquipRequest::new("gag", vec![WheelItem::new("G2", "Gag")], StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G1").as_deref(), Some("Hood"));
        assert_eq!(worn(&character, "G2"), None);
        let hood = report
            .failures
            .get(&"G1".into(), &AssetName::from("Hood"))
            .expect("blocker failure");
        assert_eq!(hood.reasons, vec![EquipFailure::LockedItem]);
        let gag = report
            .failures
            .get(&"G2".into(), &AssetName::from("Gag"))
            .expect("item failure");
        assert_eq!(gag.reasons, vec![EquipFailure::GroupBlocked]);
        assert!(report.removed.is_empty());
        assert!(report.equipped.is_empty());
    }

    #[test]
    fn worn_blockers_are_removed_first() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(WornItem::new("G1", "Hood"));
        character.appearance.set(WornItem::new("G3", "OldCuffs"));

        let request = EquipRequest::new("gag", vec![WheelItem::new("G2", "Gag")], StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G1"), None);
        assert_eq!(worn(&character, "G2").as_deref(), Some("Gag"));
        // Unrelated worn items stay
        assert_eq!(worn(&character, "G3").as_deref(), Some("OldCuffs"));
        assert_eq!(report.removed.len(), 1);
    }

    #[test]
    fn suppressed_items_are_neither_removed_nor_equipped() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(WornItem::new("G3", "OldCuffs"));

        let items = vec![
            WheelItem::new("G3", "NewCuffs").with_equip(EquipPredicate::new(|_, _| false)),
            WheelItem::new("G2", "Gag"),
        ];
        let request = EquipRequest::new("maybe", items, StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G3").as_deref(), Some("OldCuffs"));
        assert_eq!(report.suppressed, vec![GroupName::from("G3")]);
        assert!(report.removed.is_empty());
        assert_eq!(report.equipped, vec![GroupName::from("G2")]);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn alternatives_for_the_same_group_pick_the_enabled_one() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let items = vec![
            WheelItem::new("G3", "OldCuffs").with_equip(EquipPredicate::new(|_, _| false)),
            WheelItem::new("G3", "NewCuffs").with_equip(EquipPredicate::new(|_, _| true)),
        ];
        let request = EquipRequest::new("either", items, StripLevel::None);
        fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G3").as_deref(), Some("NewCuffs"));
    }

    #[test]
    fn unknown_assets_are_recorded_and_skipped() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let items = vec![WheelItem::new("G1", "Missing"), WheelItem::new("G2", "Gag")];
        let request = EquipRequest::new("partial", items, StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        let entry = report
            .failures
            .get(&"G1".into(), &AssetName::from("Missing"))
            .expect("failure entry");
        assert_eq!(entry.reasons, vec![EquipFailure::UnknownAsset]);
        assert_eq!(entry.description, "Missing");
        assert_eq!(worn(&character, "G2").as_deref(), Some("Gag"));
    }

    #[test]
    fn blocked_or_limited_items_are_not_equipped() {
        let mut host = host();
        host.blocked_assets.insert(AssetName::from("Gag"));
        let env = host.env();
        let mut character = host.player.clone();

        let request = EquipRequest::new("A", set_a(), StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G2"), None);
        let entry = report
            .failures
            .get(&"G2".into(), &AssetName::from("Gag"))
            .expect("failure entry");
        assert_eq!(entry.description, "Ball Gag");
        assert_eq!(entry.reasons, vec![EquipFailure::BlockedOrLimited]);
    }

    #[test]
    fn malformed_item_lists_abort_before_mutation() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(WornItem::new("Cloth", "Dress"));
        let before = character.clone();

        let items = vec![WheelItem::new("G1", "Hood"), WheelItem::new("G2", "")];
        let request = EquipRequest::new("broken", items, StripLevel::All);
        let err = fortune_wheel_equip(request, &mut character, &env).unwrap_err();

        assert!(matches!(err, EquipError::Graph(crate::graph::GraphError::InvalidItemList { .. })));
        assert_eq!(character, before);
    }

    #[test]
    fn online_characters_are_rejected() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.kind = CharacterKind::Online;

        let request = EquipRequest::new("A", set_a(), StripLevel::None);
        let err = fortune_wheel_equip(request, &mut character, &env).unwrap_err();

        assert!(matches!(err, EquipError::Strip(_)));
    }

    #[test]
    fn callbacks_run_item_first_then_global() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let item_cb = ItemCallback::new(|item, _, _| {
            item.color.push("item".into());
            Ok(())
        });
        let global_cb = ItemCallback::new(|item, _, _| {
            item.color.push("global".into());
            Ok(())
        });
        let items = vec![WheelItem::new("G3", "NewCuffs").with_callback(item_cb)];
        let request =
            EquipRequest::new("cb", items, StripLevel::None).with_global_callback(global_cb);
        fortune_wheel_equip(request, &mut character, &env).expect("equip");

        let cuffs = character.worn(&"G3".into()).expect("cuffs");
        assert_eq!(cuffs.color, vec!["item".to_owned(), "global".to_owned()]);
    }

    #[test]
    fn failing_callbacks_are_reported_but_keep_the_item() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let items = vec![WheelItem::new("G3", "NewCuffs").with_callback(ItemCallback::new(
            |_, _, _| Err(CallbackError::Message("boom".into())),
        ))];
        let request = EquipRequest::new("cb", items, StripLevel::None);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G3").as_deref(), Some("NewCuffs"));
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn pre_run_replaces_the_item_list() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let pre_run = PreRunCallback::new(|mut items, _, _| {
            items.retain(|item| item.group.as_str() != "G1");
            Ok(items)
        });
        let request = EquipRequest::new("A", set_a(), StripLevel::None).with_pre_run(pre_run);
        fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G1"), None);
        assert_eq!(worn(&character, "G2").as_deref(), Some("Gag"));
    }

    #[test]
    fn crafts_difficulty_and_types_are_applied() {
        let host = host().with_asset(
            AssetDefinition::new("G1", "Mittens")
                .with_archetype(crate::env::ExtendedArchetype::Typed),
        );
        let env = host.env();
        let mut character = host.player.clone();
        character.bondage_skill = 3;

        let items = vec![
            WheelItem::new("G1", "Mittens")
                .with_type("Strict")
                .with_craft(CraftedItem::new("Permanent Mittens", CraftProperty::Secure)),
        ];
        let request = EquipRequest::new("typed", items, StripLevel::None);
        fortune_wheel_equip(request, &mut character, &env).expect("equip");

        let mittens = character.worn(&"G1".into()).expect("mittens");
        assert_eq!(mittens.difficulty, 3);
        assert_eq!(mittens.property.type_name.as_deref(), Some("Strict"));
        assert_eq!(mittens.craft.as_ref().map(|c| c.property), Some(CraftProperty::Secure));
    }

    #[test]
    fn enclosed_characters_abort_without_changes() {
        let host = host().with_asset(AssetDefinition::new("G4", "Box").with_flags(AssetFlags::ENCLOSE));
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(WornItem::new("Cloth", "Dress"));
        character
            .appearance
            .set(WornItem::new("G4", "Box").with_lock(LockState::new("HighSecurityPadlock")));
        let before = character.clone();

        let request = EquipRequest::new("A", set_a(), StripLevel::All);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert!(report.aborted_enclosed);
        assert!(!report.is_complete());
        assert_eq!(character, before);
    }

    #[test]
    fn player_equips_push_and_sync() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        fortune_wheel_equip(EquipRequest::new("A", set_a(), StripLevel::None), &mut character, &env)
            .expect("equip");
        assert_eq!(host.refreshes(), vec![(character.id, true)]);
        assert_eq!(host.syncs(), 1);

        let mut npc = Character::new(7, "Preview", CharacterKind::Simple);
        let config = EquipConfig::default().with_strict_refresh(true);
        let request = EquipRequest::new("A", set_a(), StripLevel::None).with_config(config);
        fortune_wheel_equip(request, &mut npc, &env).expect("equip");
        // One refresh per item plus the final one, no sync
        assert_eq!(host.refreshes().len(), 4);
        assert_eq!(host.syncs(), 1);
    }

    #[test]
    fn registered_hooks_shape_and_veto_items() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();

        let mut hooks = WheelHooks::builtin();
        hooks
            .register(HookRegistration::new(
                "addon",
                "NoCuffs",
                Listener::validate_equip(|_, event| {
                    Ok(event
                        .new_asset
                        .filter(|asset| asset.name.as_str() == "NewCuffs")
                        .map(|_| EquipFailure::Rejected {
                            reason: "no cuffs".into(),
                        }))
                }),
            ))
            .expect("register validator");
        hooks
            .register(
                HookRegistration::new(
                    "addon",
                    "Tint",
                    Listener::before_item(|context, _, draft| {
                        let color = context.kwargs.and_then(|kwargs| kwargs.values.get("color"));
                        if let Some(PropertyValue::Text(color)) = color {
                            draft.color = vec![color.clone()];
                        }
                        draft.difficulty_modifier += 2;
                        Ok(())
                    }),
                )
                .conditional(),
            )
            .expect("register tint");
        hooks
            .register(HookRegistration::new(
                "addon",
                "Count",
                Listener::after_outfit(|_, equipped| {
                    if equipped.len() == 2 {
                        Ok(())
                    } else {
                        Err(CallbackError::Message(format!("{} equipped", equipped.len())))
                    }
                }),
            ))
            .expect("register counter");

        let active = ActiveHooks::new().activate(
            "addon",
            HookKind::BeforeItemEquip,
            "Tint",
            HookKwargs::new()
                .with_target_groups(["G2"])
                .with_value("color", PropertyValue::Text("#FF0000".into())),
        );
        let items = vec![
            WheelItem::new("G1", "Hood"),
            WheelItem::new("G2", "Gag"),
            WheelItem::new("G3", "NewCuffs"),
        ];
        let request = EquipRequest::new("hooked", items, StripLevel::None)
            .with_hooks(Arc::new(hooks))
            .with_active_hooks(active);
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        let hood = character.worn(&"G1".into()).expect("hood");
        let gag = character.worn(&"G2".into()).expect("gag");
        assert_eq!(gag.color, vec!["#FF0000".to_owned()]);
        assert_eq!(gag.difficulty, hood.difficulty + 2);
        assert_eq!(worn(&character, "G3"), None);
        let cuffs = report
            .failures
            .get(&"G3".into(), &AssetName::from("NewCuffs"))
            .expect("vetoed cuffs");
        assert_eq!(
            cuffs.reasons,
            vec![EquipFailure::Rejected {
                reason: "no cuffs".into()
            }]
        );

        let tint: Vec<_> = report
            .hooks
            .for_hook("addon", HookKind::BeforeItemEquip, "Tint")
            .map(|entry| (entry.group.clone(), entry.outcome.clone()))
            .collect();
        assert_eq!(
            tint,
            vec![
                (
                    Some(GroupName::from("G1")),
                    HookOutcome::Skipped(SkipReason::TargetGroupMismatch)
                ),
                (Some(GroupName::from("G2")), HookOutcome::Success),
            ]
        );
        assert_eq!(report.hooks.errors().count(), 0);
    }

    #[test]
    fn an_empty_registry_runs_no_checks() {
        let host = host();
        let env = host.env();
        let mut character = host.player.clone();
        character.appearance.set(
            WornItem::new("G4", "OldBelt")
                .with_lock(LockState::new("HighSecurityPadlock").with_authorized([5])),
        );

        let request = EquipRequest::new("belt", vec![WheelItem::new("G4", "NewBelt")], StripLevel::None)
            .with_hooks(Arc::new(WheelHooks::new()));
        let report = fortune_wheel_equip(request, &mut character, &env).expect("equip");

        assert_eq!(worn(&character, "G4").as_deref(), Some("NewBelt"));
        assert!(report.is_complete());
        assert!(report.hooks.is_empty());
    }
}

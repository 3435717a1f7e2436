//! End-to-end equips against the bundled catalog and characters.
use wheel_content::{ContentFactory, PresetKind};
use wheel_core::{
    AssetName, Character, EquipFailure, GroupName, HookRegistration, Listener, LockFlag,
    LockState, WornItem,
};
use wheel_sandbox::{PermissionRules, Sandbox, SessionEvent, SessionOracleImpl};

const CLOCK_MS: u64 = 1_750_000_000_000;

fn sandbox_with(rules: PermissionRules) -> Sandbox {
    Sandbox::load_with_session(
        &ContentFactory::bundled(),
        rules,
        SessionOracleImpl::with_clock(CLOCK_MS),
    )
    .expect("bundled content loads")
}

fn sandbox() -> Sandbox {
    sandbox_with(PermissionRules::new())
}

fn character(name: &str) -> Character {
    ContentFactory::bundled()
        .load_character(name)
        .expect("bundled character loads")
}

fn worn<'a>(character: &'a Character, group: &str) -> Option<&'a WornItem> {
    character.worn(&GroupName::from(group))
}

fn worn_asset(character: &Character, group: &str) -> Option<String> {
    worn(character, group).map(|item| item.asset.to_string())
}

fn reasons(report: &wheel_core::EquipReport, group: &str, asset: &str) -> Vec<EquipFailure> {
    report
        .failures
        .get(&GroupName::from(group), &AssetName::from(asset))
        .map(|entry| entry.reasons.clone())
        .unwrap_or_default()
}

#[test]
fn builtin_sets_put_blockers_last() {
    let sandbox = sandbox();
    let player = character("player");
    let sets = sandbox.builtin_sets(&player).expect("presets build");
    assert_eq!(sets.len(), 4);

    let assets = sandbox.host().assets();
    for set in &sets {
        let items = set.items();
        for (position, item) in items.iter().enumerate() {
            let Some(asset) = wheel_core::AssetOracle::asset(assets, &item.group, &item.name)
            else {
                panic!("{}: unknown asset {}/{}", set.name(), item.group, item.name);
            };
            for blocked in &asset.block {
                if let Some(target) = items.iter().position(|other| &other.group == blocked) {
                    assert!(
                        target < position,
                        "{}: {} must come after {}",
                        set.name(),
                        item.group,
                        blocked
                    );
                }
            }
        }
    }
}

#[test]
fn maid_set_equips_on_the_player() {
    let sandbox = sandbox();
    let mut player = character("player");
    let set = sandbox.find_set(&player, "maid").expect("maid preset");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert!(report.is_complete(), "{:?}", report.failures);
    assert_eq!(report.equipped.len(), set.items().len());
    assert_eq!(worn_asset(&player, "Cloth").as_deref(), Some("MaidOutfit2"));
    assert_eq!(worn_asset(&player, "ItemArms").as_deref(), Some("StraitLeotard"));
    assert!(worn(&player, "Panties").is_none(), "underwear is stripped");
    assert_eq!(worn_asset(&player, "HairAccessory1").as_deref(), Some("Ears1"));

    let boots = worn(&player, "ItemBoots").expect("boots");
    assert_eq!(boots.property.type_name.as_deref(), Some("typed=1"));
    assert_eq!(boots.craft.as_ref().map(|c| c.name.as_str()), Some("Maid Heels"));
    assert_eq!(boots.difficulty, 4 + player.bondage_skill);

    assert_eq!(
        sandbox.host().session().drain(),
        vec![
            SessionEvent::Refresh { character: 1, push: true },
            SessionEvent::ChatRoomSync { character: 1 },
        ]
    );
}

#[test]
fn reequipping_a_non_blocking_set_is_idempotent() {
    let sandbox = sandbox();
    let mut player = character("player");
    let set = sandbox.find_set(&player, "Rope Bunny").expect("custom set");

    sandbox.equip(&set, &mut player, None).expect("first equip");
    let first = player.appearance.clone();
    let report = sandbox.equip(&set, &mut player, None).expect("second equip");

    assert!(report.is_complete());
    assert_eq!(player.appearance, first);
    assert_eq!(worn_asset(&player, "ItemArms").as_deref(), Some("HempRope"));
}

#[test]
fn reequipping_keeps_items_covered_by_their_own_set() {
    let sandbox = sandbox();
    let mut player = character("player");
    let set = sandbox.find_set(&player, "maid").expect("maid preset");

    sandbox.equip(&set, &mut player, None).expect("first equip");
    let report = sandbox.equip(&set, &mut player, None).expect("second equip");

    // The leotard still covers the hands when the mittens come up for removal
    assert_eq!(
        reasons(&report, "ItemHands", "FuturisticMittens"),
        vec![EquipFailure::GroupBlocked]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.equipped.len(), set.items().len() - 1);
    assert_eq!(worn_asset(&player, "ItemHands").as_deref(), Some("FuturisticMittens"));
}

#[test]
fn statue_picks_the_cosplay_variant_and_recolors_the_body() {
    let sandbox = sandbox();
    let mut player = character("player");
    let set = sandbox
        .find_set(&player, PresetKind::Statue.as_ref())
        .expect("statue preset");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert!(report.is_complete(), "{:?}", report.failures);
    assert_eq!(report.suppressed.len(), 2);
    assert!(report.suppressed.contains(&GroupName::from("Suit")));
    assert_eq!(worn_asset(&player, "SuitLower").as_deref(), Some("ReverseBunnySuit"));
    assert!(worn(&player, "Suit").is_none());

    let hair = worn(&player, "HairFront").expect("hair");
    assert_eq!(hair.color, vec!["#484747".to_owned()]);
    let ears = worn(&player, "HairAccessory1").expect("ears");
    assert_eq!(ears.color.len(), 2);
    assert_eq!(worn_asset(&player, "ItemHood").as_deref(), Some("KirugumiMask"));
}

#[test]
fn statue_uses_the_catsuit_when_cosplay_is_blocked() {
    let sandbox = sandbox();
    let mut player = character("player");
    player.settings.block_body_cosplay = true;
    let set = sandbox.find_set(&player, "Petrification").expect("statue preset");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert!(report.suppressed.contains(&GroupName::from("SuitLower")));
    assert_eq!(worn_asset(&player, "SuitLower").as_deref(), Some("SeamlessCatsuit"));
    assert_eq!(worn_asset(&player, "Suit").as_deref(), Some("SeamlessCatsuit"));
    let hair = worn(&player, "HairFront").expect("hair");
    assert_eq!(hair.color, vec!["#6A3628".to_owned()]);
}

#[test]
fn worn_blockers_are_removed_before_equipping() {
    let sandbox = sandbox();
    let mut player = character("player");
    player
        .appearance
        .set(WornItem::new("ItemHood", "DroneMask"));
    let set = wheel_core::ItemSet::new(
        "Headset",
        vec![wheel_core::WheelItem::new("ItemHead", "InteractiveVRHeadset")],
    )
    .expect("valid set");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert!(report.is_complete(), "{:?}", report.failures);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.removed[0].asset.as_str(), "DroneMask");
    assert!(worn(&player, "ItemHood").is_none());
    let headset = worn(&player, "ItemHead").expect("headset");
    assert_eq!(headset.property.type_name.as_deref(), Some("b=3,f=3,g=1"));
}

#[test]
fn locked_blockers_keep_their_covered_groups_empty() {
    let sandbox = sandbox();
    let mut player = character("player");
    player.appearance.set(
        WornItem::new("ItemArms", "StraitLeotard").with_lock(LockState::new("HighSecurityPadlock")),
    );
    let set = wheel_core::ItemSet::new(
        "Mittens",
        vec![wheel_core::WheelItem::new("ItemHands", "FuturisticMittens").with_type("typed=0")],
    )
    .expect("valid set");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert_eq!(
        reasons(&report, "ItemArms", "StraitLeotard"),
        vec![EquipFailure::LockedItem]
    );
    assert_eq!(
        reasons(&report, "ItemHands", "FuturisticMittens"),
        vec![EquipFailure::GroupBlocked]
    );
    assert!(worn(&player, "ItemHands").is_none());
    assert_eq!(worn_asset(&player, "ItemArms").as_deref(), Some("StraitLeotard"));
    assert!(report.equipped.is_empty());
}

#[test]
fn locked_items_on_the_doll_stay_in_place() {
    let sandbox = sandbox();
    let mut doll = character("doll");
    let set = sandbox.find_set(&doll, "Rope Bunny").expect("custom set");

    let report = sandbox.equip(&set, &mut doll, None).expect("equip");

    assert_eq!(reasons(&report, "ItemArms", "HempRope"), vec![EquipFailure::LockedItem]);
    assert_eq!(reasons(&report, "ItemMouth", "BallGag"), vec![EquipFailure::LockedItem]);
    assert_eq!(report.equipped, vec![GroupName::from("ItemFeet")]);
    assert!(worn(&doll, "Cloth").is_none());

    let rope = worn(&doll, "ItemArms").expect("rope");
    assert_eq!(rope.property.type_name.as_deref(), Some("typed=1"));
    assert_eq!(
        sandbox.host().session().drain(),
        vec![SessionEvent::Refresh { character: 2, push: false }]
    );
}

#[test]
fn keys_open_metal_padlocks() {
    let sandbox = sandbox();
    let mut doll = character("doll");
    doll.inventory.push(AssetName::from("MetalPadlockKey"));
    let set = sandbox.find_set(&doll, "Rope Bunny").expect("custom set");

    let report = sandbox.equip(&set, &mut doll, None).expect("equip");

    assert!(reasons(&report, "ItemArms", "HempRope").is_empty());
    let rope = worn(&doll, "ItemArms").expect("rope");
    assert!(rope.lock().is_none());
    assert_eq!(report.removed.len(), 1);
}

#[test]
fn exclusive_locks_survive_the_next_set() {
    let sandbox = sandbox();
    let mut player = character("player");
    let bunny = sandbox.find_set(&player, "Rope Bunny").expect("custom set");
    sandbox
        .equip(&bunny, &mut player, Some(LockFlag::Exclusive))
        .expect("first equip");

    let gag = worn(&player, "ItemMouth").expect("gag");
    let lock = gag.lock().expect("gags accept locks");
    assert_eq!(lock.lock.as_str(), "ExclusivePadlock");
    assert_eq!(lock.member_number, Some(player.member_number));
    assert!(worn(&player, "ItemArms").and_then(WornItem::lock).is_none());

    let maid = sandbox.find_set(&player, "maid").expect("maid preset");
    let report = sandbox.equip(&maid, &mut player, None).expect("second equip");

    assert_eq!(reasons(&report, "ItemMouth", "BallGag"), vec![EquipFailure::LockedItem]);
    let gag = worn(&player, "ItemMouth").expect("gag");
    assert_eq!(gag.color.first().map(String::as_str), Some("#CC3333"));
    assert_eq!(worn_asset(&player, "ItemArms").as_deref(), Some("StraitLeotard"));
}

#[test]
fn timer_locks_use_the_session_clock() {
    let sandbox = sandbox();
    let mut player = character("player");
    let set = sandbox.find_set(&player, "Rope Bunny").expect("custom set");

    sandbox
        .equip(&set, &mut player, Some(LockFlag::Timer { seconds: 300 }))
        .expect("equip");

    let lock = worn(&player, "ItemMouth")
        .and_then(WornItem::lock)
        .expect("timer lock");
    assert_eq!(lock.lock.as_str(), "TimerPasswordPadlock");
    assert_eq!(lock.remove_timer, Some(CLOCK_MS + 300_000));
    assert!(lock.remove_item);
    let password = lock.password.as_deref().unwrap_or_default();
    assert_eq!(password.len(), 8);
}

#[test]
fn wheel_options_resolve_to_their_set_and_flag() {
    let sandbox = sandbox();
    let mut player = character("player");
    let options = sandbox.wheel_options(&player).expect("options");

    // Maid is the third preset; flag 0 is the exclusive lock
    let maid_exclusive = 256 + 2 * 16;
    let option = options
        .iter()
        .find(|option| option.id == maid_exclusive)
        .expect("maid option");
    assert_eq!(option.flag, LockFlag::Exclusive);
    assert!(options.iter().any(|option| option.custom && option.id == 512));

    let report = sandbox
        .equip_option(maid_exclusive, &mut player)
        .expect("equip");
    assert_eq!(report.label, "Bondage Maid");
    let collar = worn(&player, "ItemNeck").expect("collar");
    assert_eq!(
        collar.lock().map(|lock| lock.lock.as_str()),
        Some("ExclusivePadlock")
    );
    assert!(sandbox.equip_option(9999, &mut player).is_err());
}

#[test]
fn weighted_sets_take_more_wheel_slots() {
    let sandbox = sandbox();
    let player = character("player");

    let slots = sandbox.weighted_wheel(&player).expect("wheel");

    // Rope Bunny is stored in the first custom slot with weight 2
    assert_eq!(slots.iter().filter(|id| **id == 512).count(), 2);
    assert_eq!(slots.iter().filter(|id| **id == 256).count(), 1);
}

#[test]
fn registered_hooks_apply_to_every_equip() {
    let mut sandbox = sandbox();
    sandbox
        .register_hook(HookRegistration::new(
            "sandbox",
            "QuietRoom",
            Listener::validate_equip(|_, event| {
                Ok((event.group.as_str() == "ItemMouth").then(|| EquipFailure::Rejected {
                    reason: "quiet room".into(),
                }))
            }),
        ))
        .expect("register");
    let duplicate = HookRegistration::new("sandbox", "QuietRoom", Listener::validate_equip(|_, _| Ok(None)));
    assert!(sandbox.register_hook(duplicate).is_err());

    let mut player = character("player");
    let set = sandbox.find_set(&player, "Rope Bunny").expect("custom set");
    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert_eq!(
        reasons(&report, "ItemMouth", "BallGag"),
        vec![EquipFailure::Rejected {
            reason: "quiet room".into()
        }]
    );
    assert!(worn(&player, "ItemMouth").is_none());
    assert_eq!(worn_asset(&player, "ItemArms").as_deref(), Some("HempRope"));
}

#[test]
fn room_rules_reject_banned_categories() {
    let sandbox = sandbox_with(PermissionRules::new().ban_category("SciFi"));
    let mut player = character("player");
    let set = sandbox.find_set(&player, "maid").expect("maid preset");

    let report = sandbox.equip(&set, &mut player, None).expect("equip");

    assert_eq!(
        reasons(&report, "ItemHands", "FuturisticMittens"),
        vec![EquipFailure::RoomDisallowed]
    );
    assert_eq!(
        reasons(&report, "ItemBoots", "FuturisticHeels2"),
        vec![EquipFailure::RoomDisallowed]
    );
    assert_eq!(report.failures.len(), 2);
    assert!(worn(&player, "ItemHands").is_none());
    assert_eq!(worn_asset(&player, "Shoes").as_deref(), Some("FuturisticHeels2"));
}

#[test]
fn locked_enclosures_abort_the_equip() {
    let sandbox = sandbox();
    let mut doll = character("doll");
    doll.appearance.set(
        WornItem::new("ItemDevices", "WoodenBox")
            .with_lock(LockState::new("MetalPadlock").with_member_number(1000)),
    );
    let before = doll.clone();
    let set = sandbox.find_set(&doll, "maid").expect("maid preset");

    let report = sandbox.equip(&set, &mut doll, None).expect("equip");

    assert!(report.aborted_enclosed);
    assert!(!report.is_complete());
    assert_eq!(doll, before);
    assert!(sandbox.host().session().events().is_empty());
}

#[test]
fn unknown_set_names_are_reported() {
    let sandbox = sandbox();
    let player = character("player");

    let err = sandbox.find_set(&player, "Nope").unwrap_err();
    assert!(err.to_string().contains("Nope"));
}

#[test]
fn custom_sets_load_from_a_data_directory() {
    let bundled = ContentFactory::bundled();
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::copy(
        bundled.data_dir().join("assets.ron"),
        dir.path().join("assets.ron"),
    )
    .expect("copy catalog");
    std::fs::write(
        dir.path().join("item_sets.ron"),
        r#"[
            (
                name: "Quiet",
                strip_level: 0,
                items: [(group: "ItemMouth", name: "BallGag", type_name: Some("typed=1"))],
            ),
        ]"#,
    )
    .expect("write item sets");

    let sandbox = Sandbox::load_with_session(
        &ContentFactory::new(dir.path()),
        PermissionRules::new(),
        SessionOracleImpl::with_clock(CLOCK_MS),
    )
    .expect("custom content loads");
    assert_eq!(sandbox.custom_sets().len(), 1);

    let mut player = character("player");
    let options = sandbox.wheel_options(&player).expect("options");
    let custom: Vec<u32> = options
        .iter()
        .filter(|option| option.custom)
        .map(|option| option.id)
        .collect();
    assert_eq!(custom, vec![512, 513, 514, 515]);

    let report = sandbox
        .equip_option(515, &mut player)
        .expect("equip succeeds");
    assert_eq!(report.label, "Quiet");
    assert!(report.stripped.is_empty());
    assert!(report.equipped.contains(&GroupName::from("ItemMouth")));
    assert_eq!(worn_asset(&player, "ItemMouth").as_deref(), Some("BallGag"));
}

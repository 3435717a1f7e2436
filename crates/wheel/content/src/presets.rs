//! Built-in item sets.
//!
//! Preset items are declared in code because most of them carry callbacks.
//! [`build_item_sets`] resolves crafted metadata against the host's asset
//! database and orders every list so blockers come first.
use wheel_core::strip::can_change_cosplay;
use wheel_core::{
    AssetName, Character, CraftProperty, CraftedItem, EquipPredicate, GraphError,
    GroupName, HostEnv, ItemCallback, ItemProperty, ItemSet, ItemSetError, LockFlag,
    PreRunCallback, PropertyValue, StripLevel, WheelItem, fortune_items_sort,
};

use crate::callbacks::{copy_hair_color, random_type, statue_copy_colors};

/// Errors raised while building the built-in item sets.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("invalid {set} item: {group}/{name}")]
    UnknownAsset {
        set: &'static str,
        group: GroupName,
        name: AssetName,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    ItemSet(#[from] ItemSetError),

    #[error(transparent)]
    Oracle(#[from] wheel_core::OracleError),
}

/// The built-in item sets, in wheel order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PresetKind {
    LeashCandy,
    Mummy,
    Maid,
    Statue,
}

impl PresetKind {
    /// Display name of the item set.
    pub fn title(self) -> &'static str {
        match self {
            Self::LeashCandy => "PSO Bondage",
            Self::Mummy => "Mummification",
            Self::Maid => "Bondage Maid",
            Self::Statue => "Petrification",
        }
    }

    pub fn strip_level(self) -> StripLevel {
        match self {
            Self::Mummy => StripLevel::Clothes,
            _ => StripLevel::Underwear,
        }
    }

    /// Indices into [`LockFlag::DEFAULTS`] of the flags enabled for this set.
    pub fn enabled_flags(self) -> &'static [usize] {
        match self {
            Self::LeashCandy => &[0, 1, 2, 3, 4, 5],
            Self::Mummy => &[3],
            Self::Maid | Self::Statue => &[0, 1, 2, 3],
        }
    }

    pub fn items(self) -> Vec<WheelItem> {
        match self {
            Self::LeashCandy => leash_candy(),
            Self::Mummy => mummy(),
            Self::Maid => maid(),
            Self::Statue => statue(),
        }
    }

    pub fn pre_run(self) -> Option<PreRunCallback> {
        match self {
            Self::Statue => Some(PreRunCallback::new(statue_copy_colors)),
            _ => None,
        }
    }
}

/// Builds every built-in item set against the host's asset database.
///
/// Crafted metadata is normalized through the asset oracle and each item
/// list is sorted by block priority as seen on `character`.
///
/// # Errors
///
/// Fails if a crafted item refers to an asset the host doesn't know or if a
/// list can't be sorted.
pub fn build_item_sets(character: &Character, env: &HostEnv<'_>) -> Result<Vec<ItemSet>, PresetError> {
    use strum::IntoEnumIterator;

    PresetKind::iter()
        .map(|kind| build_item_set(kind, character, env))
        .collect()
}

fn build_item_set(
    kind: PresetKind,
    character: &Character,
    env: &HostEnv<'_>,
) -> Result<ItemSet, PresetError> {
    let assets = env.assets()?;
    let mut items = kind.items();
    for item in &mut items {
        let Some(craft) = item.craft.as_mut() else {
            continue;
        };
        let asset = assets
            .asset(&item.group, &item.name)
            .ok_or_else(|| PresetError::UnknownAsset {
                set: kind.title(),
                group: item.group.clone(),
                name: item.name.clone(),
            })?;
        assets.validate_craft(craft, &asset);
    }

    let items = fortune_items_sort(&items, character, env)?;
    let flags = kind
        .enabled_flags()
        .iter()
        .filter_map(|index| LockFlag::DEFAULTS.get(*index).copied());
    let mut set = ItemSet::new(kind.title(), items)?
        .with_levels(kind.strip_level(), StripLevel::Underwear)
        .with_flags(flags)
        .builtin();
    if let Some(pre_run) = kind.pre_run() {
        set = set.with_pre_run(pre_run);
    }
    tracing::debug!(set = kind.title(), items = set.items().len(), "built preset item set");
    Ok(set)
}

fn hair_color(indices: &'static [usize]) -> ItemCallback {
    ItemCallback::new(move |item, character, _| copy_hair_color(item, character, indices))
}

/// Copies the hair color, then picks a random type past the first `skip` options.
fn wrapping(skip: usize) -> ItemCallback {
    ItemCallback::new(move |item, character, env| {
        copy_hair_color(item, character, &[0])?;
        random_type(item, character, env, skip)
    })
}

fn cosplay_allowed(wanted: bool) -> EquipPredicate {
    EquipPredicate::new(move |character, env| {
        can_change_cosplay(character, env).is_ok_and(|allowed| allowed == wanted)
    })
}

fn craft(name: &str, property: CraftProperty) -> CraftedItem {
    CraftedItem::new(name, property)
}

fn priority(value: i64) -> ItemProperty {
    let mut property = ItemProperty::default();
    property
        .extra
        .insert("OverridePriority".to_owned(), PropertyValue::Int(value));
    property
}

fn leash_candy() -> Vec<WheelItem> {
    use CraftProperty::{Secure, Thin};

    vec![
        WheelItem::new("Suit", "ReverseBunnySuit").with_callback(hair_color(&[0, 1])),
        WheelItem::new("SuitLower", "Catsuit").with_callback(hair_color(&[0, 1])),
        WheelItem::new("Mask", "FaceVeil")
            .with_color(["#000", "Default"])
            .with_callback(hair_color(&[1])),
        WheelItem::new("ItemHands", "FuturisticMittens")
            .with_type("typed=0")
            .with_craft(craft("Permanent PSO Mittens", Secure))
            .with_callback(hair_color(&[0, 1])),
        WheelItem::new("ItemHead", "InteractiveVRHeadset")
            .with_type("b=3,f=3,g=1")
            .with_craft(craft("Permanent PSO Headset", Secure))
            .with_callback(hair_color(&[0])),
        WheelItem::new("ItemMouth", "LargeDildo").with_craft(
            craft("Permanent PSO Dildo", Secure)
                .with_description("Specially made to fill a PSOs mouth and throat"),
        ),
        WheelItem::new("ItemMouth2", "LatexBallMuzzleGag").with_craft(
            craft("Permanent PSO Muzzle", Secure)
                .with_description("Forcing the dildo in and keeping it secure"),
        ),
        WheelItem::new("ItemMouth3", "FuturisticMuzzle")
            .with_type("n=1,h=0,s=3")
            .with_craft(
                craft("Permanent PSO Muzzle", Secure).with_description("Keeping your cries muffled"),
            )
            .with_callback(hair_color(&[3])),
        WheelItem::new("ItemVulva", "FuturisticVibrator")
            .with_type("vibrating=9")
            .with_craft(
                craft("Permanent PSO Vibe", Secure).with_description("Specially made to fill a PSO"),
            ),
        WheelItem::new("ItemPelvis", "SciFiPleasurePanties")
            .with_type("c=3,i=4,o=1,s=2")
            .with_craft(
                craft("Permanent PSO Panties", Secure).with_description("No escape and no Orgasms"),
            )
            .with_callback(hair_color(&[0, 2, 4, 5])),
        WheelItem::new("ItemNeck", "BonedNeckCorset")
            .with_color(["#222222", "#888888", "#AA2121", "#AA2121", "#888888"])
            .with_type("typed=1")
            .with_craft(craft("Permanent PSO Collar", Secure))
            .with_callback(hair_color(&[2, 3])),
        WheelItem::new("ItemNeckRestraints", "CollarChainShort")
            .with_craft(
                craft("Permanent PSO Chain", Secure).with_description("To keep a PSO on their knees"),
            )
            .with_property(priority(7))
            .with_callback(hair_color(&[0])),
        WheelItem::new("ItemArms", "StrictLeatherPetCrawler").with_craft(
            craft("Permanent PSO Suit", Secure).with_description("Extra tight and unremovable"),
        ),
        WheelItem::new("ItemTorso", "HeavyLatexCorset")
            .with_type("typed=0")
            .with_craft(
                craft("Permanent PSO Corset", Secure)
                    .with_description("Extra tight and specially molded"),
            ),
        WheelItem::new("ItemTorso2", "FuturisticHarness")
            .with_type("typed=0")
            .with_craft(
                craft("Permanent PSO Harness", Secure)
                    .with_description("Special harness that constantly shrinks...."),
            )
            .with_property(priority(23))
            .with_callback(hair_color(&[0, 1, 2])),
        WheelItem::new("ItemEars", "FuturisticEarphones")
            .with_type("typed=0")
            .with_craft(craft("Permanent PSO Earphones", Secure))
            .with_color(["#0F0F0F", "Default", "Default"])
            .with_callback(hair_color(&[1])),
        WheelItem::new("ItemAddon", "CeilingChain")
            .with_type("typed=0")
            .with_craft(craft("Permanent PSO Chain", Secure).with_description("Never to escape"))
            .with_callback(hair_color(&[0])),
        WheelItem::new("ItemNipplesPiercings", "RoundPiercing")
            .with_type("typed=1")
            .with_craft(craft("Permanent PSO Piercings", Secure))
            .with_color(["#000000", "Default", "Default"])
            .with_callback(hair_color(&[1, 2])),
        WheelItem::new("ItemNeckAccessories", "CollarAutoShockUnit")
            .with_type("s=2,y=0")
            .with_craft(craft("Permanent PSO Shock Unit", Secure)),
        WheelItem::new("ItemLegs", "FrogtieStraps")
            .with_craft(
                craft("Permanent PSO Straps", Secure).with_description("To keep a PSO on their knees"),
            )
            .with_callback(hair_color(&[2])),
        WheelItem::new("ItemHood", "DroneMask")
            .with_type("m=0,e=0,p=1,g=0,s=1,h=2,j=0")
            .with_craft(craft("Permanent PSO Mask", Thin))
            .with_callback(hair_color(&[2])),
    ]
}

fn mummy() -> Vec<WheelItem> {
    use CraftProperty::{Large, Secure};

    let wrappings = |property| {
        craft("Mummy Wrappings", property).with_description("A bundle of resilient cloth wrappings")
    };
    let tape = |group: &str| WheelItem::new(group, "DuctTape").with_type("typed=0");

    vec![
        tape("ItemFeet").with_craft(wrappings(Secure)).with_callback(wrapping(0)),
        tape("ItemLegs").with_craft(wrappings(Secure)).with_callback(wrapping(0)),
        tape("ItemHands")
            .with_craft(wrappings(Secure))
            .with_callback(hair_color(&[0])),
        tape("ItemArms").with_craft(wrappings(Secure)).with_callback(wrapping(0)),
        WheelItem::new("ItemMouth", "LargeDildo").with_craft(
            craft("Rubber Mouth Sealant", Large)
                .with_description("A rubber mass molded to shape of your mouth"),
        ),
        tape("ItemMouth2").with_craft(wrappings(Large)).with_callback(wrapping(1)),
        tape("ItemMouth3")
            .with_craft(wrappings(Large))
            .with_equip(EquipPredicate::new(|_, _| rand::random::<bool>()))
            .with_callback(wrapping(0)),
    ]
}

fn maid() -> Vec<WheelItem> {
    use CraftProperty::{Arousing, Large, Secure};

    let out_of_trouble = "For keeping a maid out of trouble";
    vec![
        WheelItem::new("Bracelet", "LaceBands").with_color(["#aaaaaa", "#151515"]),
        WheelItem::new("Cloth", "MaidOutfit2").with_color(["#0C0C0C", "#919194", "#9C9C9F"]),
        WheelItem::new("ClothAccessory", "CatsuitCollar").with_color(["#0E0E0E"]),
        WheelItem::new("Hat", "MaidHairband1").with_color(["#979797"]),
        WheelItem::new("Socks", "Socks6").with_color(["#0D0D0D", "#919194"]),
        WheelItem::new("Bra", "HeartTop").with_color(["#0E0E0E"]),
        WheelItem::new("Shoes", "FuturisticHeels2")
            .with_color(["#101010", "Default", "#F1FAFF", "#898989", "#898989"])
            .with_type("typed=1"),
        WheelItem::new("ItemNeck", "MaidCollar")
            .with_color(["#DCDCDC", "#1B1B1B", "Default"])
            .with_craft(
                craft("Maid Collar", Secure).with_description("A tight fitting yet comfortable collar"),
            ),
        WheelItem::new("ItemHands", "FuturisticMittens")
            .with_color(["#FFFFFF", "#FFFFFF", "#2E2E2E", "#050505"])
            .with_type("typed=0")
            .with_craft(craft("Maid Mittens", Secure).with_description(out_of_trouble)),
        WheelItem::new("ItemBoots", "FuturisticHeels2")
            .with_color(["#101010", "#101010", "Default", "#F1FAFF", "#898989", "#898989", "#898989"])
            .with_type("typed=1")
            .with_craft(craft("Maid Heels", Secure).with_description("For keeping a maid on their toes")),
        WheelItem::new("ItemVulva", "WiredEgg")
            .with_color(["Default", "#141414"])
            .with_type("vibrating=1")
            .with_craft(
                craft("Maid Teaser", Arousing)
                    .with_description("A little reminder to keep a maid on edge"),
            )
            .with_property(priority(21)),
        WheelItem::new("ItemArms", "StraitLeotard")
            .with_color(["#FFFFFF", "#1A1A1A", "#FFFFFF"])
            .with_type("cl=1,co=1,np=0,vp=0")
            .with_craft(craft("Maid Jacket", Secure).with_description(out_of_trouble)),
        WheelItem::new("ItemFeet", "LeatherAnkleCuffs")
            .with_color(["#969696", "#191919", "#969696"])
            .with_type("typed=0")
            .with_craft(craft("Maid Cuffs", Secure).with_description(out_of_trouble)),
        WheelItem::new("ItemMouth", "BallGag")
            .with_type("typed=2")
            .with_craft(craft("Maid Silencer", Large).with_description("Silence is golden")),
    ]
}

// The catsuit replaces the body recolor when cosplay changes are blocked.
fn statue() -> Vec<WheelItem> {
    use CraftProperty::{Large, Secure};

    vec![
        WheelItem::new("SuitLower", "ReverseBunnySuit")
            .with_color(["#1B1B1B"])
            .with_equip(cosplay_allowed(true)),
        WheelItem::new("SuitLower", "SeamlessCatsuit")
            .with_color(["#484747"])
            .with_equip(cosplay_allowed(false)),
        WheelItem::new("Suit", "SeamlessCatsuit")
            .with_color(["#484747"])
            .with_equip(cosplay_allowed(false)),
        WheelItem::new("Cloth", "ReverseBunnySuit").with_color(["#1B1B1B", "#1B1B1B"]),
        WheelItem::new("ClothLower", "BondageSkirt").with_color(["#484747", "#333333", "#333333"]),
        WheelItem::new("ClothAccessory", "CatsuitCollar").with_color(["#484747"]),
        WheelItem::new("ItemNeck", "HighCollar")
            .with_color(["#363636", "#717171"])
            .with_craft(craft("Statue Neck", Secure)),
        WheelItem::new("ItemMouth", "LargeDildo")
            .with_color(["#333333"])
            .with_craft(craft("Mouth Sealant", Large))
            .with_property(priority(27)),
        WheelItem::new("ItemMouth2", "LatexPostureCollar")
            .with_color(["Default"])
            .with_craft(craft("Mouth Sealant", Large))
            .with_property(priority(28)),
        WheelItem::new("ItemMouth3", "LatexBallMuzzleGag")
            .with_color(["#A1A1A1"])
            .with_craft(craft("Mouth Sealant", Large)),
        WheelItem::new("ItemHood", "KirugumiMask")
            .with_color(["#484747", "#484747", "#484747", "#484747"])
            .with_type("e=0,m=3,b=0,br=0,op=0,ms=0")
            .with_craft(craft("Statue's Visage", Secure)),
        WheelItem::new("ItemBoots", "MonoHeel")
            .with_color(["#737070", "#737070", "#101010"])
            .with_type("typed=0")
            .with_craft(craft("Statue Base", Secure)),
        WheelItem::new("ItemHands", "FuturisticMittens")
            .with_color(["#767676", "#5F5F5F", "#3C3C3C", "#4F4F4F"])
            .with_type("typed=0")
            .with_craft(craft("Statue Hands", Secure)),
        WheelItem::new("ItemArms", "SmoothLeatherArmbinder1")
            .with_color(["#191919", "#3D3D3D", "#191919", "#191919", "#191919"])
            .with_craft(craft("Statue Arms", Secure)),
    ]
}

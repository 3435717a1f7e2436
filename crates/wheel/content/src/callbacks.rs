//! Callbacks used by the built-in item sets.
use rand::seq::SliceRandom;
use wheel_core::env::item_set_type;
use wheel_core::strip::{can_change_cosplay, validate_character};
use wheel_core::{
    CallbackError, CallbackResult, Character, GroupName, HostEnv, OracleError, WheelItem, WornItem,
};

/// Group whose first color is copied by [`copy_hair_color`].
pub const HAIR_GROUP: &str = "HairFront";

/// Color placeholder for layers that keep the asset's own color.
pub const DEFAULT_COLOR: &str = "Default";

/// Color applied by the petrification set.
pub const STATUE_COLOR: &str = "#484747";

/// Groups recolored by the petrification set.
pub const STATUE_GROUPS: [&str; 12] = [
    "HairAccessory1",
    "HairAccessory2",
    "HairAccessory3",
    "HairBack",
    "HairFront",
    "BodyUpper",
    "BodyLower",
    "Wings",
    "TailStraps",
    "Nipples",
    "Blush",
    "Mouth",
];

fn ensure_local(character: &Character) -> CallbackResult {
    validate_character(character).map_err(|err| CallbackError::Message(err.to_string()))
}

/// Copies the character's hair color into the `indices` layers of `item`.
///
/// Missing layers are padded with [`DEFAULT_COLOR`]. Characters without hair
/// leave the item untouched.
///
/// # Errors
///
/// Fails on online characters.
pub fn copy_hair_color(item: &mut WornItem, character: &Character, indices: &[usize]) -> CallbackResult {
    ensure_local(character)?;
    let Some(hair) = character.worn(&GroupName::from(HAIR_GROUP)) else {
        return Ok(());
    };

    let len = indices.iter().max().map_or(0, |max| max + 1);
    if item.color.len() < len {
        item.color.resize(len, DEFAULT_COLOR.to_owned());
    }
    if let Some(color) = hair.color.first() {
        for &index in indices {
            item.color[index].clone_from(color);
        }
    }
    Ok(())
}

/// Colors every layer of the items worn in `groups` with `color`.
///
/// # Errors
///
/// Fails when the asset oracle is missing.
pub fn color_items(
    groups: &[&str],
    character: &mut Character,
    env: &HostEnv<'_>,
    color: &str,
) -> CallbackResult {
    let assets = env.assets()?;
    for name in groups {
        let group = GroupName::from(*name);
        let Some(item) = character.appearance.get_mut(&group) else {
            continue;
        };
        let layers = assets
            .asset(&item.group, &item.asset)
            .map_or(1, |asset| usize::from(asset.colorable_layers));
        item.color = vec![color.to_owned(); layers];
    }
    Ok(())
}

/// Pre-run callback of the petrification set: turns the body stone-grey when
/// the character allows cosplay changes. The item list is returned unchanged.
///
/// # Errors
///
/// Fails on online characters and missing oracles.
pub fn statue_copy_colors(
    items: Vec<WheelItem>,
    character: &mut Character,
    env: &HostEnv<'_>,
) -> CallbackResult<Vec<WheelItem>> {
    ensure_local(character)?;
    if can_change_cosplay(character, env)? {
        color_items(&STATUE_GROUPS, character, env, STATUE_COLOR)?;
    }
    Ok(items)
}

/// Selects a random type among the options of `item`, skipping the first `skip`.
///
/// Items with no option left keep their current type.
///
/// # Errors
///
/// Fails when the asset is unknown or the type setter rejects the choice.
pub fn random_type(
    item: &mut WornItem,
    character: &Character,
    env: &HostEnv<'_>,
    skip: usize,
) -> CallbackResult {
    let assets = env.assets()?;
    let asset = assets
        .asset(&item.group, &item.asset)
        .ok_or_else(|| OracleError::AssetNotFound {
            group: item.group.clone(),
            name: item.asset.clone(),
        })?;
    let options = assets.type_options(&asset);
    let Some(choice) = options
        .get(skip..)
        .and_then(|options| options.choose(&mut rand::thread_rng()))
    else {
        return Ok(());
    };
    tracing::debug!(group = %item.group, asset = %item.asset, type_name = %choice, "randomized item type");
    item_set_type(env.types()?, &asset, item, Some(choice), character)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::CharacterKind;

    fn character_with_hair(color: &str) -> Character {
        let mut character = Character::player(1, "Alice", 100);
        character
            .appearance
            .set(WornItem::new(HAIR_GROUP, "HairFront1").with_color([color]));
        character
    }

    #[test]
    fn hair_color_is_copied_and_padded() {
        let character = character_with_hair("#FF0000");
        let mut item = WornItem::new("Mask", "FaceVeil").with_color(["#000"]);

        copy_hair_color(&mut item, &character, &[1, 3]).expect("copied");

        assert_eq!(item.color, vec!["#000", "#FF0000", "Default", "#FF0000"]);
    }

    #[test]
    fn bald_characters_keep_item_colors() {
        let character = Character::player(1, "Alice", 100);
        let mut item = WornItem::new("Mask", "FaceVeil").with_color(["#000"]);

        copy_hair_color(&mut item, &character, &[2]).expect("copied");

        assert_eq!(item.color, vec!["#000"]);
    }

    #[test]
    fn online_characters_are_rejected() {
        let mut character = character_with_hair("#FF0000");
        character.kind = CharacterKind::Online;
        let mut item = WornItem::new("Mask", "FaceVeil");

        assert!(copy_hair_color(&mut item, &character, &[0]).is_err());
    }
}

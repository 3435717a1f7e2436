use super::{AssetDefinition, GroupName};
use crate::state::Character;

/// Room, ownership and rule checks provided by the host.
///
/// All methods are read-only queries; the core decides what to do with the
/// answers.
pub trait PermissionOracle: Send + Sync {
    /// Whether `asset` is on the character's blocked or limited list.
    fn blocked_or_limited(&self, character: &Character, asset: &AssetDefinition) -> bool;

    /// Whether the prerequisites of `asset` are satisfied on `character`.
    fn prerequisites_allow(&self, character: &Character, asset: &AssetDefinition) -> bool;

    /// Whether `group` is blocked on `character` (e.g. covered by another item).
    fn group_blocked(&self, character: &Character, group: &GroupName) -> bool;

    /// Whether `group` is blocked through an owner rule.
    fn group_blocked_by_owner_rule(&self, character: &Character, group: &GroupName) -> bool;

    /// Whether the current room allows the categories of `asset`.
    fn room_allows(&self, _asset: &AssetDefinition) -> bool {
        true
    }

    /// Whether a "no self key use" rule is both in effect and enforced.
    fn key_use_blocked(&self, character: &Character) -> bool;

    /// Whether the character's keys are deposited somewhere out of reach.
    fn key_deposited(&self, character: &Character) -> bool;

    /// Whether an external rule allows cosplay changes despite the character's
    /// own "block body cosplay" setting. Only consulted for the player.
    fn appearance_rule_allows_cosplay(&self, _character: &Character) -> bool {
        false
    }
}

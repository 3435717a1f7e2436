//! Lock/unlock permission predicate.
//!
//! Decides whether the acting character may remove the lock of a worn item,
//! which in turn decides whether a worn item blocking a new one may be taken
//! off.
use std::collections::HashMap;

use crate::env::{GroupName, HostEnv, OracleError};
use crate::state::{Character, Effect, WornItem};

/// Group holding lock assets.
pub const LOCK_GROUP: &str = "ItemMisc";

/// Known lock assets. Anything else parses as `Unknown` and fails closed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockKind {
    SafewordPadlock,
    MetalPadlock,
    MistressPadlock,
    MistressTimerPadlock,
    PandoraPadlock,
    TimerPasswordPadlock,
    PasswordPadlock,
    CombinationPadlock,
    HighSecurityPadlock,
    ExclusivePadlock,
    Unknown,
}

impl LockKind {
    pub fn from_asset(name: &str) -> Self {
        name.parse().unwrap_or(Self::Unknown)
    }

    /// Locks opened by owning a `{Lock}Key` inventory item.
    pub fn requires_key(self) -> bool {
        matches!(
            self,
            Self::MetalPadlock | Self::MistressPadlock | Self::MistressTimerPadlock | Self::PandoraPadlock
        )
    }

    /// Locks opened by whoever placed them.
    pub fn requires_owner(self) -> bool {
        matches!(
            self,
            Self::TimerPasswordPadlock | Self::PasswordPadlock | Self::CombinationPadlock
        )
    }

    pub fn key_name(self) -> String {
        format!("{self}Key")
    }
}

/// Memoised key possession, scoped to a single equip operation.
///
/// Key possession is assumed not to change while an operation runs.
#[derive(Clone, Debug, Default)]
pub struct KeyCache {
    entries: HashMap<(u32, LockKind), bool>,
}

impl KeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_key(&mut self, character: &Character, kind: LockKind) -> bool {
        *self
            .entries
            .entry((character.id, kind))
            .or_insert_with(|| character.owns(&kind.key_name()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Whether `character` may remove the lock of `item`.
///
/// # Errors
///
/// Returns an error if the asset or permission oracle is missing.
pub fn can_unlock(
    item: &WornItem,
    character: &Character,
    env: &HostEnv<'_>,
    cache: &mut KeyCache,
) -> Result<bool, OracleError> {
    if !item.has_effect(Effect::Lock) {
        return Ok(true);
    }
    let lock = item.lock();

    if item.is_decoy() {
        // Decoys never bypass owner/lover/family exclusivity
        let Some(lock) = lock else {
            return Ok(false);
        };
        let assets = env.assets()?;
        let lock_exclusive = assets
            .asset(&GroupName::from(LOCK_GROUP), &lock.lock)
            .is_none_or(|asset| asset.is_exclusive());
        let item_exclusive = assets
            .asset(&item.group, &item.asset)
            .is_none_or(|asset| asset.is_exclusive());
        return Ok(!lock_exclusive && !item_exclusive);
    }

    let Some(lock) = lock else {
        return Ok(false);
    };
    let permissions = env.permissions()?;
    let key_use_blocked = character.is_player() && permissions.key_use_blocked(character);
    let kind = LockKind::from_asset(lock.lock.as_str());

    let unlockable = match kind {
        LockKind::SafewordPadlock => true,
        kind if kind.requires_key() => {
            !key_use_blocked
                && !permissions.key_deposited(character)
                && cache.has_key(character, kind)
        }
        kind if kind.requires_owner() => lock.member_number == Some(character.member_number),
        LockKind::HighSecurityPadlock => {
            !key_use_blocked && lock.authorized.contains(&character.member_number)
        }
        _ => false,
    };
    Ok(unlockable)
}

/// Whether the character is enclosed by an item whose lock it can't open.
///
/// # Errors
///
/// See [`can_unlock`].
pub fn blocked_by_enclose(
    character: &Character,
    env: &HostEnv<'_>,
    cache: &mut KeyCache,
) -> Result<bool, OracleError> {
    let assets = env.assets()?;
    let enclosing = character.appearance.iter().find(|item| {
        item.has_effect(Effect::Enclose)
            || assets
                .asset(&item.group, &item.asset)
                .is_some_and(|asset| asset.encloses())
    });
    match enclosing {
        Some(item) => Ok(!can_unlock(item, character, env, cache)?),
        None => Ok(false),
    }
}

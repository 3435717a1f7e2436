//! Lock flags: which lock, if any, an item set attaches to equipped items.
use std::fmt;

use crate::config::EquipConfig;
use crate::env::{AssetName, GroupName, HostEnv, OracleError};
use crate::error::{CoreError, ErrorSeverity};
use crate::lock::{LOCK_GROUP, LockKind};
use crate::state::{Character, CraftProperty, LockState, WornItem};
use crate::strip::validate_character;

use super::ItemCallback;

/// Lock flavour applied to every item of an equipped set.
///
/// Variant order matches [`LockFlag::DEFAULTS`], which fixes wheel option IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockFlag {
    Exclusive,
    Timer { seconds: u32 },
    HighSecurity,
    None,
}

/// Errors raised while applying a [`LockFlag`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LockFlagError {
    #[error("timer of {seconds}s is outside [{min}, {max}]", min = LockFlag::MIN_TIMER_SECONDS, max = LockFlag::MAX_TIMER_SECONDS)]
    InvalidTimer { seconds: u32 },

    #[error("unknown lock asset '{0}'")]
    UnknownLock(AssetName),

    #[error("cannot lock items of online character '{0}'")]
    InvalidCharacter(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CoreError for LockFlagError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTimer { .. } | Self::InvalidCharacter(_) => ErrorSeverity::Validation,
            Self::UnknownLock(_) => ErrorSeverity::Internal,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTimer { .. } => "LOCK_FLAG_INVALID_TIMER",
            Self::UnknownLock(_) => "LOCK_FLAG_UNKNOWN_LOCK",
            Self::InvalidCharacter(_) => "LOCK_FLAG_INVALID_CHARACTER",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

impl LockFlag {
    pub const MIN_TIMER_SECONDS: u32 = 60;
    pub const MAX_TIMER_SECONDS: u32 = 240 * 60;

    /// Every supported flag. Entries may be appended but never reordered.
    pub const DEFAULTS: [LockFlag; 7] = [
        LockFlag::Exclusive,
        LockFlag::Timer { seconds: 5 * 60 },
        LockFlag::Timer { seconds: 15 * 60 },
        LockFlag::Timer { seconds: 60 * 60 },
        LockFlag::Timer { seconds: 240 * 60 },
        LockFlag::HighSecurity,
        LockFlag::None,
    ];

    /// Flags enabled on new item sets.
    pub const ENABLED_BY_DEFAULT: [LockFlag; 4] = [
        LockFlag::Exclusive,
        LockFlag::Timer { seconds: 5 * 60 },
        LockFlag::Timer { seconds: 15 * 60 },
        LockFlag::Timer { seconds: 60 * 60 },
    ];

    /// Position in [`LockFlag::DEFAULTS`], `None` for non-standard timers.
    pub fn ordinal(&self) -> Option<u32> {
        Self::DEFAULTS
            .iter()
            .position(|flag| flag == self)
            .and_then(|index| u32::try_from(index).ok())
    }

    pub fn is_known(&self) -> bool {
        self.ordinal().is_some()
    }

    /// Whether wheel options for this flag start out enabled.
    pub fn is_default_option(&self) -> bool {
        !matches!(
            self,
            LockFlag::HighSecurity | LockFlag::Timer { seconds: 14400 }
        )
    }

    pub fn lock_kind(&self) -> Option<LockKind> {
        match self {
            LockFlag::Exclusive => Some(LockKind::ExclusivePadlock),
            LockFlag::Timer { .. } => Some(LockKind::TimerPasswordPadlock),
            LockFlag::HighSecurity => Some(LockKind::HighSecurityPadlock),
            LockFlag::None => None,
        }
    }

    /// Attaches this flag's lock to `item`.
    ///
    /// Returns whether a lock was attached. Items that already carry a lock,
    /// don't accept locks, or whose lock asset is blocked or limited for
    /// `character` are left untouched.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range timers, online characters and unknown assets.
    pub fn apply(
        &self,
        item: &mut WornItem,
        character: &Character,
        env: &HostEnv<'_>,
    ) -> Result<bool, LockFlagError> {
        match *self {
            LockFlag::None => Ok(false),
            LockFlag::Exclusive => equip_lock(item, LockKind::ExclusivePadlock, character, env),
            LockFlag::Timer { seconds } => {
                if !(Self::MIN_TIMER_SECONDS..=Self::MAX_TIMER_SECONDS).contains(&seconds) {
                    return Err(LockFlagError::InvalidTimer { seconds });
                }
                if !equip_lock(item, LockKind::TimerPasswordPadlock, character, env)? {
                    return Ok(false);
                }
                let session = env.session()?;
                if let Some(lock) = item.property.lock.as_mut() {
                    lock.remove_timer = Some(session.now_ms() + u64::from(seconds) * 1000);
                    lock.remove_item = true;
                    lock.password = Some(session.random_password(EquipConfig::PASSWORD_LENGTH));
                }
                Ok(true)
            }
            LockFlag::HighSecurity => {
                if item_allows_lock(item, env)? {
                    if let Some(craft) = item.craft.as_mut() {
                        craft.property = CraftProperty::Puzzling;
                    }
                }
                let locked = equip_lock(item, LockKind::HighSecurityPadlock, character, env)?;
                if let (true, Some(lock)) = (locked, item.property.lock.as_mut()) {
                    lock.authorized.clear();
                }
                Ok(locked)
            }
        }
    }

    /// Wraps this flag into a set-wide callback.
    pub fn into_callback(self) -> ItemCallback {
        ItemCallback::new(move |item, character, env| {
            self.apply(item, character, env)?;
            Ok(())
        })
    }
}

impl fmt::Display for LockFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockFlag::Exclusive => f.write_str("Exclusive"),
            LockFlag::Timer { seconds } => write!(f, "{} Minutes", seconds / 60),
            LockFlag::HighSecurity => f.write_str("High Security"),
            LockFlag::None => f.write_str("No Lock"),
        }
    }
}

fn item_allows_lock(item: &WornItem, env: &HostEnv<'_>) -> Result<bool, LockFlagError> {
    let asset = env
        .assets()?
        .asset(&item.group, &item.asset)
        .ok_or_else(|| OracleError::AssetNotFound {
            group: item.group.clone(),
            name: item.asset.clone(),
        })?;
    Ok(asset.allows_lock())
}

/// Attaches the lock `kind` to `item` if possible.
fn equip_lock(
    item: &mut WornItem,
    kind: LockKind,
    character: &Character,
    env: &HostEnv<'_>,
) -> Result<bool, LockFlagError> {
    validate_character(character)
        .map_err(|_| LockFlagError::InvalidCharacter(character.name.clone()))?;

    let lock_name = AssetName::from(kind.as_ref());
    let lock_asset = env
        .assets()?
        .asset(&GroupName::from(LOCK_GROUP), &lock_name)
        .ok_or_else(|| LockFlagError::UnknownLock(lock_name.clone()))?;

    if item.lock().is_some()
        || !item_allows_lock(item, env)?
        || env.permissions()?.blocked_or_limited(character, &lock_asset)
    {
        return Ok(false);
    }

    item.attach_lock(LockState::new(lock_name).with_member_number(character.member_number));
    Ok(true)
}

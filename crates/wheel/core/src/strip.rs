//! Strip levels and the clothing strip pass.
use crate::env::{AssetDefinition, GroupDefinition, HostEnv, OracleError};
use crate::error::{CoreError, ErrorSeverity};
use crate::state::{Character, CharacterKind, WornItem};

/// How much clothing is removed before equipping.
///
/// Every level strips a superset of the levels below it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum StripLevel {
    /// Strip nothing.
    None = 0,
    /// Clothes, keeping underwear and body cosplay.
    Clothes = 1,
    /// Clothes and underwear.
    #[default]
    Underwear = 2,
    /// Also body cosplay items, unless the character blocks cosplay changes.
    Cosplay = 3,
    /// Everything removable, with the same cosplay exception.
    All = 4,
}

impl StripLevel {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for StripLevel {
    type Error = StripError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Clothes),
            2 => Ok(Self::Underwear),
            3 => Ok(Self::Cosplay),
            4 => Ok(Self::All),
            other => Err(StripError::InvalidStripLevel(other)),
        }
    }
}

/// Errors raised by strip operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    #[error("invalid strip level: {0}")]
    InvalidStripLevel(u8),

    /// The character is neither the player nor a simple character.
    #[error("expected a player or simple character, got {kind} character '{name}'")]
    InvalidCharacter { name: String, kind: CharacterKind },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CoreError for StripError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidStripLevel(_) | Self::InvalidCharacter { .. } => ErrorSeverity::Validation,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStripLevel(_) => "STRIP_INVALID_LEVEL",
            Self::InvalidCharacter { .. } => "STRIP_INVALID_CHARACTER",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Ensures `character` may be edited locally.
///
/// # Errors
///
/// Returns `StripError::InvalidCharacter` for online characters.
pub fn validate_character(character: &Character) -> Result<(), StripError> {
    match character.kind {
        CharacterKind::Player | CharacterKind::Simple => Ok(()),
        kind => Err(StripError::InvalidCharacter {
            name: character.name.clone(),
            kind,
        }),
    }
}

/// Whether body cosplay items of `character` may be changed.
///
/// # Errors
///
/// Returns `OracleError::PermissionsNotAvailable` if the player's rule override
/// has to be consulted without a permission oracle.
pub fn can_change_cosplay(character: &Character, env: &HostEnv<'_>) -> Result<bool, OracleError> {
    if !character.settings.block_body_cosplay {
        return Ok(true);
    }
    if !character.is_player() {
        return Ok(false);
    }
    Ok(env.permissions()?.appearance_rule_allows_cosplay(character))
}

/// Predicate deciding whether an asset is removed at a given [`StripLevel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripCondition {
    level: StripLevel,
    block_body_cosplay: bool,
}

impl StripCondition {
    pub fn level(&self) -> StripLevel {
        self.level
    }

    pub fn matches(&self, group: &GroupDefinition, asset: &AssetDefinition) -> bool {
        let body_cosplay = asset.body_cosplay() || group.body_cosplay;
        match self.level {
            StripLevel::None => false,
            StripLevel::Clothes => group.allow_none && !body_cosplay && !group.underwear,
            StripLevel::Underwear => group.allow_none && !body_cosplay,
            StripLevel::Cosplay if self.block_body_cosplay => group.allow_none && !body_cosplay,
            StripLevel::Cosplay => group.allow_none,
            StripLevel::All if self.block_body_cosplay => group.allow_none && !body_cosplay,
            StripLevel::All => true,
        }
    }
}

/// Builds the strip predicate of `level` for `character`.
///
/// # Errors
///
/// See [`can_change_cosplay`].
pub fn strip_condition(
    level: StripLevel,
    character: &Character,
    env: &HostEnv<'_>,
) -> Result<StripCondition, OracleError> {
    let block_body_cosplay = match level {
        StripLevel::Cosplay | StripLevel::All => !can_change_cosplay(character, env)?,
        _ => true,
    };
    Ok(StripCondition {
        level,
        block_body_cosplay,
    })
}

/// Removes every `Appearance` item of `character` matched by `level`.
///
/// Items whose asset the host doesn't know are kept. Returns the removed
/// items in appearance order.
///
/// # Errors
///
/// Fails on online characters and missing oracles; the appearance is left
/// untouched in both cases.
pub fn character_strip(
    level: StripLevel,
    character: &mut Character,
    env: &HostEnv<'_>,
) -> Result<Vec<WornItem>, StripError> {
    validate_character(character)?;
    let condition = strip_condition(level, character, env)?;
    if level == StripLevel::None {
        return Ok(Vec::new());
    }

    let assets = env.assets()?;
    let mut removed = Vec::new();
    for index in (0..character.appearance.len()).rev() {
        let item = &character.appearance.as_slice()[index];
        let Some(group) = assets.group(&item.group) else {
            continue;
        };
        let Some(asset) = assets.asset(&item.group, &item.asset) else {
            continue;
        };
        if group.allow_none && group.is_appearance() && condition.matches(&group, &asset) {
            removed.push(character.appearance.remove_at(index));
        }
    }
    removed.reverse();

    tracing::debug!(
        character = %character.name,
        level = %level,
        removed = removed.len(),
        "stripped character"
    );
    Ok(removed)
}

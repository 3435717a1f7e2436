//! Wheel event hooks.
//!
//! Listeners are registered in a [`WheelHooks`] registry under an owner, a
//! name and a [`HookKind`]. The equip passes consult the registry at fixed
//! points: validators decide whether an item may be removed or equipped, item
//! hooks adjust an item before it's created or observe it afterwards, and
//! outfit hooks see the whole batch. [`WheelHooks::builtin`] carries the
//! checks every equip runs.
//!
//! Listener errors never abort an equip; they end up in the [`HookLog`] of
//! the report.
mod builtin;
mod listener;
mod log;
mod registry;

pub use builtin::BUILTIN_OWNER;
pub use listener::{HookContext, ItemDraft, Listener, ValidateEvent};
pub use log::{HookLog, HookLogEntry, HookOutcome, SkipReason};
pub use registry::{ActiveHooks, HookKwargs, HookRegistration, WheelHooks};

pub(crate) use registry::HookRunner;

use crate::error::{CoreError, ErrorSeverity};

/// Points of an equip call where listeners run, in call order.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "camelCase")]
pub enum HookKind {
    /// Once, before anything is removed.
    BeforeOutfitEquip,
    /// Per worn blocker and per new item, before its slot is freed.
    ValidateItemUnequip,
    /// Per new item, right before it's created.
    ValidateItemEquip,
    /// Per new item; may edit color, type, properties, craft and difficulty.
    BeforeItemEquip,
    /// Per new item, after its callbacks ran.
    AfterItemEquip,
    /// Once, after the last item.
    AfterOutfitEquip,
}

impl HookKind {
    /// Whether listeners of this kind run once per item.
    ///
    /// Only item-level hooks can be limited to target groups.
    pub const fn is_item_level(self) -> bool {
        !matches!(self, Self::BeforeOutfitEquip | Self::AfterOutfitEquip)
    }
}

/// Errors raised while registering hooks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("hook owner and name must not be empty")]
    EmptyName,

    #[error("hook '{key}' is already registered")]
    Duplicate { key: String },
}

impl CoreError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "HOOK_EMPTY_NAME",
            Self::Duplicate { .. } => "HOOK_DUPLICATE",
        }
    }
}

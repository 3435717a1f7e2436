//! Item sets, their items and lock flags.
//!
//! Built-in sets are constructed once and never mutated; custom sets live in
//! the [`WheelSets`] slots.
mod callback;
mod flag;
mod item_set;
mod wheel_item;
mod wheel_sets;

pub use callback::{CallbackError, CallbackResult, EquipPredicate, ItemCallback, PreRunCallback};
pub use flag::{LockFlag, LockFlagError};
pub use item_set::{ItemSet, WheelOption, weighted_option_ids};
pub use wheel_item::WheelItem;
pub use wheel_sets::WheelSets;

use crate::error::{CoreError, ErrorSeverity};
use crate::graph::GraphError;

/// Errors raised when building or storing item sets.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemSetError {
    #[error("item set name must not be empty")]
    EmptyName,

    #[error("invalid item list: {0}")]
    InvalidItems(#[from] GraphError),

    #[error("an item set named '{0}' already exists")]
    DuplicateName(String),

    #[error("built-in item set '{0}' cannot be stored in a custom slot")]
    NotCustom(String),

    #[error("slot {index} is out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },

    #[error("all {capacity} item set slots are in use")]
    Full { capacity: usize },
}

impl CoreError for ItemSetError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidItems(err) => err.severity(),
            Self::Full { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ITEM_SET_EMPTY_NAME",
            Self::InvalidItems(_) => "ITEM_SET_INVALID_ITEMS",
            Self::DuplicateName(_) => "ITEM_SET_DUPLICATE_NAME",
            Self::NotCustom(_) => "ITEM_SET_NOT_CUSTOM",
            Self::SlotOutOfRange { .. } => "ITEM_SET_SLOT_OUT_OF_RANGE",
            Self::Full { .. } => "ITEM_SET_FULL",
        }
    }
}

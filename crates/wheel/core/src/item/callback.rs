//! Callback newtypes attached to items and item sets.
//!
//! Callbacks are shared (`Arc`) so item sets stay cheap to clone, and they
//! receive the host environment so they can consult oracles the same way the
//! engine does.
use std::fmt;
use std::sync::Arc;

use crate::env::{HostEnv, OracleError};
use crate::error::{CoreError, ErrorSeverity};
use crate::state::{Character, WornItem};

use super::{LockFlagError, WheelItem};

/// Errors reported by item, global and pre-run callbacks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    LockFlag(#[from] LockFlagError),

    #[error("{0}")]
    Message(String),
}

impl CoreError for CallbackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(err) => err.severity(),
            Self::LockFlag(err) => err.severity(),
            Self::Message(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
            Self::LockFlag(err) => err.error_code(),
            Self::Message(_) => "CALLBACK_FAILED",
        }
    }
}

pub type CallbackResult<T = ()> = Result<T, CallbackError>;

type PredicateFn = dyn Fn(&Character, &HostEnv<'_>) -> bool + Send + Sync;
type ItemFn = dyn Fn(&mut WornItem, &Character, &HostEnv<'_>) -> CallbackResult + Send + Sync;
type PreRunFn =
    dyn Fn(Vec<WheelItem>, &mut Character, &HostEnv<'_>) -> CallbackResult<Vec<WheelItem>> + Send + Sync;

/// Decides at equip time whether an item is equipped at all.
#[derive(Clone)]
pub struct EquipPredicate(Arc<PredicateFn>);

impl EquipPredicate {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Character, &HostEnv<'_>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn evaluate(&self, character: &Character, env: &HostEnv<'_>) -> bool {
        (self.0)(character, env)
    }
}

/// Runs after an item has been equipped; used both per item and set-wide.
#[derive(Clone)]
pub struct ItemCallback(Arc<ItemFn>);

impl ItemCallback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut WornItem, &Character, &HostEnv<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// # Errors
    ///
    /// Propagates the callback's error.
    pub fn call(
        &self,
        item: &mut WornItem,
        character: &Character,
        env: &HostEnv<'_>,
    ) -> CallbackResult {
        (self.0)(item, character, env)
    }
}

/// Transforms the item list after stripping and before anything is equipped.
#[derive(Clone)]
pub struct PreRunCallback(Arc<PreRunFn>);

impl PreRunCallback {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Vec<WheelItem>, &mut Character, &HostEnv<'_>) -> CallbackResult<Vec<WheelItem>>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(callback))
    }

    /// # Errors
    ///
    /// Propagates the callback's error.
    pub fn call(
        &self,
        items: Vec<WheelItem>,
        character: &mut Character,
        env: &HostEnv<'_>,
    ) -> CallbackResult<Vec<WheelItem>> {
        (self.0)(items, character, env)
    }
}

macro_rules! callback_traits {
    ($ty:ident) => {
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($ty), "(..)"))
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }
    };
}

callback_traits!(EquipPredicate);
callback_traits!(ItemCallback);
callback_traits!(PreRunCallback);

//! Item-set equip engine for slot-based wearable items.
//!
//! `wheel-core` decides in which order a batch of items is removed and
//! equipped so that no item is blocked by another, strips clothing, checks
//! whether worn locks may be opened and records per-item failures. Checks and
//! per-item adjustments are listeners in a [`hooks::WheelHooks`] registry.
//! The host game is reached only through the oracle traits in [`env`]; every mutation
//! goes through [`equip::fortune_wheel_equip`] or [`strip::character_strip`]
//! on a character borrowed for the duration of the call.
pub mod config;
pub mod env;
pub mod equip;
pub mod error;
pub mod graph;
pub mod hooks;
pub mod item;
pub mod lock;
pub mod state;
pub mod strip;

pub use config::EquipConfig;
pub use env::{
    AssetDefinition, AssetFlags, AssetName, AssetOracle, Env, ExtendedArchetype, GroupCategory,
    GroupDefinition, GroupName, HostEnv, OracleError, PermissionOracle, SessionOracle, TypeSetter,
};
pub use equip::{
    EquipError, EquipFailure, EquipFailureRecord, EquipReport, EquipRequest, FailureEntry,
    fortune_wheel_equip,
};
pub use error::{CoreError, ErrorSeverity};
pub use graph::{
    BlockGraph, GraphError, GraphItem, GraphNode, block_superset, fortune_items_sort,
    items_arg_sort,
};
pub use hooks::{
    ActiveHooks, BUILTIN_OWNER, HookContext, HookError, HookKind, HookKwargs, HookLog,
    HookLogEntry, HookOutcome, HookRegistration, ItemDraft, Listener, SkipReason, ValidateEvent,
    WheelHooks,
};
pub use item::{
    CallbackError, CallbackResult, EquipPredicate, ItemCallback, ItemSet, ItemSetError, LockFlag,
    LockFlagError, PreRunCallback, WheelItem, WheelOption, WheelSets, weighted_option_ids,
};
pub use lock::{KeyCache, LockKind, can_unlock};
pub use state::{
    Appearance, Character, CharacterKind, CraftProperty, CraftedItem, Effect, ItemProperty,
    LockState, PropertyValue, SharedSettings, WornItem,
};
pub use strip::{StripCondition, StripError, StripLevel, character_strip, strip_condition};

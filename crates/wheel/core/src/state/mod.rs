//! Mutable character state the engine operates on.
//!
//! The host owns characters; the engine receives them by `&mut` for the
//! duration of a single strip or equip call and edits the appearance list
//! through the helpers here.
mod character;
mod item;

pub use character::{Appearance, Character, CharacterKind, SharedSettings};
pub use item::{
    CraftProperty, CraftedItem, Effect, ItemProperty, LockState, PropertyValue, WornItem,
};

//! Checks every equip runs.
use crate::equip::EquipFailure;
use crate::item::CallbackResult;
use crate::lock::can_unlock;

use super::{HookContext, HookRegistration, Listener, ValidateEvent};

/// Owner of the built-in hooks.
pub const BUILTIN_OWNER: &str = "wheel";

type Verdict = CallbackResult<Option<EquipFailure>>;

pub(super) fn registrations() -> Vec<HookRegistration> {
    vec![
        HookRegistration::new(BUILTIN_OWNER, "LockedItem", Listener::validate_unequip(locked_item))
            .with_description("The worn item is locked and the lock can't be opened"),
        HookRegistration::new(
            BUILTIN_OWNER,
            "BlockedOrLimited",
            Listener::validate_unequip(blocked_or_limited),
        )
        .with_description("The new item is blocked or limited"),
        HookRegistration::new(BUILTIN_OWNER, "RoomDisallowed", Listener::validate_unequip(room))
            .with_description("The room disallows the new item"),
        HookRegistration::new(BUILTIN_OWNER, "GroupBlocked", Listener::validate_unequip(group_blocked))
            .with_description("Another item covers the group"),
        HookRegistration::new(
            BUILTIN_OWNER,
            "GroupBlockedByOwnerRule",
            Listener::validate_unequip(owner_rule),
        )
        .with_description("An owner rule blocks the group"),
        HookRegistration::new(BUILTIN_OWNER, "Prerequisites", Listener::validate_equip(prerequisites))
            .with_description("The new item's prerequisites aren't met"),
    ]
}

fn locked_item(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let Some(old) = event.old_item else {
        return Ok(None);
    };
    let unlockable = can_unlock(old, context.character, context.env, event.keys)?;
    Ok((!unlockable).then_some(EquipFailure::LockedItem))
}

fn blocked_or_limited(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let Some(asset) = event.new_asset else {
        return Ok(None);
    };
    let blocked = context
        .env
        .permissions()?
        .blocked_or_limited(context.character, asset);
    Ok(blocked.then_some(EquipFailure::BlockedOrLimited))
}

fn room(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let Some(asset) = event.new_asset else {
        return Ok(None);
    };
    let allowed = context.env.permissions()?.room_allows(asset);
    Ok((!allowed).then_some(EquipFailure::RoomDisallowed))
}

fn group_blocked(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let blocked = context
        .env
        .permissions()?
        .group_blocked(context.character, event.group);
    Ok(blocked.then_some(EquipFailure::GroupBlocked))
}

fn owner_rule(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let blocked = context
        .env
        .permissions()?
        .group_blocked_by_owner_rule(context.character, event.group);
    Ok(blocked.then_some(EquipFailure::GroupBlockedByOwnerRule))
}

fn prerequisites(context: &HookContext<'_, '_>, event: &mut ValidateEvent<'_>) -> Verdict {
    let Some(asset) = event.new_asset else {
        return Ok(None);
    };
    let allowed = context
        .env
        .permissions()?
        .prerequisites_allow(context.character, asset);
    Ok((!allowed).then_some(EquipFailure::Prerequisites))
}

use crate::env::GroupName;

use super::HookKind;

/// Why an enabled-looking hook didn't run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum SkipReason {
    /// Conditional hook the item set didn't activate.
    #[strum(to_string = "Disabled event listener")]
    Disabled,
    /// The item's group isn't among the hook's target groups.
    #[strum(to_string = "Target group mismatch")]
    TargetGroupMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    Success,
    /// The listener returned an error; its result was ignored.
    Failed(String),
    Skipped(SkipReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookLogEntry {
    pub owner: String,
    pub kind: HookKind,
    pub name: String,
    /// Item group for item-level hooks.
    pub group: Option<GroupName>,
    pub outcome: HookOutcome,
}

/// Every hook invocation of one equip call, in call order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookLog {
    entries: Vec<HookLogEntry>,
}

impl HookLog {
    pub(crate) fn push(&mut self, entry: HookLogEntry) {
        self.entries.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookLogEntry> {
        self.entries.iter()
    }

    /// Entries of the hook `owner`/`kind`/`name`.
    pub fn for_hook<'a>(
        &'a self,
        owner: &'a str,
        kind: HookKind,
        name: &'a str,
    ) -> impl Iterator<Item = &'a HookLogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.owner == owner && entry.kind == kind && entry.name == name)
    }

    /// Entries whose listener failed.
    pub fn errors(&self) -> impl Iterator<Item = &HookLogEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, HookOutcome::Failed(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

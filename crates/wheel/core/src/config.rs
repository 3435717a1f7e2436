/// Equip configuration and engine-wide constants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipConfig {
    /// Refresh the character after every equipped item instead of once at the end.
    pub strict_refresh: bool,
    /// Abort the whole equip when the character is enclosed by an item whose
    /// lock can't be opened.
    pub abort_when_enclosed: bool,
    /// Number of custom item-set slots.
    pub max_item_sets: usize,
}

impl EquipConfig {
    // ===== compile-time constants =====
    /// Maximum number of lock flags per item set; option IDs reserve 16 per set.
    pub const MAX_FLAGS: usize = 16;
    /// First option ID of built-in item sets.
    pub const BUILTIN_OPTION_BASE: u32 = 256;
    /// First option ID of custom item sets.
    pub const CUSTOM_OPTION_BASE: u32 = 512;
    /// Length of generated timer-lock passwords.
    pub const PASSWORD_LENGTH: usize = 8;
    /// Bounds of an item set's wheel weight.
    pub const MIN_WEIGHT: u8 = 1;
    pub const MAX_WEIGHT: u8 = 9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ITEM_SETS: usize = 16;

    pub fn new() -> Self {
        Self {
            strict_refresh: false,
            abort_when_enclosed: true,
            max_item_sets: Self::DEFAULT_MAX_ITEM_SETS,
        }
    }

    pub fn with_strict_refresh(mut self, strict_refresh: bool) -> Self {
        self.strict_refresh = strict_refresh;
        self
    }

    pub fn with_abort_when_enclosed(mut self, abort_when_enclosed: bool) -> Self {
        self.abort_when_enclosed = abort_when_enclosed;
        self
    }
}

impl Default for EquipConfig {
    fn default() -> Self {
        Self::new()
    }
}

use std::borrow::Borrow;
use std::fmt;

use bitflags::bitflags;

use super::OracleError;
use crate::state::{Character, CraftedItem, ItemProperty};

/// Name of a body location ("group" or slot) that holds at most one item.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupName(pub String);

/// Name of an asset within its group.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetName(pub String);

macro_rules! string_newtype {
    ($ty:ident) => {
        impl $ty {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype!(GroupName);
string_newtype!(AssetName);

/// Category of a group. Only `Item` groups take part in block graphs,
/// only `Appearance` groups are ever stripped.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupCategory {
    Appearance,
    Item,
}

/// Static description of a group as exposed by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupDefinition {
    pub name: GroupName,
    pub category: GroupCategory,
    /// Whether the group may be left empty.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub allow_none: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub underwear: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub body_cosplay: bool,
}

impl GroupDefinition {
    pub fn new(name: impl Into<GroupName>, category: GroupCategory) -> Self {
        Self {
            name: name.into(),
            category,
            allow_none: true,
            underwear: false,
            body_cosplay: false,
        }
    }

    pub fn is_item(&self) -> bool {
        self.category == GroupCategory::Item
    }

    pub fn is_appearance(&self) -> bool {
        self.category == GroupCategory::Appearance
    }
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_colorable_layers() -> u8 {
    1
}

bitflags! {
    /// Boolean traits of an asset.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AssetFlags: u16 {
        const BODY_COSPLAY = 1 << 0;
        /// The asset encloses the wearer (boxes, vacuum beds, ...).
        const ENCLOSE      = 1 << 1;
        const ALLOW_LOCK   = 1 << 2;
        const IS_LOCK      = 1 << 3;
        const OWNER_ONLY   = 1 << 4;
        const LOVER_ONLY   = 1 << 5;
        const FAMILY_ONLY  = 1 << 6;
    }
}

/// Extended-item archetypes that carry a selectable type state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ExtendedArchetype {
    Typed,
    Vibrating,
    Modular,
    VariableHeight,
    Text,
}

/// Static asset definition as exposed by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetDefinition {
    pub group: GroupName,
    pub name: AssetName,
    /// Human-readable name, used as the key of equip failure records.
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_color: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_colorable_layers"))]
    pub colorable_layers: u8,
    /// Groups blocked by this asset regardless of its type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Vec<GroupName>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AssetFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub archetype: Option<ExtendedArchetype>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: i32,
    /// Room-filterable categories (e.g. "SciFi", "Medical").
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Vec<String>,
}

impl AssetDefinition {
    pub fn new(group: impl Into<GroupName>, name: impl Into<AssetName>) -> Self {
        let name = name.into();
        Self {
            group: group.into(),
            description: name.0.clone(),
            name,
            default_color: Vec::new(),
            colorable_layers: 1,
            block: Vec::new(),
            flags: AssetFlags::empty(),
            archetype: None,
            difficulty: 0,
            categories: Vec::new(),
        }
    }

    pub fn with_block<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.block = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flags(mut self, flags: AssetFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_archetype(mut self, archetype: ExtendedArchetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default_color<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_color = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn body_cosplay(&self) -> bool {
        self.flags.contains(AssetFlags::BODY_COSPLAY)
    }

    pub fn encloses(&self) -> bool {
        self.flags.contains(AssetFlags::ENCLOSE)
    }

    pub fn is_lock(&self) -> bool {
        self.flags.contains(AssetFlags::IS_LOCK)
    }

    pub fn allows_lock(&self) -> bool {
        self.flags.contains(AssetFlags::ALLOW_LOCK)
    }

    /// Whether only owners, lovers or family may manipulate the asset.
    pub fn is_exclusive(&self) -> bool {
        self.flags
            .intersects(AssetFlags::OWNER_ONLY | AssetFlags::LOVER_ONLY | AssetFlags::FAMILY_ONLY)
    }
}

/// Asset and group lookup provided by the host.
pub trait AssetOracle: Send + Sync {
    /// Looks up a group definition by name.
    fn group(&self, group: &GroupName) -> Option<GroupDefinition>;

    /// Looks up an asset definition by group and name.
    fn asset(&self, group: &GroupName, name: &AssetName) -> Option<AssetDefinition>;

    /// Total number of groups known to the host.
    ///
    /// Used as the priority of enclosing items so they sort after everything else.
    fn group_count(&self) -> usize;

    /// Resolves the baseline property of `asset` with the given type selected.
    ///
    /// Blocking can depend on the type (a hood that also covers the mouth), so
    /// the returned property's `block` and `effects` are merged into the
    /// asset's static ones by the graph builder.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidType` if the asset doesn't support `type_name`.
    fn baseline_property(
        &self,
        asset: &AssetDefinition,
        character: &Character,
        type_name: Option<&str>,
    ) -> Result<ItemProperty, OracleError>;

    /// Type names selectable on `asset`, in the host's declaration order.
    fn type_options(&self, _asset: &AssetDefinition) -> Vec<String> {
        Vec::new()
    }

    /// Validates and normalizes crafted metadata for `asset`.
    ///
    /// Invoked once per preset item when built-in item sets are constructed.
    fn validate_craft(&self, craft: &mut CraftedItem, asset: &AssetDefinition) {
        if craft.name.trim().is_empty() {
            craft.name = asset.description.clone();
        }
    }
}

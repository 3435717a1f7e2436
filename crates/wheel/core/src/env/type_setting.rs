use super::{AssetDefinition, ExtendedArchetype, OracleError};
use crate::state::{Character, WornItem};

/// Applies the extended "type" state of worn items.
///
/// The host keeps a setter per archetype; the core dispatches on
/// [`ExtendedArchetype`] and never touches the host's registry itself.
pub trait TypeSetter: Send + Sync {
    /// Sets `type_name` on `item` according to `archetype`.
    ///
    /// `None` selects the archetype's default state.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::InvalidType` for types the asset doesn't offer and
    /// `OracleError::UnsupportedArchetype` if the host can't handle `archetype`.
    fn set_type(
        &self,
        archetype: ExtendedArchetype,
        asset: &AssetDefinition,
        item: &mut WornItem,
        type_name: Option<&str>,
        character: &Character,
    ) -> Result<(), OracleError>;
}

/// Sets the type of `item`, doing nothing for assets without an archetype.
///
/// # Errors
///
/// Propagates the setter's error.
pub fn item_set_type<T>(
    setter: &T,
    asset: &AssetDefinition,
    item: &mut WornItem,
    type_name: Option<&str>,
    character: &Character,
) -> Result<(), OracleError>
where
    T: TypeSetter + ?Sized,
{
    match asset.archetype {
        Some(archetype) => setter.set_type(archetype, asset, item, type_name, character),
        None => Ok(()),
    }
}

//! [`wheel_core::TypeSetter`] validating against the catalog's type tables.
use std::sync::Arc;

use wheel_core::{
    AssetDefinition, AssetOracle, Character, Effect, ExtendedArchetype, OracleError, TypeSetter,
    WornItem,
};

use super::AssetOracleImpl;

/// TypeSetter for typed, modular and vibrating assets
pub struct TypeSetterImpl {
    assets: Arc<AssetOracleImpl>,
}

impl TypeSetterImpl {
    pub fn new(assets: Arc<AssetOracleImpl>) -> Self {
        Self { assets }
    }
}

impl TypeSetter for TypeSetterImpl {
    fn set_type(
        &self,
        archetype: ExtendedArchetype,
        asset: &AssetDefinition,
        item: &mut WornItem,
        type_name: Option<&str>,
        character: &Character,
    ) -> Result<(), OracleError> {
        match archetype {
            ExtendedArchetype::Typed | ExtendedArchetype::Modular | ExtendedArchetype::Vibrating => {}
            other => return Err(OracleError::UnsupportedArchetype(other)),
        }
        let type_name = self.assets.resolve_type(asset, type_name)?;
        let baseline = self
            .assets
            .baseline_property(asset, character, type_name.as_deref())?;
        item.property.effects.retain(|effect| *effect != Effect::Vibrating);
        item.property.merge(&baseline);
        item.property.type_name = type_name;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheel_core::{GroupCategory, GroupDefinition};

    fn setter() -> TypeSetterImpl {
        let mut assets = AssetOracleImpl::new();
        assets.add_group(GroupDefinition::new("ItemArms", GroupCategory::Item));
        assets.add_asset(
            AssetDefinition::new("ItemArms", "HempRope").with_archetype(ExtendedArchetype::Typed),
        );
        assets.add_asset(
            AssetDefinition::new("ItemArms", "Tape").with_archetype(ExtendedArchetype::Text),
        );
        assets.set_type_options(
            "ItemArms".into(),
            "HempRope".into(),
            vec!["typed=0".into(), "typed=1".into()],
        );
        TypeSetterImpl::new(Arc::new(assets))
    }

    #[test]
    fn declared_types_are_set() {
        let setter = setter();
        let rope = setter
            .assets
            .asset(&"ItemArms".into(), &"HempRope".into())
            .expect("rope");
        let mut item = WornItem::new("ItemArms", "HempRope");

        setter
            .set_type(ExtendedArchetype::Typed, &rope, &mut item, Some("typed=1"), &Character::default())
            .expect("set type");
        assert_eq!(item.property.type_name.as_deref(), Some("typed=1"));
        assert!(!item.has_effect(Effect::Vibrating));

        let err = setter
            .set_type(ExtendedArchetype::Typed, &rope, &mut item, Some("typed=9"), &Character::default())
            .unwrap_err();
        assert!(matches!(err, OracleError::InvalidType { .. }));
        assert_eq!(item.property.type_name.as_deref(), Some("typed=1"));
    }

    #[test]
    fn text_archetype_is_unsupported() {
        let setter = setter();
        let tape = setter
            .assets
            .asset(&"ItemArms".into(), &"Tape".into())
            .expect("tape");
        let mut item = WornItem::new("ItemArms", "Tape");

        let err = setter
            .set_type(ExtendedArchetype::Text, &tape, &mut item, None, &Character::default())
            .unwrap_err();
        assert_eq!(err, OracleError::UnsupportedArchetype(ExtendedArchetype::Text));
    }
}

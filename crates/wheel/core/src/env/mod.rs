//! Traits describing the host services the core depends on.
//!
//! Oracles expose the host's asset database, permission rules, extended-item
//! type setters and session primitives. The [`Env`] aggregate bundles them so
//! the graph builder and the equip orchestrator can reach everything they need
//! without coupling to a concrete host.
mod assets;
mod error;
mod permissions;
mod session;
mod type_setting;

pub use assets::{
    AssetDefinition, AssetFlags, AssetName, AssetOracle, ExtendedArchetype, GroupCategory,
    GroupDefinition, GroupName,
};
pub use error::OracleError;
pub use permissions::PermissionOracle;
pub use session::SessionOracle;
pub use type_setting::{TypeSetter, item_set_type};

/// Aggregates the host oracles required by the core.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, A, P, T, S>
where
    A: AssetOracle + ?Sized,
    P: PermissionOracle + ?Sized,
    T: TypeSetter + ?Sized,
    S: SessionOracle + ?Sized,
{
    assets: Option<&'a A>,
    permissions: Option<&'a P>,
    types: Option<&'a T>,
    session: Option<&'a S>,
}

pub type HostEnv<'a> = Env<
    'a,
    dyn AssetOracle + 'a,
    dyn PermissionOracle + 'a,
    dyn TypeSetter + 'a,
    dyn SessionOracle + 'a,
>;

impl<'a, A, P, T, S> Env<'a, A, P, T, S>
where
    A: AssetOracle + ?Sized,
    P: PermissionOracle + ?Sized,
    T: TypeSetter + ?Sized,
    S: SessionOracle + ?Sized,
{
    pub fn new(
        assets: Option<&'a A>,
        permissions: Option<&'a P>,
        types: Option<&'a T>,
        session: Option<&'a S>,
    ) -> Self {
        Self {
            assets,
            permissions,
            types,
            session,
        }
    }

    pub fn with_all(assets: &'a A, permissions: &'a P, types: &'a T, session: &'a S) -> Self {
        Self::new(Some(assets), Some(permissions), Some(types), Some(session))
    }

    pub fn empty() -> Self {
        Self {
            assets: None,
            permissions: None,
            types: None,
            session: None,
        }
    }

    /// Returns the AssetOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AssetsNotAvailable` if no asset oracle was provided.
    pub fn assets(&self) -> Result<&'a A, OracleError> {
        self.assets.ok_or(OracleError::AssetsNotAvailable)
    }

    /// Returns the PermissionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PermissionsNotAvailable` if no permission oracle was provided.
    pub fn permissions(&self) -> Result<&'a P, OracleError> {
        self.permissions.ok_or(OracleError::PermissionsNotAvailable)
    }

    /// Returns the TypeSetter, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TypesNotAvailable` if no type setter was provided.
    pub fn types(&self) -> Result<&'a T, OracleError> {
        self.types.ok_or(OracleError::TypesNotAvailable)
    }

    /// Returns the SessionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SessionNotAvailable` if no session oracle was provided.
    pub fn session(&self) -> Result<&'a S, OracleError> {
        self.session.ok_or(OracleError::SessionNotAvailable)
    }
}

impl<'a, A, P, T, S> Env<'a, A, P, T, S>
where
    A: AssetOracle + 'a,
    P: PermissionOracle + 'a,
    T: TypeSetter + 'a,
    S: SessionOracle + 'a,
{
    /// Converts this environment into a trait-object based `HostEnv`.
    pub fn into_host_env(self) -> HostEnv<'a> {
        let assets: Option<&'a dyn AssetOracle> = self.assets.map(|assets| assets as _);
        let permissions: Option<&'a dyn PermissionOracle> =
            self.permissions.map(|permissions| permissions as _);
        let types: Option<&'a dyn TypeSetter> = self.types.map(|types| types as _);
        let session: Option<&'a dyn SessionOracle> = self.session.map(|session| session as _);
        Env::new(assets, permissions, types, session)
    }
}

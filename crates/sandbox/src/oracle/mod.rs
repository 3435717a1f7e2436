//! In-memory implementations of the `wheel-core` host oracles.
//!
//! The sandbox stands in for the game client: static asset data comes from a
//! [`wheel_content::AssetCatalog`], permission answers from a small rule set,
//! and session calls are recorded instead of being sent anywhere.
mod assets;
mod permissions;
mod session;
mod types;

use std::sync::Arc;

use wheel_content::AssetCatalog;
use wheel_core::{Env, HostEnv};

pub use assets::AssetOracleImpl;
pub use permissions::{PermissionOracleImpl, PermissionRules};
pub use session::{SessionEvent, SessionOracleImpl};
pub use types::TypeSetterImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct HostManager {
    pub(crate) assets: Arc<AssetOracleImpl>,
    pub(crate) permissions: Arc<PermissionOracleImpl>,
    pub(crate) types: Arc<TypeSetterImpl>,
    pub(crate) session: Arc<SessionOracleImpl>,
}

impl HostManager {
    /// Creates a new host manager
    pub fn new(
        assets: Arc<AssetOracleImpl>,
        permissions: Arc<PermissionOracleImpl>,
        types: Arc<TypeSetterImpl>,
        session: Arc<SessionOracleImpl>,
    ) -> Self {
        Self {
            assets,
            permissions,
            types,
            session,
        }
    }

    /// Wires every oracle around one catalog.
    pub fn from_catalog(catalog: AssetCatalog, rules: PermissionRules) -> Self {
        Self::with_session(catalog, rules, SessionOracleImpl::new())
    }

    pub fn with_session(
        catalog: AssetCatalog,
        rules: PermissionRules,
        session: SessionOracleImpl,
    ) -> Self {
        let assets = Arc::new(AssetOracleImpl::from_catalog(catalog));
        let permissions = Arc::new(PermissionOracleImpl::new(Arc::clone(&assets), rules));
        let types = Arc::new(TypeSetterImpl::new(Arc::clone(&assets)));
        Self::new(assets, permissions, types, Arc::new(session))
    }

    /// Converts host manager into HostEnv for wheel-core
    pub fn as_host_env(&self) -> HostEnv<'_> {
        Env::with_all(
            self.assets.as_ref(),
            self.permissions.as_ref(),
            self.types.as_ref(),
            self.session.as_ref(),
        )
        .into_host_env()
    }

    pub fn assets(&self) -> &AssetOracleImpl {
        &self.assets
    }

    pub fn session(&self) -> &SessionOracleImpl {
        &self.session
    }
}

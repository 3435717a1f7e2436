//! Oracle access errors.
//!
//! Errors related to oracle availability and host data access.

use super::{AssetName, ExtendedArchetype, GroupName};
use crate::error::{CoreError, ErrorSeverity};

/// Errors that occur when accessing host services.
///
/// Missing oracles are wiring mistakes and therefore fatal; lookups that fail
/// point at bad input data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// AssetOracle is not available in the environment.
    #[error("AssetOracle not available")]
    AssetsNotAvailable,

    /// PermissionOracle is not available in the environment.
    #[error("PermissionOracle not available")]
    PermissionsNotAvailable,

    /// TypeSetter is not available in the environment.
    #[error("TypeSetter not available")]
    TypesNotAvailable,

    /// SessionOracle is not available in the environment.
    #[error("SessionOracle not available")]
    SessionNotAvailable,

    /// Group definition was not found.
    #[error("group '{0}' not found")]
    GroupNotFound(GroupName),

    /// Asset definition was not found.
    #[error("asset '{group}/{name}' not found")]
    AssetNotFound { group: GroupName, name: AssetName },

    /// The asset has no type state called `type_name`.
    #[error("asset '{group}/{name}' has no type '{type_name}'")]
    InvalidType {
        group: GroupName,
        name: AssetName,
        type_name: String,
    },

    /// The host has no type setter for this archetype.
    #[error("archetype '{0}' is not supported by the host")]
    UnsupportedArchetype(ExtendedArchetype),
}

impl CoreError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            AssetsNotAvailable | PermissionsNotAvailable | TypesNotAvailable
            | SessionNotAvailable => ErrorSeverity::Fatal,

            GroupNotFound(_) | AssetNotFound { .. } | InvalidType { .. } => {
                ErrorSeverity::Validation
            }

            UnsupportedArchetype(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            AssetsNotAvailable => "ORACLE_ASSETS_NOT_AVAILABLE",
            PermissionsNotAvailable => "ORACLE_PERMISSIONS_NOT_AVAILABLE",
            TypesNotAvailable => "ORACLE_TYPES_NOT_AVAILABLE",
            SessionNotAvailable => "ORACLE_SESSION_NOT_AVAILABLE",
            GroupNotFound(_) => "ORACLE_GROUP_NOT_FOUND",
            AssetNotFound { .. } => "ORACLE_ASSET_NOT_FOUND",
            InvalidType { .. } => "ORACLE_INVALID_TYPE",
            UnsupportedArchetype(_) => "ORACLE_UNSUPPORTED_ARCHETYPE",
        }
    }
}

//! Block graph construction errors.

use crate::env::{AssetName, GroupName, OracleError};
use crate::error::{CoreError, ErrorSeverity};

/// Errors raised while building or querying a [`super::BlockGraph`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The item list is malformed (e.g. an entry without a group).
    #[error("invalid item list at index {index}: {reason}")]
    InvalidItemList { index: usize, reason: String },

    /// An item references an asset the host doesn't know.
    #[error("unknown asset: {group}/{name}")]
    UnknownAsset { group: GroupName, name: AssetName },

    /// Block declarations form a cycle through `group`.
    #[error("block graph contains a cycle through group '{group}'")]
    CyclicBlockGraph { group: GroupName },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GraphError {
    pub(crate) fn invalid(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidItemList {
            index,
            reason: reason.into(),
        }
    }
}

impl CoreError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidItemList { .. } | Self::UnknownAsset { .. } => ErrorSeverity::Validation,
            Self::CyclicBlockGraph { .. } => ErrorSeverity::Internal,
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidItemList { .. } => "GRAPH_INVALID_ITEM_LIST",
            Self::UnknownAsset { .. } => "GRAPH_UNKNOWN_ASSET",
            Self::CyclicBlockGraph { .. } => "GRAPH_CYCLIC_BLOCK_GRAPH",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

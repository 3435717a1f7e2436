//! Hard errors of the equip orchestrator.
use crate::env::OracleError;
use crate::error::{CoreError, ErrorSeverity};
use crate::graph::GraphError;
use crate::item::CallbackError;
use crate::strip::StripError;

/// Errors that abort an equip call.
///
/// Everything that concerns a single item is an
/// [`EquipFailure`](super::EquipFailure) instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Strip(#[from] StripError),

    #[error("pre-run callback failed: {0}")]
    PreRun(CallbackError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CoreError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Graph(err) => err.severity(),
            Self::Strip(err) => err.severity(),
            Self::PreRun(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(err) => err.error_code(),
            Self::Strip(err) => err.error_code(),
            Self::PreRun(_) => "EQUIP_PRE_RUN_FAILED",
            Self::Oracle(err) => err.error_code(),
        }
    }
}

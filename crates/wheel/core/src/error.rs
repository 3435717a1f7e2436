//! Common error infrastructure for wheel-core.
//!
//! Domain-specific errors (e.g. `GraphError`, `EquipError`) live next to the
//! operations that produce them. This module only holds the pieces every error
//! type shares.
//!
//! Only conditions that abort a whole call are errors. Problems with a single
//! item of an equip batch are recorded as [`crate::equip::EquipFailure`]
//! values in the report.

/// How bad an error is, and whether retrying can help.
///
/// - **Recoverable**: The same call may succeed once the host state changes
/// - **Validation**: Invalid input from the caller, do not retry unchanged
/// - **Internal**: Inconsistent host data (e.g. a cyclic block graph)
/// - **Fatal**: A required host service is missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Lowercase name for logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Broken host data or wiring rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum of this crate.
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable error code suitable for logs and UI messages.
    ///
    /// Codes are SCREAMING_SNAKE_CASE and prefixed by module (`GRAPH_`, `EQUIP_`, ...).
    fn error_code(&self) -> &'static str;

    /// Whether changing the caller's input can fix this error.
    fn is_caller_error(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Validation)
    }
}

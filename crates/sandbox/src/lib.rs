//! In-memory host for the wheel engine.
//!
//! Implements every `wheel-core` oracle on top of the bundled content so item
//! sets can be equipped without a game client. Used by the CLI and by the
//! end-to-end tests.
pub mod oracle;
mod sandbox;

pub use oracle::{
    AssetOracleImpl, HostManager, PermissionOracleImpl, PermissionRules, SessionEvent,
    SessionOracleImpl, TypeSetterImpl,
};
pub use sandbox::{Sandbox, SandboxError};

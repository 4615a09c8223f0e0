//! Error taxonomy.
//!
//! Two layers, kept strictly apart:
//!
//! * [`SessionError`] — request-level faults. These abort the whole
//!   operation before any remote call is made and leave session state
//!   (target set, output mode) untouched.
//! * [`RemoteError`] — per-target faults reported by the remote executor.
//!   These never abort a dispatch; the engine folds them into the failing
//!   device's result and the renderer shows them next to the successes.

use thiserror::Error;

use crate::model::FailureKind;

/// A fault that invalidates an entire request before dispatch.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid target pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no targets selected")]
    EmptyTargetSet,

    #[error("empty command")]
    BlankCommand,

    #[error("inventory unavailable: {0}")]
    InventoryUnavailable(#[source] anyhow::Error),

    #[error("output mode {mode:?} unavailable: no normalizer loaded")]
    CapabilityUnavailable { mode: String },

    #[error("the command {command:?} is disallowed")]
    BannedCommand { command: String },

    #[error("{0} second(s) is the minimum timeout")]
    TimeoutTooShort(u64),
}

/// A failure reported by the remote executor for a single device.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("device unreachable: {0}")]
    Unreachable(String),

    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    #[error("remote command failed: {0}")]
    CommandFailed(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RemoteError::Unreachable(_) => FailureKind::Unreachable,
            RemoteError::AuthRejected(_) => FailureKind::AuthRejected,
            RemoteError::CommandFailed(_) => FailureKind::CommandError,
            RemoteError::Transport(_) => FailureKind::Transport,
        }
    }
}

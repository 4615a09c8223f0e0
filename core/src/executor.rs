//! The remote-execution boundary.
//!
//! "Run command C on device D" is a single opaque call from the engine's
//! point of view. Session establishment, authentication and the wire
//! protocol all live behind this trait.

use async_trait::async_trait;

use mrcli_common::error::RemoteError;

/// Executes one command on one remote device.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Runs `command` on `device` and returns its raw textual output.
    ///
    /// Errors must be classified via [`RemoteError`] so the failure kind
    /// survives through to rendering.
    async fn execute(&self, device: &str, command: &str) -> Result<String, RemoteError>;
}

use std::time::Duration;

use crate::error::SessionError;
use crate::model::OutputMode;

/// The minimum accepted per-target timeout.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// The default per-target timeout for remote calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Per-session tunables read by the dispatch engine and the renderer.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Wall-clock budget for each individual remote call.
    pub timeout: Duration,
    /// How result collections are rendered.
    pub output: OutputMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            output: OutputMode::Raw,
        }
    }
}

impl SessionConfig {
    /// Replaces the per-target timeout, enforcing the 1 second floor.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), SessionError> {
        if timeout < MIN_TIMEOUT {
            return Err(SessionError::TimeoutTooShort(MIN_TIMEOUT.as_secs()));
        }
        self.timeout = timeout;
        Ok(())
    }
}

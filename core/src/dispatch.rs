//! # Dispatch Engine
//!
//! Fans a single command out to every device in a target set
//! concurrently, then barriers until each device has produced exactly one
//! result.
//!
//! Isolation invariant: a failing, slow or panicking call affects only its
//! own device's result. The engine never returns early and never returns
//! a partial collection; per-target faults are data, not errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use mrcli_common::error::SessionError;
use mrcli_common::model::{FailureKind, ResultCollection, TargetResult, TargetSet};

use crate::executor::RemoteExecutor;

/// Runs `command` on every device in `targets` in parallel.
///
/// The target set is a snapshot owned by the caller for the duration of
/// the call; later selections never affect a dispatch already in flight.
/// One task is spawned per device (target sets are operator-scoped, tens
/// not millions, so fan-out is unbounded). Each call is capped at
/// `timeout`; a call still running at the deadline is dropped and its
/// device recorded with a [`FailureKind::Timeout`] result, which bounds
/// the total wall clock of the dispatch at `timeout` regardless of how
/// many devices hang.
///
/// Request-level faults (empty target set, blank command) fail before any
/// remote call is made.
pub async fn dispatch(
    executor: Arc<dyn RemoteExecutor>,
    targets: &TargetSet,
    command: &str,
    timeout: Duration,
) -> Result<ResultCollection, SessionError> {
    if targets.is_empty() {
        return Err(SessionError::EmptyTargetSet);
    }
    if command.trim().is_empty() {
        return Err(SessionError::BlankCommand);
    }

    debug!(targets = targets.len(), command, "dispatching");

    let handles: Vec<(String, JoinHandle<TargetResult>)> = targets
        .iter()
        .map(|device| {
            let device = device.to_owned();
            let handle = tokio::spawn(run_one(
                executor.clone(),
                device.clone(),
                command.to_owned(),
                timeout,
            ));
            (device, handle)
        })
        .collect();

    // Completion barrier: every device yields a result before we return.
    let mut results = Vec::with_capacity(handles.len());
    for (device, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => {
                TargetResult::failure(device.as_str(), FailureKind::Interrupted, "request aborted")
            }
            Err(e) => {
                warn!(device, error = %e, "dispatch task failed");
                TargetResult::failure(device.as_str(), FailureKind::Transport, e.to_string())
            }
        };
        results.push(result);
    }

    Ok(ResultCollection::new(results))
}

/// One isolated remote call. Always resolves to a result, never an error.
async fn run_one(
    executor: Arc<dyn RemoteExecutor>,
    device: String,
    command: String,
    timeout: Duration,
) -> TargetResult {
    match tokio::time::timeout(timeout, executor.execute(&device, &command)).await {
        Ok(Ok(output)) => TargetResult::success(device, &output),
        Ok(Err(remote)) => TargetResult::failure(device, remote.kind(), remote.to_string()),
        Err(_) => TargetResult::failure(
            device,
            FailureKind::Timeout,
            format!("timed out after {:.1}s", timeout.as_secs_f64()),
        ),
    }
}

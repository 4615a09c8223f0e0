//! # Operator Session
//!
//! One `Session` owns everything a single operator interacts with: the
//! injected collaborators (inventory, executor, normalizer), the current
//! target set and the output/timeout configuration. There is no ambient
//! process-wide state, so multiple sessions can coexist and each stays
//! independently testable.

use std::sync::Arc;
use std::time::Duration;

use mrcli_common::config::SessionConfig;
use mrcli_common::error::SessionError;
use mrcli_common::model::{OutputMode, TargetSet};

use crate::dispatch;
use crate::executor::RemoteExecutor;
use crate::inventory::InventorySource;
use crate::render::{Normalizer, Renderer};
use crate::selector::TargetSelector;

/// Command prefixes that are never dispatched: reload / reboot / config.
const BANNED_PREFIXES: [&str; 3] = ["rel", "reb", "conf"];

pub struct Session {
    executor: Arc<dyn RemoteExecutor>,
    selector: TargetSelector,
    renderer: Renderer,
    normalizer: Normalizer,
    targets: TargetSet,
    config: SessionConfig,
}

impl Session {
    pub fn new(
        inventory: Arc<dyn InventorySource>,
        executor: Arc<dyn RemoteExecutor>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            executor,
            selector: TargetSelector::new(inventory.clone()),
            renderer: Renderer::new(inventory, normalizer.clone()),
            normalizer,
            targets: TargetSet::default(),
            config: SessionConfig::default(),
        }
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn output_mode(&self) -> OutputMode {
        self.config.output
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Replaces the current target set with the devices matching `pattern`.
    ///
    /// On failure (bad pattern, inventory down) the previous target set is
    /// kept.
    pub fn select_targets(&mut self, pattern: &str) -> Result<&TargetSet, SessionError> {
        let selected = self.selector.select(pattern)?;
        self.targets = selected;
        Ok(&self.targets)
    }

    /// Resolves `pattern` without touching the current target set.
    pub fn matches(&self, pattern: &str) -> Result<TargetSet, SessionError> {
        self.selector.select(pattern)
    }

    /// Switches the output mode, refusing structured mode when no
    /// normalizer was loaded at session start. The mode is unchanged on
    /// failure.
    pub fn set_output(&mut self, mode: OutputMode) -> Result<(), SessionError> {
        if mode == OutputMode::Structured && !self.normalizer.is_available() {
            return Err(SessionError::CapabilityUnavailable {
                mode: mode.to_string(),
            });
        }
        self.config.output = mode;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), SessionError> {
        self.config.set_timeout(timeout)
    }

    /// Dispatches `command` to the current target set and renders the
    /// aggregate in the session's output mode.
    ///
    /// The target set is snapshotted here: re-selecting targets while the
    /// dispatch is in flight affects only later commands.
    pub async fn run(&self, command: &str) -> Result<String, SessionError> {
        if command_is_banned(command) {
            return Err(SessionError::BannedCommand {
                command: command.to_owned(),
            });
        }

        let snapshot = self.targets.clone();
        let results =
            dispatch::dispatch(self.executor.clone(), &snapshot, command, self.config.timeout)
                .await?;
        Ok(self.renderer.render(command, &results, self.config.output))
    }
}

fn command_is_banned(command: &str) -> bool {
    BANNED_PREFIXES
        .iter()
        .any(|prefix| command.trim_start().starts_with(prefix))
}

//! Edge adapters for the core's inventory and executor boundaries.
//!
//! The core treats "run command C on device D" as one opaque call; here
//! that call is a subprocess per device (`ssh` by default), and the
//! inventory is a flat file. Swapping in an agent-network client means
//! replacing these two types, nothing else.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use mrcli_common::error::RemoteError;
use mrcli_core::executor::RemoteExecutor;
use mrcli_core::inventory::InventorySource;

/// Device inventory loaded once from a `name[,platform]` file.
pub struct FileInventory {
    devices: Vec<String>,
    platforms: HashMap<String, String>,
}

impl FileInventory {
    /// Reads the inventory file. Blank lines and `#` comments are skipped.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading inventory file {}", path.display()))?;

        let mut devices = Vec::new();
        let mut platforms = HashMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(',') {
                Some((name, platform)) => {
                    devices.push(name.trim().to_owned());
                    platforms.insert(name.trim().to_owned(), platform.trim().to_owned());
                }
                None => devices.push(line.to_owned()),
            }
        }

        if devices.is_empty() {
            anyhow::bail!("inventory file {} lists no devices", path.display());
        }
        Ok(Self { devices, platforms })
    }
}

impl InventorySource for FileInventory {
    fn list_devices(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.devices.clone())
    }

    fn platform(&self, device: &str) -> Option<String> {
        self.platforms.get(device).cloned()
    }
}

/// Runs each remote call as `PROG DEVICE COMMAND` via a local subprocess.
pub struct SubprocessExecutor {
    program: String,
}

impl SubprocessExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl RemoteExecutor for SubprocessExecutor {
    async fn execute(&self, device: &str, command: &str) -> Result<String, RemoteError> {
        let output = Command::new(&self.program)
            .arg(device)
            .arg(command)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RemoteError::Transport(format!("spawning {}: {e}", self.program)))?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        Err(classify_failure(output.status.code(), stderr))
    }
}

/// Maps a non-zero exit into the remote failure taxonomy.
///
/// ssh reserves 255 for its own failures (connection and auth problems);
/// anything else is the remote command's exit status.
fn classify_failure(code: Option<i32>, stderr: String) -> RemoteError {
    if code != Some(255) {
        return RemoteError::CommandFailed(stderr);
    }
    let lowered = stderr.to_ascii_lowercase();
    if lowered.contains("permission denied") || lowered.contains("authentication") {
        RemoteError::AuthRejected(stderr)
    } else if lowered.contains("connection refused")
        || lowered.contains("no route to host")
        || lowered.contains("could not resolve")
        || lowered.contains("timed out")
    {
        RemoteError::Unreachable(stderr)
    } else {
        RemoteError::Transport(stderr)
    }
}

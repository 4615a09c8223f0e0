//! # Dispatch Data Model
//!
//! Value types shared between the selector, the dispatch engine and the
//! renderer: the session's target set, per-device results and the output
//! mode.
//!
//! All of these are plain data. The dispatch engine produces a
//! [`ResultCollection`] and hands it off; nothing here performs I/O.

use std::fmt;
use std::str::FromStr;

/// The current, operator-selected collection of device names a command
/// will be sent to.
///
/// A target set is ordered alphabetically and free of duplicates. It is
/// replaced wholesale by each selection, never merged incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSet {
    devices: Vec<String>,
}

impl TargetSet {
    /// Builds a target set from arbitrary device names, deduplicating and
    /// sorting alphabetically.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut devices: Vec<String> = names.into_iter().map(Into::into).collect();
        devices.sort();
        devices.dedup();
        Self { devices }
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(String::as_str)
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.devices.join(", "))
    }
}

/// Classifies why a single device failed to produce output.
///
/// Every kind is per-target data: one device failing never aborts the
/// request it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The device could not be reached at all.
    Unreachable,
    /// The device refused the session credentials.
    AuthRejected,
    /// The device rejected or failed the command itself.
    CommandError,
    /// The transport broke mid-request.
    Transport,
    /// The per-target timeout elapsed before the call completed.
    Timeout,
    /// The request was aborted by the operator while this call was in flight.
    Interrupted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unreachable => "Unreachable",
            FailureKind::AuthRejected => "AuthRejected",
            FailureKind::CommandError => "CommandError",
            FailureKind::Transport => "Transport",
            FailureKind::Timeout => "Timeout",
            FailureKind::Interrupted => "Interrupted",
        };
        f.write_str(name)
    }
}

/// What one device produced for one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Raw output lines, verbatim. May be empty.
    Success { lines: Vec<String> },
    /// The call failed; the kind says how, the message says why.
    Failure { kind: FailureKind, message: String },
}

/// The outcome for exactly one targeted device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetResult {
    pub device: String,
    pub outcome: Outcome,
}

impl TargetResult {
    pub fn success(device: impl Into<String>, raw: &str) -> Self {
        Self {
            device: device.into(),
            outcome: Outcome::Success {
                lines: raw.lines().map(str::to_owned).collect(),
            },
        }
    }

    pub fn failure(device: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            outcome: Outcome::Failure {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure { .. })
    }
}

/// All per-device results for one dispatched command.
///
/// Results arrive in completion order, which depends on per-device network
/// latency and must not be relied upon. [`ResultCollection::sorted`]
/// re-imposes the deterministic alphabetical order used for presentation.
#[derive(Clone, Debug, Default)]
pub struct ResultCollection {
    results: Vec<TargetResult>,
}

impl ResultCollection {
    pub fn new(results: Vec<TargetResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter()
    }

    /// Results ordered alphabetically by device name.
    pub fn sorted(&self) -> Vec<&TargetResult> {
        let mut sorted: Vec<&TargetResult> = self.results.iter().collect();
        sorted.sort_by(|a, b| a.device.cmp(&b.device));
        sorted
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

/// How a [`ResultCollection`] is rendered.
///
/// Session-wide: set by the operator and kept until changed. `Structured`
/// is only selectable while a normalizer collaborator is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Raw,
    Structured,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Raw => f.write_str("raw"),
            OutputMode::Structured => f.write_str("structured"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "text" => Ok(OutputMode::Raw),
            "structured" | "csv" => Ok(OutputMode::Structured),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

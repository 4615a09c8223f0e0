//! # Output Rendering
//!
//! Projects a [`ResultCollection`] into the session's presentation format.
//!
//! Rendering is a pure function over the collection: calling it twice with
//! the same inputs yields byte-identical output, and it never mutates the
//! results. Devices are always emitted in alphabetical order, whatever
//! order their calls completed in, and a device is never silently dropped:
//! empty output still gets its block header and failures get a visibly
//! distinct error line.

use std::fmt::Write as _;
use std::sync::Arc;

use mrcli_common::model::{Outcome, OutputMode, ResultCollection, TargetResult};

use crate::inventory::InventorySource;

/// Marker emitted per device when structured mode has no rule for the
/// command.
pub const UNSUPPORTED_MARKER: &str = "unsupported command for structured output";

const UNKNOWN_PLATFORM: &str = "UNKNOWN_DEVICE";

/// Turns one device's raw output into column rows.
///
/// Keyed by the literal command and the device's platform signature.
/// Returning `None` means no rule exists for that pair.
pub trait Normalize: Send + Sync {
    fn normalize(&self, command: &str, platform: &str, raw: &str) -> Option<Vec<Vec<String>>>;
}

/// The optional normalization capability, resolved once at session start.
///
/// Structured output mode is only selectable while this is `Available`;
/// rendering code matches on the variant instead of re-probing for the
/// collaborator on every call.
#[derive(Clone)]
pub enum Normalizer {
    Available(Arc<dyn Normalize>),
    Unavailable,
}

impl Normalizer {
    pub fn is_available(&self) -> bool {
        matches!(self, Normalizer::Available(_))
    }
}

/// Renders result collections in the session's output mode.
pub struct Renderer {
    inventory: Arc<dyn InventorySource>,
    normalizer: Normalizer,
}

impl Renderer {
    pub fn new(inventory: Arc<dyn InventorySource>, normalizer: Normalizer) -> Self {
        Self {
            inventory,
            normalizer,
        }
    }

    pub fn render(&self, command: &str, results: &ResultCollection, mode: OutputMode) -> String {
        match mode {
            OutputMode::Raw => render_raw(results),
            OutputMode::Structured => self.render_structured(command, results),
        }
    }

    fn render_structured(&self, command: &str, results: &ResultCollection) -> String {
        let Normalizer::Available(normalize) = &self.normalizer else {
            // Session::set_output refuses structured mode without a
            // normalizer, so a raw projection here is unreachable in
            // practice; fall back rather than panic.
            return render_raw(results);
        };

        let mut out = String::new();
        for result in results.sorted() {
            match &result.outcome {
                Outcome::Success { lines } => {
                    let platform = self
                        .inventory
                        .platform(&result.device)
                        .unwrap_or_else(|| UNKNOWN_PLATFORM.to_owned());
                    let raw = lines.join("\n");
                    match normalize.normalize(command, &platform, &raw) {
                        Some(mut rows) => {
                            rows.sort();
                            for row in rows {
                                let _ = writeln!(out, "{},{}", result.device, row.join(","));
                            }
                        }
                        None => {
                            let _ = writeln!(out, "{}: {UNSUPPORTED_MARKER}", result.device);
                        }
                    }
                }
                Outcome::Failure { .. } => write_error_line(&mut out, result),
            }
        }
        out
    }
}

fn render_raw(results: &ResultCollection) -> String {
    let mut out = String::new();
    for result in results.sorted() {
        match &result.outcome {
            Outcome::Success { lines } => {
                let _ = writeln!(out, "{}:", result.device);
                for line in lines {
                    let _ = writeln!(out, "{line}");
                }
            }
            Outcome::Failure { .. } => write_error_line(&mut out, result),
        }
    }
    out
}

fn write_error_line(out: &mut String, result: &TargetResult) {
    if let Outcome::Failure { kind, message } = &result.outcome {
        let _ = writeln!(out, "ERROR: {} [{}] {}", result.device, kind, message);
    }
}

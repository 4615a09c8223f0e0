//! # Target Selection
//!
//! Resolves an operator-supplied regular expression into a concrete,
//! deterministic [`TargetSet`] by filtering the inventory's device names.
//!
//! Matching is **full-match**: a device is selected only when its entire
//! name satisfies the pattern. `^[abc]r.*` and `[abc]r.*` therefore select
//! the same devices; a bare `mel` does not select `ar1.mel`.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use mrcli_common::error::SessionError;
use mrcli_common::model::TargetSet;

use crate::inventory::InventorySource;

/// Filters inventory device names by pattern.
pub struct TargetSelector {
    inventory: Arc<dyn InventorySource>,
}

impl TargetSelector {
    pub fn new(inventory: Arc<dyn InventorySource>) -> Self {
        Self { inventory }
    }

    /// Resolves `pattern` against the inventory.
    ///
    /// The result is deduplicated and sorted alphabetically, so a fixed
    /// inventory and pattern always produce the same set in the same
    /// order. A pattern that does not compile fails with
    /// [`SessionError::InvalidPattern`] before the inventory is consulted.
    pub fn select(&self, pattern: &str) -> Result<TargetSet, SessionError> {
        let regex = compile_full_match(pattern)?;

        let names = self
            .inventory
            .list_devices()
            .map_err(SessionError::InventoryUnavailable)?;

        let matched = names.into_iter().filter(|name| regex.is_match(name));
        let set = TargetSet::from_names(matched);
        debug!(pattern, matched = set.len(), "resolved target pattern");
        Ok(set)
    }
}

/// Anchors `pattern` on both ends so only whole-name matches count.
fn compile_full_match(pattern: &str) -> Result<Regex, SessionError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| SessionError::InvalidPattern {
        pattern: pattern.to_owned(),
        source: Box::new(e),
    })
}

//! The inventory boundary.
//!
//! High-level modules depend on this trait only; where the device list
//! actually comes from (an agent network, a flat file, a test fixture) is
//! an adapter concern wired in at the edge.

/// Supplies the full list of known device names on demand.
///
/// Implementations must be cheap to call: the selector queries the
/// inventory on every pattern resolution.
pub trait InventorySource: Send + Sync {
    /// Every device name the inventory knows about, in any order.
    fn list_devices(&self) -> anyhow::Result<Vec<String>>;

    /// The vendor/platform signature for a device, if known.
    ///
    /// Consumed only by structured rendering to key the normalization
    /// lookup; dispatch never reads it.
    fn platform(&self, device: &str) -> Option<String>;
}

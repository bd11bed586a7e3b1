//! Transceiver (SFP) handle contract.

use std::fmt;

/// A pluggable transceiver module slot.
///
/// Generic SFP behaviour (EEPROM, presence, DOM) belongs to the base
/// platform; chassis overrides only need to identify and hand out handles.
pub trait SfpBase: fmt::Debug + Send + Sync {
    /// Returns the logical port name (e.g. `Ethernet0`).
    fn name(&self) -> &str;

    /// Returns the 0-based position of this module in the chassis list.
    fn position(&self) -> usize;
}

/// Minimal [`SfpBase`] built from platform port data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSfp {
    name: String,
    position: usize,
}

impl PortSfp {
    /// Creates a handle for the port at `position`.
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

impl SfpBase for PortSfp {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> usize {
        self.position
    }
}

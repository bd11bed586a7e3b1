//! Chassis contract and reboot-cause vocabulary.
//!
//! [`ChassisBase`] is the capability set every platform chassis exposes.
//! Vendor overrides wrap a base implementation and replace only the methods
//! whose hardware behaviour differs.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, Serializer};

use crate::sfp::SfpBase;
use crate::watchdog::WatchdogBase;

/// Reboot cause categories defined by the base chassis API.
///
/// The string forms are the values SONiC's `process-reboot-cause` stores,
/// so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RebootCauseKind {
    /// Power was lost or cycled.
    PowerLoss,
    /// CPU over-temperature shutdown.
    ThermalOverloadCpu,
    /// Switch ASIC over-temperature shutdown.
    ThermalOverloadAsic,
    /// Other over-temperature shutdown.
    ThermalOverloadOther,
    /// Fans could not keep up.
    InsufficientFanSpeed,
    /// A watchdog expired.
    Watchdog,
    /// Hardware reset not covered by another category.
    HardwareOther,
    /// Reset requested by BIOS.
    HardwareBios,
    /// Reset requested by the CPU complex.
    HardwareCpu,
    /// Front-panel button.
    HardwareButton,
    /// Reset asserted by the ASIC.
    HardwareResetFromAsic,
    /// Software initiated the reboot.
    NonHardware,
}

impl RebootCauseKind {
    /// Returns the canonical SONiC string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            RebootCauseKind::PowerLoss => "Power Loss",
            RebootCauseKind::ThermalOverloadCpu => "Thermal Overload: CPU",
            RebootCauseKind::ThermalOverloadAsic => "Thermal Overload: ASIC",
            RebootCauseKind::ThermalOverloadOther => "Thermal Overload: Other",
            RebootCauseKind::InsufficientFanSpeed => "Insufficient Fan Speed",
            RebootCauseKind::Watchdog => "Watchdog",
            RebootCauseKind::HardwareOther => "Hardware - Other",
            RebootCauseKind::HardwareBios => "BIOS",
            RebootCauseKind::HardwareCpu => "CPU",
            RebootCauseKind::HardwareButton => "Push button",
            RebootCauseKind::HardwareResetFromAsic => "Reset from ASIC",
            RebootCauseKind::NonHardware => "Non-Hardware",
        }
    }
}

impl Serialize for RebootCauseKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for RebootCauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category plus free-text description of the last reboot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebootCause {
    /// Category from the base vocabulary.
    pub kind: RebootCauseKind,
    /// Human-readable detail, for display only.
    pub description: String,
}

impl RebootCause {
    /// Creates a reboot cause.
    pub fn new(kind: RebootCauseKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    /// Returns the `(category, description)` pair.
    pub fn as_pair(&self) -> (&'static str, &str) {
        (self.kind.as_str(), &self.description)
    }
}

impl fmt::Display for RebootCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.description)
        }
    }
}

/// Base trait for platform chassis implementations.
///
/// # Example
///
/// ```ignore
/// use sonic_platform_common::{ChassisBase, RebootCause, RebootCauseKind};
///
/// #[async_trait]
/// impl ChassisBase for MyChassis {
///     fn name(&self) -> &str { "my-switch" }
///     // ...
///     async fn get_reboot_cause(&self) -> RebootCause {
///         RebootCause::new(RebootCauseKind::NonHardware, "")
///     }
/// }
/// ```
#[async_trait]
pub trait ChassisBase: Send + Sync {
    /// Returns the platform name.
    fn name(&self) -> &str;

    /// Returns the hardware model string.
    fn model(&self) -> &str;

    /// Returns the number of fans.
    fn num_fans(&self) -> usize;

    /// Returns the number of power supplies.
    fn num_psus(&self) -> usize;

    /// Returns the number of thermal sensors.
    fn num_thermals(&self) -> usize;

    /// Returns all transceiver handles in port order.
    fn sfps(&self) -> &[Arc<dyn SfpBase>];

    /// Returns the number of transceiver slots.
    fn num_sfps(&self) -> usize {
        self.sfps().len()
    }

    /// Returns the transceiver at 0-based `index`, if any.
    fn get_sfp(&self, index: usize) -> Option<Arc<dyn SfpBase>> {
        self.sfps().get(index).cloned()
    }

    /// Returns the cause of the previous reboot.
    async fn get_reboot_cause(&self) -> RebootCause;

    /// Returns the hardware watchdog, if the platform has one.
    fn get_watchdog(&self) -> Option<Arc<dyn WatchdogBase>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reboot_cause_kind_strings() {
        assert_eq!(RebootCauseKind::PowerLoss.as_str(), "Power Loss");
        assert_eq!(RebootCauseKind::Watchdog.as_str(), "Watchdog");
        assert_eq!(RebootCauseKind::HardwareOther.as_str(), "Hardware - Other");
        assert_eq!(RebootCauseKind::NonHardware.as_str(), "Non-Hardware");
        assert_eq!(
            RebootCauseKind::ThermalOverloadAsic.to_string(),
            "Thermal Overload: ASIC"
        );
    }

    #[test]
    fn test_reboot_cause_pair_and_display() {
        let cause = RebootCause::new(RebootCauseKind::Watchdog, "GPIO Watchdog Reset");
        assert_eq!(cause.as_pair(), ("Watchdog", "GPIO Watchdog Reset"));
        assert_eq!(cause.to_string(), "Watchdog (GPIO Watchdog Reset)");

        let bare = RebootCause::new(RebootCauseKind::NonHardware, "");
        assert_eq!(bare.to_string(), "Non-Hardware");
    }
}

//! Common platform contracts for SONiC PDDF chassis implementations.
//!
//! This crate holds what every platform override builds on:
//!
//! - [`ChassisBase`]: capability set a chassis exposes to platform daemons
//! - [`SfpBase`] / [`WatchdogBase`]: device handle contracts
//! - [`RebootCause`]: reboot-cause category vocabulary and result type
//! - [`i2c`]: pluggable single-byte bus reads ([`BusReader`])
//! - [`shell`]: command execution returning `(status, output)`
//! - [`error`]: error types for platform operations
//!
//! # Mapping to the Python platform API
//!
//! | Python | Rust |
//! |--------|------|
//! | `ChassisBase` class | [`ChassisBase`] trait |
//! | `REBOOT_CAUSE_*` constants | [`RebootCauseKind`] |
//! | `SfpBase` / `WatchdogBase` | [`SfpBase`] / [`WatchdogBase`] |
//! | `subprocess.check_output` | [`shell::getstatusoutput()`] |

pub mod chassis;
pub mod error;
pub mod i2c;
pub mod sfp;
pub mod shell;
pub mod watchdog;

// Re-export commonly used items at crate root
pub use chassis::{ChassisBase, RebootCause, RebootCauseKind};
pub use error::{PlatformError, PlatformResult};
pub use i2c::{BusReader, I2cGetReader};
pub use sfp::{PortSfp, SfpBase};
pub use watchdog::WatchdogBase;

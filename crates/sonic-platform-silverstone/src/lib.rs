//! # sonic-platform-silverstone - Celestica Silverstone platform support
//!
//! PDDF chassis overrides for the Silverstone switch.
//!
//! ## Responsibilities
//! - 1-based SFP lookup for `sfputil`
//! - Reboot-cause decoding from the system CPLD (bus 104, 0x0d, reg 0x06)
//! - Lazy binding of the CPLD hardware watchdog
//!
//! ## Delegated to the PDDF base
//! - Chassis identity and fan/PSU/thermal inventory
//! - SFP enumeration
//!
//! Hardware access is never fatal here: read and bind failures are logged
//! and degrade to a default reboot cause or an absent handle.

pub mod chassis;
pub mod config;
pub mod cpld_watchdog;
pub mod pddf;
pub mod reboot_cause;

pub use chassis::{cpld_watchdog_factory, Chassis, WatchdogFactory};
pub use config::{ConfigError, PlatformConfig, DEFAULT_CONFIG_PATH};
pub use cpld_watchdog::CpldWatchdog;
pub use pddf::PddfChassis;
pub use reboot_cause::{decode_reboot_cause, unknown_reboot_cause};

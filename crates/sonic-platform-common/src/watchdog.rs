//! Hardware watchdog contract.

use std::fmt;

use crate::error::PlatformResult;

/// A hardware watchdog timer.
///
/// Mirrors the SONiC `WatchdogBase` API. Times are in seconds; `-1` is the
/// "not armed" / "unknown" sentinel that callers of the Python API expect.
pub trait WatchdogBase: fmt::Debug + Send + Sync {
    /// Arms the watchdog with `seconds` timeout and returns the effective
    /// timeout, which may be rounded by the hardware.
    fn arm(&self, seconds: i32) -> PlatformResult<i32>;

    /// Disarms the watchdog.
    fn disarm(&self) -> PlatformResult<()>;

    /// Returns true if the watchdog is currently counting down.
    fn is_armed(&self) -> bool;

    /// Returns seconds left before the watchdog fires, or `-1` if disarmed.
    fn get_remaining_time(&self) -> i32;
}

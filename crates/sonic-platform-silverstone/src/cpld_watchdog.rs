//! CPLD-backed hardware watchdog.
//!
//! The CPLD watchdog is registered with the kernel watchdog core, so state
//! is read from the class device in sysfs and control goes through the
//! character device:
//!
//! - `state`, `timeout`, `timeleft` under `/sys/class/watchdog/watchdogN`
//! - `WDIOC_*` ioctls and magic close (`V`) on `/dev/watchdogN`
//!
//! Opening the character device starts the timer, so it is only opened by
//! [`WatchdogBase::arm`] and [`WatchdogBase::disarm`].

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use sonic_platform_common::{PlatformError, PlatformResult, WatchdogBase};

use crate::config::WatchdogConfig;

/// Magic-close character understood by watchdog drivers.
const MAGIC_CLOSE: &[u8] = b"V";

#[cfg(target_os = "linux")]
mod ioctl {
    use std::os::raw::c_int;

    pub const WDIOS_DISABLECARD: c_int = 0x0001;
    pub const WDIOS_ENABLECARD: c_int = 0x0004;

    nix::ioctl_read!(wdioc_setoptions, b'W', 4, c_int);
    nix::ioctl_read!(wdioc_keepalive, b'W', 5, c_int);
    nix::ioctl_readwrite!(wdioc_settimeout, b'W', 6, c_int);
}

/// Watchdog timer hosted in the Silverstone system CPLD.
#[derive(Debug)]
pub struct CpldWatchdog {
    sysfs_path: PathBuf,
    device_path: PathBuf,
    device: Mutex<Option<File>>,
}

impl CpldWatchdog {
    /// Binds to the default CPLD watchdog device.
    pub fn new() -> PlatformResult<Self> {
        Self::from_config(&WatchdogConfig::default())
    }

    /// Binds to the device described by `config`.
    pub fn from_config(config: &WatchdogConfig) -> PlatformResult<Self> {
        Self::with_paths(&config.sysfs_path, &config.device_path)
    }

    /// Binds to an explicit sysfs directory and device node.
    ///
    /// Fails with [`PlatformError::DeviceNotFound`] when the sysfs directory
    /// is absent, i.e. the CPLD watchdog driver is not loaded.
    pub fn with_paths(
        sysfs_path: impl Into<PathBuf>,
        device_path: impl Into<PathBuf>,
    ) -> PlatformResult<Self> {
        let sysfs_path = sysfs_path.into();
        if !sysfs_path.is_dir() {
            return Err(PlatformError::device_not_found(sysfs_path));
        }

        let watchdog = Self {
            sysfs_path,
            device_path: device_path.into(),
            device: Mutex::new(None),
        };
        let identity = watchdog.read_attr("identity");
        debug!(
            sysfs = %watchdog.sysfs_path.display(),
            identity = identity.as_deref().unwrap_or("unknown"),
            "Bound CPLD watchdog"
        );
        Ok(watchdog)
    }

    fn read_attr(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.sysfs_path.join(name))
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Stops the timer and magic-closes `file`.
    fn release(&self, mut file: File) -> PlatformResult<()> {
        self.stop_timer(&file);
        file.write_all(MAGIC_CLOSE)
            .map_err(|e| PlatformError::device_io(&self.device_path, e))
    }

    fn open_device(&self) -> PlatformResult<File> {
        OpenOptions::new()
            .write(true)
            .open(&self.device_path)
            .map_err(|e| PlatformError::device_io(&self.device_path, e))
    }

    #[cfg(target_os = "linux")]
    fn program_timer(&self, file: &File, seconds: i32) -> PlatformResult<i32> {
        use std::os::fd::AsRawFd;

        let fd = file.as_raw_fd();
        let io_err = |e: nix::errno::Errno| {
            PlatformError::device_io(&self.device_path, std::io::Error::from(e))
        };

        let mut timeout = seconds;
        let mut options = ioctl::WDIOS_ENABLECARD;
        let mut dummy = 0;
        // SAFETY: fd is a live watchdog descriptor owned by `file`, and each
        // pointer refers to a c_int that outlives the call.
        unsafe {
            ioctl::wdioc_settimeout(fd, &mut timeout).map_err(io_err)?;
            ioctl::wdioc_setoptions(fd, &mut options).map_err(io_err)?;
            ioctl::wdioc_keepalive(fd, &mut dummy).map_err(io_err)?;
        }
        Ok(timeout)
    }

    #[cfg(not(target_os = "linux"))]
    fn program_timer(&self, _file: &File, _seconds: i32) -> PlatformResult<i32> {
        Err(PlatformError::not_supported(
            "watchdog ioctls require Linux",
        ))
    }

    #[cfg(target_os = "linux")]
    fn stop_timer(&self, file: &File) {
        use std::os::fd::AsRawFd;

        let mut options = ioctl::WDIOS_DISABLECARD;
        // SAFETY: see program_timer.
        if let Err(e) = unsafe { ioctl::wdioc_setoptions(file.as_raw_fd(), &mut options) } {
            debug!(error = %e, "WDIOS_DISABLECARD rejected, relying on magic close");
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn stop_timer(&self, _file: &File) {}
}

impl WatchdogBase for CpldWatchdog {
    #[instrument(skip(self))]
    fn arm(&self, seconds: i32) -> PlatformResult<i32> {
        if seconds <= 0 {
            return Err(PlatformError::invalid_argument(
                "seconds",
                format!("timeout must be positive, got {}", seconds),
            ));
        }

        let mut device = self.device.lock();
        let file = match device.take() {
            Some(file) => file,
            None => self.open_device()?,
        };

        // The node is already counting once open; a failed arm must not
        // leave it running unfed.
        match self.program_timer(&file, seconds) {
            Ok(effective) => {
                *device = Some(file);
                info!(requested = seconds, effective = effective, "Watchdog armed");
                Ok(effective)
            }
            Err(e) => {
                if let Err(close_err) = self.release(file) {
                    warn!(error = %close_err, "Failed to close watchdog after arm error");
                }
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    fn disarm(&self) -> PlatformResult<()> {
        let mut device = self.device.lock();
        let file = match device.take() {
            Some(file) => file,
            None if !self.is_armed() => return Ok(()),
            None => self.open_device()?,
        };

        self.release(file)?;

        if self.is_armed() {
            warn!("Watchdog still active after magic close (nowayout?)");
        } else {
            info!("Watchdog disarmed");
        }
        Ok(())
    }

    fn is_armed(&self) -> bool {
        self.read_attr("state").as_deref() == Some("active")
    }

    fn get_remaining_time(&self) -> i32 {
        if !self.is_armed() {
            return -1;
        }
        self.read_attr("timeleft")
            .and_then(|s| s.parse().ok())
            .unwrap_or(-1)
    }
}

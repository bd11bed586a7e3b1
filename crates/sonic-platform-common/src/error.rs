//! Error types for platform operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. Chassis
//! overrides generally absorb these into an absent/default result; they
//! surface directly only from the lower-level helpers (shell, bus reader,
//! watchdog device).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors that can occur while talking to platform hardware.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// A hardware device node or sysfs directory is missing.
    #[error("Device not found: {}", path.display())]
    DeviceNotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// Reading or writing a device attribute failed.
    #[error("Device I/O failed on {}: {source}", path.display())]
    DeviceIo {
        /// The device path or attribute file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Caller supplied a value the hardware cannot accept.
    #[error("Invalid argument for {field}: {message}")]
    InvalidArgument {
        /// The argument name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Feature not available on this platform or build target.
    #[error("Not supported: {message}")]
    NotSupported {
        /// Error message.
        message: String,
    },
}

impl PlatformError {
    /// Creates a device-not-found error.
    pub fn device_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DeviceNotFound { path: path.into() }
    }

    /// Creates a device I/O error.
    pub fn device_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DeviceIo {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a not-supported error.
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlatformError::device_not_found("/sys/class/watchdog/watchdog0");
        assert_eq!(
            err.to_string(),
            "Device not found: /sys/class/watchdog/watchdog0"
        );
    }

    #[test]
    fn test_shell_command_failed() {
        let err = PlatformError::ShellCommandFailed {
            command: "i2cget -y -f 104 0x0d 0x06 b".to_string(),
            exit_code: 2,
            output: "Error: Read failed".to_string(),
        };
        assert!(err.to_string().contains("i2cget -y -f 104"));
        assert!(err.to_string().contains("exit code 2"));
    }

    #[test]
    fn test_invalid_argument() {
        let err = PlatformError::invalid_argument("seconds", "timeout must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid argument for seconds: timeout must be positive, got 0"
        );
    }
}

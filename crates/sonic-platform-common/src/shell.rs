//! Shell command execution for platform helpers.
//!
//! Platform code reaches some registers only through userspace tools such as
//! `i2cget`. This module runs those tools through `/bin/sh -c` and hands back
//! either a structured [`ExecResult`] or the `(status, output)` pair that
//! chassis overrides interpret.
//!
//! # Example
//!
//! ```ignore
//! use sonic_platform_common::shell;
//!
//! let (status, output) = shell::getstatusoutput("i2cget -y -f 104 0x0d 0x06 b").await?;
//! if status == 0 {
//!     println!("register: {}", output);
//! }
//! ```

use std::process::Stdio;
use tokio::process::Command;

use crate::error::{PlatformError, PlatformResult};

/// Path to the `i2cget` tool from i2c-tools.
pub const I2CGET_CMD: &str = "/usr/sbin/i2cget";

/// Result of a shell command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success).
    pub exit_code: i32,
    /// stdout and stderr interleaved in the order written.
    pub output: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes a shell command asynchronously.
///
/// The command runs through `/bin/sh -c` with stderr redirected onto
/// stdout before it starts, so diagnostics land in [`ExecResult::output`]
/// at the point they were printed.
///
/// # Returns
///
/// * `Ok(ExecResult)` - The command ran to completion (any exit code)
/// * `Err(PlatformError)` - If the command could not be spawned
pub async fn exec(cmd: &str) -> PlatformResult<ExecResult> {
    tracing::debug!(command = %cmd, "Executing shell command");

    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg(format!("exec 2>&1\n{}", cmd))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| PlatformError::ShellExec {
            command: cmd.to_string(),
            source: e,
        })?;

    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        output: String::from_utf8_lossy(&output.stdout).into_owned(),
    };

    if result.success() {
        tracing::trace!(command = %cmd, "Command succeeded");
    } else {
        tracing::warn!(
            command = %cmd,
            exit_code = result.exit_code,
            output = %result.output.trim_end(),
            "Command failed"
        );
    }

    Ok(result)
}

/// Runs a command and returns `(status, output)`.
///
/// Every newline is removed from the output, so a single-value tool like
/// `i2cget` yields exactly its value. A nonzero status still carries
/// whatever the command printed. Only a spawn failure is reported as `Err`.
pub async fn getstatusoutput(cmd: &str) -> PlatformResult<(i32, String)> {
    let result = exec(cmd).await?;
    Ok((result.exit_code, strip_newlines(&result.output)))
}

fn strip_newlines(s: &str) -> String {
    s.chars().filter(|&c| c != '\n').collect()
}

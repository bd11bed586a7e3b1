//! Single-byte register reads over I2C.
//!
//! [`BusReader`] is the seam between chassis logic and the hardware. The
//! production [`I2cGetReader`] shells out to `i2cget`; tests plug in an
//! in-memory reader instead.

use async_trait::async_trait;
use tracing::instrument;

use crate::error::{PlatformError, PlatformResult};
use crate::shell;

/// Reads one byte from a device register on an I2C bus.
#[async_trait]
pub trait BusReader: Send + Sync {
    /// Returns the register value in `0x%02x` text form (e.g. `"0x11"`).
    async fn read_byte(&self, bus: u8, address: u8, register: u8) -> PlatformResult<String>;
}

/// [`BusReader`] backed by the `i2cget` command-line tool.
#[derive(Debug, Clone)]
pub struct I2cGetReader {
    program: String,
}

impl I2cGetReader {
    /// Creates a reader that invokes the system `i2cget`.
    pub fn new() -> Self {
        Self::with_program(shell::I2CGET_CMD)
    }

    /// Creates a reader that invokes `program` instead of the system tool.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the command line for a forced byte read.
    pub fn command(&self, bus: u8, address: u8, register: u8) -> String {
        format!(
            "{} -y -f {} 0x{:02x} 0x{:02x} b",
            self.program, bus, address, register
        )
    }
}

impl Default for I2cGetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusReader for I2cGetReader {
    #[instrument(skip(self))]
    async fn read_byte(&self, bus: u8, address: u8, register: u8) -> PlatformResult<String> {
        let cmd = self.command(bus, address, register);
        let (status, output) = shell::getstatusoutput(&cmd).await?;
        if status != 0 {
            return Err(PlatformError::ShellCommandFailed {
                command: cmd,
                exit_code: status,
                output,
            });
        }
        Ok(output)
    }
}

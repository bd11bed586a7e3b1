//! Platform configuration for the Silverstone chassis.
//!
//! Loads and validates chassis settings from a TOML file.
//! Default location: /usr/share/sonic/platform/silverstone-chassis.toml
//!
//! Every field has a default matching the shipping hardware, so a missing
//! file or a partial file is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use sonic_platform_common::PlatformError;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/usr/share/sonic/platform/silverstone-chassis.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        /// The config file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error(transparent)]
    Invalid(#[from] PlatformError),
}

/// Chassis identity and inventory counts passed to the base chassis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChassisConfig {
    /// Platform name
    #[serde(default = "default_chassis_name")]
    pub name: String,

    /// Hardware model
    #[serde(default = "default_chassis_model")]
    pub model: String,

    /// Number of fans
    #[serde(default = "default_num_fans")]
    pub num_fans: usize,

    /// Number of power supplies
    #[serde(default = "default_num_psus")]
    pub num_psus: usize,

    /// Number of thermal sensors
    #[serde(default = "default_num_thermals")]
    pub num_thermals: usize,
}

/// Front-panel transceiver layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SfpConfig {
    /// Number of transceiver slots
    #[serde(default = "default_sfp_count")]
    pub count: usize,

    /// Logical port name prefix
    #[serde(default = "default_port_prefix")]
    pub port_prefix: String,

    /// Lane stride between consecutive logical port numbers
    #[serde(default = "default_port_stride")]
    pub port_stride: usize,
}

/// Location of the CPLD reboot-cause register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebootCauseConfig {
    /// I2C bus number
    #[serde(default = "default_reboot_cause_bus")]
    pub bus: u8,

    /// CPLD device address
    #[serde(default = "default_reboot_cause_address")]
    pub address: u8,

    /// Reboot-cause register offset
    #[serde(default = "default_reboot_cause_register")]
    pub register: u8,
}

/// CPLD watchdog device paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchdogConfig {
    /// sysfs directory of the watchdog class device
    #[serde(default = "default_watchdog_sysfs_path")]
    pub sysfs_path: PathBuf,

    /// Character device used to arm/disarm
    #[serde(default = "default_watchdog_device_path")]
    pub device_path: PathBuf,
}

/// Complete platform configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Chassis identity
    #[serde(default)]
    pub chassis: ChassisConfig,

    /// Transceiver layout
    #[serde(default)]
    pub sfp: SfpConfig,

    /// Reboot-cause register
    #[serde(default)]
    pub reboot_cause: RebootCauseConfig,

    /// Watchdog device
    #[serde(default)]
    pub watchdog: WatchdogConfig,
}

// Default functions
fn default_chassis_name() -> String {
    "x86_64-cel_silverstone-r0".to_string()
}

fn default_chassis_model() -> String {
    "Silverstone".to_string()
}

fn default_num_fans() -> usize {
    7
}

fn default_num_psus() -> usize {
    2
}

fn default_num_thermals() -> usize {
    11
}

fn default_sfp_count() -> usize {
    34
}

fn default_port_prefix() -> String {
    "Ethernet".to_string()
}

fn default_port_stride() -> usize {
    8
}

fn default_reboot_cause_bus() -> u8 {
    104
}

fn default_reboot_cause_address() -> u8 {
    0x0d
}

fn default_reboot_cause_register() -> u8 {
    0x06
}

fn default_watchdog_sysfs_path() -> PathBuf {
    PathBuf::from("/sys/class/watchdog/watchdog0")
}

fn default_watchdog_device_path() -> PathBuf {
    PathBuf::from("/dev/watchdog0")
}

// Default implementations
impl Default for ChassisConfig {
    fn default() -> Self {
        Self {
            name: default_chassis_name(),
            model: default_chassis_model(),
            num_fans: default_num_fans(),
            num_psus: default_num_psus(),
            num_thermals: default_num_thermals(),
        }
    }
}

impl Default for SfpConfig {
    fn default() -> Self {
        Self {
            count: default_sfp_count(),
            port_prefix: default_port_prefix(),
            port_stride: default_port_stride(),
        }
    }
}

impl Default for RebootCauseConfig {
    fn default() -> Self {
        Self {
            bus: default_reboot_cause_bus(),
            address: default_reboot_cause_address(),
            register: default_reboot_cause_register(),
        }
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            sysfs_path: default_watchdog_sysfs_path(),
            device_path: default_watchdog_device_path(),
        }
    }
}

impl SfpConfig {
    /// Returns the logical port name for the slot at 0-based `position`.
    pub fn port_name(&self, position: usize) -> String {
        format!("{}{}", self.port_prefix, position * self.port_stride)
    }
}

impl PlatformConfig {
    /// Parses configuration from TOML text and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PlatformConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.chassis.name.trim().is_empty() {
            return Err(PlatformError::invalid_config(
                "chassis.name",
                "must not be empty",
            ));
        }

        if self.sfp.port_stride == 0 {
            return Err(PlatformError::invalid_config(
                "sfp.port_stride",
                "must be at least 1",
            ));
        }

        // 7-bit addresses outside the reserved ranges
        if !(0x03..=0x77).contains(&self.reboot_cause.address) {
            return Err(PlatformError::invalid_config(
                "reboot_cause.address",
                format!(
                    "0x{:02x} is not a valid 7-bit I2C device address",
                    self.reboot_cause.address
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_hardware() {
        let config = PlatformConfig::default();
        assert_eq!(config.reboot_cause.bus, 104);
        assert_eq!(config.reboot_cause.address, 0x0d);
        assert_eq!(config.reboot_cause.register, 0x06);
        assert_eq!(config.sfp.count, 34);
        assert_eq!(
            config.watchdog.sysfs_path,
            PathBuf::from("/sys/class/watchdog/watchdog0")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PlatformConfig::from_toml("").unwrap();
        assert_eq!(config, PlatformConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = PlatformConfig::from_toml(
            r#"
            [sfp]
            count = 4

            [reboot_cause]
            bus = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.sfp.count, 4);
        assert_eq!(config.sfp.port_prefix, "Ethernet");
        assert_eq!(config.reboot_cause.bus, 2);
        assert_eq!(config.reboot_cause.address, 0x0d);
    }

    #[test]
    fn test_port_name() {
        let sfp = SfpConfig::default();
        assert_eq!(sfp.port_name(0), "Ethernet0");
        assert_eq!(sfp.port_name(3), "Ethernet24");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PlatformConfig::default();
        config.sfp.port_stride = 0;
        assert!(config.validate().is_err());

        let mut config = PlatformConfig::default();
        config.reboot_cause.address = 0x78;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("reboot_cause.address"));

        let mut config = PlatformConfig::default();
        config.chassis.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = PlatformConfig::from_toml("[sfp]\ncount = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chassis]\nmodel = \"Silverstone-X\"").unwrap();

        let config = PlatformConfig::load(file.path()).unwrap();
        assert_eq!(config.chassis.model, "Silverstone-X");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlatformConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, PlatformConfig::default());
    }
}

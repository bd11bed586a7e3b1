//! Integration tests for the Silverstone chassis
//!
//! Drives the chassis through its public API with hardware replaced by:
//! - stub `i2cget` scripts in a temp dir
//! - a fake watchdog class directory in sysfs layout

use sonic_platform_common::{ChassisBase, I2cGetReader, RebootCauseKind};
use sonic_platform_silverstone::{Chassis, PlatformConfig};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Writes a stand-in for `i2cget` and returns a command line that runs it.
fn stub_i2cget(dir: &Path, body: &str) -> String {
    let path = dir.join("i2cget.sh");
    fs::write(&path, format!("{}\n", body)).unwrap();
    format!("/bin/sh {}", path.display())
}

fn chassis_with_i2cget(dir: &Path, body: &str) -> Chassis {
    let program = stub_i2cget(dir, body);
    Chassis::from_config(&PlatformConfig::default())
        .with_bus_reader(Arc::new(I2cGetReader::with_program(program)))
}

#[tokio::test]
async fn test_reboot_cause_end_to_end_success() {
    let dir = TempDir::new().unwrap();
    let chassis = chassis_with_i2cget(dir.path(), "echo 0x33");

    let cause = chassis.get_reboot_cause().await;
    assert_eq!(cause.kind, RebootCauseKind::NonHardware);
    assert_eq!(cause.description, "Soft-Set Cold Reset");
}

#[tokio::test]
async fn test_reboot_cause_end_to_end_command_failure() {
    let dir = TempDir::new().unwrap();
    let chassis = chassis_with_i2cget(dir.path(), "echo 'Error: Read failed' >&2; exit 1");

    let cause = chassis.get_reboot_cause().await;
    assert_eq!(cause.kind, RebootCauseKind::HardwareOther);
    assert_eq!(cause.description, "Hardware reason");
}

#[tokio::test]
async fn test_reboot_cause_receives_default_register_args() {
    let dir = TempDir::new().unwrap();
    // Only answer when called with the CPLD reboot-cause register.
    let chassis = chassis_with_i2cget(
        dir.path(),
        r#"[ "$*" = "-y -f 104 0x0d 0x06 b" ] && echo 0x66 || exit 2"#,
    );

    let cause = chassis.get_reboot_cause().await;
    assert_eq!(cause.as_pair(), ("Watchdog", "GPIO Watchdog Reset"));
}

#[tokio::test]
async fn test_missing_i2cget_falls_back() {
    let dir = TempDir::new().unwrap();
    let chassis = Chassis::from_config(&PlatformConfig::default()).with_bus_reader(Arc::new(
        I2cGetReader::with_program(dir.path().join("absent").to_string_lossy()),
    ));

    let cause = chassis.get_reboot_cause().await;
    assert_eq!(cause.as_pair(), ("Hardware - Other", "Hardware reason"));
}

#[test]
fn test_sfp_lookup_from_config() {
    let config = PlatformConfig::from_toml("[sfp]\ncount = 32\n").unwrap();
    let chassis = Chassis::from_config(&config);

    assert_eq!(chassis.num_sfps(), 32);
    assert_eq!(chassis.get_sfp(1).unwrap().name(), "Ethernet0");
    assert_eq!(chassis.get_sfp(32).unwrap().name(), "Ethernet248");
    assert!(chassis.get_sfp(0).is_none());
    assert!(chassis.get_sfp(33).is_none());
}

#[test]
fn test_watchdog_bound_from_config() {
    let dir = TempDir::new().unwrap();
    let sysfs = dir.path().join("watchdog0");
    fs::create_dir(&sysfs).unwrap();
    fs::write(sysfs.join("state"), "active\n").unwrap();
    fs::write(sysfs.join("timeleft"), "97\n").unwrap();

    let mut config = PlatformConfig::default();
    config.watchdog.sysfs_path = sysfs;
    config.watchdog.device_path = dir.path().join("dev-watchdog0");
    let chassis = Chassis::from_config(&config);

    let first = chassis.get_watchdog().unwrap();
    assert!(first.is_armed());
    assert_eq!(first.get_remaining_time(), 97);

    let second = chassis.get_watchdog().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_watchdog_absent_device() {
    let dir = TempDir::new().unwrap();
    let mut config = PlatformConfig::default();
    config.watchdog.sysfs_path = dir.path().join("missing");
    let chassis = Chassis::from_config(&config);

    assert!(chassis.get_watchdog().is_none());
    assert!(chassis.get_watchdog().is_none());
}

//! Silverstone chassis - platform overrides on top of the PDDF base.
//!
//! Three behaviours differ from the generic PDDF chassis:
//!
//! 1. `get_sfp` takes the 1-based port index used by `sfputil`
//! 2. `get_reboot_cause` decodes the CPLD reboot-cause register
//! 3. `get_watchdog` lazily binds the CPLD watchdog
//!
//! Everything else is delegated to the wrapped base chassis.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use sonic_platform_common::{
    BusReader, ChassisBase, I2cGetReader, PlatformResult, RebootCause, SfpBase, WatchdogBase,
};

use crate::config::{PlatformConfig, RebootCauseConfig, WatchdogConfig};
use crate::cpld_watchdog::CpldWatchdog;
use crate::pddf::PddfChassis;
use crate::reboot_cause::decode_reboot_cause;

/// Constructor for the platform watchdog, invoked on first use.
pub type WatchdogFactory = Box<dyn Fn() -> PlatformResult<Arc<dyn WatchdogBase>> + Send + Sync>;

/// Builds a factory that binds the CPLD watchdog at the configured paths.
pub fn cpld_watchdog_factory(config: WatchdogConfig) -> WatchdogFactory {
    Box::new(move || {
        CpldWatchdog::from_config(&config).map(|wdt| Arc::new(wdt) as Arc<dyn WatchdogBase>)
    })
}

/// Silverstone platform chassis.
pub struct Chassis<B: ChassisBase = PddfChassis> {
    base: B,
    bus: Arc<dyn BusReader>,
    reboot_cause_register: RebootCauseConfig,
    watchdog_factory: WatchdogFactory,
    watchdog: OnceCell<Arc<dyn WatchdogBase>>,
}

impl Chassis<PddfChassis> {
    /// Builds the chassis, its PDDF base and hardware access from config.
    pub fn from_config(config: &PlatformConfig) -> Self {
        Self::new(PddfChassis::from_config(config))
            .with_reboot_cause_register(config.reboot_cause.clone())
            .with_watchdog_factory(cpld_watchdog_factory(config.watchdog.clone()))
    }
}

impl<B: ChassisBase> Chassis<B> {
    /// Wraps `base` with default hardware access.
    pub fn new(base: B) -> Self {
        Self {
            base,
            bus: Arc::new(I2cGetReader::new()),
            reboot_cause_register: RebootCauseConfig::default(),
            watchdog_factory: cpld_watchdog_factory(WatchdogConfig::default()),
            watchdog: OnceCell::new(),
        }
    }

    /// Replaces the bus reader used for CPLD register reads.
    pub fn with_bus_reader(mut self, bus: Arc<dyn BusReader>) -> Self {
        self.bus = bus;
        self
    }

    /// Sets the location of the reboot-cause register.
    pub fn with_reboot_cause_register(mut self, register: RebootCauseConfig) -> Self {
        self.reboot_cause_register = register;
        self
    }

    /// Replaces the watchdog constructor.
    pub fn with_watchdog_factory(mut self, factory: WatchdogFactory) -> Self {
        self.watchdog_factory = factory;
        self
    }

    /// Reads the raw reboot-cause register text.
    ///
    /// A failed read yields an empty string, which decodes to the
    /// hardware-other fallback.
    async fn read_reboot_cause_register(&self) -> String {
        let reg = &self.reboot_cause_register;
        match self.bus.read_byte(reg.bus, reg.address, reg.register).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    bus = reg.bus,
                    address = reg.address,
                    register = reg.register,
                    error = %e,
                    "Failed to read reboot-cause register"
                );
                String::new()
            }
        }
    }
}

#[async_trait]
impl<B: ChassisBase> ChassisBase for Chassis<B> {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn model(&self) -> &str {
        self.base.model()
    }

    fn num_fans(&self) -> usize {
        self.base.num_fans()
    }

    fn num_psus(&self) -> usize {
        self.base.num_psus()
    }

    fn num_thermals(&self) -> usize {
        self.base.num_thermals()
    }

    fn sfps(&self) -> &[Arc<dyn SfpBase>] {
        self.base.sfps()
    }

    /// Returns the SFP at 1-based `index`.
    ///
    /// Index 0 and indices past the last port are logged and yield `None`.
    fn get_sfp(&self, index: usize) -> Option<Arc<dyn SfpBase>> {
        let sfps = self.base.sfps();
        let sfp = index
            .checked_sub(1)
            .and_then(|position| sfps.get(position))
            .cloned();
        if sfp.is_none() {
            warn!(
                "override: SFP index {} out of range (1-{})",
                index,
                sfps.len()
            );
        }
        sfp
    }

    #[instrument(skip(self))]
    async fn get_reboot_cause(&self) -> RebootCause {
        let raw = self.read_reboot_cause_register().await;
        let cause = decode_reboot_cause(&raw);
        debug!(raw = %raw, cause = %cause, "Decoded reboot cause");
        cause
    }

    /// Returns the CPLD watchdog, binding it on first call.
    ///
    /// A failed bind is logged and retried on the next call.
    fn get_watchdog(&self) -> Option<Arc<dyn WatchdogBase>> {
        match self.watchdog.get_or_try_init(|| (self.watchdog_factory)()) {
            Ok(watchdog) => Some(Arc::clone(watchdog)),
            Err(e) => {
                error!(error = %e, "Fail to load watchdog");
                None
            }
        }
    }
}

//! Generic PDDF base chassis.
//!
//! Provides the inventory every PDDF platform shares (identity, component
//! counts, the SFP list). The Silverstone [`Chassis`](crate::Chassis) wraps
//! it and overrides only what the hardware does differently.

use async_trait::async_trait;
use std::sync::Arc;

use sonic_platform_common::{ChassisBase, PortSfp, RebootCause, RebootCauseKind, SfpBase};

use crate::config::PlatformConfig;

/// Base chassis populated from platform data.
#[derive(Debug, Clone)]
pub struct PddfChassis {
    name: String,
    model: String,
    num_fans: usize,
    num_psus: usize,
    num_thermals: usize,
    sfps: Vec<Arc<dyn SfpBase>>,
}

impl PddfChassis {
    /// Builds the base chassis from platform configuration.
    pub fn from_config(config: &PlatformConfig) -> Self {
        let sfps = (0..config.sfp.count)
            .map(|position| {
                Arc::new(PortSfp::new(config.sfp.port_name(position), position)) as Arc<dyn SfpBase>
            })
            .collect();

        Self {
            name: config.chassis.name.clone(),
            model: config.chassis.model.clone(),
            num_fans: config.chassis.num_fans,
            num_psus: config.chassis.num_psus,
            num_thermals: config.chassis.num_thermals,
            sfps,
        }
    }

    /// Replaces the SFP list.
    pub fn with_sfps(mut self, sfps: Vec<Arc<dyn SfpBase>>) -> Self {
        self.sfps = sfps;
        self
    }
}

impl Default for PddfChassis {
    fn default() -> Self {
        Self::from_config(&PlatformConfig::default())
    }
}

#[async_trait]
impl ChassisBase for PddfChassis {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn num_fans(&self) -> usize {
        self.num_fans
    }

    fn num_psus(&self) -> usize {
        self.num_psus
    }

    fn num_thermals(&self) -> usize {
        self.num_thermals
    }

    fn sfps(&self) -> &[Arc<dyn SfpBase>] {
        &self.sfps
    }

    /// Generic PDDF has no hardware reboot-cause source; the software
    /// reboot-cause record takes over.
    async fn get_reboot_cause(&self) -> RebootCause {
        RebootCause::new(RebootCauseKind::NonHardware, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let base = PddfChassis::default();
        assert_eq!(base.name(), "x86_64-cel_silverstone-r0");
        assert_eq!(base.num_sfps(), 34);
        assert_eq!(base.num_psus(), 2);

        let first = base.get_sfp(0).unwrap();
        assert_eq!(first.name(), "Ethernet0");
        let last = base.get_sfp(33).unwrap();
        assert_eq!(last.name(), "Ethernet264");
        assert_eq!(last.position(), 33);
        assert!(base.get_sfp(34).is_none());
    }

    #[tokio::test]
    async fn test_base_reboot_cause_is_non_hardware() {
        let cause = PddfChassis::default().get_reboot_cause().await;
        assert_eq!(cause.kind, RebootCauseKind::NonHardware);
        assert!(cause.description.is_empty());
    }
}

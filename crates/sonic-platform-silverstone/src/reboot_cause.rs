//! CPLD reboot-cause register decoding.
//!
//! The system CPLD latches a code describing the last reset. Codes are
//! matched on their exact `0x%02x` text as returned by the bus read.

use sonic_platform_common::{RebootCause, RebootCauseKind};

/// Description reported for any code not in [`REBOOT_CAUSE_TABLE`].
pub const UNKNOWN_CAUSE_DESCRIPTION: &str = "Hardware reason";

/// Known register codes and their meaning.
pub const REBOOT_CAUSE_TABLE: [(&str, RebootCauseKind, &str); 8] = [
    ("0x11", RebootCauseKind::PowerLoss, "Power Off Reset"),
    ("0x22", RebootCauseKind::NonHardware, "Soft-Set Warm Reset"),
    ("0x33", RebootCauseKind::NonHardware, "Soft-Set Cold Reset"),
    ("0x44", RebootCauseKind::NonHardware, "CPU Warm Reset"),
    ("0x55", RebootCauseKind::HardwareOther, "CPU Cold Reset"),
    ("0x66", RebootCauseKind::Watchdog, "GPIO Watchdog Reset"),
    ("0x77", RebootCauseKind::PowerLoss, "Power Cycle Reset"),
    ("0x88", RebootCauseKind::Watchdog, "Hardware Watchdog Reset"),
];

/// Decodes raw register text into a reboot cause.
///
/// Anything outside the table, including the empty string a failed read
/// leaves behind, decodes to hardware-other / "Hardware reason".
pub fn decode_reboot_cause(raw: &str) -> RebootCause {
    REBOOT_CAUSE_TABLE
        .iter()
        .find(|(code, _, _)| *code == raw)
        .map(|(_, kind, description)| RebootCause::new(*kind, *description))
        .unwrap_or_else(unknown_reboot_cause)
}

/// The fallback cause for unrecognized or unreadable codes.
pub fn unknown_reboot_cause() -> RebootCause {
    RebootCause::new(RebootCauseKind::HardwareOther, UNKNOWN_CAUSE_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_every_known_code() {
        let expected = [
            ("0x11", "Power Loss", "Power Off Reset"),
            ("0x22", "Non-Hardware", "Soft-Set Warm Reset"),
            ("0x33", "Non-Hardware", "Soft-Set Cold Reset"),
            ("0x44", "Non-Hardware", "CPU Warm Reset"),
            ("0x55", "Hardware - Other", "CPU Cold Reset"),
            ("0x66", "Watchdog", "GPIO Watchdog Reset"),
            ("0x77", "Power Loss", "Power Cycle Reset"),
            ("0x88", "Watchdog", "Hardware Watchdog Reset"),
        ];
        for (raw, kind, description) in expected {
            let cause = decode_reboot_cause(raw);
            assert_eq!(cause.as_pair(), (kind, description), "code {raw}");
        }
    }

    #[test]
    fn test_decode_unknown_codes() {
        for raw in ["", "0x00", "0x99", "0xff", "0x1", "11", "0X11", " 0x11", "Error: Read failed"] {
            assert_eq!(decode_reboot_cause(raw), unknown_reboot_cause(), "code {raw:?}");
        }
    }

    #[test]
    fn test_unknown_cause_shape() {
        let cause = unknown_reboot_cause();
        assert_eq!(cause.kind, RebootCauseKind::HardwareOther);
        assert_eq!(cause.description, "Hardware reason");
    }
}

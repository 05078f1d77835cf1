//! Configuration
//!
//! Settings injected at construction. No file loading happens here; an
//! embedding application deserializes these from wherever it keeps its own
//! configuration.

use crate::enums::pairing_kinds;
use serde::{Deserialize, Serialize};

/// Pairing ceremony to request from the OS.
///
/// DisplayPin is the only ceremony the original integration verified against
/// real devices, so it is the default rather than a negotiation across all
/// supported kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PairingCeremony {
    ConfirmOnly,
    DisplayPin,
    ProvidePin,
    ConfirmPinMatch,
}

impl PairingCeremony {
    /// The `DevicePairingKinds` bit for this ceremony.
    pub fn kinds_bits(self) -> u32 {
        match self {
            Self::ConfirmOnly => pairing_kinds::CONFIRM_ONLY,
            Self::DisplayPin => pairing_kinds::DISPLAY_PIN,
            Self::ProvidePin => pairing_kinds::PROVIDE_PIN,
            Self::ConfirmPinMatch => pairing_kinds::CONFIRM_PIN_MATCH,
        }
    }
}

impl Default for PairingCeremony {
    fn default() -> Self {
        Self::DisplayPin
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairingConfig {
    #[serde(default)]
    pub ceremony: PairingCeremony,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            console_logging_enabled: default_true(),
            file_logging_enabled: default_false(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "windows_bluetooth".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BluetoothConfig {
    #[serde(default)]
    pub pairing: PairingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceremony_is_display_pin() {
        let config = BluetoothConfig::default();
        assert_eq!(config.pairing.ceremony, PairingCeremony::DisplayPin);
        assert_eq!(config.pairing.ceremony.kinds_bits(), 0x2);
    }

    #[test]
    fn test_deserializes_with_all_defaults() {
        let config: BluetoothConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.log.level, "info");
        assert!(!config.log.file_logging_enabled);
    }

    #[test]
    fn test_ceremony_round_trips_through_json() {
        let json = serde_json::to_string(&PairingCeremony::ConfirmPinMatch).unwrap();
        assert_eq!(json, "\"confirmPinMatch\"");
        let back: PairingCeremony = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PairingCeremony::ConfirmPinMatch);
    }
}

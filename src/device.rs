//! Device Records
//!
//! Normalizes the heterogeneous OS device objects into one canonical,
//! immutable snapshot. Records are built fresh on every query and never
//! cached; they represent a point-in-time observation.

use crate::address::BluetoothAddress;
use crate::bridge::bridge;
use crate::enums;
use crate::error::Result;
use crate::host::{HostBackend, RawDevice, RawDeviceInfo};
use serde::{Deserialize, Serialize};

/// Class-of-device triple from the OS class value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceClass {
    pub major: u32,
    pub minor: u32,
    pub raw: u32,
}

/// Canonical snapshot of a Bluetooth device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub name: String,
    pub paired: bool,
    pub can_pair: bool,
    /// Canonical lowercase colon-separated address.
    pub address: String,
    pub class: DeviceClass,
    /// Derived from the connection-status enumeration.
    pub connected: bool,
    /// Symbolic pairing protection level, `None` when unrecognized.
    pub protection: Option<String>,
}

/// Input to record construction: either an enumeration entry whose device
/// still needs resolving, or an already resolved device.
#[derive(Debug, Clone)]
pub enum DeviceSource {
    ByInfo(RawDeviceInfo),
    ByHandle(RawDevice),
}

impl DeviceRecord {
    /// Build a record from a source, resolving the full device through the
    /// host when only the enumeration entry is in hand. `ByInfo` suspends
    /// once for that resolution; `ByHandle` does not suspend.
    pub async fn resolve(host: &dyn HostBackend, source: DeviceSource) -> Result<DeviceRecord> {
        let raw = match source {
            DeviceSource::ByInfo(info) => {
                bridge(|done| host.device_from_id(&info.id, done)).await?
            }
            DeviceSource::ByHandle(raw) => raw,
        };
        Self::build(&raw)
    }

    /// Pure field combination from a resolved device.
    pub fn build(raw: &RawDevice) -> Result<DeviceRecord> {
        let address = BluetoothAddress::try_from(raw.address)?;
        let (major, minor, class_raw) = raw.class;
        Ok(DeviceRecord {
            name: raw.info.name.clone(),
            paired: raw.info.is_paired,
            can_pair: raw.info.can_pair,
            address: address.to_string(),
            class: DeviceClass {
                major,
                minor,
                raw: class_raw,
            },
            connected: enums::name_of(raw.connection_status, enums::CONNECTION_STATUS)
                == Some("connected"),
            protection: enums::name_of(raw.info.protection_level, enums::PROTECTION_LEVEL)
                .map(str::to_string),
        })
    }
}

//! Pairing Engine
//!
//! Drives the pair/unpair handshakes to a terminal status and reports the
//! resulting device state. Only terminal statuses exist at this layer: each
//! call either ends in a success status and a fresh [`DeviceRecord`], or in
//! an error naming the status the OS reported. Nothing is retried here;
//! retry policy belongs to the caller.

use crate::address::BluetoothAddress;
use crate::bridge::bridge;
use crate::config::PairingConfig;
use crate::device::{DeviceRecord, DeviceSource};
use crate::enums::{self, EnumTable};
use crate::error::{Error, Result};
use crate::host::{HostBackend, RawDevice};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Terminal result of a pairing handshake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingOutcome {
    /// Symbolic result status: "paired" or "alreadyPaired".
    pub status: String,
    /// Device state observed after the handshake.
    pub device: DeviceRecord,
}

/// Terminal result of an unpairing handshake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpairingOutcome {
    /// Symbolic result status: "unpaired" or "alreadyUnpaired".
    pub status: String,
    pub device: DeviceRecord,
}

pub struct PairingEngine {
    host: Arc<dyn HostBackend>,
    config: PairingConfig,
}

impl PairingEngine {
    pub fn new(host: Arc<dyn HostBackend>, config: PairingConfig) -> Self {
        Self { host, config }
    }

    /// Resolve a device by address and snapshot it.
    pub async fn from_address(&self, address: BluetoothAddress) -> Result<DeviceRecord> {
        let raw = self.resolve(address).await?;
        DeviceRecord::resolve(self.host.as_ref(), DeviceSource::ByHandle(raw)).await
    }

    /// Pair with the device at `address`.
    ///
    /// The ceremony kind comes from [`PairingConfig`] and the protection
    /// level is the device's current one; the host auto-accepts the one-shot
    /// pairing prompt. On "paired" or "alreadyPaired" the device is
    /// re-resolved so the returned record reflects the post-handshake state;
    /// any other status is a terminal failure named in the error.
    pub async fn pair(&self, address: BluetoothAddress) -> Result<PairingOutcome> {
        let raw = self.resolve(address).await?;
        let kinds = self.config.ceremony.kinds_bits();
        info!("pairing with {} (ceremony bits {kinds:#x})", raw.info.id);
        let status = bridge(|done| {
            self.host
                .pair_device(&raw.info.id, kinds, raw.info.protection_level, done)
        })
        .await?;
        let status = status_name(status, enums::PAIRING_STATUS);
        match status.as_str() {
            "paired" | "alreadyPaired" => {
                let device = self.snapshot(address).await?;
                Ok(PairingOutcome { status, device })
            }
            _ => Err(Error::PairingFailed { status }),
        }
    }

    /// Unpair the device at `address`.
    pub async fn unpair(&self, address: BluetoothAddress) -> Result<UnpairingOutcome> {
        let raw = self.resolve(address).await?;
        info!("unpairing {}", raw.info.id);
        let status = bridge(|done| self.host.unpair_device(&raw.info.id, done)).await?;
        let status = status_name(status, enums::UNPAIRING_STATUS);
        match status.as_str() {
            "unpaired" | "alreadyUnpaired" => {
                let device = self.snapshot(address).await?;
                Ok(UnpairingOutcome { status, device })
            }
            _ => Err(Error::UnpairingFailed { status }),
        }
    }

    async fn resolve(&self, address: BluetoothAddress) -> Result<RawDevice> {
        bridge(|done| self.host.device_from_address(address.as_u64(), done)).await
    }

    /// Fresh post-operation record for the device at `address`.
    async fn snapshot(&self, address: BluetoothAddress) -> Result<DeviceRecord> {
        let raw = self.resolve(address).await?;
        DeviceRecord::resolve(self.host.as_ref(), DeviceSource::ByHandle(raw)).await
    }
}

/// Symbolic name for a result status, falling back to the raw value for
/// anything the table does not declare. Unknown statuses still read as
/// failures, they just surface numerically.
fn status_name(status: i32, table: EnumTable) -> String {
    match enums::name_of(status, table) {
        Some(name) => name.to_string(),
        None => status.to_string(),
    }
}

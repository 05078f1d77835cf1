//! Radio Controller
//!
//! Queries Bluetooth support and power state across the host's radios, and
//! powers Bluetooth radios on. Enumeration results arrive as a cursor; each
//! operation suspends once for the enumeration, then walks the cursor
//! synchronously.

use crate::bridge::bridge;
use crate::enums::radio::{ACCESS_ALLOWED, KIND_BLUETOOTH, STATE_ON};
use crate::error::{Error, Result};
use crate::host::{HostBackend, RadioHandle};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct RadioController {
    host: Arc<dyn HostBackend>,
}

impl RadioController {
    pub fn new(host: Arc<dyn HostBackend>) -> Self {
        Self { host }
    }

    /// True iff the host has at least one Bluetooth radio.
    pub async fn is_supported(&self) -> Result<bool> {
        Ok(!self.bluetooth_radios().await?.is_empty())
    }

    /// True iff at least one Bluetooth radio is powered on.
    pub async fn is_enabled(&self) -> Result<bool> {
        for radio in self.bluetooth_radios().await? {
            if radio.state()? == STATE_ON {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Power on every Bluetooth radio that is not already on.
    ///
    /// Succeeds iff at least one radio ends up on: already-on radios count
    /// as successes, and a state-change request succeeds iff the OS grants
    /// access. All per-radio outcomes are collected before the overall
    /// verdict, so a fast denial never preempts a slower grant. With no
    /// Bluetooth radio present there is nothing to enable and the call
    /// fails.
    pub async fn enable(&self) -> Result<()> {
        let radios = self.bluetooth_radios().await?;
        let mut outcomes = Vec::with_capacity(radios.len());
        for radio in &radios {
            if radio.state()? == STATE_ON {
                debug!("radio already on");
                outcomes.push(true);
                continue;
            }
            let granted = match bridge(|done| radio.request_state(STATE_ON, done)).await {
                Ok(access) => access == ACCESS_ALLOWED,
                Err(err) => {
                    warn!("radio state change failed: {err}");
                    false
                }
            };
            outcomes.push(granted);
        }
        if outcomes.iter().any(|&ok| ok) {
            info!("bluetooth enabled ({} radio(s) on)", outcomes.iter().filter(|&&ok| ok).count());
            Ok(())
        } else {
            Err(Error::EnableFailed)
        }
    }

    /// Enumerate radios and keep the Bluetooth-kind ones, in cursor order.
    async fn bluetooth_radios(&self) -> Result<Vec<Box<dyn RadioHandle>>> {
        let mut cursor = bridge(|done| self.host.radios(done)).await?;
        let mut found = Vec::new();
        while cursor.has_current() {
            let radio = cursor.current()?;
            if radio.kind()? == KIND_BLUETOOTH {
                found.push(radio);
            }
            cursor.move_next();
        }
        debug!("found {} bluetooth radio(s)", found.len());
        Ok(found)
    }
}

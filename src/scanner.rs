//! Device Scanner
//!
//! Enumerates paired and unpaired Bluetooth devices through the two canned
//! selector queries and materializes a [`DeviceRecord`] per entry.

use crate::bridge::bridge;
use crate::device::{DeviceRecord, DeviceSource};
use crate::error::Result;
use crate::host::HostBackend;
use std::sync::Arc;
use tracing::debug;

/// Scanner over the OS device registry.
///
/// The two selector strings are computed once at construction and injected
/// here; they are the only state shared across scans.
pub struct DeviceScanner {
    host: Arc<dyn HostBackend>,
    paired_selector: String,
    unpaired_selector: String,
}

impl DeviceScanner {
    pub fn new(host: Arc<dyn HostBackend>, paired_selector: String, unpaired_selector: String) -> Self {
        Self {
            host,
            paired_selector,
            unpaired_selector,
        }
    }

    /// Devices currently paired with the host, in OS enumeration order.
    pub async fn list_paired(&self) -> Result<Vec<DeviceRecord>> {
        self.scan(&self.paired_selector).await
    }

    /// Unpaired devices visible to the host, in OS enumeration order.
    pub async fn list_unpaired(&self) -> Result<Vec<DeviceRecord>> {
        self.scan(&self.unpaired_selector).await
    }

    /// Both scans, run concurrently; paired records precede unpaired ones.
    pub async fn list_all(&self) -> Result<Vec<DeviceRecord>> {
        let (paired, unpaired) = tokio::join!(self.list_paired(), self.list_unpaired());
        let mut all = paired?;
        all.extend(unpaired?);
        Ok(all)
    }

    /// Run one selector query and build a record per entry. The cursor walk
    /// is strictly sequential: an entry's device is fully resolved before
    /// the cursor advances.
    async fn scan(&self, selector: &str) -> Result<Vec<DeviceRecord>> {
        let mut cursor = bridge(|done| self.host.find_devices(selector, done)).await?;
        let mut records = Vec::new();
        while cursor.has_current() {
            let info = cursor.current()?;
            let record = DeviceRecord::resolve(self.host.as_ref(), DeviceSource::ByInfo(info)).await?;
            records.push(record);
            cursor.move_next();
        }
        debug!("selector scan produced {} device(s)", records.len());
        Ok(records)
    }
}

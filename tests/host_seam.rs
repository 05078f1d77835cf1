//! Drives a full session through the public API with a custom host backend,
//! the way an embedding application on another binding would.

use anyhow::Result;
use std::sync::Arc;
use windows_bluetooth::host::{
    DeviceInfoCursor, Done, HostBackend, HostCursor, HostError, RadioCursor, RadioHandle,
    RawDevice, RawDeviceInfo,
};
use windows_bluetooth::{Bluetooth, BluetoothConfig, LogConfig};

struct Items<T> {
    items: Vec<Option<T>>,
    index: usize,
}

impl<T> Items<T> {
    fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter().map(Some).collect(),
            index: 0,
        }
    }
}

impl<T> HostCursor for Items<T> {
    type Item = T;

    fn has_current(&self) -> bool {
        self.index < self.items.len()
    }

    fn current(&mut self) -> std::result::Result<T, HostError> {
        self.items
            .get_mut(self.index)
            .and_then(Option::take)
            .ok_or_else(|| HostError::new("past end"))
    }

    fn move_next(&mut self) {
        self.index += 1;
    }
}

/// One Bluetooth radio, off, that grants the power-on request.
struct OffRadio;

impl RadioHandle for OffRadio {
    fn kind(&self) -> std::result::Result<i32, HostError> {
        Ok(3)
    }

    fn state(&self) -> std::result::Result<i32, HostError> {
        Ok(2)
    }

    fn request_state(&self, _state: i32, done: Done<i32>) {
        done(Ok(1));
    }
}

struct Registry {
    devices: Vec<RawDevice>,
}

impl Registry {
    fn entry(id: &str, name: &str, address: u64, paired: bool) -> RawDevice {
        RawDevice {
            address,
            class: (4, 1, 0x240404),
            connection_status: 0,
            info: RawDeviceInfo {
                id: id.to_string(),
                name: name.to_string(),
                is_paired: paired,
                can_pair: !paired,
                protection_level: 1,
            },
        }
    }

    fn find(&self, pred: impl Fn(&RawDevice) -> bool) -> std::result::Result<RawDevice, HostError> {
        self.devices
            .iter()
            .find(|d| pred(d))
            .cloned()
            .ok_or_else(|| HostError::new("no such device"))
    }
}

impl HostBackend for Registry {
    fn radios(&self, done: Done<RadioCursor>) {
        let radios: Vec<Box<dyn RadioHandle>> = vec![Box::new(OffRadio)];
        done(Ok(Box::new(Items::new(radios))));
    }

    fn find_devices(&self, selector: &str, done: Done<DeviceInfoCursor>) {
        let want_paired = selector == "aqs:paired";
        let infos: Vec<_> = self
            .devices
            .iter()
            .filter(|d| d.info.is_paired == want_paired)
            .map(|d| d.info.clone())
            .collect();
        done(Ok(Box::new(Items::new(infos))));
    }

    fn device_from_id(&self, id: &str, done: Done<RawDevice>) {
        done(self.find(|d| d.info.id == id));
    }

    fn device_from_address(&self, address: u64, done: Done<RawDevice>) {
        done(self.find(|d| d.address == address));
    }

    fn pair_device(&self, _id: &str, _kinds: u32, _protection: i32, done: Done<i32>) {
        done(Ok(0)); // paired
    }

    fn unpair_device(&self, _id: &str, done: Done<i32>) {
        done(Ok(0)); // unpaired
    }

    fn paired_selector(&self) -> std::result::Result<String, HostError> {
        Ok("aqs:paired".to_string())
    }

    fn unpaired_selector(&self) -> std::result::Result<String, HostError> {
        Ok("aqs:unpaired".to_string())
    }
}

#[tokio::test]
async fn full_session_over_custom_backend() -> Result<()> {
    let _guard = windows_bluetooth::logging::init(&LogConfig {
        console_logging_enabled: false,
        ..LogConfig::default()
    })?;

    let registry = Registry {
        devices: vec![
            Registry::entry("a", "Keyboard", 0x11_22_33_44_55_66, true),
            Registry::entry("b", "Speaker", 0xAA_BB_CC_DD_EE_FF, false),
        ],
    };
    let bt = Bluetooth::with_backend(Arc::new(registry), BluetoothConfig::default())?;

    assert!(bt.is_supported().await?);
    assert!(!bt.is_enabled().await?);
    bt.enable().await?;

    let all = bt.list_all().await?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Keyboard");
    assert!(all[0].paired);
    assert_eq!(all[1].address, "aa:bb:cc:dd:ee:ff");
    assert_eq!(all[1].protection.as_deref(), Some("none"));

    let paired = bt.pair("aa:bb:cc:dd:ee:ff").await?;
    assert_eq!(paired.status, "paired");
    assert_eq!(paired.device.name, "Speaker");

    let unpaired = bt.unpair(0xAA_BB_CC_DD_EE_FFu64).await?;
    assert_eq!(unpaired.status, "unpaired");

    Ok(())
}

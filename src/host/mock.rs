//! Scripted in-memory host backend for unit tests.

use super::{
    Done, DeviceInfoCursor, HostBackend, HostCursor, HostError, RadioCursor, RadioHandle,
    RawDevice,
};
use std::sync::{Arc, Mutex};

pub(crate) const PAIRED_SELECTOR: &str = "mock:pairing-state=paired";
pub(crate) const UNPAIRED_SELECTOR: &str = "mock:pairing-state=unpaired";

/// Cursor over a pre-built vector, items handed out once per position.
pub(crate) struct VecCursor<T> {
    items: Vec<Option<T>>,
    index: usize,
}

impl<T> VecCursor<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter().map(Some).collect(),
            index: 0,
        }
    }
}

impl<T> HostCursor for VecCursor<T> {
    type Item = T;

    fn has_current(&self) -> bool {
        self.index < self.items.len()
    }

    fn current(&mut self) -> Result<T, HostError> {
        self.items
            .get_mut(self.index)
            .and_then(Option::take)
            .ok_or_else(|| HostError::new("cursor read past end"))
    }

    fn move_next(&mut self) {
        self.index += 1;
    }
}

/// A scripted radio: fixed kind and state, plus the access status the OS
/// "grants" when a state change is requested.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRadio {
    pub kind: i32,
    pub state: i32,
    pub access_on_request: i32,
}

struct MockRadioHandle {
    script: ScriptedRadio,
    requests: Arc<Mutex<Vec<i32>>>,
}

impl RadioHandle for MockRadioHandle {
    fn kind(&self) -> Result<i32, HostError> {
        Ok(self.script.kind)
    }

    fn state(&self) -> Result<i32, HostError> {
        Ok(self.script.state)
    }

    fn request_state(&self, state: i32, done: Done<i32>) {
        self.requests.lock().unwrap().push(state);
        done(Ok(self.script.access_on_request));
    }
}

/// In-memory [`HostBackend`] with scripted radios, a device registry, and
/// fixed pairing/unpairing result statuses.
pub(crate) struct MockHost {
    pub radios: Vec<ScriptedRadio>,
    pub devices: Vec<RawDevice>,
    pub pair_status: i32,
    pub unpair_status: i32,
    /// Radio states requested through any handle, in order.
    pub state_requests: Arc<Mutex<Vec<i32>>>,
    /// (id, kinds, protection) per pairing call.
    pub pair_calls: Mutex<Vec<(String, u32, i32)>>,
    pub unpair_calls: Mutex<Vec<String>>,
}

impl MockHost {
    pub(crate) fn new() -> Self {
        Self {
            radios: Vec::new(),
            devices: Vec::new(),
            pair_status: 0,
            unpair_status: 0,
            state_requests: Arc::new(Mutex::new(Vec::new())),
            pair_calls: Mutex::new(Vec::new()),
            unpair_calls: Mutex::new(Vec::new()),
        }
    }

    fn lookup(&self, pred: impl Fn(&RawDevice) -> bool) -> Result<RawDevice, HostError> {
        self.devices
            .iter()
            .find(|d| pred(d))
            .cloned()
            .ok_or_else(|| HostError::new("element not found"))
    }
}

impl HostBackend for MockHost {
    fn radios(&self, done: Done<RadioCursor>) {
        let handles: Vec<Box<dyn RadioHandle>> = self
            .radios
            .iter()
            .map(|script| {
                Box::new(MockRadioHandle {
                    script: script.clone(),
                    requests: Arc::clone(&self.state_requests),
                }) as Box<dyn RadioHandle>
            })
            .collect();
        done(Ok(Box::new(VecCursor::new(handles))));
    }

    fn find_devices(&self, selector: &str, done: Done<DeviceInfoCursor>) {
        let want_paired = match selector {
            PAIRED_SELECTOR => true,
            UNPAIRED_SELECTOR => false,
            _ => return done(Err(HostError::new(format!("bad selector '{selector}'")))),
        };
        let infos: Vec<_> = self
            .devices
            .iter()
            .filter(|d| d.info.is_paired == want_paired)
            .map(|d| d.info.clone())
            .collect();
        done(Ok(Box::new(VecCursor::new(infos))));
    }

    fn device_from_id(&self, id: &str, done: Done<RawDevice>) {
        done(self.lookup(|d| d.info.id == id));
    }

    fn device_from_address(&self, address: u64, done: Done<RawDevice>) {
        done(self.lookup(|d| d.address == address));
    }

    fn pair_device(&self, id: &str, kinds: u32, protection: i32, done: Done<i32>) {
        self.pair_calls
            .lock()
            .unwrap()
            .push((id.to_string(), kinds, protection));
        done(Ok(self.pair_status));
    }

    fn unpair_device(&self, id: &str, done: Done<i32>) {
        self.unpair_calls.lock().unwrap().push(id.to_string());
        done(Ok(self.unpair_status));
    }

    fn paired_selector(&self) -> Result<String, HostError> {
        Ok(PAIRED_SELECTOR.to_string())
    }

    fn unpaired_selector(&self) -> Result<String, HostError> {
        Ok(UNPAIRED_SELECTOR.to_string())
    }
}

/// Convenience constructor for registry entries.
pub(crate) fn device(id: &str, name: &str, address: u64, paired: bool) -> RawDevice {
    RawDevice {
        address,
        class: (0, 0, 0),
        connection_status: 0,
        info: super::RawDeviceInfo {
            id: id.to_string(),
            name: name.to_string(),
            is_paired: paired,
            can_pair: !paired,
            protection_level: 0,
        },
    }
}

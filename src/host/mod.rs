//! Host Surface
//!
//! The seam between the control layer and the OS Bluetooth facilities. The
//! control flow only ever sees these traits and plain data carriers; the
//! WinRT binding lives behind [`HostBackend`] in the `winrt` submodule, and
//! unit tests script the same trait in-memory.
//!
//! Every asynchronous host operation is one-shot callback style: the backend
//! invokes the supplied [`Done`] callback exactly once, with either the
//! result or a [`HostError`]. [`crate::bridge`] turns those callbacks into
//! awaitable futures.

use thiserror::Error;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(windows)]
pub mod winrt;

/// One-shot completion callback for a host operation.
pub type Done<T> = Box<dyn FnOnce(Result<T, HostError>) + Send>;

/// Cursor of OS radio handles, as delivered by radio enumeration.
pub type RadioCursor = Box<dyn HostCursor<Item = Box<dyn RadioHandle>> + Send>;

/// Cursor of raw device-information entries from a selector query.
pub type DeviceInfoCursor = Box<dyn HostCursor<Item = RawDeviceInfo> + Send>;

/// Failure of an underlying OS enumeration, resolution, or pairing call.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
    code: Option<i32>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
        }
    }

    /// The backend dropped a completion callback without settling it.
    pub(crate) fn dropped() -> Self {
        Self::new("host operation dropped its completion callback without settling")
    }

    /// The OS error code, when the backend reported one.
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

/// A cursor-style collection: "has current element" plus "advance", never
/// random access. Drained synchronously by the control flow; callers of the
/// public API only ever see the materialized sequence.
pub trait HostCursor {
    type Item;

    fn has_current(&self) -> bool;

    /// The element at the cursor. Called at most once per position.
    fn current(&mut self) -> Result<Self::Item, HostError>;

    fn move_next(&mut self);
}

/// A transient, host-owned radio. The control layer reads kind and state and
/// may request a state change; it never retains the handle across calls.
pub trait RadioHandle: Send {
    /// Raw `RadioKind` value.
    fn kind(&self) -> Result<i32, HostError>;

    /// Raw `RadioState` value.
    fn state(&self) -> Result<i32, HostError>;

    /// Request a transition to `state`; completes with the raw
    /// `RadioAccessStatus` the OS granted.
    fn request_state(&self, state: i32, done: Done<i32>);
}

/// Device-information fields read from an enumeration entry.
#[derive(Debug, Clone)]
pub struct RawDeviceInfo {
    /// OS device identifier, the key for resolution and pairing calls.
    pub id: String,
    pub name: String,
    pub is_paired: bool,
    pub can_pair: bool,
    /// Raw `DevicePairingProtectionLevel` value.
    pub protection_level: i32,
}

/// A fully resolved device: the Bluetooth-device fields plus the embedded
/// device information.
#[derive(Debug, Clone)]
pub struct RawDevice {
    /// 48-bit Bluetooth address.
    pub address: u64,
    /// Class-of-device triple: (major, minor, raw).
    pub class: (u32, u32, u32),
    /// Raw `BluetoothConnectionStatus` value.
    pub connection_status: i32,
    pub info: RawDeviceInfo,
}

/// The OS Bluetooth surface consumed by this layer.
///
/// Implementations must invoke each `done` callback exactly once. There is no
/// cancellation: once issued, an operation runs to completion even if the
/// caller has abandoned it.
pub trait HostBackend: Send + Sync {
    /// Enumerate all radios on the host.
    fn radios(&self, done: Done<RadioCursor>);

    /// Run a selector query over the device registry.
    fn find_devices(&self, selector: &str, done: Done<DeviceInfoCursor>);

    /// Resolve the full device behind a device-information id.
    fn device_from_id(&self, id: &str, done: Done<RawDevice>);

    /// Resolve the full device behind a Bluetooth address.
    fn device_from_address(&self, address: u64, done: Done<RawDevice>);

    /// Run the pairing ceremony for `id` with the given `DevicePairingKinds`
    /// bits and raw protection level, auto-accepting the one-shot pairing
    /// request prompt. Completes with the raw `DevicePairingResultStatus`.
    fn pair_device(&self, id: &str, kinds: u32, protection: i32, done: Done<i32>);

    /// Unpair `id`; completes with the raw `DeviceUnpairingResultStatus`.
    fn unpair_device(&self, id: &str, done: Done<i32>);

    /// Selector string matching devices with pairing state = paired.
    fn paired_selector(&self) -> Result<String, HostError>;

    /// Selector string matching devices with pairing state = unpaired.
    fn unpaired_selector(&self) -> Result<String, HostError>;
}

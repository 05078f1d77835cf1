//! Control layer for the Windows Bluetooth radio and device-pairing
//! subsystem.
//!
//! Discovers paired and unpaired devices, queries and toggles radio power
//! state, and drives pairing/unpairing handshakes to a terminal status.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       Bluetooth                          │
//! │      (facade - the public API for applications)          │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!        ┌──────────────┼──────────────┐
//!        ▼              ▼              ▼
//! ┌────────────┐  ┌───────────┐  ┌───────────┐
//! │   Radio    │  │  Device   │  │  Pairing  │
//! │ Controller │  │  Scanner  │  │  Engine   │
//! └──────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!        │              │              │
//!        └──────────────┼──────────────┘
//!                       ▼
//!            ┌─────────────────────┐
//!            │  bridge + host seam │
//!            │  (callback-style OS │
//!            │   calls as futures) │
//!            └─────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`address`] - 48-bit address codec and validation gate
//! - [`device`] - canonical device records
//! - [`radio`] - radio support/power queries and enabling
//! - [`scanner`] - paired/unpaired device enumeration
//! - [`pairing`] - pair/unpair handshakes
//! - [`host`] - the OS seam; the WinRT backend lives behind it
//! - [`bridge`] - one-shot callback to future adaptation
//!
//! Every operation is one-shot asynchronous with cooperative suspension;
//! nothing here spawns threads, retries, or imposes timeouts. A caller that
//! needs a timeout races the returned future externally.

pub mod address;
pub mod bridge;
pub mod config;
pub mod device;
pub mod enums;
pub mod error;
pub mod host;
pub mod logging;
pub mod pairing;
pub mod radio;
pub mod scanner;

pub use address::{BluetoothAddress, MAX_ADDRESS};
pub use config::{BluetoothConfig, LogConfig, PairingCeremony, PairingConfig};
pub use device::{DeviceClass, DeviceRecord};
pub use error::{Error, Result};
pub use pairing::{PairingOutcome, UnpairingOutcome};

use host::HostBackend;
use pairing::PairingEngine;
use radio::RadioController;
use scanner::DeviceScanner;
use std::sync::Arc;

/// The public control surface.
///
/// Address parameters accept either the raw 48-bit integer or a hex string
/// ("aabbccddeeff" or "aa:bb:cc:dd:ee:ff", case-insensitive); both pass the
/// same validation gate before any OS call is issued.
pub struct Bluetooth {
    radio: RadioController,
    scanner: DeviceScanner,
    pairing: PairingEngine,
}

impl Bluetooth {
    /// Control layer over the machine's own Bluetooth subsystem.
    #[cfg(windows)]
    pub fn new() -> Result<Self> {
        Self::with_backend(
            Arc::new(host::winrt::WinrtHost::new()),
            BluetoothConfig::default(),
        )
    }

    /// Control layer over an explicit host backend.
    ///
    /// The two device-selector queries are computed here, once, and injected
    /// into the scanner; they are the only state shared across operations.
    pub fn with_backend(host: Arc<dyn HostBackend>, config: BluetoothConfig) -> Result<Self> {
        let paired_selector = host.paired_selector()?;
        let unpaired_selector = host.unpaired_selector()?;
        Ok(Self {
            radio: RadioController::new(Arc::clone(&host)),
            scanner: DeviceScanner::new(Arc::clone(&host), paired_selector, unpaired_selector),
            pairing: PairingEngine::new(host, config.pairing),
        })
    }

    /// True iff the host has at least one Bluetooth radio.
    pub async fn is_supported(&self) -> Result<bool> {
        self.radio.is_supported().await
    }

    /// True iff at least one Bluetooth radio is powered on.
    pub async fn is_enabled(&self) -> Result<bool> {
        self.radio.is_enabled().await
    }

    /// Power on the Bluetooth radios; succeeds iff at least one ends up on.
    pub async fn enable(&self) -> Result<()> {
        self.radio.enable().await
    }

    /// Devices currently paired with the host.
    pub async fn list_paired(&self) -> Result<Vec<DeviceRecord>> {
        self.scanner.list_paired().await
    }

    /// Unpaired devices visible to the host.
    pub async fn list_unpaired(&self) -> Result<Vec<DeviceRecord>> {
        self.scanner.list_unpaired().await
    }

    /// All visible devices, paired first.
    pub async fn list_all(&self) -> Result<Vec<DeviceRecord>> {
        self.scanner.list_all().await
    }

    /// Snapshot the device at `address`.
    pub async fn from_address<A>(&self, address: A) -> Result<DeviceRecord>
    where
        A: TryInto<BluetoothAddress, Error = Error>,
    {
        self.pairing.from_address(address.try_into()?).await
    }

    /// Pair with the device at `address`.
    pub async fn pair<A>(&self, address: A) -> Result<PairingOutcome>
    where
        A: TryInto<BluetoothAddress, Error = Error>,
    {
        self.pairing.pair(address.try_into()?).await
    }

    /// Unpair the device at `address`.
    pub async fn unpair<A>(&self, address: A) -> Result<UnpairingOutcome>
    where
        A: TryInto<BluetoothAddress, Error = Error>,
    {
        self.pairing.unpair(address.try_into()?).await
    }
}

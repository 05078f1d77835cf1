//! Error types for the Bluetooth control layer.

use crate::host::HostError;
use thiserror::Error;

/// Errors surfaced by the public API.
///
/// Address validation errors are raised synchronously, before any OS call is
/// issued. Everything else propagates from the host surface; no operation is
/// retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Address exceeds the 48-bit Bluetooth address space.
    #[error("address {0:#x} out of range, must be between 0 and 0xffffffffffff (281474976710655)")]
    AddressOutOfRange(u64),

    /// Address string is not twelve hex digits, optionally colon-separated
    /// every two digits.
    #[error("invalid address string '{0}', must be twelve hexadecimal digits, optionally separated by a colon every two digits")]
    MalformedAddress(String),

    /// No Bluetooth radio could be switched on.
    #[error("Failed to enable any radios")]
    EnableFailed,

    /// The pairing ceremony ended in a non-success status.
    #[error("pairing failed: {status}")]
    PairingFailed { status: String },

    /// The unpairing ceremony ended in a non-success status.
    #[error("unpairing failed: {status}")]
    UnpairingFailed { status: String },

    /// An underlying enumeration, resolution, or pairing call failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, Error>;

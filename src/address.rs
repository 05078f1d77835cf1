//! Bluetooth Address Codec
//!
//! Converts between the 48-bit integer form of a Bluetooth address and its
//! colon-separated hex string form. Every public operation taking an address
//! funnels through [`BluetoothAddress`] before the OS layer is touched.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Largest valid Bluetooth address (ff:ff:ff:ff:ff:ff).
pub const MAX_ADDRESS: u64 = 0xFFFF_FFFF_FFFF;

/// A validated 48-bit Bluetooth device address.
///
/// Accepts two textual forms, case-insensitively: twelve contiguous hex
/// digits, or six colon-separated hex pairs. The canonical rendering is
/// always lowercase with colons, so any valid address round-trips through
/// its string form unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BluetoothAddress(u64);

impl BluetoothAddress {
    /// The raw 48-bit integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for BluetoothAddress {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Error> {
        if value > MAX_ADDRESS {
            return Err(Error::AddressOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl FromStr for BluetoothAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if !is_well_formed(s) {
            return Err(Error::MalformedAddress(s.to_string()));
        }
        let digits: String = s.chars().filter(|c| *c != ':').collect();
        // Twelve hex digits always fit in 48 bits, no range check needed.
        let value = u64::from_str_radix(&digits, 16)
            .map_err(|_| Error::MalformedAddress(s.to_string()))?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for BluetoothAddress {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl TryFrom<String> for BluetoothAddress {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl fmt::Display for BluetoothAddress {
    /// Canonical form: 6 zero-padded lowercase hex pairs joined by ':'.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_be_bytes();
        // A 48-bit value occupies the low six bytes of the u64.
        let mut first = true;
        for byte in &bytes[2..] {
            if !first {
                write!(f, ":")?;
            }
            write!(f, "{byte:02x}")?;
            first = false;
        }
        Ok(())
    }
}

/// Twelve hex digits, or six colon-separated two-digit hex groups.
fn is_well_formed(s: &str) -> bool {
    let is_hex = |part: &str| part.chars().all(|c| c.is_ascii_hexdigit());
    if s.contains(':') {
        let groups: Vec<&str> = s.split(':').collect();
        groups.len() == 6 && groups.iter().all(|g| g.len() == 2 && is_hex(g))
    } else {
        s.len() == 12 && is_hex(s)
    }
}

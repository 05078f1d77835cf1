//! WinRT Enumeration Mapping
//!
//! Maps raw OS enumeration values back to the symbolic member names the
//! projected API exposes, for user-facing status and reason fields. Unmapped
//! values come back as `None`, never as an error: an unrecognized protection
//! level or result status must degrade to "unrecognized", not crash.

/// A reverse-lookup table from raw enumeration value to symbolic name.
pub type EnumTable = &'static [(i32, &'static str)];

/// Find the symbolic name declared for `value`, if any.
pub fn name_of(value: i32, table: EnumTable) -> Option<&'static str> {
    table
        .iter()
        .find(|(raw, _)| *raw == value)
        .map(|(_, name)| *name)
}

/// `Windows.Devices.Radios.RadioKind`
pub const RADIO_KIND: EnumTable = &[
    (0, "other"),
    (1, "wiFi"),
    (2, "mobileBroadband"),
    (3, "bluetooth"),
    (4, "fm"),
];

/// `Windows.Devices.Radios.RadioState`
pub const RADIO_STATE: EnumTable = &[
    (0, "unknown"),
    (1, "on"),
    (2, "off"),
    (3, "disabled"),
];

/// `Windows.Devices.Radios.RadioAccessStatus`
pub const RADIO_ACCESS_STATUS: EnumTable = &[
    (0, "unspecified"),
    (1, "allowed"),
    (2, "deniedByUser"),
    (3, "deniedBySystem"),
];

/// `Windows.Devices.Bluetooth.BluetoothConnectionStatus`
pub const CONNECTION_STATUS: EnumTable = &[(0, "disconnected"), (1, "connected")];

/// `Windows.Devices.Enumeration.DevicePairingProtectionLevel`
pub const PROTECTION_LEVEL: EnumTable = &[
    (0, "default"),
    (1, "none"),
    (2, "encryption"),
    (3, "encryptionAndAuthentication"),
];

/// `Windows.Devices.Enumeration.DevicePairingResultStatus`
pub const PAIRING_STATUS: EnumTable = &[
    (0, "paired"),
    (1, "notReadyToPair"),
    (2, "notPaired"),
    (3, "alreadyPaired"),
    (4, "connectionRejected"),
    (5, "tooManyConnections"),
    (6, "hardwareFailure"),
    (7, "authenticationTimeout"),
    (8, "authenticationNotAllowed"),
    (9, "authenticationFailure"),
    (10, "noSupportedProfiles"),
    (11, "protectionLevelCouldNotBeMet"),
    (12, "accessDenied"),
    (13, "invalidCeremonyData"),
    (14, "pairingCanceled"),
    (15, "operationAlreadyInProgress"),
    (16, "requiredHandlerNotRegistered"),
    (17, "rejectedByHandler"),
    (18, "remoteDeviceHasAssociation"),
    (19, "failed"),
];

/// `Windows.Devices.Enumeration.DeviceUnpairingResultStatus`
pub const UNPAIRING_STATUS: EnumTable = &[
    (0, "unpaired"),
    (1, "alreadyUnpaired"),
    (2, "operationInProgress"),
    (3, "accessDenied"),
    (4, "failed"),
];

/// Raw radio enumeration values the control flow compares against.
pub mod radio {
    pub const KIND_BLUETOOTH: i32 = 3;
    pub const STATE_ON: i32 = 1;
    pub const ACCESS_ALLOWED: i32 = 1;
}

/// Raw connection-status value for a connected device.
pub const CONNECTION_CONNECTED: i32 = 1;

/// `Windows.Devices.Enumeration.DevicePairingKinds` ceremony bits.
pub mod pairing_kinds {
    pub const CONFIRM_ONLY: u32 = 0x1;
    pub const DISPLAY_PIN: u32 = 0x2;
    pub const PROVIDE_PIN: u32 = 0x4;
    pub const CONFIRM_PIN_MATCH: u32 = 0x8;
}

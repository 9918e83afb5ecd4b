/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the library for error handling

--*/
use core::convert::From;
use core::fmt;
use core::num::{NonZeroU32, TryFromIntError};

/// CryptoAuth Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CryptoAuthError(pub NonZeroU32);

/// Broad class of an error code, selected by the upper 16 bits of the code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Zone/slot/offset out of range, access denied or hardware failure
    StorageRead,

    /// Write to a locked zone or slot, or key regeneration in a locked slot
    Locked,

    /// A field write would leave the certificate buffer
    TemplateBounds,

    /// Malformed date, DER or compressed certificate
    Format,

    /// Serial number could not be derived
    Derivation,

    /// Chain walking failed
    Chain,

    /// The device session could not be entered
    Session,

    /// Code outside every known group
    Unknown,
}

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code, plus a name lookup used by `Display`.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:literal, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: CryptoAuthError = CryptoAuthError::new_const($value);
        )*

        /// Symbolic name of a known error code
        pub fn name(&self) -> Option<&'static str> {
            match self.0.get() {
                $(
                    $value => Some(stringify!($name)),
                )*
                _ => None,
            }
        }

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl CryptoAuthError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a CryptoAuthError from a u32 is
    /// to use `CryptoAuthError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("CryptoAuthError cannot be 0"),
        }
    }

    /// Error class of this code
    pub fn kind(&self) -> ErrorKind {
        match self.0.get() >> 16 {
            0x0001 => ErrorKind::StorageRead,
            0x0002 => ErrorKind::Locked,
            0x0003 => ErrorKind::TemplateBounds,
            0x0004 => ErrorKind::Format,
            0x0005 => ErrorKind::Derivation,
            0x0006 => ErrorKind::Chain,
            0x0007 => ErrorKind::Session,
            _ => ErrorKind::Unknown,
        }
    }

    /// True for lock/permission violations, which callers treat as provisioning-state bugs
    /// rather than transient faults.
    pub fn is_lock_violation(&self) -> bool {
        self.kind() == ErrorKind::Locked
    }

    // Use the macro to define all error constants
    define_error_constants![
        (
            DEVICE_COMM_FAILURE,
            0x0001_0001,
            "Device Error: command failed on the bus"
        ),
        (
            DEVICE_TIMEOUT,
            0x0001_0002,
            "Device Error: command timed out after retries"
        ),
        (
            DEVICE_BAD_ZONE,
            0x0001_0003,
            "Device Error: zone cannot be addressed"
        ),
        (
            DEVICE_BAD_SLOT,
            0x0001_0004,
            "Device Error: slot index out of range"
        ),
        (
            DEVICE_READ_OUT_OF_RANGE,
            0x0001_0005,
            "Device Error: offset and count exceed the addressed zone"
        ),
        (
            DEVICE_SHORT_READ,
            0x0001_0006,
            "Device Error: read returned fewer bytes than requested"
        ),
        (
            DEVICE_ACCESS_DENIED,
            0x0001_0007,
            "Device Error: slot is not readable"
        ),
        (
            DEVICE_NO_KEY,
            0x0001_0008,
            "Device Error: slot holds no private key"
        ),
        (
            DEVICE_BAD_PARAM,
            0x0001_0009,
            "Device Error: bad command parameter"
        ),
        (
            DEVICE_WRITE_OUT_OF_RANGE,
            0x0001_000A,
            "Device Error: write exceeds the addressed zone"
        ),
        (
            LOCK_CONFIG_ZONE_LOCKED,
            0x0002_0001,
            "Lock Error: config zone is locked"
        ),
        (
            LOCK_DATA_ZONE_LOCKED,
            0x0002_0002,
            "Lock Error: data zone is locked"
        ),
        (
            LOCK_SLOT_LOCKED,
            0x0002_0003,
            "Lock Error: slot is locked"
        ),
        (
            LOCK_KEY_REGEN_DENIED,
            0x0002_0004,
            "Lock Error: slot does not allow key generation after data lock"
        ),
        (
            LOCK_ALREADY_LOCKED,
            0x0002_0005,
            "Lock Error: zone was already locked"
        ),
        (
            TEMPLATE_OUT_OF_BOUNDS,
            0x0003_0001,
            "Template Error: certificate range exceeds the template"
        ),
        (
            TEMPLATE_OVERLAP,
            0x0003_0002,
            "Template Error: standard element ranges overlap"
        ),
        (
            TEMPLATE_SIZE_MISMATCH,
            0x0003_0003,
            "Template Error: value size differs from the declared range"
        ),
        (
            TEMPLATE_BUFFER_TOO_SMALL,
            0x0003_0004,
            "Template Error: output buffer cannot hold the certificate"
        ),
        (
            TEMPLATE_MISSING_ELEMENT,
            0x0003_0005,
            "Template Error: required standard element is not declared"
        ),
        (
            FORMAT_DATE_LEN,
            0x0004_0001,
            "Format Error: date has the wrong length"
        ),
        (
            FORMAT_DATE_DIGIT,
            0x0004_0002,
            "Format Error: date contains a non-digit"
        ),
        (
            FORMAT_DATE_RANGE,
            0x0004_0003,
            "Format Error: date component out of range"
        ),
        (
            FORMAT_UTC_YEAR_RANGE,
            0x0004_0004,
            "Format Error: UTCTime only encodes years 1950..2049"
        ),
        (
            FORMAT_COMP_DATE_RANGE,
            0x0004_0005,
            "Format Error: date cannot be compressed"
        ),
        (
            FORMAT_SIG_COMPONENT_TOO_LARGE,
            0x0004_0006,
            "Format Error: signature integer does not fit 32 bytes"
        ),
        (
            FORMAT_SIG_DER,
            0x0004_0007,
            "Format Error: malformed DER signature"
        ),
        (
            FORMAT_DER_LENGTH,
            0x0004_0008,
            "Format Error: DER length cannot be encoded"
        ),
        (
            FORMAT_HEX,
            0x0004_0009,
            "Format Error: malformed hex text"
        ),
        (
            FORMAT_COMP_CERT_VERSION,
            0x0004_000A,
            "Format Error: unsupported compressed certificate format version"
        ),
        (
            FORMAT_COMP_CERT_MISMATCH,
            0x0004_000B,
            "Format Error: compressed certificate belongs to another definition"
        ),
        (
            FORMAT_PUBLIC_KEY_LEN,
            0x0004_000C,
            "Format Error: public key has the wrong length"
        ),
        (
            FORMAT_CONFIG_ZONE_LEN,
            0x0004_000D,
            "Format Error: config zone must be 128 bytes"
        ),
        (
            FORMAT_CERT_TOO_SHORT,
            0x0004_000E,
            "Format Error: certificate is shorter than its definition"
        ),
        (
            FORMAT_UNSUPPORTED_CERT_TYPE,
            0x0004_000F,
            "Format Error: only X.509 DER certificates are supported"
        ),
        (
            FORMAT_ID_RANGE,
            0x0004_0010,
            "Format Error: template and chain ids are limited to 4 bits"
        ),
        (
            DERIVATION_SN_LEN,
            0x0005_0001,
            "Derivation Error: serial number size not supported by the source"
        ),
        (
            DERIVATION_STORED_SN_LEN,
            0x0005_0002,
            "Derivation Error: stored dynamic serial number length is invalid"
        ),
        (
            DERIVATION_MISSING_MATERIAL,
            0x0005_0003,
            "Derivation Error: serial number source material is unavailable"
        ),
        (
            DERIVATION_UNKNOWN_SOURCE,
            0x0005_0004,
            "Derivation Error: unknown serial number source"
        ),
        (
            CHAIN_VERIFICATION_FAILED,
            0x0006_0001,
            "Chain Error: signature rejected"
        ),
        (
            CHAIN_CYCLE,
            0x0006_0002,
            "Chain Error: issuer references form a cycle"
        ),
        (
            CHAIN_TOO_DEEP,
            0x0006_0003,
            "Chain Error: issuer chain exceeds the supported depth"
        ),
        (
            SESSION_POISONED,
            0x0007_0001,
            "Session Error: a previous operation panicked while holding the device"
        ),
    ];
}

impl fmt::Display for CryptoAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:08x})", self.0.get()),
            None => write!(f, "unknown error (0x{:08x})", self.0.get()),
        }
    }
}

impl std::error::Error for CryptoAuthError {}

impl From<core::num::NonZeroU32> for crate::CryptoAuthError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::CryptoAuthError(val)
    }
}

impl From<CryptoAuthError> for core::num::NonZeroU32 {
    fn from(val: CryptoAuthError) -> Self {
        val.0
    }
}

impl From<CryptoAuthError> for u32 {
    fn from(val: CryptoAuthError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for CryptoAuthError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(CryptoAuthError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type CryptoAuthResult<T> = Result<T, CryptoAuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(CryptoAuthError::try_from(0).is_err());
        assert_eq!(
            Ok(CryptoAuthError::DEVICE_SHORT_READ),
            CryptoAuthError::try_from(0x0001_0006)
        );
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = CryptoAuthError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }

    #[test]
    fn test_kind_follows_group() {
        assert_eq!(
            CryptoAuthError::DEVICE_COMM_FAILURE.kind(),
            ErrorKind::StorageRead
        );
        assert_eq!(CryptoAuthError::LOCK_SLOT_LOCKED.kind(), ErrorKind::Locked);
        assert_eq!(
            CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS.kind(),
            ErrorKind::TemplateBounds
        );
        assert_eq!(CryptoAuthError::FORMAT_DATE_DIGIT.kind(), ErrorKind::Format);
        assert_eq!(
            CryptoAuthError::DERIVATION_SN_LEN.kind(),
            ErrorKind::Derivation
        );
        assert_eq!(CryptoAuthError::CHAIN_CYCLE.kind(), ErrorKind::Chain);
        assert_eq!(
            CryptoAuthError::try_from(0x00ff_0001).unwrap().kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_lock_violations_are_distinct() {
        assert!(CryptoAuthError::LOCK_DATA_ZONE_LOCKED.is_lock_violation());
        assert!(!CryptoAuthError::DEVICE_COMM_FAILURE.is_lock_violation());
    }

    #[test]
    fn test_display_names_code() {
        assert_eq!(
            CryptoAuthError::DEVICE_SHORT_READ.to_string(),
            "DEVICE_SHORT_READ (0x00010006)"
        );
        assert_eq!(
            CryptoAuthError::try_from(0x1234).unwrap().to_string(),
            "unknown error (0x00001234)"
        );
    }
}

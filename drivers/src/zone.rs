/*++

Licensed under the Apache-2.0 license.

File Name:

    zone.rs

Abstract:

    File contains the storage geometry of the secure element.

--*/

use crate::{CryptoAuthError, CryptoAuthResult};

/// Number of data zone slots
pub const SLOT_COUNT: u16 = 16;

/// Config zone size in bytes
pub const CONFIG_ZONE_SIZE: usize = 128;

/// One-time-programmable zone size in bytes
pub const OTP_ZONE_SIZE: usize = 64;

/// Device serial number size in bytes
pub const SERIAL_NUMBER_SIZE: usize = 9;

/// SHA-256 digest size accepted by sign and verify
pub const DIGEST_SIZE: usize = 32;

/// Storage region class of the secure element
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceZone {
    /// Configuration zone
    Config,

    /// Data zone, addressed by slot
    Data,

    /// One-time-programmable zone
    Otp,

    /// Value is not stored on the device
    None,
}

impl DeviceZone {
    /// Size in bytes of the addressed storage unit
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot index; only meaningful for the data zone
    pub fn size(&self, slot: u16) -> CryptoAuthResult<usize> {
        match self {
            DeviceZone::Config => Ok(CONFIG_ZONE_SIZE),
            DeviceZone::Otp => Ok(OTP_ZONE_SIZE),
            DeviceZone::Data => match slot {
                0..=7 => Ok(36),
                8 => Ok(416),
                9..=15 => Ok(72),
                _ => Err(CryptoAuthError::DEVICE_BAD_SLOT),
            },
            DeviceZone::None => Err(CryptoAuthError::DEVICE_BAD_ZONE),
        }
    }

    /// Check that `offset..offset + count` lies within the addressed storage unit
    pub fn check_range(&self, slot: u16, offset: u32, count: u32) -> CryptoAuthResult<()> {
        let size = self.size(slot)?;
        let end = (offset as usize)
            .checked_add(count as usize)
            .ok_or(CryptoAuthError::DEVICE_READ_OUT_OF_RANGE)?;
        if end > size {
            return Err(CryptoAuthError::DEVICE_READ_OUT_OF_RANGE);
        }
        Ok(())
    }
}

/// Target of a lock query
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LockTarget {
    /// Config zone
    Config,

    /// Data and OTP zones
    Data,

    /// Individual data slot
    Slot(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_sizes() {
        assert_eq!(DeviceZone::Data.size(0), Ok(36));
        assert_eq!(DeviceZone::Data.size(7), Ok(36));
        assert_eq!(DeviceZone::Data.size(8), Ok(416));
        assert_eq!(DeviceZone::Data.size(12), Ok(72));
        assert_eq!(
            DeviceZone::Data.size(16),
            Err(CryptoAuthError::DEVICE_BAD_SLOT)
        );
        assert_eq!(DeviceZone::Config.size(3), Ok(128));
        assert_eq!(DeviceZone::Otp.size(0), Ok(64));
        assert_eq!(
            DeviceZone::None.size(0),
            Err(CryptoAuthError::DEVICE_BAD_ZONE)
        );
    }

    #[test]
    fn test_check_range() {
        assert!(DeviceZone::Data.check_range(11, 0, 72).is_ok());
        assert_eq!(
            DeviceZone::Data.check_range(11, 1, 72),
            Err(CryptoAuthError::DEVICE_READ_OUT_OF_RANGE)
        );
        assert_eq!(
            DeviceZone::Config.check_range(0, u32::MAX, 2),
            Err(CryptoAuthError::DEVICE_READ_OUT_OF_RANGE)
        );
    }
}

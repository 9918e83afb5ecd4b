/*++

Licensed under the Apache-2.0 license.

File Name:

    device_config.rs

Abstract:

    File contains the transport settings handed to a secure element implementation.

--*/

use core::fmt;
use core::str::FromStr;

use crate::CryptoAuthError;

/// Secure element model
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceType {
    Atecc508a,
    Atecc608a,
    #[default]
    Atecc608b,
}

impl DeviceType {
    pub fn name(&self) -> &'static str {
        match self {
            DeviceType::Atecc508a => "ATECC508A",
            DeviceType::Atecc608a => "ATECC608A",
            DeviceType::Atecc608b => "ATECC608B",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceType {
    type Err = CryptoAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATECC508A" => Ok(DeviceType::Atecc508a),
            "ATECC608A" => Ok(DeviceType::Atecc608a),
            "ATECC608B" => Ok(DeviceType::Atecc608b),
            _ => Err(CryptoAuthError::DEVICE_BAD_PARAM),
        }
    }
}

/// Bus settings of one secure element
///
/// The defaults match an ATECC608B-TFLXTLS part. Unconfigured parts usually answer on 0xC0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceConfig {
    pub device_type: DeviceType,

    pub i2c_bus: u16,

    pub i2c_address: u16,

    pub baud: u32,

    /// Wake delay in microseconds
    pub wake_delay: u16,

    pub rx_retries: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: DeviceType::Atecc608b,
            i2c_bus: 1,
            i2c_address: 0x6C,
            baud: 100_000,
            wake_delay: 1500,
            rx_retries: 20,
        }
    }
}

impl DeviceConfig {
    /// Apply the settings a host may override; absent values keep their current setting
    pub fn with_overrides(
        mut self,
        device_type: Option<DeviceType>,
        i2c_bus: Option<u16>,
        i2c_address: Option<u16>,
    ) -> Self {
        if let Some(device_type) = device_type {
            self.device_type = device_type;
        }
        if let Some(bus) = i2c_bus {
            self.i2c_bus = bus;
        }
        if let Some(address) = i2c_address {
            self.i2c_address = address;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.device_type, DeviceType::Atecc608b);
        assert_eq!(config.i2c_bus, 1);
        assert_eq!(config.i2c_address, 0x6C);
        assert_eq!(config.baud, 100_000);
        assert_eq!(config.wake_delay, 1500);
        assert_eq!(config.rx_retries, 20);
    }

    #[test]
    fn test_overrides() {
        let config =
            DeviceConfig::default().with_overrides(Some(DeviceType::Atecc608a), None, Some(0xC0));
        assert_eq!(config.device_type, DeviceType::Atecc608a);
        assert_eq!(config.i2c_bus, 1);
        assert_eq!(config.i2c_address, 0xC0);
    }

    #[test]
    fn test_device_type_names() {
        for ty in [
            DeviceType::Atecc508a,
            DeviceType::Atecc608a,
            DeviceType::Atecc608b,
        ] {
            assert_eq!(ty.name().parse::<DeviceType>(), Ok(ty));
        }
        assert_eq!(
            "ATSHA204A".parse::<DeviceType>(),
            Err(CryptoAuthError::DEVICE_BAD_PARAM)
        );
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoAuth secure element abstraction.

--*/

mod config_zone;
mod device_config;
mod ecc256;
mod secure_element;
mod session;
mod zone;

pub use config_zone::{ConfigZone, KeyConfig, SlotConfig, DEFAULT_CONFIG_ZONE};
pub use cryptoauth_error::{CryptoAuthError, CryptoAuthResult, ErrorKind};
pub use device_config::{DeviceConfig, DeviceType};
pub use ecc256::{
    pub_key_add_padding, pub_key_remove_padding, Ecc256PubKey, Ecc256Scalar, Ecc256Signature,
    ECC_256_COORD_SIZE, PADDED_PUB_KEY_SIZE,
};
pub use secure_element::SecureElement;
pub use session::DeviceSession;
pub use zone::{
    DeviceZone, LockTarget, CONFIG_ZONE_SIZE, DIGEST_SIZE, OTP_ZONE_SIZE, SERIAL_NUMBER_SIZE,
    SLOT_COUNT,
};

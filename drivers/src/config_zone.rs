/*++

Licensed under the Apache-2.0 license.

File Name:

    config_zone.rs

Abstract:

    File contains the layout of the 128-byte configuration zone.

--*/

use bitfield::bitfield;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{CryptoAuthError, CryptoAuthResult, CONFIG_ZONE_SIZE, SERIAL_NUMBER_SIZE, SLOT_COUNT};

/// Lock byte value of a zone that has not been locked
const UNLOCKED: u8 = 0x55;

bitfield! {
    /// Slot permission record
    #[derive(Default, PartialEq, Eq, Clone, Copy)]
    pub struct SlotConfig(u16);
    impl Debug;

    /// Key used to encrypt reads
    pub u8, read_key, set_read_key: 3, 0;

    /// Slot cannot be used as a MAC key
    pub no_mac, set_no_mac: 4;

    /// Slot usage is limited by the monotonic counter
    pub limited_use, set_limited_use: 5;

    /// Reads are encrypted
    pub encrypt_read, set_encrypt_read: 6;

    /// Slot content is never readable in the clear
    pub is_secret, set_is_secret: 7;

    /// Key used to authorize writes
    pub u8, write_key, set_write_key: 11, 8;

    /// Write and GenKey permission bits
    pub u8, write_config, set_write_config: 15, 12;
}

impl SlotConfig {
    /// Slot accepts clear writes at any time
    pub fn write_always(&self) -> bool {
        self.write_config() == 0
    }

    /// Private key slot accepts GenKey after the data zone is locked
    pub fn gen_key_enabled(&self) -> bool {
        self.write_config() & 0x2 != 0
    }
}

bitfield! {
    /// Slot key-type record
    #[derive(Default, PartialEq, Eq, Clone, Copy)]
    pub struct KeyConfig(u16);
    impl Debug;

    /// Slot holds an ECC private key
    pub private, set_private: 0;

    /// Public key can be computed from the private key
    pub pub_info, set_pub_info: 1;

    /// Key type
    pub u8, key_type, set_key_type: 4, 2;

    /// Slot can be individually locked
    pub lockable, set_lockable: 5;

    /// Random nonce required
    pub req_random, set_req_random: 6;

    /// Authorization required
    pub req_auth, set_req_auth: 7;

    /// Authorization key
    pub u8, auth_key, set_auth_key: 11, 8;

    /// Slot is disabled when the persistent latch is clear
    pub persistent_disable, set_persistent_disable: 12;

    /// X.509 format record used for public keys in this slot
    pub u8, x509_id, set_x509_id: 15, 14;
}

impl KeyConfig {
    /// Key type value of an ECC P-256 key
    pub const KEY_TYPE_P256: u8 = 4;

    /// Key type value of an AES key
    pub const KEY_TYPE_AES: u8 = 6;

    /// Slot holds a P-256 private key
    pub fn is_p256_private(&self) -> bool {
        self.private() && self.key_type() == Self::KEY_TYPE_P256
    }

    /// Slot stores a P-256 public key
    pub fn is_p256_public(&self) -> bool {
        !self.private() && self.key_type() == Self::KEY_TYPE_P256
    }
}

/// Configuration zone
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ConfigZone {
    /// Serial number bytes 0-3
    pub sn03: [u8; 4],

    /// Revision number
    pub rev_num: [u8; 4],

    /// Serial number bytes 4-8
    pub sn48: [u8; 5],

    pub aes_enable: u8,

    pub i2c_enable: u8,

    reserved15: u8,

    /// I2C bus address
    pub i2c_address: u8,

    reserved17: u8,

    pub count_match: u8,

    pub chip_mode: u8,

    /// Slot permission records, little-endian
    pub slot_config: [[u8; 2]; SLOT_COUNT as usize],

    pub counter0: [u8; 8],

    pub counter1: [u8; 8],

    pub use_lock: u8,

    pub volatile_key_permission: u8,

    pub secure_boot: [u8; 2],

    pub kdf_iv_loc: u8,

    pub kdf_iv_str: [u8; 2],

    reserved75: [u8; 9],

    pub user_extra: u8,

    pub user_extra_add: u8,

    /// Data and OTP zone lock byte
    pub lock_value: u8,

    /// Config zone lock byte
    pub lock_config: u8,

    /// Per-slot lock bits, a clear bit marks a locked slot
    pub slot_locked: [u8; 2],

    pub chip_options: [u8; 2],

    pub x509_format: [u8; 4],

    /// Slot key-type records, little-endian
    pub key_config: [[u8; 2]; SLOT_COUNT as usize],
}

const _: () = assert!(core::mem::size_of::<ConfigZone>() == CONFIG_ZONE_SIZE);

impl ConfigZone {
    /// Byte range of the lock bytes and user extra bytes, updated only by dedicated commands
    pub const LOCK_BYTES: core::ops::Range<usize> = 84..88;

    /// Parse a config zone image
    pub fn from_bytes(bytes: &[u8]) -> CryptoAuthResult<Self> {
        Self::read_from_bytes(bytes).map_err(|_| CryptoAuthError::FORMAT_CONFIG_ZONE_LEN)
    }

    /// Raw zone image
    pub fn to_bytes(&self) -> [u8; CONFIG_ZONE_SIZE] {
        let mut image = [0u8; CONFIG_ZONE_SIZE];
        image.copy_from_slice(self.as_bytes());
        image
    }

    /// Device serial number (bytes 0..4 and 8..13)
    pub fn serial_number(&self) -> [u8; SERIAL_NUMBER_SIZE] {
        let mut sn = [0u8; SERIAL_NUMBER_SIZE];
        sn[..4].copy_from_slice(&self.sn03);
        sn[4..].copy_from_slice(&self.sn48);
        sn
    }

    /// Permission record of `slot`
    pub fn slot_config(&self, slot: u16) -> CryptoAuthResult<SlotConfig> {
        let raw = self
            .slot_config
            .get(usize::from(slot))
            .ok_or(CryptoAuthError::DEVICE_BAD_SLOT)?;
        Ok(SlotConfig(u16::from_le_bytes(*raw)))
    }

    /// Key-type record of `slot`
    pub fn key_config(&self, slot: u16) -> CryptoAuthResult<KeyConfig> {
        let raw = self
            .key_config
            .get(usize::from(slot))
            .ok_or(CryptoAuthError::DEVICE_BAD_SLOT)?;
        Ok(KeyConfig(u16::from_le_bytes(*raw)))
    }

    pub fn is_config_locked(&self) -> bool {
        self.lock_config != UNLOCKED
    }

    pub fn is_data_locked(&self) -> bool {
        self.lock_value != UNLOCKED
    }

    /// Slot lock state; out of range slots report locked
    pub fn is_slot_locked(&self, slot: u16) -> bool {
        if slot >= SLOT_COUNT {
            return true;
        }
        u16::from_le_bytes(self.slot_locked) & (1 << slot) == 0
    }

    pub fn set_config_locked(&mut self) {
        self.lock_config = 0x00;
    }

    pub fn set_data_locked(&mut self) {
        self.lock_value = 0x00;
    }

    pub fn set_slot_locked(&mut self, slot: u16) -> CryptoAuthResult<()> {
        if slot >= SLOT_COUNT {
            return Err(CryptoAuthError::DEVICE_BAD_SLOT);
        }
        let bits = u16::from_le_bytes(self.slot_locked) & !(1 << slot);
        self.slot_locked = bits.to_le_bytes();
        Ok(())
    }

    /// Clear every lock, as shipped from the factory
    pub fn clear_locks(&mut self) {
        self.lock_value = UNLOCKED;
        self.lock_config = UNLOCKED;
        self.slot_locked = [0xFF, 0xFF];
    }
}

/// TrustFLEX-derived slot map written at the start of provisioning
///
/// | Slot | Use                                   |
/// |------|---------------------------------------|
/// | 0    | primary private key                   |
/// | 1    | internal sign private key             |
/// | 2-4  | secondary private keys, lockable      |
/// | 5    | secret key                            |
/// | 6    | IO protection key                     |
/// | 7    | secure boot digest                    |
/// | 8    | general data (416 bytes)              |
/// | 9    | AES key                               |
/// | 10   | device compressed certificate         |
/// | 11   | signer public key                     |
/// | 12   | signer compressed certificate         |
/// | 13   | parent public key or general data     |
/// | 14   | validated public key                  |
/// | 15   | secure boot public key                |
///
/// Bytes 0..16 and the lock bytes are ignored by the device on write.
pub static DEFAULT_CONFIG_ZONE: [u8; CONFIG_ZONE_SIZE] = [
    0x01, 0x23, 0x00, 0x00, 0x00, 0x00, 0x60, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0xEE, 0x01, 0x01, 0x00, //
    0x6C, 0x00, 0x00, 0x01, //
    // slot configuration
    0x85, 0x00, 0x82, 0x00, 0x85, 0x20, 0x85, 0x20, //
    0x85, 0x20, 0x8F, 0x46, 0x8F, 0x0F, 0x9F, 0x8F, //
    0x0F, 0x0F, 0x8F, 0x0F, 0x0F, 0x0F, 0x0F, 0x0F, //
    0x0F, 0x0F, 0x0F, 0x0F, 0x0D, 0x1F, 0x0F, 0x0F, //
    // counters
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, //
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x03, 0xF7, 0x00, 0x69, 0x76, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0x0E, 0x60, //
    0x00, 0x00, 0x00, 0x00, //
    // key configuration
    0x53, 0x00, 0x53, 0x00, 0x73, 0x00, 0x73, 0x00, //
    0x73, 0x00, 0x38, 0x00, 0x7C, 0x00, 0x1C, 0x00, //
    0x3C, 0x00, 0x1A, 0x00, 0x3C, 0x00, 0x30, 0x00, //
    0x3C, 0x00, 0x30, 0x00, 0x12, 0x00, 0x30, 0x00, //
];

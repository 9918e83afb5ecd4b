/*++

Licensed under the Apache-2.0 license.

File Name:

    secure_element.rs

Abstract:

    File contains definition of the SecureElement trait.

--*/

use crate::{
    ConfigZone, CryptoAuthError, CryptoAuthResult, DeviceType, DeviceZone, Ecc256PubKey,
    Ecc256Signature, LockTarget, CONFIG_ZONE_SIZE, DIGEST_SIZE, SERIAL_NUMBER_SIZE, SLOT_COUNT,
};

/// Command set of a CryptoAuthentication secure element.
///
/// The device executes one command at a time; callers sharing an element across threads
/// serialize through [`crate::DeviceSession`].
pub trait SecureElement {
    /// Model of the attached element
    fn device_type(&mut self) -> CryptoAuthResult<DeviceType>;

    /// Read bytes from a zone
    ///
    /// # Arguments
    ///
    /// * `zone` - Zone to read from
    /// * `slot` - Slot index, ignored outside the data zone
    /// * `offset` - Byte offset within the slot or zone
    /// * `count` - Number of bytes to read
    ///
    /// # Error
    ///
    /// * `DEVICE_READ_OUT_OF_RANGE` - The range exceeds the slot or zone
    /// * `DEVICE_ACCESS_DENIED` - The slot holds a private key or secret
    fn read_zone(
        &mut self,
        zone: DeviceZone,
        slot: u16,
        offset: u32,
        count: u32,
    ) -> CryptoAuthResult<Vec<u8>>;

    /// Write bytes to a zone
    ///
    /// # Error
    ///
    /// * `LOCK_CONFIG_ZONE_LOCKED` - The config zone is locked
    /// * `LOCK_DATA_ZONE_LOCKED` - The data zone is locked and the slot is not writable
    /// * `LOCK_SLOT_LOCKED` - The slot is locked
    fn write_zone(
        &mut self,
        zone: DeviceZone,
        slot: u16,
        offset: u32,
        data: &[u8],
    ) -> CryptoAuthResult<()>;

    /// Create a new private key in `slot` and return its public key
    ///
    /// # Error
    ///
    /// * `LOCK_SLOT_LOCKED` - The slot is locked
    /// * `LOCK_KEY_REGEN_DENIED` - The slot forbids GenKey once the data zone is locked
    fn gen_private_key(&mut self, slot: u16) -> CryptoAuthResult<Ecc256PubKey>;

    /// Compute the public key of the private key held in `slot`
    fn gen_public_key(&mut self, slot: u16) -> CryptoAuthResult<Ecc256PubKey>;

    /// Sign a digest with the private key held in `slot`
    fn sign(&mut self, slot: u16, digest: &[u8; DIGEST_SIZE]) -> CryptoAuthResult<Ecc256Signature>;

    /// Verify a signature over a digest against an external public key
    ///
    /// Returns `Ok(false)` when the signature does not match; errors are reserved for
    /// failures to run the command.
    fn verify_extern(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        public_key: &Ecc256PubKey,
    ) -> CryptoAuthResult<bool>;

    /// Verify a signature over a digest against the public key stored in `slot`
    ///
    /// # Error
    ///
    /// * `DEVICE_BAD_PARAM` - The slot is not configured for a P-256 public key
    fn verify_stored(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        slot: u16,
    ) -> CryptoAuthResult<bool>;

    /// Read and parse the whole config zone
    fn read_config_zone(&mut self) -> CryptoAuthResult<ConfigZone> {
        let bytes = self.read_zone(DeviceZone::Config, 0, 0, CONFIG_ZONE_SIZE as u32)?;
        ConfigZone::from_bytes(&bytes)
    }

    /// Device serial number
    fn serial_number(&mut self) -> CryptoAuthResult<[u8; SERIAL_NUMBER_SIZE]> {
        Ok(self.read_config_zone()?.serial_number())
    }

    /// Lock state of a zone or slot
    fn is_locked(&mut self, target: LockTarget) -> CryptoAuthResult<bool> {
        let config = self.read_config_zone()?;
        Ok(match target {
            LockTarget::Config => config.is_config_locked(),
            LockTarget::Data => config.is_data_locked(),
            LockTarget::Slot(slot) if slot < SLOT_COUNT => config.is_slot_locked(slot),
            LockTarget::Slot(_) => return Err(CryptoAuthError::DEVICE_BAD_SLOT),
        })
    }
}

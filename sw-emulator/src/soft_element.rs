/*++

Licensed under the Apache-2.0 license.

File Name:

    soft_element.rs

Abstract:

    File contains the software implementation of an ATECC608 secure element.

--*/

use cryptoauth_drivers::{
    pub_key_remove_padding, ConfigZone, CryptoAuthError, CryptoAuthResult, DeviceConfig,
    DeviceType, DeviceZone, Ecc256PubKey, Ecc256Signature, LockTarget, SecureElement,
    CONFIG_ZONE_SIZE, DEFAULT_CONFIG_ZONE, DIGEST_SIZE, OTP_ZONE_SIZE, PADDED_PUB_KEY_SIZE,
    SERIAL_NUMBER_SIZE, SLOT_COUNT,
};
use rfc6979::HmacDrbg;
use sha2::Sha256;

use crate::{Ecc256, Ecc256PrivKey};

/// Config zone bytes that cannot be changed by a zone write
const READ_ONLY_CONFIG: core::ops::Range<usize> = 0..16;

/// Pending command failure
#[derive(Debug, Copy, Clone)]
struct Fault {
    /// Commands that still succeed before the fault triggers
    remaining: usize,
    error: CryptoAuthError,
}

/// Software secure element
///
/// Keys are drawn from an HMAC-DRBG seeded by the caller, so a given seed always produces the
/// same serial number and the same key sequence.
pub struct SoftSecureElement {
    device_type: DeviceType,
    config: ConfigZone,
    otp: [u8; OTP_ZONE_SIZE],
    slots: Vec<Vec<u8>>,
    keys: [Option<Ecc256PrivKey>; SLOT_COUNT as usize],
    drbg: HmacDrbg<Sha256>,
    fault: Option<Fault>,
}

impl SoftSecureElement {
    /// Create an unlocked element carrying the default slot map
    ///
    /// # Arguments
    ///
    /// * `seed` - Entropy for the serial number and every generated key
    pub fn new(seed: &[u8]) -> CryptoAuthResult<Self> {
        let mut drbg = HmacDrbg::<Sha256>::new(seed, b"cryptoauth-emu", &[]);

        let mut config = ConfigZone::from_bytes(&DEFAULT_CONFIG_ZONE)?;
        config.clear_locks();
        let mut unique = [0u8; 6];
        drbg.fill_bytes(&mut unique);
        config.sn03[2..].copy_from_slice(&unique[..2]);
        config.sn48[..4].copy_from_slice(&unique[2..]);

        let slots = (0..SLOT_COUNT)
            .map(|slot| DeviceZone::Data.size(slot).map(|size| vec![0u8; size]))
            .collect::<CryptoAuthResult<Vec<_>>>()?;

        Ok(Self {
            device_type: DeviceType::default(),
            config,
            otp: [0u8; OTP_ZONE_SIZE],
            slots,
            keys: [None; SLOT_COUNT as usize],
            drbg,
            fault: None,
        })
    }

    /// Answer as the part described by `config`
    pub fn with_config(mut self, config: &DeviceConfig) -> Self {
        log::debug!(
            "emulating {:?} on bus {} address {:#04x}",
            config.device_type,
            config.i2c_bus,
            config.i2c_address
        );
        self.device_type = config.device_type;
        self
    }

    /// Replace the factory serial number
    pub fn with_serial_number(mut self, serial_number: [u8; SERIAL_NUMBER_SIZE]) -> Self {
        self.config.sn03.copy_from_slice(&serial_number[..4]);
        self.config.sn48.copy_from_slice(&serial_number[4..]);
        self
    }

    /// Fail every command after the next `after` commands with `error`
    pub fn inject_fault(&mut self, after: usize, error: CryptoAuthError) {
        self.fault = Some(Fault {
            remaining: after,
            error,
        });
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// Write a full config zone image; serial, revision and lock bytes are kept
    pub fn write_config_zone(&mut self, image: &[u8; CONFIG_ZONE_SIZE]) -> CryptoAuthResult<()> {
        self.write_zone(DeviceZone::Config, 0, 0, image)
    }

    /// Lock the config zone
    pub fn lock_config_zone(&mut self) -> CryptoAuthResult<()> {
        self.command("lock config")?;
        if self.config.is_config_locked() {
            return Err(CryptoAuthError::LOCK_ALREADY_LOCKED);
        }
        self.config.set_config_locked();
        Ok(())
    }

    /// Lock the data and OTP zones; the config zone must be locked first
    pub fn lock_data_zone(&mut self) -> CryptoAuthResult<()> {
        self.command("lock data")?;
        if !self.config.is_config_locked() {
            return Err(CryptoAuthError::DEVICE_BAD_PARAM);
        }
        if self.config.is_data_locked() {
            return Err(CryptoAuthError::LOCK_ALREADY_LOCKED);
        }
        self.config.set_data_locked();
        Ok(())
    }

    /// Lock an individual slot; the slot must be lockable and the data zone locked
    pub fn lock_slot(&mut self, slot: u16) -> CryptoAuthResult<()> {
        self.command("lock slot")?;
        if !self.config.key_config(slot)?.lockable() || !self.config.is_data_locked() {
            return Err(CryptoAuthError::DEVICE_BAD_PARAM);
        }
        if self.config.is_slot_locked(slot) {
            return Err(CryptoAuthError::LOCK_ALREADY_LOCKED);
        }
        self.config.set_slot_locked(slot)
    }

    fn command(&mut self, name: &str) -> CryptoAuthResult<()> {
        log::trace!("secure element command: {name}");
        if let Some(fault) = self.fault.as_mut() {
            if fault.remaining == 0 {
                log::warn!("secure element command {name} failed: {}", fault.error);
                return Err(fault.error);
            }
            fault.remaining -= 1;
        }
        Ok(())
    }

    fn lock_violation(&self, error: CryptoAuthError) -> CryptoAuthError {
        log::warn!("secure element lock violation: {error}");
        error
    }

    fn private_key(&self, slot: u16) -> CryptoAuthResult<&Ecc256PrivKey> {
        self.keys
            .get(usize::from(slot))
            .ok_or(CryptoAuthError::DEVICE_BAD_SLOT)?
            .as_ref()
            .ok_or(CryptoAuthError::DEVICE_NO_KEY)
    }

    fn write_config(&mut self, offset: usize, data: &[u8]) -> CryptoAuthResult<()> {
        if self.config.is_config_locked() {
            return Err(self.lock_violation(CryptoAuthError::LOCK_CONFIG_ZONE_LOCKED));
        }
        let mut image = self.config.to_bytes();
        for (pos, byte) in (offset..).zip(data) {
            if !READ_ONLY_CONFIG.contains(&pos) && !ConfigZone::LOCK_BYTES.contains(&pos) {
                image[pos] = *byte;
            }
        }
        self.config = ConfigZone::from_bytes(&image)?;
        Ok(())
    }

    fn stored_public_key(&self, slot: u16) -> CryptoAuthResult<Ecc256PubKey> {
        if !self.config.key_config(slot)?.is_p256_public() {
            return Err(CryptoAuthError::DEVICE_BAD_PARAM);
        }
        let padded: &[u8; PADDED_PUB_KEY_SIZE] = self.slots[usize::from(slot)]
            .as_slice()
            .try_into()
            .map_err(|_| CryptoAuthError::DEVICE_BAD_PARAM)?;
        Ok(pub_key_remove_padding(padded))
    }

    fn write_slot(&mut self, slot: u16, offset: usize, data: &[u8]) -> CryptoAuthResult<()> {
        if self.config.key_config(slot)?.private() {
            return Err(CryptoAuthError::DEVICE_ACCESS_DENIED);
        }
        if self.config.is_data_locked() {
            if self.config.is_slot_locked(slot) {
                return Err(self.lock_violation(CryptoAuthError::LOCK_SLOT_LOCKED));
            }
            if !self.config.slot_config(slot)?.write_always() {
                return Err(self.lock_violation(CryptoAuthError::LOCK_DATA_ZONE_LOCKED));
            }
        }
        let buf = &mut self.slots[usize::from(slot)];
        buf[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}

impl SecureElement for SoftSecureElement {
    fn device_type(&mut self) -> CryptoAuthResult<DeviceType> {
        self.command("info")?;
        Ok(self.device_type)
    }

    fn read_zone(
        &mut self,
        zone: DeviceZone,
        slot: u16,
        offset: u32,
        count: u32,
    ) -> CryptoAuthResult<Vec<u8>> {
        self.command("read")?;
        zone.check_range(slot, offset, count)?;
        let range = offset as usize..(offset + count) as usize;
        match zone {
            DeviceZone::Config => Ok(self.config.to_bytes()[range].to_vec()),
            DeviceZone::Otp => Ok(self.otp[range].to_vec()),
            DeviceZone::Data => {
                let slot_config = self.config.slot_config(slot)?;
                if self.config.key_config(slot)?.private()
                    || slot_config.is_secret()
                    || slot_config.encrypt_read()
                {
                    return Err(CryptoAuthError::DEVICE_ACCESS_DENIED);
                }
                Ok(self.slots[usize::from(slot)][range].to_vec())
            }
            DeviceZone::None => Err(CryptoAuthError::DEVICE_BAD_ZONE),
        }
    }

    fn write_zone(
        &mut self,
        zone: DeviceZone,
        slot: u16,
        offset: u32,
        data: &[u8],
    ) -> CryptoAuthResult<()> {
        self.command("write")?;
        let count = u32::try_from(data.len())
            .map_err(|_| CryptoAuthError::DEVICE_WRITE_OUT_OF_RANGE)?;
        zone.check_range(slot, offset, count).map_err(|err| {
            if err == CryptoAuthError::DEVICE_READ_OUT_OF_RANGE {
                CryptoAuthError::DEVICE_WRITE_OUT_OF_RANGE
            } else {
                err
            }
        })?;
        let offset = offset as usize;
        match zone {
            DeviceZone::Config => self.write_config(offset, data),
            DeviceZone::Otp => {
                if self.config.is_data_locked() {
                    return Err(self.lock_violation(CryptoAuthError::LOCK_DATA_ZONE_LOCKED));
                }
                self.otp[offset..offset + data.len()].copy_from_slice(data);
                Ok(())
            }
            DeviceZone::Data => self.write_slot(slot, offset, data),
            DeviceZone::None => Err(CryptoAuthError::DEVICE_BAD_ZONE),
        }
    }

    fn gen_private_key(&mut self, slot: u16) -> CryptoAuthResult<Ecc256PubKey> {
        self.command("genkey private")?;
        if !self.config.key_config(slot)?.is_p256_private() {
            return Err(CryptoAuthError::DEVICE_BAD_PARAM);
        }
        if self.config.is_data_locked() {
            if self.config.is_slot_locked(slot) {
                return Err(self.lock_violation(CryptoAuthError::LOCK_SLOT_LOCKED));
            }
            if !self.config.slot_config(slot)?.gen_key_enabled() {
                return Err(self.lock_violation(CryptoAuthError::LOCK_KEY_REGEN_DENIED));
            }
        }
        let (priv_key, pub_key) = Ecc256::gen_key_pair(&mut self.drbg)?;
        self.keys[usize::from(slot)] = Some(priv_key);
        log::debug!("generated private key in slot {slot}");
        Ok(pub_key)
    }

    fn gen_public_key(&mut self, slot: u16) -> CryptoAuthResult<Ecc256PubKey> {
        self.command("genkey public")?;
        Ecc256::public_key(self.private_key(slot)?)
    }

    fn sign(
        &mut self,
        slot: u16,
        digest: &[u8; DIGEST_SIZE],
    ) -> CryptoAuthResult<Ecc256Signature> {
        self.command("sign")?;
        Ecc256::sign(self.private_key(slot)?, digest)
    }

    fn verify_extern(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        public_key: &Ecc256PubKey,
    ) -> CryptoAuthResult<bool> {
        self.command("verify extern")?;
        Ok(Ecc256::verify(public_key, digest, signature))
    }

    fn verify_stored(
        &mut self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        slot: u16,
    ) -> CryptoAuthResult<bool> {
        self.command("verify stored")?;
        let public_key = self.stored_public_key(slot)?;
        Ok(Ecc256::verify(&public_key, digest, signature))
    }

    fn is_locked(&mut self, target: LockTarget) -> CryptoAuthResult<bool> {
        self.command("lock state")?;
        Ok(match target {
            LockTarget::Config => self.config.is_config_locked(),
            LockTarget::Data => self.config.is_data_locked(),
            LockTarget::Slot(slot) if slot < SLOT_COUNT => self.config.is_slot_locked(slot),
            LockTarget::Slot(_) => return Err(CryptoAuthError::DEVICE_BAD_SLOT),
        })
    }
}

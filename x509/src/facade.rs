/*++

Licensed under the Apache-2.0 license.

File Name:

    facade.rs

Abstract:

    Thread-safe host interface to a secure element carrying the signer and device certificates.

--*/

use cryptoauth_drivers::{
    ConfigZone, CryptoAuthResult, DeviceConfig, DeviceSession, DeviceType, Ecc256PubKey,
    Ecc256Signature, LockTarget, SecureElement, DIGEST_SIZE, SERIAL_NUMBER_SIZE,
};

use crate::cert_def::StdCertElement;
use crate::chain::verify_chain;
use crate::error::{CertError, CertField, ChainError, ChainStatus};
use crate::locator::get_subject_public_key;
use crate::reconstruct::reconstruct;
use crate::root_ca::ROOT_PUBLIC_KEY;
use crate::{DEVICE_CERT_DEF, SIGNER_CERT_DEF};

/// Host handle to one secure element
///
/// Every method is a single exclusive section on the element, so a handle can be shared
/// between threads.
pub struct CryptoAuth<E: SecureElement> {
    session: DeviceSession<E>,
    config: DeviceConfig,
    root_public_key: Ecc256PubKey,
}

impl<E: SecureElement> CryptoAuth<E> {
    /// Wrap an element reached through `config`
    pub fn new(element: E, config: DeviceConfig) -> Self {
        log::debug!(
            "{} on bus {} address {:#04x}",
            config.device_type.name(),
            config.i2c_bus,
            config.i2c_address
        );
        Self {
            session: DeviceSession::new(element),
            config,
            root_public_key: ROOT_PUBLIC_KEY,
        }
    }

    /// Trust `root_public_key` instead of the embedded root CA key
    pub fn with_root_public_key(mut self, root_public_key: Ecc256PubKey) -> Self {
        self.root_public_key = root_public_key;
        self
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn root_public_key(&self) -> &Ecc256PubKey {
        &self.root_public_key
    }

    /// Model reported by the element
    pub fn device_info(&self) -> CryptoAuthResult<DeviceType> {
        let device_type = self.session.exclusive(|se| se.device_type())?;
        if device_type != self.config.device_type {
            log::warn!(
                "configured for {} but found {}",
                self.config.device_type.name(),
                device_type.name()
            );
        }
        Ok(device_type)
    }

    pub fn config_locked(&self) -> CryptoAuthResult<bool> {
        self.session.exclusive(|se| se.is_locked(LockTarget::Config))
    }

    pub fn data_locked(&self) -> CryptoAuthResult<bool> {
        self.session.exclusive(|se| se.is_locked(LockTarget::Data))
    }

    pub fn slot_locked(&self, slot: u16) -> CryptoAuthResult<bool> {
        self.session.exclusive(|se| se.is_locked(LockTarget::Slot(slot)))
    }

    pub fn serial_number(&self) -> CryptoAuthResult<[u8; SERIAL_NUMBER_SIZE]> {
        self.session.exclusive(|se| se.serial_number())
    }

    /// Parsed config zone
    pub fn read_config(&self) -> CryptoAuthResult<ConfigZone> {
        self.session.exclusive(|se| se.read_config_zone())
    }

    /// Replace the private key in `slot`, returning the new public key
    pub fn gen_private_key(&self, slot: u16) -> CryptoAuthResult<Ecc256PubKey> {
        self.session.exclusive(|se| se.gen_private_key(slot))
    }

    pub fn gen_public_key(&self, slot: u16) -> CryptoAuthResult<Ecc256PubKey> {
        self.session.exclusive(|se| se.gen_public_key(slot))
    }

    pub fn sign(&self, slot: u16, digest: &[u8; DIGEST_SIZE]) -> CryptoAuthResult<Ecc256Signature> {
        self.session.exclusive(|se| se.sign(slot, digest))
    }

    pub fn verify_extern(
        &self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        public_key: &Ecc256PubKey,
    ) -> CryptoAuthResult<bool> {
        self.session
            .exclusive(|se| se.verify_extern(digest, signature, public_key))
    }

    /// Verify against the public key held in `slot`, e.g. the signer key in slot 11
    pub fn verify_stored(
        &self,
        digest: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
        slot: u16,
    ) -> CryptoAuthResult<bool> {
        self.session
            .exclusive(|se| se.verify_stored(digest, signature, slot))
    }

    /// Reconstruct the signer certificate issued by the trusted root
    pub fn read_signer_cert(&self) -> Result<Vec<u8>, CertError> {
        self.session
            .exclusive(|se| reconstruct(se, &SIGNER_CERT_DEF, &self.root_public_key))
    }

    /// Reconstruct the device certificate issued by the key of `signer_cert`
    pub fn read_device_cert(&self, signer_cert: &[u8]) -> Result<Vec<u8>, CertError> {
        let signer_key = get_subject_public_key(&SIGNER_CERT_DEF, signer_cert)
            .map_err(|code| CertError::new(CertField::Std(StdCertElement::PublicKey), code))?;
        self.session
            .exclusive(|se| reconstruct(se, &DEVICE_CERT_DEF, &signer_key))
    }

    /// Verify `device_cert` through the signer certificate up to the trusted root
    pub fn verify_device_chain(&self, device_cert: &[u8]) -> Result<ChainStatus, ChainError> {
        self.session.exclusive(|se| {
            verify_chain(se, &DEVICE_CERT_DEF, device_cert, &self.root_public_key)
        })
    }

    /// Release the element
    pub fn into_inner(self) -> CryptoAuthResult<E> {
        self.session.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{provision_signer, signer_element, test_root_key, SIGNER_KEY_SLOT};
    use crate::SIGNER_CERT_TEMPLATE;
    use cryptoauth_drivers::CryptoAuthError;
    use cryptoauth_emu::SoftSecureElement;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_reference_signer_through_facade() {
        let auth = CryptoAuth::new(signer_element(), DeviceConfig::default());
        assert_eq!(auth.read_signer_cert().unwrap(), SIGNER_CERT_TEMPLATE.to_vec());
        assert_eq!(auth.device_info(), Ok(DeviceType::Atecc608b));
        assert_eq!(auth.config_locked(), Ok(false));
        assert_eq!(auth.data_locked(), Ok(false));
        assert_eq!(auth.slot_locked(16), Err(CryptoAuthError::DEVICE_BAD_SLOT));
        assert_eq!(auth.read_config().unwrap().serial_number(), auth.serial_number().unwrap());
    }

    #[test]
    fn test_device_cert_requires_signer_cert() {
        let auth = CryptoAuth::new(signer_element(), DeviceConfig::default());
        assert_eq!(
            auth.read_device_cert(&SIGNER_CERT_TEMPLATE[..100]),
            Err(CertError::new(
                CertField::Std(StdCertElement::PublicKey),
                CryptoAuthError::FORMAT_CERT_TOO_SHORT
            ))
        );
    }

    #[test]
    fn test_keys_and_signatures() {
        let auth = CryptoAuth::new(
            SoftSecureElement::new(&[0x33; 32]).unwrap(),
            DeviceConfig::default(),
        );
        let public_key = auth.gen_private_key(0).unwrap();
        assert_eq!(auth.gen_public_key(0), Ok(public_key));

        let digest = [0xA5; DIGEST_SIZE];
        let signature = auth.sign(0, &digest).unwrap();
        assert_eq!(auth.verify_extern(&digest, &signature, &public_key), Ok(true));
        assert_eq!(
            auth.verify_extern(&[0x5A; DIGEST_SIZE], &signature, &public_key),
            Ok(false)
        );
    }

    #[test]
    fn test_verify_with_stored_signer_key() {
        let mut se = SoftSecureElement::new(&[0x55; 32]).unwrap();
        provision_signer(&mut se, 0x0B2C);
        let auth = CryptoAuth::new(se, DeviceConfig::default());

        let digest = [0x3C; DIGEST_SIZE];
        let signature = auth.sign(SIGNER_KEY_SLOT, &digest).unwrap();
        assert_eq!(auth.verify_stored(&digest, &signature, 11), Ok(true));
        assert_eq!(
            auth.verify_stored(&[0xC3; DIGEST_SIZE], &signature, 11),
            Ok(false)
        );
        assert_eq!(auth.verify_stored(&digest, &signature, 13), Ok(false));
        assert_eq!(
            auth.verify_stored(&digest, &signature, SIGNER_KEY_SLOT),
            Err(CryptoAuthError::DEVICE_BAD_PARAM)
        );
    }

    #[test]
    fn test_shared_between_threads() {
        let mut se = SoftSecureElement::new(&[0x44; 32]).unwrap();
        provision_signer(&mut se, 0x0A1B);
        let root_key = test_root_key(&mut se);
        let auth = Arc::new(
            CryptoAuth::new(se, DeviceConfig::default()).with_root_public_key(root_key),
        );
        let expected = auth.read_signer_cert().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let auth = auth.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|_| auth.read_signer_cert().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            for cert in handle.join().unwrap() {
                assert_eq!(cert, expected);
            }
        }
    }
}

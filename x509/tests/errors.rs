// Licensed under the Apache-2.0 license

mod common;

use common::{provision, reference_signer_element, SIGNER_SLOT};
use cryptoauth_drivers::{CryptoAuthError, DeviceConfig, DeviceZone, ErrorKind, SecureElement};
use cryptoauth_x509::{
    reconstruct, verify_chain, CertError, CertField, CertificateDefinition, ChainStatus,
    CryptoAuth, DeviceLocation, StdCertElement, DEVICE_CERT_DEF, ROOT_PUBLIC_KEY,
    SIGNER_CERT_DEF,
};

#[test]
fn test_locked_element_still_reconstructs() {
    let mut p = provision(0x81);
    let device_cert = p.device_cert();
    p.se.lock_config_zone().unwrap();
    p.se.lock_data_zone().unwrap();
    p.se.lock_slot(SIGNER_SLOT).unwrap();
    p.se.lock_slot(12).unwrap();

    let err = p.se.gen_private_key(SIGNER_SLOT).unwrap_err();
    assert_eq!(err, CryptoAuthError::LOCK_SLOT_LOCKED);
    assert_eq!(err.kind(), ErrorKind::Locked);

    // the signer compressed certificate slot is writable until locked on its own
    let err = p.se.write_zone(DeviceZone::Data, 12, 0, &[0; 72]).unwrap_err();
    assert_eq!(err, CryptoAuthError::LOCK_SLOT_LOCKED);
    assert_eq!(err.kind(), ErrorKind::Locked);

    assert_eq!(p.device_cert(), device_cert);
    let root_key = p.root_key;
    assert_eq!(
        verify_chain(&mut p.se, &DEVICE_CERT_DEF, &device_cert, &root_key),
        Ok(ChainStatus::Valid)
    );
}

#[test]
fn test_unreadable_comp_cert_location() {
    // slot 0 holds a private key and never reads back
    let def = CertificateDefinition {
        comp_cert_dev_loc: DeviceLocation::data(0, 0, 72),
        ..SIGNER_CERT_DEF.clone()
    };
    let mut se = reference_signer_element();
    let err = reconstruct(&mut se, &def, &ROOT_PUBLIC_KEY).unwrap_err();
    assert_eq!(err.field, CertField::CompCert);
    assert_eq!(err.code.kind(), ErrorKind::StorageRead);
}

#[test]
fn test_definition_bounds_checked_before_device_access() {
    let def = CertificateDefinition {
        public_key_dev_loc: DeviceLocation::data(8, 400, 72),
        ..SIGNER_CERT_DEF.clone()
    };
    let mut se = reference_signer_element();
    // nothing reaches the element
    se.inject_fault(0, CryptoAuthError::DEVICE_TIMEOUT);
    assert_eq!(
        reconstruct(&mut se, &def, &ROOT_PUBLIC_KEY),
        Err(CertError::new(
            CertField::Std(StdCertElement::PublicKey),
            CryptoAuthError::DEVICE_READ_OUT_OF_RANGE
        ))
    );
}

#[test]
fn test_facade_reports_device_errors() {
    let mut se = reference_signer_element();
    se.inject_fault(0, CryptoAuthError::DEVICE_COMM_FAILURE);
    let auth = CryptoAuth::new(se, DeviceConfig::default());
    assert_eq!(auth.device_info(), Err(CryptoAuthError::DEVICE_COMM_FAILURE));
    assert_eq!(
        auth.read_signer_cert(),
        Err(CertError::new(
            CertField::CompCert,
            CryptoAuthError::DEVICE_COMM_FAILURE
        ))
    );
}

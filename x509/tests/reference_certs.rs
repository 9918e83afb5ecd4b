// Licensed under the Apache-2.0 license

mod common;

use common::{reference_device_def, reference_device_element, reference_signer_element};
use cryptoauth_drivers::{CryptoAuthError, DeviceConfig};
use cryptoauth_x509::{
    custom_cert_loc, get_cert_element, get_subject_public_key, reconstruct, CertError, CertField,
    CryptoAuth, StdCertElement, DEVICE_CERT_DEF, DEVICE_CERT_TEMPLATE, ROOT_PUBLIC_KEY,
    SIGNER_CERT_DEF, SIGNER_CERT_TEMPLATE,
};

#[test]
fn test_signer_template_reproduced() {
    let mut se = reference_signer_element();
    let cert = reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY).unwrap();
    assert_eq!(cert.as_slice(), SIGNER_CERT_TEMPLATE.as_slice());

    // no state carried between calls
    assert_eq!(
        reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY).unwrap(),
        cert
    );
}

#[test]
fn test_device_template_reproduced() {
    let signer_key = get_subject_public_key(&SIGNER_CERT_DEF, &SIGNER_CERT_TEMPLATE).unwrap();
    let mut se = reference_device_element();
    let cert = reconstruct(&mut se, &reference_device_def(), &signer_key).unwrap();
    assert_eq!(cert.as_slice(), DEVICE_CERT_TEMPLATE.as_slice());

    let sn03 = custom_cert_loc(&DEVICE_CERT_DEF, "SN03").unwrap();
    let sn48 = custom_cert_loc(&DEVICE_CERT_DEF, "SN48").unwrap();
    assert_eq!(get_cert_element(&cert, &sn03), Ok(b"01230102".as_slice()));
    assert_eq!(get_cert_element(&cert, &sn48), Ok(b"0304050601".as_slice()));
}

#[test]
fn test_device_serial_number_reaches_subject() {
    let signer_key = get_subject_public_key(&SIGNER_CERT_DEF, &SIGNER_CERT_TEMPLATE).unwrap();
    let mut se = reference_device_element().with_serial_number([
        0x01, 0x23, 0xAB, 0xCD, 0xEF, 0x00, 0x11, 0x22, 0xEE,
    ]);
    let cert = reconstruct(&mut se, &reference_device_def(), &signer_key).unwrap();
    assert_eq!(&cert[206..226], b"sn0123ABCDEF001122EE");
    assert_eq!(&cert[..206], &DEVICE_CERT_TEMPLATE[..206]);
    assert_eq!(&cert[226..], &DEVICE_CERT_TEMPLATE[226..]);
}

#[test]
fn test_device_cert_without_key_fails() {
    // slot 0 of a fresh element has no private key to derive the public key from
    let signer_key = get_subject_public_key(&SIGNER_CERT_DEF, &SIGNER_CERT_TEMPLATE).unwrap();
    let mut se = reference_device_element();
    assert_eq!(
        reconstruct(&mut se, &DEVICE_CERT_DEF, &signer_key),
        Err(CertError::new(
            CertField::Std(StdCertElement::PublicKey),
            CryptoAuthError::DEVICE_NO_KEY
        ))
    );
}

#[test]
fn test_signer_through_facade() {
    let auth = CryptoAuth::new(reference_signer_element(), DeviceConfig::default());
    let cert = auth.read_signer_cert().unwrap();
    assert_eq!(cert.as_slice(), SIGNER_CERT_TEMPLATE.as_slice());
    assert_eq!(auth.root_public_key(), &ROOT_PUBLIC_KEY);
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    test_util.rs

Abstract:

    Software elements provisioned with compressed certificates for unit tests.

--*/

use cryptoauth_drivers::{
    pub_key_add_padding, DeviceZone, Ecc256PubKey, Ecc256Signature, SecureElement,
};
use cryptoauth_emu::SoftSecureElement;
use time::macros::datetime;

use crate::comp_cert::CompressedCert;
use crate::locator::get_tbs_digest;
use crate::reconstruct::reconstruct;
use crate::{SIGNER_CERT_DEF, SIGNER_CERT_TEMPLATE};

/// Private key slot standing in for the root CA
pub const TEST_ROOT_SLOT: u16 = 3;

/// Private key slot holding the signer key
pub const SIGNER_KEY_SLOT: u16 = 2;

/// Compressed form of the reference signer certificate
pub const SIGNER_COMP_CERT: &str = "\
    c507b82a7bf9a33a1b78dceb01c926929ef3783d468e69a284d36abab9251bef\
    0e6d7f768d65a749fa712dda2b692535cd577d650196a3d2bf3b22788e754186\
    95a09fffff10a000";

/// Element holding the reference signer public key and compressed certificate
pub fn signer_element() -> SoftSecureElement {
    let mut se = SoftSecureElement::new(&[0x5A; 32]).unwrap();
    let public_key = Ecc256PubKey::try_from(&SIGNER_CERT_TEMPLATE[266..330]).unwrap();
    se.write_zone(DeviceZone::Data, 11, 0, &pub_key_add_padding(&public_key))
        .unwrap();
    se.write_zone(DeviceZone::Data, 12, 0, &hex::decode(SIGNER_COMP_CERT).unwrap())
        .unwrap();
    se
}

pub fn test_root_key(se: &mut SoftSecureElement) -> Ecc256PubKey {
    se.gen_public_key(TEST_ROOT_SLOT).unwrap()
}

/// Provision a signer certificate issued on 2021-03-04 05:00 and signed by a fresh test root
///
/// Returns the signer public key; the root key is available through [`test_root_key`].
pub fn provision_signer(se: &mut SoftSecureElement, signer_id: u16) -> Ecc256PubKey {
    let root_key = se.gen_private_key(TEST_ROOT_SLOT).unwrap();
    let signer_key = se.gen_private_key(SIGNER_KEY_SLOT).unwrap();
    se.write_zone(DeviceZone::Data, 11, 0, &pub_key_add_padding(&signer_key))
        .unwrap();

    let mut comp_cert = CompressedCert::new(
        &SIGNER_CERT_DEF,
        Ecc256Signature::default(),
        &datetime!(2021-03-04 05:00:00),
        signer_id,
    )
    .unwrap();
    se.write_zone(DeviceZone::Data, 12, 0, &comp_cert.to_bytes())
        .unwrap();

    let unsigned = reconstruct(se, &SIGNER_CERT_DEF, &root_key).unwrap();
    let digest = get_tbs_digest(&SIGNER_CERT_DEF, &unsigned).unwrap();
    comp_cert.signature = se.sign(TEST_ROOT_SLOT, &digest).unwrap();
    se.write_zone(DeviceZone::Data, 12, 0, &comp_cert.to_bytes())
        .unwrap();
    signer_key
}

// Licensed under the Apache-2.0 license

#![allow(dead_code)]

use cryptoauth_drivers::{
    pub_key_add_padding, DeviceZone, Ecc256PubKey, Ecc256Signature, SecureElement,
};
use cryptoauth_emu::SoftSecureElement;
use cryptoauth_x509::{
    get_tbs_digest, reconstruct, CertificateDefinition, CompressedCert, DeviceLocation,
    DEVICE_CERT_DEF, DEVICE_CERT_TEMPLATE, SIGNER_CERT_DEF, SIGNER_CERT_TEMPLATE,
};
use time::macros::datetime;
use time::PrimitiveDateTime;

/// Private key slot standing in for the root CA
pub const ROOT_SLOT: u16 = 3;
pub const SIGNER_SLOT: u16 = 2;
pub const DEVICE_SLOT: u16 = 0;

pub const SIGNER_ID: u16 = 0x0A1B;
pub const SIGNER_ISSUED: PrimitiveDateTime = datetime!(2021-03-04 05:00:00);
pub const DEVICE_ISSUED: PrimitiveDateTime = datetime!(2023-07-19 13:00:00);

/// Serial number printed in the reference device template
pub const REFERENCE_DEVICE_SN: [u8; 9] = [0x01, 0x23, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x01];

const SIGNER_COMP_CERT: &str = "c507b82a7bf9a33a1b78dceb01c926929ef3783d468e69a284d36abab9251bef\
    0e6d7f768d65a749fa712dda2b692535cd577d650196a3d2bf3b22788e754186\
    95a09fffff10a000";

/// Element holding a complete root -> signer -> device chain
pub struct Provisioned {
    pub se: SoftSecureElement,
    pub root_key: Ecc256PubKey,
    pub signer_key: Ecc256PubKey,
    pub device_key: Ecc256PubKey,
}

impl Provisioned {
    pub fn signer_cert(&mut self) -> Vec<u8> {
        reconstruct(&mut self.se, &SIGNER_CERT_DEF, &self.root_key).unwrap()
    }

    pub fn device_cert(&mut self) -> Vec<u8> {
        reconstruct(&mut self.se, &DEVICE_CERT_DEF, &self.signer_key).unwrap()
    }
}

fn write_comp_cert(se: &mut SoftSecureElement, def: &CertificateDefinition, comp: &CompressedCert) {
    let loc = def.comp_cert_dev_loc;
    se.write_zone(loc.zone, loc.slot, u32::from(loc.offset), &comp.to_bytes())
        .unwrap();
}

/// Store the compressed certificate of `def`, signed by the private key in `issuer_slot`
pub fn issue(
    se: &mut SoftSecureElement,
    def: &CertificateDefinition,
    issuer_slot: u16,
    issuer_key: &Ecc256PubKey,
    issued: &PrimitiveDateTime,
) {
    let mut comp = CompressedCert::new(def, Ecc256Signature::default(), issued, SIGNER_ID).unwrap();
    write_comp_cert(se, def, &comp);
    let unsigned = reconstruct(se, def, issuer_key).unwrap();
    let digest = get_tbs_digest(def, &unsigned).unwrap();
    comp.signature = se.sign(issuer_slot, &digest).unwrap();
    write_comp_cert(se, def, &comp);
}

pub fn provision(seed: u8) -> Provisioned {
    let mut se = SoftSecureElement::new(&[seed; 32]).unwrap();
    let root_key = se.gen_private_key(ROOT_SLOT).unwrap();
    let signer_key = se.gen_private_key(SIGNER_SLOT).unwrap();
    let device_key = se.gen_private_key(DEVICE_SLOT).unwrap();
    se.write_zone(DeviceZone::Data, 11, 0, &pub_key_add_padding(&signer_key))
        .unwrap();

    issue(&mut se, &SIGNER_CERT_DEF, ROOT_SLOT, &root_key, &SIGNER_ISSUED);
    issue(&mut se, &DEVICE_CERT_DEF, SIGNER_SLOT, &signer_key, &DEVICE_ISSUED);

    Provisioned {
        se,
        root_key,
        signer_key,
        device_key,
    }
}

/// Element holding the reference signer public key and compressed certificate
pub fn reference_signer_element() -> SoftSecureElement {
    let mut se = SoftSecureElement::new(&[0x5A; 32]).unwrap();
    let signer_key = Ecc256PubKey::try_from(&SIGNER_CERT_TEMPLATE[266..330]).unwrap();
    se.write_zone(DeviceZone::Data, 11, 0, &pub_key_add_padding(&signer_key))
        .unwrap();
    se.write_zone(DeviceZone::Data, 12, 0, &hex::decode(SIGNER_COMP_CERT).unwrap())
        .unwrap();
    se
}

/// Device definition reading its public key from slot 13
///
/// The reference device private key is unknown, so the key cannot come from GenKey.
pub fn reference_device_def() -> CertificateDefinition {
    CertificateDefinition {
        public_key_dev_loc: DeviceLocation::data(13, 0, 72),
        ..DEVICE_CERT_DEF.clone()
    }
}

/// Element holding the values of the reference device certificate
pub fn reference_device_element() -> SoftSecureElement {
    let mut se = SoftSecureElement::new(&[0x5A; 32])
        .unwrap()
        .with_serial_number(REFERENCE_DEVICE_SN);
    let device_key = Ecc256PubKey::try_from(&DEVICE_CERT_TEMPLATE[253..317]).unwrap();
    se.write_zone(DeviceZone::Data, 13, 0, &pub_key_add_padding(&device_key))
        .unwrap();

    let mut comp = [0u8; 72];
    comp[..32].copy_from_slice(&DEVICE_CERT_TEMPLATE[434..466]);
    comp[32..64].copy_from_slice(&DEVICE_CERT_TEMPLATE[468..500]);
    // 2018-11-08 05h, 28 years, signer FFFF, template 3, public key hash serial
    comp[64..].copy_from_slice(&[0x95, 0xA0, 0xBC, 0xFF, 0xFF, 0x30, 0xA0, 0x00]);
    se.write_zone(DeviceZone::Data, 10, 0, &comp).unwrap();
    se
}

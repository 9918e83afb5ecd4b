/*++

Licensed under the Apache-2.0 license.

File Name:

    signer_cert.rs

Abstract:

    Definition of the signer certificate (template 1), issued by the root CA.

--*/

use crate::cert_def::{
    CertElement, CertLocation, CertType, CertificateDefinition, DeviceLocation, SnSource,
};
use crate::date::DateFormat;

/// Signer certificate template; every dynamic field holds the reference signer values
pub static SIGNER_CERT_TEMPLATE: [u8; 520] = [
    0x30, 0x82, 0x02, 0x04, 0x30, 0x82, 0x01, 0xAA, 0xA0, 0x03, 0x02, 0x01, 0x02, 0x02, 0x10, 0x44,
    0x0E, 0xE4, 0x17, 0x0C, 0xB5, 0x45, 0xCE, 0x59, 0x69, 0x8E, 0x30, 0x56, 0x99, 0x0A, 0x5D, 0x30,
    0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02, 0x30, 0x4F, 0x31, 0x21, 0x30,
    0x1F, 0x06, 0x03, 0x55, 0x04, 0x0A, 0x0C, 0x18, 0x4D, 0x69, 0x63, 0x72, 0x6F, 0x63, 0x68, 0x69,
    0x70, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6E, 0x6F, 0x6C, 0x6F, 0x67, 0x79, 0x20, 0x49, 0x6E, 0x63,
    0x31, 0x2A, 0x30, 0x28, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0C, 0x21, 0x43, 0x72, 0x79, 0x70, 0x74,
    0x6F, 0x20, 0x41, 0x75, 0x74, 0x68, 0x65, 0x6E, 0x74, 0x69, 0x63, 0x61, 0x74, 0x69, 0x6F, 0x6E,
    0x20, 0x52, 0x6F, 0x6F, 0x74, 0x20, 0x43, 0x41, 0x20, 0x30, 0x30, 0x32, 0x30, 0x20, 0x17, 0x0D,
    0x31, 0x38, 0x31, 0x31, 0x30, 0x38, 0x30, 0x34, 0x30, 0x30, 0x30, 0x30, 0x5A, 0x18, 0x0F, 0x32,
    0x30, 0x34, 0x39, 0x31, 0x31, 0x30, 0x38, 0x30, 0x34, 0x30, 0x30, 0x30, 0x30, 0x5A, 0x30, 0x4F,
    0x31, 0x21, 0x30, 0x1F, 0x06, 0x03, 0x55, 0x04, 0x0A, 0x0C, 0x18, 0x4D, 0x69, 0x63, 0x72, 0x6F,
    0x63, 0x68, 0x69, 0x70, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6E, 0x6F, 0x6C, 0x6F, 0x67, 0x79, 0x20,
    0x49, 0x6E, 0x63, 0x31, 0x2A, 0x30, 0x28, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0C, 0x21, 0x43, 0x72,
    0x79, 0x70, 0x74, 0x6F, 0x20, 0x41, 0x75, 0x74, 0x68, 0x65, 0x6E, 0x74, 0x69, 0x63, 0x61, 0x74,
    0x69, 0x6F, 0x6E, 0x20, 0x53, 0x69, 0x67, 0x6E, 0x65, 0x72, 0x20, 0x46, 0x46, 0x46, 0x46, 0x30,
    0x59, 0x30, 0x13, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x08, 0x2A, 0x86,
    0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00, 0x04, 0x84, 0x98, 0x44, 0x0A, 0x31, 0x9B,
    0x3F, 0x71, 0xE2, 0x5D, 0x52, 0x26, 0x00, 0x90, 0x00, 0xC7, 0x56, 0xBD, 0x5C, 0x0F, 0xAE, 0x4A,
    0x1B, 0x84, 0x1A, 0xD4, 0xA3, 0x3F, 0x21, 0xAB, 0xA0, 0x9A, 0x48, 0x10, 0x1C, 0x75, 0xC8, 0x28,
    0x24, 0x90, 0xB3, 0xB6, 0x5A, 0x52, 0x80, 0x27, 0x29, 0xBD, 0x3A, 0x75, 0x2C, 0x3D, 0xF0, 0xDD,
    0x1B, 0x04, 0xA2, 0xA1, 0xB5, 0x7E, 0x0C, 0x92, 0x24, 0x47, 0xA3, 0x66, 0x30, 0x64, 0x30, 0x0E,
    0x06, 0x03, 0x55, 0x1D, 0x0F, 0x01, 0x01, 0xFF, 0x04, 0x04, 0x03, 0x02, 0x01, 0x86, 0x30, 0x12,
    0x06, 0x03, 0x55, 0x1D, 0x13, 0x01, 0x01, 0xFF, 0x04, 0x08, 0x30, 0x06, 0x01, 0x01, 0xFF, 0x02,
    0x01, 0x00, 0x30, 0x1D, 0x06, 0x03, 0x55, 0x1D, 0x0E, 0x04, 0x16, 0x04, 0x14, 0xBC, 0xD4, 0xFD,
    0xE8, 0x80, 0x8A, 0x2D, 0xC9, 0x0B, 0x6D, 0x01, 0xA8, 0xC5, 0xB9, 0xB2, 0x47, 0x33, 0x7E, 0xBD,
    0xDA, 0x30, 0x1F, 0x06, 0x03, 0x55, 0x1D, 0x23, 0x04, 0x18, 0x30, 0x16, 0x80, 0x14, 0x7A, 0xED,
    0x7D, 0x6D, 0xC6, 0xB7, 0x78, 0x9D, 0xB2, 0x38, 0x01, 0xA5, 0xE8, 0x4A, 0x8C, 0xB0, 0xA4, 0x0E,
    0x2A, 0x8C, 0x30, 0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02, 0x03, 0x48,
    0x00, 0x30, 0x45, 0x02, 0x21, 0x00, 0xC5, 0x07, 0xB8, 0x2A, 0x7B, 0xF9, 0xA3, 0x3A, 0x1B, 0x78,
    0xDC, 0xEB, 0x01, 0xC9, 0x26, 0x92, 0x9E, 0xF3, 0x78, 0x3D, 0x46, 0x8E, 0x69, 0xA2, 0x84, 0xD3,
    0x6A, 0xBA, 0xB9, 0x25, 0x1B, 0xEF, 0x02, 0x20, 0x0E, 0x6D, 0x7F, 0x76, 0x8D, 0x65, 0xA7, 0x49,
    0xFA, 0x71, 0x2D, 0xDA, 0x2B, 0x69, 0x25, 0x35, 0xCD, 0x57, 0x7D, 0x65, 0x01, 0x96, 0xA3, 0xD2,
    0xBF, 0x3B, 0x22, 0x78, 0x8E, 0x75, 0x41, 0x86,
];

/// Custom elements of the signer certificate
///
/// The subject name is template text and never patched.
pub static SIGNER_CERT_ELEMENTS: [CertElement; 1] = [CertElement {
    id: "subject",
    device_loc: DeviceLocation::NONE,
    cert_loc: CertLocation::new(158, 81),
    transforms: &[],
}];

pub static SIGNER_CERT_DEF: CertificateDefinition = CertificateDefinition {
    cert_type: CertType::X509,
    template_id: 1,
    chain_id: 0,
    private_key_slot: 0,
    sn_source: SnSource::PubKeyHash,
    cert_sn_dev_loc: DeviceLocation::NONE,
    issue_date_format: DateFormat::Rfc5280Utc,
    expire_date_format: DateFormat::Rfc5280Gen,
    tbs_cert_loc: CertLocation::new(4, 430),
    expire_years: 31,
    public_key_dev_loc: DeviceLocation::data(11, 0, 72),
    comp_cert_dev_loc: DeviceLocation::data(12, 0, 72),
    std_cert_elements: [
        Some(CertLocation::new(266, 64)), // public key
        Some(CertLocation::new(446, 64)), // signature
        Some(CertLocation::new(128, 13)), // issue date
        Some(CertLocation::new(143, 15)), // expire date
        Some(CertLocation::new(235, 4)),  // signer id
        Some(CertLocation::new(15, 16)),  // serial number
        Some(CertLocation::new(414, 20)), // authority key id
        Some(CertLocation::new(381, 20)), // subject key id
    ],
    cert_elements: &SIGNER_CERT_ELEMENTS,
    cert_template: &SIGNER_CERT_TEMPLATE,
    ca_cert_def: None,
};

/*++

Licensed under the Apache-2.0 license.

File Name:

    root_ca.rs

Abstract:

    Trusted root of the certificate chain: Crypto Authentication Root CA 002.

--*/

use cryptoauth_drivers::Ecc256PubKey;

/// DER encoded root certificate
pub static ROOT_CA_CERT: [u8; 501] = [
    0x30, 0x82, 0x01, 0xF1, 0x30, 0x82, 0x01, 0x97, 0xA0, 0x03, 0x02, 0x01, 0x02, 0x02, 0x10, 0x77,
    0xD3, 0x6D, 0x95, 0x6E, 0xC8, 0xAE, 0x62, 0x05, 0xE5, 0x8E, 0x3A, 0xCB, 0x98, 0x5A, 0x81, 0x30,
    0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02, 0x30, 0x4F, 0x31, 0x21, 0x30,
    0x1F, 0x06, 0x03, 0x55, 0x04, 0x0A, 0x0C, 0x18, 0x4D, 0x69, 0x63, 0x72, 0x6F, 0x63, 0x68, 0x69,
    0x70, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6E, 0x6F, 0x6C, 0x6F, 0x67, 0x79, 0x20, 0x49, 0x6E, 0x63,
    0x31, 0x2A, 0x30, 0x28, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0C, 0x21, 0x43, 0x72, 0x79, 0x70, 0x74,
    0x6F, 0x20, 0x41, 0x75, 0x74, 0x68, 0x65, 0x6E, 0x74, 0x69, 0x63, 0x61, 0x74, 0x69, 0x6F, 0x6E,
    0x20, 0x52, 0x6F, 0x6F, 0x74, 0x20, 0x43, 0x41, 0x20, 0x30, 0x30, 0x32, 0x30, 0x20, 0x17, 0x0D,
    0x31, 0x38, 0x31, 0x31, 0x30, 0x38, 0x31, 0x39, 0x31, 0x32, 0x31, 0x39, 0x5A, 0x18, 0x0F, 0x32,
    0x30, 0x35, 0x38, 0x31, 0x31, 0x30, 0x38, 0x31, 0x39, 0x31, 0x32, 0x31, 0x39, 0x5A, 0x30, 0x4F,
    0x31, 0x21, 0x30, 0x1F, 0x06, 0x03, 0x55, 0x04, 0x0A, 0x0C, 0x18, 0x4D, 0x69, 0x63, 0x72, 0x6F,
    0x63, 0x68, 0x69, 0x70, 0x20, 0x54, 0x65, 0x63, 0x68, 0x6E, 0x6F, 0x6C, 0x6F, 0x67, 0x79, 0x20,
    0x49, 0x6E, 0x63, 0x31, 0x2A, 0x30, 0x28, 0x06, 0x03, 0x55, 0x04, 0x03, 0x0C, 0x21, 0x43, 0x72,
    0x79, 0x70, 0x74, 0x6F, 0x20, 0x41, 0x75, 0x74, 0x68, 0x65, 0x6E, 0x74, 0x69, 0x63, 0x61, 0x74,
    0x69, 0x6F, 0x6E, 0x20, 0x52, 0x6F, 0x6F, 0x74, 0x20, 0x43, 0x41, 0x20, 0x30, 0x30, 0x32, 0x30,
    0x59, 0x30, 0x13, 0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x02, 0x01, 0x06, 0x08, 0x2A, 0x86,
    0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00, 0x04, 0xBD, 0x54, 0xE6, 0x6D, 0xE3, 0x87,
    0x54, 0x84, 0x00, 0x6B, 0x53, 0xAE, 0x15, 0x80, 0xD5, 0x0A, 0xA0, 0x69, 0xE7, 0x8A, 0xDF, 0x55,
    0x78, 0xD8, 0x5C, 0xE2, 0xD5, 0x4D, 0xD5, 0xB8, 0x30, 0x29, 0x6B, 0xFF, 0xDD, 0x6E, 0x6F, 0x72,
    0x56, 0xFB, 0xD9, 0x9E, 0xF1, 0xA1, 0x16, 0xB1, 0x1D, 0x33, 0xAD, 0x49, 0x10, 0x3A, 0xA1, 0x85,
    0x87, 0x39, 0xDC, 0xFA, 0xE4, 0x37, 0xE1, 0x9D, 0x63, 0x4E, 0xA3, 0x53, 0x30, 0x51, 0x30, 0x1D,
    0x06, 0x03, 0x55, 0x1D, 0x0E, 0x04, 0x16, 0x04, 0x14, 0x7A, 0xED, 0x7D, 0x6D, 0xC6, 0xB7, 0x78,
    0x9D, 0xB2, 0x38, 0x01, 0xA5, 0xE8, 0x4A, 0x8C, 0xB0, 0xA4, 0x0E, 0x2A, 0x8C, 0x30, 0x1F, 0x06,
    0x03, 0x55, 0x1D, 0x23, 0x04, 0x18, 0x30, 0x16, 0x80, 0x14, 0x7A, 0xED, 0x7D, 0x6D, 0xC6, 0xB7,
    0x78, 0x9D, 0xB2, 0x38, 0x01, 0xA5, 0xE8, 0x4A, 0x8C, 0xB0, 0xA4, 0x0E, 0x2A, 0x8C, 0x30, 0x0F,
    0x06, 0x03, 0x55, 0x1D, 0x13, 0x01, 0x01, 0xFF, 0x04, 0x05, 0x30, 0x03, 0x01, 0x01, 0xFF, 0x30,
    0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02, 0x03, 0x48, 0x00, 0x30, 0x45,
    0x02, 0x21, 0x00, 0xA1, 0xDC, 0x63, 0x45, 0x90, 0xEC, 0x81, 0x9E, 0xE1, 0xDE, 0x5B, 0x81, 0x12,
    0x65, 0x51, 0xAD, 0xD4, 0xC2, 0xC4, 0xF8, 0xE5, 0x95, 0x28, 0x2E, 0xE0, 0x4B, 0xE7, 0x68, 0xEC,
    0x7C, 0x02, 0x73, 0x02, 0x20, 0x3E, 0x6B, 0xA7, 0x4E, 0x9E, 0x4C, 0x0A, 0xD6, 0x8C, 0x24, 0xB0,
    0xFB, 0x2E, 0xE7, 0x93, 0xD2, 0xE6, 0xBE, 0x94, 0x65, 0xCA, 0x15, 0xD0, 0xEA, 0x5B, 0xC8, 0x7F,
    0x55, 0x79, 0x99, 0x5C, 0xAD,
];

/// Public key of the root certificate, also found at `ROOT_CA_CERT[266..330]`
pub const ROOT_PUBLIC_KEY: Ecc256PubKey = Ecc256PubKey {
    x: [
        0xBD, 0x54, 0xE6, 0x6D, 0xE3, 0x87, 0x54, 0x84, 0x00, 0x6B, 0x53, 0xAE, 0x15, 0x80, 0xD5,
        0x0A, 0xA0, 0x69, 0xE7, 0x8A, 0xDF, 0x55, 0x78, 0xD8, 0x5C, 0xE2, 0xD5, 0x4D, 0xD5, 0xB8,
        0x30, 0x29,
    ],
    y: [
        0x6B, 0xFF, 0xDD, 0x6E, 0x6F, 0x72, 0x56, 0xFB, 0xD9, 0x9E, 0xF1, 0xA1, 0x16, 0xB1, 0x1D,
        0x33, 0xAD, 0x49, 0x10, 0x3A, 0xA1, 0x85, 0x87, 0x39, 0xDC, 0xFA, 0xE4, 0x37, 0xE1, 0x9D,
        0x63, 0x4E,
    ],
};

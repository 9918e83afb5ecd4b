/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Main entry point for compressed X.509 certificate reconstruction and chain verification.

--*/

mod cert_def;
mod chain;
mod comp_cert;
mod date;
mod der_helper;
mod device_cert;
mod error;
mod facade;
mod locator;
mod reconstruct;
mod root_ca;
mod serial;
mod signature;
mod signer_cert;
mod transform;

#[cfg(test)]
mod test_util;

pub use cert_def::{
    CertElement, CertLocation, CertType, CertificateDefinition, DeviceLocation, SnSource,
    StdCertElement, Transform, KEY_ID_SIZE, SIGNER_ID_HEX_SIZE, STD_CERT_ELEMENT_COUNT,
};
pub use chain::{chain_defs, verify_cert, verify_chain, MAX_CHAIN_DEPTH};
pub use comp_cert::{CompressedCert, COMP_CERT_FORMAT_VERSION, COMP_CERT_SIZE};
pub use date::{
    compress_dates, decode_date, decompress_dates, encode_date, expire_date, DateFormat,
    COMP_DATES_SIZE, MAX_EXPIRE_YEARS, NEVER_EXPIRES,
};
pub use der_helper::{der_decode_len, der_encode_len, der_encode_uint, der_uint_len};
pub use device_cert::{DEVICE_CERT_DEF, DEVICE_CERT_ELEMENTS, DEVICE_CERT_TEMPLATE};
pub use error::{CertError, CertField, ChainError, ChainStatus};
pub use facade::CryptoAuth;
pub use locator::{
    device_locs, get_cert_element, get_signature, get_std_element, get_subject_public_key,
    get_tbs, get_tbs_digest, set_cert_element, set_signature, std_device_loc,
};
pub use reconstruct::{
    custom_cert_loc, key_id, max_cert_size, read_comp_cert, read_subject_public_key,
    reconstruct, reconstruct_into,
};
pub use root_ca::{ROOT_CA_CERT, ROOT_PUBLIC_KEY};
pub use serial::{derive_serial, pub_key_hash_serial, SnMaterial, CERT_SN_SIZE};
pub use signature::{der_decode_signature, der_encode_signature, MAX_ECDSA256_SIG_LEN};
pub use signer_cert::{SIGNER_CERT_DEF, SIGNER_CERT_ELEMENTS, SIGNER_CERT_TEMPLATE};
pub use transform::apply_transforms;

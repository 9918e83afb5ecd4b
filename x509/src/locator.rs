/*++

Licensed under the Apache-2.0 license.

File Name:

    locator.rs

Abstract:

    Resolution of certificate fields to device storage and certificate byte ranges.

--*/

use cryptoauth_drivers::{
    CryptoAuthError, CryptoAuthResult, Ecc256PubKey, Ecc256Signature, DIGEST_SIZE,
};
use sha2::{Digest, Sha256};

use crate::cert_def::{
    CertLocation, CertificateDefinition, DeviceLocation, SnSource, StdCertElement,
};
use crate::der_helper::{der_decode_len, der_encode_len, der_len_size, DER_SEQ_TAG};
use crate::signature::{der_decode_signature, der_encode_signature};

/// Device location a standard element is sourced from
///
/// Signature, dates and signer id all come from the compressed certificate. Key identifiers
/// are computed from public keys and have no location of their own.
pub fn std_device_loc(
    def: &CertificateDefinition,
    element: StdCertElement,
) -> Option<DeviceLocation> {
    let loc = match element {
        StdCertElement::PublicKey => def.public_key_dev_loc,
        StdCertElement::Signature
        | StdCertElement::IssueDate
        | StdCertElement::ExpireDate
        | StdCertElement::SignerId => def.comp_cert_dev_loc,
        StdCertElement::CertSn => match def.sn_source {
            SnSource::Stored | SnSource::StoredDynamic => def.cert_sn_dev_loc,
            SnSource::DeviceSn
            | SnSource::DeviceSnHash
            | SnSource::DeviceSnHashRaw
            | SnSource::DeviceSnHashPos => DeviceLocation::config(0, 13),
            SnSource::SignerId => def.comp_cert_dev_loc,
            SnSource::PubKeyHash | SnSource::PubKeyHashRaw | SnSource::PubKeyHashPos => {
                def.public_key_dev_loc
            }
        },
        StdCertElement::AuthKeyId | StdCertElement::SubjKeyId => return None,
    };
    (!loc.is_none()).then_some(loc)
}

/// Every device range read while reconstructing a certificate of `def`, without duplicates
pub fn device_locs(def: &CertificateDefinition) -> Vec<DeviceLocation> {
    let mut locs: Vec<DeviceLocation> = Vec::new();
    let std_locs = StdCertElement::ALL
        .iter()
        .filter(|element| def.std_cert_loc(**element).is_some())
        .filter_map(|element| std_device_loc(def, *element));
    let custom_locs = def
        .cert_elements
        .iter()
        .map(|element| element.device_loc)
        .filter(|loc| !loc.is_none());

    for loc in core::iter::once(def.comp_cert_dev_loc).chain(std_locs).chain(custom_locs) {
        if !locs.contains(&loc) {
            locs.push(loc);
        }
    }
    locs
}

/// Slice of `cert` at `loc`
pub fn get_cert_element<'a>(cert: &'a [u8], loc: &CertLocation) -> CryptoAuthResult<&'a [u8]> {
    cert.get(loc.range())
        .ok_or(CryptoAuthError::FORMAT_CERT_TOO_SHORT)
}

/// Overwrite the bytes of `cert` at `loc`
///
/// # Error
///
/// * `TEMPLATE_SIZE_MISMATCH` - `data` is not exactly the size of the range
/// * `TEMPLATE_OUT_OF_BOUNDS` - The range exceeds the certificate
pub fn set_cert_element(cert: &mut [u8], loc: &CertLocation, data: &[u8]) -> CryptoAuthResult<()> {
    if data.len() != loc.len() {
        return Err(CryptoAuthError::TEMPLATE_SIZE_MISMATCH);
    }
    cert.get_mut(loc.range())
        .ok_or(CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS)?
        .copy_from_slice(data);
    Ok(())
}

/// Bytes of a standard element within `cert`
pub fn get_std_element<'a>(
    def: &CertificateDefinition,
    cert: &'a [u8],
    element: StdCertElement,
) -> CryptoAuthResult<&'a [u8]> {
    let loc = def
        .std_cert_loc(element)
        .ok_or(CryptoAuthError::TEMPLATE_MISSING_ELEMENT)?;
    get_cert_element(cert, &loc)
}

/// The to-be-signed region of `cert`
pub fn get_tbs<'a>(def: &CertificateDefinition, cert: &'a [u8]) -> CryptoAuthResult<&'a [u8]> {
    get_cert_element(cert, &def.tbs_cert_loc)
}

/// SHA-256 digest of the to-be-signed region of `cert`
pub fn get_tbs_digest(
    def: &CertificateDefinition,
    cert: &[u8],
) -> CryptoAuthResult<[u8; DIGEST_SIZE]> {
    Ok(Sha256::digest(get_tbs(def, cert)?).into())
}

/// Subject public key of `cert`
pub fn get_subject_public_key(
    def: &CertificateDefinition,
    cert: &[u8],
) -> CryptoAuthResult<Ecc256PubKey> {
    Ecc256PubKey::try_from(get_std_element(def, cert, StdCertElement::PublicKey)?)
}

/// Signature of `cert`, decoded from its DER field
pub fn get_signature(
    def: &CertificateDefinition,
    cert: &[u8],
) -> CryptoAuthResult<Ecc256Signature> {
    let loc = def
        .std_cert_loc(StdCertElement::Signature)
        .ok_or(CryptoAuthError::TEMPLATE_MISSING_ELEMENT)?;
    let field = cert
        .get(loc.start()..)
        .ok_or(CryptoAuthError::FORMAT_CERT_TOO_SHORT)?;
    let (signature, _) = der_decode_signature(field)?;
    Ok(signature)
}

/// Replace the signature of `cert` and fix up the outer certificate length
///
/// The signature field is the last field of an X.509 certificate, so `cert` ends right after it.
pub fn set_signature(
    def: &CertificateDefinition,
    cert: &mut Vec<u8>,
    signature: &Ecc256Signature,
) -> CryptoAuthResult<()> {
    let loc = def
        .std_cert_loc(StdCertElement::Signature)
        .ok_or(CryptoAuthError::TEMPLATE_MISSING_ELEMENT)?;
    if cert.len() < loc.start() {
        return Err(CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS);
    }
    let (encoded, len) = der_encode_signature(signature)?;
    cert.truncate(loc.start());
    cert.extend_from_slice(&encoded[..len]);
    update_outer_length(cert)
}

/// Rewrite the length of the outer certificate SEQUENCE to cover the whole buffer
///
/// The length keeps its encoded size so no other offset moves.
fn update_outer_length(cert: &mut [u8]) -> CryptoAuthResult<()> {
    if cert.first() != Some(&DER_SEQ_TAG) {
        return Err(CryptoAuthError::FORMAT_DER_LENGTH);
    }
    let (_, len_size) = der_decode_len(&cert[1..]).ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;
    let content_len = cert.len() - 1 - len_size;
    if der_len_size(content_len) != len_size {
        return Err(CryptoAuthError::FORMAT_DER_LENGTH);
    }
    der_encode_len(content_len, &mut cert[1..]).ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;
    Ok(())
}

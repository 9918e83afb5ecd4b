/*++

Licensed under the Apache-2.0 license.

File Name:

    serial.rs

Abstract:

    Certificate serial number derivation.

--*/

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult, Ecc256PubKey, SERIAL_NUMBER_SIZE};
use sha2::{Digest, Sha256};

use crate::cert_def::{SnSource, MAX_HASH_SN_SIZE};
use crate::date::COMP_DATES_SIZE;

/// Serial number size used by the hash sources in practice
pub const CERT_SN_SIZE: usize = 16;

/// Inputs a serial number may be derived from
#[derive(Debug, Copy, Clone)]
pub struct SnMaterial<'a> {
    /// Subject public key
    pub public_key: Option<&'a Ecc256PubKey>,

    /// Device serial number from the config zone
    pub device_sn: Option<&'a [u8; SERIAL_NUMBER_SIZE]>,

    /// Signer id from the compressed certificate
    pub signer_id: u16,

    /// Packed dates from the compressed certificate
    pub enc_dates: &'a [u8; COMP_DATES_SIZE],

    /// Bytes read from `cert_sn_dev_loc`
    pub stored: Option<&'a [u8]>,
}

/// How the first byte of a hashed serial number is adjusted
#[derive(Copy, Clone)]
enum Fixup {
    /// Leave the digest untouched
    Raw,

    /// Clear the sign bit
    Positive,

    /// Clear the sign bit and set bit 6, so the INTEGER is positive with no leading zero
    Minimal,
}

fn hashed(
    material: &[u8],
    enc_dates: &[u8],
    size: usize,
    fixup: Fixup,
) -> CryptoAuthResult<Vec<u8>> {
    if size == 0 || size > MAX_HASH_SN_SIZE {
        return Err(CryptoAuthError::DERIVATION_SN_LEN);
    }
    let digest = Sha256::new()
        .chain_update(material)
        .chain_update(enc_dates)
        .finalize();
    let mut sn = digest[..size].to_vec();
    match fixup {
        Fixup::Raw => {}
        Fixup::Positive => sn[0] &= 0x7F,
        Fixup::Minimal => {
            sn[0] &= 0x7F;
            sn[0] |= 0x40;
        }
    }
    Ok(sn)
}

fn prefixed(value: &[u8], size: usize) -> CryptoAuthResult<Vec<u8>> {
    if size != value.len() + 1 {
        return Err(CryptoAuthError::DERIVATION_SN_LEN);
    }
    let mut sn = Vec::with_capacity(size);
    sn.push(0x40);
    sn.extend_from_slice(value);
    Ok(sn)
}

/// Derive the `size`-byte certificate serial number
///
/// Derivation is a pure function of its inputs.
pub fn derive_serial(
    source: SnSource,
    material: &SnMaterial,
    size: usize,
) -> CryptoAuthResult<Vec<u8>> {
    let missing = CryptoAuthError::DERIVATION_MISSING_MATERIAL;
    match source {
        SnSource::Stored => {
            let stored = material.stored.ok_or(missing)?;
            if stored.len() != size {
                return Err(CryptoAuthError::DERIVATION_STORED_SN_LEN);
            }
            Ok(stored.to_vec())
        }
        SnSource::StoredDynamic => {
            let stored = material.stored.ok_or(missing)?;
            let (&len, value) = stored.split_first().ok_or(missing)?;
            let len = usize::from(len);
            if len != size || len > value.len() {
                return Err(CryptoAuthError::DERIVATION_STORED_SN_LEN);
            }
            Ok(value[..len].to_vec())
        }
        SnSource::DeviceSn => prefixed(material.device_sn.ok_or(missing)?, size),
        SnSource::SignerId => prefixed(&material.signer_id.to_be_bytes(), size),
        SnSource::PubKeyHash | SnSource::PubKeyHashRaw | SnSource::PubKeyHashPos => {
            let public_key = material.public_key.ok_or(missing)?.to_bytes();
            hashed(&public_key, material.enc_dates, size, fixup(source))
        }
        SnSource::DeviceSnHash | SnSource::DeviceSnHashRaw | SnSource::DeviceSnHashPos => {
            let device_sn = material.device_sn.ok_or(missing)?;
            hashed(device_sn, material.enc_dates, size, fixup(source))
        }
    }
}

fn fixup(source: SnSource) -> Fixup {
    match source {
        SnSource::PubKeyHashRaw | SnSource::DeviceSnHashRaw => Fixup::Raw,
        SnSource::PubKeyHashPos | SnSource::DeviceSnHashPos => Fixup::Positive,
        _ => Fixup::Minimal,
    }
}

/// 16-byte serial number of the public key hash source
pub fn pub_key_hash_serial(
    public_key: &Ecc256PubKey,
    enc_dates: &[u8; COMP_DATES_SIZE],
) -> CryptoAuthResult<[u8; CERT_SN_SIZE]> {
    let sn = hashed(&public_key.to_bytes(), enc_dates, CERT_SN_SIZE, Fixup::Minimal)?;
    sn.as_slice()
        .try_into()
        .map_err(|_| CryptoAuthError::DERIVATION_SN_LEN)
}

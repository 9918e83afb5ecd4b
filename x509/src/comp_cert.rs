/*++

Licensed under the Apache-2.0 license.

File Name:

    comp_cert.rs

Abstract:

    The 72-byte compressed certificate record stored on the device.

--*/

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult, Ecc256Signature, ECC_256_COORD_SIZE};
use time::PrimitiveDateTime;

use crate::cert_def::{CertificateDefinition, SnSource};
use crate::date::{compress_dates, decompress_dates, expire_date, COMP_DATES_SIZE};

/// Size of the compressed certificate record
pub const COMP_CERT_SIZE: usize = 72;

/// Only supported compressed certificate format version
pub const COMP_CERT_FORMAT_VERSION: u8 = 0;

const SIG_END: usize = 2 * ECC_256_COORD_SIZE;
const DATES_END: usize = SIG_END + COMP_DATES_SIZE;
const SIGNER_ID_END: usize = DATES_END + 2;
const TEMPLATE_CHAIN_IDX: usize = SIGNER_ID_END;
const SN_SOURCE_FORMAT_IDX: usize = SIGNER_ID_END + 1;
const RESERVED_IDX: usize = SIGNER_ID_END + 2;

/// Decoded compressed certificate
///
/// | Bytes  | Content                                             |
/// |--------|-----------------------------------------------------|
/// | 0..32  | signature R                                         |
/// | 32..64 | signature S                                         |
/// | 64..67 | packed issue date and expiry years                  |
/// | 67..69 | signer id, big-endian                               |
/// | 69     | template id (high nibble), chain id (low nibble)    |
/// | 70     | serial number source (high nibble), format version  |
/// | 71     | reserved                                            |
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompressedCert {
    pub signature: Ecc256Signature,
    pub enc_dates: [u8; COMP_DATES_SIZE],
    pub signer_id: u16,
    pub template_id: u8,
    pub chain_id: u8,
    pub sn_source: u8,
    pub format_version: u8,
    pub reserved: u8,
}

impl CompressedCert {
    /// Parse the stored record
    pub fn from_bytes(bytes: &[u8]) -> CryptoAuthResult<Self> {
        if bytes.len() != COMP_CERT_SIZE {
            return Err(CryptoAuthError::DEVICE_SHORT_READ);
        }
        let mut signature = Ecc256Signature::default();
        signature.r.copy_from_slice(&bytes[..ECC_256_COORD_SIZE]);
        signature.s.copy_from_slice(&bytes[ECC_256_COORD_SIZE..SIG_END]);

        let mut enc_dates = [0u8; COMP_DATES_SIZE];
        enc_dates.copy_from_slice(&bytes[SIG_END..DATES_END]);

        Ok(Self {
            signature,
            enc_dates,
            signer_id: u16::from_be_bytes([bytes[DATES_END], bytes[DATES_END + 1]]),
            template_id: bytes[TEMPLATE_CHAIN_IDX] >> 4,
            chain_id: bytes[TEMPLATE_CHAIN_IDX] & 0x0F,
            sn_source: bytes[SN_SOURCE_FORMAT_IDX] >> 4,
            format_version: bytes[SN_SOURCE_FORMAT_IDX] & 0x0F,
            reserved: bytes[RESERVED_IDX],
        })
    }

    /// Serialize into the stored record
    pub fn to_bytes(&self) -> [u8; COMP_CERT_SIZE] {
        let mut bytes = [0u8; COMP_CERT_SIZE];
        bytes[..ECC_256_COORD_SIZE].copy_from_slice(&self.signature.r);
        bytes[ECC_256_COORD_SIZE..SIG_END].copy_from_slice(&self.signature.s);
        bytes[SIG_END..DATES_END].copy_from_slice(&self.enc_dates);
        bytes[DATES_END..SIGNER_ID_END].copy_from_slice(&self.signer_id.to_be_bytes());
        bytes[TEMPLATE_CHAIN_IDX] = (self.template_id << 4) | (self.chain_id & 0x0F);
        bytes[SN_SOURCE_FORMAT_IDX] = (self.sn_source << 4) | (self.format_version & 0x0F);
        bytes[RESERVED_IDX] = self.reserved;
        bytes
    }

    /// Build the record for a freshly signed certificate of `def`
    pub fn new(
        def: &CertificateDefinition,
        signature: Ecc256Signature,
        issue_date: &PrimitiveDateTime,
        signer_id: u16,
    ) -> CryptoAuthResult<Self> {
        Ok(Self {
            signature,
            enc_dates: compress_dates(issue_date, def.expire_years)?,
            signer_id,
            template_id: def.template_id,
            chain_id: def.chain_id,
            sn_source: def.sn_source.nibble(),
            format_version: COMP_CERT_FORMAT_VERSION,
            reserved: 0,
        })
    }

    /// Check the record was produced for `def`
    pub fn check(&self, def: &CertificateDefinition) -> CryptoAuthResult<()> {
        if self.format_version != COMP_CERT_FORMAT_VERSION {
            return Err(CryptoAuthError::FORMAT_COMP_CERT_VERSION);
        }
        if self.template_id != def.template_id
            || self.chain_id != def.chain_id
            || self.sn_source != def.sn_source.nibble()
        {
            return Err(CryptoAuthError::FORMAT_COMP_CERT_MISMATCH);
        }
        Ok(())
    }

    /// Serial number source recorded in the certificate
    pub fn sn_source(&self) -> CryptoAuthResult<SnSource> {
        SnSource::try_from(self.sn_source)
    }

    pub fn issue_date(&self) -> CryptoAuthResult<PrimitiveDateTime> {
        Ok(decompress_dates(&self.enc_dates)?.0)
    }

    pub fn expire_years(&self) -> u8 {
        self.enc_dates[2] & 0x1F
    }

    /// Expire date derived from the recorded issue date and expiry period
    pub fn expire_date(&self) -> CryptoAuthResult<PrimitiveDateTime> {
        let (issue, years) = decompress_dates(&self.enc_dates)?;
        expire_date(&issue, years)
    }

    /// Signer id as written into the certificate
    pub fn signer_id_hex(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(hex::encode_upper(self.signer_id.to_be_bytes()).as_bytes());
        out
    }
}

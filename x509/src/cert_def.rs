/*++

Licensed under the Apache-2.0 license.

File Name:

    cert_def.rs

Abstract:

    Declarative description of a compressed certificate: where each dynamic field lives on the
    device and where it lands in the certificate template.

--*/

use core::fmt;
use core::ops::Range;

use cryptoauth_drivers::{
    CryptoAuthError, CryptoAuthResult, DeviceZone, Ecc256PubKey, PADDED_PUB_KEY_SIZE, SLOT_COUNT,
};

use crate::comp_cert::COMP_CERT_SIZE;
use crate::date::DateFormat;
use crate::error::{CertError, CertField};
use crate::signature::MAX_ECDSA256_SIG_LEN;

/// Number of standard certificate elements
pub const STD_CERT_ELEMENT_COUNT: usize = 8;

/// Size of a SHA-1 key identifier
pub const KEY_ID_SIZE: usize = 20;

/// Size of the hex signer id written into the certificate
pub const SIGNER_ID_HEX_SIZE: usize = 4;

/// Largest serial number the hash sources can produce
pub const MAX_HASH_SN_SIZE: usize = 32;

/// Certificate encoding
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CertType {
    /// X.509 DER certificate
    X509,

    /// Application defined format
    Custom,
}

/// Location of a value on the secure element
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeviceLocation {
    pub zone: DeviceZone,
    pub slot: u16,

    /// Value is computed by the key generation capability instead of being read
    pub is_genkey: bool,
    pub offset: u16,
    pub count: u16,
}

impl DeviceLocation {
    /// Value is not stored on the device
    pub const NONE: Self = Self {
        zone: DeviceZone::None,
        slot: 0,
        is_genkey: false,
        offset: 0,
        count: 0,
    };

    pub const fn data(slot: u16, offset: u16, count: u16) -> Self {
        Self {
            zone: DeviceZone::Data,
            slot,
            is_genkey: false,
            offset,
            count,
        }
    }

    pub const fn config(offset: u16, count: u16) -> Self {
        Self {
            zone: DeviceZone::Config,
            slot: 0,
            is_genkey: false,
            offset,
            count,
        }
    }

    pub const fn otp(offset: u16, count: u16) -> Self {
        Self {
            zone: DeviceZone::Otp,
            slot: 0,
            is_genkey: false,
            offset,
            count,
        }
    }

    /// Public key computed from the private key in `slot`
    pub const fn genkey(slot: u16) -> Self {
        Self {
            zone: DeviceZone::Data,
            slot,
            is_genkey: true,
            offset: 0,
            count: Ecc256PubKey::SIZE as u16,
        }
    }

    /// True when nothing needs to be fetched from the device
    pub fn is_none(&self) -> bool {
        self.zone == DeviceZone::None || self.count == 0
    }

    /// Check the location addresses a valid range of its zone
    pub fn validate(&self) -> CryptoAuthResult<()> {
        if self.is_none() {
            return Ok(());
        }
        if self.is_genkey {
            if self.zone != DeviceZone::Data || self.slot >= SLOT_COUNT {
                return Err(CryptoAuthError::DEVICE_BAD_SLOT);
            }
            if usize::from(self.count) != Ecc256PubKey::SIZE {
                return Err(CryptoAuthError::TEMPLATE_SIZE_MISMATCH);
            }
            return Ok(());
        }
        self.zone
            .check_range(self.slot, u32::from(self.offset), u32::from(self.count))
    }
}

/// Byte range within the certificate
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CertLocation {
    pub offset: u16,
    pub count: u16,
}

impl CertLocation {
    pub const fn new(offset: u16, count: u16) -> Self {
        Self { offset, count }
    }

    pub fn start(&self) -> usize {
        usize::from(self.offset)
    }

    pub fn end(&self) -> usize {
        usize::from(self.offset) + usize::from(self.count)
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn len(&self) -> usize {
        usize::from(self.count)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when both ranges share at least one byte
    pub fn overlaps(&self, other: &CertLocation) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start() < other.end()
            && other.start() < self.end()
    }
}

/// Byte level conversion applied while moving a value from the device into the certificate
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transform {
    /// Verbatim copy
    None,

    /// Reverse the byte order
    Reverse,

    /// Binary to uppercase hex
    Bin2HexUc,

    /// Binary to lowercase hex
    Bin2HexLc,

    /// Hex to binary
    Hex2Bin,

    /// Binary to space separated uppercase hex
    Bin2HexSpaceUc,

    /// Binary to space separated lowercase hex
    Bin2HexSpaceLc,

    /// Space separated hex to binary
    Hex2BinSpace,
}

/// Custom certificate field
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CertElement {
    pub id: &'static str,
    pub device_loc: DeviceLocation,
    pub cert_loc: CertLocation,

    /// Applied in order; empty means a verbatim copy
    pub transforms: &'static [Transform],
}

/// The fixed-role fields every certificate definition may declare
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StdCertElement {
    PublicKey,
    Signature,
    IssueDate,
    ExpireDate,
    SignerId,
    CertSn,
    AuthKeyId,
    SubjKeyId,
}

impl StdCertElement {
    /// Elements in table order
    pub const ALL: [StdCertElement; STD_CERT_ELEMENT_COUNT] = [
        StdCertElement::PublicKey,
        StdCertElement::Signature,
        StdCertElement::IssueDate,
        StdCertElement::ExpireDate,
        StdCertElement::SignerId,
        StdCertElement::CertSn,
        StdCertElement::AuthKeyId,
        StdCertElement::SubjKeyId,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StdCertElement::PublicKey => "public key",
            StdCertElement::Signature => "signature",
            StdCertElement::IssueDate => "issue date",
            StdCertElement::ExpireDate => "expire date",
            StdCertElement::SignerId => "signer id",
            StdCertElement::CertSn => "serial number",
            StdCertElement::AuthKeyId => "authority key id",
            StdCertElement::SubjKeyId => "subject key id",
        }
    }
}

impl fmt::Display for StdCertElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Origin of the certificate serial number
///
/// Discriminants are the nibble stored in the compressed certificate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SnSource {
    /// Read verbatim from `cert_sn_dev_loc`
    Stored = 0x0,

    /// Read from `cert_sn_dev_loc`; the first byte is the length
    StoredDynamic = 0x7,

    /// 0x40 followed by the 9-byte device serial number
    DeviceSn = 0x8,

    /// 0x40 followed by the signer id
    SignerId = 0x9,

    /// SHA-256 of public key and dates, first byte forced into 0x40..0x7F
    PubKeyHash = 0xA,

    /// SHA-256 of public key and dates without fix-up
    PubKeyHashRaw = 0xB,

    /// SHA-256 of public key and dates with the sign bit cleared
    PubKeyHashPos = 0xC,

    /// SHA-256 of device serial number and dates, first byte forced into 0x40..0x7F
    DeviceSnHash = 0xD,

    /// SHA-256 of device serial number and dates without fix-up
    DeviceSnHashRaw = 0xE,

    /// SHA-256 of device serial number and dates with the sign bit cleared
    DeviceSnHashPos = 0xF,
}

impl SnSource {
    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// True when the serial number is read from the device instead of derived
    pub fn is_stored(self) -> bool {
        matches!(self, SnSource::Stored | SnSource::StoredDynamic)
    }
}

impl TryFrom<u8> for SnSource {
    type Error = CryptoAuthError;

    fn try_from(nibble: u8) -> Result<Self, Self::Error> {
        match nibble {
            0x0 => Ok(SnSource::Stored),
            0x7 => Ok(SnSource::StoredDynamic),
            0x8 => Ok(SnSource::DeviceSn),
            0x9 => Ok(SnSource::SignerId),
            0xA => Ok(SnSource::PubKeyHash),
            0xB => Ok(SnSource::PubKeyHashRaw),
            0xC => Ok(SnSource::PubKeyHashPos),
            0xD => Ok(SnSource::DeviceSnHash),
            0xE => Ok(SnSource::DeviceSnHashRaw),
            0xF => Ok(SnSource::DeviceSnHashPos),
            _ => Err(CryptoAuthError::DERIVATION_UNKNOWN_SOURCE),
        }
    }
}

/// Description of one compressed certificate type
#[derive(Debug, Clone)]
pub struct CertificateDefinition {
    pub cert_type: CertType,
    pub template_id: u8,
    pub chain_id: u8,
    pub private_key_slot: u16,
    pub sn_source: SnSource,
    pub cert_sn_dev_loc: DeviceLocation,
    pub issue_date_format: DateFormat,
    pub expire_date_format: DateFormat,

    /// Range covered by the signature
    pub tbs_cert_loc: CertLocation,

    /// Validity period written into new compressed certificates; 0 never expires
    pub expire_years: u8,
    pub public_key_dev_loc: DeviceLocation,
    pub comp_cert_dev_loc: DeviceLocation,

    /// Indexed by [`StdCertElement::index`]
    pub std_cert_elements: [Option<CertLocation>; STD_CERT_ELEMENT_COUNT],
    pub cert_elements: &'static [CertElement],
    pub cert_template: &'static [u8],

    /// Definition of the issuing certificate; `None` when issued by the trusted root
    pub ca_cert_def: Option<&'static CertificateDefinition>,
}

impl CertificateDefinition {
    /// Certificate location of a standard element, if declared
    pub fn std_cert_loc(&self, element: StdCertElement) -> Option<CertLocation> {
        self.std_cert_elements[element.index()].filter(|loc| !loc.is_empty())
    }

    /// Certificate location of a standard element that must be declared
    pub fn require_std_cert_loc(&self, element: StdCertElement) -> Result<CertLocation, CertError> {
        self.std_cert_loc(element).ok_or(CertError::new(
            CertField::Std(element),
            CryptoAuthError::TEMPLATE_MISSING_ELEMENT,
        ))
    }

    /// Largest certificate reconstruction can produce for this definition
    ///
    /// The signature field is variable length; every other field keeps its template size.
    pub fn max_cert_size(&self) -> usize {
        match self.std_cert_loc(StdCertElement::Signature) {
            Some(loc) => self
                .cert_template
                .len()
                .max(loc.start() + MAX_ECDSA256_SIG_LEN),
            None => self.cert_template.len(),
        }
    }

    /// Check the definition is internally consistent
    ///
    /// Every declared range must lie within its zone or the template, standard elements must
    /// not overlap each other, and fixed-size values must be declared with their exact size.
    pub fn validate(&self) -> Result<(), CertError> {
        let def_err = |code| CertError::new(CertField::Definition, code);

        if self.cert_type != CertType::X509 {
            return Err(def_err(CryptoAuthError::FORMAT_UNSUPPORTED_CERT_TYPE));
        }
        if self.template_id > 0x0F || self.chain_id > 0x0F {
            return Err(def_err(CryptoAuthError::FORMAT_ID_RANGE));
        }
        if self.expire_years > 31 {
            return Err(def_err(CryptoAuthError::FORMAT_COMP_DATE_RANGE));
        }
        if self.tbs_cert_loc.is_empty() || self.tbs_cert_loc.end() > self.cert_template.len() {
            return Err(def_err(CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS));
        }

        self.comp_cert_dev_loc
            .validate()
            .map_err(|code| CertError::new(CertField::CompCert, code))?;
        if self.comp_cert_dev_loc.is_genkey
            || usize::from(self.comp_cert_dev_loc.count) != COMP_CERT_SIZE
        {
            return Err(CertError::new(
                CertField::CompCert,
                CryptoAuthError::TEMPLATE_SIZE_MISMATCH,
            ));
        }

        let pk_err = |code| CertError::new(CertField::Std(StdCertElement::PublicKey), code);
        self.public_key_dev_loc.validate().map_err(pk_err)?;
        if !matches!(
            usize::from(self.public_key_dev_loc.count),
            Ecc256PubKey::SIZE | PADDED_PUB_KEY_SIZE
        ) {
            return Err(pk_err(CryptoAuthError::TEMPLATE_SIZE_MISMATCH));
        }

        if self.sn_source.is_stored() {
            self.cert_sn_dev_loc
                .validate()
                .map_err(|code| CertError::new(CertField::Std(StdCertElement::CertSn), code))?;
        }

        for element in StdCertElement::ALL {
            let Some(loc) = self.std_cert_loc(element) else {
                continue;
            };
            let err = |code| CertError::new(CertField::Std(element), code);

            if loc.end() > self.cert_template.len() {
                return Err(err(CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS));
            }
            if let Some(size) = self.std_element_size(element) {
                if loc.len() != size {
                    return Err(err(CryptoAuthError::TEMPLATE_SIZE_MISMATCH));
                }
            }
            if element == StdCertElement::Signature && loc.start() < self.tbs_cert_loc.end() {
                return Err(err(CryptoAuthError::TEMPLATE_OVERLAP));
            }
            if element == StdCertElement::CertSn
                && !self.sn_source.is_stored()
                && loc.len() > MAX_HASH_SN_SIZE
            {
                return Err(err(CryptoAuthError::DERIVATION_SN_LEN));
            }

            let overlapping = StdCertElement::ALL[element.index() + 1..]
                .iter()
                .filter_map(|&other| self.std_cert_loc(other))
                .any(|other| loc.overlaps(&other));
            if overlapping {
                return Err(err(CryptoAuthError::TEMPLATE_OVERLAP));
            }
        }

        let patched: Vec<&CertElement> = self
            .cert_elements
            .iter()
            .filter(|element| !element.device_loc.is_none())
            .collect();
        for element in self.cert_elements {
            let err = |code| CertError::new(CertField::Custom(element.id), code);
            if element.cert_loc.end() > self.cert_template.len() {
                return Err(err(CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS));
            }
            if element.device_loc.is_genkey {
                return Err(err(CryptoAuthError::DEVICE_BAD_PARAM));
            }
            element.device_loc.validate().map_err(err)?;
        }

        // template text may contain standard elements; patched values may not share bytes
        for (i, element) in patched.iter().enumerate() {
            let err = |code| CertError::new(CertField::Custom(element.id), code);
            let loc = &element.cert_loc;
            if let Some(sig) = self.std_cert_loc(StdCertElement::Signature) {
                if !loc.is_empty() && loc.end() > sig.start() {
                    return Err(err(CryptoAuthError::TEMPLATE_OVERLAP));
                }
            }
            let overlapping = StdCertElement::ALL
                .iter()
                .filter_map(|&std| self.std_cert_loc(std))
                .chain(patched[i + 1..].iter().map(|other| other.cert_loc))
                .any(|other| loc.overlaps(&other));
            if overlapping {
                return Err(err(CryptoAuthError::TEMPLATE_OVERLAP));
            }
        }

        Ok(())
    }

    /// Exact size a standard element must be declared with, if fixed
    fn std_element_size(&self, element: StdCertElement) -> Option<usize> {
        match element {
            StdCertElement::PublicKey | StdCertElement::Signature => Some(Ecc256PubKey::SIZE),
            StdCertElement::IssueDate => Some(self.issue_date_format.size()),
            StdCertElement::ExpireDate => Some(self.expire_date_format.size()),
            StdCertElement::SignerId => Some(SIGNER_ID_HEX_SIZE),
            StdCertElement::AuthKeyId | StdCertElement::SubjKeyId => Some(KEY_ID_SIZE),
            StdCertElement::CertSn => None,
        }
    }
}

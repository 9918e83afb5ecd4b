/*++

Licensed under the Apache-2.0 license.

File Name:

    reconstruct.rs

Abstract:

    Rebuilds a full X.509 certificate from its template and the dynamic values held by the
    secure element.

--*/

use cryptoauth_drivers::{
    pub_key_remove_padding, CryptoAuthError, CryptoAuthResult, Ecc256PubKey, SecureElement,
    PADDED_PUB_KEY_SIZE,
};
use sha1::{Digest, Sha1};
use zeroize::Zeroize;

use crate::cert_def::{
    CertElement, CertLocation, CertificateDefinition, DeviceLocation, SnSource, StdCertElement,
    KEY_ID_SIZE,
};
use crate::comp_cert::CompressedCert;
use crate::date::encode_date;
use crate::error::{CertError, CertField};
use crate::locator::{set_cert_element, set_signature};
use crate::serial::{derive_serial, SnMaterial};
use crate::transform::apply_transforms;

/// Key identifier of a public key, SHA-1 over the uncompressed point
pub fn key_id(public_key: &Ecc256PubKey) -> [u8; KEY_ID_SIZE] {
    Sha1::digest(public_key.to_uncompressed()).into()
}

/// Read exactly `loc.count` bytes from the element
pub(crate) fn read_device_loc<E: SecureElement + ?Sized>(
    se: &mut E,
    loc: &DeviceLocation,
) -> CryptoAuthResult<Vec<u8>> {
    let data = se.read_zone(
        loc.zone,
        loc.slot,
        u32::from(loc.offset),
        u32::from(loc.count),
    )?;
    if data.len() != usize::from(loc.count) {
        return Err(CryptoAuthError::DEVICE_SHORT_READ);
    }
    Ok(data)
}

/// Read the subject public key from the location declared by `def`
pub fn read_subject_public_key<E: SecureElement + ?Sized>(
    se: &mut E,
    def: &CertificateDefinition,
) -> CryptoAuthResult<Ecc256PubKey> {
    let loc = &def.public_key_dev_loc;
    if loc.is_genkey {
        return se.gen_public_key(loc.slot);
    }
    let mut data = read_device_loc(se, loc)?;
    let key = if data.len() == PADDED_PUB_KEY_SIZE {
        let mut padded = [0u8; PADDED_PUB_KEY_SIZE];
        padded.copy_from_slice(&data);
        pub_key_remove_padding(&padded)
    } else {
        Ecc256PubKey::try_from(data.as_slice())?
    };
    data.zeroize();
    Ok(key)
}

/// Read and check the compressed certificate of `def`
pub fn read_comp_cert<E: SecureElement + ?Sized>(
    se: &mut E,
    def: &CertificateDefinition,
) -> Result<CompressedCert, CertError> {
    let err = |code| CertError::new(CertField::CompCert, code);
    let data = read_device_loc(se, &def.comp_cert_dev_loc).map_err(err)?;
    let comp_cert = CompressedCert::from_bytes(&data).map_err(err)?;
    comp_cert.check(def).map_err(err)?;
    Ok(comp_cert)
}

/// Reconstruct the certificate described by `def`
///
/// `ca_public_key` is the public key of the issuer and only feeds the authority key id.
/// On failure the partially patched buffer is wiped and never returned.
///
/// # Arguments
///
/// * `se` - Secure element holding the dynamic values
/// * `def` - Certificate definition
/// * `ca_public_key` - Issuer public key
pub fn reconstruct<E: SecureElement + ?Sized>(
    se: &mut E,
    def: &CertificateDefinition,
    ca_public_key: &Ecc256PubKey,
) -> Result<Vec<u8>, CertError> {
    def.validate()?;

    let mut cert = Vec::with_capacity(def.max_cert_size());
    cert.extend_from_slice(def.cert_template);

    match Reconstructor::new(se, def).run(&mut cert, ca_public_key) {
        Ok(()) => {
            log::debug!(
                "reconstructed certificate template {} chain {} ({} bytes)",
                def.template_id,
                def.chain_id,
                cert.len()
            );
            Ok(cert)
        }
        Err(err) => {
            cert.zeroize();
            log::warn!("certificate reconstruction failed: {err}");
            Err(err)
        }
    }
}

/// Reconstruct into a caller supplied buffer, returning the certificate size
///
/// # Error
///
/// * `TEMPLATE_BUFFER_TOO_SMALL` - `buf` cannot hold the certificate
pub fn reconstruct_into<E: SecureElement + ?Sized>(
    se: &mut E,
    def: &CertificateDefinition,
    ca_public_key: &Ecc256PubKey,
    buf: &mut [u8],
) -> Result<usize, CertError> {
    let mut cert = reconstruct(se, def, ca_public_key)?;
    let result = match buf.get_mut(..cert.len()) {
        Some(out) => {
            out.copy_from_slice(&cert);
            Ok(cert.len())
        }
        None => Err(CertError::new(
            CertField::Definition,
            CryptoAuthError::TEMPLATE_BUFFER_TOO_SMALL,
        )),
    };
    cert.zeroize();
    result
}

struct Reconstructor<'a, E: SecureElement + ?Sized> {
    se: &'a mut E,
    def: &'a CertificateDefinition,
}

impl<'a, E: SecureElement + ?Sized> Reconstructor<'a, E> {
    fn new(se: &'a mut E, def: &'a CertificateDefinition) -> Self {
        Self { se, def }
    }

    fn run(&mut self, cert: &mut Vec<u8>, ca_public_key: &Ecc256PubKey) -> Result<(), CertError> {
        let comp_cert = read_comp_cert(&mut *self.se, self.def)?;

        let public_key = read_subject_public_key(&mut *self.se, self.def)
            .map_err(|code| CertError::new(CertField::Std(StdCertElement::PublicKey), code))?;
        self.set_std(cert, StdCertElement::PublicKey, &public_key.to_bytes())?;
        self.set_std(cert, StdCertElement::SubjKeyId, &key_id(&public_key))?;
        self.set_std(cert, StdCertElement::AuthKeyId, &key_id(ca_public_key))?;

        self.set_dates(cert, &comp_cert)?;
        self.set_std(cert, StdCertElement::SignerId, &comp_cert.signer_id_hex())?;
        self.set_serial(cert, &comp_cert, &public_key)?;

        for element in self.def.cert_elements {
            self.set_custom(cert, element)?;
        }

        set_signature(self.def, cert, &comp_cert.signature)
            .map_err(|code| CertError::new(CertField::Std(StdCertElement::Signature), code))?;
        log::trace!("patched {}", StdCertElement::Signature);
        Ok(())
    }

    /// Write a standard element if the definition declares it
    fn set_std(
        &self,
        cert: &mut [u8],
        element: StdCertElement,
        data: &[u8],
    ) -> Result<(), CertError> {
        let Some(loc) = self.def.std_cert_loc(element) else {
            return Ok(());
        };
        set_cert_element(cert, &loc, data)
            .map_err(|code| CertError::new(CertField::Std(element), code))?;
        log::trace!("patched {element} at {}..{}", loc.start(), loc.end());
        Ok(())
    }

    fn set_dates(&self, cert: &mut [u8], comp_cert: &CompressedCert) -> Result<(), CertError> {
        let issue_err = |code| CertError::new(CertField::Std(StdCertElement::IssueDate), code);
        let issue_date = comp_cert.issue_date().map_err(issue_err)?;
        let issue = encode_date(self.def.issue_date_format, &issue_date).map_err(issue_err)?;
        self.set_std(cert, StdCertElement::IssueDate, &issue)?;

        let expire_err = |code| CertError::new(CertField::Std(StdCertElement::ExpireDate), code);
        let expire_date = comp_cert.expire_date().map_err(expire_err)?;
        let expire = encode_date(self.def.expire_date_format, &expire_date).map_err(expire_err)?;
        self.set_std(cert, StdCertElement::ExpireDate, &expire)
    }

    fn set_serial(
        &mut self,
        cert: &mut [u8],
        comp_cert: &CompressedCert,
        public_key: &Ecc256PubKey,
    ) -> Result<(), CertError> {
        let Some(loc) = self.def.std_cert_loc(StdCertElement::CertSn) else {
            return Ok(());
        };
        let err = |code| CertError::new(CertField::Std(StdCertElement::CertSn), code);
        let source = self.def.sn_source;

        let device_sn = match source {
            SnSource::DeviceSn
            | SnSource::DeviceSnHash
            | SnSource::DeviceSnHashRaw
            | SnSource::DeviceSnHashPos => Some(self.se.serial_number().map_err(err)?),
            _ => None,
        };
        let stored = if source.is_stored() {
            Some(read_device_loc(&mut *self.se, &self.def.cert_sn_dev_loc).map_err(err)?)
        } else {
            None
        };

        let material = SnMaterial {
            public_key: Some(public_key),
            device_sn: device_sn.as_ref(),
            signer_id: comp_cert.signer_id,
            enc_dates: &comp_cert.enc_dates,
            stored: stored.as_deref(),
        };
        let sn = derive_serial(source, &material, loc.len()).map_err(err)?;
        self.set_std(cert, StdCertElement::CertSn, &sn)
    }

    fn set_custom(&mut self, cert: &mut [u8], element: &CertElement) -> Result<(), CertError> {
        if element.device_loc.is_none() {
            // template text, nothing to patch
            return Ok(());
        }
        let err = |code| CertError::new(CertField::Custom(element.id), code);
        let mut raw = read_device_loc(&mut *self.se, &element.device_loc).map_err(err)?;
        let value = apply_transforms(element.transforms, &raw).map_err(err);
        raw.zeroize();
        let value = value?;
        set_cert_element(cert, &element.cert_loc, &value).map_err(err)?;
        log::trace!(
            "patched {} at {}..{}",
            element.id,
            element.cert_loc.start(),
            element.cert_loc.end()
        );
        Ok(())
    }
}

/// Largest certificate `def` can reconstruct to
pub fn max_cert_size(def: &CertificateDefinition) -> usize {
    def.max_cert_size()
}

/// Certificate range a custom element is written to
pub fn custom_cert_loc(def: &CertificateDefinition, id: &str) -> Option<CertLocation> {
    def.cert_elements
        .iter()
        .find(|element| element.id == id)
        .map(|element| element.cert_loc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{get_signature, get_std_element, get_tbs_digest};
    use crate::test_util::{provision_signer, signer_element};
    use crate::{ROOT_PUBLIC_KEY, SIGNER_CERT_DEF, SIGNER_CERT_TEMPLATE};
    use cryptoauth_drivers::DeviceZone;
    use cryptoauth_emu::SoftSecureElement;

    #[test]
    fn test_key_ids_match_reference() {
        let signer_key =
            Ecc256PubKey::try_from(&SIGNER_CERT_TEMPLATE[266..330]).unwrap();
        assert_eq!(key_id(&signer_key).as_slice(), &SIGNER_CERT_TEMPLATE[381..401]);
        assert_eq!(key_id(&ROOT_PUBLIC_KEY).as_slice(), &SIGNER_CERT_TEMPLATE[414..434]);
    }

    #[test]
    fn test_reconstruct_reference_signer() {
        let mut se = signer_element();
        let cert = reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY).unwrap();
        assert_eq!(cert.as_slice(), SIGNER_CERT_TEMPLATE.as_slice());

        let mut buf = [0u8; 600];
        let len = reconstruct_into(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY, &mut buf).unwrap();
        assert_eq!(&buf[..len], SIGNER_CERT_TEMPLATE.as_slice());

        let mut small = [0u8; 519];
        assert_eq!(
            reconstruct_into(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY, &mut small),
            Err(CertError::new(
                CertField::Definition,
                CryptoAuthError::TEMPLATE_BUFFER_TOO_SMALL
            ))
        );
    }

    #[test]
    fn test_fields_round_trip() {
        let mut se = SoftSecureElement::new(&[0x11; 32]).unwrap();
        let signer_key = provision_signer(&mut se, 0x0A1B);
        let cert = reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY).unwrap();

        let field = |element| get_std_element(&SIGNER_CERT_DEF, &cert, element).unwrap();
        assert_eq!(field(StdCertElement::PublicKey), signer_key.to_bytes().as_slice());
        assert_eq!(field(StdCertElement::SignerId), b"0A1B");
        assert_eq!(field(StdCertElement::SubjKeyId), key_id(&signer_key).as_slice());
        assert_eq!(field(StdCertElement::AuthKeyId), key_id(&ROOT_PUBLIC_KEY).as_slice());
        assert_eq!(field(StdCertElement::IssueDate), b"210304050000Z");
        assert_eq!(field(StdCertElement::ExpireDate), b"20520304050000Z");

        let comp = read_comp_cert(&mut se, &SIGNER_CERT_DEF).unwrap();
        assert_eq!(get_signature(&SIGNER_CERT_DEF, &cert), Ok(comp.signature));
        assert!(get_tbs_digest(&SIGNER_CERT_DEF, &cert).is_ok());
    }

    #[test]
    fn test_out_of_bounds_custom_element_fails() {
        static ELEMENTS: [CertElement; 1] = [CertElement {
            id: "wide",
            device_loc: DeviceLocation::config(0, 4),
            cert_loc: CertLocation::new(515, 8),
            transforms: &[crate::cert_def::Transform::Bin2HexUc],
        }];
        let def = CertificateDefinition {
            cert_elements: &ELEMENTS,
            ..SIGNER_CERT_DEF.clone()
        };
        let mut se = signer_element();
        assert_eq!(
            reconstruct(&mut se, &def, &ROOT_PUBLIC_KEY),
            Err(CertError::new(
                CertField::Custom("wide"),
                CryptoAuthError::TEMPLATE_OUT_OF_BOUNDS
            ))
        );
    }

    #[test]
    fn test_custom_element_over_signature_fails() {
        static ELEMENTS: [CertElement; 1] = [CertElement {
            id: "tail",
            device_loc: DeviceLocation::config(0, 4),
            cert_loc: CertLocation::new(500, 8),
            transforms: &[crate::cert_def::Transform::Bin2HexUc],
        }];
        let def = CertificateDefinition {
            cert_elements: &ELEMENTS,
            ..SIGNER_CERT_DEF.clone()
        };
        let mut se = signer_element();
        assert_eq!(
            reconstruct(&mut se, &def, &ROOT_PUBLIC_KEY),
            Err(CertError::new(
                CertField::Custom("tail"),
                CryptoAuthError::TEMPLATE_OVERLAP
            ))
        );
    }

    #[test]
    fn test_read_failure_is_tagged() {
        let mut se = signer_element();
        se.inject_fault(1, CryptoAuthError::DEVICE_COMM_FAILURE);
        assert_eq!(
            reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY),
            Err(CertError::new(
                CertField::Std(StdCertElement::PublicKey),
                CryptoAuthError::DEVICE_COMM_FAILURE
            ))
        );
    }

    #[test]
    fn test_foreign_comp_cert_rejected() {
        let mut se = signer_element();
        let mut comp = read_comp_cert(&mut se, &SIGNER_CERT_DEF).unwrap();
        comp.template_id = 2;
        se.write_zone(DeviceZone::Data, 12, 0, &comp.to_bytes()).unwrap();
        assert_eq!(
            reconstruct(&mut se, &SIGNER_CERT_DEF, &ROOT_PUBLIC_KEY),
            Err(CertError::new(
                CertField::CompCert,
                CryptoAuthError::FORMAT_COMP_CERT_MISMATCH
            ))
        );
    }

    #[test]
    fn test_custom_element_lookup() {
        assert_eq!(
            custom_cert_loc(&SIGNER_CERT_DEF, "subject"),
            Some(CertLocation::new(158, 81))
        );
        assert_eq!(custom_cert_loc(&SIGNER_CERT_DEF, "missing"), None);
        assert_eq!(max_cert_size(&SIGNER_CERT_DEF), 521);
    }
}

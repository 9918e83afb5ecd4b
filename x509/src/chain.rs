/*++

Licensed under the Apache-2.0 license.

File Name:

    chain.rs

Abstract:

    Verification of a reconstructed certificate up to the trusted root key.

--*/

use core::ptr;

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult, Ecc256PubKey, SecureElement};

use crate::cert_def::{CertificateDefinition, StdCertElement};
use crate::error::{ChainError, ChainStatus};
use crate::locator::{get_signature, get_subject_public_key, get_tbs_digest};
use crate::reconstruct::reconstruct;

/// Longest chain walked, leaf included
pub const MAX_CHAIN_DEPTH: usize = 4;

/// Definitions from `leaf_def` up to the one issued by the root, leaf first
///
/// # Error
///
/// * `CHAIN_CYCLE` - A definition is its own ancestor
/// * `CHAIN_TOO_DEEP` - More than `MAX_CHAIN_DEPTH` definitions
pub fn chain_defs(
    leaf_def: &CertificateDefinition,
) -> Result<Vec<&CertificateDefinition>, ChainError> {
    let mut defs = vec![leaf_def];
    let mut current = leaf_def;
    while let Some(issuer) = current.ca_cert_def {
        if defs.iter().any(|def| ptr::eq(*def, issuer)) {
            return Err(ChainError::new(defs.len(), CryptoAuthError::CHAIN_CYCLE));
        }
        if defs.len() == MAX_CHAIN_DEPTH {
            return Err(ChainError::new(defs.len(), CryptoAuthError::CHAIN_TOO_DEEP));
        }
        defs.push(issuer);
        current = issuer;
    }
    Ok(defs)
}

/// Check the signature of `cert` against `issuer_key`
///
/// A signature field that does not decode is a rejection, not an error.
///
/// # Error
///
/// * `FORMAT_CERT_TOO_SHORT` - `cert` does not cover the to-be-signed region
/// * `TEMPLATE_MISSING_ELEMENT` - `def` declares no signature
pub fn verify_cert<E: SecureElement + ?Sized>(
    se: &mut E,
    def: &CertificateDefinition,
    cert: &[u8],
    issuer_key: &Ecc256PubKey,
) -> CryptoAuthResult<bool> {
    let digest = get_tbs_digest(def, cert)?;
    if def.std_cert_loc(StdCertElement::Signature).is_none() {
        return Err(CryptoAuthError::TEMPLATE_MISSING_ELEMENT);
    }
    let signature = match get_signature(def, cert) {
        Ok(signature) => signature,
        Err(err) => {
            log::debug!("undecodable signature field: {err}");
            return Ok(false);
        }
    };
    se.verify_extern(&digest, &signature, issuer_key)
}

struct Link<'a> {
    def: &'a CertificateDefinition,
    cert: Vec<u8>,
    issuer_key: Ecc256PubKey,
}

/// Verify `leaf_cert` and every issuer above it
///
/// Issuer certificates are reconstructed from the element, top first, so each one takes the
/// authority key id of the key above it. The topmost issuer key is always `root_public_key`,
/// never one read from a certificate. Links are then checked from the leaf up.
///
/// Returns `ChainStatus::Invalid` for the first link whose signature is rejected; failures to
/// reconstruct or to run a verification are reported as `ChainError` instead.
pub fn verify_chain<E: SecureElement + ?Sized>(
    se: &mut E,
    leaf_def: &CertificateDefinition,
    leaf_cert: &[u8],
    root_public_key: &Ecc256PubKey,
) -> Result<ChainStatus, ChainError> {
    let defs = chain_defs(leaf_def)?;

    let mut issuer_key = *root_public_key;
    let mut issuers = Vec::with_capacity(defs.len() - 1);
    for (link, &def) in defs.iter().enumerate().skip(1).rev() {
        let cert = reconstruct(&mut *se, def, &issuer_key)
            .map_err(|err| ChainError::from_cert(link, err))?;
        let subject_key =
            get_subject_public_key(def, &cert).map_err(|code| ChainError::new(link, code))?;
        issuers.push(Link {
            def,
            cert,
            issuer_key,
        });
        issuer_key = subject_key;
    }

    if !verify_link(&mut *se, 0, leaf_def, leaf_cert, &issuer_key)? {
        return Ok(ChainStatus::Invalid { link: 0 });
    }
    for (link, issuer) in issuers.iter().rev().enumerate() {
        let link = link + 1;
        if !verify_link(&mut *se, link, issuer.def, &issuer.cert, &issuer.issuer_key)? {
            return Ok(ChainStatus::Invalid { link });
        }
    }

    log::debug!("certificate chain of {} links verified", defs.len());
    Ok(ChainStatus::Valid)
}

fn verify_link<E: SecureElement + ?Sized>(
    se: &mut E,
    link: usize,
    def: &CertificateDefinition,
    cert: &[u8],
    issuer_key: &Ecc256PubKey,
) -> Result<bool, ChainError> {
    let valid =
        verify_cert(se, def, cert, issuer_key).map_err(|code| ChainError::new(link, code))?;
    if valid {
        log::debug!("chain link {link} (template {}) verified", def.template_id);
    } else {
        log::warn!("chain link {link} (template {}) rejected", def.template_id);
    }
    Ok(valid)
}

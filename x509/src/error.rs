/*++

Licensed under the Apache-2.0 license.

File Name:

    error.rs

Abstract:

    Field and chain-link tagged errors returned by certificate reconstruction and validation.

--*/

use core::fmt;

use cryptoauth_drivers::CryptoAuthError;
use thiserror::Error;

use crate::cert_def::StdCertElement;

/// Certificate field a reconstruction failure is attributed to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CertField {
    /// The certificate definition itself
    Definition,

    /// The compressed certificate record
    CompCert,

    /// One of the standard certificate elements
    Std(StdCertElement),

    /// A custom element, by identifier
    Custom(&'static str),

    /// An element-independent device command
    Device,
}

impl fmt::Display for CertField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertField::Definition => f.write_str("certificate definition"),
            CertField::CompCert => f.write_str("compressed certificate"),
            CertField::Std(element) => write!(f, "{} element", element.name()),
            CertField::Custom(id) => write!(f, "custom element \"{id}\""),
            CertField::Device => f.write_str("device"),
        }
    }
}

/// Reconstruction failure tagged with the failing field
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("{field}: {code}")]
pub struct CertError {
    pub field: CertField,
    #[source]
    pub code: CryptoAuthError,
}

impl CertError {
    pub fn new(field: CertField, code: CryptoAuthError) -> Self {
        Self { field, code }
    }
}

impl From<CryptoAuthError> for CertError {
    fn from(code: CryptoAuthError) -> Self {
        Self::new(CertField::Device, code)
    }
}

/// Chain walk failure tagged with the failing link
///
/// Link 0 is the leaf certificate; link `n` is verified against the issuer `n + 1` levels up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("chain link {link}: {code}")]
pub struct ChainError {
    pub link: usize,
    pub field: Option<CertField>,
    #[source]
    pub code: CryptoAuthError,
}

impl ChainError {
    pub fn new(link: usize, code: CryptoAuthError) -> Self {
        Self {
            link,
            field: None,
            code,
        }
    }

    pub(crate) fn from_cert(link: usize, err: CertError) -> Self {
        Self {
            link,
            field: Some(err.field),
            code: err.code,
        }
    }
}

impl From<CryptoAuthError> for ChainError {
    fn from(code: CryptoAuthError) -> Self {
        Self::new(0, code)
    }
}

/// Outcome of a completed chain walk
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChainStatus {
    /// Every link verified up to the trusted root key
    Valid,

    /// The signature of `link` was rejected by its issuer key
    Invalid { link: usize },
}

impl ChainStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainStatus::Valid)
    }
}

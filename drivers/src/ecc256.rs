/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc256.rs

Abstract:

    File contains the ECC P-256 value types exchanged with the secure element.

--*/

use crate::{CryptoAuthError, CryptoAuthResult};

/// ECC-256 coordinate size in bytes
pub const ECC_256_COORD_SIZE: usize = 32;

/// Size of a public key stored in a slot with its padding bytes
pub const PADDED_PUB_KEY_SIZE: usize = 72;

/// ECC-256 Coordinate
pub type Ecc256Scalar = [u8; ECC_256_COORD_SIZE];

/// ECC-256 Public Key
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Ecc256PubKey {
    /// X coordinate
    pub x: Ecc256Scalar,

    /// Y coordinate
    pub y: Ecc256Scalar,
}

impl Ecc256PubKey {
    /// Size of the raw X || Y encoding
    pub const SIZE: usize = 2 * ECC_256_COORD_SIZE;

    /// Raw X || Y encoding, i.e. the X9.62 uncompressed point without its 0x04 prefix
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..ECC_256_COORD_SIZE].copy_from_slice(&self.x);
        buf[ECC_256_COORD_SIZE..].copy_from_slice(&self.y);
        buf
    }

    /// X9.62 uncompressed point (0x04 || X || Y)
    pub fn to_uncompressed(&self) -> [u8; Self::SIZE + 1] {
        let mut buf = [0u8; Self::SIZE + 1];
        buf[0] = 0x04;
        buf[1..].copy_from_slice(&self.to_bytes());
        buf
    }
}

impl From<&[u8; Ecc256PubKey::SIZE]> for Ecc256PubKey {
    /// Converts to this type from the input type.
    fn from(bytes: &[u8; Ecc256PubKey::SIZE]) -> Self {
        let mut key = Self::default();
        key.x.copy_from_slice(&bytes[..ECC_256_COORD_SIZE]);
        key.y.copy_from_slice(&bytes[ECC_256_COORD_SIZE..]);
        key
    }
}

impl TryFrom<&[u8]> for Ecc256PubKey {
    type Error = CryptoAuthError;

    fn try_from(bytes: &[u8]) -> CryptoAuthResult<Self> {
        let raw: &[u8; Ecc256PubKey::SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoAuthError::FORMAT_PUBLIC_KEY_LEN)?;
        Ok(raw.into())
    }
}

/// ECC-256 Signature
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Ecc256Signature {
    /// Random point
    pub r: Ecc256Scalar,

    /// Proof
    pub s: Ecc256Scalar,
}

impl Ecc256Signature {
    /// Size of the raw R || S encoding
    pub const SIZE: usize = 2 * ECC_256_COORD_SIZE;

    /// Raw R || S encoding
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..ECC_256_COORD_SIZE].copy_from_slice(&self.r);
        buf[ECC_256_COORD_SIZE..].copy_from_slice(&self.s);
        buf
    }
}

impl From<&[u8; Ecc256Signature::SIZE]> for Ecc256Signature {
    /// Converts to this type from the input type.
    fn from(bytes: &[u8; Ecc256Signature::SIZE]) -> Self {
        let mut sig = Self::default();
        sig.r.copy_from_slice(&bytes[..ECC_256_COORD_SIZE]);
        sig.s.copy_from_slice(&bytes[ECC_256_COORD_SIZE..]);
        sig
    }
}

/// Strip the slot padding from a stored public key
///
/// Keys written to 72-byte slots are laid out as 4 pad bytes, X, 4 pad bytes, Y.
pub fn pub_key_remove_padding(padded: &[u8; PADDED_PUB_KEY_SIZE]) -> Ecc256PubKey {
    let mut key = Ecc256PubKey::default();
    key.x.copy_from_slice(&padded[4..36]);
    key.y.copy_from_slice(&padded[40..72]);
    key
}

/// Lay out a public key for storage in a 72-byte slot
pub fn pub_key_add_padding(key: &Ecc256PubKey) -> [u8; PADDED_PUB_KEY_SIZE] {
    let mut padded = [0u8; PADDED_PUB_KEY_SIZE];
    padded[4..36].copy_from_slice(&key.x);
    padded[40..72].copy_from_slice(&key.y);
    padded
}

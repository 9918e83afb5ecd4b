/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc256.rs

Abstract:

    File contains implementation of Elliptic Curve Cryptography P-256 (ECC-256) Algorithm.

--*/

use cryptoauth_drivers::{
    CryptoAuthError, CryptoAuthResult, Ecc256PubKey, Ecc256Scalar, Ecc256Signature, DIGEST_SIZE,
    ECC_256_COORD_SIZE,
};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rfc6979::HmacDrbg;
use sha2::Sha256;

/// ECC-256 Private Key
pub type Ecc256PrivKey = Ecc256Scalar;

fn to_pub_key(verifying_key: &VerifyingKey) -> CryptoAuthResult<Ecc256PubKey> {
    let point = verifying_key.to_encoded_point(false);
    let mut pub_key = Ecc256PubKey::default();
    pub_key
        .x
        .copy_from_slice(point.x().ok_or(CryptoAuthError::DEVICE_NO_KEY)?);
    pub_key
        .y
        .copy_from_slice(point.y().ok_or(CryptoAuthError::DEVICE_NO_KEY)?);
    Ok(pub_key)
}

pub enum Ecc256 {}

impl Ecc256 {
    /// Generate an ECC private & public key pair from the DRBG stream
    ///
    /// # Arguments
    ///
    /// * `drbg` - Deterministic bit generator owned by the element
    ///
    /// # Result
    ///
    /// *  (Ecc256PrivKey, Ecc256PubKey) - Private & public key pair
    pub fn gen_key_pair(
        drbg: &mut HmacDrbg<Sha256>,
    ) -> CryptoAuthResult<(Ecc256PrivKey, Ecc256PubKey)> {
        let mut priv_key = [0u8; ECC_256_COORD_SIZE];
        loop {
            drbg.fill_bytes(&mut priv_key);
            // Zero or >= n is rejected; draw again
            if let Ok(signing_key) = SigningKey::from_slice(&priv_key) {
                let pub_key = to_pub_key(signing_key.verifying_key())?;
                return Ok((priv_key, pub_key));
            }
        }
    }

    /// Compute the public key of a private key
    pub fn public_key(priv_key: &Ecc256PrivKey) -> CryptoAuthResult<Ecc256PubKey> {
        let signing_key =
            SigningKey::from_slice(priv_key).map_err(|_| CryptoAuthError::DEVICE_NO_KEY)?;
        to_pub_key(signing_key.verifying_key())
    }

    /// Sign the hash with specified private key
    ///
    /// # Arguments
    ///
    /// * `priv_key` - Private key
    /// * `hash` - Hash to sign
    ///
    /// # Result
    ///
    /// *  Ecc256Signature - Signature
    pub fn sign(
        priv_key: &Ecc256PrivKey,
        hash: &[u8; DIGEST_SIZE],
    ) -> CryptoAuthResult<Ecc256Signature> {
        let signing_key =
            SigningKey::from_slice(priv_key).map_err(|_| CryptoAuthError::DEVICE_NO_KEY)?;
        let ecc_sig: Signature = signing_key
            .sign_prehash(hash)
            .map_err(|_| CryptoAuthError::DEVICE_BAD_PARAM)?;

        let bytes = ecc_sig.to_bytes();
        let mut signature = Ecc256Signature::default();
        signature.r.copy_from_slice(&bytes[..ECC_256_COORD_SIZE]);
        signature.s.copy_from_slice(&bytes[ECC_256_COORD_SIZE..]);
        Ok(signature)
    }

    /// Verify the signature
    ///
    /// A public key that is not a curve point, or a signature with a zero or
    /// out of range component, never verifies.
    ///
    /// # Arguments
    ///
    /// * `pub_key` - Public key
    /// * `hash` - Signed hash
    /// * `signature` - Signature to verify
    pub fn verify(
        pub_key: &Ecc256PubKey,
        hash: &[u8; DIGEST_SIZE],
        signature: &Ecc256Signature,
    ) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(&pub_key.to_uncompressed()) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&signature.to_bytes()) else {
            return false;
        };
        verifying_key.verify_prehash(hash, &signature).is_ok()
    }
}

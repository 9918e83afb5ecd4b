/*++

Licensed under the Apache-2.0 license.

File Name:

    signature.rs

Abstract:

    Conversion between raw ECDSA P-256 signatures and the certificate signature field.

--*/

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult, Ecc256Signature};

use crate::der_helper::{
    der_decode_len, der_decode_uint, der_encode_len, der_encode_uint, der_uint_len,
    DER_BIT_STR_TAG, DER_INTEGER_TAG, DER_SEQ_TAG,
};

/// MAX Signature length
///
/// BIT STRING header (2) + unused bits (1) + SEQUENCE header (2) + two 33-byte INTEGERs (2 * 35)
pub const MAX_ECDSA256_SIG_LEN: usize = 75;

/// Encode a signature as the certificate signature field
///
/// The field is a BIT STRING wrapping the `Ecdsa-Sig-Value` SEQUENCE of R and S.
pub fn der_encode_signature(
    sig: &Ecc256Signature,
) -> CryptoAuthResult<([u8; MAX_ECDSA256_SIG_LEN], usize)> {
    let r_uint_len = der_uint_len(&sig.r);
    let s_uint_len = der_uint_len(&sig.s);
    let seq_len = r_uint_len + s_uint_len;

    let mut buf = [0u8; MAX_ECDSA256_SIG_LEN];
    let mut pos = 0;

    // Encode Signature DER Bit String
    buf[pos] = DER_BIT_STR_TAG;
    pos += 1;
    pos += der_encode_len(1 + 2 + seq_len, &mut buf[pos..])
        .ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;
    buf[pos] = 0x00;
    pos += 1;

    // Encode Signature DER Sequence
    buf[pos] = DER_SEQ_TAG;
    pos += 1;
    pos += der_encode_len(seq_len, &mut buf[pos..]).ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;

    // Encode R and S Coordinates
    pos += der_encode_uint(&sig.r, &mut buf[pos..]).ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;
    pos += der_encode_uint(&sig.s, &mut buf[pos..]).ok_or(CryptoAuthError::FORMAT_DER_LENGTH)?;

    Ok((buf, pos))
}

/// Decode the certificate signature field
///
/// Returns the signature and the length of the field. Every length must be minimal and
/// consistent, and each integer must be a non-negative value of at most 32 bytes.
pub fn der_decode_signature(buf: &[u8]) -> CryptoAuthResult<(Ecc256Signature, usize)> {
    let err = CryptoAuthError::FORMAT_SIG_DER;

    if *buf.first().ok_or(err)? != DER_BIT_STR_TAG {
        return Err(err);
    }
    let (bit_str_len, len_size) = der_decode_len(&buf[1..]).ok_or(err)?;
    let mut pos = 1 + len_size;
    let end = pos.checked_add(bit_str_len).ok_or(err)?;
    // unused-bits byte and SEQUENCE tag must both lie inside the BIT STRING
    if bit_str_len < 2 || buf.len() < end || buf[pos] != 0x00 {
        return Err(err);
    }
    pos += 1;

    if buf[pos] != DER_SEQ_TAG {
        return Err(err);
    }
    pos += 1;
    let (seq_len, len_size) = der_decode_len(buf.get(pos..end).ok_or(err)?).ok_or(err)?;
    pos += len_size;
    if pos.checked_add(seq_len) != Some(end) {
        return Err(err);
    }

    let mut sig = Ecc256Signature::default();
    for component in [&mut sig.r, &mut sig.s] {
        let field = &buf[pos..end];
        pos += der_decode_uint(field, component).ok_or_else(|| component_error(field))?;
    }
    if pos != end {
        return Err(err);
    }
    Ok((sig, end))
}

/// Distinguish an integer that is too wide from one that is malformed
fn component_error(buf: &[u8]) -> CryptoAuthError {
    match buf {
        [DER_INTEGER_TAG, len, first, ..]
            if (*len > 33 && *len < 0x80) || (*len == 33 && *first != 0) =>
        {
            CryptoAuthError::FORMAT_SIG_COMPONENT_TOO_LARGE
        }
        _ => CryptoAuthError::FORMAT_SIG_DER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(r0: u8, s0: u8) -> Ecc256Signature {
        let mut sig = Ecc256Signature {
            r: [0x11; 32],
            s: [0x22; 32],
        };
        sig.r[0] = r0;
        sig.s[0] = s0;
        sig
    }

    #[test]
    fn test_high_bit_components_are_padded() {
        let (buf, len) = der_encode_signature(&sig(0x80, 0xFF)).unwrap();
        assert_eq!(len, MAX_ECDSA256_SIG_LEN);
        assert_eq!(&buf[..5], &[0x03, 0x49, 0x00, 0x30, 0x46]);
        assert_eq!(&buf[5..9], &[0x02, 0x21, 0x00, 0x80]);
        assert_eq!(&buf[40..44], &[0x02, 0x21, 0x00, 0xFF]);
    }

    #[test]
    fn test_low_bit_components_are_not_padded() {
        let (buf, len) = der_encode_signature(&sig(0x7F, 0x01)).unwrap();
        assert_eq!(len, 73);
        assert_eq!(&buf[..8], &[0x03, 0x47, 0x00, 0x30, 0x44, 0x02, 0x20, 0x7F]);
        assert_eq!(&buf[39..42], &[0x02, 0x20, 0x01]);
    }

    #[test]
    fn test_leading_zeros_are_trimmed() {
        let mut short = sig(0x00, 0x33);
        short.r[1] = 0x90;
        let (buf, len) = der_encode_signature(&short).unwrap();
        assert_eq!(len, 73);
        assert_eq!(&buf[5..9], &[0x02, 0x20, 0x00, 0x90]);
        let (decoded, consumed) = der_decode_signature(&buf[..len]).unwrap();
        assert_eq!(consumed, len);
        assert_eq!(decoded, short);
    }

    #[test]
    fn test_decode_recovers_components() {
        for (r0, s0) in [(0x00, 0x00), (0x7F, 0x80), (0x80, 0x7F), (0xFF, 0xFF)] {
            let original = sig(r0, s0);
            let (buf, len) = der_encode_signature(&original).unwrap();
            assert_eq!(der_decode_signature(&buf[..len]), Ok((original, len)));
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let (buf, len) = der_encode_signature(&sig(0x80, 0x12)).unwrap();
        let good = &buf[..len];

        // every single bit flip outside the integer values is rejected
        for byte in [0usize, 1, 2, 3, 4, 5, 6, 7] {
            for bit in 0..8 {
                let mut bad = good.to_vec();
                bad[byte] ^= 1 << bit;
                assert!(der_decode_signature(&bad).is_err(), "byte {byte} bit {bit}");
            }
        }

        assert_eq!(
            der_decode_signature(&good[..len - 1]),
            Err(CryptoAuthError::FORMAT_SIG_DER)
        );
        assert_eq!(der_decode_signature(&[]), Err(CryptoAuthError::FORMAT_SIG_DER));
    }

    #[test]
    fn test_decode_rejects_truncated_bit_string() {
        for buf in [
            &[0x03, 0x00, 0x00, 0x30][..],
            &[0x03, 0x01, 0x00, 0x30],
            &[0x03, 0x01, 0x00],
            &[0x03, 0x02, 0x00, 0x30],
            &[0x03, 0x00],
            &[0x03, 0x88, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x30],
        ] {
            assert_eq!(
                der_decode_signature(buf),
                Err(CryptoAuthError::FORMAT_SIG_DER),
                "{buf:02x?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_oversized_component() {
        // 34-byte R
        let mut buf = vec![0x03, 0x49, 0x00, 0x30, 0x46, 0x02, 0x22, 0x00, 0x80];
        buf.extend_from_slice(&[0x11; 32]);
        buf.extend_from_slice(&[0x02, 0x20]);
        buf.extend_from_slice(&[0x22; 32]);
        assert_eq!(buf.len(), 75);
        assert_eq!(
            der_decode_signature(&buf),
            Err(CryptoAuthError::FORMAT_SIG_COMPONENT_TOO_LARGE)
        );
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    transform.rs

Abstract:

    Byte level encoders applied to custom elements between device storage and the certificate.

--*/

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult};

use crate::cert_def::Transform;

fn spaced_hex(data: &[u8], upper: bool) -> Vec<u8> {
    let encoded = if upper {
        hex::encode_upper(data)
    } else {
        hex::encode(data)
    };
    let mut out = Vec::with_capacity(data.len() * 3);
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push(b' ');
        }
        out.extend_from_slice(pair);
    }
    out
}

impl Transform {
    /// Apply the transform to `data`
    pub fn apply(self, data: &[u8]) -> CryptoAuthResult<Vec<u8>> {
        let out = match self {
            Transform::None => data.to_vec(),
            Transform::Reverse => data.iter().rev().copied().collect(),
            Transform::Bin2HexUc => hex::encode_upper(data).into_bytes(),
            Transform::Bin2HexLc => hex::encode(data).into_bytes(),
            Transform::Bin2HexSpaceUc => spaced_hex(data, true),
            Transform::Bin2HexSpaceLc => spaced_hex(data, false),
            Transform::Hex2Bin => hex::decode(data).map_err(|_| CryptoAuthError::FORMAT_HEX)?,
            Transform::Hex2BinSpace => {
                let compact: Vec<u8> = data.iter().copied().filter(|c| *c != b' ').collect();
                hex::decode(compact).map_err(|_| CryptoAuthError::FORMAT_HEX)?
            }
        };
        Ok(out)
    }
}

/// Run `data` through `transforms` in declared order
pub fn apply_transforms(transforms: &[Transform], data: &[u8]) -> CryptoAuthResult<Vec<u8>> {
    transforms
        .iter()
        .try_fold(data.to_vec(), |value, transform| transform.apply(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SN03: [u8; 4] = [0x01, 0x23, 0xAB, 0x0C];

    #[test]
    fn test_bin_to_hex() {
        assert_eq!(Transform::Bin2HexUc.apply(&SN03).unwrap(), b"0123AB0C");
        assert_eq!(Transform::Bin2HexLc.apply(&SN03).unwrap(), b"0123ab0c");
        assert_eq!(
            Transform::Bin2HexSpaceUc.apply(&SN03).unwrap(),
            b"01 23 AB 0C"
        );
        assert_eq!(
            Transform::Bin2HexSpaceLc.apply(&SN03).unwrap(),
            b"01 23 ab 0c"
        );
        assert_eq!(Transform::Bin2HexSpaceUc.apply(&[]).unwrap(), b"");
    }

    #[test]
    fn test_hex_to_bin() {
        assert_eq!(Transform::Hex2Bin.apply(b"0123ab0C").unwrap(), SN03);
        assert_eq!(Transform::Hex2BinSpace.apply(b"01 23 AB 0C").unwrap(), SN03);
        assert_eq!(
            Transform::Hex2Bin.apply(b"012"),
            Err(CryptoAuthError::FORMAT_HEX)
        );
        assert_eq!(
            Transform::Hex2Bin.apply(b"01 2"),
            Err(CryptoAuthError::FORMAT_HEX)
        );
    }

    #[test]
    fn test_pipeline_order() {
        assert_eq!(apply_transforms(&[], &SN03).unwrap(), SN03);
        assert_eq!(
            apply_transforms(&[Transform::Reverse, Transform::Bin2HexUc], &SN03).unwrap(),
            b"0CAB2301"
        );
        assert_eq!(
            apply_transforms(&[Transform::Bin2HexUc, Transform::Reverse], &SN03).unwrap(),
            b"C0BA3210"
        );
        assert_eq!(
            apply_transforms(&[Transform::Bin2HexLc, Transform::None, Transform::Hex2Bin], &SN03)
                .unwrap(),
            SN03
        );
    }
}

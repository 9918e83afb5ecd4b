/*++

Licensed under the Apache-2.0 license.

File Name:

    der_helper.rs

Abstract:

    Helpers for encoding and decoding DER lengths and unsigned integers

--*/

/// DER Integer Tag
pub const DER_INTEGER_TAG: u8 = 0x02;

/// DER Bit String Tag
pub const DER_BIT_STR_TAG: u8 = 0x03;

/// DER Sequence Tag
pub const DER_SEQ_TAG: u8 = 0x30;

fn trim_leading_zeros(val: &[u8]) -> &[u8] {
    match val.iter().position(|&b| b != 0) {
        Some(i) => &val[i..],
        // If everything is 0, then we need len 1, and 0 as value
        None => &val[val.len().saturating_sub(1)..],
    }
}

/// Length of the DER content octets of an unsigned integer
fn uint_content_len(val: &[u8]) -> usize {
    let trimmed = trim_leading_zeros(val);
    match trimmed.first() {
        Some(&first) => trimmed.len() + usize::from(first >> 7),
        None => 1,
    }
}

/// Number of bytes used by the DER encoding of `len`
pub fn der_len_size(len: usize) -> usize {
    match len {
        0..=127 => 1,
        _ => 1 + trim_leading_zeros(&len.to_be_bytes()).len(),
    }
}

/// Compute len of DER encoding of an unsigned integer
pub fn der_uint_len(val: &[u8]) -> usize {
    let content = uint_content_len(val);
    // Tag + len + int
    1 + der_len_size(content) + content
}

/// Encode a DER length
pub fn der_encode_len(len: usize, buf: &mut [u8]) -> Option<usize> {
    match len {
        0..=127 => {
            *buf.get_mut(0)? = len as u8;
            Some(1)
        }
        _ => {
            let be_bytes = len.to_be_bytes();
            let len_bytes = trim_leading_zeros(&be_bytes);
            let size = len_bytes.len();
            *buf.get_mut(0)? = 0x80 | (size as u8);
            buf.get_mut(1..)?
                .get_mut(..size)?
                .copy_from_slice(len_bytes);
            Some(size + 1)
        }
    }
}

/// Decode a DER length, returning the length and the bytes consumed
///
/// Non-minimal encodings are rejected.
pub fn der_decode_len(buf: &[u8]) -> Option<(usize, usize)> {
    let first = *buf.first()?;
    if first < 0x80 {
        return Some((usize::from(first), 1));
    }
    let size = usize::from(first & 0x7F);
    if size == 0 || size > core::mem::size_of::<usize>() {
        return None;
    }
    let bytes = buf.get(1..1 + size)?;
    if bytes[0] == 0 {
        return None;
    }
    let len = bytes
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
    if len < 0x80 {
        return None;
    }
    Some((len, 1 + size))
}

/// DER Encode unsigned integer
pub fn der_encode_uint(val: &[u8], buf: &mut [u8]) -> Option<usize> {
    let mut pos = 0;

    *buf.get_mut(pos)? = DER_INTEGER_TAG;
    pos += 1;

    let sub_val = trim_leading_zeros(val);
    pos += der_encode_len(uint_content_len(val), buf.get_mut(pos..)?)?;

    if *sub_val.first()? > 127 {
        *buf.get_mut(pos)? = 0;
        pos += 1;
    }

    buf.get_mut(pos..)?
        .get_mut(..sub_val.len())?
        .copy_from_slice(sub_val);
    pos += sub_val.len();

    Some(pos)
}

/// Decode a minimally encoded, non-negative DER integer into a fixed-width big-endian value
///
/// Returns the bytes consumed.
pub fn der_decode_uint(buf: &[u8], out: &mut [u8]) -> Option<usize> {
    if *buf.first()? != DER_INTEGER_TAG {
        return None;
    }
    let (len, len_size) = der_decode_len(buf.get(1..)?)?;
    let start = 1 + len_size;
    let content = buf.get(start..start.checked_add(len)?)?;
    let first = *content.first()?;
    if first & 0x80 != 0 {
        // negative
        return None;
    }
    let value = if first == 0 && content.len() > 1 {
        // a zero pad is only allowed in front of a set msb
        if content[1] & 0x80 == 0 {
            return None;
        }
        &content[1..]
    } else {
        content
    };
    if value.len() > out.len() {
        return None;
    }
    out.fill(0);
    let pad = out.len() - value.len();
    out[pad..].copy_from_slice(value);
    Some(start + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_len() {
        assert_eq!(der_uint_len(&[0x00, 0x00]), 3);
        assert_eq!(der_uint_len(&[0x00, 0x7F]), 3);
        assert_eq!(der_uint_len(&[0x80]), 4);
        assert_eq!(der_uint_len(&[0xFF; 32]), 35);
        assert_eq!(der_uint_len(&[0x7F; 32]), 34);
    }

    #[test]
    fn test_encode_uint() {
        let mut buf = [0u8; 8];
        assert_eq!(der_encode_uint(&[0x00, 0x00, 0x01], &mut buf), Some(3));
        assert_eq!(&buf[..3], &[0x02, 0x01, 0x01]);

        assert_eq!(der_encode_uint(&[0x00, 0x80, 0x01], &mut buf), Some(5));
        assert_eq!(&buf[..5], &[0x02, 0x03, 0x00, 0x80, 0x01]);

        assert_eq!(der_encode_uint(&[0x00, 0x00], &mut buf), Some(3));
        assert_eq!(&buf[..3], &[0x02, 0x01, 0x00]);

        assert_eq!(der_encode_uint(&[0xFF; 8], &mut buf), None);
    }

    #[test]
    fn test_len_round_trip() {
        let mut buf = [0u8; 4];
        for len in [0usize, 1, 0x7F, 0x80, 0xFF, 0x100, 0x1EE, 0xFFFF] {
            let size = der_encode_len(len, &mut buf).unwrap();
            assert_eq!(size, der_len_size(len));
            assert_eq!(der_decode_len(&buf[..size]), Some((len, size)));
        }
    }

    #[test]
    fn test_decode_len_rejects_non_minimal() {
        assert_eq!(der_decode_len(&[0x81, 0x7F]), None);
        assert_eq!(der_decode_len(&[0x82, 0x00, 0x80]), None);
        assert_eq!(der_decode_len(&[0x80]), None);
        assert_eq!(der_decode_len(&[0x82, 0x01]), None);
    }

    #[test]
    fn test_decode_uint() {
        let mut out = [0u8; 4];
        assert_eq!(der_decode_uint(&[0x02, 0x01, 0x05], &mut out), Some(3));
        assert_eq!(out, [0, 0, 0, 5]);

        assert_eq!(
            der_decode_uint(&[0x02, 0x03, 0x00, 0x80, 0x01], &mut out),
            Some(5)
        );
        assert_eq!(out, [0, 0, 0x80, 0x01]);

        // negative
        assert_eq!(der_decode_uint(&[0x02, 0x01, 0x80], &mut out), None);
        // superfluous zero pad
        assert_eq!(der_decode_uint(&[0x02, 0x02, 0x00, 0x01], &mut out), None);
        // too wide
        assert_eq!(
            der_decode_uint(&[0x02, 0x05, 0x01, 0x02, 0x03, 0x04, 0x05], &mut out),
            None
        );
        // wrong tag
        assert_eq!(der_decode_uint(&[0x04, 0x01, 0x01], &mut out), None);
    }
}

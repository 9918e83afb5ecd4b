/*++

Licensed under the Apache-2.0 license.

File Name:

    date.rs

Abstract:

    Certificate date encodings and the bit-packed dates of the compressed certificate.

--*/

use cryptoauth_drivers::{CryptoAuthError, CryptoAuthResult};
use time::macros::datetime;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

/// Size of the packed dates in a compressed certificate
pub const COMP_DATES_SIZE: usize = 3;

/// First year a compressed certificate can carry
pub const COMP_DATE_BASE_YEAR: i32 = 2000;

/// Largest expiry period a compressed certificate can carry
pub const MAX_EXPIRE_YEARS: u8 = 31;

/// Encoding of a date inside the certificate
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DateFormat {
    /// `YYYY-MM-DDThh:mm:ssZ`
    Iso8601Sep,

    /// RFC 5280 UTCTime, `YYMMDDhhmmssZ`
    Rfc5280Utc,

    /// Seconds since the epoch, big-endian u32
    PosixU32Be,

    /// Seconds since the epoch, little-endian u32
    PosixU32Le,

    /// RFC 5280 GeneralizedTime, `YYYYMMDDhhmmssZ`
    Rfc5280Gen,
}

impl DateFormat {
    /// Encoded size in bytes
    pub fn size(self) -> usize {
        match self {
            DateFormat::Iso8601Sep => 20,
            DateFormat::Rfc5280Utc => 13,
            DateFormat::PosixU32Be | DateFormat::PosixU32Le => 4,
            DateFormat::Rfc5280Gen => 15,
        }
    }
}

/// Date that never expires, per RFC 5280 4.1.2.5
pub const NEVER_EXPIRES: PrimitiveDateTime = datetime!(9999-12-31 23:59:59);

fn build(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> CryptoAuthResult<PrimitiveDateTime> {
    let range = |_| CryptoAuthError::FORMAT_DATE_RANGE;
    let month = Month::try_from(month).map_err(range)?;
    let date = Date::from_calendar_date(year, month, day).map_err(range)?;
    let time = Time::from_hms(hour, minute, second).map_err(range)?;
    Ok(PrimitiveDateTime::new(date, time))
}

fn digits(text: &[u8]) -> CryptoAuthResult<u32> {
    text.iter().try_fold(0u32, |acc, &c| {
        if c.is_ascii_digit() {
            Ok(acc * 10 + u32::from(c - b'0'))
        } else {
            Err(CryptoAuthError::FORMAT_DATE_DIGIT)
        }
    })
}

fn two_digits(text: &[u8]) -> CryptoAuthResult<u8> {
    // two decimal digits always fit
    Ok(digits(text)? as u8)
}

fn expect(text: &[u8], pos: usize, c: u8) -> CryptoAuthResult<()> {
    if text[pos] == c {
        Ok(())
    } else {
        Err(CryptoAuthError::FORMAT_DATE_DIGIT)
    }
}

/// Encode a date in the requested certificate format
pub fn encode_date(format: DateFormat, date: &PrimitiveDateTime) -> CryptoAuthResult<Vec<u8>> {
    let year = date.year();
    let (month, day) = (u8::from(date.month()), date.day());
    let (hour, minute, second) = (date.hour(), date.minute(), date.second());

    let encoded = match format {
        DateFormat::Rfc5280Utc => {
            if !(1950..=2049).contains(&year) {
                return Err(CryptoAuthError::FORMAT_UTC_YEAR_RANGE);
            }
            format!(
                "{:02}{month:02}{day:02}{hour:02}{minute:02}{second:02}Z",
                year % 100
            )
            .into_bytes()
        }
        DateFormat::Rfc5280Gen | DateFormat::Iso8601Sep => {
            if !(0..=9999).contains(&year) {
                return Err(CryptoAuthError::FORMAT_DATE_RANGE);
            }
            if format == DateFormat::Rfc5280Gen {
                format!("{year:04}{month:02}{day:02}{hour:02}{minute:02}{second:02}Z").into_bytes()
            } else {
                format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
                    .into_bytes()
            }
        }
        DateFormat::PosixU32Be | DateFormat::PosixU32Le => {
            let secs = u32::try_from(date.assume_utc().unix_timestamp())
                .map_err(|_| CryptoAuthError::FORMAT_DATE_RANGE)?;
            if format == DateFormat::PosixU32Be {
                secs.to_be_bytes().to_vec()
            } else {
                secs.to_le_bytes().to_vec()
            }
        }
    };
    Ok(encoded)
}

/// Decode a date from its certificate encoding
pub fn decode_date(format: DateFormat, encoded: &[u8]) -> CryptoAuthResult<PrimitiveDateTime> {
    if encoded.len() != format.size() {
        return Err(CryptoAuthError::FORMAT_DATE_LEN);
    }

    match format {
        DateFormat::Rfc5280Utc => {
            expect(encoded, 12, b'Z')?;
            let yy = digits(&encoded[0..2])? as i32;
            // RFC 5280 4.1.2.5.1
            let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
            build(
                year,
                two_digits(&encoded[2..4])?,
                two_digits(&encoded[4..6])?,
                two_digits(&encoded[6..8])?,
                two_digits(&encoded[8..10])?,
                two_digits(&encoded[10..12])?,
            )
        }
        DateFormat::Rfc5280Gen => {
            expect(encoded, 14, b'Z')?;
            build(
                digits(&encoded[0..4])? as i32,
                two_digits(&encoded[4..6])?,
                two_digits(&encoded[6..8])?,
                two_digits(&encoded[8..10])?,
                two_digits(&encoded[10..12])?,
                two_digits(&encoded[12..14])?,
            )
        }
        DateFormat::Iso8601Sep => {
            for (pos, c) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':'), (19, b'Z')] {
                expect(encoded, pos, c)?;
            }
            build(
                digits(&encoded[0..4])? as i32,
                two_digits(&encoded[5..7])?,
                two_digits(&encoded[8..10])?,
                two_digits(&encoded[11..13])?,
                two_digits(&encoded[14..16])?,
                two_digits(&encoded[17..19])?,
            )
        }
        DateFormat::PosixU32Be | DateFormat::PosixU32Le => {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(encoded);
            let secs = if format == DateFormat::PosixU32Be {
                u32::from_be_bytes(bytes)
            } else {
                u32::from_le_bytes(bytes)
            };
            let date = OffsetDateTime::from_unix_timestamp(i64::from(secs))
                .map_err(|_| CryptoAuthError::FORMAT_DATE_RANGE)?;
            Ok(PrimitiveDateTime::new(date.date(), date.time()))
        }
    }
}

/// Expire date of a certificate issued at `issue` and valid for `expire_years`
///
/// Zero years never expires. A Feb 29 issue date expiring in a common year moves to Feb 28.
pub fn expire_date(
    issue: &PrimitiveDateTime,
    expire_years: u8,
) -> CryptoAuthResult<PrimitiveDateTime> {
    if expire_years == 0 {
        return Ok(NEVER_EXPIRES);
    }
    let year = issue.year() + i32::from(expire_years);
    if year > 9999 {
        return Err(CryptoAuthError::FORMAT_DATE_RANGE);
    }
    let date = Date::from_calendar_date(year, issue.month(), issue.day())
        .or_else(|_| Date::from_calendar_date(year, issue.month(), 28))
        .map_err(|_| CryptoAuthError::FORMAT_DATE_RANGE)?;
    Ok(PrimitiveDateTime::new(date, issue.time()))
}

/// Pack an issue date and expiry period into the compressed certificate encoding
///
/// Minutes and seconds are not represented and are dropped.
pub fn compress_dates(
    issue: &PrimitiveDateTime,
    expire_years: u8,
) -> CryptoAuthResult<[u8; COMP_DATES_SIZE]> {
    let year_offset = issue.year() - COMP_DATE_BASE_YEAR;
    if !(0..=31).contains(&year_offset) || expire_years > MAX_EXPIRE_YEARS {
        return Err(CryptoAuthError::FORMAT_COMP_DATE_RANGE);
    }
    let (year, month, day, hour) = (
        year_offset as u8,
        u8::from(issue.month()),
        issue.day(),
        issue.hour(),
    );
    Ok([
        (year << 3) | (month >> 1),
        ((month & 0x01) << 7) | (day << 2) | (hour >> 3),
        ((hour & 0x07) << 5) | expire_years,
    ])
}

/// Unpack compressed dates into the issue date and expiry period
pub fn decompress_dates(
    enc_dates: &[u8; COMP_DATES_SIZE],
) -> CryptoAuthResult<(PrimitiveDateTime, u8)> {
    let year = COMP_DATE_BASE_YEAR + i32::from(enc_dates[0] >> 3);
    let month = ((enc_dates[0] & 0x07) << 1) | (enc_dates[1] >> 7);
    let day = (enc_dates[1] >> 2) & 0x1F;
    let hour = ((enc_dates[1] & 0x03) << 3) | (enc_dates[2] >> 5);
    let expire_years = enc_dates[2] & 0x1F;
    let issue = build(year, month, day, hour, 0, 0)
        .map_err(|_| CryptoAuthError::FORMAT_COMP_DATE_RANGE)?;
    Ok((issue, expire_years))
}

//! Bounded decimal parsing of log fields.

use std::num::IntErrorKind;

use crate::error::NumberError;

/// Parse `token` as a decimal integer within `min..=max`.
///
/// An optional sign is accepted, surrounding whitespace is not. Values too
/// large for `i64` are reported as out of range rather than non-numeric.
pub fn parse_bounded(token: &[u8], min: i64, max: i64) -> Result<i64, NumberError> {
    let text = std::str::from_utf8(token).map_err(|_| NumberError::NonNumeric)?;
    let value = text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            NumberError::OutOfRange { min, max }
        }
        _ => NumberError::NonNumeric,
    })?;

    if value < min || value > max {
        return Err(NumberError::OutOfRange { min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"0", 0, 23 => Ok(0))]
    #[test_case(b"23", 0, 23 => Ok(23))]
    #[test_case(b"07", 0, 23 => Ok(7); "leading zero")]
    #[test_case(b"+5", 0, 23 => Ok(5); "explicit sign")]
    #[test_case(b"24", 0, 23 => Err(NumberError::OutOfRange { min: 0, max: 23 }))]
    #[test_case(b"-1", 0, 23 => Err(NumberError::OutOfRange { min: 0, max: 23 }))]
    #[test_case(b"", 0, 23 => Err(NumberError::NonNumeric); "empty")]
    #[test_case(b"-", 0, 23 => Err(NumberError::NonNumeric); "dash placeholder")]
    #[test_case(b" 1", 0, 23 => Err(NumberError::NonNumeric); "leading space")]
    #[test_case(b"1a", 0, 23 => Err(NumberError::NonNumeric); "trailing garbage")]
    #[test_case(b"\xff", 0, 23 => Err(NumberError::NonNumeric); "invalid utf8")]
    #[test_case(b"99999999999999999999", 0, i64::MAX => Err(NumberError::OutOfRange { min: 0, max: i64::MAX }); "overflow")]
    #[test_case(b"9223372036854775807", 0, i64::MAX => Ok(i64::MAX); "max bandwidth")]
    fn test_parse_bounded(token: &[u8], min: i64, max: i64) -> Result<i64, NumberError> {
        parse_bounded(token, min, max)
    }
}

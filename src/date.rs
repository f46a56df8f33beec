//! Timestamp sub-parser for the bracketed `day/Mon/Year:HH:MM:SS zone` field.

use crate::number::parse_bounded;
use crate::record::non_empty;

/// Raw components of the date field. All components are missing when the
/// field doesn't follow the expected layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate<'a> {
    pub day: Option<&'a [u8]>,
    pub month: Option<&'a [u8]>,
    pub year: Option<&'a [u8]>,
    pub hour: Option<&'a [u8]>,
    pub minute: Option<&'a [u8]>,
    pub second: Option<&'a [u8]>,
    pub zone: Option<&'a [u8]>,
}

impl<'a> ParsedDate<'a> {
    pub fn parse(date: &'a [u8]) -> Self {
        let (stamp, zone) = match date.iter().position(|&b| b == b' ') {
            Some(space) => (&date[..space], non_empty(&date[space + 1..])),
            None => (date, None),
        };

        let mut parsed = Self {
            zone,
            ..Self::default()
        };

        let mut slashes = stamp.splitn(3, |&b| b == b'/');
        let (Some(day), Some(month), Some(rest)) = (slashes.next(), slashes.next(), slashes.next())
        else {
            return parsed;
        };

        let clock: Vec<&[u8]> = rest.splitn(4, |&b| b == b':').collect();
        let &[year, hour, minute, second] = &clock[..] else {
            return parsed;
        };

        if [day, month, year, hour, minute, second]
            .iter()
            .any(|part| part.is_empty())
        {
            return parsed;
        }

        parsed.day = Some(day);
        parsed.month = Some(month);
        parsed.year = Some(year);
        parsed.hour = Some(hour);
        parsed.minute = Some(minute);
        parsed.second = Some(second);
        parsed
    }

    /// Hour of day when present and within `0..=23`.
    pub fn hour(&self) -> Option<u8> {
        let hour = self.hour?;
        match parse_bounded(hour, 0, 23) {
            Ok(hour) => u8::try_from(hour).ok(),
            Err(_) => None,
        }
    }
}

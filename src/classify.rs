//! Classification of a tokenized line into histogram bucket indices.

use std::net::IpAddr;

use crate::date::ParsedDate;
use crate::geo::GeoLocator;
use crate::number::parse_bounded;
use crate::record::LogRecord;
use crate::request::ParsedRequest;
use crate::tables::{self, CountryId, STATUS_CODE_MAX};

/// Largest accepted object size, sizes beyond the signed 64-bit domain are discarded.
const OBJECT_SIZE_MAX: i64 = i64::MAX;

/// A line with a valid remote address and every field it could classify.
///
/// Each field is `None` when missing or out of range, independently of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub address: IpAddr,
    pub country: Option<CountryId>,
    pub continent: Option<&'static str>,
    pub hour: Option<u8>,
    pub method: Option<usize>,
    pub protocol: Option<usize>,
    pub status: Option<usize>,
    pub object_size: Option<u64>,
}

impl ClassifiedLine {
    /// Classify `record`, or return `None` when its remote host is not an IPv4 or IPv6 address.
    pub fn classify(record: &LogRecord<'_>, geo: &dyn GeoLocator) -> Option<Self> {
        let address = parse_address(record.remote_host?)?;

        let country = geo.lookup_country(address);
        let continent = country.and_then(|id| geo.continent_of(id));

        let hour = record.date.and_then(|date| ParsedDate::parse(date).hour());

        let request = record.request.map(ParsedRequest::parse).unwrap_or_default();
        let method = request.method.and_then(tables::method_index);
        let protocol = request.protocol.and_then(tables::protocol_index);

        let status = record
            .status_code
            .and_then(|code| parse_bounded(code, 0, STATUS_CODE_MAX as i64 - 1).ok())
            .and_then(|code| usize::try_from(code).ok());

        let object_size = record
            .object_size
            .and_then(|size| parse_bounded(size, 0, OBJECT_SIZE_MAX).ok())
            .and_then(|size| u64::try_from(size).ok());

        Some(Self {
            address,
            country,
            continent,
            hour,
            method,
            protocol,
            status,
            object_size,
        })
    }
}

/// Parse a remote host token as an IPv4 or IPv6 address.
fn parse_address(host: &[u8]) -> Option<IpAddr> {
    std::str::from_utf8(host).ok()?.parse().ok()
}

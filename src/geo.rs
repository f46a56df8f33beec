//! Address to country resolution.

use std::net::IpAddr;
use std::path::Path;

use maxminddb::PathElement;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tables::{self, CountryId};

/// Geolocation collaborator consulted once per valid line.
pub trait GeoLocator {
    /// Country of `addr`, `None` when unknown.
    fn lookup_country(&self, addr: IpAddr) -> Option<CountryId>;

    /// Continent code of a resolved country.
    fn continent_of(&self, id: CountryId) -> Option<&'static str> {
        tables::continent_of(id)
    }
}

/// Locator used when no database is available: every lookup is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeoLocator;

impl GeoLocator for NoGeoLocator {
    fn lookup_country(&self, _addr: IpAddr) -> Option<CountryId> {
        None
    }
}

/// Locator backed by a MaxMind country or city database.
pub struct MaxMindLocator {
    reader: maxminddb::Reader<maxminddb::Mmap>,
}

impl MaxMindLocator {
    pub fn open(path: &Path) -> Result<Self> {
        // SAFETY: the database is mapped read-only and never modified while
        // the reader is alive.
        let reader = unsafe { maxminddb::Reader::open_mmap(path) }.map_err(|source| {
            Error::GeoIp {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(
            path = %path.display(),
            database = %reader.metadata.database_type,
            "geoip database opened"
        );
        Ok(Self { reader })
    }

    fn decode_iso_code(&self, addr: IpAddr, key: &str) -> Option<String> {
        let lookup = self.reader.lookup(addr).ok()?;
        lookup
            .decode_path::<String>(&[PathElement::Key(key), PathElement::Key("iso_code")])
            .ok()
            .flatten()
    }
}

impl GeoLocator for MaxMindLocator {
    fn lookup_country(&self, addr: IpAddr) -> Option<CountryId> {
        // anycast and satellite ranges often only carry the registered country
        let code = self
            .decode_iso_code(addr, "country")
            .or_else(|| self.decode_iso_code(addr, "registered_country"))?;
        tables::country_id(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_geo_locator_is_always_unknown() {
        let geo = NoGeoLocator;
        assert_eq!(geo.lookup_country("192.0.2.1".parse().unwrap()), None);
        assert_eq!(geo.lookup_country("2001:db8::1".parse().unwrap()), None);
    }

    #[test]
    fn test_default_continent_lookup() {
        let geo = NoGeoLocator;
        let de = tables::country_id("DE").unwrap();
        assert_eq!(geo.continent_of(de), Some("EU"));
    }

    #[test]
    fn test_open_missing_database() {
        let result = MaxMindLocator::open(Path::new("/nonexistent/GeoLite2-Country.mmdb"));
        assert!(matches!(result, Err(Error::GeoIp { .. })));
    }
}

//! GeoLite2 country lookup
//!
//! Wraps a MaxMind GeoLite2 City database. The database is optional on a
//! deployment: opening a missing database yields `None`, and unknown or
//! unparsable addresses resolve to `None` rather than an error.

use std::net::IpAddr;
use std::path::Path;

use log::debug;
use maxminddb::geoip2;

/// An opened GeoLite2 City database
pub struct GeoDb {
    reader: maxminddb::Reader<Vec<u8>>,
}

impl GeoDb {
    /// Opens the database at `path`, or `None` when it cannot be read.
    pub fn open(path: &Path) -> Option<GeoDb> {
        match maxminddb::Reader::open_readfile(path) {
            Ok(reader) => Some(GeoDb { reader }),
            Err(err) => {
                debug!("GeoLite2 database unavailable at {}: {err}", path.display());
                None
            }
        }
    }

    /// Full English country name of origin for `ip`, or `None` when the
    /// address is not in the database or does not parse.
    pub fn country(&self, ip: &str) -> Option<String> {
        let addr: IpAddr = ip.parse().ok()?;
        let city = self.reader.lookup::<geoip2::City>(addr).ok()?;
        city.country
            .and_then(|country| country.names)
            .and_then(|names| names.get("en").map(|name| name.to_string()))
    }
}

use tracing::debug;

use super::{DEFAULT_WORKING_EPSG, EPSG_ETRS89, GEOGRAPHIC_EPSG, NORWEGIAN_UTM_EPSG};

/// Largest absolute longitude in degrees
pub const MAX_ABS_LONGITUDE: f64 = 180.0;
/// Largest absolute latitude in degrees
pub const MAX_ABS_LATITUDE: f64 = 90.0;

/// Easting range of Norwegian UTM coordinates in meters
pub const UTM_MIN_EASTING: f64 = 0.0;
pub const UTM_MAX_EASTING: f64 = 1_000_000.0;
/// Northing range of Norwegian UTM coordinates in meters
pub const UTM_MIN_NORTHING: f64 = 5_000_000.0;
pub const UTM_MAX_NORTHING: f64 = 8_000_000.0;

/// Pair fits a longitude/latitude in degrees.
pub fn looks_like_degrees(x: f64, y: f64) -> bool {
    x.abs() <= MAX_ABS_LONGITUDE && y.abs() <= MAX_ABS_LATITUDE
}

/// Pair fits an easting/northing in a Norwegian UTM zone.
pub fn looks_like_utm(x: f64, y: f64) -> bool {
    (UTM_MIN_EASTING..=UTM_MAX_EASTING).contains(&x)
        && (UTM_MIN_NORTHING..=UTM_MAX_NORTHING).contains(&y)
}

/// The caller's working projection, or UTM33 when it is unknown (0).
pub fn working_or_default(working_epsg: u32) -> u32 {
    if working_epsg > 0 {
        working_epsg
    } else {
        DEFAULT_WORKING_EPSG
    }
}

/// Decide which EPSG code to attach to a coordinate pair.
///
/// A geographic claim on meter-like numbers becomes the working projection;
/// a UTM claim on degree-like numbers becomes ETRS89. Any other claim is
/// trusted. This only patches known registry defects; it never rejects input.
pub fn reconcile_epsg(x: f64, y: f64, declared: u32, working_epsg: u32) -> u32 {
    let is_degrees = looks_like_degrees(x, y);
    let is_utm = looks_like_utm(x, y);

    if GEOGRAPHIC_EPSG.contains(&declared) && !is_degrees && is_utm {
        let corrected = working_or_default(working_epsg);
        debug!(
            "EPSG:{} declared for meter-like ({}, {}), using EPSG:{}",
            declared, x, y, corrected
        );
        return corrected;
    }

    if NORWEGIAN_UTM_EPSG.contains(&declared) && is_degrees {
        debug!(
            "EPSG:{} declared for degree-like ({}, {}), using EPSG:{}",
            declared, x, y, EPSG_ETRS89
        );
        return EPSG_ETRS89;
    }

    declared
}

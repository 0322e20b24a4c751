//! Coordinate reference system hints and sanity checks.
//!
//! The registries do not always stamp coordinates with the EPSG code they
//! were actually delivered in. This module reads whatever hint is present and
//! corrects it when the numbers clearly belong to another system.

mod epsg;
mod heuristic;

pub use epsg::{epsg_from_crs_block, epsg_from_value, extract_epsg};
pub use heuristic::{looks_like_degrees, looks_like_utm, reconcile_epsg, working_or_default};

/// ETRS89 geographic (lon/lat degrees)
pub const EPSG_ETRS89: u32 = 4258;
/// WGS 84 geographic (lon/lat degrees)
pub const EPSG_WGS84: u32 = 4326;
/// ETRS89 / UTM zone 33N, the usual Norwegian working projection
pub const EPSG_UTM33: u32 = 25833;

/// Geographic codes whose coordinates must be degrees
pub const GEOGRAPHIC_EPSG: &[u32] = &[EPSG_ETRS89, EPSG_WGS84];
/// ETRS89 / UTM zones 32N, 33N and 34N used across mainland Norway
pub const NORWEGIAN_UTM_EPSG: &[u32] = &[25832, EPSG_UTM33, 25834];

/// Code assumed when a record carries no usable CRS hint
pub const DEFAULT_EPSG: u32 = EPSG_ETRS89;
/// Working projection assumed when the caller does not know its own
pub const DEFAULT_WORKING_EPSG: u32 = EPSG_UTM33;

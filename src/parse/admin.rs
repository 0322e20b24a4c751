//! County and municipality responses from the kommuneinfo API.

use serde_json::Value;
use tracing::debug;

use super::lookup;
use crate::crs;
use crate::geometry::geometry_from_geojson;
use crate::models::{AdminKind, AdminSelection, AdminUnit, Geometry, Hit, HitAttributes};

type Keys = &'static [&'static str];

/// Candidate keys for (list container, number, name) per unit type
fn list_keys(kind: AdminKind) -> (Keys, Keys, Keys) {
    match kind {
        AdminKind::County => (
            &["fylker", "data", "content"],
            &["fylkesnummer", "nummer", "kode"],
            &["fylkesnavn", "navn", "name"],
        ),
        AdminKind::Municipality => (
            &["kommuner", "data", "content"],
            &["kommunenummer", "kommuneNr", "nummer", "kode"],
            &["kommunenavn", "kommuneNavn", "navn", "name"],
        ),
    }
}

/// Parse a county or municipality list into units sorted by name.
pub fn parse_admin_units(data: &Value, kind: AdminKind) -> Vec<AdminUnit> {
    let (container, number_keys, name_keys) = list_keys(kind);

    let mut units: Vec<AdminUnit> = lookup::records(data, container)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| {
            let number = lookup::text(item, number_keys)?;
            let name = lookup::text(item, name_keys)?;
            Some(AdminUnit { number, name })
        })
        .collect();

    units.sort_by_key(|unit| unit.name.to_lowercase());
    units
}

/// Find the boundary geometry of an area response and its source EPSG.
///
/// Accepts a FeatureCollection (first feature with usable geometry wins) or
/// an `{"omrade": {type, coordinates, crs}}` object.
pub fn area_geometry(data: &Value, working_epsg: u32) -> Option<(Geometry, u32)> {
    let fallback = crs::working_or_default(working_epsg);

    if let Some(features) = data.get("features").and_then(Value::as_array) {
        let src_epsg = crs::epsg_from_crs_block(data, fallback);
        return features
            .iter()
            .filter_map(|feature| feature.get("geometry"))
            .find_map(geometry_from_geojson)
            .map(|geometry| (geometry, src_epsg));
    }

    let omrade = data.get("omrade").filter(|omrade| omrade.is_object())?;
    let src_epsg = crs::epsg_from_crs_block(omrade, fallback);
    geometry_from_geojson(omrade).map(|geometry| (geometry, src_epsg))
}

/// Build the boundary hit for a selected county or municipality.
///
/// Yields at most one hit; none when the response holds no usable area.
pub fn parse_area(
    data: &Value,
    kind: AdminKind,
    selection: &AdminSelection,
    working_epsg: u32,
) -> Vec<Hit> {
    let (geometry, epsg) = match area_geometry(data, working_epsg) {
        Some(found) => found,
        None => {
            debug!("No {} geometry for {}", kind.noun(), selection.number);
            return Vec::new();
        }
    };

    let label = selection.label(kind);
    let name = selection.name.clone().unwrap_or_default();

    let hit = match kind {
        AdminKind::County => Hit::county(
            label,
            geometry,
            epsg,
            HitAttributes {
                object_type: kind.noun().to_string(),
                county_name: name,
                county_number: selection.number.clone(),
                ..Default::default()
            },
        ),
        AdminKind::Municipality => Hit::municipality(
            label,
            geometry,
            epsg,
            HitAttributes {
                object_type: kind.noun().to_string(),
                municipality_name: name,
                municipality_number: selection.number.clone(),
                ..Default::default()
            },
        ),
    };

    vec![hit]
}

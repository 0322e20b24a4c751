//! Property geocoding (`/eiendom/v1/geokoding`) responses.
//!
//! The registry answers with a GeoJSON FeatureCollection holding one feature
//! per parcel area. Every feature with a usable geometry becomes its own hit;
//! features that share parcel numbers are kept apart on purpose.

use serde_json::Value;
use tracing::debug;

use super::lookup;
use crate::crs;
use crate::geometry::geometry_from_geojson;
use crate::models::{CadastralIds, Hit, HitAttributes};

const DEFAULT_PARCEL_TYPE: &str = "Teig";

/// Parse a property FeatureCollection into property hits.
///
/// The source EPSG comes from the collection's `crs` member, falling back
/// to `working_epsg` (the projection the request asked for).
pub fn parse_properties(data: &Value, working_epsg: u32) -> Vec<Hit> {
    let src_epsg = crs::epsg_from_crs_block(data, crs::working_or_default(working_epsg));

    let features = match data.get("features").and_then(Value::as_array) {
        Some(features) => features,
        None => return Vec::new(),
    };

    let hits: Vec<Hit> = features
        .iter()
        .filter_map(|feature| property_from_feature(feature, src_epsg))
        .collect();

    debug!(
        "Parsed {} property hits from {} features (EPSG:{})",
        hits.len(),
        features.len(),
        src_epsg
    );

    hits
}

/// Build one property hit from a GeoJSON feature.
pub fn property_from_feature(feature: &Value, src_epsg: u32) -> Option<Hit> {
    let feature = feature.as_object()?;
    let geometry = feature.get("geometry").and_then(geometry_from_geojson)?;

    let empty = serde_json::Map::new();
    let props = feature
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let gnr = lookup::count(props, &["gardsnummer"]);
    let bnr = lookup::count(props, &["bruksnummer"]);
    let fnr = lookup::count(props, &["festenummer"]);
    let snr = lookup::count(props, &["seksjonsnummer"]);
    let teig_id = lookup::first_present(props, &["lokalid"]).and_then(lookup::parse_int);

    let mut label = lookup::text(props, &["matrikkelnummertekst"]).unwrap_or_else(|| {
        if gnr > 0 && bnr > 0 {
            format!("{}/{}", gnr, bnr)
        } else {
            String::new()
        }
    });
    let fnr_suffix = format!("/{}", fnr);
    if fnr > 0 && !label.contains(&fnr_suffix) {
        label.push_str(&fnr_suffix);
    }

    let attributes = HitAttributes {
        object_type: classify_parcel(fnr, snr).to_string(),
        municipality_number: lookup::text_or_empty(props, &["kommunenummer"]),
        property_ref: label.clone(),
        cadastre: Some(CadastralIds {
            gnr: non_zero(gnr),
            bnr: non_zero(bnr),
            fnr: non_zero(fnr),
            snr: non_zero(snr),
            teig_id,
            parcel_type: lookup::text(props, &["objekttype"])
                .unwrap_or_else(|| DEFAULT_PARCEL_TYPE.to_string()),
        }),
        ..Default::default()
    };

    Some(Hit::property(label, geometry, src_epsg, attributes))
}

/// Object label of a parcel: "Seksjon" when a section number is set,
/// "Festetomt" when a leasehold number is set, otherwise "Eiendom".
///
/// This is a guessed classification inferred from the numbers alone; the
/// registry does not document it.
pub fn classify_parcel(fnr: u32, snr: u32) -> &'static str {
    if snr > 0 {
        "Seksjon"
    } else if fnr > 0 {
        "Festetomt"
    } else {
        "Eiendom"
    }
}

fn non_zero(n: u32) -> Option<u32> {
    (n > 0).then_some(n)
}

/// Feature counts used to tell "no parcel" apart from "parcel without area".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyDiagnosis {
    pub features: usize,
    pub without_geometry: usize,
}

impl PropertyDiagnosis {
    /// The registry found parcels but sent none of their areas, which
    /// happens while the property service runs degraded.
    pub fn geometry_missing(&self) -> bool {
        self.features > 0 && self.without_geometry == self.features
    }
}

/// Count features and those whose geometry is missing or has no coordinates.
pub fn diagnose_properties(data: &Value) -> PropertyDiagnosis {
    let features = match data.get("features").and_then(Value::as_array) {
        Some(features) => features,
        None => return PropertyDiagnosis::default(),
    };

    let without_geometry = features
        .iter()
        .filter(|feature| {
            let geometry = match feature.get("geometry").filter(|g| g.is_object()) {
                Some(geometry) => geometry,
                None => return true,
            };
            let has_type = geometry
                .get("type")
                .and_then(Value::as_str)
                .map_or(false, |t| !t.is_empty());
            let has_coordinates = match geometry.get("coordinates") {
                None | Some(Value::Null) => false,
                Some(Value::Array(items)) => {
                    !(items.is_empty() || items.as_slice() == [Value::from("string")])
                }
                Some(_) => true,
            };
            !(has_type && has_coordinates)
        })
        .count();

    PropertyDiagnosis {
        features: features.len(),
        without_geometry,
    }
}

//! Address search (`/adresser/v1/sok`) responses.

use serde_json::Value;
use tracing::debug;

use super::lookup::{self, Object};
use crate::crs::{self, looks_like_utm, reconcile_epsg, DEFAULT_EPSG};
use crate::models::{Hit, HitAttributes, HitPoint};

const RECORD_KEYS: &[&str] = &["adresser"];
const LABEL_KEYS: &[&str] = &["adressetekst", "adresseTekst"];
const POINT_KEYS: &[&str] = &["representasjonspunkt", "adresseringspunkt", "punkt"];
const EAST_KEYS: &[&str] = &["ost", "øst"];
const DEFAULT_OBJTYPE: &str = "Vegadresse";

/// Parse an address search response into address hits.
pub fn parse_addresses(data: &Value, working_epsg: u32) -> Vec<Hit> {
    lookup::records(data, RECORD_KEYS)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| address_from_object(obj, working_epsg))
        .collect()
}

/// Build one address hit, or `None` when the record has no usable point.
pub fn address_from_object(obj: &Object, working_epsg: u32) -> Option<Hit> {
    let label = lookup::text_or_empty(obj, LABEL_KEYS);

    let point = match address_point(obj, working_epsg) {
        Some(point) => point,
        None => {
            debug!("Skipping address '{}' without a usable point", label);
            return None;
        }
    };

    let attributes = HitAttributes {
        object_type: lookup::text(obj, &["objtype"]).unwrap_or_else(|| DEFAULT_OBJTYPE.to_string()),
        municipality_name: lookup::text_or_empty(obj, &["kommunenavn"]),
        municipality_number: lookup::text_or_empty(obj, &["kommunenummer"]),
        postal_code: lookup::text_or_empty(obj, &["postnummer"]),
        postal_place: lookup::text_or_empty(obj, &["poststed"]),
        property_ref: property_ref(obj),
        ..Default::default()
    };

    Some(Hit::address(label, point, attributes))
}

/// Pick the coordinate pair of an address and attach a plausible EPSG code.
fn address_point(obj: &Object, working_epsg: u32) -> Option<HitPoint> {
    let rp = lookup::object(obj, POINT_KEYS)?;

    let declared = lookup::first_present(rp, &["epsg"])
        .and_then(crs::epsg_from_value)
        .unwrap_or(DEFAULT_EPSG);

    let xy = pair(rp, &["x"], &["y"]).or_else(|| pair(rp, EAST_KEYS, &["nord"]));
    let lon_lat = pair(rp, &["lon"], &["lat"]);

    let (x, y) = choose_pair(xy, lon_lat)?;
    let epsg = reconcile_epsg(x, y, declared, working_epsg);

    Some(HitPoint::new(x, y, epsg))
}

fn pair(rp: &Object, x_keys: &[&str], y_keys: &[&str]) -> Option<(f64, f64)> {
    Some((lookup::float(rp, x_keys)?, lookup::float(rp, y_keys)?))
}

/// Prefer x/y; when lon/lat is also present take whichever looks like UTM.
fn choose_pair(xy: Option<(f64, f64)>, lon_lat: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (xy, lon_lat) {
        (Some(xy), Some(lon_lat)) => {
            if looks_like_utm(xy.0, xy.1) || !looks_like_utm(lon_lat.0, lon_lat.1) {
                Some(xy)
            } else {
                Some(lon_lat)
            }
        }
        (Some(xy), None) => Some(xy),
        (None, lon_lat) => lon_lat,
    }
}

/// "gnr/bnr", with "/fnr" and "-snr" when set; empty without gnr and bnr.
fn property_ref(obj: &Object) -> String {
    let gnr = lookup::text(obj, &["gardsnummer"]);
    let bnr = lookup::text(obj, &["bruksnummer"]);
    let (gnr, bnr) = match (gnr, bnr) {
        (Some(gnr), Some(bnr)) => (gnr, bnr),
        _ => return String::new(),
    };

    let mut reference = format!("{}/{}", gnr, bnr);
    if let Some(fnr) = lookup::text(obj, &["festenummer"]).filter(|s| s != "0") {
        reference.push_str(&format!("/{}", fnr));
    }
    if let Some(snr) = lookup::text(obj, &["undernummer"]).filter(|s| s != "0") {
        reference.push_str(&format!("-{}", snr));
    }
    reference
}

//! Place-name search (`/stedsnavn/v1/navn`) responses.

use hashbrown::HashSet;
use serde_json::Value;
use tracing::debug;

use super::lookup::{self, Object};
use crate::crs::{self, reconcile_epsg, DEFAULT_EPSG};
use crate::models::{Hit, HitAttributes, HitPoint};

const RECORD_KEYS: &[&str] = &["navn", "data", "resultater"];
const NAME_KEYS: &[&str] = &["stedsnavn", "skrivemåte", "navn"];
const TYPE_KEYS: &[&str] = &["navneobjekttype", "navnetype", "type"];
const POINT_KEYS: &[&str] = &["representasjonspunkt", "punkt"];
const EPSG_KEYS: &[&str] = &["epsg", "koordinatsystem", "srid"];
const X_KEYS: &[&str] = &["x", "ost", "øst", "lon"];
const Y_KEYS: &[&str] = &["y", "nord", "lat"];

/// Parse a place-name search response into place-name hits.
pub fn parse_place_names(data: &Value, working_epsg: u32) -> Vec<Hit> {
    lookup::records(data, RECORD_KEYS)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| place_from_object(obj, working_epsg))
        .collect()
}

/// Build one place-name hit; items without a name or point yield `None`.
pub fn place_from_object(obj: &Object, working_epsg: u32) -> Option<Hit> {
    let name = lookup::text(obj, NAME_KEYS)?;

    let rp = lookup::object(obj, POINT_KEYS);
    let (x, y) = match rp.and_then(coordinate_pair) {
        Some(pair) => pair,
        None => {
            debug!("Skipping place name '{}' without a usable point", name);
            return None;
        }
    };

    let declared = rp
        .and_then(|rp| lookup::first_present(rp, EPSG_KEYS))
        .or_else(|| lookup::first_present(obj, EPSG_KEYS))
        .and_then(crs::epsg_from_value)
        .unwrap_or(DEFAULT_EPSG);
    let epsg = reconcile_epsg(x, y, declared, working_epsg);

    let attributes = HitAttributes {
        object_type: lookup::text_or_empty(obj, TYPE_KEYS),
        municipality_name: municipality_names(obj),
        ..Default::default()
    };

    Some(Hit::place_name(name, HitPoint::new(x, y, epsg), attributes))
}

fn coordinate_pair(rp: &Object) -> Option<(f64, f64)> {
    Some((lookup::float(rp, X_KEYS)?, lookup::float(rp, Y_KEYS)?))
}

/// Unique municipality names from the `kommuner` list, first-seen order.
fn municipality_names(obj: &Object) -> String {
    let kommuner = match obj.get("kommuner").and_then(Value::as_array) {
        Some(kommuner) => kommuner,
        None => return String::new(),
    };

    let mut seen = HashSet::new();
    kommuner
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|k| lookup::text(k, &["kommunenavn"]))
        .filter(|name| seen.insert(name.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

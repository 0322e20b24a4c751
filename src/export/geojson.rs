use std::io::Write;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::layer::{attribute_row, layer_for, layer_shape};
use crate::models::{Geometry, Hit, HitKind, HitShape, Ring};
use crate::KvseekError;

fn ring_json(ring: &Ring) -> Value {
    Value::Array(ring.iter().map(|c| json!([c.x, c.y])).collect())
}

fn polygon_json(rings: &[Ring]) -> Value {
    Value::Array(rings.iter().map(ring_json).collect())
}

fn geometry_json(shape: &HitShape) -> Value {
    match shape {
        HitShape::Point(point) => json!({
            "type": "Point",
            "coordinates": [point.x, point.y],
        }),
        HitShape::Area {
            geometry: Geometry::Polygon(rings),
            ..
        } => json!({
            "type": "Polygon",
            "coordinates": polygon_json(rings),
        }),
        HitShape::Area {
            geometry: Geometry::MultiPolygon(polygons),
            ..
        } => json!({
            "type": "MultiPolygon",
            "coordinates": polygons.iter().map(|p| polygon_json(p)).collect::<Vec<_>>(),
        }),
    }
}

fn feature_json(hit: &Hit) -> Value {
    let schema = layer_for(hit.kind());
    let mut properties = Map::new();

    for (field, value) in schema.fields.iter().zip(attribute_row(hit)) {
        properties.insert(field.to_string(), json!(value));
    }
    properties.insert("epsg".to_string(), json!(hit.epsg()));

    json!({
        "type": "Feature",
        "geometry": geometry_json(&layer_shape(hit)),
        "properties": properties,
    })
}

/// Build the layer of `kind` as a GeoJSON FeatureCollection.
///
/// Hits of other kinds are left out. The `crs` member is written only when
/// every feature shares one EPSG code; otherwise readers must use the
/// per-feature `epsg` property.
pub fn feature_collection(kind: HitKind, hits: &[Hit]) -> Value {
    let schema = layer_for(kind);
    let layer_hits: Vec<&Hit> = hits.iter().filter(|hit| hit.kind() == kind).collect();
    let features: Vec<Value> = layer_hits.iter().map(|hit| feature_json(hit)).collect();

    let mut collection = json!({
        "type": "FeatureCollection",
        "name": schema.name,
        "features": features,
    });

    match shared_epsg(&layer_hits) {
        Some(epsg) => {
            collection["crs"] = json!({
                "type": "name",
                "properties": {"name": format!("urn:ogc:def:crs:EPSG::{}", epsg)},
            });
        }
        None if !layer_hits.is_empty() => {
            warn!(
                "{} layer mixes EPSG codes, leaving out the collection crs",
                schema.name
            );
        }
        None => {}
    }

    collection
}

/// The EPSG code of all hits, or `None` when empty or mixed.
fn shared_epsg(hits: &[&Hit]) -> Option<u32> {
    let first = hits.first()?.epsg();
    hits.iter().all(|hit| hit.epsg() == first).then_some(first)
}

pub fn write_geojson<W: Write>(
    mut writer: W,
    kind: HitKind,
    hits: &[Hit],
) -> Result<(), KvseekError> {
    let collection = feature_collection(kind, hits);
    debug!("Writing {} layer as GeoJSON", layer_for(kind).name);

    serde_json::to_writer_pretty(&mut writer, &collection)?;
    writeln!(writer)?;
    Ok(())
}

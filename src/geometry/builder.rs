use geo_types::Coord;
use serde_json::Value;
use tracing::debug;

use crate::models::{Geometry, PolygonRings, Ring};

/// Build a [`Geometry`] from a GeoJSON `{type, coordinates}` object.
///
/// Only `Polygon` and `MultiPolygon` are supported. Positions with fewer
/// than two numeric values are skipped and extra dimensions are ignored.
/// Empty rings are dropped, a polygon with an empty outer ring is dropped,
/// and `None` is returned when nothing usable remains.
pub fn geometry_from_geojson(value: &Value) -> Option<Geometry> {
    let geo_type = value.get("type")?.as_str()?;
    let coordinates = value.get("coordinates")?.as_array()?;

    match geo_type {
        "Polygon" => polygon_from_rings(coordinates).map(Geometry::Polygon),
        "MultiPolygon" => {
            let polygons: Vec<PolygonRings> = coordinates
                .iter()
                .filter_map(|polygon| polygon.as_array())
                .filter_map(|rings| polygon_from_rings(rings))
                .collect();

            if polygons.is_empty() {
                None
            } else {
                Some(Geometry::MultiPolygon(polygons))
            }
        }
        other => {
            debug!("Unsupported geometry type {}", other);
            None
        }
    }
}

/// Decode the rings of one polygon, keeping the outer ring first.
fn polygon_from_rings(rings: &[Value]) -> Option<PolygonRings> {
    let mut iter = rings.iter();

    let outer = ring_from_positions(iter.next()?)?;
    if outer.is_empty() {
        return None;
    }

    let mut polygon = vec![outer];
    polygon.extend(
        iter.filter_map(ring_from_positions)
            .filter(|ring| !ring.is_empty()),
    );

    Some(polygon)
}

fn ring_from_positions(ring: &Value) -> Option<Ring> {
    let positions = ring.as_array()?;
    Some(positions.iter().filter_map(position_to_coord).collect())
}

fn position_to_coord(position: &Value) -> Option<Coord<f64>> {
    let position = position.as_array()?;
    if position.len() < 2 {
        return None;
    }

    let x = position[0].as_f64()?;
    let y = position[1].as_f64()?;
    Some(Coord { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_polygon_keeps_outer_ring_length() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]]
        });

        let geometry = geometry_from_geojson(&value).unwrap();
        assert!(!geometry.is_multi());
        assert_eq!(geometry.outer_ring().unwrap().len(), 4);
    }

    #[test]
    fn test_polygon_ignores_extra_dimensions_and_keeps_holes() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0, 12.5], [10, 0, 12.5], [10, 10, 12.5], [0, 0, 12.5]],
                [[2, 2], [3, 2], [3, 3], [2, 2]],
                []
            ]
        });

        let geometry = geometry_from_geojson(&value).unwrap();
        let rings = &geometry.polygons()[0];
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0][1], Coord { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_polygon_with_empty_outer_ring_is_absent() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[], [[2, 2], [3, 2], [3, 3]]]
        });
        assert!(geometry_from_geojson(&value).is_none());

        let malformed = json!({"type": "Polygon", "coordinates": [[["a", "b"], [1]]]});
        assert!(geometry_from_geojson(&malformed).is_none());
    }

    #[test]
    fn test_multipolygon_drops_empty_members() {
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[]],
                [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                "junk"
            ]
        });

        let geometry = geometry_from_geojson(&value).unwrap();
        assert!(geometry.is_multi());
        assert_eq!(geometry.polygons().len(), 1);
    }

    #[test]
    fn test_multipolygon_all_empty_is_absent() {
        let value = json!({"type": "MultiPolygon", "coordinates": [[[]], [[]]]});
        assert!(geometry_from_geojson(&value).is_none());
    }

    #[test]
    fn test_unsupported_and_malformed() {
        assert!(geometry_from_geojson(&json!({"type": "Point", "coordinates": [10.0, 59.0]})).is_none());
        assert!(geometry_from_geojson(&json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]})).is_none());
        assert!(geometry_from_geojson(&json!({"type": "Polygon"})).is_none());
        assert!(geometry_from_geojson(&json!({"type": "Polygon", "coordinates": "x"})).is_none());
        assert!(geometry_from_geojson(&json!(null)).is_none());
    }
}

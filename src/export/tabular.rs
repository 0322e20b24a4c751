use std::io::Write;

use tracing::debug;

use super::layer::{attribute_row, layer_for, layer_shape};
use crate::models::{Geometry, Hit, HitKind, HitShape, Ring};
use crate::KvseekError;

fn ring_wkt(ring: &Ring) -> String {
    let coords: Vec<String> = ring.iter().map(|c| format!("{} {}", c.x, c.y)).collect();
    format!("({})", coords.join(", "))
}

fn polygon_wkt(rings: &[Ring]) -> String {
    let rings: Vec<String> = rings.iter().map(|r| ring_wkt(r)).collect();
    format!("({})", rings.join(", "))
}

/// Well-known text of a hit shape, without the SRID.
pub fn to_wkt(shape: &HitShape) -> String {
    match shape {
        HitShape::Point(point) => format!("POINT ({} {})", point.x, point.y),
        HitShape::Area {
            geometry: Geometry::Polygon(rings),
            ..
        } => format!("POLYGON {}", polygon_wkt(rings)),
        HitShape::Area {
            geometry: Geometry::MultiPolygon(polygons),
            ..
        } => {
            let polygons: Vec<String> = polygons.iter().map(|p| polygon_wkt(p)).collect();
            format!("MULTIPOLYGON ({})", polygons.join(", "))
        }
    }
}

/// Write the layer of `kind` as CSV: the layer fields, then `epsg` and `wkt`.
pub fn write_csv<W: Write>(writer: W, kind: HitKind, hits: &[Hit]) -> Result<(), KvseekError> {
    let schema = layer_for(kind);
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = schema.fields.to_vec();
    header.extend(["epsg", "wkt"]);
    wtr.write_record(&header)?;

    let mut written = 0;
    for hit in hits.iter().filter(|hit| hit.kind() == kind) {
        let mut record: Vec<String> = attribute_row(hit).iter().map(|v| v.to_string()).collect();
        record.push(hit.epsg().to_string());
        record.push(to_wkt(&layer_shape(hit)));
        wtr.write_record(&record)?;
        written += 1;
    }

    wtr.flush()?;
    debug!("Wrote {} rows to {} CSV", written, schema.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HitAttributes, HitPoint};
    use geo_types::Coord;

    #[test]
    fn test_point_wkt() {
        let shape = HitShape::Point(HitPoint::new(270000.5, 7040000.0, 25833));
        assert_eq!(to_wkt(&shape), "POINT (270000.5 7040000)");
    }

    #[test]
    fn test_multipolygon_wkt() {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        let shape = HitShape::Area {
            geometry: Geometry::MultiPolygon(vec![vec![ring]]),
            epsg: 25833,
        };
        assert_eq!(to_wkt(&shape), "MULTIPOLYGON (((0 0, 1 0, 0 1, 0 0)))");
    }

    #[test]
    fn test_write_csv_address_layer() {
        let attrs = HitAttributes {
            object_type: "Vegadresse".to_string(),
            municipality_name: "TRONDHEIM".to_string(),
            municipality_number: "5001".to_string(),
            property_ref: "403/193".to_string(),
            postal_code: "7011".to_string(),
            postal_place: "TRONDHEIM".to_string(),
            ..Default::default()
        };
        let hit = Hit::address(
            "Munkegata 1".into(),
            HitPoint::new(270000.0, 7040000.0, 25833),
            attrs,
        );

        let mut out = Vec::new();
        write_csv(&mut out, HitKind::Address, &[hit]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("label,objtype,kommunenavn,kommunenr,eiendom,postnr,poststed,epsg,wkt")
        );
        assert_eq!(
            lines.next(),
            Some("Munkegata 1,Vegadresse,TRONDHEIM,5001,403/193,7011,TRONDHEIM,25833,POINT (270000 7040000)")
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steder.csv");
        let hit = Hit::place_name(
            "Bø".into(),
            HitPoint::new(9.07, 59.41, 4258),
            HitAttributes::default(),
        );

        let file = std::fs::File::create(&path).unwrap();
        write_csv(file, HitKind::PlaceName, &[hit]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("navn,type,kommune,epsg,wkt"));
        assert!(text.contains("POINT (9.07 59.41)"));
    }
}

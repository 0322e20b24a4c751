use geo::{BoundingRect, Centroid};
use geo_types::{coord, Point, Rect};

use crate::crs::GEOGRAPHIC_EPSG;
use crate::models::{Hit, HitShape};

/// Half-size of the square shown around a point hit, in meters
pub const POINT_ZOOM_BUFFER: f64 = 200.0;
/// Margin added on every side of an area extent, relative to its width
pub const EXTENT_MARGIN_RATIO: f64 = 0.10;
/// Margin used when an area extent has zero width, in meters
pub const DEGENERATE_EXTENT_MARGIN: f64 = 50.0;
/// Length of one degree of latitude in meters
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Lowest cosine used when converting meters to degrees of longitude
const MIN_LATITUDE_COS: f64 = 0.01;

/// A distance in meters expressed as `(dx, dy)` in the units of `epsg`.
///
/// Projected systems are taken to use meters. For geographic systems the
/// longitude offset is widened by the latitude `lat`.
fn buffer_in_crs(meters: f64, epsg: u32, lat: f64) -> (f64, f64) {
    if !GEOGRAPHIC_EPSG.contains(&epsg) {
        return (meters, meters);
    }

    let dy = meters / METERS_PER_DEGREE;
    let dx = dy / lat.to_radians().cos().max(MIN_LATITUDE_COS);
    (dx, dy)
}

fn grow(rect: Rect<f64>, dx: f64, dy: f64) -> Rect<f64> {
    Rect::new(
        coord! { x: rect.min().x - dx, y: rect.min().y - dy },
        coord! { x: rect.max().x + dx, y: rect.max().y + dy },
    )
}

/// Map extent to zoom to for a hit, in the hit's own CRS.
pub fn zoom_extent(hit: &Hit) -> Option<Rect<f64>> {
    match hit.shape() {
        HitShape::Point(point) => {
            let (dx, dy) = buffer_in_crs(POINT_ZOOM_BUFFER, point.epsg, point.y);
            let at = coord! { x: point.x, y: point.y };
            Some(grow(Rect::new(at, at), dx, dy))
        }
        HitShape::Area { geometry, epsg } => {
            let rect = geometry.to_geo().bounding_rect()?;
            let (dx, dy) = if rect.width() > 0.0 {
                let margin = rect.width() * EXTENT_MARGIN_RATIO;
                (margin, margin)
            } else {
                buffer_in_crs(DEGENERATE_EXTENT_MARGIN, *epsg, rect.center().y)
            };

            Some(grow(rect, dx, dy))
        }
    }
}

/// Representative point of a hit: the point itself or the area's centroid.
pub fn anchor(hit: &Hit) -> Option<Point<f64>> {
    match hit.shape() {
        HitShape::Point(point) => Some(Point::new(point.x, point.y)),
        HitShape::Area { geometry, .. } => geometry.to_geo().centroid(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, HitAttributes, HitPoint};
    use geo_types::Coord;

    fn square_hit(size: f64) -> Hit {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: size, y: 0.0 },
            Coord { x: size, y: size },
            Coord { x: 0.0, y: size },
        ];
        Hit::property(
            "1/1".to_string(),
            Geometry::Polygon(vec![ring]),
            25833,
            HitAttributes::default(),
        )
    }

    #[test]
    fn test_point_extent() {
        let hit = Hit::place_name(
            "Nidaros".to_string(),
            HitPoint::new(1000.0, 2000.0, 25833),
            HitAttributes::default(),
        );

        let rect = zoom_extent(&hit).unwrap();
        assert_eq!(rect.min(), coord! { x: 800.0, y: 1800.0 });
        assert_eq!(rect.max(), coord! { x: 1200.0, y: 2200.0 });
        assert_eq!(anchor(&hit), Some(Point::new(1000.0, 2000.0)));
    }

    #[test]
    fn test_area_extent_grows_by_ten_percent() {
        let rect = zoom_extent(&square_hit(100.0)).unwrap();
        assert_eq!(rect.min(), coord! { x: -10.0, y: -10.0 });
        assert_eq!(rect.max(), coord! { x: 110.0, y: 110.0 });
    }

    #[test]
    fn test_geographic_point_extent_is_in_degrees() {
        let hit = Hit::place_name(
            "Oslo".to_string(),
            HitPoint::new(10.75, 59.91, 4258),
            HitAttributes::default(),
        );

        let rect = zoom_extent(&hit).unwrap();
        let dy = POINT_ZOOM_BUFFER / METERS_PER_DEGREE;
        assert!((rect.height() - 2.0 * dy).abs() < 1e-12);
        assert!(rect.width() > rect.height());
        assert!(rect.min().x > 10.7 && rect.max().x < 10.8);
        assert!(rect.min().y > 59.9 && rect.max().y < 59.92);
    }

    #[test]
    fn test_degenerate_area_extent() {
        let line = vec![
            Coord { x: 5.0, y: 0.0 },
            Coord { x: 5.0, y: 10.0 },
            Coord { x: 5.0, y: 0.0 },
        ];
        let hit = Hit::property(
            "1/1".to_string(),
            Geometry::Polygon(vec![line]),
            25833,
            HitAttributes::default(),
        );

        let rect = zoom_extent(&hit).unwrap();
        assert_eq!(rect.min(), coord! { x: -45.0, y: -50.0 });
        assert_eq!(rect.max(), coord! { x: 55.0, y: 60.0 });
    }

    #[test]
    fn test_area_anchor_is_centroid() {
        let center = anchor(&square_hit(10.0)).unwrap();
        assert!((center.x() - 5.0).abs() < 1e-9);
        assert!((center.y() - 5.0).abs() < 1e-9);
    }
}

//! Polygon geometry as delivered by the registries.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};

/// An ordered ring of coordinates. Closure is not enforced.
pub type Ring = Vec<Coord<f64>>;

/// Rings of one polygon: the outer boundary first, holes after it.
pub type PolygonRings = Vec<Ring>;

/// Area geometry of a property, county or municipality hit.
///
/// Values produced by [`crate::geometry::geometry_from_geojson`] always hold at
/// least one polygon with a non-empty outer ring.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(PolygonRings),
    MultiPolygon(Vec<PolygonRings>),
}

impl Geometry {
    /// All polygons, in input order
    pub fn polygons(&self) -> &[PolygonRings] {
        match self {
            Geometry::Polygon(rings) => std::slice::from_ref(rings),
            Geometry::MultiPolygon(polygons) => polygons,
        }
    }

    /// Outer ring of the first polygon
    pub fn outer_ring(&self) -> Option<&Ring> {
        self.polygons().first().and_then(|rings| rings.first())
    }

    pub fn is_empty(&self) -> bool {
        self.polygons()
            .iter()
            .all(|rings| rings.first().map_or(true, |outer| outer.is_empty()))
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Geometry::MultiPolygon(_))
    }

    /// Wrap a single polygon into a one-member multipolygon.
    pub fn into_multi(self) -> Self {
        match self {
            Geometry::Polygon(rings) => Geometry::MultiPolygon(vec![rings]),
            multi => multi,
        }
    }

    /// Convert to a `geo` multipolygon for spatial operations.
    ///
    /// `geo` closes every ring, so point counts may grow by one.
    pub fn to_geo(&self) -> MultiPolygon<f64> {
        let polygons = self
            .polygons()
            .iter()
            .filter_map(|rings| {
                let (outer, holes) = rings.split_first()?;
                let interiors = holes
                    .iter()
                    .map(|ring| LineString::new(ring.clone()))
                    .collect();
                Some(Polygon::new(LineString::new(outer.clone()), interiors))
            })
            .collect();

        MultiPolygon::new(polygons)
    }
}

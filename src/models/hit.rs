//! Unified search hit produced by the payload parsers.

use serde::{Deserialize, Serialize};

use super::Geometry;

/// Registry a hit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    /// Street address (Vegadresse)
    Address,
    /// Cadastral parcel (teig, festetomt or seksjon)
    Property,
    /// Place name from the central place-name register
    PlaceName,
    /// County (fylke) boundary
    County,
    /// Municipality (kommune) boundary
    Municipality,
}

impl HitKind {
    pub fn all() -> &'static [HitKind] {
        &[
            HitKind::Address,
            HitKind::Property,
            HitKind::PlaceName,
            HitKind::County,
            HitKind::Municipality,
        ]
    }

    /// Whether hits of this kind carry a point rather than an area
    pub fn is_point(&self) -> bool {
        matches!(self, HitKind::Address | HitKind::PlaceName)
    }
}

impl std::fmt::Display for HitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HitKind::Address => write!(f, "address"),
            HitKind::Property => write!(f, "property"),
            HitKind::PlaceName => write!(f, "place_name"),
            HitKind::County => write!(f, "county"),
            HitKind::Municipality => write!(f, "municipality"),
        }
    }
}

/// A coordinate pair tagged with its EPSG code
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPoint {
    pub x: f64,
    pub y: f64,
    pub epsg: u32,
}

impl HitPoint {
    pub fn new(x: f64, y: f64, epsg: u32) -> Self {
        Self { x, y, epsg }
    }
}

/// Location of a hit: exactly one of a point or an area.
#[derive(Debug, Clone, PartialEq)]
pub enum HitShape {
    Point(HitPoint),
    Area { geometry: Geometry, epsg: u32 },
}

/// Cadastral identifiers (matrikkelnummer) of a property hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadastralIds {
    /// Farm number (gardsnummer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gnr: Option<u32>,
    /// Property number (bruksnummer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bnr: Option<u32>,
    /// Leasehold number (festenummer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fnr: Option<u32>,
    /// Section number (seksjonsnummer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snr: Option<u32>,
    /// Parcel id (lokalid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teig_id: Option<i64>,
    /// Registry object type, usually "Teig"
    pub parcel_type: String,
}

/// Domain attributes of a hit. Fields that do not apply to a kind stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitAttributes {
    /// Address objtype, property object label, or place-name type
    pub object_type: String,
    pub municipality_name: String,
    pub municipality_number: String,
    pub postal_code: String,
    pub postal_place: String,
    /// Property reference text, e.g. "12/34/5" or "12/34-2"
    pub property_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadastre: Option<CadastralIds>,
    pub county_name: String,
    pub county_number: String,
}

/// A single normalized search result.
///
/// Hits are only built through the kind-specific constructors, which tie the
/// kind to the matching shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    kind: HitKind,
    label: String,
    shape: HitShape,
    attributes: HitAttributes,
}

impl Hit {
    pub fn address(label: String, point: HitPoint, attributes: HitAttributes) -> Self {
        Self::with_point(HitKind::Address, label, point, attributes)
    }

    pub fn place_name(label: String, point: HitPoint, attributes: HitAttributes) -> Self {
        Self::with_point(HitKind::PlaceName, label, point, attributes)
    }

    pub fn property(
        label: String,
        geometry: Geometry,
        epsg: u32,
        attributes: HitAttributes,
    ) -> Self {
        Self::with_area(HitKind::Property, label, geometry, epsg, attributes)
    }

    pub fn county(label: String, geometry: Geometry, epsg: u32, attributes: HitAttributes) -> Self {
        Self::with_area(HitKind::County, label, geometry, epsg, attributes)
    }

    pub fn municipality(
        label: String,
        geometry: Geometry,
        epsg: u32,
        attributes: HitAttributes,
    ) -> Self {
        Self::with_area(HitKind::Municipality, label, geometry, epsg, attributes)
    }

    fn with_point(kind: HitKind, label: String, point: HitPoint, attributes: HitAttributes) -> Self {
        Self {
            kind,
            label,
            shape: HitShape::Point(point),
            attributes,
        }
    }

    fn with_area(
        kind: HitKind,
        label: String,
        geometry: Geometry,
        epsg: u32,
        attributes: HitAttributes,
    ) -> Self {
        debug_assert!(!geometry.is_empty(), "area hits need a non-empty geometry");
        Self {
            kind,
            label,
            shape: HitShape::Area { geometry, epsg },
            attributes,
        }
    }

    pub fn kind(&self) -> HitKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &HitShape {
        &self.shape
    }

    pub fn attributes(&self) -> &HitAttributes {
        &self.attributes
    }

    pub fn point(&self) -> Option<&HitPoint> {
        match &self.shape {
            HitShape::Point(point) => Some(point),
            HitShape::Area { .. } => None,
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.shape {
            HitShape::Point(_) => None,
            HitShape::Area { geometry, .. } => Some(geometry),
        }
    }

    /// EPSG code of whichever shape the hit carries
    pub fn epsg(&self) -> u32 {
        match &self.shape {
            HitShape::Point(point) => point.epsg,
            HitShape::Area { epsg, .. } => *epsg,
        }
    }
}

use serde::Serialize;

use crate::models::{Hit, HitKind, HitShape};

/// Geometry type declared by a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerGeometry {
    Point,
    Polygon,
    MultiPolygon,
}

impl LayerGeometry {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerGeometry::Point => "Point",
            LayerGeometry::Polygon => "Polygon",
            LayerGeometry::MultiPolygon => "MultiPolygon",
        }
    }
}

/// Name, geometry type and attribute fields of an export layer
#[derive(Debug)]
pub struct LayerSchema {
    pub name: &'static str,
    pub geometry: LayerGeometry,
    pub fields: &'static [&'static str],
}

static ADDRESS_LAYER: LayerSchema = LayerSchema {
    name: "søkte_adresser",
    geometry: LayerGeometry::Point,
    fields: &[
        "label",
        "objtype",
        "kommunenavn",
        "kommunenr",
        "eiendom",
        "postnr",
        "poststed",
    ],
};

static PROPERTY_LAYER: LayerSchema = LayerSchema {
    name: "søkte_eiendommer",
    geometry: LayerGeometry::Polygon,
    fields: &[
        "eiendom",
        "objekt",
        "gnr",
        "bnr",
        "fnr",
        "snr",
        "teig_id",
        "objekttype",
        "kommunenr",
    ],
};

static COUNTY_LAYER: LayerSchema = LayerSchema {
    name: "søkte_fylker",
    geometry: LayerGeometry::MultiPolygon,
    fields: &["fylkesnavn", "fylkesnr"],
};

static MUNICIPALITY_LAYER: LayerSchema = LayerSchema {
    name: "søkte_kommuner",
    geometry: LayerGeometry::MultiPolygon,
    fields: &["kommunenavn", "kommunenr"],
};

static PLACE_LAYER: LayerSchema = LayerSchema {
    name: "søkte_stedsnavn",
    geometry: LayerGeometry::Point,
    fields: &["navn", "type", "kommune"],
};

pub fn layer_for(kind: HitKind) -> &'static LayerSchema {
    match kind {
        HitKind::Address => &ADDRESS_LAYER,
        HitKind::Property => &PROPERTY_LAYER,
        HitKind::County => &COUNTY_LAYER,
        HitKind::Municipality => &MUNICIPALITY_LAYER,
        HitKind::PlaceName => &PLACE_LAYER,
    }
}

/// Attribute value of a layer field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
        }
    }
}

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

fn int(n: Option<u32>) -> FieldValue {
    FieldValue::Int(i64::from(n.unwrap_or(0)))
}

fn or_label<'a>(value: &'a str, hit: &'a Hit) -> &'a str {
    if value.is_empty() {
        hit.label()
    } else {
        value
    }
}

/// Attribute values of a hit in the field order of its layer.
pub fn attribute_row(hit: &Hit) -> Vec<FieldValue> {
    let attrs = hit.attributes();

    match hit.kind() {
        HitKind::Address => vec![
            text(hit.label()),
            text(&attrs.object_type),
            text(&attrs.municipality_name),
            text(&attrs.municipality_number),
            text(&attrs.property_ref),
            text(&attrs.postal_code),
            text(&attrs.postal_place),
        ],
        HitKind::Property => {
            let cadastre = attrs.cadastre.clone().unwrap_or_default();
            vec![
                text(or_label(&attrs.property_ref, hit)),
                text(&attrs.object_type),
                int(cadastre.gnr),
                int(cadastre.bnr),
                int(cadastre.fnr),
                int(cadastre.snr),
                FieldValue::Int(cadastre.teig_id.unwrap_or(0)),
                text(&cadastre.parcel_type),
                text(&attrs.municipality_number),
            ]
        }
        HitKind::County => vec![
            text(or_label(&attrs.county_name, hit)),
            text(&attrs.county_number),
        ],
        HitKind::Municipality => vec![
            text(or_label(&attrs.municipality_name, hit)),
            text(&attrs.municipality_number),
        ],
        HitKind::PlaceName => vec![
            text(hit.label()),
            text(&attrs.object_type),
            text(&attrs.municipality_name),
        ],
    }
}

/// Shape of a hit as stored in its layer; multipolygon layers get
/// single polygons promoted.
pub fn layer_shape(hit: &Hit) -> HitShape {
    match (hit.shape(), layer_for(hit.kind()).geometry) {
        (HitShape::Area { geometry, epsg }, LayerGeometry::MultiPolygon) => HitShape::Area {
            geometry: geometry.clone().into_multi(),
            epsg: *epsg,
        },
        (shape, _) => shape.clone(),
    }
}

//! Export of hits into per-kind layers.
//!
//! Each hit kind has its own layer with a fixed attribute schema, mirroring
//! the memory layers a map host would keep. Layers are written as GeoJSON or
//! CSV with a WKT geometry column.

mod geojson;
mod layer;
mod tabular;

pub use geojson::{feature_collection, write_geojson};
pub use layer::{attribute_row, layer_for, layer_shape, FieldValue, LayerGeometry, LayerSchema};
pub use tabular::{to_wkt, write_csv};

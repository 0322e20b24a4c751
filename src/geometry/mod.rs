//! GeoJSON geometry decoding and map extents for hits.

mod builder;
mod extent;

pub use builder::geometry_from_geojson;
pub use extent::{
    anchor, zoom_extent, DEGENERATE_EXTENT_MARGIN, EXTENT_MARGIN_RATIO, METERS_PER_DEGREE,
    POINT_ZOOM_BUFFER,
};

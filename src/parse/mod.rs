//! Payload parsers for the Kartverket registries.
//!
//! Every parser takes a deserialized JSON value of unknown shape and returns
//! the hits it could build, in input order. Records missing a required field
//! are skipped; an unexpected top-level shape yields no hits. Nothing here
//! returns an error.

mod address;
mod admin;
mod lookup;
mod place;
mod property;

pub use address::{address_from_object, parse_addresses};
pub use admin::{area_geometry, parse_admin_units, parse_area};
pub use place::{parse_place_names, place_from_object};
pub use property::{
    classify_parcel, diagnose_properties, parse_properties, property_from_feature,
    PropertyDiagnosis,
};

//! Core data models for registry search results.

pub mod admin;
pub mod geometry;
pub mod hit;

pub use admin::{AdminKind, AdminSelection, AdminUnit};
pub use geometry::{Geometry, PolygonRings, Ring};
pub use hit::{CadastralIds, Hit, HitAttributes, HitKind, HitPoint, HitShape};

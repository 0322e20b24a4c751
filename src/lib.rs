//! Kvseek - search Kartverket's national registries from Rust
//!
//! This library normalizes the address, property, place-name and
//! county/municipality payloads into a single `Hit` model and provides the
//! registry client and export used by the `kvseek` binary.

pub mod config;
pub mod crs;
pub mod error;
pub mod export;
pub mod geometry;
pub mod kartverket;
pub mod models;
pub mod parse;
pub mod search;

pub use error::KvseekError;
pub use models::{Geometry, Hit, HitKind, HitPoint, HitShape};

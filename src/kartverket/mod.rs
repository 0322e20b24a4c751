//! Client for Kartverket's REST registries.
//!
//! Requests ask for coordinates in the caller's working projection through
//! the `utkoordsys` parameter; the responses are handed to [`crate::parse`]
//! untouched.

mod client;
mod endpoints;
mod request;
#[cfg(test)]
pub(crate) mod test_server;

pub use client::KartverketClient;
pub use endpoints::Endpoints;
pub use request::{area_params, AddressQuery, PlaceQuery, PropertyQuery, QueryParams};

use url::Url;

use crate::config::ApiConfig;
use crate::models::AdminKind;
use crate::KvseekError;

/// Resolved registry endpoints
#[derive(Debug, Clone)]
pub struct Endpoints {
    address: Url,
    property: Url,
    admin: Url,
    admin_fallback: Url,
    place: Url,
}

impl Endpoints {
    pub fn from_config(api: &ApiConfig) -> Result<Self, KvseekError> {
        Ok(Self {
            address: parse_base(&api.address_base)?,
            property: parse_base(&api.property_base)?,
            admin: parse_base(&api.admin_base)?,
            admin_fallback: parse_base(&api.admin_fallback_base)?,
            place: parse_base(&api.place_base)?,
        })
    }

    /// `{address}/sok`
    pub fn address_search(&self) -> Url {
        with_segments(&self.address, &["sok"])
    }

    /// `{property}/geokoding`
    pub fn property_geocoding(&self) -> Url {
        with_segments(&self.property, &["geokoding"])
    }

    /// `{place}/navn`
    pub fn place_names(&self) -> Url {
        with_segments(&self.place, &["navn"])
    }

    /// County or municipality list, primary endpoint first.
    pub fn admin_list(&self, kind: AdminKind) -> Vec<Url> {
        [&self.admin, &self.admin_fallback]
            .into_iter()
            .map(|base| with_segments(base, &[kind.path_segment()]))
            .collect()
    }

    /// Boundary of one county or municipality, primary endpoint first.
    pub fn admin_area(&self, kind: AdminKind, number: &str) -> Vec<Url> {
        [&self.admin, &self.admin_fallback]
            .into_iter()
            .map(|base| with_segments(base, &[kind.path_segment(), number, "omrade"]))
            .collect()
    }
}

/// Parse a base URL that can take extra path segments.
fn parse_base(base: &str) -> Result<Url, KvseekError> {
    let url = Url::parse(base).map_err(|source| KvseekError::Url {
        url: base.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(KvseekError::Url {
            url: base.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        });
    }

    Ok(url)
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Bases were checked by parse_base
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

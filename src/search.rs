//! Search operations and the result list they feed.
//!
//! A [`Searcher`] issues one request per search, awaits it, and hands the
//! payload to the matching parser. The [`ResultList`] is an explicit value
//! owned by the caller; each search replaces it wholesale.

use chrono::{DateTime, Utc};
use geo_types::{Point, Rect};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::{Config, SearchConfig};
use crate::geometry::{anchor, zoom_extent};
use crate::kartverket::{area_params, AddressQuery, KartverketClient, PlaceQuery, PropertyQuery};
use crate::models::{AdminKind, AdminSelection, AdminUnit, Hit, HitKind};
use crate::parse;
use crate::KvseekError;

/// Notice shown when the property registry returns parcels without areas
pub const GEOMETRY_MISSING_NOTICE: &str = "Fant eiendom (matrikkel), men responsen mangler geometri. \
Dette tyder på nedetid/degradert respons i eiendomstjenesten hos Kartverket. \
Se https://status.kartverket.no for mer informasjon.";

/// Hits of one completed search plus an optional notice for the user
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub kind: HitKind,
    pub hits: Vec<Hit>,
    pub notice: Option<String>,
}

impl SearchOutcome {
    pub fn new(kind: HitKind, hits: Vec<Hit>) -> Self {
        Self {
            kind,
            hits,
            notice: None,
        }
    }
}

/// Map preview of the selected hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    pub extent: Rect<f64>,
    pub anchor: Point<f64>,
    pub epsg: u32,
}

impl Preview {
    pub fn for_hit(hit: &Hit) -> Option<Self> {
        Some(Self {
            extent: zoom_extent(hit)?,
            anchor: anchor(hit)?,
            epsg: hit.epsg(),
        })
    }
}

/// Current result list.
///
/// `NoMatches` differs from `Empty` only in the status it reports.
#[derive(Debug, Clone, Default)]
pub enum ResultList {
    #[default]
    Empty,
    Populated {
        kind: HitKind,
        hits: Vec<Hit>,
        searched_at: DateTime<Utc>,
    },
    NoMatches {
        kind: HitKind,
        notice: Option<String>,
        searched_at: DateTime<Utc>,
    },
}

impl ResultList {
    /// Replace the list with the outcome of a new search.
    pub fn apply(&mut self, outcome: SearchOutcome) {
        let searched_at = Utc::now();
        *self = if outcome.hits.is_empty() {
            ResultList::NoMatches {
                kind: outcome.kind,
                notice: outcome.notice,
                searched_at,
            }
        } else {
            ResultList::Populated {
                kind: outcome.kind,
                hits: outcome.hits,
                searched_at,
            }
        };
    }

    pub fn clear(&mut self) {
        *self = ResultList::Empty;
    }

    pub fn hits(&self) -> &[Hit] {
        match self {
            ResultList::Populated { hits, .. } => hits,
            _ => &[],
        }
    }

    pub fn kind(&self) -> Option<HitKind> {
        match self {
            ResultList::Empty => None,
            ResultList::Populated { kind, .. } | ResultList::NoMatches { kind, .. } => Some(*kind),
        }
    }

    /// When the current list was produced; `None` while empty
    pub fn searched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ResultList::Empty => None,
            ResultList::Populated { searched_at, .. }
            | ResultList::NoMatches { searched_at, .. } => Some(*searched_at),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Hit> {
        self.hits().get(index)
    }

    /// Preview of the hit at `index`; the first hit is shown after a search.
    pub fn preview(&self, index: usize) -> Option<Preview> {
        self.get(index).and_then(Preview::for_hit)
    }

    /// Status line for the current state
    pub fn status(&self) -> String {
        match self {
            ResultList::Empty => "Klar.".to_string(),
            ResultList::Populated { hits, .. } => format!("Fant {} treff.", hits.len()),
            ResultList::NoMatches {
                notice: Some(notice),
                ..
            } => notice.clone(),
            ResultList::NoMatches { notice: None, .. } => "Ingen treff.".to_string(),
        }
    }
}

/// Runs registry searches with a fixed working projection
pub struct Searcher {
    client: KartverketClient,
    working_epsg: u32,
    address_page_size: u32,
    place_page_size: u32,
}

impl Searcher {
    pub fn new(config: &Config) -> Result<Self, KvseekError> {
        let client = KartverketClient::new(&config.api)?;
        Ok(Self::with_client(client, &config.search))
    }

    pub fn with_client(client: KartverketClient, search: &SearchConfig) -> Self {
        Self {
            client,
            working_epsg: search.working_epsg,
            address_page_size: search.address_page_size,
            place_page_size: search.place_page_size,
        }
    }

    pub fn working_epsg(&self) -> u32 {
        self.working_epsg
    }

    pub async fn addresses(&self, query: &AddressQuery) -> Result<SearchOutcome, KvseekError> {
        let params = query.params(self.working_epsg, self.address_page_size)?;
        let url = self.client.endpoints().address_search();

        info!("Searching addresses...");
        let data = self.client.get_json(&url, &params).await?;
        let hits = parse::parse_addresses(&data, self.working_epsg);
        info!("Found {} address hits", hits.len());

        Ok(SearchOutcome::new(HitKind::Address, hits))
    }

    pub async fn properties(&self, query: &PropertyQuery) -> Result<SearchOutcome, KvseekError> {
        let params = query.params(self.working_epsg)?;
        let url = self.client.endpoints().property_geocoding();

        info!("Searching property {}: {:?}", query.municipality_number, params);
        let data = self.client.get_json(&url, &params).await?;
        Ok(property_outcome(&data, self.working_epsg))
    }

    pub async fn place_names(&self, query: &PlaceQuery) -> Result<SearchOutcome, KvseekError> {
        let params = query.params(self.working_epsg, self.place_page_size)?;
        let url = self.client.endpoints().place_names();

        info!("Searching place names for '{}'", query.text.trim());
        let data = self.client.get_json(&url, &params).await?;
        let hits = parse::parse_place_names(&data, self.working_epsg);
        info!("Found {} place-name hits", hits.len());

        Ok(SearchOutcome::new(HitKind::PlaceName, hits))
    }

    /// Fetch the boundary of a county or municipality.
    pub async fn area(
        &self,
        kind: AdminKind,
        selection: &AdminSelection,
    ) -> Result<SearchOutcome, KvseekError> {
        let urls = self.client.endpoints().admin_area(kind, &selection.number);

        info!("Fetching {} boundary {}", kind.noun(), selection.number);
        let data = self
            .client
            .get_json_any(&urls, &area_params(self.working_epsg))
            .await?;

        let hits = parse::parse_area(&data, kind, selection, self.working_epsg);
        let mut outcome = SearchOutcome::new(hit_kind(kind), hits);
        if outcome.hits.is_empty() {
            outcome.notice = Some(format!(
                "Fant ingen {}geometri i responsen.",
                kind.noun().to_lowercase()
            ));
        }
        Ok(outcome)
    }

    /// Load the county or municipality catalogue, sorted by name.
    pub async fn admin_units(&self, kind: AdminKind) -> Result<Vec<AdminUnit>, KvseekError> {
        let urls = self.client.endpoints().admin_list(kind);
        let mut last_err = None;

        // An empty list counts as a failure and moves on to the fallback
        for url in &urls {
            match self.client.get_json(url, &[]).await {
                Ok(data) => {
                    let units = parse::parse_admin_units(&data, kind);
                    if !units.is_empty() {
                        info!("Loaded {} {} entries from {}", units.len(), kind.noun(), url);
                        return Ok(units);
                    }
                }
                Err(e) => {
                    warn!("Could not load {} list from {}: {}", kind.noun(), url, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => Err(KvseekError::AllEndpointsFailed(Box::new(e))),
            None => Ok(Vec::new()),
        }
    }

    /// Resolve user input to a selection, loading the catalogue when needed.
    pub async fn resolve_selection(
        &self,
        kind: AdminKind,
        input: &str,
    ) -> Result<Option<AdminSelection>, KvseekError> {
        let typed = AdminSelection::resolve(input, &[]);
        if let Some(selection) = &typed {
            if selection.name.is_some() {
                return Ok(typed);
            }
        }

        // A typed number is usable without the catalogue
        match self.admin_units(kind).await {
            Ok(units) => Ok(AdminSelection::resolve(input, &units).or(typed)),
            Err(e) => match typed {
                Some(selection) => {
                    warn!(
                        "Using {} {} without a name, list unavailable: {}",
                        kind.noun(),
                        selection.number,
                        e
                    );
                    Ok(Some(selection))
                }
                None => Err(e),
            },
        }
    }
}

fn hit_kind(kind: AdminKind) -> HitKind {
    match kind {
        AdminKind::County => HitKind::County,
        AdminKind::Municipality => HitKind::Municipality,
    }
}

/// Parse a property response and explain an empty result.
pub fn property_outcome(data: &Value, working_epsg: u32) -> SearchOutcome {
    let hits = parse::parse_properties(data, working_epsg);
    let diagnosis = parse::diagnose_properties(data);

    info!(
        "Property search: {} hits from {} features ({} without geometry)",
        hits.len(),
        diagnosis.features,
        diagnosis.without_geometry
    );

    let mut outcome = SearchOutcome::new(HitKind::Property, hits);
    if outcome.hits.is_empty() && diagnosis.geometry_missing() {
        outcome.notice = Some(GEOMETRY_MISSING_NOTICE.to_string());
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kartverket::test_server::{local_client, Route, TestServer};
    use crate::models::{HitAttributes, HitPoint};
    use serde_json::json;

    fn address_hit(label: &str) -> Hit {
        Hit::address(
            label.to_string(),
            HitPoint::new(263_000.0, 7_040_000.0, 25833),
            HitAttributes::default(),
        )
    }

    #[test]
    fn test_result_list_states() {
        let mut list = ResultList::default();
        assert!(matches!(list, ResultList::Empty));
        assert_eq!(list.status(), "Klar.");
        assert_eq!(list.kind(), None);

        list.apply(SearchOutcome::new(
            HitKind::Address,
            vec![address_hit("A 1"), address_hit("A 2")],
        ));
        assert_eq!(list.hits().len(), 2);
        assert_eq!(list.status(), "Fant 2 treff.");
        assert_eq!(list.kind(), Some(HitKind::Address));

        list.apply(SearchOutcome::new(HitKind::PlaceName, Vec::new()));
        assert!(matches!(list, ResultList::NoMatches { .. }));
        assert!(list.hits().is_empty());
        assert_eq!(list.status(), "Ingen treff.");
        assert_eq!(list.kind(), Some(HitKind::PlaceName));

        list.clear();
        assert!(matches!(list, ResultList::Empty));
    }

    #[test]
    fn test_preview_of_first_hit() {
        let mut list = ResultList::default();
        assert!(list.preview(0).is_none());

        list.apply(SearchOutcome::new(HitKind::Address, vec![address_hit("A 1")]));
        let preview = list.preview(0).unwrap();
        assert_eq!(preview.epsg, 25833);
        assert_eq!(preview.anchor, Point::new(263_000.0, 7_040_000.0));
        assert_eq!(preview.extent.width(), 400.0);
        assert!(list.preview(1).is_none());
    }

    #[test]
    fn test_property_outcome_reports_missing_geometry() {
        let data = json!({"features": [
            {"geometry": null, "properties": {"gardsnummer": 1, "bruksnummer": 1}},
            {"geometry": {"type": "Polygon", "coordinates": []}}
        ]});

        let outcome = property_outcome(&data, 25833);
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.notice.as_deref(), Some(GEOMETRY_MISSING_NOTICE));

        let mut list = ResultList::default();
        list.apply(outcome);
        assert_eq!(list.status(), GEOMETRY_MISSING_NOTICE);
    }

    #[test]
    fn test_property_outcome_without_features() {
        let outcome = property_outcome(&json!({"features": []}), 25833);
        assert!(outcome.notice.is_none());
    }

    fn local_searcher(server: &TestServer) -> Searcher {
        Searcher::with_client(local_client(&server.admin_api()), &SearchConfig::default())
    }

    #[tokio::test]
    async fn test_empty_primary_list_uses_fallback() {
        let server = TestServer::start(vec![
            Route::ok("/primary/kommuner", "[]"),
            Route::ok(
                "/fallback/kommuner",
                r#"[{"kommunenummer": "5001", "kommunenavn": "Trondheim"},
                    {"kommunenummer": "0301", "kommunenavn": "Oslo"}]"#,
            ),
        ])
        .await;

        let units = local_searcher(&server)
            .admin_units(AdminKind::Municipality)
            .await
            .unwrap();
        assert_eq!(
            units,
            vec![AdminUnit::new("0301", "Oslo"), AdminUnit::new("5001", "Trondheim")]
        );
        assert_eq!(server.requests(), vec!["/primary/kommuner", "/fallback/kommuner"]);
    }

    #[tokio::test]
    async fn test_admin_units_all_endpoints_failing() {
        let server = TestServer::start(vec![
            Route::failing("/primary/fylker"),
            Route::failing("/fallback/fylker"),
        ])
        .await;

        let err = local_searcher(&server)
            .admin_units(AdminKind::County)
            .await
            .unwrap_err();
        assert!(matches!(err, KvseekError::AllEndpointsFailed(_)));
    }

    #[tokio::test]
    async fn test_typed_number_survives_missing_catalogue() {
        let server = TestServer::start(vec![
            Route::failing("/primary/kommuner"),
            Route::failing("/fallback/kommuner"),
        ])
        .await;
        let searcher = local_searcher(&server);

        let selection = searcher
            .resolve_selection(AdminKind::Municipality, "5001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(selection.number, "5001");
        assert_eq!(selection.name, None);
        assert_eq!(selection.label(AdminKind::Municipality), "Kommune 5001");

        // A bare name cannot be resolved without the list
        assert!(searcher
            .resolve_selection(AdminKind::Municipality, "Trondheim")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_typed_number_gets_catalogue_name() {
        let server = TestServer::start(vec![Route::ok(
            "/primary/fylker",
            r#"{"fylker": [{"fylkesnummer": "50", "fylkesnavn": "Trøndelag"}]}"#,
        )])
        .await;

        let selection = local_searcher(&server)
            .resolve_selection(AdminKind::County, "50")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(selection.name.as_deref(), Some("Trøndelag"));
        assert_eq!(server.requests(), vec!["/primary/fylker"]);
    }
}

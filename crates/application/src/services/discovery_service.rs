//! Food venue discovery service
//!
//! Runs the search pipeline (keyword expansion, candidate fetch,
//! filtering) behind a [`SearchCache`].

use std::{fmt, sync::Arc};

use domain::DomainError;
use domain::entities::PointOfInterest;
use domain::value_objects::{GeoLocation, TravelMode};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::ports::{KeywordExpanderPort, PoiSourcePort};
use crate::services::result_processor;
use crate::services::search_cache::{CacheStats, SearchCache, SearchKey};

/// Largest accepted search radius unless configured otherwise
pub const DEFAULT_MAX_RADIUS_M: u32 = 10_000;

/// A validated search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    center: GeoLocation,
    radius_m: u32,
    query: String,
}

impl SearchRequest {
    /// Create a request, allowing radii up to [`DEFAULT_MAX_RADIUS_M`]
    ///
    /// # Errors
    ///
    /// Returns a validation error if `radius_m` is zero or too large.
    pub fn new(
        center: GeoLocation,
        radius_m: u32,
        query: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::bounded(center, radius_m, query, DEFAULT_MAX_RADIUS_M)
    }

    /// Create a request with an explicit radius limit
    ///
    /// # Errors
    ///
    /// Returns a validation error if `radius_m` is zero or above `max_radius_m`.
    pub fn bounded(
        center: GeoLocation,
        radius_m: u32,
        query: impl Into<String>,
        max_radius_m: u32,
    ) -> Result<Self, DomainError> {
        if radius_m == 0 {
            return Err(DomainError::validation("radius must be positive"));
        }
        if radius_m > max_radius_m {
            return Err(DomainError::validation(format!(
                "radius {radius_m} m exceeds the maximum of {max_radius_m} m"
            )));
        }

        Ok(Self {
            center,
            radius_m,
            query: query.into(),
        })
    }

    /// Search center
    #[must_use]
    pub const fn center(&self) -> &GeoLocation {
        &self.center
    }

    /// Search radius in meters
    #[must_use]
    pub const fn radius_m(&self) -> u32 {
        self.radius_m
    }

    /// The query as typed
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    fn cache_key(&self) -> SearchKey {
        SearchKey::new(
            self.center.latitude(),
            self.center.longitude(),
            self.radius_m,
            self.query.as_str(),
        )
    }
}

/// Result of a search
///
/// Keeps "nothing matched" apart from "the source could not be queried".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// At least one venue matched
    Found(Vec<PointOfInterest>),
    /// The search ran and nothing matched
    Empty,
    /// The source failed; carries a human-readable reason
    Failed(String),
}

impl SearchOutcome {
    /// `Found` for a non-empty list, `Empty` otherwise
    #[must_use]
    pub fn from_pois(pois: Vec<PointOfInterest>) -> Self {
        if pois.is_empty() {
            Self::Empty
        } else {
            Self::Found(pois)
        }
    }

    /// Whether this outcome may be memoized
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        !self.is_failed()
    }

    /// Whether the search failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Matched venues (empty unless `Found`)
    #[must_use]
    pub fn pois(&self) -> &[PointOfInterest] {
        match self {
            Self::Found(pois) => pois,
            Self::Empty | Self::Failed(_) => &[],
        }
    }

    /// Collapse into a plain list, treating failure as no results
    #[must_use]
    pub fn into_pois(self) -> Vec<PointOfInterest> {
        match self {
            Self::Found(pois) => pois,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }
}

/// A venue together with its distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPoi {
    /// The venue
    #[serde(flatten)]
    pub poi: PointOfInterest,
    /// Straight-line distance from the origin in meters
    pub distance_m: f64,
}

impl NearbyPoi {
    /// Estimated travel time in whole minutes
    #[must_use]
    pub fn travel_minutes(&self, mode: TravelMode) -> u32 {
        mode.estimate_minutes(self.distance_m)
    }
}

/// Sort venues by straight-line distance from `origin`, nearest first
///
/// Ties keep their input order.
#[must_use]
pub fn rank_by_distance(pois: Vec<PointOfInterest>, origin: &GeoLocation) -> Vec<NearbyPoi> {
    let mut ranked: Vec<NearbyPoi> = pois
        .into_iter()
        .map(|poi| NearbyPoi {
            distance_m: poi.distance_from(origin),
            poi,
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked
}

/// Discovery service for food venues near a coordinate
pub struct DiscoveryService {
    source: Arc<dyn PoiSourcePort>,
    expander: Arc<dyn KeywordExpanderPort>,
    cache: SearchCache,
}

impl fmt::Debug for DiscoveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DiscoveryService {
    /// Create a new discovery service
    pub fn new(
        source: Arc<dyn PoiSourcePort>,
        expander: Arc<dyn KeywordExpanderPort>,
        cache: SearchCache,
    ) -> Self {
        Self {
            source,
            expander,
            cache,
        }
    }

    /// Run a search, answering from the cache when possible
    #[instrument(skip(self, request), fields(query = %request.query(), radius_m = request.radius_m()))]
    pub async fn search(&self, request: &SearchRequest) -> SearchOutcome {
        self.cache
            .get_or_compute(&request.cache_key(), || self.run_pipeline(request))
            .await
    }

    /// Run a search and collapse the outcome to a list
    ///
    /// A failed search yields an empty list; use [`Self::search`] to tell
    /// the two apart.
    pub async fn search_pois(&self, request: &SearchRequest) -> Vec<PointOfInterest> {
        self.search(request).await.into_pois()
    }

    /// Cache counters
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn run_pipeline(&self, request: &SearchRequest) -> SearchOutcome {
        let keywords = self.expander.expand(request.query());
        if keywords.is_empty() {
            debug!("Query expanded to no keywords");
            return SearchOutcome::Empty;
        }
        debug!(keywords = keywords.len(), "Expanded query");

        let records = match self
            .source
            .fetch_candidates(request.center(), request.radius_m(), &keywords)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Candidate fetch failed");
                return SearchOutcome::Failed(e.to_string());
            },
        };

        let pois = result_processor::process(records, &keywords);
        info!(count = pois.len(), "Search completed");
        SearchOutcome::from_pois(pois)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeDelta;
    use domain::value_objects::{ElementKind, OsmId, SearchKeyword};

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{ManualClock, MockKeywordExpanderPort, MockPoiSourcePort, RawPoiRecord};
    use crate::services::TokenKeywordExpander;
    use crate::services::search_cache::SearchCacheConfig;

    fn record(kind: ElementKind, id: i64, tags: &[(&str, &str)]) -> RawPoiRecord {
        RawPoiRecord::new(
            OsmId::new(kind, id),
            tags.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn bun_bo_records() -> Vec<RawPoiRecord> {
        vec![
            record(
                ElementKind::Node,
                1,
                &[("name", "Quán Cô Ba"), ("cuisine", "vietnamese;bun_bo")],
            )
            .with_point(21.0300, 105.8520),
            record(ElementKind::Node, 2, &[("name", "Highlands Coffee"), ("cuisine", "coffee_shop")])
                .with_point(21.0290, 105.8530),
        ]
    }

    fn service_with(
        source: MockPoiSourcePort,
        clock: Arc<ManualClock>,
    ) -> DiscoveryService {
        DiscoveryService::new(
            Arc::new(source),
            Arc::new(TokenKeywordExpander::new()),
            SearchCache::with_clock(SearchCacheConfig::default(), clock),
        )
    }

    fn hanoi_request(query: &str) -> SearchRequest {
        SearchRequest::new(GeoLocation::hanoi(), 1000, query).unwrap()
    }

    #[test]
    fn test_request_validation() {
        assert!(SearchRequest::new(GeoLocation::hanoi(), 0, "pho").is_err());
        assert!(SearchRequest::new(GeoLocation::hanoi(), 10_001, "pho").is_err());
        assert!(SearchRequest::new(GeoLocation::hanoi(), 10_000, "pho").is_ok());
        assert!(SearchRequest::bounded(GeoLocation::hanoi(), 600, "pho", 500).is_err());

        let request = SearchRequest::new(GeoLocation::hanoi(), 1500, "bún bò").unwrap();
        assert_eq!(request.radius_m(), 1500);
        assert_eq!(request.query(), "bún bò");
    }

    #[tokio::test]
    async fn test_bun_bo_matches_through_cuisine() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .withf(|_, radius, keywords| {
                *radius == 1000 && keywords.iter().any(|k| k.raw() == "bún bò")
            })
            .times(1)
            .returning(|_, _, _| Ok(bun_bo_records()));

        let service = service_with(source, Arc::new(ManualClock::default()));
        let outcome = service.search(&hanoi_request("bún bò")).await;

        let pois = outcome.pois();
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id.to_string(), "node/1");
        assert_eq!(pois[0].address, domain::entities::ADDRESS_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_identical_requests_hit_cache() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .times(1)
            .returning(|_, _, _| Ok(bun_bo_records()));

        let clock = Arc::new(ManualClock::default());
        let service = service_with(source, clock.clone());

        let first = service.search(&hanoi_request("bún bò")).await;
        clock.advance(TimeDelta::minutes(59));
        let second = service.search(&hanoi_request("bún bò")).await;

        assert_eq!(first, second);
        assert_eq!(service.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .times(2)
            .returning(|_, _, _| Ok(bun_bo_records()));

        let clock = Arc::new(ManualClock::default());
        let service = service_with(source, clock.clone());

        service.search(&hanoi_request("bún bò")).await;
        clock.advance(TimeDelta::seconds(3601));
        service.search(&hanoi_request("bún bò")).await;

        assert_eq!(service.cache_stats().misses, 2);
    }

    #[tokio::test]
    async fn test_different_radius_is_separate_entry() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .times(2)
            .returning(|_, _, _| Ok(Vec::new()));

        let service = service_with(source, Arc::new(ManualClock::default()));
        service.search(&hanoi_request("pho")).await;
        service
            .search(&SearchRequest::new(GeoLocation::hanoi(), 2000, "pho").unwrap())
            .await;
    }

    #[tokio::test]
    async fn test_failure_is_reported_and_retried() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .times(2)
            .returning(|_, _, _| Err(ApplicationError::ExternalService("HTTP 504".to_string())));

        let service = service_with(source, Arc::new(ManualClock::default()));

        let outcome = service.search(&hanoi_request("pho")).await;
        assert!(matches!(&outcome, SearchOutcome::Failed(reason) if reason.contains("504")));

        let pois = service.search_pois(&hanoi_request("pho")).await;
        assert!(pois.is_empty());
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .returning(|_, _, _| Ok(bun_bo_records()));

        let service = service_with(source, Arc::new(ManualClock::default()));
        let outcome = service.search(&hanoi_request("sushi")).await;
        assert_eq!(outcome, SearchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_blank_query_skips_source() {
        let mut source = MockPoiSourcePort::new();
        source.expect_fetch_candidates().never();

        let service = service_with(source, Arc::new(ManualClock::default()));
        let outcome = service.search(&hanoi_request("  , ")).await;
        assert_eq!(outcome, SearchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_uses_injected_expander() {
        let mut expander = MockKeywordExpanderPort::new();
        expander
            .expect_expand()
            .times(1)
            .returning(|_| vec![SearchKeyword::new("bun_bo")]);

        let mut source = MockPoiSourcePort::new();
        source
            .expect_fetch_candidates()
            .withf(|_, _, keywords| keywords.len() == 1 && keywords[0].raw() == "bun_bo")
            .times(1)
            .returning(|_, _, _| Ok(bun_bo_records()));

        let service = DiscoveryService::new(
            Arc::new(source),
            Arc::new(expander),
            SearchCache::default(),
        );
        assert_eq!(service.search_pois(&hanoi_request("anything")).await.len(), 1);
    }

    #[test]
    fn test_outcome_helpers() {
        assert_eq!(SearchOutcome::from_pois(Vec::new()), SearchOutcome::Empty);
        assert!(SearchOutcome::Empty.is_cacheable());
        assert!(!SearchOutcome::Failed("x".to_string()).is_cacheable());
        assert!(SearchOutcome::Failed("x".to_string()).pois().is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SearchOutcome::Failed("timeout".to_string())).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["results"], "timeout");

        let json = serde_json::to_value(SearchOutcome::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }

    #[test]
    fn test_rank_by_distance() {
        let origin = GeoLocation::hanoi();
        let far = PointOfInterest::new(
            OsmId::new(ElementKind::Node, 1),
            BTreeMap::new(),
            GeoLocation::new(21.0400, 105.8542).unwrap(),
            "",
        );
        let near = PointOfInterest::new(
            OsmId::new(ElementKind::Node, 2),
            BTreeMap::new(),
            GeoLocation::new(21.0290, 105.8542).unwrap(),
            "",
        );

        let ranked = rank_by_distance(vec![far, near], &origin);
        assert_eq!(ranked[0].poi.id.id(), 2);
        assert_eq!(ranked[1].poi.id.id(), 1);
        assert!(ranked[0].distance_m < ranked[1].distance_m);
        assert!((ranked[1].distance_m - 1279.0).abs() < 5.0);
        assert_eq!(ranked[1].travel_minutes(TravelMode::Walking), 16);
    }

    #[test]
    fn test_service_debug() {
        let service = DiscoveryService::new(
            Arc::new(MockPoiSourcePort::new()),
            Arc::new(TokenKeywordExpander::new()),
            SearchCache::default(),
        );
        assert!(format!("{service:?}").contains("DiscoveryService"));
    }
}

//! Application services - Use case implementations

mod discovery_service;
mod keyword_expander;
pub mod result_processor;
mod search_cache;

pub use discovery_service::{
    DEFAULT_MAX_RADIUS_M, DiscoveryService, NearbyPoi, SearchOutcome, SearchRequest,
    rank_by_distance,
};
pub use keyword_expander::TokenKeywordExpander;
pub use search_cache::{
    CacheStats, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, SearchCache, SearchCacheConfig,
    SearchKey,
};

//! Caching layer in front of the BART feed and the planner.
//!
//! ETD boards change every few seconds upstream but the API is rate limited,
//! so each logical resource is held for a short window:
//! - per-station snapshots, keyed by station code
//! - single recommendations, keyed by walk minutes
//! - the pre-computed recommendation set, under a unit key
//!
//! Entries carry their own TTL. Expired entries are never returned and are
//! evicted lazily by moka's housekeeping.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::bart::{BartError, EtdProvider, fetch_stations};
use crate::domain::{
    Clock, InvalidStationCode, RouteRecommendation, StationCode, StationData, StationSnapshot,
    SystemClock,
};
use crate::planner::{PlannerConfig, RecommendationSet, recommend_all, recommend_route};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per resource.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 1000,
        }
    }
}

/// A cached value with the TTL it was stored under.
#[derive(Debug, Clone)]
struct Timed<V> {
    value: V,
    ttl: Duration,
}

/// Expire each entry `ttl` after it was written. Reads don't extend it.
struct PerEntryTtl;

impl<K, V> Expiry<K, Timed<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &Timed<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &Timed<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Key-value store where every entry expires a fixed time after its write.
pub struct TimedCache<K, V> {
    entries: MokaCache<K, Timed<V>>,
    default_ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            entries,
            default_ttl: config.ttl,
        }
    }

    /// The value for `key`, if it was written less than its TTL ago.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).await.map(|timed| timed.value)
    }

    /// Store under the default TTL, replacing any previous entry.
    pub async fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, self.default_ttl).await;
    }

    pub async fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, Timed { value, ttl }).await;
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }

    /// Approximate number of live entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

/// Errors surfaced by the cached service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidStationCode(#[from] InvalidStationCode),

    #[error("real-time data for {station} is unavailable")]
    UpstreamUnavailable {
        station: StationCode,
        #[source]
        source: BartError,
    },

    #[error("walk time {walk} exceeds the maximum of {max} minutes")]
    WalkTimeOutOfRange { walk: u32, max: u32 },
}

/// BART provider with caching and route planning.
///
/// Wraps an `EtdProvider`; every read goes through a `TimedCache` before
/// touching the provider.
pub struct CachedBartClient<P> {
    provider: P,
    planner: PlannerConfig,
    clock: Arc<dyn Clock>,
    fetch_timeout: Duration,
    stations: TimedCache<StationCode, Arc<StationSnapshot>>,
    recommendations: TimedCache<u32, Arc<RouteRecommendation>>,
    all_recommendations: TimedCache<(), Arc<RecommendationSet>>,
}

impl<P: EtdProvider> CachedBartClient<P> {
    /// Create a new cached client using the system clock.
    pub fn new(provider: P, planner: PlannerConfig, cache_config: &CacheConfig) -> Self {
        Self {
            provider,
            planner,
            clock: Arc::new(SystemClock),
            fetch_timeout: Duration::from_secs(10),
            stations: TimedCache::new(cache_config),
            recommendations: TimedCache::new(cache_config),
            all_recommendations: TimedCache::new(cache_config),
        }
    }

    /// Replace the clock used for departure and ETA times.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Per-station upstream timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// One roster station's board.
    ///
    /// `raw_code` is matched case-insensitively against the roster.
    pub async fn station_snapshot(
        &self,
        raw_code: &str,
    ) -> Result<Arc<StationSnapshot>, ServiceError> {
        let code = self.planner.resolve_station(raw_code)?;

        if let Some(cached) = self.stations.get(&code).await {
            debug!(station = %code, "station board cache hit");
            return Ok(cached);
        }

        let fetch = self.provider.station_etd(code);
        let result = match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(BartError::Timeout(code)),
        };

        let snapshot = match result {
            Ok(snapshot) => Arc::new(snapshot),
            Err(source) => {
                warn!(station = %code, error = %source, "station board unavailable");
                return Err(ServiceError::UpstreamUnavailable {
                    station: code,
                    source,
                });
            }
        };

        self.stations.put(code, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// The best route for a traveller `walk_mins` from the origin platform.
    ///
    /// `None` uses the configured default walk time.
    pub async fn route_recommendation(
        &self,
        walk_mins: Option<u32>,
    ) -> Result<Arc<RouteRecommendation>, ServiceError> {
        let walk = walk_mins.unwrap_or(self.planner.default_walk_mins);
        if walk > self.planner.max_walk_mins {
            return Err(ServiceError::WalkTimeOutOfRange {
                walk,
                max: self.planner.max_walk_mins,
            });
        }

        if let Some(cached) = self.recommendations.get(&walk).await {
            debug!(walk, "recommendation cache hit");
            return Ok(cached);
        }

        let data = self.fetch_roster().await;
        let recommendation = Arc::new(recommend_route(
            &data,
            walk,
            &self.planner,
            self.clock.now(),
        ));

        if self.origin_available(&data) {
            self.recommendations.put(walk, recommendation.clone()).await;
        }
        info!(
            walk,
            route = ?recommendation.route_type,
            total = recommendation.total_time,
            "computed route recommendation"
        );

        Ok(recommendation)
    }

    /// Recommendations for every walk time in the configured batch range,
    /// all computed from one set of boards.
    pub async fn all_route_recommendations(&self) -> Arc<RecommendationSet> {
        if let Some(cached) = self.all_recommendations.get(&()).await {
            debug!("recommendation set cache hit");
            return cached;
        }

        let data = self.fetch_roster().await;
        let set = Arc::new(recommend_all(&data, &self.planner, self.clock.now()));

        if self.origin_available(&data) {
            self.all_recommendations.put((), set.clone()).await;
        }
        info!(count = set.len(), "computed recommendation set");

        set
    }

    /// Drop every cached entry for every resource.
    pub fn invalidate_all(&self) {
        self.stations.invalidate_all();
        self.recommendations.invalidate_all();
        self.all_recommendations.invalidate_all();
    }

    pub fn planner(&self) -> &PlannerConfig {
        &self.planner
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn fetch_roster(&self) -> StationData {
        fetch_stations(&self.provider, &self.planner.roster(), self.fetch_timeout).await
    }

    /// Results computed without an origin board are not cached, so the next
    /// request retries upstream.
    fn origin_available(&self, data: &StationData) -> bool {
        data.get(&self.planner.origin).is_some_and(Option::is_some)
    }
}

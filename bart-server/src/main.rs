use std::net::SocketAddr;
use std::time::Duration;

use bart_server::bart::{BartClient, BartConfig, MockBartClient, Upstream};
use bart_server::cache::{CacheConfig, CachedBartClient};
use bart_server::planner::PlannerConfig;
use bart_server::web::{AppState, create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Serve recorded boards instead of the live feed when a directory is given
    let upstream = match std::env::var("BART_MOCK_DIR") {
        Ok(dir) => {
            let mock = MockBartClient::new(&dir).expect("Failed to load mock boards");
            tracing::info!(
                dir = %dir,
                stations = mock.available_stations().len(),
                "Using mock BART boards"
            );
            Upstream::Mock(mock)
        }
        Err(_) => {
            let config = BartConfig::from_env();
            tracing::info!(
                base_url = %config.base_url,
                timeout_secs = config.timeout.as_secs(),
                "Using live BART API"
            );
            Upstream::Live(BartClient::new(config).expect("Failed to create BART client"))
        }
    };

    let mut cache_config = CacheConfig::default();
    if let Some(secs) = std::env::var("CACHE_TTL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        cache_config.ttl = Duration::from_secs(secs);
    }

    let planner = PlannerConfig::default();
    tracing::info!(
        origin = %planner.origin,
        transfer_stations = planner.transfer_stations.len(),
        ttl_secs = cache_config.ttl.as_secs(),
        "Planner configured"
    );

    let bart = CachedBartClient::new(upstream, planner, &cache_config);
    let app = create_router(AppState::new(bart));

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    tracing::info!("BART transfer planner listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}

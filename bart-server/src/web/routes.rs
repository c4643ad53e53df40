//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::cache::ServiceError;
use crate::planner::classify_trains;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/bart/station/:code", get(station_board))
        .route("/api/bart/station/:code/trains", get(station_trains))
        .route("/api/bart/route-recommendation", get(route_recommendation))
        .route("/api/bart/all-route-recommendations", get(all_route_recommendations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Raw ETD board for one roster station.
async fn station_board(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state.bart.station_snapshot(&code).await?;
    Ok(Json(snapshot.as_ref()).into_response())
}

/// One roster station's trains split by heading.
async fn station_trains(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StationTrainsResponse>, AppError> {
    let snapshot = state.bart.station_snapshot(&code).await?;
    let trains = classify_trains(&snapshot, state.bart.planner());

    Ok(Json(StationTrainsResponse::new(&snapshot, trains)))
}

async fn route_recommendation(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Response, AppError> {
    let walk = query
        .walk_time
        .as_deref()
        .map(|raw| raw.trim().parse::<u32>())
        .transpose()
        .map_err(|_| AppError::BadRequest {
            message: format!(
                "walkTime must be a whole number of minutes, got {:?}",
                query.walk_time.as_deref().unwrap_or("")
            ),
        })?;

    let recommendation = state.bart.route_recommendation(walk).await?;
    Ok(Json(recommendation.as_ref()).into_response())
}

async fn all_route_recommendations(State(state): State<AppState>) -> Response {
    let set = state.bart.all_route_recommendations().await;
    Json(set.as_ref()).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidStationCode(_) | ServiceError::WalkTimeOutOfRange { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            ServiceError::UpstreamUnavailable { .. } => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::{MockBartClient, Upstream};
    use crate::cache::{CacheConfig, CachedBartClient};
    use crate::domain::FixedClock;
    use crate::planner::PlannerConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(mock: MockBartClient) -> Router {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap());
        let bart = CachedBartClient::new(
            Upstream::Mock(mock),
            PlannerConfig::default(),
            &CacheConfig::default(),
        )
        .with_clock(Arc::new(clock));

        create_router(AppState::new(bart))
    }

    fn app() -> Router {
        app_with(MockBartClient::new("data/mock_boards").unwrap())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn station_board_case_insensitive() {
        let (status, body) = get(app(), "/api/bart/station/embr").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["abbreviation"], "EMBR");
        assert_eq!(body["station"], "Embarcadero");
        assert_eq!(body["etd"][0]["destination"], "Dublin/Pleasanton");
        assert_eq!(body["etd"][0]["estimate"][0]["minutes"], 14);
    }

    #[tokio::test]
    async fn station_board_rejects_bad_codes() {
        let (status, body) = get(app(), "/api/bart/station/XX").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("XX"));

        let (status, _) = get(app(), "/api/bart/station/DUBL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn station_board_upstream_unavailable() {
        let (status, body) = get(
            app_with(MockBartClient::from_boards(HashMap::new())),
            "/api/bart/station/MONT",
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("MONT"));
    }

    #[tokio::test]
    async fn station_trains_classified() {
        let (status, body) = get(app(), "/api/bart/station/EMBR/trains").await;

        assert_eq!(status, StatusCode::OK);
        let minutes: Vec<u64> = body["destinationTrains"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["minutes"].as_u64().unwrap())
            .collect();
        assert_eq!(minutes, vec![0, 14, 29]);

        assert_eq!(body["destinationTrains"][2]["status"], "delayed");
        assert!(body["towardsCityTrains"].as_array().unwrap().is_empty());
        assert_eq!(body["awayFromCityTrains"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn default_recommendation() {
        let (status, body) = get(app(), "/api/bart/route-recommendation").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "transfer");
        assert_eq!(body["totalTime"], 12);
        assert_eq!(body["etaAtDublin"], "08:49");
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
        assert_eq!(body["steps"][2]["waitTimeAtStation"], 2);
    }

    #[tokio::test]
    async fn recommendation_with_walk_time() {
        let (status, body) = get(app(), "/api/bart/route-recommendation?walkTime=13").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "direct");
        assert_eq!(body["totalTime"], 14);
        assert_eq!(body["steps"][0]["departureTime"], "08:14");
        assert!(body.get("timeSaved").is_none());
    }

    #[tokio::test]
    async fn recommendation_rejects_bad_walk_time() {
        let (status, body) = get(app(), "/api/bart/route-recommendation?walkTime=61").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("61"));

        let (status, _) = get(app(), "/api/bart/route-recommendation?walkTime=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(app(), "/api/bart/route-recommendation?walkTime=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn all_recommendations_keyed_by_walk_time() {
        let (status, body) = get(app(), "/api/bart/all-route-recommendations").await;

        assert_eq!(status, StatusCode::OK);
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 10);
        assert_eq!(body["1"]["totalTime"], 10);
        assert_eq!(body["5"]["totalTime"], 12);
        assert_eq!(body["10"]["type"], "direct");
    }

    #[tokio::test]
    async fn infeasible_when_origin_missing() {
        let (status, body) = get(
            app_with(MockBartClient::from_boards(HashMap::new())),
            "/api/bart/route-recommendation",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalTime"], 999);
        assert_eq!(body["steps"][0]["action"], "Error: Unable to fetch train data");
    }
}

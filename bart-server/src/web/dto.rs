//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalEstimate, LineColor, StationCode, StationSnapshot, TrainStatus};
use crate::planner::ClassifiedTrains;

/// Query string for a single recommendation.
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Minutes needed to reach the origin platform. Kept raw so a bad value
    /// gets a JSON error body.
    #[serde(rename = "walkTime")]
    pub walk_time: Option<String>,
}

/// A train on the board view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResult {
    pub destination: String,
    pub minutes: u32,
    pub platform: String,
    pub cars: u32,
    pub color: LineColor,
    pub delay: u32,
    pub status: TrainStatus,
}

/// A station's trains grouped by heading.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTrainsResponse {
    pub station: String,
    pub abbreviation: StationCode,
    pub destination_trains: Vec<TrainResult>,
    pub towards_city_trains: Vec<TrainResult>,
    pub away_from_city_trains: Vec<TrainResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&ArrivalEstimate> for TrainResult {
    fn from(estimate: &ArrivalEstimate) -> Self {
        Self {
            destination: estimate.destination.clone(),
            minutes: estimate.board_minutes(),
            platform: estimate.platform.clone(),
            cars: estimate.cars,
            color: estimate.color,
            delay: estimate.delay_mins,
            status: estimate.status(),
        }
    }
}

impl StationTrainsResponse {
    pub fn new(snapshot: &StationSnapshot, trains: ClassifiedTrains<'_>) -> Self {
        let convert = |bucket: Vec<&ArrivalEstimate>| -> Vec<TrainResult> {
            bucket.into_iter().map(TrainResult::from).collect()
        };

        Self {
            station: snapshot.name.clone(),
            abbreviation: snapshot.code,
            destination_trains: convert(trains.destination_trains),
            towards_city_trains: convert(trains.towards_city_trains),
            away_from_city_trains: convert(trains.away_from_city_trains),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_result_reports_status() {
        let estimate = ArrivalEstimate {
            destination: "Antioch".to_string(),
            minutes: 4,
            platform: "2".to_string(),
            cars: 8,
            delay_mins: 3,
            color: LineColor::Yellow,
            hex_color: Some("#ffff33".to_string()),
            direction: Some("North".to_string()),
        };

        let json = serde_json::to_value(TrainResult::from(&estimate)).unwrap();

        assert_eq!(json["destination"], "Antioch");
        assert_eq!(json["delay"], 3);
        assert_eq!(json["status"], "delayed");
        assert_eq!(json["color"], "YELLOW");
    }

    #[test]
    fn leaving_train_reports_zero_minutes() {
        let estimate = ArrivalEstimate {
            destination: "Dublin/Pleasanton".to_string(),
            minutes: crate::domain::UNKNOWN_MINUTES,
            platform: "2".to_string(),
            cars: 10,
            delay_mins: 0,
            color: LineColor::Blue,
            hex_color: None,
            direction: None,
        };

        let json = serde_json::to_value(TrainResult::from(&estimate)).unwrap();

        assert_eq!(json["minutes"], 0);
        assert_eq!(json["status"], "on-time");
    }

    #[test]
    fn walk_time_query_name() {
        let query: RecommendationQuery = serde_json::from_str(r#"{"walkTime":"7"}"#).unwrap();
        assert_eq!(query.walk_time.as_deref(), Some("7"));

        let query: RecommendationQuery = serde_json::from_str("{}").unwrap();
        assert!(query.walk_time.is_none());
    }
}

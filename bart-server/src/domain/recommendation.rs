//! Route recommendation types.
//!
//! These serialize to the JSON shape the frontend consumes: camelCase keys,
//! absent optionals omitted.

use serde::Serialize;

/// `totalTime` of a recommendation that cannot be acted on.
pub const INFEASIBLE_MINUTES: u32 = 999;

/// Whether the traveller rides straight through or changes trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Direct,
    Transfer,
}

/// One leg of a recommended journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    pub action: String,

    pub station: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Minutes from now until the train in this step departs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,

    /// Minutes allowed for changing platforms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_time: Option<u32>,

    /// Idle minutes on the platform after the transfer buffer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time_at_station: Option<u32>,

    /// Ride time to the next step's station.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<u32>,
}

impl RouteStep {
    pub fn new(action: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            station: station.into(),
            platform: None,
            wait_time: None,
            departure_time: None,
            arrival_time: None,
            transfer_time: None,
            wait_time_at_station: None,
            travel_time: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_wait_time(mut self, mins: u32) -> Self {
        self.wait_time = Some(mins);
        self
    }

    pub fn with_departure_time(mut self, time: impl Into<String>) -> Self {
        self.departure_time = Some(time.into());
        self
    }

    pub fn with_arrival_time(mut self, time: impl Into<String>) -> Self {
        self.arrival_time = Some(time.into());
        self
    }

    pub fn with_transfer_time(mut self, mins: u32) -> Self {
        self.transfer_time = Some(mins);
        self
    }

    pub fn with_wait_time_at_station(mut self, mins: u32) -> Self {
        self.wait_time_at_station = Some(mins);
        self
    }

    pub fn with_travel_time(mut self, mins: u32) -> Self {
        self.travel_time = Some(mins);
        self
    }
}

/// The best way to reach the destination pair from the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecommendation {
    #[serde(rename = "type")]
    pub route_type: RouteType,

    /// Minutes from now until boarding the train that reaches the
    /// destination pair, or `INFEASIBLE_MINUTES`.
    pub total_time: u32,

    /// Direct boarding minutes minus transfer boarding minutes. Legacy field,
    /// only set on transfer recommendations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_saved: Option<u32>,

    /// Wall-clock arrival estimate at the destination pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_at_dublin: Option<String>,

    pub steps: Vec<RouteStep>,
}

impl RouteRecommendation {
    /// A direct recommendation that cannot be acted on, explained by `step`.
    pub fn infeasible(step: RouteStep) -> Self {
        Self {
            route_type: RouteType::Direct,
            total_time: INFEASIBLE_MINUTES,
            time_saved: None,
            eta_at_dublin: None,
            steps: vec![step],
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.total_time != INFEASIBLE_MINUTES
    }
}

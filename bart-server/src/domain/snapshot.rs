//! Live estimated-departure snapshots.
//!
//! A `StationSnapshot` is one station's ETD board at the moment it was
//! fetched, grouped by destination line. Snapshots are immutable once built
//! and shared as `Arc<StationSnapshot>`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::StationCode;

/// Minutes value used when the provider's estimate is missing or unparsable
/// (including the literal "Leaving").
pub const UNKNOWN_MINUTES: u32 = 999;

/// Platform assumed when the provider omits one.
pub const DEFAULT_PLATFORM: &str = "1";

/// Train length assumed when the provider omits one.
pub const DEFAULT_CAR_COUNT: u32 = 10;

/// Delays strictly above this many minutes mark a train as delayed.
const DELAY_THRESHOLD_MINS: u32 = 1;

/// Snapshots for a batch of stations. `None` marks a station whose fetch failed.
pub type StationData = HashMap<StationCode, Option<Arc<StationSnapshot>>>;

/// BART line colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineColor {
    #[default]
    Blue,
    Orange,
    Red,
    Yellow,
    Green,
    Beige,
    White,
    Purple,
}

impl LineColor {
    /// Parse a provider colour name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BLUE" => Some(LineColor::Blue),
            "ORANGE" => Some(LineColor::Orange),
            "RED" => Some(LineColor::Red),
            "YELLOW" => Some(LineColor::Yellow),
            "GREEN" => Some(LineColor::Green),
            "BEIGE" => Some(LineColor::Beige),
            "WHITE" => Some(LineColor::White),
            "PURPLE" => Some(LineColor::Purple),
            _ => None,
        }
    }
}

/// Punctuality derived from the reported delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainStatus {
    OnTime,
    Delayed,
}

/// One predicted train for one destination line at one station.
///
/// Built only through `bart::convert_estimate`, which applies every
/// fallback rule for untrusted provider fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEstimate {
    /// Destination line name, e.g. "Dublin/Pleasanton".
    pub destination: String,

    /// Minutes until departure, or `UNKNOWN_MINUTES`.
    pub minutes: u32,

    pub platform: String,

    /// Train length in cars.
    pub cars: u32,

    pub delay_mins: u32,

    pub color: LineColor,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,

    /// Compass direction as reported ("North", "South").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl ArrivalEstimate {
    /// Whether the provider gave a usable departure estimate.
    pub fn has_known_departure(&self) -> bool {
        self.minutes != UNKNOWN_MINUTES
    }

    /// Minutes as shown on a departure board. A train with no usable
    /// estimate is taken to be at the platform.
    pub fn board_minutes(&self) -> u32 {
        if self.has_known_departure() {
            self.minutes
        } else {
            0
        }
    }

    pub fn status(&self) -> TrainStatus {
        if self.delay_mins > DELAY_THRESHOLD_MINS {
            TrainStatus::Delayed
        } else {
            TrainStatus::OnTime
        }
    }
}

/// All estimates for one destination line at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationGroup {
    pub destination: String,

    pub abbreviation: String,

    /// In provider order; not sorted.
    #[serde(rename = "estimate")]
    pub estimates: Vec<ArrivalEstimate>,
}

/// One station's ETD board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSnapshot {
    #[serde(rename = "station")]
    pub name: String,

    #[serde(rename = "abbreviation")]
    pub code: StationCode,

    #[serde(rename = "etd")]
    pub groups: Vec<DestinationGroup>,
}

impl StationSnapshot {
    /// Trains whose destination name contains any of `needles`, soonest first.
    ///
    /// Only estimates with a known departure are returned. Ties keep
    /// provider order.
    pub fn trains_to<S: AsRef<str>>(&self, needles: &[S]) -> Vec<&ArrivalEstimate> {
        let mut trains: Vec<&ArrivalEstimate> = self
            .groups
            .iter()
            .filter(|g| destination_matches(&g.destination, needles))
            .flat_map(|g| g.estimates.iter())
            .filter(|e| e.has_known_departure())
            .collect();

        trains.sort_by_key(|e| e.minutes);
        trains
    }
}

/// Substring match of a destination name against any needle.
pub fn destination_matches<S: AsRef<str>>(destination: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| destination.contains(n.as_ref()))
}

//! Planner configuration: the station roster and timing constants.

use std::ops::RangeInclusive;

use chrono_tz::Tz;

use crate::domain::{InvalidStationCode, NETWORK_TIME_ZONE, StationCode};

/// An intermediate station where a reverse train can be swapped for one
/// heading to the destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStation {
    pub code: StationCode,
    pub name: String,
    /// One-way ride time from the origin, in minutes.
    pub travel_mins: u32,
}

/// Configuration parameters for route recommendations.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Station the traveller starts from.
    pub origin: StationCode,

    pub origin_name: String,

    /// Transfer stations in enumeration order.
    pub transfer_stations: Vec<TransferStation>,

    /// Substrings identifying lines that reach the destination pair.
    pub destination_pair: Vec<String>,

    /// Substrings identifying lines that run away from the destination
    /// pair through the transfer stations.
    pub reverse_destinations: Vec<String>,

    /// Minimum dwell to change platforms (minutes).
    pub transfer_buffer_mins: u32,

    /// Average ride from the origin to the destination pair (minutes).
    pub corridor_travel_mins: u32,

    /// Walk time used when the caller gives none (minutes).
    pub default_walk_mins: u32,

    /// Largest walk time accepted from callers (minutes).
    pub max_walk_mins: u32,

    /// Walk times pre-computed by the batch builder.
    pub batch_walk_mins: RangeInclusive<u32>,

    /// Zone wall-clock times are rendered in.
    pub time_zone: Tz,
}

impl PlannerConfig {
    /// Build a configuration from an ordered line of stations.
    ///
    /// `origin` is the first station; each entry of `hops` is the next
    /// station along the line with the ride time from the previous one.
    /// Transfer travel times are the cumulative sums.
    pub fn from_line(origin: (StationCode, &str), hops: &[(StationCode, &str, u32)]) -> Self {
        let mut elapsed = 0;
        let transfer_stations = hops
            .iter()
            .map(|&(code, name, mins)| {
                elapsed += mins;
                TransferStation {
                    code,
                    name: name.to_string(),
                    travel_mins: elapsed,
                }
            })
            .collect();

        Self {
            origin: origin.0,
            origin_name: origin.1.to_string(),
            transfer_stations,
            destination_pair: vec!["Dublin".to_string(), "Pleasanton".to_string()],
            reverse_destinations: ["Daly", "Millbrae", "Richmond", "Fremont"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            transfer_buffer_mins: 2,
            corridor_travel_mins: 37,
            default_walk_mins: 5,
            max_walk_mins: 60,
            batch_walk_mins: 1..=10,
            time_zone: NETWORK_TIME_ZONE,
        }
    }

    /// Set the transfer buffer.
    pub fn with_transfer_buffer(mut self, mins: u32) -> Self {
        self.transfer_buffer_mins = mins;
        self
    }

    /// Set the corridor travel time.
    pub fn with_corridor_travel(mut self, mins: u32) -> Self {
        self.corridor_travel_mins = mins;
        self
    }

    /// Set the default walk time.
    pub fn with_default_walk(mut self, mins: u32) -> Self {
        self.default_walk_mins = mins;
        self
    }

    /// Every station whose board the planner needs, origin first.
    pub fn roster(&self) -> Vec<StationCode> {
        std::iter::once(self.origin)
            .chain(self.transfer_stations.iter().map(|t| t.code))
            .collect()
    }

    /// Display name of a roster station.
    pub fn station_name(&self, code: StationCode) -> Option<&str> {
        if code == self.origin {
            return Some(&self.origin_name);
        }
        self.transfer_stations
            .iter()
            .find(|t| t.code == code)
            .map(|t| t.name.as_str())
    }

    /// Parse user input into a roster station code.
    pub fn resolve_station(&self, raw: &str) -> Result<StationCode, InvalidStationCode> {
        let code = StationCode::parse_normalized(raw)?;
        if self.station_name(code).is_none() {
            return Err(InvalidStationCode::new(raw, "not a served station"));
        }
        Ok(code)
    }

    /// Display form of the destination pair, e.g. "Dublin/Pleasanton".
    pub fn destination_label(&self) -> String {
        self.destination_pair.join("/")
    }
}

impl Default for PlannerConfig {
    /// Embarcadero, riding west along Market Street.
    fn default() -> Self {
        Self::from_line(
            (StationCode::EMBR, "Embarcadero"),
            &[
                (StationCode::MONT, "Montgomery", 1),
                (StationCode::POWL, "Powell", 1),
                (StationCode::CIVC, "Civic Center", 2),
            ],
        )
    }
}

//! Departure board view: a station's trains split by heading.

use serde::Serialize;

use crate::domain::{ArrivalEstimate, StationSnapshot, destination_matches};

use super::config::PlannerConfig;

/// Destination names that terminate in the city centre.
const TOWARDS_CITY: &[&str] = &[
    "Montgomery",
    "Powell",
    "Civic Center",
    "16th St Mission",
    "24th St Mission",
    "Glen Park",
];

/// A snapshot's estimates in three buckets, each soonest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedTrains<'a> {
    /// Trains reaching the destination pair.
    pub destination_trains: Vec<&'a ArrivalEstimate>,
    pub towards_city_trains: Vec<&'a ArrivalEstimate>,
    /// Everything else.
    pub away_from_city_trains: Vec<&'a ArrivalEstimate>,
}

/// Split every estimate on `snapshot` by where its line terminates.
///
/// Unlike the optimizer, estimates with unknown minutes are kept. They count
/// as leaving now and sort first.
pub fn classify_trains<'a>(
    snapshot: &'a StationSnapshot,
    config: &PlannerConfig,
) -> ClassifiedTrains<'a> {
    let mut classified = ClassifiedTrains {
        destination_trains: Vec::new(),
        towards_city_trains: Vec::new(),
        away_from_city_trains: Vec::new(),
    };

    for group in &snapshot.groups {
        let bucket = if destination_matches(&group.destination, &config.destination_pair) {
            &mut classified.destination_trains
        } else if destination_matches(&group.destination, TOWARDS_CITY) {
            &mut classified.towards_city_trains
        } else {
            &mut classified.away_from_city_trains
        };
        bucket.extend(group.estimates.iter());
    }

    for bucket in [
        &mut classified.destination_trains,
        &mut classified.towards_city_trains,
        &mut classified.away_from_city_trains,
    ] {
        bucket.sort_by_key(|e| e.board_minutes());
    }

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DestinationGroup, LineColor, StationCode, UNKNOWN_MINUTES};

    fn group(destination: &str, minutes: &[u32]) -> DestinationGroup {
        DestinationGroup {
            destination: destination.to_string(),
            abbreviation: String::new(),
            estimates: minutes
                .iter()
                .map(|&minutes| ArrivalEstimate {
                    destination: destination.to_string(),
                    minutes,
                    platform: "1".to_string(),
                    cars: 8,
                    delay_mins: 0,
                    color: LineColor::Yellow,
                    hex_color: None,
                    direction: None,
                })
                .collect(),
        }
    }

    fn minutes(trains: &[&ArrivalEstimate]) -> Vec<u32> {
        trains.iter().map(|t| t.board_minutes()).collect()
    }

    #[test]
    fn splits_by_heading() {
        let snapshot = StationSnapshot {
            name: "Embarcadero".to_string(),
            code: StationCode::EMBR,
            groups: vec![
                group("Dublin/Pleasanton", &[20, 5]),
                group("Daly City", &[3]),
                group("Montgomery", &[9]),
                group("Antioch", &[UNKNOWN_MINUTES, 1]),
            ],
        };

        let classified = classify_trains(&snapshot, &PlannerConfig::default());

        assert_eq!(minutes(&classified.destination_trains), vec![5, 20]);
        assert_eq!(minutes(&classified.towards_city_trains), vec![9]);
        assert_eq!(minutes(&classified.away_from_city_trains), vec![0, 1, 3]);
        assert!(!classified.away_from_city_trains[0].has_known_departure());
    }

    #[test]
    fn leaving_train_is_listed_first() {
        let snapshot = StationSnapshot {
            name: "Montgomery St.".to_string(),
            code: StationCode::MONT,
            groups: vec![group("Dublin/Pleasanton", &[UNKNOWN_MINUTES, 9])],
        };

        let classified = classify_trains(&snapshot, &PlannerConfig::default());

        assert_eq!(minutes(&classified.destination_trains), vec![0, 9]);
        assert_eq!(classified.destination_trains[0].minutes, UNKNOWN_MINUTES);
    }

    #[test]
    fn empty_board() {
        let snapshot = StationSnapshot {
            name: "Civic Center".to_string(),
            code: StationCode::CIVC,
            groups: Vec::new(),
        };

        let classified = classify_trains(&snapshot, &PlannerConfig::default());

        assert!(classified.destination_trains.is_empty());
        assert!(classified.towards_city_trains.is_empty());
        assert!(classified.away_from_city_trains.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let snapshot = StationSnapshot {
            name: "Powell".to_string(),
            code: StationCode::POWL,
            groups: vec![group("Pleasanton", &[4])],
        };

        let json = serde_json::to_value(classify_trains(&snapshot, &PlannerConfig::default()))
            .unwrap();

        assert_eq!(json["destinationTrains"][0]["minutes"], 4);
        assert!(json["towardsCityTrains"].as_array().unwrap().is_empty());
        assert!(json["awayFromCityTrains"].as_array().unwrap().is_empty());
    }
}

//! Pre-computed recommendations for a range of walk times.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{RouteRecommendation, StationData};

use super::config::PlannerConfig;
use super::optimize::recommend_route;

/// Recommendations keyed by walk minutes, ascending.
pub type RecommendationSet = BTreeMap<u32, RouteRecommendation>;

/// Run the optimizer once per walk time in `config.batch_walk_mins`.
///
/// Every walk time sees the same `data`, so the set is internally
/// consistent even if upstream boards change between calls.
pub fn recommend_all(
    data: &StationData,
    config: &PlannerConfig,
    now: DateTime<Utc>,
) -> RecommendationSet {
    config
        .batch_walk_mins
        .clone()
        .map(|walk| (walk, recommend_route(data, walk, config, now)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ArrivalEstimate, DestinationGroup, LineColor, RouteType, StationCode, StationSnapshot,
    };
    use chrono::TimeZone;
    use std::sync::Arc;

    fn snapshot(code: StationCode, groups: &[(&str, &[u32])]) -> Arc<StationSnapshot> {
        Arc::new(StationSnapshot {
            name: code.to_string(),
            code,
            groups: groups
                .iter()
                .map(|&(destination, minutes)| DestinationGroup {
                    destination: destination.to_string(),
                    abbreviation: String::new(),
                    estimates: minutes
                        .iter()
                        .map(|&minutes| ArrivalEstimate {
                            destination: destination.to_string(),
                            minutes,
                            platform: "2".to_string(),
                            cars: 10,
                            delay_mins: 0,
                            color: LineColor::Blue,
                            hex_color: None,
                            direction: None,
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
    }

    #[test]
    fn one_entry_per_walk_time() {
        let mut data = StationData::new();
        data.insert(
            StationCode::EMBR,
            Some(snapshot(StationCode::EMBR, &[("Dublin/Pleasanton", &[7, 22])])),
        );

        let set = recommend_all(&data, &PlannerConfig::default(), now());

        assert_eq!(set.keys().copied().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
        // Walks under 7 catch the 7-minute train, the rest wait for the next
        assert_eq!(set[&6].total_time, 7);
        assert_eq!(set[&7].total_time, 22);
        assert_eq!(set[&10].total_time, 22);
    }

    #[test]
    fn matches_single_recommendation() {
        let mut data = StationData::new();
        data.insert(
            StationCode::EMBR,
            Some(snapshot(
                StationCode::EMBR,
                &[("Dublin/Pleasanton", &[18]), ("Richmond", &[2, 6])],
            )),
        );
        data.insert(
            StationCode::POWL,
            Some(snapshot(StationCode::POWL, &[("Dublin/Pleasanton", &[10, 16])])),
        );

        let config = PlannerConfig::default();
        let set = recommend_all(&data, &config, now());

        for (walk, rec) in &set {
            assert_eq!(rec, &recommend_route(&data, *walk, &config, now()));
        }
        assert_eq!(set[&1].route_type, RouteType::Transfer);
    }

    #[test]
    fn missing_origin_yields_infeasible_set() {
        let set = recommend_all(&StationData::new(), &PlannerConfig::default(), now());

        assert_eq!(set.len(), 10);
        assert!(set.values().all(|rec| !rec.is_feasible()));
    }

    #[test]
    fn custom_range() {
        let mut config = PlannerConfig::default();
        config.batch_walk_mins = 3..=4;

        let set = recommend_all(&StationData::new(), &config, now());
        assert_eq!(set.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
    }
}

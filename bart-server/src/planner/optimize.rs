//! Direct vs. transfer route selection.
//!
//! Given boards for the origin and each transfer station, decide whether
//! the traveller should wait for a destination-pair train at the origin or
//! ride a reverse-direction train to a transfer station and board the
//! destination-pair train there.
//!
//! All times are minutes from "now" as reported by the boards. A transfer
//! option's total time is the minutes until boarding its final train, which
//! makes it directly comparable with the direct train's minutes.

use chrono::{DateTime, Utc};

use crate::domain::{
    ArrivalEstimate, RouteRecommendation, RouteStep, RouteType, StationData, format_departure_time,
};

use super::config::{PlannerConfig, TransferStation};

/// A reverse ride followed by a destination-pair train at a transfer station.
#[derive(Debug, Clone, Copy)]
struct TransferOption<'a> {
    station: &'a TransferStation,
    reverse: &'a ArrivalEstimate,
    onward: &'a ArrivalEstimate,
    /// Minutes from now until the reverse train reaches `station`.
    arrival_mins: u32,
}

impl TransferOption<'_> {
    fn boarding_mins(&self) -> u32 {
        self.onward.minutes
    }
}

/// Recommend a route for a traveller `walk_mins` away from the origin platform.
///
/// Never fails: a missing origin board or an empty schedule yields an
/// infeasible recommendation explaining why.
///
/// Estimates with unknown minutes ("Leaving" or unparsable) are never
/// candidates. A board whose only destination-pair train is leaving
/// therefore gets the "No ... trains departing" step rather than a direct
/// step with an unknown wait.
pub fn recommend_route(
    data: &StationData,
    walk_mins: u32,
    config: &PlannerConfig,
    now: DateTime<Utc>,
) -> RouteRecommendation {
    let Some(origin) = data.get(&config.origin).and_then(Option::as_deref) else {
        return RouteRecommendation::infeasible(RouteStep::new(
            "Error: Unable to fetch train data",
            config.origin_name.as_str(),
        ));
    };

    let Some(next_direct) = origin
        .trains_to(&config.destination_pair)
        .into_iter()
        .find(|t| t.minutes > walk_mins)
    else {
        return RouteRecommendation::infeasible(RouteStep::new(
            format!(
                "No {} trains departing more than {} min from now",
                config.destination_label(),
                walk_mins
            ),
            config.origin_name.as_str(),
        ));
    };

    let reverse = origin.trains_to(&config.reverse_destinations);

    match best_transfer(data, &reverse, walk_mins, config) {
        Some(option) if option.boarding_mins() < next_direct.minutes => {
            transfer_recommendation(&option, next_direct, config, now)
        }
        _ => direct_recommendation(next_direct, config, now),
    }
}

/// The transfer option with the earliest final boarding across all stations.
///
/// Ties keep the first option found, in station order then reverse-train order.
fn best_transfer<'a>(
    data: &'a StationData,
    reverse: &[&'a ArrivalEstimate],
    walk_mins: u32,
    config: &'a PlannerConfig,
) -> Option<TransferOption<'a>> {
    let mut best: Option<TransferOption<'a>> = None;

    for station in &config.transfer_stations {
        let Some(snapshot) = data.get(&station.code).and_then(Option::as_deref) else {
            continue;
        };
        let local = snapshot.trains_to(&config.destination_pair);

        for &reverse_train in reverse.iter().filter(|t| t.minutes > walk_mins) {
            let arrival_mins = reverse_train.minutes.saturating_add(station.travel_mins);
            let ready_mins = arrival_mins.saturating_add(config.transfer_buffer_mins);

            let Some(&onward) = local.iter().find(|t| t.minutes >= ready_mins) else {
                continue;
            };

            let option = TransferOption {
                station,
                reverse: reverse_train,
                onward,
                arrival_mins,
            };

            if best.is_none_or(|b| option.boarding_mins() < b.boarding_mins()) {
                best = Some(option);
            }
        }
    }

    best
}

fn direct_recommendation(
    train: &ArrivalEstimate,
    config: &PlannerConfig,
    now: DateTime<Utc>,
) -> RouteRecommendation {
    let tz = config.time_zone;

    let step = RouteStep::new(
        format!("Take direct {} train", train.destination),
        config.origin_name.as_str(),
    )
    .with_platform(train.platform.as_str())
    .with_wait_time(train.minutes)
    .with_departure_time(format_departure_time(now, train.minutes, tz));

    RouteRecommendation {
        route_type: RouteType::Direct,
        total_time: train.minutes,
        time_saved: None,
        eta_at_dublin: Some(format_departure_time(
            now,
            train.minutes.saturating_add(config.corridor_travel_mins),
            tz,
        )),
        steps: vec![step],
    }
}

fn transfer_recommendation(
    option: &TransferOption<'_>,
    next_direct: &ArrivalEstimate,
    config: &PlannerConfig,
    now: DateTime<Utc>,
) -> RouteRecommendation {
    let tz = config.time_zone;
    let buffer = config.transfer_buffer_mins;
    let boarding = option.boarding_mins();
    let ready = option.arrival_mins.saturating_add(buffer);

    let board_reverse = RouteStep::new(
        format!("Take {} train", option.reverse.destination),
        config.origin_name.as_str(),
    )
    .with_platform(option.reverse.platform.as_str())
    .with_wait_time(option.reverse.minutes)
    .with_departure_time(format_departure_time(now, option.reverse.minutes, tz))
    .with_travel_time(option.station.travel_mins);

    let change = RouteStep::new(
        format!("Transfer at {}", option.station.name),
        option.station.name.as_str(),
    )
    .with_arrival_time(format_departure_time(now, option.arrival_mins, tz))
    .with_transfer_time(buffer);

    let board_onward = RouteStep::new(
        format!("Take {} train", option.onward.destination),
        option.station.name.as_str(),
    )
    .with_platform(option.onward.platform.as_str())
    .with_wait_time(boarding)
    .with_departure_time(format_departure_time(now, boarding, tz))
    .with_wait_time_at_station(boarding.saturating_sub(ready));

    RouteRecommendation {
        route_type: RouteType::Transfer,
        total_time: boarding,
        time_saved: Some(next_direct.minutes - boarding),
        eta_at_dublin: Some(format_departure_time(
            now,
            boarding.saturating_add(config.corridor_travel_mins),
            tz,
        )),
        steps: vec![board_reverse, change, board_onward],
    }
}

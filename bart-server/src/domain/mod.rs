//! Domain types for the BART transfer planner.
//!
//! This module contains the validated model the planner works on. Raw
//! provider records are normalized into these types in `crate::bart`, so
//! code that receives them can trust their fields.

mod recommendation;
mod snapshot;
mod station;
mod time;

pub use recommendation::{INFEASIBLE_MINUTES, RouteRecommendation, RouteStep, RouteType};
pub use snapshot::{
    ArrivalEstimate, DEFAULT_CAR_COUNT, DEFAULT_PLATFORM, DestinationGroup, LineColor,
    StationData, StationSnapshot, TrainStatus, UNKNOWN_MINUTES, destination_matches,
};
pub use station::{InvalidStationCode, StationCode};
pub use time::{Clock, FixedClock, NETWORK_TIME_ZONE, SystemClock, format_departure_time};

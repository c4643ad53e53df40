//! Transfer planner for the Embarcadero to Dublin/Pleasanton trip.
//!
//! This module answers: "Should I wait for the next direct train, or ride
//! the other way and change at a station down the line?"
//!
//! The optimizer is pure: it works on one set of fetched boards plus an
//! injected "now", so the same inputs always give the same recommendation.

mod batch;
mod board;
mod config;
mod optimize;

pub use batch::{RecommendationSet, recommend_all};
pub use board::{ClassifiedTrains, classify_trains};
pub use config::{PlannerConfig, TransferStation};
pub use optimize::recommend_route;

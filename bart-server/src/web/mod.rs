//! Web layer for the BART transfer planner.
//!
//! Provides JSON endpoints for station boards and route recommendations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

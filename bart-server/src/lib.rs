//! BART transfer planner server.
//!
//! A web service that answers: "Leaving Embarcadero for Dublin/Pleasanton,
//! is it faster to wait for the direct train or to ride the other way and
//! change further down Market Street?"

pub mod bart;
pub mod cache;
pub mod domain;
pub mod planner;
pub mod web;
